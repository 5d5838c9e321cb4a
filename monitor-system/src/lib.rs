pub mod config;
pub mod runner;
pub mod views;
pub mod watch;
