pub mod alerts;
pub mod cards;
pub mod chart;
pub mod feedback;
pub mod roster;
pub mod sensor_log;
pub mod settings;
pub mod status;
