pub mod alert;
pub mod chart;
pub mod feedback;
pub mod ids;
pub mod manual_control;
pub mod roster;
pub mod sensor;
pub mod status;
