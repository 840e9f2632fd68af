pub mod alert;
pub mod attendance;
pub mod report;
pub mod shift;
pub mod staff;
pub mod stage;
pub mod workflow;
