pub mod complete;
pub mod day;
pub mod link;
pub mod log;
pub mod notify;
pub mod roster;
pub mod shifts;
pub mod state;
pub mod status;
pub mod submit;
pub mod workflow;
