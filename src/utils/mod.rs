pub mod colors;
pub mod date;
pub mod gps;
pub mod path;
pub mod table;
pub mod time;
