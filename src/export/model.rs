// src/export/model.rs

use crate::models::attendance::AttendanceRecord;
use chrono::NaiveTime;
use serde::Serialize;

fn hhmm(t: Option<NaiveTime>) -> String {
    t.map(|v| v.format("%H:%M").to_string()).unwrap_or_default()
}

/// Flat view of an attendance record for CSV / JSON.
#[derive(Serialize, Clone, Debug)]
pub struct AttendanceExport {
    pub id: i64,
    pub staff_id: String,
    pub date: String,
    pub status: String,
    pub wake_up: String,
    pub departure: String,
    pub arrival: String,
    pub arrival_location: String,
    pub arrival_gps: String,
    pub route_photo: String,
    pub appearance_photo: String,
    pub version: i64,
}

impl From<&AttendanceRecord> for AttendanceExport {
    fn from(r: &AttendanceRecord) -> Self {
        Self {
            id: r.id,
            staff_id: r.staff_id.clone(),
            date: r.date_str(),
            status: r.status.to_db_str().to_string(),
            wake_up: hhmm(r.wake_up_time),
            departure: hhmm(r.departure_time),
            arrival: hhmm(r.arrival_time),
            arrival_location: r.arrival_location.clone().unwrap_or_default(),
            arrival_gps: r.arrival_gps.clone().unwrap_or_default(),
            route_photo: r.route_photo.clone().unwrap_or_default(),
            appearance_photo: r.appearance_photo.clone().unwrap_or_default(),
            version: r.version,
        }
    }
}
