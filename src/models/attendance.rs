use super::stage::Stage;
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttendanceStatus {
    Pending,
    Partial,
    Active,
    Complete,
    Reset,
}

impl AttendanceStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Pending => "pending",
            AttendanceStatus::Partial => "partial",
            AttendanceStatus::Active => "active",
            AttendanceStatus::Complete => "complete",
            AttendanceStatus::Reset => "reset",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(AttendanceStatus::Pending),
            "partial" => Some(AttendanceStatus::Partial),
            "active" => Some(AttendanceStatus::Active),
            "complete" => Some(AttendanceStatus::Complete),
            "reset" => Some(AttendanceStatus::Reset),
            _ => None,
        }
    }

    /// Status reached after a stage has been written on the record.
    pub fn after_stage(stage: Stage) -> Self {
        match stage {
            Stage::Arrival => AttendanceStatus::Active,
            _ => AttendanceStatus::Partial,
        }
    }
}

/// One row of `attendance_records`.
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceRecord {
    pub id: i64,
    pub staff_id: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub wake_up_time: Option<NaiveTime>,
    pub departure_time: Option<NaiveTime>,
    pub arrival_time: Option<NaiveTime>,
    pub wake_up_notes: Option<String>,
    pub departure_notes: Option<String>,
    pub arrival_notes: Option<String>,
    pub route_photo: Option<String>,
    pub appearance_photo: Option<String>,
    pub arrival_location: Option<String>,
    pub arrival_gps: Option<String>,
    pub version: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl AttendanceRecord {
    /// A stage counts as reported when its timestamp is present.
    pub fn has_stage(&self, stage: Stage) -> bool {
        match stage {
            Stage::WakeUp => self.wake_up_time.is_some(),
            Stage::Departure => self.departure_time.is_some(),
            Stage::Arrival => self.arrival_time.is_some(),
            Stage::PreviousDay | Stage::DailyReport => false,
        }
    }

    pub fn stage_time(&self, stage: Stage) -> Option<NaiveTime> {
        match stage {
            Stage::WakeUp => self.wake_up_time,
            Stage::Departure => self.departure_time,
            Stage::Arrival => self.arrival_time,
            Stage::PreviousDay | Stage::DailyReport => None,
        }
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Fields submitted together with a single attendance stage.
#[derive(Debug, Clone, Default)]
pub struct StagePayload {
    pub time: Option<NaiveTime>,
    pub notes: Option<String>,
    pub photo: Option<String>,
    pub location: Option<String>,
    pub gps: Option<String>,
}

impl StagePayload {
    pub fn at(time: NaiveTime) -> Self {
        Self {
            time: Some(time),
            ..Default::default()
        }
    }
}
