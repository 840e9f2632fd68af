use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShiftStatus {
    Pending,
    Approved,
}

impl ShiftStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ShiftStatus::Pending => "pending",
            ShiftStatus::Approved => "approved",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ShiftStatus::Pending),
            "approved" => Some(ShiftStatus::Approved),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ShiftSchedule {
    pub id: i64,
    pub staff_id: String,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub worksite: Option<String>,
    pub status: ShiftStatus,
}

/// Two shifts of the same staff member overlapping on the same date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShiftConflict {
    pub staff_id: String,
    pub date: NaiveDate,
    pub first_id: i64,
    pub second_id: i64,
    pub overlap_minutes: i64,
}

impl ShiftConflict {
    pub fn involves(&self, shift_id: i64) -> bool {
        self.first_id == shift_id || self.second_id == shift_id
    }
}
