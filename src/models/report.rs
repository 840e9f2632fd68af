use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// Plan submitted "the day before" for a target `report_date`.
#[derive(Debug, Clone, Serialize)]
pub struct PreviousDayReport {
    pub id: i64,
    pub staff_id: String,
    pub report_date: NaiveDate,
    pub planned_wake_up: Option<NaiveTime>,
    pub planned_departure: Option<NaiveTime>,
    pub planned_arrival: Option<NaiveTime>,
    pub route_photo: Option<String>,
    pub appearance_photo: Option<String>,
    pub notes: Option<String>,
    pub actual_attendance_record_id: Option<i64>,
    pub created_at: String,
}

/// Input of the previous-day stage.
#[derive(Debug, Clone, Default)]
pub struct PreviousDayPlan {
    pub report_date: Option<NaiveDate>,
    pub planned_wake_up: Option<NaiveTime>,
    pub planned_departure: Option<NaiveTime>,
    pub planned_arrival: Option<NaiveTime>,
    pub route_photo: Option<String>,
    pub appearance_photo: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DailyReportStatus {
    Draft,
    Submitted,
    Archived,
}

impl DailyReportStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            DailyReportStatus::Draft => "draft",
            DailyReportStatus::Submitted => "submitted",
            DailyReportStatus::Archived => "archived",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(DailyReportStatus::Draft),
            "submitted" => Some(DailyReportStatus::Submitted),
            "archived" => Some(DailyReportStatus::Archived),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyReport {
    pub id: i64,
    pub staff_id: String,
    pub date: NaiveDate,
    pub content: String,
    pub status: DailyReportStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl DailyReport {
    pub fn is_submitted(&self) -> bool {
        self.status == DailyReportStatus::Submitted
    }
}
