use chrono::NaiveDate;
use serde::Serialize;

pub const INCOMPLETE_DAY: &str = "incomplete_day";

#[derive(Debug, Clone, Serialize)]
pub struct Alert {
    pub id: i64,
    pub staff_id: String,
    pub date: NaiveDate,
    pub kind: String,
    pub message: String,
    pub created_at: String,
}
