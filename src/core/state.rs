//! Loading of the persisted facts `derive_status` works on.

use crate::db::{attendance, reports};
use crate::errors::AppResult;
use crate::models::attendance::{AttendanceRecord, AttendanceStatus};
use crate::models::report::{DailyReport, PreviousDayReport};
use crate::models::stage::Stage;
use crate::models::workflow::WorkflowState;
use chrono::NaiveDate;
use rusqlite::Connection;

/// Workflow inputs together with the rows they were derived from.
#[derive(Debug, Clone)]
pub struct WorkflowSnapshot {
    pub staff_id: String,
    pub date: NaiveDate,
    pub state: WorkflowState,
    /// Open record of the day, the one further writes go to.
    pub current: Option<AttendanceRecord>,
    /// Record closed by day completion, when there is no open one.
    pub completed: Option<AttendanceRecord>,
    pub previous_day: Option<PreviousDayReport>,
    pub daily_report: Option<DailyReport>,
}

impl WorkflowSnapshot {
    /// Version of the current record observed at load time.
    pub fn observed_version(&self) -> Option<i64> {
        self.current.as_ref().map(|r| r.version)
    }

    /// The record the day's stage flags were read from.
    pub fn day_record(&self) -> Option<&AttendanceRecord> {
        self.current.as_ref().or(self.completed.as_ref())
    }
}

pub fn load_workflow_state(
    conn: &Connection,
    staff_id: &str,
    date: &NaiveDate,
) -> AppResult<WorkflowSnapshot> {
    let current = attendance::get_current_attendance_record(conn, staff_id, date)?;

    // Completion is persisted as the status of the latest record of the day.
    let completed = match &current {
        Some(_) => None,
        None => attendance::get_latest_attendance_record(conn, staff_id, date)?
            .filter(|r| r.status == AttendanceStatus::Complete),
    };
    let day_completed = completed.is_some();
    let day_record = current.as_ref().or(completed.as_ref());

    let linked = match day_record {
        Some(rec) => reports::get_report_linked_to(conn, rec.id)?,
        None => None,
    };
    let previous_day = match linked {
        Some(r) => Some(r),
        None => reports::get_unused_previous_day_report(conn, staff_id)?,
    };

    let daily_report = reports::get_daily_report(conn, staff_id, date)?;

    let has = |stage: Stage| day_record.is_some_and(|r| r.has_stage(stage));

    let state = WorkflowState {
        previous_day_reported: previous_day.is_some(),
        report_date: previous_day.as_ref().map(|r| r.report_date),
        wake_up_reported: has(Stage::WakeUp),
        departure_reported: has(Stage::Departure),
        arrival_reported: has(Stage::Arrival),
        daily_report_submitted: daily_report.as_ref().is_some_and(|r| r.is_submitted()),
        day_completed,
    };

    Ok(WorkflowSnapshot {
        staff_id: staff_id.to_string(),
        date: *date,
        state,
        current,
        completed,
        previous_day,
        daily_report,
    })
}
