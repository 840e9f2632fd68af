use crate::db::{attendance, reports};
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;

/// Link the most recent unused previous-day report of `staff_id` to
/// `attendance_record_id`.
///
/// Returns the linked report id, or `None` when there was nothing to link
/// (no unused report, or the record already fulfils a report).
pub fn link_previous_day_report(
    conn: &Connection,
    staff_id: &str,
    attendance_record_id: i64,
) -> AppResult<Option<i64>> {
    let record = attendance::get_attendance_record(conn, attendance_record_id)?
        .filter(|r| r.staff_id == staff_id)
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "attendance record #{attendance_record_id} for staff '{staff_id}'"
            ))
        })?;

    if reports::get_report_linked_to(conn, record.id)?.is_some() {
        return Ok(None);
    }

    let Some(report) = reports::get_unused_previous_day_report(conn, staff_id)? else {
        return Ok(None);
    };

    if reports::link_report(conn, report.id, record.id)? {
        Ok(Some(report.id))
    } else {
        Ok(None)
    }
}
