//! Persistence of previous-day reports and daily work reports.

use crate::db::convert::{bad_enum, date_from_db, date_to_db, opt_time_from_db, opt_time_to_db};
use crate::errors::{AppError, AppResult};
use crate::models::report::{DailyReport, DailyReportStatus, PreviousDayPlan, PreviousDayReport};
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Row, params};

const SELECT_PREVIOUS_DAY: &str = "SELECT id, staff_id, report_date,
        planned_wake_up, planned_departure, planned_arrival,
        route_photo, appearance_photo, notes,
        actual_attendance_record_id, created_at
     FROM previous_day_reports";

fn map_previous_day(row: &Row) -> rusqlite::Result<PreviousDayReport> {
    let date_str: String = row.get("report_date")?;
    Ok(PreviousDayReport {
        id: row.get("id")?,
        staff_id: row.get("staff_id")?,
        report_date: date_from_db(2, &date_str)?,
        planned_wake_up: opt_time_from_db(3, row.get("planned_wake_up")?)?,
        planned_departure: opt_time_from_db(4, row.get("planned_departure")?)?,
        planned_arrival: opt_time_from_db(5, row.get("planned_arrival")?)?,
        route_photo: row.get("route_photo")?,
        appearance_photo: row.get("appearance_photo")?,
        notes: row.get("notes")?,
        actual_attendance_record_id: row.get("actual_attendance_record_id")?,
        created_at: row.get("created_at")?,
    })
}

/// Insert a previous-day report for `report_date` (already resolved by the caller).
pub fn insert_previous_day_report(
    conn: &Connection,
    staff_id: &str,
    report_date: &NaiveDate,
    plan: &PreviousDayPlan,
) -> AppResult<PreviousDayReport> {
    conn.execute(
        "INSERT INTO previous_day_reports (
            staff_id, report_date, planned_wake_up, planned_departure, planned_arrival,
            route_photo, appearance_photo, notes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            staff_id,
            date_to_db(report_date),
            opt_time_to_db(plan.planned_wake_up),
            opt_time_to_db(plan.planned_departure),
            opt_time_to_db(plan.planned_arrival),
            plan.route_photo,
            plan.appearance_photo,
            plan.notes,
            Local::now().to_rfc3339(),
        ],
    )
    .map_err(AppError::write_failed)?;

    let id = conn.last_insert_rowid();
    let sql = format!("{SELECT_PREVIOUS_DAY} WHERE id = ?1");
    Ok(conn.query_row(&sql, [id], map_previous_day)?)
}

/// Most recently created report of `staff_id` not yet linked to a record.
pub fn get_unused_previous_day_report(
    conn: &Connection,
    staff_id: &str,
) -> AppResult<Option<PreviousDayReport>> {
    let sql = format!(
        "{SELECT_PREVIOUS_DAY}
         WHERE staff_id = ?1 AND actual_attendance_record_id IS NULL
         ORDER BY created_at DESC, id DESC
         LIMIT 1"
    );
    Ok(conn.query_row(&sql, [staff_id], map_previous_day).optional()?)
}

/// The report already fulfilled by `attendance_record_id`, if any.
pub fn get_report_linked_to(
    conn: &Connection,
    attendance_record_id: i64,
) -> AppResult<Option<PreviousDayReport>> {
    let sql = format!("{SELECT_PREVIOUS_DAY} WHERE actual_attendance_record_id = ?1");
    Ok(conn
        .query_row(&sql, [attendance_record_id], map_previous_day)
        .optional()?)
}

pub fn find_report_for_date(
    conn: &Connection,
    staff_id: &str,
    report_date: &NaiveDate,
) -> AppResult<Option<PreviousDayReport>> {
    let sql = format!(
        "{SELECT_PREVIOUS_DAY}
         WHERE staff_id = ?1 AND report_date = ?2
         ORDER BY id DESC
         LIMIT 1"
    );
    Ok(conn
        .query_row(&sql, params![staff_id, date_to_db(report_date)], map_previous_day)
        .optional()?)
}

/// Set the back-reference of an unused report.
///
/// Returns false when the report was already linked: linked reports are
/// never rewritten.
pub fn link_report(conn: &Connection, report_id: i64, attendance_record_id: i64) -> AppResult<bool> {
    let changed = conn
        .execute(
            "UPDATE previous_day_reports
             SET actual_attendance_record_id = ?1
             WHERE id = ?2 AND actual_attendance_record_id IS NULL",
            params![attendance_record_id, report_id],
        )
        .map_err(AppError::write_failed)?;
    Ok(changed == 1)
}

const SELECT_DAILY: &str =
    "SELECT id, staff_id, date, content, status, created_at, updated_at FROM daily_reports";

fn map_daily(row: &Row) -> rusqlite::Result<DailyReport> {
    let date_str: String = row.get("date")?;
    let status_str: String = row.get("status")?;
    Ok(DailyReport {
        id: row.get("id")?,
        staff_id: row.get("staff_id")?,
        date: date_from_db(2, &date_str)?,
        content: row.get("content")?,
        status: DailyReportStatus::from_db_str(&status_str)
            .ok_or_else(|| bad_enum(4, "daily report status", &status_str))?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

/// The live (draft or submitted) daily report of `staff_id` for `date`.
pub fn get_daily_report(
    conn: &Connection,
    staff_id: &str,
    date: &NaiveDate,
) -> AppResult<Option<DailyReport>> {
    let sql = format!(
        "{SELECT_DAILY}
         WHERE staff_id = ?1 AND date = ?2 AND status <> 'archived'
         ORDER BY id DESC
         LIMIT 1"
    );
    Ok(conn
        .query_row(&sql, params![staff_id, date_to_db(date)], map_daily)
        .optional()?)
}

/// Create or overwrite the live daily report.
pub fn save_daily_report(
    conn: &Connection,
    staff_id: &str,
    date: &NaiveDate,
    content: &str,
    status: DailyReportStatus,
) -> AppResult<DailyReport> {
    let now = Local::now().to_rfc3339();

    let id = match get_daily_report(conn, staff_id, date)? {
        Some(existing) => {
            conn.execute(
                "UPDATE daily_reports SET content = ?1, status = ?2, updated_at = ?3 WHERE id = ?4",
                params![content, status.to_db_str(), now, existing.id],
            )
            .map_err(AppError::write_failed)?;
            existing.id
        }
        None => {
            conn.execute(
                "INSERT INTO daily_reports (staff_id, date, content, status, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
                params![staff_id, date_to_db(date), content, status.to_db_str(), now],
            )
            .map_err(AppError::write_failed)?;
            conn.last_insert_rowid()
        }
    };

    let sql = format!("{SELECT_DAILY} WHERE id = ?1");
    Ok(conn.query_row(&sql, [id], map_daily)?)
}

/// Archive the live daily report of a date so a new cycle starts empty.
pub fn archive_daily_reports(conn: &Connection, staff_id: &str, date: &NaiveDate) -> AppResult<usize> {
    let n = conn
        .execute(
            "UPDATE daily_reports SET status = 'archived', updated_at = ?1
             WHERE staff_id = ?2 AND date = ?3 AND status <> 'archived'",
            params![Local::now().to_rfc3339(), staff_id, date_to_db(date)],
        )
        .map_err(AppError::write_failed)?;
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{day, memory_pool};

    #[test]
    fn only_one_unused_report_per_staff() {
        let pool = memory_pool();
        insert_previous_day_report(&pool.conn, "alice", &day(15), &PreviousDayPlan::default())
            .unwrap();

        let err =
            insert_previous_day_report(&pool.conn, "alice", &day(16), &PreviousDayPlan::default());
        assert!(matches!(err, Err(AppError::WriteFailed(_))));
    }

    #[test]
    fn linked_report_is_never_relinked() {
        let pool = memory_pool();
        let rec = crate::db::attendance::insert_attendance_record(
            &pool.conn,
            "alice",
            &day(15),
            crate::models::attendance::AttendanceStatus::Pending,
        )
        .unwrap();
        let report =
            insert_previous_day_report(&pool.conn, "alice", &day(15), &PreviousDayPlan::default())
                .unwrap();

        assert!(link_report(&pool.conn, report.id, rec.id).unwrap());
        assert!(!link_report(&pool.conn, report.id, rec.id + 1).unwrap());

        let linked = get_report_linked_to(&pool.conn, rec.id).unwrap().unwrap();
        assert_eq!(linked.id, report.id);
        assert!(get_unused_previous_day_report(&pool.conn, "alice").unwrap().is_none());
    }

    #[test]
    fn archived_daily_report_is_no_longer_live() {
        let pool = memory_pool();
        save_daily_report(&pool.conn, "alice", &day(14), "done", DailyReportStatus::Submitted)
            .unwrap();
        assert_eq!(archive_daily_reports(&pool.conn, "alice", &day(14)).unwrap(), 1);
        assert!(get_daily_report(&pool.conn, "alice", &day(14)).unwrap().is_none());
    }

    #[test]
    fn draft_is_overwritten_by_submission() {
        let pool = memory_pool();
        let draft =
            save_daily_report(&pool.conn, "alice", &day(14), "wip", DailyReportStatus::Draft)
                .unwrap();
        let sent = save_daily_report(
            &pool.conn,
            "alice",
            &day(14),
            "final",
            DailyReportStatus::Submitted,
        )
        .unwrap();

        assert_eq!(draft.id, sent.id);
        assert!(sent.is_submitted());
        assert_eq!(sent.content, "final");
    }
}
