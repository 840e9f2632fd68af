use crate::db::convert::{bad_enum, date_from_db, date_to_db, time_from_db, time_to_db};
use crate::errors::{AppError, AppResult};
use crate::models::shift::{ShiftSchedule, ShiftStatus};
use chrono::{Local, NaiveDate, NaiveTime};
use rusqlite::{Connection, OptionalExtension, Row, params};

const SELECT_SHIFTS: &str =
    "SELECT id, staff_id, date, start_time, end_time, worksite, status FROM shift_schedules";

fn map_shift(row: &Row) -> rusqlite::Result<ShiftSchedule> {
    let date_str: String = row.get("date")?;
    let start_str: String = row.get("start_time")?;
    let end_str: String = row.get("end_time")?;
    let status_str: String = row.get("status")?;

    Ok(ShiftSchedule {
        id: row.get("id")?,
        staff_id: row.get("staff_id")?,
        date: date_from_db(2, &date_str)?,
        start: time_from_db(3, &start_str)?,
        end: time_from_db(4, &end_str)?,
        worksite: row.get("worksite")?,
        status: ShiftStatus::from_db_str(&status_str)
            .ok_or_else(|| bad_enum(6, "shift status", &status_str))?,
    })
}

pub fn insert_shift(
    conn: &Connection,
    staff_id: &str,
    date: &NaiveDate,
    start: &NaiveTime,
    end: &NaiveTime,
    worksite: Option<&str>,
) -> AppResult<ShiftSchedule> {
    conn.execute(
        "INSERT INTO shift_schedules (staff_id, date, start_time, end_time, worksite, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, 'pending', ?6)",
        params![
            staff_id,
            date_to_db(date),
            time_to_db(start),
            time_to_db(end),
            worksite,
            Local::now().to_rfc3339()
        ],
    )
    .map_err(AppError::write_failed)?;

    let id = conn.last_insert_rowid();
    get_shift(conn, id)?.ok_or_else(|| AppError::Other(format!("shift #{id} vanished after insert")))
}

pub fn get_shift(conn: &Connection, id: i64) -> AppResult<Option<ShiftSchedule>> {
    let sql = format!("{SELECT_SHIFTS} WHERE id = ?1");
    Ok(conn.query_row(&sql, [id], map_shift).optional()?)
}

pub fn list_shifts(
    conn: &Connection,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<ShiftSchedule>> {
    let (start, end) = match bounds {
        Some((s, e)) => (Some(date_to_db(&s)), Some(date_to_db(&e))),
        None => (None, None),
    };
    let sql = format!(
        "{SELECT_SHIFTS}
         WHERE (?1 IS NULL OR date >= ?1) AND (?2 IS NULL OR date <= ?2)
         ORDER BY date ASC, staff_id ASC, start_time ASC"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![start, end], map_shift)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Approved shifts of one staff member on one date.
pub fn approved_shifts_for(
    conn: &Connection,
    staff_id: &str,
    date: &NaiveDate,
) -> AppResult<Vec<ShiftSchedule>> {
    let sql = format!(
        "{SELECT_SHIFTS}
         WHERE staff_id = ?1 AND date = ?2 AND status = 'approved'
         ORDER BY start_time ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![staff_id, date_to_db(date)], map_shift)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn set_shift_status(conn: &Connection, id: i64, status: ShiftStatus) -> AppResult<()> {
    conn.execute(
        "UPDATE shift_schedules SET status = ?1 WHERE id = ?2",
        params![status.to_db_str(), id],
    )
    .map_err(AppError::write_failed)?;
    Ok(())
}
