use crate::db::convert::{date_from_db, date_to_db};
use crate::errors::{AppError, AppResult};
use crate::models::alert::Alert;
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, params};

pub fn insert_alert(
    conn: &Connection,
    staff_id: &str,
    date: &NaiveDate,
    kind: &str,
    message: &str,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO alerts (staff_id, date, kind, message, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![staff_id, date_to_db(date), kind, message, Local::now().to_rfc3339()],
    )
    .map_err(AppError::write_failed)?;
    Ok(conn.last_insert_rowid())
}

pub fn list_alerts(conn: &Connection, staff_id: Option<&str>) -> AppResult<Vec<Alert>> {
    let mut stmt = conn.prepare(
        "SELECT id, staff_id, date, kind, message, created_at
         FROM alerts
         WHERE (?1 IS NULL OR staff_id = ?1)
         ORDER BY id DESC",
    )?;

    let rows = stmt.query_map([staff_id], |row| {
        let date_str: String = row.get(2)?;
        Ok(Alert {
            id: row.get(0)?,
            staff_id: row.get(1)?,
            date: date_from_db(2, &date_str)?,
            kind: row.get(3)?,
            message: row.get(4)?,
            created_at: row.get(5)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
