use crate::db::convert::bad_enum;
use crate::errors::{AppError, AppResult};
use crate::models::staff::{Role, StaffMember};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_staff(row: &Row) -> rusqlite::Result<StaffMember> {
    let role_str: String = row.get("role")?;
    Ok(StaffMember {
        id: row.get("id")?,
        name: row.get("name")?,
        role: Role::from_db_str(&role_str).ok_or_else(|| bad_enum(2, "role", &role_str))?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_staff(conn: &Connection, id: &str, name: &str, role: Role) -> AppResult<()> {
    if get_staff(conn, id)?.is_some() {
        return Err(AppError::AlreadyRecorded(format!(
            "staff member '{id}' is already registered"
        )));
    }
    conn.execute(
        "INSERT INTO staff (id, name, role, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![id, name, role.to_db_str(), Local::now().to_rfc3339()],
    )
    .map_err(AppError::write_failed)?;
    Ok(())
}

pub fn get_staff(conn: &Connection, id: &str) -> AppResult<Option<StaffMember>> {
    Ok(conn
        .query_row(
            "SELECT id, name, role, created_at FROM staff WHERE id = ?1",
            [id],
            map_staff,
        )
        .optional()?)
}

pub fn list_staff(conn: &Connection) -> AppResult<Vec<StaffMember>> {
    let mut stmt = conn.prepare("SELECT id, name, role, created_at FROM staff ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_staff)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
