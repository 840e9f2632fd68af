use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::staff::{get_staff, insert_staff};
use crate::errors::{AppError, AppResult};
use crate::models::staff::{Role, StaffMember};
use rusqlite::Connection;

/// Look up a registered staff member or fail with `NOT_FOUND`.
pub fn require_staff(conn: &Connection, staff_id: &str) -> AppResult<StaffMember> {
    get_staff(conn, staff_id)?
        .ok_or_else(|| AppError::NotFound(format!("staff member '{staff_id}'")))
}

pub fn register(pool: &mut DbPool, id: &str, name: &str, role: Role) -> AppResult<StaffMember> {
    let id = id.trim();
    let name = name.trim();
    if id.is_empty() {
        return Err(AppError::MissingField("staff id".into()));
    }
    if name.is_empty() {
        return Err(AppError::MissingField("staff name".into()));
    }

    let tx = pool.conn.transaction()?;
    insert_staff(&tx, id, name, role)?;
    ttlog(&tx, "staff_add", id, &format!("Registered {name} ({})", role.to_db_str()))?;
    let member = require_staff(&tx, id)?;
    tx.commit().map_err(AppError::write_failed)?;
    Ok(member)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::memory_pool;

    #[test]
    fn register_and_lookup() {
        let mut pool = memory_pool();
        let m = register(&mut pool, "carol", "Carol", Role::Staff).unwrap();
        assert_eq!(m.name, "Carol");

        let err = register(&mut pool, "carol", "Carol", Role::Staff).unwrap_err();
        assert_eq!(err.code(), "ALREADY_RECORDED");

        let err = require_staff(&pool.conn, "nobody").unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
    }
}
