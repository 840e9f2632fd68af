use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use rusqlite::Connection;

/// Bring the schema of a staffcheck database up to date.
///
/// Tables and indexes are defined only in `migrate::MIGRATIONS`; a fresh file
/// and an old one go through the same pending-migration pass.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    run_pending_migrations(conn)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrate::applied_versions;

    #[test]
    fn reopening_applies_nothing_twice() {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();
        let first = applied_versions(&conn).unwrap();
        assert!(!first.is_empty());

        init_db(&conn).unwrap();
        assert_eq!(applied_versions(&conn).unwrap(), first);
        assert_eq!(run_pending_migrations(&conn).unwrap(), 0);
    }
}
