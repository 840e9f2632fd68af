use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};

/// Ensure that the `log` table exists: it also records applied migrations.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

const CREATE_STAFF: &str = r#"
    CREATE TABLE IF NOT EXISTS staff (
        id         TEXT PRIMARY KEY,
        name       TEXT NOT NULL,
        role       TEXT NOT NULL DEFAULT 'staff' CHECK(role IN ('staff','manager')),
        created_at TEXT NOT NULL
    );
"#;

const CREATE_ATTENDANCE: &str = r#"
    CREATE TABLE IF NOT EXISTS attendance_records (
        id               INTEGER PRIMARY KEY AUTOINCREMENT,
        staff_id         TEXT NOT NULL REFERENCES staff(id),
        date             TEXT NOT NULL,
        status           TEXT NOT NULL DEFAULT 'pending'
                         CHECK(status IN ('pending','partial','active','complete','reset')),
        wake_up_time     TEXT,
        departure_time   TEXT,
        arrival_time     TEXT,
        wake_up_notes    TEXT,
        departure_notes  TEXT,
        arrival_notes    TEXT,
        route_photo      TEXT,
        appearance_photo TEXT,
        arrival_location TEXT,
        arrival_gps      TEXT,
        version          INTEGER NOT NULL DEFAULT 1,
        created_at       TEXT NOT NULL,
        updated_at       TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_attendance_staff_date ON attendance_records(staff_id, date);

    -- at most one current record per staff/date
    CREATE UNIQUE INDEX IF NOT EXISTS idx_attendance_current
        ON attendance_records(staff_id, date)
        WHERE status IN ('pending','partial','active');
"#;

const CREATE_PREVIOUS_DAY: &str = r#"
    CREATE TABLE IF NOT EXISTS previous_day_reports (
        id                          INTEGER PRIMARY KEY AUTOINCREMENT,
        staff_id                    TEXT NOT NULL REFERENCES staff(id),
        report_date                 TEXT NOT NULL,
        planned_wake_up             TEXT,
        planned_departure           TEXT,
        planned_arrival             TEXT,
        route_photo                 TEXT,
        appearance_photo            TEXT,
        notes                       TEXT,
        actual_attendance_record_id INTEGER REFERENCES attendance_records(id),
        created_at                  TEXT NOT NULL
    );

    -- at most one unused report per staff member
    CREATE UNIQUE INDEX IF NOT EXISTS idx_previous_day_unused
        ON previous_day_reports(staff_id)
        WHERE actual_attendance_record_id IS NULL;

    CREATE UNIQUE INDEX IF NOT EXISTS idx_previous_day_link
        ON previous_day_reports(actual_attendance_record_id)
        WHERE actual_attendance_record_id IS NOT NULL;
"#;

const CREATE_DAILY_REPORTS: &str = r#"
    CREATE TABLE IF NOT EXISTS daily_reports (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        staff_id   TEXT NOT NULL REFERENCES staff(id),
        date       TEXT NOT NULL,
        content    TEXT NOT NULL,
        status     TEXT NOT NULL DEFAULT 'draft' CHECK(status IN ('draft','submitted','archived')),
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );

    CREATE UNIQUE INDEX IF NOT EXISTS idx_daily_reports_live
        ON daily_reports(staff_id, date)
        WHERE status <> 'archived';
"#;

const CREATE_SHIFTS: &str = r#"
    CREATE TABLE IF NOT EXISTS shift_schedules (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        staff_id   TEXT NOT NULL REFERENCES staff(id),
        date       TEXT NOT NULL,
        start_time TEXT NOT NULL,
        end_time   TEXT NOT NULL,
        worksite   TEXT,
        status     TEXT NOT NULL DEFAULT 'pending' CHECK(status IN ('pending','approved')),
        created_at TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_shifts_date_staff ON shift_schedules(date, staff_id);
"#;

const CREATE_ALERTS: &str = r#"
    CREATE TABLE IF NOT EXISTS alerts (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        staff_id   TEXT NOT NULL REFERENCES staff(id),
        date       TEXT NOT NULL,
        kind       TEXT NOT NULL,
        message    TEXT NOT NULL,
        created_at TEXT NOT NULL
    );
"#;

/// Ordered schema migrations: (version tag, description, SQL batch).
const MIGRATIONS: &[(&str, &str, &str)] = &[
    ("20250901_0001_staff", "Created staff table", CREATE_STAFF),
    (
        "20250901_0002_attendance_records",
        "Created attendance_records table",
        CREATE_ATTENDANCE,
    ),
    (
        "20250901_0003_previous_day_reports",
        "Created previous_day_reports table",
        CREATE_PREVIOUS_DAY,
    ),
    (
        "20250901_0004_daily_reports",
        "Created daily_reports table",
        CREATE_DAILY_REPORTS,
    ),
    (
        "20250915_0005_shift_schedules",
        "Created shift_schedules table",
        CREATE_SHIFTS,
    ),
    ("20251001_0006_alerts", "Created alerts table", CREATE_ALERTS),
];

fn is_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Versions of the migrations already recorded in the `log` table.
pub fn applied_versions(conn: &Connection) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> AppResult<usize> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    for (version, description, sql) in MIGRATIONS {
        if is_applied(conn, version)? {
            continue;
        }

        conn.execute_batch(sql)
            .map_err(|e| AppError::Migration(format!("{version}: {e}")))?;

        conn.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (?1, 'migration_applied', ?2, ?3)",
            params![Local::now().to_rfc3339(), version, description],
        )?;

        success(format!("Migration applied: {version} → {description}"));
        applied += 1;
    }

    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_recorded_once() {
        let conn = Connection::open_in_memory().unwrap();

        assert_eq!(run_pending_migrations(&conn).unwrap(), MIGRATIONS.len());
        assert_eq!(run_pending_migrations(&conn).unwrap(), 0);

        let versions = applied_versions(&conn).unwrap();
        assert_eq!(versions.len(), MIGRATIONS.len());
        assert_eq!(versions[0], "20250901_0001_staff");
    }
}
