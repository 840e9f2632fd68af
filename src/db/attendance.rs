//! Persistence of `attendance_records`.
//!
//! Writes against an existing record are guarded by its `version`
//! column: an update whose expected version no longer matches fails
//! with `AppError::StaleRecord` instead of overwriting a concurrent write.

use crate::db::convert::{
    bad_enum, date_from_db, date_to_db, opt_time_from_db, opt_time_to_db,
};
use crate::errors::{AppError, AppResult};
use crate::models::attendance::{AttendanceRecord, AttendanceStatus, StagePayload};
use crate::models::stage::Stage;
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, ErrorCode, OptionalExtension, Row, params};

const SELECT_COLUMNS: &str = "SELECT id, staff_id, date, status,
        wake_up_time, departure_time, arrival_time,
        wake_up_notes, departure_notes, arrival_notes,
        route_photo, appearance_photo, arrival_location, arrival_gps,
        version, created_at, updated_at
     FROM attendance_records";

pub fn map_row(row: &Row) -> rusqlite::Result<AttendanceRecord> {
    let date_str: String = row.get("date")?;
    let status_str: String = row.get("status")?;
    let status = AttendanceStatus::from_db_str(&status_str)
        .ok_or_else(|| bad_enum(3, "attendance status", &status_str))?;

    Ok(AttendanceRecord {
        id: row.get("id")?,
        staff_id: row.get("staff_id")?,
        date: date_from_db(2, &date_str)?,
        status,
        wake_up_time: opt_time_from_db(4, row.get("wake_up_time")?)?,
        departure_time: opt_time_from_db(5, row.get("departure_time")?)?,
        arrival_time: opt_time_from_db(6, row.get("arrival_time")?)?,
        wake_up_notes: row.get("wake_up_notes")?,
        departure_notes: row.get("departure_notes")?,
        arrival_notes: row.get("arrival_notes")?,
        route_photo: row.get("route_photo")?,
        appearance_photo: row.get("appearance_photo")?,
        arrival_location: row.get("arrival_location")?,
        arrival_gps: row.get("arrival_gps")?,
        version: row.get("version")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn is_constraint(e: &rusqlite::Error) -> bool {
    matches!(e, rusqlite::Error::SqliteFailure(err, _) if err.code == ErrorCode::ConstraintViolation)
}

pub fn get_attendance_record(conn: &Connection, id: i64) -> AppResult<Option<AttendanceRecord>> {
    let sql = format!("{SELECT_COLUMNS} WHERE id = ?1");
    Ok(conn.query_row(&sql, [id], map_row).optional()?)
}

/// The open (pending/partial/active) record of a staff member for `date`.
pub fn get_current_attendance_record(
    conn: &Connection,
    staff_id: &str,
    date: &NaiveDate,
) -> AppResult<Option<AttendanceRecord>> {
    let sql = format!(
        "{SELECT_COLUMNS}
         WHERE staff_id = ?1 AND date = ?2
           AND status IN ('pending','partial','active')
         ORDER BY id DESC
         LIMIT 1"
    );
    Ok(conn
        .query_row(&sql, params![staff_id, date_to_db(date)], map_row)
        .optional()?)
}

/// The most recently created record of a staff member for `date`, whatever its status.
pub fn get_latest_attendance_record(
    conn: &Connection,
    staff_id: &str,
    date: &NaiveDate,
) -> AppResult<Option<AttendanceRecord>> {
    let sql = format!(
        "{SELECT_COLUMNS}
         WHERE staff_id = ?1 AND date = ?2
         ORDER BY id DESC
         LIMIT 1"
    );
    Ok(conn
        .query_row(&sql, params![staff_id, date_to_db(date)], map_row)
        .optional()?)
}

/// Insert a new record in the given status.
pub fn insert_attendance_record(
    conn: &Connection,
    staff_id: &str,
    date: &NaiveDate,
    status: AttendanceStatus,
) -> AppResult<AttendanceRecord> {
    let now = Local::now().to_rfc3339();
    conn.execute(
        "INSERT INTO attendance_records (staff_id, date, status, version, created_at, updated_at)
         VALUES (?1, ?2, ?3, 1, ?4, ?4)",
        params![staff_id, date_to_db(date), status.to_db_str(), now],
    )
    .map_err(|e| {
        if is_constraint(&e) {
            AppError::StaleRecord(format!(
                "an open attendance record already exists for {staff_id} on {date}"
            ))
        } else {
            AppError::write_failed(e)
        }
    })?;

    let id = conn.last_insert_rowid();
    get_attendance_record(conn, id)?
        .ok_or_else(|| AppError::Other(format!("attendance record #{id} vanished after insert")))
}

/// Write one attendance stage on the current record of `(staff_id, date)`,
/// creating the record when none is open.
///
/// `expected_version` is the version the caller observed (`None` when it
/// observed no open record); any mismatch is a stale write.
pub fn upsert_attendance_stage(
    conn: &Connection,
    staff_id: &str,
    date: &NaiveDate,
    stage: Stage,
    payload: &StagePayload,
    expected_version: Option<i64>,
) -> AppResult<AttendanceRecord> {
    if !stage.is_attendance_stage() {
        return Err(AppError::Other(format!(
            "stage '{stage}' is not stored on attendance records"
        )));
    }

    let record = match (
        get_current_attendance_record(conn, staff_id, date)?,
        expected_version,
    ) {
        (Some(r), Some(v)) if r.version == v => r,
        (Some(r), _) => return Err(stale(&r)),
        (None, Some(_)) => return Err(closed_concurrently(staff_id, date)),
        (None, None) => insert_attendance_record(conn, staff_id, date, AttendanceStatus::Pending)?,
    };

    let sql = match stage {
        Stage::WakeUp => {
            "UPDATE attendance_records
             SET wake_up_time = ?1, wake_up_notes = ?2, status = ?3,
                 version = version + 1, updated_at = ?4
             WHERE id = ?5 AND version = ?6"
        }
        Stage::Departure => {
            "UPDATE attendance_records
             SET departure_time = ?1, departure_notes = ?2, status = ?3,
                 version = version + 1, updated_at = ?4,
                 route_photo = COALESCE(?7, route_photo)
             WHERE id = ?5 AND version = ?6"
        }
        _ => {
            "UPDATE attendance_records
             SET arrival_time = ?1, arrival_notes = ?2, status = ?3,
                 version = version + 1, updated_at = ?4,
                 appearance_photo = COALESCE(?7, appearance_photo),
                 arrival_location = ?8, arrival_gps = ?9
             WHERE id = ?5 AND version = ?6"
        }
    };

    let time = opt_time_to_db(payload.time);
    let status = AttendanceStatus::after_stage(stage).to_db_str();
    let now = Local::now().to_rfc3339();

    let changed = match stage {
        Stage::WakeUp => conn.execute(
            sql,
            params![time, payload.notes, status, now, record.id, record.version],
        ),
        Stage::Departure => conn.execute(
            sql,
            params![
                time,
                payload.notes,
                status,
                now,
                record.id,
                record.version,
                payload.photo
            ],
        ),
        _ => conn.execute(
            sql,
            params![
                time,
                payload.notes,
                status,
                now,
                record.id,
                record.version,
                payload.photo,
                payload.location,
                payload.gps
            ],
        ),
    }
    .map_err(AppError::write_failed)?;

    if changed == 0 {
        return Err(stale(&record));
    }

    get_attendance_record(conn, record.id)?
        .ok_or_else(|| AppError::Other(format!("attendance record #{} vanished", record.id)))
}

fn closed_concurrently(staff_id: &str, date: &NaiveDate) -> AppError {
    AppError::StaleRecord(format!(
        "attendance record for {staff_id} on {date} was closed concurrently"
    ))
}

fn stale(record: &AttendanceRecord) -> AppError {
    AppError::StaleRecord(format!(
        "attendance record #{} for {} on {} changed since it was read",
        record.id, record.staff_id, record.date
    ))
}

/// Persist day completion on the current record, creating one if the
/// staff member ends the day without having submitted anything.
pub fn mark_day_complete(
    conn: &Connection,
    staff_id: &str,
    date: &NaiveDate,
    expected_version: Option<i64>,
) -> AppResult<AttendanceRecord> {
    let record = match (
        get_current_attendance_record(conn, staff_id, date)?,
        expected_version,
    ) {
        (Some(r), Some(v)) if r.version == v => r,
        (Some(r), _) => return Err(stale(&r)),
        (None, Some(_)) => return Err(closed_concurrently(staff_id, date)),
        (None, None) => {
            return insert_attendance_record(conn, staff_id, date, AttendanceStatus::Complete);
        }
    };

    let changed = conn
        .execute(
            "UPDATE attendance_records
             SET status = 'complete', version = version + 1, updated_at = ?1
             WHERE id = ?2 AND version = ?3",
            params![Local::now().to_rfc3339(), record.id, record.version],
        )
        .map_err(AppError::write_failed)?;

    if changed == 0 {
        return Err(stale(&record));
    }

    get_attendance_record(conn, record.id)?
        .ok_or_else(|| AppError::Other(format!("attendance record #{} vanished", record.id)))
}

/// Close any open record as `reset` and open a fresh `pending` one.
pub fn start_new_day(
    conn: &Connection,
    staff_id: &str,
    date: &NaiveDate,
) -> AppResult<AttendanceRecord> {
    conn.execute(
        "UPDATE attendance_records
         SET status = 'reset', version = version + 1, updated_at = ?1
         WHERE staff_id = ?2 AND date = ?3
           AND status IN ('pending','partial','active')",
        params![Local::now().to_rfc3339(), staff_id, date_to_db(date)],
    )
    .map_err(AppError::write_failed)?;

    insert_attendance_record(conn, staff_id, date, AttendanceStatus::Pending)
}

/// Records ordered by date, optionally filtered by staff and date bounds.
pub fn list_records(
    conn: &Connection,
    staff_id: Option<&str>,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<AttendanceRecord>> {
    let (start, end) = match bounds {
        Some((s, e)) => (Some(date_to_db(&s)), Some(date_to_db(&e))),
        None => (None, None),
    };

    let sql = format!(
        "{SELECT_COLUMNS}
         WHERE (?1 IS NULL OR staff_id = ?1)
           AND (?2 IS NULL OR date >= ?2)
           AND (?3 IS NULL OR date <= ?3)
         ORDER BY date ASC, staff_id ASC, id ASC"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![staff_id, start, end], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{day, memory_pool, t};

    #[test]
    fn first_stage_creates_the_current_record() {
        let pool = memory_pool();
        let rec = upsert_attendance_stage(
            &pool.conn,
            "alice",
            &day(14),
            Stage::WakeUp,
            &StagePayload::at(t("06:30")),
            None,
        )
        .unwrap();

        assert_eq!(rec.status, AttendanceStatus::Partial);
        assert_eq!(rec.wake_up_time, Some(t("06:30")));
        assert_eq!(rec.version, 2);

        let current = get_current_attendance_record(&pool.conn, "alice", &day(14))
            .unwrap()
            .unwrap();
        assert_eq!(current.id, rec.id);
    }

    #[test]
    fn stale_version_is_rejected() {
        let pool = memory_pool();
        let rec = upsert_attendance_stage(
            &pool.conn,
            "alice",
            &day(14),
            Stage::WakeUp,
            &StagePayload::at(t("06:30")),
            None,
        )
        .unwrap();

        let err = upsert_attendance_stage(
            &pool.conn,
            "alice",
            &day(14),
            Stage::Departure,
            &StagePayload::at(t("07:30")),
            Some(rec.version - 1),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::StaleRecord(_)));

        // a caller that saw no record must not silently write over one
        let err = upsert_attendance_stage(
            &pool.conn,
            "alice",
            &day(14),
            Stage::Departure,
            &StagePayload::at(t("07:30")),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::StaleRecord(_)));

        let ok = upsert_attendance_stage(
            &pool.conn,
            "alice",
            &day(14),
            Stage::Departure,
            &StagePayload::at(t("07:30")),
            Some(rec.version),
        )
        .unwrap();
        assert_eq!(ok.departure_time, Some(t("07:30")));
    }

    #[test]
    fn arrival_marks_record_active_and_keeps_location() {
        let pool = memory_pool();
        let payload = StagePayload {
            time: Some(t("08:55")),
            location: Some("Main site".into()),
            gps: Some("45.464200,9.190000".into()),
            ..Default::default()
        };
        let rec =
            upsert_attendance_stage(&pool.conn, "alice", &day(14), Stage::Arrival, &payload, None)
                .unwrap();

        assert_eq!(rec.status, AttendanceStatus::Active);
        assert_eq!(rec.arrival_location.as_deref(), Some("Main site"));
        assert_eq!(rec.arrival_gps.as_deref(), Some("45.464200,9.190000"));
    }

    #[test]
    fn new_day_resets_open_record_and_opens_another() {
        let pool = memory_pool();
        let first = upsert_attendance_stage(
            &pool.conn,
            "alice",
            &day(14),
            Stage::WakeUp,
            &StagePayload::at(t("06:30")),
            None,
        )
        .unwrap();

        let fresh = start_new_day(&pool.conn, "alice", &day(14)).unwrap();
        assert_ne!(fresh.id, first.id);
        assert_eq!(fresh.status, AttendanceStatus::Pending);

        let old = get_attendance_record(&pool.conn, first.id).unwrap().unwrap();
        assert_eq!(old.status, AttendanceStatus::Reset);
        assert_eq!(list_records(&pool.conn, Some("alice"), None).unwrap().len(), 2);
    }

    #[test]
    fn completing_without_record_persists_the_fact() {
        let pool = memory_pool();
        let rec = mark_day_complete(&pool.conn, "alice", &day(14), None).unwrap();

        assert_eq!(rec.status, AttendanceStatus::Complete);
        assert!(
            get_current_attendance_record(&pool.conn, "alice", &day(14))
                .unwrap()
                .is_none()
        );
    }
}
