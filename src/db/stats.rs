use crate::db::migrate::applied_versions;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use chrono::NaiveDate;
use rusqlite::OptionalExtension;
use std::fs;

/// Row counts shown by `db --info`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DbCounts {
    pub staff: i64,
    pub attendance_records: i64,
    pub previous_day_reports: i64,
    pub daily_reports: i64,
    pub shifts: i64,
    pub alerts: i64,
}

pub fn count_rows(pool: &DbPool) -> AppResult<DbCounts> {
    let count = |table: &str| -> rusqlite::Result<i64> {
        pool.conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
    };

    Ok(DbCounts {
        staff: count("staff")?,
        attendance_records: count("attendance_records")?,
        previous_day_reports: count("previous_day_reports")?,
        daily_reports: count("daily_reports")?,
        shifts: count("shift_schedules")?,
        alerts: count("alerts")?,
    })
}

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ROW COUNTS
    //
    let counts = count_rows(pool)?;
    for (label, n) in [
        ("Staff members", counts.staff),
        ("Attendance records", counts.attendance_records),
        ("Previous-day reports", counts.previous_day_reports),
        ("Daily reports", counts.daily_reports),
        ("Shift schedules", counts.shifts),
        ("Alerts", counts.alerts),
    ] {
        println!("{}• {}:{} {}{}{}", CYAN, label, RESET, GREEN, n, RESET);
    }

    //
    // 3) DATE RANGE
    //
    let first_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT date FROM attendance_records ORDER BY date ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT date FROM attendance_records ORDER BY date DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let fmt_first = first_date
        .clone()
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last_date
        .clone()
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!(
        "{}• Migrations applied:{} {}",
        CYAN,
        RESET,
        applied_versions(&pool.conn)?.len()
    );

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    //
    // 4) AVERAGE RECORDS/DAY
    //
    if let (Some(f), Some(l)) = (first_date, last_date)
        && let (Ok(d1), Ok(d2)) = (
            NaiveDate::parse_from_str(&f, "%Y-%m-%d"),
            NaiveDate::parse_from_str(&l, "%Y-%m-%d"),
        )
    {
        let days = (d2 - d1).num_days().max(1);
        let avg = counts.attendance_records as f64 / days as f64;
        println!("{}• Average records/day:{} {:.2}", CYAN, RESET, avg);
    }

    println!();
    Ok(())
}
