//! Time utilities: parsing HH:MM, duration computations, formatting.

use crate::errors::{AppError, AppResult};
use chrono::{NaiveTime, Timelike};

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

pub fn minutes_between(start: NaiveTime, end: NaiveTime) -> i64 {
    let duration = end - start;
    duration.num_minutes()
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    if let Some(s) = input {
        let t = parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
        Ok(Some(t))
    } else {
        Ok(None)
    }
}

/// `HH:MM`, or `--:--` when absent.
pub fn fmt_opt_time(t: Option<NaiveTime>) -> String {
    t.map(|v| v.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

/// Current local wall-clock time truncated to minutes.
pub fn now_hhmm() -> NaiveTime {
    let now = chrono::Local::now().time();
    NaiveTime::from_hms_opt(now.hour(), now.minute(), 0).unwrap_or(now)
}

pub fn mins2readable(mins: i64) -> String {
    let abs_m = mins.abs();
    let sign = if mins < 0 { "-" } else { "" };
    format!("{}{:02}h {:02}m", sign, abs_m / 60, abs_m % 60)
}
