//! Conversions between chrono values and the TEXT columns used by the schema
//! (`YYYY-MM-DD` dates, `HH:MM` times).

use crate::errors::AppError;
use chrono::{NaiveDate, NaiveTime};
use rusqlite::types::Type;

pub fn date_to_db(d: &NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

pub fn time_to_db(t: &NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

pub fn opt_time_to_db(t: Option<NaiveTime>) -> Option<String> {
    t.as_ref().map(time_to_db)
}

pub fn date_from_db(idx: usize, s: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            Box::new(AppError::InvalidDate(s.to_string())),
        )
    })
}

pub fn time_from_db(idx: usize, s: &str) -> rusqlite::Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            Box::new(AppError::InvalidTime(s.to_string())),
        )
    })
}

pub fn opt_time_from_db(idx: usize, s: Option<String>) -> rusqlite::Result<Option<NaiveTime>> {
    match s {
        Some(v) if !v.trim().is_empty() => Ok(Some(time_from_db(idx, &v)?)),
        _ => Ok(None),
    }
}

/// Map an unknown enum string to a conversion failure.
pub fn bad_enum(idx: usize, what: &str, value: &str) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        idx,
        Type::Text,
        Box::new(AppError::InvalidFormat(format!("invalid {what}: {value}"))),
    )
}
