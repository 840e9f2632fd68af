use crate::errors::{AppError, AppResult};
use chrono::{Days, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

pub fn next_day(d: &NaiveDate) -> AppResult<NaiveDate> {
    d.checked_add_days(Days::new(1))
        .ok_or_else(|| AppError::InvalidDate(format!("no day after {d}")))
}

fn invalid(p: &str, why: &str) -> AppError {
    AppError::InvalidDate(format!("{p} ({why})"))
}

/// Parse a period filter into inclusive date bounds.
///
/// Supports:
/// - `all` (→ `None`, no filtering)
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - YYYY:YYYY
/// - YYYY-MM:YYYY-MM
/// - YYYY-MM-DD:YYYY-MM-DD
pub fn parse_period(p: &str) -> AppResult<Option<(NaiveDate, NaiveDate)>> {
    let p = p.trim();
    if p.eq_ignore_ascii_case("all") {
        return Ok(None);
    }

    if let Some((start_raw, end_raw)) = p.split_once(':') {
        let start = start_raw.trim();
        let end = end_raw.trim();

        if start.len() != end.len() {
            return Err(invalid(p, "start and end must have same format"));
        }

        let (d1, _) = period_bounds(start).ok_or_else(|| invalid(p, "invalid start"))?;
        let (_, d2) = period_bounds(end).ok_or_else(|| invalid(p, "invalid end"))?;

        if d2 < d1 {
            return Err(invalid(p, "end before start"));
        }
        return Ok(Some((d1, d2)));
    }

    period_bounds(p)
        .map(Some)
        .ok_or_else(|| invalid(p, "unsupported period format"))
}

fn period_bounds(p: &str) -> Option<(NaiveDate, NaiveDate)> {
    match p.len() {
        // YYYY
        4 => {
            let y: i32 = p.parse().ok()?;
            Some((
                NaiveDate::from_ymd_opt(y, 1, 1)?,
                NaiveDate::from_ymd_opt(y, 12, 31)?,
            ))
        }
        // YYYY-MM
        7 => {
            let first = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d").ok()?;
            let last = first
                .checked_add_months(chrono::Months::new(1))?
                .pred_opt()?;
            Some((first, last))
        }
        // YYYY-MM-DD
        10 => {
            let d = NaiveDate::parse_from_str(p, "%Y-%m-%d").ok()?;
            Some((d, d))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, dd: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, dd).unwrap()
    }

    #[test]
    fn month_period_covers_leap_february() {
        assert_eq!(
            parse_period("2024-02").unwrap(),
            Some((d(2024, 2, 1), d(2024, 2, 29)))
        );
    }

    #[test]
    fn ranges_use_outer_bounds() {
        assert_eq!(
            parse_period("2025-06:2025-08").unwrap(),
            Some((d(2025, 6, 1), d(2025, 8, 31)))
        );
        assert_eq!(
            parse_period("2024:2025").unwrap(),
            Some((d(2024, 1, 1), d(2025, 12, 31)))
        );
    }

    #[test]
    fn all_disables_filtering() {
        assert_eq!(parse_period("ALL").unwrap(), None);
    }

    #[test]
    fn malformed_periods_are_rejected() {
        assert!(parse_period("2025-6").is_err());
        assert!(parse_period("2025:2025-01").is_err());
        assert!(parse_period("2025-09-10:2025-09-01").is_err());
    }
}
