//! Validation of `lat,lon` GPS strings submitted on arrival.

use crate::errors::{AppError, AppResult};
use regex::Regex;
use std::sync::OnceLock;

fn gps_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*([+-]?\d{1,3}(?:\.\d+)?)\s*,\s*([+-]?\d{1,3}(?:\.\d+)?)\s*$")
            .expect("static GPS regex")
    })
}

/// Parse and range-check a `lat,lon` pair in decimal degrees.
pub fn parse_gps(s: &str) -> AppResult<(f64, f64)> {
    let bad = || AppError::InvalidFormat(format!("GPS position '{s}' (expected LAT,LON)"));

    let caps = gps_re().captures(s).ok_or_else(bad)?;
    let lat: f64 = caps[1].parse().map_err(|_| bad())?;
    let lon: f64 = caps[2].parse().map_err(|_| bad())?;

    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(bad());
    }
    Ok((lat, lon))
}

/// Canonical stored form: six decimals, no spaces.
pub fn normalize_gps(s: &str) -> AppResult<String> {
    let (lat, lon) = parse_gps(s)?;
    Ok(format!("{lat:.6},{lon:.6}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_decimal_pairs() {
        assert_eq!(normalize_gps(" 45.4642, 9.19 ").unwrap(), "45.464200,9.190000");
        assert_eq!(parse_gps("-33.9,-70.6").unwrap(), (-33.9, -70.6));
    }

    #[test]
    fn rejects_out_of_range_and_malformed() {
        assert!(parse_gps("91.0,10.0").is_err());
        assert!(parse_gps("45.0;9.0").is_err());
        assert!(parse_gps("north").is_err());
    }
}
