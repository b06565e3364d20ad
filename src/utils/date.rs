use crate::errors::{AppError, AppResult};
use crate::models::filter::DateRange;
use chrono::{Datelike, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Parse a mandatory CLI date.
pub fn require_date(s: &str) -> AppResult<NaiveDate> {
    parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

fn month_last_day(y: i32, m: u32) -> Option<u32> {
    let first_next = if m == 12 {
        NaiveDate::from_ymd_opt(y + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(y, m + 1, 1)?
    };
    first_next.pred_opt().map(|d| d.day())
}

/// Digits everywhere except a `-` at each of the `dashes` positions.
fn has_shape(p: &str, dashes: &[usize]) -> bool {
    p.bytes().enumerate().all(|(i, b)| {
        if dashes.contains(&i) {
            b == b'-'
        } else {
            b.is_ascii_digit()
        }
    })
}

/// First and last day covered by `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let invalid = || AppError::InvalidDate(p.to_string());

    match p.len() {
        // YYYY
        4 if has_shape(p, &[]) => {
            let y: i32 = p.parse().map_err(|_| invalid())?;
            let d1 = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(invalid)?;
            let d2 = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(invalid)?;
            Ok((d1, d2))
        }
        // YYYY-MM
        7 if has_shape(p, &[4]) => {
            let d1 = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d")
                .map_err(|_| invalid())?;
            let last = month_last_day(d1.year(), d1.month()).ok_or_else(invalid)?;
            let d2 = d1.with_day(last).ok_or_else(invalid)?;
            Ok((d1, d2))
        }
        // YYYY-MM-DD
        10 if has_shape(p, &[4, 7]) => {
            let d = parse_date(p).ok_or_else(invalid)?;
            Ok((d, d))
        }
        _ => Err(invalid()),
    }
}

/// Parse --range (year / month / day / interval).
///
/// Supports:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - YYYY:YYYY
/// - YYYY-MM:YYYY-MM
/// - YYYY-MM-DD:YYYY-MM-DD
///
/// A reversed interval is rejected, it never reaches a query.
pub fn parse_range(r: &str) -> AppResult<DateRange> {
    if let Some((start_raw, end_raw)) = r.split_once(':') {
        let start = start_raw.trim();
        let end = end_raw.trim();

        if start.len() != end.len() {
            return Err(AppError::InvalidDate(format!(
                "{r} (start and end must have the same format)"
            )));
        }

        let (d1, _) = period_bounds(start)?;
        let (_, d2) = period_bounds(end)?;
        DateRange::new(d1, d2)
    } else {
        let (d1, d2) = period_bounds(r.trim())?;
        DateRange::new(d1, d2)
    }
}
