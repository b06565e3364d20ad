//! Completion-rate arithmetic shared by every report.

/// Round to one decimal place (half away from zero).
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Hour totals are summed floats: keep two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// actual / target × 100, unrounded. `None` when nothing was planned:
/// a zero target never reaches the divisor.
pub fn raw_completion(target: i64, actual: i64) -> Option<f64> {
    if target <= 0 {
        return None;
    }
    Some(actual as f64 / target as f64 * 100.0)
}

/// Completion rounded to 1 decimal, as shown in every report.
pub fn completion_pct(target: i64, actual: i64) -> Option<f64> {
    raw_completion(target, actual).map(round1)
}

/// Completion of the Total line of a period report: 0 instead of `None`.
pub fn total_completion_pct(target: i64, actual: i64) -> f64 {
    completion_pct(target, actual).unwrap_or(0.0)
}

/// Mean of the defined values, `None` if there are none.
pub fn mean_defined<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (sum, n) = values
        .into_iter()
        .flatten()
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));

    if n == 0 { None } else { Some(sum / n as f64) }
}

/// Hours with at least one decimal and at most two: `2.0`, `0.5`, `1.25`.
pub fn format_hours(hours: f64) -> String {
    let s = format!("{:.2}", hours);
    let trimmed = s.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{trimmed}0")
    } else {
        trimmed.to_string()
    }
}

/// Percentage cell for tables: `80.0%` or the placeholder.
pub fn format_pct(value: Option<f64>, placeholder: &str) -> String {
    match value {
        Some(v) => format!("{:.1}%", v),
        None => placeholder.to_string(),
    }
}
