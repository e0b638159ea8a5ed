//! Centralized number formatting utilities.
//!
//! All metric display formatting goes through this module so the CLI and the
//! equivalence tooling render durations, rates and winrates identically.

/// Format a duration in seconds as `m:ss`.
///
/// Sub-second precision is dropped; negative inputs clamp to `0:00` (display
/// metrics use a zero sentinel for "no data", never negative time).
///
/// # Examples
/// ```
/// use scrimkit_types::formatting::format_duration;
/// assert_eq!(format_duration(0.0), "0:00");
/// assert_eq!(format_duration(15.0), "0:15");
/// assert_eq!(format_duration(75.4), "1:15");
/// assert_eq!(format_duration(615.0), "10:15");
/// ```
pub fn format_duration(secs: f64) -> String {
    let total = if secs.is_finite() && secs > 0.0 {
        secs as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

/// Format a winrate percentage with two decimals and a `%` suffix.
///
/// # Examples
/// ```
/// use scrimkit_types::formatting::format_percent;
/// assert_eq!(format_percent(50.0), "50.00%");
/// assert_eq!(format_percent(66.666_67), "66.67%");
/// ```
pub fn format_percent(pct: f64) -> String {
    format!("{:.2}%", pct)
}

/// Format a dimensionless rate or score with two decimals.
///
/// # Examples
/// ```
/// use scrimkit_types::formatting::format_rate;
/// assert_eq!(format_rate(1.25), "1.25");
/// assert_eq!(format_rate(0.0), "0.00");
/// ```
pub fn format_rate(value: f64) -> String {
    format!("{:.2}", value)
}
