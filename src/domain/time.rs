//! Display arithmetic for the time tracker.

use chrono::{DateTime, Utc};

/// Renders a second count as `HH:MM:SS`. Hours are not wrapped at 24.
pub fn format_hms(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// `"2h 5m"`, or `"5m"` under an hour.
pub fn format_duration(minutes: i64) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours > 0 {
        format!("{hours}h {mins}m")
    } else {
        format!("{mins}m")
    }
}

pub fn earnings(minutes: i64, hourly_rate: f64) -> f64 {
    (minutes as f64 / 60.0) * hourly_rate
}

/// Two-decimal dollar string, rounded for display only.
pub fn format_money(amount: f64) -> String {
    format!("${amount:.2}")
}

pub fn elapsed_seconds(start: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - start).num_seconds().max(0)
}

/// Whole minutes between start and end, truncated.
pub fn duration_minutes(start: DateTime<Utc>, end: DateTime<Utc>) -> i32 {
    let minutes = (end - start).num_minutes().max(0);
    i32::try_from(minutes).unwrap_or(i32::MAX)
}
