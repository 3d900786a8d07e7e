// SPDX-License-Identifier: GPL-3.0-only

//! Common numeric and formatting helpers shared across models

use num_format::{Locale, ToFormattedString};

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}

/// Sum of two raw counters, unset when either side is missing.
pub fn checked_total(first: Option<u64>, second: Option<u64>) -> Option<u64> {
    Some(first?.saturating_add(second?))
}

/// `part / total * 100`, rounded to 3 decimal places.
///
/// Returns `None` when either operand is missing or the total is zero; a
/// percentage that cannot be computed is unavailable, never `0%`.
pub fn percent_of(part: Option<u64>, total: Option<u64>) -> Option<f64> {
    let (part, total) = (part?, total?);
    if total == 0 {
        return None;
    }

    Some(round_to(part as f64 / total as f64 * 100.0, 3))
}

/// Convert bytes to human-readable format (e.g., "1.50 GB")
pub fn bytes_to_pretty(bytes: u64, add_bytes: bool) -> String {
    let mut steps = 0;
    let mut val: f64 = bytes as f64;

    while val > 1024. && steps <= 8 {
        val /= 1024.;
        steps += 1;
    }

    let unit = match steps {
        0 => "B",
        1 => "KB",
        2 => "MB",
        3 => "GB",
        4 => "TB",
        5 => "PB",
        6 => "EB",
        7 => "ZB",
        8 => "YB",
        _ => "Not Supported",
    };

    if add_bytes {
        let bytes_str = bytes.to_formatted_string(&Locale::en);
        format!("{:.2} {} ({} bytes)", val, unit, bytes_str)
    } else {
        format!("{:.2} {}", val, unit)
    }
}

/// Thousands-separated integer (e.g., "1,234,567").
pub fn format_count(count: u64) -> String {
    count.to_formatted_string(&Locale::en)
}

/// Render a duration in seconds as "N days, HH:MM:SS".
pub fn format_duration(total_secs: u64) -> String {
    let days = total_secs / 86_400;
    let hours = (total_secs % 86_400) / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    match days {
        0 => format!("{hours:02}:{minutes:02}:{seconds:02}"),
        1 => format!("1 day, {hours:02}:{minutes:02}:{seconds:02}"),
        _ => format!("{days} days, {hours:02}:{minutes:02}:{seconds:02}"),
    }
}

/// "1 volume" / "3 volumes".
pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}
