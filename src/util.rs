// Utility helpers for number coercion, weekday labels and formatting.
//
// Extractors hand raw capture text to these helpers so the rest of the code
// only deals with typed values.
use chrono::{Utc, Weekday};
use num_format::{Locale, ToFormattedString};
use std::str::FromStr;

/// Weekdays in the order reports list them (Monday first).
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Parse an integer capture such as `1,234` into any integer type.
///
/// - Accepts `Option<&str>` so callers can pass `captures.get(n)` through.
/// - Trims whitespace and strips thousands separators before parsing.
/// - Returns `None` for anything that cannot be parsed (including overflow).
pub fn parse_int_safe<T: FromStr>(s: Option<&str>) -> Option<T> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    s.replace(',', "").parse::<T>().ok()
}

/// Parse a decimal capture such as `6.18` or `2`. `inf` and `NaN` are rejected.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    parse_int_safe::<f64>(s).filter(|v| v.is_finite())
}

/// `round(part / total * 100)`, or 0 for an empty total.
pub fn share_percent(part: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (f64::from(part) / f64::from(total) * 100.0).round() as u32
}

/// Chinese label used by the reports, e.g. `星期一`.
pub fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "星期一",
        Weekday::Tue => "星期二",
        Weekday::Wed => "星期三",
        Weekday::Thu => "星期四",
        Weekday::Fri => "星期五",
        Weekday::Sat => "星期六",
        Weekday::Sun => "星期日",
    }
}

/// Current UTC time as `YYYY-MM-DD HH:MM:SS`; used when a report carries no
/// generation time.
pub fn now_timestamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Exports written on Windows carry `\r\n`; line patterns expect `\n`.
pub fn normalize_newlines(content: &str) -> String {
    content.replace("\r\n", "\n")
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Thin wrapper around `num-format` for counts in log lines
    // (e.g. `1,234 events`).
    n.to_formatted_string(&Locale::en)
}
