use crate::data_types::TimeUnit;
use chrono::{DateTime, Utc};

/// Tick label granularity for time axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmartDateFormat {
    Year,
    MonthYear,
    DayMonth,
    HourMin,
    HourMinSec,
    SecMillis,
}

impl SmartDateFormat {
    pub fn pattern(&self) -> &'static str {
        match self {
            Self::Year => "%Y",
            Self::MonthYear => "%b %Y",
            Self::DayMonth => "%d %b",
            Self::HourMin => "%H:%M",
            Self::HourMinSec => "%H:%M:%S",
            Self::SecMillis => "%S.%3f",
        }
    }
}

/// Chooses a label granularity from the visible span, in seconds.
pub fn determine_date_format(visible_span_sec: f64) -> SmartDateFormat {
    const MINUTE: f64 = 60.0;
    const HOUR: f64 = 60.0 * MINUTE;
    const DAY: f64 = 24.0 * HOUR;
    const MONTH: f64 = 30.0 * DAY;
    const YEAR: f64 = 365.0 * DAY;

    match visible_span_sec {
        s if s > 2.0 * YEAR => SmartDateFormat::Year,
        s if s > 2.0 * MONTH => SmartDateFormat::MonthYear,
        s if s > 1.5 * DAY => SmartDateFormat::DayMonth,
        s if s > 5.0 * MINUTE => SmartDateFormat::HourMin,
        s if s > 5.0 => SmartDateFormat::HourMinSec,
        _ => SmartDateFormat::SecMillis,
    }
}

/// Formats a timestamp expressed in `unit` since the Unix epoch (UTC).
/// Out-of-range timestamps fall back to the plain number.
pub fn format_timestamp(value: f64, format: SmartDateFormat, unit: TimeUnit) -> String {
    let seconds = unit.to_seconds(value);
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1_000_000_000.0).round().min(999_999_999.0) as u32;
    match DateTime::<Utc>::from_timestamp(whole as i64, nanos) {
        Some(dt) => dt.format(format.pattern()).to_string(),
        None => format!("{:.2}", value),
    }
}
