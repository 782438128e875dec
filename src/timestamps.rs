use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::constants::timestamps::{DATE_FORMAT, DATETIME_FORMATS};

/// Parse a dataset timestamp.
///
/// Accepts `YYYY-MM-DD HH:MM:SS`, the `T`-separated variant, optional
/// fractional seconds, or a bare `YYYY-MM-DD` (read as midnight). Surrounding
/// whitespace is ignored. Returns `None` when no layout matches.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    for format in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(value, format) {
            return Some(ts);
        }
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .map(start_of_day)
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// First instant of `date`.
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}
