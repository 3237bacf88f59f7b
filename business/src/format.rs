use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Shown for missing timestamps.
pub const NOT_AVAILABLE: &str = "Not available";

const DATE_TIME_FORMAT: &str = "%B %-d, %Y, %H:%M";
const DATE_FORMAT: &str = "%B %-d, %Y";

/// Human form of an ISO-8601 timestamp, e.g. `October 19, 2026, 14:30`.
///
/// Offsets are kept as sent (no conversion to local time). Input that is not
/// a recognised timestamp is returned unchanged.
pub fn format_date(value: Option<&str>) -> String {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return NOT_AVAILABLE.to_owned();
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(DATE_TIME_FORMAT).to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format(DATE_TIME_FORMAT).to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return dt.format(DATE_TIME_FORMAT).to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format(DATE_FORMAT).to_string();
    }

    raw.to_owned()
}
