use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

const NOT_AVAILABLE: &str = "N/A";

/// Announcement time, e.g. "01 Mar 2024, 03:45 pm"
const DISPLAY_FORMAT: &str = "%d %b %Y, %I:%M %P";

/// Wall-clock layouts without an offset, read as display-zone time
const LOCAL_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%d-%b-%Y %H:%M:%S",
];

/// Format an announcement timestamp for display.
///
/// Never fails: missing or blank input yields "N/A", and text that cannot be
/// parsed is returned exactly as given.
pub fn format_timestamp(raw: Option<&str>, offset: &FixedOffset) -> String {
    let text = match raw {
        Some(text) if !text.trim().is_empty() => text,
        _ => return NOT_AVAILABLE.to_string(),
    };

    match parse_timestamp(text.trim(), offset) {
        Some(at) => at.with_timezone(offset).format(DISPLAY_FORMAT).to_string(),
        None => text.to_string(),
    }
}

/// "HH:MM" of the last successful load in the display zone.
pub fn format_last_update(at: &DateTime<Utc>, offset: &FixedOffset) -> String {
    at.with_timezone(offset).format("%H:%M").to_string()
}

fn parse_timestamp(text: &str, offset: &FixedOffset) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Some(at.with_timezone(&Utc));
    }
    if let Ok(at) = DateTime::parse_from_rfc2822(text) {
        return Some(at.with_timezone(&Utc));
    }

    for layout in LOCAL_LAYOUTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, layout) {
            return offset
                .from_local_datetime(&naive)
                .single()
                .map(|at| at.with_timezone(&Utc));
        }
    }

    // Bare dates are midnight UTC
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}
