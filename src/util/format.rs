use time::OffsetDateTime;
use time::macros::format_description;

/// Format a point in time as `YYYY-MM-DD HH:MM:SS` (UTC)
pub fn format_datetime(datetime: OffsetDateTime) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    datetime
        .to_offset(time::UtcOffset::UTC)
        .format(&format)
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Current wall-clock time, formatted for stage progress messages
pub fn current_timestamp() -> String {
    format_datetime(OffsetDateTime::now_utc())
}
