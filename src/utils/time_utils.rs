use chrono::DateTime;

pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Format an epoch-ms timestamp for display. Used by the report surfaces
/// only; the engine itself never formats time.
pub fn epoch_ms_to_utc(epoch_ms: i64) -> String {
    match DateTime::from_timestamp_millis(epoch_ms) {
        Some(dt) => dt.format(STANDARD_TIME_FORMAT).to_string(),
        None => "invalid timestamp".to_string(),
    }
}
