mod time_utils;

pub use time_utils::epoch_ms_to_utc;
