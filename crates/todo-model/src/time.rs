use chrono::{DateTime, Utc};

/// Second precision, always UTC.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

#[must_use]
pub fn now_timestamp() -> String {
    format_timestamp(Utc::now())
}
