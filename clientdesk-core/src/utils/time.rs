use chrono::{DateTime, SecondsFormat, Utc};

/// Current time as epoch milliseconds, the unit every record timestamp uses.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Current time as epoch seconds (JWT claims use seconds).
pub fn current_epoch() -> i64 {
    Utc::now().timestamp()
}

/// RFC 3339 timestamp for response envelopes, e.g. `2025-01-31T09:00:00.000Z`.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn iso_now() -> String {
    iso_timestamp(Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn iso_timestamp_matches_js_format() {
        let at = Utc.with_ymd_and_hms(2025, 1, 31, 9, 0, 0).unwrap();
        assert_eq!(iso_timestamp(at), "2025-01-31T09:00:00.000Z");
    }
}
