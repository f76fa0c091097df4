use time::OffsetDateTime;
use time::format_description::well_known::{Iso8601, Rfc3339};

/// Interprets `secs` as (possibly fractional) seconds since the Unix epoch.
///
/// Returns `None` for non-finite input or instants outside the representable range.
pub fn date_from_epoch_seconds(secs: f64) -> Option<OffsetDateTime> {
    from_scaled(secs, 1_000_000_000.0)
}

/// Interprets `millis` as milliseconds since the Unix epoch.
pub fn date_from_epoch_millis(millis: f64) -> Option<OffsetDateTime> {
    from_scaled(millis, 1_000_000.0)
}

/// Parses an ISO 8601 timestamp. RFC 3339 is tried first, then the general
/// ISO 8601 profile (which also accepts basic-format and week dates).
pub fn date_from_iso8601(s: &str) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(s, &Rfc3339)
        .or_else(|_| OffsetDateTime::parse(s, &Iso8601::DEFAULT))
        .ok()
}

fn from_scaled(n: f64, nanos_per_unit: f64) -> Option<OffsetDateTime> {
    if !n.is_finite() {
        return None;
    }
    let nanos = (n * nanos_per_unit).round() as i128;
    OffsetDateTime::from_unix_timestamp_nanos(nanos).ok()
}
