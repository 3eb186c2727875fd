//! Classification of recorded flow-run values.
//!
//! The remote API hands back run values as untyped strings. Each value is
//! stored locally with derived typed columns: a decimal and a datetime are
//! parsed unconditionally, and composite `type:path` media values are split
//! so only the path is kept as the stored string while the full original is
//! recorded as the media value.

use crate::types::Timestamp;

/// Maximum length of a stored value string, in characters.
pub const MAX_VALUE_LEN: usize = 640;

/// Media type prefixes recognised in composite `type:path` values.
pub const MEDIA_TYPES: &[&str] = &["audio", "geo", "image", "video"];

/// A raw run value decomposed into its typed parts.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedValue {
    /// The value string to store. For media values this is the path part.
    pub string_value: String,
    /// Set when the raw value parses as a finite number.
    pub decimal_value: Option<f64>,
    /// Set when the raw value parses as a datetime.
    pub datetime_value: Option<Timestamp>,
    /// The full original `type:path` value, set only for media values.
    pub media_value: Option<String>,
}

/// Parse a decimal from a raw value. Rejects non-finite results so `inf`
/// and `NaN` spellings never reach the database.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a datetime from a raw value.
///
/// Accepts RFC 3339 (`2017-01-30T14:05:33.123Z`, offset variants) and the
/// remote API's fractional-seconds UTC format without an offset.
pub fn parse_remote_datetime(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&chrono::Utc));
    }

    chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Decompose a raw run value into its stored parts.
pub fn classify_value(raw: &str) -> ClassifiedValue {
    let mut value: String = raw.chars().take(MAX_VALUE_LEN).collect();

    let decimal_value = parse_decimal(&value);
    let datetime_value = parse_remote_datetime(&value);

    // A value like "image:https://x/y.jpg" is a media value: keep only the
    // path as the stored string and record the full original separately.
    let mut media_value = None;
    if let Some((media_type, media_path)) = value.split_once(':') {
        if MEDIA_TYPES.contains(&media_type) {
            media_value = Some(value.clone());
            value = media_path.to_string();
        }
    }

    ClassifiedValue {
        string_value: value,
        decimal_value,
        datetime_value,
        media_value,
    }
}
