use crate::error::{CoreError, CoreResult};
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Date, PrimitiveDateTime};

const DATETIME_SECONDS: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second][optional [.[subsecond]]]");
const DATETIME_MINUTES: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");
const DATE_ONLY: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Display form used for every table datetime and for action-log timestamps.
pub const DISPLAY_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Parse a naive table datetime. Accepts a space or `T` separator, optional
/// seconds and fractional seconds, or a bare date (midnight).
pub fn parse_table_datetime(raw: &str) -> CoreResult<PrimitiveDateTime> {
    let trimmed = raw.trim();
    let normalized = match trimmed.as_bytes().get(10) {
        Some(b'T') => format!("{} {}", &trimmed[..10], &trimmed[11..]),
        _ => trimmed.to_string(),
    };

    if let Ok(dt) = PrimitiveDateTime::parse(&normalized, DATETIME_SECONDS) {
        return Ok(dt);
    }
    if let Ok(dt) = PrimitiveDateTime::parse(&normalized, DATETIME_MINUTES) {
        return Ok(dt);
    }
    if let Ok(date) = Date::parse(&normalized, DATE_ONLY) {
        return Ok(date.midnight());
    }
    Err(CoreError::InvalidInput(format!(
        "unrecognized datetime '{}'",
        trimmed
    )))
}

pub fn format_table_datetime(dt: &PrimitiveDateTime) -> String {
    dt.format(DISPLAY_FORMAT)
        .unwrap_or_else(|_| dt.to_string())
}

/// Signed hours from `start` to `end`.
pub fn hours_between(start: PrimitiveDateTime, end: PrimitiveDateTime) -> f64 {
    (end - start).as_seconds_f64() / 3600.0
}

/// Serde adapter for required datetime columns.
pub mod table_datetime {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::PrimitiveDateTime;

    pub fn serialize<S: Serializer>(dt: &PrimitiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_table_datetime(dt))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<PrimitiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_table_datetime(&raw).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for optional datetime columns. Blank and unparseable cells
/// both become `None`.
pub mod lenient_table_datetime {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::PrimitiveDateTime;

    pub fn serialize<S: Serializer>(
        dt: &Option<PrimitiveDateTime>,
        s: S,
    ) -> Result<S::Ok, S::Error> {
        match dt {
            Some(dt) => s.serialize_str(&super::format_table_datetime(dt)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<PrimitiveDateTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }
        match super::parse_table_datetime(&raw) {
            Ok(dt) => Ok(Some(dt)),
            Err(e) => {
                log::warn!("treating unparseable datetime as absent: {}", e);
                Ok(None)
            }
        }
    }
}
