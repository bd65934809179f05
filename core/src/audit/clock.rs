use crate::store::timestamps::DISPLAY_FORMAT;
use std::fmt::Display;
use std::sync::Once;
use time::OffsetDateTime;

static UTC_FALLBACK: Once = Once::new();

/// Source of action timestamps.
pub trait Clock {
    /// Current local time as `YYYY-MM-DD HH:MM:SS`.
    fn now_local(&self) -> String;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now_local(&self) -> String {
        format_stamp(local_or_utc(OffsetDateTime::now_local()))
    }
}

/// Local time, or UTC when the local offset cannot be determined soundly.
/// The fallback is reported once per process since the stamps carry no offset.
fn local_or_utc<E: Display>(local: Result<OffsetDateTime, E>) -> OffsetDateTime {
    local.unwrap_or_else(|e| {
        UTC_FALLBACK.call_once(|| {
            log::warn!("local UTC offset unavailable ({}); action timestamps are in UTC", e);
        });
        OffsetDateTime::now_utc()
    })
}

fn format_stamp(now: OffsetDateTime) -> String {
    now.format(DISPLAY_FORMAT)
        .unwrap_or_else(|_| now.unix_timestamp().to_string())
}

/// Clock pinned to one timestamp.
#[derive(Debug, Clone)]
pub struct FixedClock(pub String);

impl Clock for FixedClock {
    fn now_local(&self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_has_second_resolution() {
        let ts = SystemClock.now_local();
        assert_eq!(ts.len(), "2025-01-01 00:00:00".len());
        assert_eq!(&ts[4..5], "-");
        assert_eq!(&ts[10..11], " ");
    }

    #[test]
    fn indeterminate_offset_falls_back_to_utc_and_is_reported() {
        let before = OffsetDateTime::now_utc();
        let now = local_or_utc::<&str>(Err("indeterminate"));
        assert!(UTC_FALLBACK.is_completed());
        assert!(now.offset().is_utc());
        assert!(now >= before);
        assert_eq!(format_stamp(now).len(), "2025-01-01 00:00:00".len());
    }
}
