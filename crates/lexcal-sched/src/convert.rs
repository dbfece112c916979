//! Wall-clock to UTC conversion for bookings.
//!
//! A booking arrives as a zone-naive calendar timestamp (`YYYY-MM-DDTHH:mm`)
//! plus an IANA zone name and a duration. Conversion resolves the local
//! start against the zone's transition rules and derives a UTC instant
//! range; the offset in effect at the local start instant is returned so it
//! can be persisted with the appointment.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use std::str::FromStr;

/// Error during wall-clock conversion.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// Unknown or invalid timezone identifier.
    #[error("unknown time zone: {0}")]
    UnknownTimeZone(String),

    /// Wall-clock string does not parse as `YYYY-MM-DDTHH:mm`.
    #[error("unparseable local time: {0}")]
    InvalidWallClock(String),

    /// Non-existent time during a DST gap.
    #[error("local time does not exist (DST gap): {0} in {1}")]
    NonExistentTime(NaiveDateTime, String),

    /// Ambiguous time during a DST fold.
    #[error("local time is ambiguous (DST fold): {0} in {1}")]
    AmbiguousTime(NaiveDateTime, String),

    /// Duration must move the end strictly past the start.
    #[error("duration must be positive, got {0} minutes")]
    NonPositiveDuration(i64),
}

/// A resolved booking window.
///
/// `end_utc` is a pure duration add on `start_utc`: a window that straddles
/// a DST transition keeps a fixed UTC length rather than a fixed wall-clock
/// length. The local mirrors are what a clock on the wall in the booking
/// zone would show at each endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleWindow {
    pub start_utc: DateTime<Utc>,
    pub end_utc: DateTime<Utc>,
    /// UTC offset in minutes in effect at the local start instant.
    pub offset_minutes: i32,
    pub start_local: NaiveDateTime,
    pub end_local: NaiveDateTime,
}

/// Accepted wall-clock formats, minute precision first.
const WALL_CLOCK_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

fn parse_wall_clock(input: &str) -> Result<NaiveDateTime, ConversionError> {
    WALL_CLOCK_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .ok_or_else(|| ConversionError::InvalidWallClock(input.to_string()))
}

/// ## Summary
/// Resolves a zone-naive local start plus a duration into a UTC window.
///
/// The conversion is deterministic: the same `(local, zone, duration)`
/// input always yields the same window and offset. Local times that fall in
/// a DST gap or fold are rejected rather than silently disambiguated —
/// picking a candidate would make the persisted offset non-reproducible
/// from the stored inputs.
///
/// ## Errors
/// Returns a [`ConversionError`] if the zone is not a recognized IANA name,
/// the wall-clock string does not parse, the local time does not exist or
/// is ambiguous in the zone, or the duration is not positive.
pub fn resolve_window(
    starts_at_local: &str,
    iana_zone: &str,
    duration_minutes: i64,
) -> Result<ScheduleWindow, ConversionError> {
    if duration_minutes <= 0 {
        return Err(ConversionError::NonPositiveDuration(duration_minutes));
    }

    let tz = Tz::from_str(iana_zone)
        .map_err(|_e| ConversionError::UnknownTimeZone(iana_zone.to_string()))?;

    let start_local = parse_wall_clock(starts_at_local)?;

    let start_zoned = match tz.from_local_datetime(&start_local) {
        LocalResult::Single(dt) => dt,
        LocalResult::None => {
            return Err(ConversionError::NonExistentTime(
                start_local,
                iana_zone.to_string(),
            ));
        }
        LocalResult::Ambiguous(_earlier, _later) => {
            return Err(ConversionError::AmbiguousTime(
                start_local,
                iana_zone.to_string(),
            ));
        }
    };

    let offset_minutes = start_zoned.offset().fix().local_minus_utc() / 60;

    let start_utc = start_zoned.with_timezone(&Utc);
    let end_utc = start_utc + Duration::minutes(duration_minutes);
    let end_local = end_utc.with_timezone(&tz).naive_local();

    Ok(ScheduleWindow {
        start_utc,
        end_utc,
        offset_minutes,
        start_local,
        end_local,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn wall_clock(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .expect("valid date")
            .and_hms_opt(h, mi, 0)
            .expect("valid time")
    }

    #[test]
    fn test_buenos_aires_fixed_offset() {
        // Argentina has no DST; -03:00 year round.
        let window = resolve_window("2024-03-10T01:30", "America/Argentina/Buenos_Aires", 30)
            .expect("conversion should succeed");

        assert_eq!(window.offset_minutes, -180);
        assert_eq!(
            window.start_utc,
            Utc.with_ymd_and_hms(2024, 3, 10, 4, 30, 0).unwrap()
        );
        assert_eq!(
            window.end_utc,
            Utc.with_ymd_and_hms(2024, 3, 10, 5, 0, 0).unwrap()
        );
        assert_eq!(window.start_local, wall_clock(2024, 3, 10, 1, 30));
        assert_eq!(window.end_local, wall_clock(2024, 3, 10, 2, 0));
    }

    #[test]
    fn test_deterministic() {
        let a = resolve_window("2024-06-01T09:15", "Europe/Madrid", 60).expect("resolves");
        let b = resolve_window("2024-06-01T09:15", "Europe/Madrid", 60).expect("resolves");
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_dst_gap() {
        // US spring-forward 2024-03-10: 02:00-03:00 does not exist in New York.
        let err = resolve_window("2024-03-10T02:30", "America/New_York", 30)
            .expect_err("gap must be rejected");
        assert!(matches!(err, ConversionError::NonExistentTime(_, _)));
    }

    #[test]
    fn test_rejects_dst_fold() {
        // US fall-back 2024-11-03: 01:00-02:00 occurs twice in New York.
        let err = resolve_window("2024-11-03T01:30", "America/New_York", 30)
            .expect_err("fold must be rejected");
        assert!(matches!(err, ConversionError::AmbiguousTime(_, _)));
    }

    #[test]
    fn test_rejects_unknown_zone() {
        let err = resolve_window("2024-03-10T01:30", "Mars/Olympus_Mons", 30)
            .expect_err("unknown zone must be rejected");
        assert!(matches!(err, ConversionError::UnknownTimeZone(_)));
    }

    #[test]
    fn test_rejects_bad_wall_clock() {
        for input in ["", "10/03/2024 01:30", "2024-03-10", "2024-13-40T99:99"] {
            let err = resolve_window(input, "UTC", 30).expect_err("must be rejected");
            assert!(matches!(err, ConversionError::InvalidWallClock(_)), "{input}");
        }
    }

    #[test]
    fn test_accepts_seconds_precision() {
        let window = resolve_window("2024-03-10T01:30:00", "UTC", 15).expect("resolves");
        assert_eq!(window.offset_minutes, 0);
        assert_eq!(
            window.start_utc,
            Utc.with_ymd_and_hms(2024, 3, 10, 1, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_rejects_non_positive_duration() {
        for minutes in [0, -15] {
            let err = resolve_window("2024-03-10T01:30", "UTC", minutes)
                .expect_err("must be rejected");
            assert!(matches!(err, ConversionError::NonPositiveDuration(_)));
        }
    }

    #[test]
    fn test_window_straddling_dst_keeps_utc_length() {
        // 90 minutes starting just before the New York spring-forward gap.
        // The UTC length stays 90 minutes; the local mirror lands at 04:15
        // because the 02:00 hour was skipped.
        let window =
            resolve_window("2024-03-10T01:45", "America/New_York", 90).expect("resolves");

        assert_eq!(window.offset_minutes, -300);
        assert_eq!(window.end_utc - window.start_utc, Duration::minutes(90));
        assert_eq!(window.end_local, wall_clock(2024, 3, 10, 4, 15));
    }

    #[test]
    fn test_offset_reflects_local_start_season() {
        // Madrid is +01:00 in winter and +02:00 in summer; the persisted
        // offset follows the booking's start instant, not the call time.
        let winter = resolve_window("2024-01-15T10:00", "Europe/Madrid", 30).expect("resolves");
        let summer = resolve_window("2024-07-15T10:00", "Europe/Madrid", 30).expect("resolves");
        assert_eq!(winter.offset_minutes, 60);
        assert_eq!(summer.offset_minutes, 120);
    }
}
