/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

/// Well-known demo identity used by the idempotent bootstrap path.
pub const DEMO_LAWYER_EMAIL: &str = "demo.lawyer@challenge.local";
pub const DEMO_LAWYER_NAME: &str = "Demo Lawyer";

/// Display name given to lawyers implicitly registered through a booking
/// for an email nobody has registered yet.
pub const PLACEHOLDER_LAWYER_NAME: &str = "New Lawyer";

/// Base reference data created lazily on first use.
pub const DEFAULT_TIME_ZONE: &str = "UTC";
pub const DEFAULT_COUNTRY_ISO_CODE: &str = "AR";
pub const DEFAULT_COUNTRY_NAME: &str = "Argentina";
pub const DEFAULT_OFFICE_NAME: &str = "Demo Office";

/// The only appointment lengths a booking may use, in minutes.
pub const ALLOWED_DURATIONS_MINUTES: [i64; 6] = [15, 30, 45, 60, 90, 120];

/// Appointment listings return at most this many rows, newest first.
pub const RECENT_APPOINTMENTS_LIMIT: i64 = 50;

/// ## Summary
/// Checks a requested duration against the booking whitelist.
#[must_use]
pub fn is_allowed_duration(minutes: i64) -> bool {
    ALLOWED_DURATIONS_MINUTES.contains(&minutes)
}

/// ## Summary
/// Deterministic display name of a lawyer's personal calendar.
#[must_use]
pub fn personal_calendar_name(full_name: &str) -> String {
    format!("{full_name} (personal)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitelist_is_exhaustive_and_exclusive() {
        for minutes in [15, 30, 45, 60, 90, 120] {
            assert!(is_allowed_duration(minutes));
        }
        for minutes in [0, 1, 14, 16, 29, 59, 61, 121, 240, -30] {
            assert!(!is_allowed_duration(minutes));
        }
    }

    #[test]
    fn personal_calendar_name_pattern() {
        assert_eq!(
            personal_calendar_name("Demo Lawyer"),
            "Demo Lawyer (personal)"
        );
    }
}
