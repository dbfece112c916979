//! Appointment booking and listing.
//!
//! Booking runs: validation → identity provisioning → wall-clock
//! conversion → lazy zone upsert → transactional lock / overlap check /
//! insert. The overlap check executes inside the same transaction as the
//! insert while holding a row lock on the calendar, so two concurrent
//! bookings for overlapping slots cannot both commit.

use diesel_async::AsyncConnection;
use diesel_async::scoped_futures::ScopedFutureExt;

use lexcal_core::constants;
use lexcal_db::db::connection::DbConnection;
use lexcal_db::db::enums::{AppointmentMode, AppointmentStatus, ParticipantRole};
use lexcal_db::db::query::{appointment, calendar, reference};
use lexcal_db::model::appointment::{Appointment, NewAppointment, NewAppointmentParticipant};
use lexcal_db::model::time_zone::TimeZone;
use lexcal_sched::{TimeSlot, find_conflict, resolve_window};

use crate::error::{ServiceError, ServiceResult};
use crate::provision;

/// A booking request, already parsed but not yet validated.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub subject: String,
    pub mode: AppointmentMode,
    /// Zone-naive wall clock, `YYYY-MM-DDTHH:mm`.
    pub starts_at_local: String,
    pub duration_minutes: i64,
    /// IANA zone the wall clock is expressed in.
    pub scheduled_time_zone: String,
    pub lawyer_email: String,
}

/// A persisted appointment together with the zone it was booked in.
#[derive(Debug, Clone)]
pub struct BookedAppointment {
    pub appointment: Appointment,
    pub time_zone: TimeZone,
}

/// ## Summary
/// Validates a booking request's fields.
///
/// Pure; shared by the booking path and any pre-flight caller.
///
/// ## Errors
/// Returns [`ServiceError::MissingField`] for a blank subject or start, and
/// [`ServiceError::InvalidDuration`] for a duration outside the whitelist.
pub fn validate(request: &BookingRequest) -> ServiceResult<()> {
    if request.subject.trim().is_empty() {
        return Err(ServiceError::MissingField { field: "subject" });
    }

    if request.starts_at_local.trim().is_empty() {
        return Err(ServiceError::MissingField {
            field: "startsAtLocal",
        });
    }

    if !constants::is_allowed_duration(request.duration_minutes) {
        return Err(ServiceError::InvalidDuration {
            minutes: request.duration_minutes,
        });
    }

    Ok(())
}

/// ## Summary
/// Books an appointment on the acting lawyer's personal calendar.
///
/// ## Errors
/// Returns a validation error, an invalid-time error, a
/// [`ServiceError::SchedulingConflict`] carrying the blocking interval, or
/// a database error. On any error nothing is persisted.
#[tracing::instrument(skip(conn, request), fields(lawyer_email = %request.lawyer_email))]
pub async fn create_appointment(
    conn: &mut DbConnection<'_>,
    request: &BookingRequest,
) -> ServiceResult<BookedAppointment> {
    validate(request)?;

    let identity = provision::ensure_booking_identity(conn, &request.lawyer_email).await?;

    let zone = request.scheduled_time_zone.trim();
    let window = resolve_window(
        request.starts_at_local.trim(),
        zone,
        request.duration_minutes,
    )?;

    // The zone row is reference data, created lazily on first use.
    let time_zone = reference::upsert_time_zone(conn, zone).await?;

    tracing::debug!(
        start_utc = %window.start_utc,
        end_utc = %window.end_utc,
        offset_minutes = window.offset_minutes,
        "Booking window resolved"
    );

    let subject = request.subject.trim().to_string();
    let mode = request.mode;
    let calendar_id = identity.calendar.id;
    let lawyer_id = identity.lawyer.id;
    let time_zone_id = time_zone.id;

    let persisted = conn
        .transaction::<_, ServiceError, _>(move |tx| {
            async move {
                // Serializes concurrent bookings on this calendar; the
                // read below sees every committed appointment.
                let _locked = calendar::lock_for_booking(tx, calendar_id).await?;

                let existing = appointment::booked_slots(tx, calendar_id).await?;
                let candidate = TimeSlot::new(window.start_utc, window.end_utc);

                if let Some(conflict) = find_conflict(candidate, &existing) {
                    tracing::warn!(
                        conflict_start = %conflict.start,
                        conflict_end = %conflict.end,
                        "Booking rejected: slot already taken"
                    );
                    return Err(ServiceError::SchedulingConflict { conflict });
                }

                let created = appointment::insert(
                    tx,
                    &NewAppointment {
                        calendar_id,
                        created_by_lawyer_id: lawyer_id,
                        subject: &subject,
                        mode,
                        status: AppointmentStatus::Confirmed,
                        starts_at_utc: window.start_utc,
                        ends_at_utc: window.end_utc,
                        scheduled_time_zone_id: time_zone_id,
                        scheduled_offset_minutes: window.offset_minutes,
                        starts_at_local: window.start_local,
                        ends_at_local: window.end_local,
                    },
                )
                .await?;

                appointment::add_participant(
                    tx,
                    &NewAppointmentParticipant {
                        appointment_id: created.id,
                        lawyer_id,
                        role: ParticipantRole::Organizer,
                    },
                )
                .await?;

                Ok(created)
            }
            .scope_boxed()
        })
        .await?;

    tracing::info!(appointment_id = %persisted.id, "Appointment booked");

    Ok(BookedAppointment {
        appointment: persisted,
        time_zone,
    })
}

/// ## Summary
/// Lists the most recent appointments on the acting lawyer's calendar,
/// newest start first, capped at the recent-window size.
///
/// ## Errors
/// Returns an error if a database operation fails.
#[tracing::instrument(skip(conn, lawyer_email))]
pub async fn list_appointments(
    conn: &mut DbConnection<'_>,
    lawyer_email: &str,
) -> ServiceResult<Vec<(Appointment, TimeZone)>> {
    let identity = provision::ensure_booking_identity(conn, lawyer_email).await?;

    Ok(appointment::list_recent_with_zone(
        conn,
        identity.calendar.id,
        constants::RECENT_APPOINTMENTS_LIMIT,
    )
    .await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> BookingRequest {
        BookingRequest {
            subject: "Consulta".to_string(),
            mode: AppointmentMode::VideoCall,
            starts_at_local: "2024-03-10T01:30".to_string(),
            duration_minutes: 30,
            scheduled_time_zone: "America/Argentina/Buenos_Aires".to_string(),
            lawyer_email: "demo.lawyer@challenge.local".to_string(),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        validate(&request()).expect("valid request");
    }

    #[test]
    fn test_blank_subject_rejected() {
        let mut req = request();
        req.subject = "   ".to_string();
        let err = validate(&req).expect_err("must fail");
        assert!(matches!(
            err,
            ServiceError::MissingField { field: "subject" }
        ));
    }

    #[test]
    fn test_blank_start_rejected() {
        let mut req = request();
        req.starts_at_local = String::new();
        let err = validate(&req).expect_err("must fail");
        assert!(matches!(
            err,
            ServiceError::MissingField {
                field: "startsAtLocal"
            }
        ));
    }

    #[test]
    fn test_duration_whitelist_enforced() {
        for minutes in [15, 30, 45, 60, 90, 120] {
            let mut req = request();
            req.duration_minutes = minutes;
            validate(&req).expect("whitelisted duration");
        }
        for minutes in [0, -30, 1, 20, 59, 121] {
            let mut req = request();
            req.duration_minutes = minutes;
            let err = validate(&req).expect_err("must fail");
            assert!(matches!(err, ServiceError::InvalidDuration { .. }), "{minutes}");
        }
    }

    #[test]
    fn test_validation_error_messages_match_wire_format() {
        let mut req = request();
        req.subject = String::new();
        assert_eq!(
            validate(&req).expect_err("fails").to_string(),
            "subject is required"
        );

        let mut req = request();
        req.duration_minutes = 25;
        assert_eq!(
            validate(&req).expect_err("fails").to_string(),
            "durationMinutes must be one of: 15, 30, 45, 60, 90, 120"
        );
    }
}
