//! Queries for appointments and their participants.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use lexcal_sched::TimeSlot;

use crate::db::connection::DbConnection;
use crate::db::schema::{appointment, appointment_participant, time_zone};
use crate::model::appointment::{
    Appointment, NewAppointment, NewAppointmentParticipant,
};
use crate::model::time_zone::TimeZone;

/// ## Summary
/// Inserts an appointment and returns the persisted row.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn insert(
    conn: &mut DbConnection<'_>,
    new_appointment: &NewAppointment<'_>,
) -> QueryResult<Appointment> {
    diesel::insert_into(appointment::table)
        .values(new_appointment)
        .returning(Appointment::as_select())
        .get_result(conn)
        .await
}

/// ## Summary
/// Links a lawyer to an appointment with a role.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn add_participant(
    conn: &mut DbConnection<'_>,
    participant: &NewAppointmentParticipant,
) -> QueryResult<()> {
    diesel::insert_into(appointment_participant::table)
        .values(participant)
        .execute(conn)
        .await?;
    Ok(())
}

/// ## Summary
/// Loads every booked interval on a calendar as half-open UTC slots.
///
/// This feeds the authoritative overlap check; callers run it while
/// holding the calendar's booking lock.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn booked_slots(
    conn: &mut DbConnection<'_>,
    calendar_id: Uuid,
) -> QueryResult<Vec<TimeSlot>> {
    let rows: Vec<(chrono::DateTime<chrono::Utc>, chrono::DateTime<chrono::Utc>)> =
        appointment::table
            .filter(appointment::calendar_id.eq(calendar_id))
            .select((appointment::starts_at_utc, appointment::ends_at_utc))
            .load(conn)
            .await?;

    Ok(rows
        .into_iter()
        .map(|(start, end)| TimeSlot::new(start, end))
        .collect())
}

/// ## Summary
/// Loads the most recent appointments on a calendar, newest start first,
/// joined with the time zone each was booked in.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn list_recent_with_zone(
    conn: &mut DbConnection<'_>,
    calendar_id: Uuid,
    limit: i64,
) -> QueryResult<Vec<(Appointment, TimeZone)>> {
    appointment::table
        .inner_join(time_zone::table)
        .filter(appointment::calendar_id.eq(calendar_id))
        .order(appointment::starts_at_utc.desc())
        .limit(limit)
        .select((Appointment::as_select(), TimeZone::as_select()))
        .load(conn)
        .await
}
