use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::{pg::Pg, prelude::*};
use uuid::Uuid;

use crate::db::enums::{AppointmentMode, AppointmentStatus, ParticipantRole};
use crate::db::schema;

/// A booked appointment on a calendar.
///
/// `starts_at_utc`/`ends_at_utc` are the authoritative half-open interval.
/// The zone, the offset resolved at booking time, and the local wall-clock
/// mirrors are stored so display never has to re-derive what the booker
/// typed.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::appointment)]
#[diesel(check_for_backend(Pg))]
pub struct Appointment {
    pub id: Uuid,
    pub calendar_id: Uuid,
    pub created_by_lawyer_id: Uuid,
    pub subject: String,
    pub mode: AppointmentMode,
    pub status: AppointmentStatus,
    pub starts_at_utc: DateTime<Utc>,
    pub ends_at_utc: DateTime<Utc>,
    pub scheduled_time_zone_id: Uuid,
    /// UTC offset in minutes in effect at the local start instant.
    pub scheduled_offset_minutes: i32,
    pub starts_at_local: NaiveDateTime,
    pub ends_at_local: NaiveDateTime,
    pub created_at: DateTime<Utc>,
}

/// Insert struct for booking appointments
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::appointment)]
pub struct NewAppointment<'a> {
    pub calendar_id: Uuid,
    pub created_by_lawyer_id: Uuid,
    pub subject: &'a str,
    pub mode: AppointmentMode,
    pub status: AppointmentStatus,
    pub starts_at_utc: DateTime<Utc>,
    pub ends_at_utc: DateTime<Utc>,
    pub scheduled_time_zone_id: Uuid,
    pub scheduled_offset_minutes: i32,
    pub starts_at_local: NaiveDateTime,
    pub ends_at_local: NaiveDateTime,
}

/// Link between an appointment and a participating lawyer.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::appointment_participant)]
#[diesel(check_for_backend(Pg))]
pub struct AppointmentParticipant {
    pub id: Uuid,
    pub appointment_id: Uuid,
    pub lawyer_id: Uuid,
    pub role: ParticipantRole,
    pub created_at: DateTime<Utc>,
}

/// Insert struct for appointment participants
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::appointment_participant)]
pub struct NewAppointmentParticipant {
    pub appointment_id: Uuid,
    pub lawyer_id: Uuid,
    pub role: ParticipantRole,
}
