//! Database enum types with Diesel serialization.
//!
//! This module provides type-safe enum wrappers for database CHECK constraints.
//! Each enum implements `ToSql` and `FromSql` for automatic conversion between Rust and `PostgreSQL`.

use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::pg::{Pg, PgValue};
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use std::fmt;
use std::io::Write;

/// How an appointment is held.
///
/// Maps to `appointment.mode` CHECK constraint.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    AsExpression,
    FromSqlRow,
    serde::Serialize,
    serde::Deserialize,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentMode {
    InPerson,
    VideoCall,
    PhoneCall,
}

impl ToSql<Text, Pg> for AppointmentMode {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for AppointmentMode {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"IN_PERSON" => Ok(Self::InPerson),
            b"VIDEO_CALL" => Ok(Self::VideoCall),
            b"PHONE_CALL" => Ok(Self::PhoneCall),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl AppointmentMode {
    /// Returns the database string representation of this appointment mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InPerson => "IN_PERSON",
            Self::VideoCall => "VIDEO_CALL",
            Self::PhoneCall => "PHONE_CALL",
        }
    }
}

impl fmt::Display for AppointmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Appointment lifecycle status.
///
/// Maps to `appointment.status` CHECK constraint. Bookings are created
/// `Confirmed`; `Cancelled` is reserved for a cancellation flow that does
/// not exist yet.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    AsExpression,
    FromSqlRow,
    serde::Serialize,
    serde::Deserialize,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Confirmed,
    Cancelled,
}

impl ToSql<Text, Pg> for AppointmentStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for AppointmentStatus {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"CONFIRMED" => Ok(Self::Confirmed),
            b"CANCELLED" => Ok(Self::Cancelled),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl AppointmentStatus {
    /// Returns the database string representation of this appointment status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Confirmed => "CONFIRMED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role of a lawyer on an appointment.
///
/// Maps to `appointment_participant.role` CHECK constraint. Only the
/// organizer exists today; the link table models the multi-attendee
/// extension.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    AsExpression,
    FromSqlRow,
    serde::Serialize,
    serde::Deserialize,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipantRole {
    Organizer,
}

impl ToSql<Text, Pg> for ParticipantRole {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for ParticipantRole {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"ORGANIZER" => Ok(Self::Organizer),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl ParticipantRole {
    /// Returns the database string representation of this participant role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Organizer => "ORGANIZER",
        }
    }
}

impl fmt::Display for ParticipantRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_wire_format() {
        let mode: AppointmentMode =
            serde_json::from_str("\"VIDEO_CALL\"").expect("deserializes");
        assert_eq!(mode, AppointmentMode::VideoCall);
        assert_eq!(mode.as_str(), "VIDEO_CALL");
        assert_eq!(
            serde_json::to_string(&AppointmentMode::InPerson).expect("serializes"),
            "\"IN_PERSON\""
        );
    }

    #[test]
    fn test_mode_rejects_free_form_strings() {
        assert!(serde_json::from_str::<AppointmentMode>("\"CARRIER_PIGEON\"").is_err());
        assert!(serde_json::from_str::<AppointmentMode>("\"in_person\"").is_err());
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(AppointmentStatus::Confirmed.as_str(), "CONFIRMED");
        assert_eq!(
            serde_json::to_string(&AppointmentStatus::Confirmed).expect("serializes"),
            "\"CONFIRMED\""
        );
    }

    #[test]
    fn test_role_wire_format() {
        assert_eq!(ParticipantRole::Organizer.as_str(), "ORGANIZER");
    }
}
