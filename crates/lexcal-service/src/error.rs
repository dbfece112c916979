use thiserror::Error;

use lexcal_db::error::DbError;
use lexcal_sched::{ConversionError, TimeSlot};

/// Service layer errors.
///
/// The first four variants are the caller-visible failure taxonomy;
/// everything reaching `Db` is an opaque internal failure that is not
/// recovered here.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// A required input was missing or blank. The field name uses the wire
    /// spelling so adapters can echo it verbatim.
    #[error("{field} is required")]
    MissingField { field: &'static str },

    /// A duration outside the booking whitelist.
    #[error("durationMinutes must be one of: 15, 30, 45, 60, 90, 120")]
    InvalidDuration { minutes: i64 },

    /// The wall-clock/zone pair could not be resolved to a UTC window.
    #[error("invalid startsAtLocal or scheduledTimeZone: {0}")]
    InvalidTimeInput(#[from] ConversionError),

    /// Strict registration hit the email natural key.
    #[error("lawyer already registered with that email")]
    DuplicateLawyer,

    /// The requested window overlaps an existing booking on the calendar.
    /// Carries the conflicting interval so callers can suggest alternatives.
    #[error("appointment overlaps an existing booking at {conflict}")]
    SchedulingConflict { conflict: TimeSlot },

    #[error(transparent)]
    Db(#[from] DbError),
}

impl From<diesel::result::Error> for ServiceError {
    fn from(err: diesel::result::Error) -> Self {
        Self::Db(DbError::from(err))
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
