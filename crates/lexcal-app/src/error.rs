use salvo::http::StatusCode;
use thiserror::Error;

use lexcal_service::error::ServiceError;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] ServiceError),

    #[error(transparent)]
    DatabaseError(#[from] lexcal_db::error::DbError),

    #[error(transparent)]
    CoreError(#[from] lexcal_core::error::CoreError),
}

pub type AppResult<T> = std::result::Result<T, AppError>;

/// ## Summary
/// Maps a service failure to its HTTP status.
///
/// Validation and time-input failures are the caller's to fix (400);
/// duplicate registration and scheduling conflicts are state conflicts
/// (409); anything from the store is an opaque internal failure (500).
#[must_use]
pub fn service_error_status(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::MissingField { .. }
        | ServiceError::InvalidDuration { .. }
        | ServiceError::InvalidTimeInput(_) => StatusCode::BAD_REQUEST,
        ServiceError::DuplicateLawyer | ServiceError::SchedulingConflict { .. } => {
            StatusCode::CONFLICT
        }
        ServiceError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexcal_sched::ConversionError;

    #[test]
    fn test_validation_failures_are_bad_request() {
        assert_eq!(
            service_error_status(&ServiceError::MissingField { field: "subject" }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            service_error_status(&ServiceError::InvalidDuration { minutes: 25 }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            service_error_status(&ServiceError::InvalidTimeInput(
                ConversionError::UnknownTimeZone("Mars/Olympus_Mons".to_string())
            )),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_conflicts_are_distinguishable_from_validation() {
        assert_eq!(
            service_error_status(&ServiceError::DuplicateLawyer),
            StatusCode::CONFLICT
        );
    }
}
