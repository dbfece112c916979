mod appointments;
mod bootstrap;
mod healthcheck;
mod lawyers;

use chrono::{DateTime, SecondsFormat, Utc};
use salvo::{Response, Router, http::StatusCode, writing::Json};
use serde::Serialize;

use lexcal_sched::TimeSlot;
use lexcal_service::error::ServiceError;

use crate::{error, messages};

// Re-export route constants from core
pub use lexcal_core::constants::{API_ROUTE_COMPONENT, API_ROUTE_PREFIX};

/// ## Summary
/// Constructs the main router: liveness probes at the root, the scheduling
/// API under the api prefix.
#[must_use]
pub fn routes() -> Router {
    Router::new().push(healthcheck::routes()).push(
        Router::with_path(API_ROUTE_COMPONENT)
            .push(bootstrap::routes())
            .push(lawyers::routes())
            .push(appointments::routes()),
    )
}

/// ## Summary
/// Error response payload
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub ok: bool,
    pub error: String,
    /// Localized human message resolved from the static rule table.
    pub message: &'static str,
    /// The blocking interval when a booking hits a scheduling conflict.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflict: Option<ConflictBody>,
}

/// The interval a rejected booking collided with.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictBody {
    pub starts_at_utc: String,
    pub ends_at_utc: String,
}

/// Formats a UTC instant the way the wire expects it, millisecond
/// precision with a `Z` suffix.
pub(crate) fn iso_utc(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn conflict_body(slot: &TimeSlot) -> ConflictBody {
    ConflictBody {
        starts_at_utc: iso_utc(slot.start),
        ends_at_utc: iso_utc(slot.end),
    }
}

/// Renders a failure with a fixed error identifier.
pub(crate) fn render_error(res: &mut Response, status: StatusCode, api_error: &str) {
    res.status_code(status);
    res.render(Json(ErrorBody {
        ok: false,
        error: api_error.to_string(),
        message: messages::friendly_message(status, api_error),
        conflict: None,
    }));
}

/// ## Summary
/// Renders a service failure with its HTTP status, identifier, localized
/// message, and (for scheduling conflicts) the blocking interval.
///
/// Store failures stay opaque: the detail is logged, the caller sees a
/// generic identifier.
pub(crate) fn render_service_error(res: &mut Response, err: &ServiceError) {
    let status = error::service_error_status(err);

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!(error = %err, "Unexpected failure while handling request");
        render_error(res, status, "internal error");
        return;
    }

    let conflict = match err {
        ServiceError::SchedulingConflict { conflict } => Some(conflict_body(conflict)),
        _ => None,
    };

    let api_error = err.to_string();
    let message = messages::friendly_message(status, &api_error);

    res.status_code(status);
    res.render(Json(ErrorBody {
        ok: false,
        error: api_error,
        message,
        conflict,
    }));
}
