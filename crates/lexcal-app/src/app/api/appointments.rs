use salvo::{Depot, Request, Response, Router, handler, http::StatusCode, writing::Json};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::app::api::{iso_utc, render_error, render_service_error};
use crate::db_handler::get_db_from_depot;
use lexcal_core::constants::DEMO_LAWYER_EMAIL;
use lexcal_db::db::enums::{AppointmentMode, AppointmentStatus};
use lexcal_db::model::appointment::Appointment;
use lexcal_db::model::time_zone::TimeZone;
use lexcal_service::schedule::{self, BookingRequest};

/// ## Summary
/// Create appointment request payload.
///
/// Optional fields fall back to the demo defaults the original client
/// relied on: video call, 30 minutes, UTC, the demo lawyer.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateAppointmentRequest {
    pub subject: String,
    pub mode: Option<AppointmentMode>,
    /// Zone-naive wall clock, `YYYY-MM-DDTHH:mm`.
    pub starts_at_local: String,
    pub duration_minutes: Option<i64>,
    /// IANA zone name.
    pub scheduled_time_zone: Option<String>,
    pub lawyer_email: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AppointmentBody {
    id: String,
    subject: String,
    mode: AppointmentMode,
    status: AppointmentStatus,
    starts_at_utc: String,
    ends_at_utc: String,
    scheduled_time_zone: String,
    scheduled_offset_minutes: i32,
}

#[derive(Debug, Serialize)]
struct CreateAppointmentResponse {
    ok: bool,
    appointment: AppointmentBody,
}

#[derive(Debug, Serialize)]
struct ListAppointmentsResponse {
    items: Vec<AppointmentBody>,
}

fn appointment_body(appointment: Appointment, time_zone: &TimeZone) -> AppointmentBody {
    AppointmentBody {
        id: appointment.id.to_string(),
        subject: appointment.subject,
        mode: appointment.mode,
        status: appointment.status,
        starts_at_utc: iso_utc(appointment.starts_at_utc),
        ends_at_utc: iso_utc(appointment.ends_at_utc),
        scheduled_time_zone: time_zone.iana_name.clone(),
        scheduled_offset_minutes: appointment.scheduled_offset_minutes,
    }
}

/// ## Summary
/// GET /api/appointments - Lists the most recent appointments on the
/// acting lawyer's calendar, newest start first, capped at 50.
///
/// The acting lawyer comes from the `lawyerEmail` query parameter and
/// defaults to the demo identity.
///
/// ## Errors
/// Returns HTTP 500 if database operations fail
#[handler]
async fn list_appointments_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let lawyer_email = req
        .query::<String>("lawyerEmail")
        .unwrap_or_else(|| DEMO_LAWYER_EMAIL.to_string());

    tracing::debug!("Processing appointment listing request");

    let provider = match get_db_from_depot(depot) {
        Ok(p) => p,
        Err(e) => {
            error!(error = ?e, "Failed to get database provider");
            render_error(res, StatusCode::INTERNAL_SERVER_ERROR, "internal error");
            return;
        }
    };

    let mut conn = match provider.get_connection().await {
        Ok(c) => c,
        Err(e) => {
            error!(error = ?e, "Failed to get database connection");
            render_error(res, StatusCode::SERVICE_UNAVAILABLE, "database unavailable");
            return;
        }
    };

    match schedule::list_appointments(&mut conn, &lawyer_email).await {
        Ok(items) => {
            let items = items
                .into_iter()
                .map(|(appointment, zone)| appointment_body(appointment, &zone))
                .collect();

            res.render(Json(ListAppointmentsResponse { items }));
        }
        Err(err) => render_service_error(res, &err),
    }
}

/// ## Summary
/// POST /api/appointments - Books an appointment on the acting lawyer's
/// personal calendar.
///
/// ## Side Effects
/// - May silently register an unknown lawyer email with a placeholder name
/// - Lazily creates the booking's time zone row on first use
///
/// ## Errors
/// Returns HTTP 400 on validation or time-input failures
/// Returns HTTP 409 with the blocking interval on a scheduling conflict
/// Returns HTTP 500 if database operations fail
#[handler]
async fn create_appointment_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    tracing::debug!("Processing appointment creation request");

    let body: CreateAppointmentRequest = match req.parse_json().await {
        Ok(b) => b,
        Err(e) => {
            error!(error = ?e, "Failed to parse create appointment request");
            render_error(res, StatusCode::BAD_REQUEST, "invalid request body");
            return;
        }
    };

    let booking = BookingRequest {
        subject: body.subject,
        mode: body.mode.unwrap_or(AppointmentMode::VideoCall),
        starts_at_local: body.starts_at_local,
        duration_minutes: body.duration_minutes.unwrap_or(30),
        scheduled_time_zone: body
            .scheduled_time_zone
            .unwrap_or_else(|| "UTC".to_string()),
        lawyer_email: body
            .lawyer_email
            .unwrap_or_else(|| DEMO_LAWYER_EMAIL.to_string()),
    };

    let provider = match get_db_from_depot(depot) {
        Ok(p) => p,
        Err(e) => {
            error!(error = ?e, "Failed to get database provider");
            render_error(res, StatusCode::INTERNAL_SERVER_ERROR, "internal error");
            return;
        }
    };

    let mut conn = match provider.get_connection().await {
        Ok(c) => c,
        Err(e) => {
            error!(error = ?e, "Failed to get database connection");
            render_error(res, StatusCode::SERVICE_UNAVAILABLE, "database unavailable");
            return;
        }
    };

    match schedule::create_appointment(&mut conn, &booking).await {
        Ok(booked) => {
            res.render(Json(CreateAppointmentResponse {
                ok: true,
                appointment: appointment_body(booked.appointment, &booked.time_zone),
            }));
        }
        Err(err) => render_service_error(res, &err),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("appointments")
        .get(list_appointments_handler)
        .post(create_appointment_handler)
}
