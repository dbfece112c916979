use salvo::{Depot, Request, Response, Router, handler, http::StatusCode, writing::Json};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::app::api::{render_error, render_service_error};
use crate::db_handler::get_db_from_depot;
use lexcal_core::util::email::normalize_email;
use lexcal_service::{provision, roster};

/// ## Summary
/// Register lawyer request payload
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterLawyerRequest {
    pub email: String,
    pub full_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LawyerBody {
    id: String,
    email: String,
    full_name: String,
}

#[derive(Debug, Serialize)]
struct CalendarBody {
    id: String,
    name: String,
}

#[derive(Debug, Serialize)]
struct RegisterLawyerResponse {
    ok: bool,
    lawyer: LawyerBody,
    calendar: CalendarBody,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RosterItem {
    id: String,
    email: String,
    full_name: String,
    personal_calendar: Option<CalendarBody>,
}

#[derive(Debug, Serialize)]
struct RosterResponse {
    items: Vec<RosterItem>,
}

/// ## Summary
/// GET /api/lawyers - Lists active lawyers with their booking calendar,
/// ordered by display name.
///
/// ## Side Effects
/// - Provisions the demo lawyer first so a fresh deployment never returns
///   an empty roster
///
/// ## Errors
/// Returns HTTP 500 if the roster query fails
#[handler]
async fn list_lawyers_handler(depot: &mut Depot, res: &mut Response) {
    tracing::debug!("Processing lawyer roster request");

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

    if let Err(err) = provision::ensure_demo_lawyer(&mut conn).await {
        render_service_error(res, &err);
        return;
    }

    match roster::list_lawyers(&mut conn).await {
        Ok(entries) => {
            let items = entries
                .into_iter()
                .map(|entry| RosterItem {
                    id: entry.lawyer.id.to_string(),
                    email: entry.lawyer.email,
                    full_name: entry.lawyer.full_name,
                    personal_calendar: entry.personal_calendar.map(|cal| CalendarBody {
                        id: cal.id.to_string(),
                        name: cal.name,
                    }),
                })
                .collect();

            res.render(Json(RosterResponse { items }));
        }
        Err(err) => render_service_error(res, &err),
    }
}

/// ## Summary
/// POST /api/lawyers - Strictly registers a lawyer and their personal
/// calendar.
///
/// ## Errors
/// Returns HTTP 400 if the email or name is missing
/// Returns HTTP 409 if the email is already registered
/// Returns HTTP 500 if database operations fail
#[handler]
async fn register_lawyer_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    tracing::debug!("Processing lawyer registration request");

    let body: RegisterLawyerRequest = match req.parse_json().await {
        Ok(b) => b,
        Err(e) => {
            error!(error = ?e, "Failed to parse register lawyer request");
            render_error(res, StatusCode::BAD_REQUEST, "invalid request body");
            return;
        }
    };

    let email = normalize_email(&body.email);
    let full_name = body.full_name.trim().to_string();

    if email.is_empty() {
        render_error(res, StatusCode::BAD_REQUEST, "email is required");
        return;
    }
    if full_name.is_empty() {
        render_error(res, StatusCode::BAD_REQUEST, "fullName is required");
        return;
    }

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

    match provision::create_lawyer_with_calendar(&mut conn, &email, &full_name).await {
        Ok(ctx) => {
            tracing::info!(
                lawyer_id = %ctx.lawyer.id,
                email = %ctx.lawyer.email,
                "Lawyer registered via API"
            );
            res.render(Json(RegisterLawyerResponse {
                ok: true,
                lawyer: LawyerBody {
                    id: ctx.lawyer.id.to_string(),
                    email: ctx.lawyer.email,
                    full_name: ctx.lawyer.full_name,
                },
                calendar: CalendarBody {
                    id: ctx.calendar.id.to_string(),
                    name: ctx.calendar.name,
                },
            }));
        }
        Err(err) => render_service_error(res, &err),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("lawyers")
        .get(list_lawyers_handler)
        .post(register_lawyer_handler)
}
