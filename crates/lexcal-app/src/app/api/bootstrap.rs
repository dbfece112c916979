use salvo::{Depot, Response, Router, handler, http::StatusCode, writing::Json};
use serde::Serialize;
use tracing::error;

use crate::app::api::{render_error, render_service_error};
use crate::db_handler::get_db_from_depot;
use lexcal_service::provision;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BootstrapIds {
    time_zone_id: String,
    country_id: String,
    office_id: String,
    lawyer_id: String,
    calendar_id: String,
}

#[derive(Debug, Serialize)]
struct BootstrapResponse {
    ok: bool,
    ids: BootstrapIds,
}

/// ## Summary
/// POST /api/bootstrap - Provisions the demo lawyer and everything it
/// depends on, idempotently, and returns the resulting row ids.
///
/// ## Side Effects
/// - Creates the UTC time zone, default country, and default office rows
///   on first call
/// - Creates the demo lawyer and its personal calendar on first call
///
/// ## Errors
/// Returns HTTP 500 if provisioning fails
#[handler]
async fn bootstrap_handler(depot: &mut Depot, res: &mut Response) {
    tracing::debug!("Processing bootstrap request");

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

    match provision::ensure_demo_lawyer(&mut conn).await {
        Ok(ctx) => {
            res.render(Json(BootstrapResponse {
                ok: true,
                ids: BootstrapIds {
                    time_zone_id: ctx.base.time_zone.id.to_string(),
                    country_id: ctx.base.country.id.to_string(),
                    office_id: ctx.base.office.id.to_string(),
                    lawyer_id: ctx.lawyer.id.to_string(),
                    calendar_id: ctx.calendar.id.to_string(),
                },
            }));
        }
        Err(err) => render_service_error(res, &err),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("bootstrap").post(bootstrap_handler)
}
