use salvo::{Depot, Response, Router, handler, http::StatusCode, writing::Json};
use serde::Serialize;
use tracing::error;

use crate::db_handler::get_db_from_depot;
use lexcal_db::db::query::reference;

#[derive(Debug, Serialize)]
struct HealthResponse {
    ok: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DbProbeResponse {
    ok: bool,
    time_zones: i64,
}

#[handler]
async fn health(res: &mut Response) {
    res.render(Json(HealthResponse { ok: true }));
}

/// ## Summary
/// GET /db - Confirms the store answers queries by counting time zone rows.
#[handler]
async fn db_probe(depot: &mut Depot, res: &mut Response) {
    let provider = match get_db_from_depot(depot) {
        Ok(p) => p,
        Err(e) => {
            error!(error = ?e, "Failed to get database provider");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(HealthResponse { ok: false }));
            return;
        }
    };

    let mut conn = match provider.get_connection().await {
        Ok(c) => c,
        Err(e) => {
            error!(error = ?e, "Failed to get database connection");
            res.status_code(StatusCode::SERVICE_UNAVAILABLE);
            res.render(Json(HealthResponse { ok: false }));
            return;
        }
    };

    match reference::count_time_zones(&mut conn).await {
        Ok(time_zones) => {
            res.render(Json(DbProbeResponse {
                ok: true,
                time_zones,
            }));
        }
        Err(e) => {
            error!(error = ?e, "Database probe query failed");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(HealthResponse { ok: false }));
        }
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::new()
        .push(Router::with_path("health").get(health))
        .push(Router::with_path("db").get(db_probe))
}
