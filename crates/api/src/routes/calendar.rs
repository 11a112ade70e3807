use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/calendar/slots", get(handlers::calendar::get_slots))
        .route(
            "/api/calendar/service-types",
            get(handlers::calendar::get_service_types),
        )
        .route(
            "/api/companies/:company_id/calendar",
            get(handlers::calendar::get_calendar),
        )
        .route(
            "/api/companies/:company_id/calendar/slot",
            get(handlers::calendar::get_slot_status),
        )
        .route(
            "/api/companies/:company_id/calendar/malformed",
            get(handlers::calendar::get_malformed_jobs),
        )
}
