//! # RepairDesk API
//!
//! Read-only HTTP surface of the RepairDesk calendar. Month, week and day
//! renderers call it to learn which slots are taken; it never creates or edits
//! jobs.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Load a snapshot of jobs and events and ask the core about it
//! - **Middleware**: Error to HTTP response mapping, request tracing
//! - **Config**: Environment, server and calendar configuration
//!
//! The API uses Axum as the web framework and reads data through a
//! [`CalendarSource`](repairdesk_db::CalendarSource).

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Middleware for error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;

use axum::{error_handling::HandleErrorLayer, http::StatusCode, Router};
use eyre::Result;
use repairdesk_core::config::CalendarConfig;
use repairdesk_db::{CalendarSource, DbPool, PgCalendarSource};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```ignore
/// let state = Arc::new(ApiState {
///     source: Arc::new(PgCalendarSource::new(db_pool)),
///     calendar: CalendarConfig::default(),
/// });
/// let app = router(state);
/// ```
pub struct ApiState {
    /// Where jobs and events are loaded from
    pub source: Arc<dyn CalendarSource>,

    /// Tenant calendar settings handed to the core on every request
    pub calendar: CalendarConfig,
}

/// Builds the application router with all routes attached to `state`
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Calendar endpoints
        .merge(routes::calendar::routes())
        // Attach shared state to all routes
        .with_state(state)
        // One span per request, with method, path and response status
        .layer(TraceLayer::new_for_http())
}

/// Starts the API server with the provided configuration and database connection
///
/// Initializes logging, wires the Postgres-backed calendar source into the
/// router, applies CORS and timeout layers, and serves until shutdown.
pub async fn start_server(config: config::ApiConfig, db_pool: DbPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState {
        source: Arc::new(PgCalendarSource::new(db_pool)),
        calendar: config.calendar.clone(),
    });
    info!(
        timezone = %config.calendar.timezone.name(),
        start_hour = config.calendar.start_hour,
        end_hour = config.calendar.end_hour,
        business_type = %config.calendar.business_type,
        "Calendar configured"
    );

    let app = router(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([axum::http::Method::GET, axum::http::Method::OPTIONS])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(
                origins
                    .iter()
                    .filter_map(|origin| match origin.parse() {
                        Ok(value) => Some(value),
                        Err(_) => {
                            warn!(%origin, "Ignoring unparsable CORS origin");
                            None
                        }
                    })
                    .collect::<Vec<axum::http::HeaderValue>>(),
            )
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(HandleErrorLayer::new(|_: tower::BoxError| async {
                StatusCode::REQUEST_TIMEOUT
            }))
            .timeout(std::time::Duration::from_secs(config.request_timeout)),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
