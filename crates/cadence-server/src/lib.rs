//! Cadence Web Server
//!
//! Axum-based REST API for the Cadence work-analytics service. The server
//! exposes the record store and the insight entry points to the dashboard
//! UI; authentication and static-file serving belong to the surrounding
//! deployment, not this crate.
//!
//! - Restrictive CORS policy (same-origin unless origins are configured)
//! - Input validation (pagination limits, period parsing)
//! - Sanitized error responses (internal detail only logged)

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use cadence_core::Database;

mod handlers;


/// Maximum pagination limit
pub const MAX_PAGE_LIMIT: i64 = 1000;

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

/// Shared application state
pub struct AppState {
    pub db: Database,
}

/// Standard success body for mutations that return no payload
#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Create the application router
pub fn create_router(db: Database, config: ServerConfig) -> Router {
    let state = Arc::new(AppState { db });

    let api_routes = Router::new()
        // Health / status
        .route("/health", get(handlers::health))
        .route("/status", get(handlers::get_status))
        // Insights
        .route("/insights/:period", get(handlers::generate_insights))
        // Work records
        .route(
            "/work",
            get(handlers::list_work_records).post(handlers::create_work_record),
        )
        .route(
            "/work/:id",
            get(handlers::get_work_record).delete(handlers::delete_work_record),
        )
        // Projects
        .route(
            "/projects",
            get(handlers::list_projects).post(handlers::create_project),
        )
        .route("/projects/:id", get(handlers::get_project))
        .route(
            "/projects/:id/status",
            axum::routing::patch(handlers::update_project_status),
        )
        // Objectives
        .route(
            "/objectives",
            get(handlers::list_objectives).post(handlers::create_objective),
        )
        .route("/objectives/:id", get(handlers::get_objective))
        .route(
            "/objectives/:id/progress",
            axum::routing::patch(handlers::update_objective_progress),
        );

    let cors = if config.allowed_origins.is_empty() {
        // Same-origin only: no cross-origin requests allowed
        CorsLayer::new()
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE])
    };

    Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Start the server
pub async fn serve(
    db: Database,
    host: &str,
    port: u16,
    config: ServerConfig,
) -> anyhow::Result<()> {
    let app = create_router(db, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn conflict(msg: &str) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl From<cadence_core::Error> for AppError {
    fn from(err: cadence_core::Error) -> Self {
        match err {
            cadence_core::Error::NotFound(msg) => Self::not_found(&msg),
            cadence_core::Error::InvalidData(msg) => Self::bad_request(&msg),
            other => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                // Return generic message to client
                message: "An internal error occurred".to_string(),
                // Keep full error for logging
                internal: Some(other.into()),
            },
        }
    }
}
