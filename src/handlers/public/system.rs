use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

/// GET / - service description
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "hrdocs-api",
        "version": version,
        "description": "HR directory and document comments API",
        "endpoints": {
            "auth": "/api/v1/SignUp, /api/v1/SignIn (public)",
            "documents": "/api/v1/Documents, /api/v1/Document/:id/Comments, /api/v1/Document/:id/Comment (token)",
            "employees": "/api/v1/employees[/:id[/events]] (token)",
            "departments": "/api/v1/departments[/:id[/employees]] (token)",
            "positions": "/api/v1/positions (token)",
            "health": "/health (public)",
        }
    }))
}

/// GET /health - liveness plus a database ping
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.db.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}

/// Any unmatched route
pub async fn fallback() -> ApiError {
    ApiError::unknown_route()
}

/// A known path requested with a method it does not serve
pub async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}
