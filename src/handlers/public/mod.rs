// handlers/public/mod.rs - endpoints that do not require a session

use axum::extract::State;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::AppState;

pub mod auth;

/// GET / - service description
pub async fn root() -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "description": env!("CARGO_PKG_DESCRIPTION"),
        "endpoints": {
            "public": ["GET /", "GET /health", "POST /login"],
            "session": ["POST /logout", "POST /reset-password"],
            "partnerships": [
                "GET /partnerships",
                "POST /partnerships",
                "GET /partnerships/export",
                "GET|PUT|DELETE /partnerships/:id",
                "POST /partnerships/:id/{approve,reject,archive,renew}"
            ],
            "admin": [
                "GET|POST /admin/users",
                "PUT|DELETE /admin/users/:id",
                "GET /admin/partnerships"
            ]
        }
    }))
}

/// GET /health - store liveness
pub async fn health(State(state): State<AppState>) -> ApiResult<Value> {
    state.stores.partnerships.ping().await.map_err(|e| {
        tracing::error!("Health check failed: {}", e);
        ApiError::service_unavailable("Database unavailable")
    })?;

    Ok(ApiResponse::success(json!({
        "status": "ok",
        "environment": format!("{:?}", state.config.environment).to_lowercase(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    })))
}
