use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde_json::Value;

use crate::auth::{cookie, Actor};
use crate::middleware::{message, ApiResponse, ApiResult};
use crate::services::session::ResetPasswordInput;
use crate::AppState;

/// POST /logout - clears the session cookie. Bearer tokens stay valid until expiry.
pub async fn logout(State(state): State<AppState>, Extension(actor): Extension<Actor>) -> ApiResponse<Value> {
    tracing::info!("User {} logged out", actor.user_id);
    ApiResponse::success(message("Logged out successfully"))
        .with_cookie(cookie::clear_session_cookie(state.config.security.cookie_secure))
}

/// POST /reset-password - change the caller's own password
pub async fn reset_password(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    payload: Result<Json<ResetPasswordInput>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(input) = payload?;
    state.sessions().reset_password(&actor, input).await?;
    Ok(ApiResponse::success(message("Password reset successfully")))
}
