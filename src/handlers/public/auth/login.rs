// handlers/public/auth/login.rs - POST /login handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::auth::cookie;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::session::{LoginInput, LoginOutcome};
use crate::AppState;

/**
 * POST /login - Authenticate with email and password
 *
 * Expected Input:
 * ```json
 * { "email": "admin@example.edu", "password": "..." }
 * ```
 *
 * Returns the public user view and the session token, and sets the `jwt`
 * cookie for browser clients. Unknown email and wrong password both answer
 * 401 "Invalid email or password".
 */
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginInput>, JsonRejection>,
) -> ApiResult<LoginOutcome> {
    let Json(input) = payload?;
    let outcome = state.sessions().login(input).await?;
    let set_cookie = cookie::session_cookie(&outcome.token, state.config.security.cookie_secure);
    Ok(ApiResponse::success(outcome).with_cookie(set_cookie))
}
