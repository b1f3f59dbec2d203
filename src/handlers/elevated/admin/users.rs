use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::Value;

use crate::database::models::User;
use crate::handlers::parse_id;
use crate::middleware::{message, ApiResponse, ApiResult};
use crate::services::admin::{AssignAdminInput, ProvisionedAccount, UpdateUserInput};
use crate::AppState;

/**
 * POST /admin/users - provision an Admin or SuperAdmin account
 *
 * Expected Input:
 * ```json
 * {
 *   "email": "string",       // Required, unique
 *   "firstName": "string",   // Required
 *   "lastName": "string",    // Required
 *   "campusId": "string",    // Required for Admin, ignored for SuperAdmin
 *   "role": "Admin"          // "Admin" | "SuperAdmin"
 * }
 * ```
 *
 * The response carries `generatedPassword`, the only time the plaintext
 * one-time password is ever visible.
 */
pub async fn user_create(
    State(state): State<AppState>,
    payload: Result<Json<AssignAdminInput>, JsonRejection>,
) -> ApiResult<ProvisionedAccount> {
    let Json(input) = payload?;
    Ok(ApiResponse::created(state.admin().assign_admin(input).await?))
}

pub async fn user_list(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    Ok(ApiResponse::success(state.admin().list_users().await?))
}

pub async fn user_update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUserInput>, JsonRejection>,
) -> ApiResult<User> {
    let id = parse_id(&id, "user")?;
    let Json(input) = payload?;
    Ok(ApiResponse::success(state.admin().update_user(id, input).await?))
}

pub async fn user_delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Value> {
    let id = parse_id(&id, "user")?;
    state.admin().delete_user(id).await?;
    Ok(ApiResponse::success(message("User deleted successfully")))
}
