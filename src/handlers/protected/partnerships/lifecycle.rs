use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};

use super::partnership_id;
use crate::auth::Actor;
use crate::database::models::Partnership;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::partnership::RenewInput;
use crate::types::{Role, Transition};
use crate::AppState;

/// POST /partnerships/:id/approve - Pending → Active
pub async fn partnership_approve(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> ApiResult<Partnership> {
    transition(state, actor, id, Transition::Approve).await
}

/// POST /partnerships/:id/reject - Pending → Rejected
pub async fn partnership_reject(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> ApiResult<Partnership> {
    transition(state, actor, id, Transition::Reject).await
}

async fn transition(state: AppState, actor: Actor, id: String, action: Transition) -> ApiResult<Partnership> {
    let id = partnership_id(&id)?;
    actor.authorize(&[Role::Admin, Role::SuperAdmin])?;
    let updated = state.partnerships().transition(&actor, id, action).await?;
    Ok(ApiResponse::success(updated))
}

/// POST /partnerships/:id/archive - one-way flag
pub async fn partnership_archive(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> ApiResult<Partnership> {
    let id = partnership_id(&id)?;
    Ok(ApiResponse::success(state.partnerships().archive(&actor, id).await?))
}

/// POST /partnerships/:id/renew - new start date and duration
pub async fn partnership_renew(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
    payload: Result<Json<RenewInput>, JsonRejection>,
) -> ApiResult<Partnership> {
    let id = partnership_id(&id)?;
    let Json(input) = payload?;
    Ok(ApiResponse::success(state.partnerships().renew(&actor, id, input).await?))
}
