use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Extension, Json,
};
use serde_json::Value;

use super::partnership_id;
use crate::auth::Actor;
use crate::database::models::Partnership;
use crate::filter::ListQuery;
use crate::middleware::{message, ApiResponse, ApiResult};
use crate::services::partnership::{PartnershipInput, PartnershipPage};
use crate::AppState;

/**
 * GET /partnerships - tenant-scoped, filtered, paginated list
 *
 * Query: status, typeOfOrganization, potentialStartDate (inclusive minimum),
 * durationOfPartnership, archived ("true" lists archived records only),
 * page (default 1), limit (default 10, at most 100).
 */
pub async fn partnership_list(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Query(query): Query<ListQuery>,
) -> ApiResult<PartnershipPage> {
    let page = state.partnerships().list(&actor, query).await?;
    Ok(ApiResponse::success(page))
}

/// POST /partnerships - create in the caller's campus
pub async fn partnership_create(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    payload: Result<Json<PartnershipInput>, JsonRejection>,
) -> ApiResult<Partnership> {
    let Json(input) = payload?;
    let created = state.partnerships().create(&actor, input).await?;
    Ok(ApiResponse::created(created))
}

/// GET /partnerships/export - every visible record, archived included
pub async fn partnership_export(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> ApiResult<Vec<Partnership>> {
    Ok(ApiResponse::success(state.partnerships().export(&actor).await?))
}

pub async fn partnership_get(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> ApiResult<Partnership> {
    let id = partnership_id(&id)?;
    Ok(ApiResponse::success(state.partnerships().get(&actor, id).await?))
}

/// PUT /partnerships/:id - merge descriptive fields; status and archive flag are refused
pub async fn partnership_update(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
    payload: Result<Json<PartnershipInput>, JsonRejection>,
) -> ApiResult<Partnership> {
    let id = partnership_id(&id)?;
    let Json(input) = payload?;
    Ok(ApiResponse::success(state.partnerships().update(&actor, id, input).await?))
}

pub async fn partnership_delete(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let id = partnership_id(&id)?;
    state.partnerships().delete(&actor, id).await?;
    Ok(ApiResponse::success(message("Partnership deleted successfully")))
}
