use axum::extract::State;

use crate::database::models::Partnership;
use crate::middleware::{ApiResponse, ApiResult};
use crate::AppState;

/// GET /admin/partnerships - every campus, archived included, unpaginated
pub async fn partnership_list_all(State(state): State<AppState>) -> ApiResult<Vec<Partnership>> {
    Ok(ApiResponse::success(state.partnerships().list_all().await?))
}
