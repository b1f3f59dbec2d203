use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::{Actor, AuthError, SessionClaims};
use crate::database::UserStore;
use crate::error::ApiError;
use crate::types::Role;
use crate::AppState;

/// Middleware that re-validates the token's subject against the user store on
/// every request, so role changes and deletions take effect before expiry.
pub async fn validate_user_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = request
        .extensions()
        .get::<SessionClaims>()
        .cloned()
        .ok_or(AuthError::Unauthenticated)?;

    let actor = resolve_actor(state.stores.users.as_ref(), claims).await.map_err(|e| {
        tracing::warn!("User validation failed for {}: {}", request.uri().path(), e);
        e
    })?;

    tracing::debug!("User validation successful: {} as {}", actor.user_id, actor.role);
    request.extensions_mut().insert(actor);
    Ok(next.run(request).await)
}

pub async fn resolve_actor(users: &dyn UserStore, claims: SessionClaims) -> Result<Actor, ApiError> {
    let user_id = claims
        .id
        .as_deref()
        .and_then(|id| Uuid::parse_str(id).ok())
        .ok_or(AuthError::MalformedToken)?;
    let claimed_role = claims.role.ok_or(AuthError::MalformedToken)?;

    let user = users.find_by_id(user_id).await?.ok_or(AuthError::UserNotFound)?;

    if user.role.as_str() != claimed_role {
        return Err(AuthError::RoleMismatch.into());
    }

    Ok(Actor {
        user_id: user.id,
        email: user.email,
        role: user.role,
        campus_id: claims.campus_id.or(user.campus_id),
        status: user.status,
    })
}

/// Layered after the session middlewares on SuperAdmin-only routes
pub async fn require_super_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    let actor = request.extensions().get::<Actor>().ok_or(AuthError::Unauthenticated)?;
    actor.authorize(&[Role::SuperAdmin]).map_err(|e| {
        tracing::warn!("SuperAdmin route refused for {}", actor.user_id);
        e
    })?;
    Ok(next.run(request).await)
}
