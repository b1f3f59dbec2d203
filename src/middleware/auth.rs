use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{cookie, AuthError, SessionClaims, SessionIssuer};
use crate::error::ApiError;
use crate::AppState;

/// Session authentication middleware: verifies the bearer header or `jwt`
/// cookie and stores the decoded claims for `validate_user_middleware`.
pub async fn session_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = extract_claims(&state.issuer, request.headers()).map_err(|e| {
        tracing::warn!("Authentication refused for {}: {}", request.uri().path(), e);
        ApiError::from(e)
    })?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

pub fn extract_claims(issuer: &SessionIssuer, headers: &HeaderMap) -> Result<SessionClaims, AuthError> {
    let token = cookie::session_token(headers).ok_or(AuthError::Unauthenticated)?;
    issuer.verify(&token)
}
