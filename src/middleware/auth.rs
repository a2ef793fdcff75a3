use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::credentials::bearer_token;
use crate::auth::validate_jwt;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated user context resolved from the bearer token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: Uuid,
    pub name: String,
}

/// JWT authentication middleware: verifies the token, then loads the user it names.
/// A token whose user has since been deleted is rejected.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers()).map_err(ApiError::unauthorized)?;

    let claims = validate_jwt(token, &state.config.security).map_err(|e| {
        tracing::debug!("Rejected bearer token: {}", e);
        ApiError::unauthorized("Unauthorized")
    })?;

    let user = state.store.user_by_id(claims.user_id).await?.ok_or_else(|| {
        tracing::warn!("Token for '{}' ({}) names a user that no longer exists", claims.sub, claims.user_id);
        ApiError::unauthorized("Unauthorized")
    })?;

    request.extensions_mut().insert(AuthUser {
        id: user.id,
        name: user.name,
    });

    Ok(next.run(request).await)
}

impl AuthUser {
    /// Users may only modify their own account.
    pub fn require_owner(&self, name: &str) -> Result<(), ApiError> {
        if self.name != name {
            tracing::warn!("User '{}' attempted to modify account '{}'", self.name, name);
            return Err(ApiError::bad_request("Permission denied"));
        }
        Ok(())
    }
}
