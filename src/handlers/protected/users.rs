// handlers/protected/users.rs - /users/:Name handlers (bearer token required)

use axum::{
    extract::{Path, State},
    Extension,
};

use crate::auth::hash_password;
use crate::database::models::{User, UserChanges};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, Payload};
use crate::state::AppState;
use crate::validation::{Mode, UserPayload};

/// GET /users - all users
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    let users = state.store.list_users().await?;
    Ok(ApiResponse::success(users))
}

/// GET /users/:Name
pub async fn show(State(state): State<AppState>, Path(name): Path<String>) -> ApiResult<User> {
    let user = state
        .store
        .user_by_name(&name)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("{} was not found", name)))?;
    Ok(ApiResponse::success(user))
}

/// PUT /users/:Name - replace name, password and email; birthday when given.
///
/// Only the account owner may update it. Validation runs before the ownership
/// check so a malformed body is reported the same way for everyone.
pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(name): Path<String>,
    Payload(payload): Payload<UserPayload>,
) -> ApiResult<User> {
    let input = payload.validate(Mode::Update).map_err(ApiError::validation)?;
    auth.require_owner(&name)?;

    let hashed = hash_password(input.password, state.config.security.bcrypt_cost).await?;
    let changes = UserChanges {
        name: input.name,
        password: hashed,
        email: input.email,
        birthday: input.birthday,
    };

    let user = state
        .store
        .update_user(&name, changes)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("{} was not found", name)))?;

    if user.name != name {
        tracing::info!("User '{}' renamed to '{}'", name, user.name);
    }
    Ok(ApiResponse::success(user))
}

/// DELETE /users/:Name - deregister. Answers in plain text.
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(name): Path<String>,
) -> Result<String, ApiError> {
    auth.require_owner(&name)?;

    match state.store.delete_user(&name).await? {
        Some(user) => {
            tracing::info!("Deleted user '{}' ({})", user.name, user.id);
            Ok(format!("{} was deleted.", name))
        }
        None => Err(ApiError::bad_request(format!("{} was not found", name))),
    }
}
