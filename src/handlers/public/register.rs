// handlers/public/register.rs - POST /users handler

use axum::extract::State;

use crate::auth::hash_password;
use crate::database::models::{User, UserChanges};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, Payload};
use crate::state::AppState;
use crate::validation::{Mode, UserPayload};

/// POST /users - Register a new account
///
/// Expected Input (JSON, or the same fields form-encoded):
/// ```json
/// { "Name": "alice", "Password": "secret", "Email": "alice@example.com", "Birthday": "1990-05-17" }
/// ```
///
/// 201 with the stored user; 422 when validation fails; 400 when the name is taken.
pub async fn register(
    State(state): State<AppState>,
    Payload(payload): Payload<UserPayload>,
) -> ApiResult<User> {
    let input = payload.validate(Mode::Register).map_err(ApiError::validation)?;

    if state.store.user_by_name(&input.name).await?.is_some() {
        return Err(ApiError::bad_request(format!("{} already exists", input.name)));
    }

    let hashed = hash_password(input.password, state.config.security.bcrypt_cost).await?;
    let user = state
        .store
        .insert_user(UserChanges {
            name: input.name,
            password: hashed,
            email: input.email,
            birthday: input.birthday,
        })
        .await?;

    tracing::info!("Registered user '{}' ({})", user.name, user.id);
    Ok(ApiResponse::created(user))
}
