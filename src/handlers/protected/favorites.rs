// handlers/protected/favorites.rs - /users/:Name/movies/:MovieID handlers

use axum::{
    extract::{Path, State},
    Extension,
};
use uuid::Uuid;

use crate::database::models::User;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

fn parse_movie_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request(format!("'{}' is not a valid movie id", raw)))
}

/// POST /users/:Name/movies/:MovieID - add a favorite (idempotent)
pub async fn add(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((name, movie_id)): Path<(String, String)>,
) -> ApiResult<User> {
    auth.require_owner(&name)?;
    let movie_id = parse_movie_id(&movie_id)?;

    if state.store.movie_by_id(movie_id).await?.is_none() {
        return Err(ApiError::not_found(format!("Movie {} was not found", movie_id)));
    }

    let user = state
        .store
        .add_favorite(&name, movie_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("{} was not found", name)))?;

    tracing::debug!("'{}' now has {} favorites", user.name, user.favorite_movies.len());
    Ok(ApiResponse::success(user))
}

/// DELETE /users/:Name/movies/:MovieID - remove a favorite
pub async fn remove(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((name, movie_id)): Path<(String, String)>,
) -> ApiResult<User> {
    auth.require_owner(&name)?;
    let movie_id = parse_movie_id(&movie_id)?;

    let user = state
        .store
        .remove_favorite(&name, movie_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("{} was not found", name)))?;

    Ok(ApiResponse::success(user))
}
