// handlers/protected/movies.rs - read-only movie lookups

use axum::extract::{Path, State};

use crate::database::models::{Director, Genre, Movie};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /movies
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Movie>> {
    let movies = state.store.list_movies().await?;
    Ok(ApiResponse::success(movies))
}

/// GET /movies/:title
pub async fn by_title(State(state): State<AppState>, Path(title): Path<String>) -> ApiResult<Movie> {
    let movie = state
        .store
        .movie_by_title(&title)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("No movie titled '{}'", title)))?;
    Ok(ApiResponse::success(movie))
}

/// GET /movies/genres/:genreName - genre of the first movie carrying it
pub async fn genre(State(state): State<AppState>, Path(genre_name): Path<String>) -> ApiResult<Genre> {
    let genre = state
        .store
        .movie_by_genre(&genre_name)
        .await?
        .and_then(|movie| movie.genre)
        .ok_or_else(|| ApiError::not_found(format!("No genre named '{}'", genre_name)))?;
    Ok(ApiResponse::success(genre))
}

/// GET /movies/director/:directorName
pub async fn director(
    State(state): State<AppState>,
    Path(director_name): Path<String>,
) -> ApiResult<Director> {
    let director = state
        .store
        .movie_by_director(&director_name)
        .await?
        .and_then(|movie| movie.director)
        .ok_or_else(|| ApiError::not_found(format!("No director named '{}'", director_name)))?;
    Ok(ApiResponse::success(director))
}
