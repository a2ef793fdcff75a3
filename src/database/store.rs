use async_trait::async_trait;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{Movie, NewMovie, User, UserChanges};

/// Document-style access to movies and users.
///
/// Lookups return `Ok(None)` for missing records; handlers decide the status code.
#[async_trait]
pub trait Store: Send + Sync {
    /// All movies, ordered by title.
    async fn list_movies(&self) -> Result<Vec<Movie>, DatabaseError>;
    async fn movie_by_id(&self, id: Uuid) -> Result<Option<Movie>, DatabaseError>;
    async fn movie_by_title(&self, title: &str) -> Result<Option<Movie>, DatabaseError>;
    /// First movie (by title) whose genre has this name.
    async fn movie_by_genre(&self, genre: &str) -> Result<Option<Movie>, DatabaseError>;
    /// First movie (by title) whose director has this name.
    async fn movie_by_director(&self, director: &str) -> Result<Option<Movie>, DatabaseError>;
    async fn insert_movie(&self, movie: NewMovie) -> Result<Movie, DatabaseError>;

    /// All users, ordered by name.
    async fn list_users(&self) -> Result<Vec<User>, DatabaseError>;
    async fn user_by_name(&self, name: &str) -> Result<Option<User>, DatabaseError>;
    async fn user_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError>;
    /// Fails with `Conflict` when the name is taken.
    async fn insert_user(&self, user: UserChanges) -> Result<User, DatabaseError>;
    /// Fails with `Conflict` when renaming onto another user's name.
    async fn update_user(&self, name: &str, changes: UserChanges) -> Result<Option<User>, DatabaseError>;
    /// No-op when the movie is already a favorite.
    async fn add_favorite(&self, name: &str, movie_id: Uuid) -> Result<Option<User>, DatabaseError>;
    async fn remove_favorite(&self, name: &str, movie_id: Uuid) -> Result<Option<User>, DatabaseError>;
    async fn delete_user(&self, name: &str) -> Result<Option<User>, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}
