use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{Movie, NewMovie, User, UserChanges};
use super::store::Store;

/// Process-local store for development and tests. Contents vanish on exit.
#[derive(Default)]
pub struct MemoryStore {
    movies: RwLock<HashMap<Uuid, Movie>>,
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn first_movie_where(&self, pred: impl Fn(&Movie) -> bool) -> Option<Movie> {
        let movies = self.movies.read().await;
        movies
            .values()
            .filter(|m| pred(m))
            .min_by(|a, b| a.title.cmp(&b.title))
            .cloned()
    }

    /// Apply `f` to the user named `name` under the write lock.
    async fn modify_user(&self, name: &str, f: impl FnOnce(&mut User)) -> Option<User> {
        let mut users = self.users.write().await;
        let user = users.values_mut().find(|u| u.name == name)?;
        f(user);
        Some(user.clone())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_movies(&self) -> Result<Vec<Movie>, DatabaseError> {
        let mut movies: Vec<Movie> = self.movies.read().await.values().cloned().collect();
        movies.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(movies)
    }

    async fn movie_by_id(&self, id: Uuid) -> Result<Option<Movie>, DatabaseError> {
        Ok(self.movies.read().await.get(&id).cloned())
    }

    async fn movie_by_title(&self, title: &str) -> Result<Option<Movie>, DatabaseError> {
        Ok(self.first_movie_where(|m| m.title == title).await)
    }

    async fn movie_by_genre(&self, genre: &str) -> Result<Option<Movie>, DatabaseError> {
        Ok(self
            .first_movie_where(|m| m.genre.as_ref().is_some_and(|g| g.name == genre))
            .await)
    }

    async fn movie_by_director(&self, director: &str) -> Result<Option<Movie>, DatabaseError> {
        Ok(self
            .first_movie_where(|m| m.director.as_ref().is_some_and(|d| d.name == director))
            .await)
    }

    async fn insert_movie(&self, movie: NewMovie) -> Result<Movie, DatabaseError> {
        let movie = movie.into_movie(Uuid::new_v4());
        self.movies.write().await.insert(movie.id, movie.clone());
        Ok(movie)
    }

    async fn list_users(&self) -> Result<Vec<User>, DatabaseError> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }

    async fn user_by_name(&self, name: &str) -> Result<Option<User>, DatabaseError> {
        Ok(self.users.read().await.values().find(|u| u.name == name).cloned())
    }

    async fn user_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn insert_user(&self, user: UserChanges) -> Result<User, DatabaseError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.name == user.name) {
            return Err(DatabaseError::Conflict(user.name));
        }
        let user = user.into_user(Uuid::new_v4());
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_user(&self, name: &str, changes: UserChanges) -> Result<Option<User>, DatabaseError> {
        let mut users = self.users.write().await;
        let Some(id) = users.values().find(|u| u.name == name).map(|u| u.id) else {
            return Ok(None);
        };
        if changes.name != name && users.values().any(|u| u.name == changes.name) {
            return Err(DatabaseError::Conflict(changes.name));
        }
        let Some(user) = users.get_mut(&id) else {
            return Ok(None);
        };
        changes.apply_to(user);
        Ok(Some(user.clone()))
    }

    async fn add_favorite(&self, name: &str, movie_id: Uuid) -> Result<Option<User>, DatabaseError> {
        Ok(self
            .modify_user(name, |user| {
                if !user.favorite_movies.contains(&movie_id) {
                    user.favorite_movies.push(movie_id);
                }
            })
            .await)
    }

    async fn remove_favorite(&self, name: &str, movie_id: Uuid) -> Result<Option<User>, DatabaseError> {
        Ok(self
            .modify_user(name, |user| user.favorite_movies.retain(|id| *id != movie_id))
            .await)
    }

    async fn delete_user(&self, name: &str) -> Result<Option<User>, DatabaseError> {
        let mut users = self.users.write().await;
        let id = users.values().find(|u| u.name == name).map(|u| u.id);
        Ok(id.and_then(|id| users.remove(&id)))
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
