use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{Director, Genre, Movie, NewMovie, User, UserChanges};
use super::store::Store;

/// Table definitions applied by `myflix migrate`. Idempotent.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS movies (
        id          UUID PRIMARY KEY,
        title       TEXT NOT NULL,
        description TEXT NOT NULL,
        genre       JSONB,
        director    JSONB,
        actors      TEXT[] NOT NULL DEFAULT '{}',
        image_path  TEXT,
        featured    BOOLEAN NOT NULL DEFAULT FALSE
    )
    "#,
    "CREATE INDEX IF NOT EXISTS movies_title_idx ON movies (title)",
    "CREATE INDEX IF NOT EXISTS movies_genre_name_idx ON movies ((genre->>'Name'))",
    "CREATE INDEX IF NOT EXISTS movies_director_name_idx ON movies ((director->>'Name'))",
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id              UUID PRIMARY KEY,
        name            TEXT NOT NULL UNIQUE,
        password        TEXT NOT NULL,
        email           TEXT NOT NULL,
        birthday        DATE,
        favorite_movies UUID[] NOT NULL DEFAULT '{}'
    )
    "#,
];

const MOVIE_COLUMNS: &str = "id, title, description, genre, director, actors, image_path, featured";
const USER_COLUMNS: &str = "id, name, password, email, birthday, favorite_movies";

#[derive(FromRow)]
struct MovieRow {
    id: Uuid,
    title: String,
    description: String,
    genre: Option<Json<Genre>>,
    director: Option<Json<Director>>,
    actors: Vec<String>,
    image_path: Option<String>,
    featured: bool,
}

impl From<MovieRow> for Movie {
    fn from(row: MovieRow) -> Self {
        Movie {
            id: row.id,
            title: row.title,
            description: row.description,
            genre: row.genre.map(|Json(g)| g),
            director: row.director.map(|Json(d)| d),
            actors: row.actors,
            image_path: row.image_path,
            featured: row.featured,
        }
    }
}

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    password: String,
    email: String,
    birthday: Option<NaiveDate>,
    favorite_movies: Vec<Uuid>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            password: row.password,
            email: row.email,
            birthday: row.birthday,
            favorite_movies: row.favorite_movies,
        }
    }
}

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn migrate(&self) -> Result<(), DatabaseError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        info!("Applied {} schema statements", SCHEMA.len());
        Ok(())
    }

    async fn fetch_movie(&self, filter: &str, value: &str) -> Result<Option<Movie>, DatabaseError> {
        let sql = format!("SELECT {MOVIE_COLUMNS} FROM movies WHERE {filter} = $1 ORDER BY title LIMIT 1");
        let row = sqlx::query_as::<_, MovieRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Movie::from))
    }
}

#[async_trait]
impl Store for PgStore {
    async fn list_movies(&self) -> Result<Vec<Movie>, DatabaseError> {
        let sql = format!("SELECT {MOVIE_COLUMNS} FROM movies ORDER BY title");
        let rows = sqlx::query_as::<_, MovieRow>(&sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Movie::from).collect())
    }

    async fn movie_by_id(&self, id: Uuid) -> Result<Option<Movie>, DatabaseError> {
        let sql = format!("SELECT {MOVIE_COLUMNS} FROM movies WHERE id = $1");
        let row = sqlx::query_as::<_, MovieRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Movie::from))
    }

    async fn movie_by_title(&self, title: &str) -> Result<Option<Movie>, DatabaseError> {
        self.fetch_movie("title", title).await
    }

    async fn movie_by_genre(&self, genre: &str) -> Result<Option<Movie>, DatabaseError> {
        self.fetch_movie("genre->>'Name'", genre).await
    }

    async fn movie_by_director(&self, director: &str) -> Result<Option<Movie>, DatabaseError> {
        self.fetch_movie("director->>'Name'", director).await
    }

    async fn insert_movie(&self, movie: NewMovie) -> Result<Movie, DatabaseError> {
        let sql = format!(
            "INSERT INTO movies ({MOVIE_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {MOVIE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, MovieRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(&movie.title)
            .bind(&movie.description)
            .bind(movie.genre.map(Json))
            .bind(movie.director.map(Json))
            .bind(&movie.actors)
            .bind(&movie.image_path)
            .bind(movie.featured)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    async fn list_users(&self) -> Result<Vec<User>, DatabaseError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY name");
        let rows = sqlx::query_as::<_, UserRow>(&sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn user_by_name(&self, name: &str) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE name = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(User::from))
    }

    async fn user_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(User::from))
    }

    async fn insert_user(&self, user: UserChanges) -> Result<User, DatabaseError> {
        let sql = format!(
            "INSERT INTO users (id, name, password, email, birthday) VALUES ($1, $2, $3, $4, $5) RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(&user.name)
            .bind(&user.password)
            .bind(&user.email)
            .bind(user.birthday)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_write(e, &user.name))?;
        Ok(row.into())
    }

    async fn update_user(&self, name: &str, changes: UserChanges) -> Result<Option<User>, DatabaseError> {
        let sql = format!(
            "UPDATE users SET name = $2, password = $3, email = $4, birthday = COALESCE($5, birthday) \
             WHERE name = $1 RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(name)
            .bind(&changes.name)
            .bind(&changes.password)
            .bind(&changes.email)
            .bind(changes.birthday)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_write(e, &changes.name))?;
        Ok(row.map(User::from))
    }

    async fn add_favorite(&self, name: &str, movie_id: Uuid) -> Result<Option<User>, DatabaseError> {
        let sql = format!(
            "UPDATE users SET favorite_movies = CASE WHEN $2 = ANY(favorite_movies) \
             THEN favorite_movies ELSE array_append(favorite_movies, $2) END \
             WHERE name = $1 RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(name)
            .bind(movie_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(User::from))
    }

    async fn remove_favorite(&self, name: &str, movie_id: Uuid) -> Result<Option<User>, DatabaseError> {
        let sql = format!(
            "UPDATE users SET favorite_movies = array_remove(favorite_movies, $2) \
             WHERE name = $1 RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(name)
            .bind(movie_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(User::from))
    }

    async fn delete_user(&self, name: &str) -> Result<Option<User>, DatabaseError> {
        let sql = format!("DELETE FROM users WHERE name = $1 RETURNING {USER_COLUMNS}");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(User::from))
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
