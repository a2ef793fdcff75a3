use anyhow::Context;
use serde_json::json;
use std::path::{Path, PathBuf};

use crate::cli::OutputFormat;
use crate::config;
use crate::database::models::NewMovie;
use crate::database::{DatabaseManager, Store};

pub async fn handle(file: PathBuf, output_format: OutputFormat) -> anyhow::Result<()> {
    let config = config::config();
    if config.database.url.is_none() {
        tracing::warn!("DATABASE_URL not set; seeded movies will be lost when this command exits");
    }

    let store = DatabaseManager::connect(config).await?;
    let count = seed_store(store.as_ref(), &file).await?;

    match output_format {
        OutputFormat::Json => println!("{}", json!({ "file": file.display().to_string(), "inserted": count })),
        OutputFormat::Text => println!("Inserted {} movies from {}", count, file.display()),
    }
    Ok(())
}

/// Read a JSON array of movie documents.
pub fn load_movies(path: &Path) -> anyhow::Result<Vec<NewMovie>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_movies(&raw).with_context(|| format!("invalid movie file {}", path.display()))
}

pub fn parse_movies(raw: &str) -> anyhow::Result<Vec<NewMovie>> {
    Ok(serde_json::from_str(raw)?)
}

/// Insert every movie from `path`, returning how many were stored.
pub async fn seed_store(store: &dyn Store, path: &Path) -> anyhow::Result<usize> {
    let movies = load_movies(path)?;
    let count = movies.len();
    for movie in movies {
        store.insert_movie(movie).await?;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;

    #[test]
    fn rejects_non_array_documents() {
        assert!(parse_movies(r#"{"Title": "Alone"}"#).is_err());
        assert!(parse_movies(r#"[{"Description": "no title"}]"#).is_err());
    }

    #[tokio::test]
    async fn seeds_from_file() {
        let path = std::env::temp_dir().join(format!("myflix-seed-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            r#"[{"Title": "Heat", "Description": "Cops and robbers.", "Genre": {"Name": "Crime", "Description": ""}}]"#,
        )
        .unwrap();

        let store = MemoryStore::new();
        let count = seed_store(&store, &path).await.unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(count, 1);
        assert_eq!(store.movie_by_genre("Crime").await.unwrap().unwrap().title, "Heat");
    }
}
