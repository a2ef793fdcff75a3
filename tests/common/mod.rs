#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use myflix::cli::commands::seed::parse_movies;
use myflix::config::AppConfig;
use myflix::database::{MemoryStore, Store};
use myflix::AppState;

const MOVIES: &str = include_str!("../fixtures/movies.json");

pub const PASSWORD: &str = "correct-horse";

pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
}

/// Serve the app on an ephemeral port with a fresh, seeded in-memory store.
/// The server lives as long as the test's runtime.
pub async fn spawn_server() -> Result<TestServer> {
    let store = Arc::new(MemoryStore::new());
    for movie in parse_movies(MOVIES)? {
        store.insert_movie(movie).await?;
    }

    spawn_with_store(store).await
}

/// Serve the app on an ephemeral port backed by `store`.
pub async fn spawn_with_store(store: Arc<dyn Store>) -> Result<TestServer> {
    let mut config = AppConfig::development();
    // Minimum cost keeps registration fast in tests
    config.security.bcrypt_cost = 4;

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .context("failed to bind test listener")?;
    let addr = listener.local_addr()?;
    let app = myflix::app(AppState::new(store, config));

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });

    Ok(TestServer {
        base_url: format!("http://{}", addr),
        client: reqwest::Client::new(),
    })
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Register `name` with the shared test password; panics unless 201.
    pub async fn register(&self, name: &str) -> Result<Value> {
        let res = self
            .client
            .post(self.url("/users"))
            .json(&json!({
                "Name": name,
                "Password": PASSWORD,
                "Email": format!("{}@example.com", name),
                "Birthday": "1990-05-17"
            }))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::CREATED, "register {} failed", name);
        Ok(res.json().await?)
    }

    /// Log in with Basic credentials and return the bearer token.
    pub async fn login(&self, name: &str) -> Result<String> {
        let res = self
            .client
            .post(self.url("/login"))
            .basic_auth(name, Some(PASSWORD))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::OK, "login {} failed", name);
        let body: Value = res.json().await?;
        body["token"]
            .as_str()
            .map(str::to_string)
            .context("login response without token")
    }

    /// Register and log in.
    pub async fn signup(&self, name: &str) -> Result<String> {
        self.register(name).await?;
        self.login(name).await
    }

    pub async fn movie_id(&self, token: &str, title: &str) -> Result<String> {
        let movie: Value = self
            .client
            .get(self.url(&format!("/movies/{}", title)))
            .bearer_auth(token)
            .send()
            .await?
            .json()
            .await?;
        movie["_id"]
            .as_str()
            .map(str::to_string)
            .context("movie without _id")
    }
}
