// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition, registration and liveness. Everything else sits behind
// the bearer middleware in `protected`.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::state::AppState;

pub mod login;
pub mod register;

pub use login::login;
pub use register::register;

/// GET / - default text response
pub async fn welcome() -> &'static str {
    "Welcome to myFlix!"
}

/// GET /health - store connectivity check
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}
