// handlers/public/login.rs - POST /login handler

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;

use crate::auth::{credentials, generate_jwt, verify_password, Claims, Credentials};
use crate::database::models::User;
use crate::error::ApiError;
use crate::middleware::Payload;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}

/// Why the local strategy refused a login. Logged, never sent to the client.
#[derive(Debug, PartialEq, Eq)]
pub enum LoginFailure {
    MissingCredentials,
    UnknownUser,
    WrongPassword,
}

impl LoginFailure {
    fn message(&self) -> &'static str {
        match self {
            LoginFailure::MissingCredentials => "Missing credentials.",
            LoginFailure::UnknownUser => "Incorrect username or password.",
            LoginFailure::WrongPassword => "Incorrect Password.",
        }
    }
}

/// POST /login - Authenticate and receive a JWT
///
/// Credentials are taken from, in order:
/// - `Authorization: Basic base64(Name:Password)`
/// - `?Name=...&Password=...`
/// - a JSON or form-encoded body `{ "Name": "...", "Password": "..." }`
///
/// A query string or body that does not parse counts as "no credentials there".
///
/// Success:
/// ```json
/// { "user": { "_id": "...", "Name": "alice", ... }, "token": "eyJhbGciOiJIUzI1NiI..." }
/// ```
///
/// Any credential failure answers 400 `{ "message": "Something is not right", "user": false }`.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Option<Query<Credentials>>,
    body: Option<Payload<Credentials>>,
) -> Result<Response, ApiError> {
    let creds = credentials::from_basic_header(&headers)
        .or_else(|| query.map(|Query(q)| q).filter(|q| q.name.is_some()))
        .or_else(|| body.map(|Payload(b)| b))
        .unwrap_or_default();

    let user = match authenticate(&state, creds).await? {
        Ok(user) => user,
        Err(failure) => {
            tracing::warn!("Login refused: {}", failure.message());
            return Ok(login_refused());
        }
    };

    let claims = Claims::new(&user, state.config.security.jwt_expiry_hours)?;
    let token = generate_jwt(&claims, &state.config.security)?;

    tracing::info!("Issued token for '{}'", user.name);
    Ok(Json(LoginResponse { user, token }).into_response())
}

/// Local strategy: resolve credentials to a stored user.
/// The outer error is infrastructure; the inner one is a refused login.
pub async fn authenticate(
    state: &AppState,
    creds: Credentials,
) -> Result<Result<User, LoginFailure>, ApiError> {
    let Some((name, password)) = creds.complete() else {
        return Ok(Err(LoginFailure::MissingCredentials));
    };

    let Some(user) = state.store.user_by_name(&name).await? else {
        return Ok(Err(LoginFailure::UnknownUser));
    };

    if !verify_password(password, user.password.clone()).await? {
        return Ok(Err(LoginFailure::WrongPassword));
    }

    Ok(Ok(user))
}

fn login_refused() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "message": "Something is not right",
            "user": false
        })),
    )
        .into_response()
}
