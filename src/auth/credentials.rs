use axum::http::{header::AUTHORIZATION, HeaderMap};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;

/// Login name and password as submitted by the client.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Credentials {
    pub name: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    /// Both fields present and non-empty.
    pub fn complete(self) -> Option<(String, String)> {
        match (self.name, self.password) {
            (Some(name), Some(password)) if !name.is_empty() && !password.is_empty() => {
                Some((name, password))
            }
            _ => None,
        }
    }
}

/// Parse `Authorization: Basic base64(name:password)`.
pub fn from_basic_header(headers: &HeaderMap) -> Option<Credentials> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (name, password) = decoded.split_once(':')?;

    Some(Credentials {
        name: Some(name.to_string()),
        password: Some(password.to_string()),
    })
}

/// Return the bearer token from `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, &'static str> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or("Missing Authorization header")?
        .to_str()
        .map_err(|_| "Invalid Authorization header format")?;

    let (scheme, token) = value
        .split_once(' ')
        .ok_or("Authorization header must use Bearer token format")?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err("Authorization header must use Bearer token format");
    }

    let token = token.trim();
    if token.is_empty() {
        return Err("Empty JWT token");
    }
    Ok(token)
}
