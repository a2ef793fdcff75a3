// middleware/body.rs - request bodies sent as JSON or as an HTML form

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Body extractor accepting `application/x-www-form-urlencoded` as well as JSON.
///
/// Form bodies are picked by content type; anything else goes through `Json`,
/// so a missing or wrong content type is reported the way `Json` reports it.
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
            return Ok(Payload(value));
        }

        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Payload(value))
    }
}

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(rename_all = "PascalCase")]
    struct Login {
        name: Option<String>,
        password: Option<String>,
    }

    fn request(content_type: &str, body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/login")
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn reads_form_bodies() {
        let req = request("application/x-www-form-urlencoded", "Name=alice&Password=secret");
        let Payload(login) = Payload::<Login>::from_request(req, &()).await.unwrap();
        assert_eq!(login.name.as_deref(), Some("alice"));
        assert_eq!(login.password.as_deref(), Some("secret"));
    }

    #[tokio::test]
    async fn reads_json_bodies() {
        let req = request("application/json", r#"{"Name":"alice"}"#);
        let Payload(login) = Payload::<Login>::from_request(req, &()).await.unwrap();
        assert_eq!(login, Login { name: Some("alice".into()), password: None });
    }

    #[tokio::test]
    async fn rejects_other_content_types() {
        let req = request("text/plain", "Name=alice");
        let err = Payload::<Login>::from_request(req, &()).await.unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "INVALID_JSON");
    }
}
