mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn add_and_remove_favorites() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.signup("alice").await?;
    let amelie = server.movie_id(&token, "Amelie").await?;
    let gone_girl = server.movie_id(&token, "Gone Girl").await?;

    for id in [&amelie, &gone_girl, &amelie] {
        let res = server
            .client
            .post(server.url(&format!("/users/alice/movies/{}", id)))
            .bearer_auth(&token)
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::OK);
    }

    let user: Value = server
        .client
        .get(server.url("/users/alice"))
        .bearer_auth(&token)
        .send()
        .await?
        .json()
        .await?;
    // Adding twice does not duplicate
    assert_eq!(user["FavoriteMovies"], json!([amelie, gone_girl]));

    let res = server
        .client
        .delete(server.url(&format!("/users/alice/movies/{}", amelie)))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let user: Value = res.json().await?;
    assert_eq!(user["FavoriteMovies"], json!([gone_girl]));
    Ok(())
}

#[tokio::test]
async fn rejects_bad_or_unknown_movie_ids() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.signup("alice").await?;

    let res = server
        .client
        .post(server.url("/users/alice/movies/not-a-uuid"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = server
        .client
        .post(server.url("/users/alice/movies/00000000-0000-0000-0000-000000000000"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn cannot_edit_someone_elses_favorites() -> Result<()> {
    let server = common::spawn_server().await?;
    let alice = server.signup("alice").await?;
    server.register("bobby").await?;
    let amelie = server.movie_id(&alice, "Amelie").await?;

    let res = server
        .client
        .post(server.url(&format!("/users/bobby/movies/{}", amelie)))
        .bearer_auth(&alice)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = server
        .client
        .delete(server.url(&format!("/users/bobby/movies/{}", amelie)))
        .bearer_auth(&alice)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}
