use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use cinelog::config::Config;
use http_body_util::BodyExt;
use tower::ServiceExt;

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.tmdb.api_key = "test-key".to_string();
    config.auth.jwt_secret = "integration-test-secret-long-enough".to_string();

    let state = cinelog::api::create_app_state_from_config(config)
        .await
        .expect("Failed to create app state");
    cinelog::api::router(state)
}

async fn post_json(app: &Router, uri: &str, token: Option<&str>, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }

    let response = app
        .clone()
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}

async fn get_json(app: &Router, uri: &str, token: Option<&str>) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }

    let response = app
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}

async fn delete_json(app: &Router, uri: &str, token: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .header("Authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}

/// Register a user and log in, returning (access, refresh).
async fn register_and_login(app: &Router, username: &str) -> (String, String) {
    let (status, _) = post_json(
        app,
        "/register/",
        None,
        serde_json::json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "password": "correct horse battery staple",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post_json(
        app,
        "/login/",
        None,
        serde_json::json!({
            "username": username,
            "password": "correct horse battery staple",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    (
        body["access"].as_str().unwrap().to_string(),
        body["refresh"].as_str().unwrap().to_string(),
    )
}

#[tokio::test]
async fn test_protected_routes_require_auth() {
    let app = spawn_app().await;

    let (status, _) = get_json(&app, "/watchlist/all/", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = get_json(&app, "/favorites/all/", Some("not-a-real-token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_register_validation_and_duplicates() {
    let app = spawn_app().await;

    let (status, body) = post_json(
        &app,
        "/register/",
        None,
        serde_json::json!({"username": "frodo", "email": "frodo@shire.me"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("password"));

    let (status, _) = post_json(
        &app,
        "/register/",
        None,
        serde_json::json!({
            "username": "frodo",
            "email": "frodo@shire.me",
            "password": "the-one-ring",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // Same username again
    let (status, _) = post_json(
        &app,
        "/register/",
        None,
        serde_json::json!({
            "username": "frodo",
            "email": "other@shire.me",
            "password": "the-one-ring",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_with_username_or_email() {
    let app = spawn_app().await;
    register_and_login(&app, "samwise").await;

    let (status, body) = post_json(
        &app,
        "/login/",
        None,
        serde_json::json!({
            "username": "samwise@example.com",
            "password": "correct horse battery staple",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "samwise");

    let (status, _) = post_json(
        &app,
        "/login/",
        None,
        serde_json::json!({"username": "samwise", "password": "wrong"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_revokes_refresh_token() {
    let app = spawn_app().await;
    let (access, refresh) = register_and_login(&app, "meriadoc").await;

    let (status, _) = post_json(
        &app,
        "/logout/",
        Some(&access),
        serde_json::json!({"refresh": refresh}),
    )
    .await;
    assert_eq!(status, StatusCode::RESET_CONTENT);

    // The same refresh token is rejected after revocation.
    let (status, _) = post_json(
        &app,
        "/logout/",
        Some(&access),
        serde_json::json!({"refresh": refresh}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_watchlist_end_to_end() {
    let app = spawn_app().await;
    let (access, _) = register_and_login(&app, "pippin").await;

    let (status, body) = post_json(
        &app,
        "/watchlist/",
        Some(&access),
        serde_json::json!({"movie_id": "550", "status": "watching"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["movie_id"], "550");
    assert_eq!(body["status"], "watching");

    let (status, body) = get_json(&app, "/watchlist/all/", Some(&access)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["movie_id"], "550");

    let (status, _) = delete_json(&app, "/watchlist/550/", &access).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get_json(&app, "/watchlist/all/", Some(&access)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_watchlist_upsert_keeps_one_row() {
    let app = spawn_app().await;
    let (access, _) = register_and_login(&app, "boromir").await;

    let (status, _) = post_json(
        &app,
        "/watchlist/",
        Some(&access),
        serde_json::json!({"movie_id": "603"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post_json(
        &app,
        "/watchlist/",
        Some(&access),
        serde_json::json!({"movie_id": "603", "status": "completed"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "completed");

    let (_, body) = get_json(&app, "/watchlist/all/", Some(&access)).await;
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["status"], "completed");
}

#[tokio::test]
async fn test_missing_movie_id_is_rejected() {
    let app = spawn_app().await;
    let (access, _) = register_and_login(&app, "gimli").await;

    for uri in ["/watchlist/", "/favorites/", "/watchedhistory/", "/preferences/"] {
        let (status, body) = post_json(&app, uri, Some(&access), serde_json::json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "expected 400 for {uri}");
        assert_eq!(body["error"], "movie_id is required");
    }
}

#[tokio::test]
async fn test_delete_missing_entry_returns_not_found() {
    let app = spawn_app().await;
    let (access, _) = register_and_login(&app, "legolas").await;

    let (status, _) = delete_json(&app, "/watchlist/999/", &access).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = delete_json(&app, "/favorites/999/", &access).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = delete_json(&app, "/watchedhistory/999/", &access).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = delete_json(&app, "/preferences/999/", &access).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_favorites_and_history_readd_is_idempotent() {
    let app = spawn_app().await;
    let (access, _) = register_and_login(&app, "gandalf").await;

    for uri in ["/favorites/", "/watchedhistory/"] {
        let (status, first) =
            post_json(&app, uri, Some(&access), serde_json::json!({"movie_id": "120"})).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, second) =
            post_json(&app, uri, Some(&access), serde_json::json!({"movie_id": "120"})).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(first["id"], second["id"]);
    }

    let (_, body) = get_json(&app, "/favorites/all/", Some(&access)).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (_, body) = get_json(&app, "/watchedhistory/all/", Some(&access)).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_preference_normalization_flow() {
    let app = spawn_app().await;
    let (access, _) = register_and_login(&app, "aragorn").await;

    // Both flags set: liked wins.
    let (status, body) = post_json(
        &app,
        "/preferences/",
        Some(&access),
        serde_json::json!({"movie_id": "27205", "liked": true, "disliked": true}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["liked"], true);
    assert_eq!(body["disliked"], false);

    // Flipping to disliked clears liked.
    let (status, body) = post_json(
        &app,
        "/preferences/",
        Some(&access),
        serde_json::json!({"movie_id": "27205", "disliked": true}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["liked"], false);
    assert_eq!(body["disliked"], true);

    let (status, body) = get_json(&app, "/preferences/all/", Some(&access)).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["movie_id"], "27205");
    assert_eq!(rows[0]["disliked"], true);

    let (status, _) = delete_json(&app, "/preferences/27205/", &access).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = delete_json(&app, "/preferences/27205/", &access).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_lists_are_isolated_per_user() {
    let app = spawn_app().await;
    let (access_a, _) = register_and_login(&app, "arwen").await;
    let (access_b, _) = register_and_login(&app, "eowyn").await;

    let (status, _) = post_json(
        &app,
        "/favorites/",
        Some(&access_a),
        serde_json::json!({"movie_id": "550"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = get_json(&app, "/favorites/all/", Some(&access_b)).await;
    assert!(body.as_array().unwrap().is_empty());

    // B deleting A's movie id must not touch A's row.
    let (status, _) = delete_json(&app, "/favorites/550/", &access_b).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = get_json(&app, "/favorites/all/", Some(&access_a)).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_invalid_watchlist_status_is_rejected() {
    let app = spawn_app().await;
    let (access, _) = register_and_login(&app, "faramir").await;

    let (status, body) = post_json(
        &app,
        "/watchlist/",
        Some(&access),
        serde_json::json!({"movie_id": "550", "status": "binging"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("status"));
}
