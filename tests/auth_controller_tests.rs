use axum::{
    http::{header, Request, StatusCode},
    routing::post,
    Router,
};
use http_body_util::BodyExt;
use mongodb::Client;
use tower::ServiceExt;

use bookmarket::{config, controllers::auth_controller, AppState};

async fn test_state() -> AppState {
    let settings = config::load();

    let client = Client::with_uri_str(&settings.mongodb_uri)
        .await
        .expect("mongodb client");
    let db = client.database(&settings.mongodb_db);

    AppState { db, settings }
}

async fn response_body_string(res: axum::response::Response) -> String {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&bytes).to_string()
}

fn json_request(uri: &str, body: &str) -> Request<axum::body::Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn register_rejects_missing_name() {
    let state = test_state().await;
    let app = Router::new()
        .route("/api/auth/register", post(auth_controller::post_register))
        .with_state(state);

    let req = json_request(
        "/api/auth/register",
        r#"{"name":"  ","email":"test@example.com","password":"Passw0rd!"}"#,
    );

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = response_body_string(res).await;
    assert!(body.contains("Name is required"));
}

#[tokio::test]
async fn register_rejects_invalid_email() {
    let state = test_state().await;
    let app = Router::new()
        .route("/api/auth/register", post(auth_controller::post_register))
        .with_state(state);

    let req = json_request(
        "/api/auth/register",
        r#"{"name":"Test","email":"not-an-email","password":"Passw0rd!"}"#,
    );

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = response_body_string(res).await;
    assert!(body.contains("Invalid email format"));
}

#[tokio::test]
async fn register_rejects_weak_password() {
    let state = test_state().await;
    let app = Router::new()
        .route("/api/auth/register", post(auth_controller::post_register))
        .with_state(state);

    // no digit, no special character
    let req = json_request(
        "/api/auth/register",
        r#"{"name":"Test","email":"test@example.com","password":"password"}"#,
    );

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = response_body_string(res).await;
    assert!(body.contains("at least 8 characters"));
}

#[tokio::test]
async fn login_rejects_empty_credentials() {
    let state = test_state().await;
    let app = Router::new()
        .route("/api/auth/login", post(auth_controller::post_login))
        .with_state(state);

    let req = json_request("/api/auth/login", r#"{"email":"","password":""}"#);

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = response_body_string(res).await;
    assert!(body.contains("Email and password are required"));
}

#[tokio::test]
async fn logout_clears_the_auth_cookie() {
    let state = test_state().await;
    let cookie_name = state.settings.jwt_cookie_name.clone();

    let app = Router::new()
        .route("/api/auth/logout", post(auth_controller::post_logout))
        .with_state(state);

    let req = Request::builder()
        .method("POST")
        .uri("/api/auth/logout")
        .body(axum::body::Body::empty())
        .unwrap();

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let set_cookie = res
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(set_cookie.starts_with(&format!("{}=", cookie_name)));

    let body = response_body_string(res).await;
    assert!(body.contains("Logged out successfully"));
}
