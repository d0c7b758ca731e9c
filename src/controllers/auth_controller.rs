use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde_json::json;

use crate::{services::auth_service, AppState};

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "success": false, "error": message }))).into_response()
}

#[derive(Deserialize)]
pub struct RegisterBody {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

// POST /api/auth/register
pub async fn post_register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<RegisterBody>,
) -> Response {
    let name = body.name.trim().to_string();
    let email = body.email.trim().to_string();

    if name.is_empty() {
        return error(StatusCode::BAD_REQUEST, "Name is required");
    }
    if !auth_service::is_valid_email(&email) {
        return error(StatusCode::BAD_REQUEST, "Invalid email format");
    }
    if !auth_service::is_valid_password(&body.password) {
        return error(
            StatusCode::BAD_REQUEST,
            "Password must be at least 8 characters long and contain at least one number and one special character",
        );
    }

    let user = match auth_service::register_user(&state, &name, &email, &body.password).await {
        Ok(u) => u,
        Err(e) => return error(StatusCode::BAD_REQUEST, &e),
    };

    let token = match auth_service::make_jwt(&state, &user.id) {
        Ok(t) => t,
        Err(e) => return error(StatusCode::INTERNAL_SERVER_ERROR, &e),
    };

    let jar = jar.add(auth_service::auth_cookie(&state, token.clone()));

    (
        StatusCode::CREATED,
        jar,
        Json(json!({ "success": true, "data": { "user": user, "token": token } })),
    )
        .into_response()
}

// POST /api/auth/login
pub async fn post_login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginBody>,
) -> Response {
    let email = body.email.trim().to_string();

    if email.is_empty() || body.password.is_empty() {
        return error(StatusCode::BAD_REQUEST, "Email and password are required");
    }

    let user = match auth_service::login_user(&state, &email, &body.password).await {
        Ok(u) => u,
        Err(e) => return error(StatusCode::UNAUTHORIZED, &e),
    };

    let token = match auth_service::make_jwt(&state, &user.id) {
        Ok(t) => t,
        Err(e) => return error(StatusCode::INTERNAL_SERVER_ERROR, &e),
    };

    let jar = jar.add(auth_service::auth_cookie(&state, token.clone()));

    (
        StatusCode::OK,
        jar,
        Json(json!({ "success": true, "data": { "user": user, "token": token } })),
    )
        .into_response()
}

// POST /api/auth/logout
pub async fn post_logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    let jar = jar.add(auth_service::clear_auth_cookie(&state));

    (
        StatusCode::OK,
        jar,
        Json(json!({ "success": true, "message": "Logged out successfully" })),
    )
        .into_response()
}
