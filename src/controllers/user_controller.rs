use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::{models::CurrentUser, services::user_service, AppState};

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "success": false, "error": message }))).into_response()
}

// GET /api/users/me
pub async fn get_me(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
) -> Response {
    let Some(Extension(user)) = user else {
        return error(StatusCode::UNAUTHORIZED, "Not authorized to access this route");
    };

    match user_service::get_user(&state, user.id).await {
        Ok(Some(profile)) => {
            (StatusCode::OK, Json(json!({ "success": true, "data": profile }))).into_response()
        }
        Ok(None) => error(StatusCode::NOT_FOUND, "User not found"),
        Err(e) => error(StatusCode::INTERNAL_SERVER_ERROR, &e),
    }
}

// GET /api/users/orders
pub async fn get_my_orders(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
) -> Response {
    let Some(Extension(user)) = user else {
        return error(StatusCode::UNAUTHORIZED, "Not authorized to access this route");
    };

    match user_service::list_user_orders(&state, user.id).await {
        Ok(orders) => {
            (StatusCode::OK, Json(json!({ "success": true, "data": orders }))).into_response()
        }
        Err(e) => error(StatusCode::INTERNAL_SERVER_ERROR, &e),
    }
}

// GET /api/users/library
pub async fn get_library(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
) -> Response {
    let Some(Extension(user)) = user else {
        return error(StatusCode::UNAUTHORIZED, "Not authorized to access this route");
    };

    match user_service::build_library(&state, user.id).await {
        Ok(library) => {
            if library.is_empty() {
                return error(StatusCode::NOT_FOUND, "No purchased books found in your library");
            }
            (StatusCode::OK, Json(json!({ "success": true, "data": library }))).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, user = %user.id, "library lookup failed");
            error(StatusCode::INTERNAL_SERVER_ERROR, &e)
        }
    }
}
