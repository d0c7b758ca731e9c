use axum::{
    extract::{Extension, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::{models::CurrentUser, services::seller_service, AppState};

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "success": false, "error": message }))).into_response()
}

#[derive(Deserialize)]
pub struct DashboardQuery {
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
}

// GET /api/seller/dashboard?startDate=...&endDate=...
pub async fn get_seller_dashboard(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    Query(query): Query<DashboardQuery>,
) -> Response {
    let Some(Extension(user)) = user else {
        return error(StatusCode::UNAUTHORIZED, "Not authorized to access this route");
    };

    match seller_service::build_dashboard(
        &state,
        user.id,
        query.start_date.as_deref(),
        query.end_date.as_deref(),
        Utc::now(),
    )
    .await
    {
        Ok(dashboard) => (StatusCode::OK, Json(dashboard)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, seller = %user.id, "seller dashboard failed");
            error(StatusCode::INTERNAL_SERVER_ERROR, &e)
        }
    }
}
