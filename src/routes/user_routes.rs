use axum::{routing::get, Router};

use crate::{controllers::user_controller, AppState};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/users/me", get(user_controller::get_me))
        .route("/api/users/orders", get(user_controller::get_my_orders))
        .route("/api/users/library", get(user_controller::get_library))
}
