use axum::{middleware, routing::get, Router};

use crate::{controllers::seller_controller, AppState};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    let seller = Router::new()
        .route(
            "/api/seller/dashboard",
            get(seller_controller::get_seller_dashboard),
        )
        .route_layer(middleware::from_fn(crate::auth::require_seller));

    router.merge(seller)
}
