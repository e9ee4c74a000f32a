use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use crate::handlers::order;
use crate::middleware::auth::require_admin;
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/admin/orders", get(order::list_orders))
        .route("/admin/orders/{id}", get(order::get_order))
        .route("/admin/orders/{id}/complete", post(order::complete_order))
        .route("/admin/orders/{id}/cancel", post(order::cancel_order))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
}
