use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::get,
    Router,
};
use crate::handlers::product::{
    list_products, get_product, create_product, update_product, delete_product
};
use crate::middleware::auth::require_admin;
use crate::state::AppState;

// Product images travel inside the multipart body.
const MAX_UPLOAD_BYTES: usize = 8 * 1024 * 1024;

pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/admin/products", get(list_products).post(create_product))
        .route("/admin/products/{id}", get(get_product).put(update_product).delete(delete_product))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
}
