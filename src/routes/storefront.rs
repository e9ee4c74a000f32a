use axum::{
    routing::{get, post, put, delete},
    Router,
};
use crate::handlers::{cart, catalog, checkout};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/catalog", get(catalog::get_catalog))
        .route("/cart", get(cart::get_cart).delete(cart::clear_cart))
        .route("/cart/items", post(cart::add_item))
        .route("/cart/items/{id}", delete(cart::remove_item))
        .route("/checkout/customer", put(checkout::set_customer))
        .route("/checkout/open", post(checkout::open_payment))
        .route("/checkout/payment", post(checkout::select_payment))
        .route("/checkout/qr/confirm", post(checkout::confirm_qr))
        .route("/checkout/cancel", post(checkout::cancel))
}
