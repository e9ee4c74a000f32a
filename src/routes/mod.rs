pub mod storefront;
pub mod products;
pub mod users;
pub mod orders;

use axum::Router;
use crate::state::AppState;

pub fn create_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(storefront::routes())
        .merge(products::routes(state))
        .merge(users::routes(state))
        .merge(orders::routes(state))
}
