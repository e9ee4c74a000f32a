use axum::{Router, routing::{post, get}, middleware};
use crate::state::AppState;
use crate::handlers::auth::{login, logout};
use crate::handlers::user::{list_users, get_user, create_user, update_user, delete_user};
use crate::middleware::auth::require_admin;

pub fn routes(state: &AppState) -> Router<AppState> {
    let open = Router::new()
        .route("/admin/login", post(login))
        .route("/admin/logout", post(logout));

    let protected = Router::new()
        .route("/admin/users", get(list_users).post(create_user))
        .route("/admin/users/{id}", get(get_user).put(update_user).delete(delete_user))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    open.merge(protected)
}
