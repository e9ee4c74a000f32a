// src/handlers/cart.rs
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::cart::session::ShopperSession;
use crate::dtos::cart::{AddToCartRequest, AddToCartResponse, CartResponse};
use crate::error::AppError;
use crate::state::AppState;

/// JSON body plus a refreshed `cart_session` cookie.
pub fn session_response<T: Serialize>(state: &AppState, session_id: Uuid, body: T) -> Response {
    let cookie = state.sessions.cookie(session_id);
    ([(header::SET_COOKIE, cookie)], Json(body)).into_response()
}

pub fn cart_view(session: &ShopperSession) -> CartResponse {
    CartResponse::new(&session.cart, &session.checkout)
}

// GET /cart
#[instrument(skip(state, headers))]
pub async fn get_cart(State(state): State<AppState>, headers: HeaderMap) -> Response {
    match state.sessions.peek(&headers) {
        Some((session_id, handle)) => {
            let session = handle.lock().await;
            session_response(&state, session_id, cart_view(&session))
        }
        None => Json(cart_view(&ShopperSession::default())).into_response(),
    }
}

// POST /cart/items
#[instrument(skip(state, headers), fields(product_id = req.id))]
pub async fn add_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<AddToCartRequest>,
) -> Result<Response, AppError> {
    let product = state.api.get_product(req.id).await?;

    let (session_id, handle) = state.sessions.resolve(&headers);
    let mut session = handle.lock().await;
    let added = session.cart.add(&product);
    if !added {
        info!("Stock ceiling reached, item not added");
    }

    let body = AddToCartResponse {
        added,
        available_stock: session.cart.available_stock(&product),
        cart: cart_view(&session),
    };
    Ok(session_response(&state, session_id, body))
}

// DELETE /cart/items/{id}
#[instrument(skip(state, headers))]
pub async fn remove_item(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let (session_id, handle) = state.sessions.resolve(&headers);
    let mut session = handle.lock().await;
    if !session.cart.remove(id) {
        return Err(AppError::not_found("Product is not in the cart"));
    }
    Ok(session_response(&state, session_id, cart_view(&session)))
}

// DELETE /cart
#[instrument(skip(state, headers))]
pub async fn clear_cart(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (session_id, handle) = state.sessions.resolve(&headers);
    let mut session = handle.lock().await;
    session.cart.clear();
    session_response(&state, session_id, cart_view(&session))
}
