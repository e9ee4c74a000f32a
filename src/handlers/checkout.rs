// src/handlers/checkout.rs
use axum::{
    extract::State,
    http::HeaderMap,
    response::Response,
    Json,
};
use tracing::instrument;

use crate::checkout::PaymentOutcome;
use crate::dtos::checkout::{CheckoutResponse, CustomerRequest, PaymentRequest};
use crate::error::AppError;
use crate::handlers::cart::{cart_view, session_response};
use crate::state::AppState;

// PUT /checkout/customer
#[instrument(skip(state, headers, req))]
pub async fn set_customer(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CustomerRequest>,
) -> Response {
    let (session_id, handle) = state.sessions.resolve(&headers);
    let mut session = handle.lock().await;
    session.checkout.set_customer_name(req.nombre);
    session_response(&state, session_id, cart_view(&session))
}

// POST /checkout/open
#[instrument(skip(state, headers))]
pub async fn open_payment(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let (session_id, handle) = state.sessions.resolve(&headers);
    let mut session = handle.lock().await;
    session.checkout.open_payment()?;
    Ok(session_response(&state, session_id, cart_view(&session)))
}

// POST /checkout/payment
#[instrument(skip(state, headers), fields(method = req.metodo.as_str()))]
pub async fn select_payment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<PaymentRequest>,
) -> Result<Response, AppError> {
    let (session_id, handle) = state.sessions.resolve(&headers);
    let mut guard = handle.lock().await;
    let session = &mut *guard;

    let outcome = session
        .checkout
        .select_payment(req.metodo, &mut session.cart, state.api.as_ref())
        .await?;

    let (message, receipt) = match outcome {
        PaymentOutcome::Submitted(receipt) => (
            format!("Pedido registrado correctamente ({})", receipt.payment_method.as_str()),
            Some(receipt),
        ),
        PaymentOutcome::AwaitingQrConfirmation => {
            ("Escanee el código QR y confirme la transferencia".to_string(), None)
        }
    };

    let body = CheckoutResponse { message, receipt, cart: cart_view(session) };
    Ok(session_response(&state, session_id, body))
}

// POST /checkout/qr/confirm
#[instrument(skip(state, headers))]
pub async fn confirm_qr(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let (session_id, handle) = state.sessions.resolve(&headers);
    let mut guard = handle.lock().await;
    let session = &mut *guard;

    let receipt = session
        .checkout
        .confirm_qr(&mut session.cart, state.api.as_ref())
        .await?;

    let body = CheckoutResponse {
        message: format!("Pedido registrado correctamente ({})", receipt.payment_method.as_str()),
        receipt: Some(receipt),
        cart: cart_view(session),
    };
    Ok(session_response(&state, session_id, body))
}

// POST /checkout/cancel
#[instrument(skip(state, headers))]
pub async fn cancel(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (session_id, handle) = state.sessions.resolve(&headers);
    let mut session = handle.lock().await;
    session.checkout.cancel();
    session_response(&state, session_id, cart_view(&session))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::to_bytes;
    use axum::extract::State;
    use axum::http::{header, HeaderValue, StatusCode};
    use serde_json::Value;

    use crate::config::Config;
    use crate::dtos::cart::AddToCartRequest;
    use crate::handlers::cart::{add_item, get_cart};
    use crate::models::order::PaymentMethod;
    use crate::models::product::sample;
    use crate::test_support::MockStore;

    fn app(api: Arc<MockStore>) -> AppState {
        AppState::new(api, &Config::for_tests())
    }

    fn session_headers(response: &Response) -> HeaderMap {
        let set_cookie = response.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
        let pair = set_cookie.split(';').next().unwrap().to_string();
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(&pair).unwrap());
        headers
    }

    async fn json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn shopper_adds_items_and_pays_cash() {
        let api = Arc::new(MockStore::with_products(vec![sample(1, "Atún", 1.5, 1)]));
        let state = app(api.clone());

        let first = add_item(State(state.clone()), HeaderMap::new(), Json(AddToCartRequest { id: 1 }))
            .await
            .unwrap();
        let headers = session_headers(&first);
        assert_eq!(json(first).await["added"], true);

        let second = add_item(State(state.clone()), headers.clone(), Json(AddToCartRequest { id: 1 }))
            .await
            .unwrap();
        let body = json(second).await;
        assert_eq!(body["added"], false);
        assert_eq!(body["available_stock"], 0);
        assert_eq!(body["cart"]["total_items"], 1);

        let _ = set_customer(
            State(state.clone()),
            headers.clone(),
            Json(CustomerRequest { nombre: "María".into() }),
        )
        .await;
        open_payment(State(state.clone()), headers.clone()).await.unwrap();
        let paid = select_payment(
            State(state.clone()),
            headers.clone(),
            Json(PaymentRequest { metodo: PaymentMethod::Cash }),
        )
        .await
        .unwrap();
        assert_eq!(paid.status(), StatusCode::OK);
        assert_eq!(json(paid).await["receipt"]["total"], 1.5);

        let cart = json(get_cart(State(state), headers).await).await;
        assert_eq!(cart["total_items"], 0);
        assert_eq!(cart["stage"], "idle");
        assert_eq!(api.created_orders()[0].customer_name, "María");
    }

    #[tokio::test]
    async fn paying_without_opening_the_modal_conflicts() {
        let api = Arc::new(MockStore::default());
        let state = app(api.clone());
        let err = select_payment(
            State(state),
            HeaderMap::new(),
            Json(PaymentRequest { metodo: PaymentMethod::Cash }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert!(api.calls().is_empty());
    }
}
