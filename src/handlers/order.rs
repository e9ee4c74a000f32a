// src/handlers/order.rs
use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::instrument;

use crate::admin::orders::OrdersView;
use crate::dtos::order::{OrderDetailResponse, OrderListQuery, OrderListResponse, OrderSummary};
use crate::error::AppError;
use crate::models::order::{OrderStatus, StatusAction};
use crate::state::AppState;

fn listing(view: &OrdersView, status: OrderStatus) -> OrderListResponse {
    let orders: Vec<OrderSummary> = view.with_status(status).into_iter().map(OrderSummary::from).collect();
    OrderListResponse {
        status,
        count: orders.len(),
        orders,
    }
}

// GET /admin/orders?estado=en-proceso|completado|cancelado
#[instrument(skip(state))]
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<OrderListResponse>, AppError> {
    let view = OrdersView::load(state.api.as_ref()).await?;
    let status = query.estado.unwrap_or_default().status();
    Ok(Json(listing(&view, status)))
}

// GET /admin/orders/{id}
#[instrument(skip(state))]
pub async fn get_order(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<OrderDetailResponse>, AppError> {
    let detail = state.api.get_order(id).await?;
    Ok(Json(OrderDetailResponse::from(detail)))
}

async fn transition(state: &AppState, id: i64, action: StatusAction) -> Result<Json<OrderListResponse>, AppError> {
    let mut view = OrdersView::load(state.api.as_ref()).await?;
    view.apply(state.api.as_ref(), id, action).await?;
    Ok(Json(listing(&view, OrderStatus::InProcess)))
}

// POST /admin/orders/{id}/complete
#[instrument(skip(state))]
pub async fn complete_order(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<OrderListResponse>, AppError> {
    transition(&state, id, StatusAction::Complete).await
}

// POST /admin/orders/{id}/cancel
#[instrument(skip(state))]
pub async fn cancel_order(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<OrderListResponse>, AppError> {
    transition(&state, id, StatusAction::Cancel).await
}
