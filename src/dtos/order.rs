// src/dtos/order.rs
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::models::order::{Order, OrderDetail, OrderStatus, PaymentMethod, StatusAction};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLineRequest {
    pub id: i64,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
}

/// Body of `POST /pedidos`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateOrderRequest {
    #[serde(rename = "nombreCliente")]
    pub customer_name: String,
    #[serde(rename = "metodoPago")]
    pub payment_method: PaymentMethod,
    #[serde(rename = "productos")]
    pub products: Vec<OrderLineRequest>,
}

/// Body of `PUT /pedidos/{id}`.
#[derive(Debug, Serialize)]
pub struct UpdateOrderStatusRequest {
    #[serde(rename = "estado")]
    pub status: OrderStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusFilter {
    #[default]
    EnProceso,
    Completado,
    Cancelado,
}

impl StatusFilter {
    pub fn status(&self) -> OrderStatus {
        match self {
            StatusFilter::EnProceso => OrderStatus::InProcess,
            StatusFilter::Completado => OrderStatus::Completed,
            StatusFilter::Cancelado => OrderStatus::Cancelled,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    pub estado: Option<StatusFilter>,
}

#[derive(Debug, Serialize)]
pub struct OrderSummary {
    pub id: i64,
    pub customer_name: String,
    pub payment_method: PaymentMethod,
    pub total: f64,
    pub status: OrderStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub closed: bool,
    pub actions: &'static [StatusAction],
}

impl From<&Order> for OrderSummary {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            customer_name: order.customer_name.clone(),
            payment_method: order.payment_method,
            total: order.total,
            status: order.status,
            created_at: order.created_at,
            closed: order.status.is_terminal(),
            actions: order.status.available_actions(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrderListResponse {
    pub status: OrderStatus,
    pub count: usize,
    pub orders: Vec<OrderSummary>,
}

#[derive(Debug, Serialize)]
pub struct OrderLineResponse {
    pub product_id: i64,
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub subtotal: f64,
}

#[derive(Debug, Serialize)]
pub struct OrderDetailResponse {
    #[serde(flatten)]
    pub summary: OrderSummary,
    pub lines: Vec<OrderLineResponse>,
}

impl From<OrderDetail> for OrderDetailResponse {
    fn from(detail: OrderDetail) -> Self {
        Self {
            summary: OrderSummary::from(&detail.order),
            lines: detail
                .products
                .iter()
                .map(|p| OrderLineResponse {
                    product_id: p.id,
                    name: p.name.clone(),
                    quantity: p.line.quantity,
                    unit_price: p.unit_price,
                    subtotal: p.subtotal(),
                })
                .collect(),
        }
    }
}
