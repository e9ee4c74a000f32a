use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::error::AppError;
use super::de::{flexible_f64, flexible_u32, lenient_timestamp};
use super::product::round2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "EFECTIVO")]
    Cash,
    #[serde(rename = "DEUNA")]
    QrTransfer,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "EFECTIVO",
            PaymentMethod::QrTransfer => "DEUNA",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "En proceso")]
    InProcess,
    #[serde(rename = "Completado")]
    Completed,
    #[serde(rename = "Cancelado")]
    Cancelled,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusAction {
    Complete,
    Cancel,
}

impl OrderStatus {
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::InProcess => "En proceso",
            OrderStatus::Completed => "Completado",
            OrderStatus::Cancelled => "Cancelado",
            OrderStatus::Unknown => "Desconocido",
        }
    }

    /// Actions offered for an order in this status. Only in-process orders have any.
    pub fn available_actions(&self) -> &'static [StatusAction] {
        match self {
            OrderStatus::InProcess => &[StatusAction::Complete, StatusAction::Cancel],
            _ => &[],
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    pub fn apply(self, action: StatusAction) -> Result<OrderStatus, AppError> {
        if !self.available_actions().contains(&action) {
            return Err(AppError::conflict(format!(
                "Order in status '{}' cannot be changed",
                self.label()
            )));
        }
        Ok(match action {
            StatusAction::Complete => OrderStatus::Completed,
            StatusAction::Cancel => OrderStatus::Cancelled,
        })
    }
}

/// Order row as returned by `GET /pedidos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    #[serde(rename = "nombreCliente")]
    pub customer_name: String,
    #[serde(rename = "metodoPago")]
    pub payment_method: PaymentMethod,
    #[serde(deserialize_with = "flexible_f64")]
    pub total: f64,
    #[serde(rename = "estado")]
    pub status: OrderStatus,
    #[serde(rename = "createdAt", default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderedQuantity {
    #[serde(rename = "cantidad", deserialize_with = "flexible_u32")]
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderedProduct {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio", deserialize_with = "flexible_f64")]
    pub unit_price: f64,
    #[serde(rename = "PedidoProducto")]
    pub line: OrderedQuantity,
}

impl OrderedProduct {
    pub fn subtotal(&self) -> f64 {
        round2(self.line.quantity as f64 * self.unit_price)
    }
}

/// Single order with its product lines, as returned by `GET /pedidos/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    #[serde(rename = "productos", default)]
    pub products: Vec<OrderedProduct>,
}
