use serde::{Deserialize, Serialize};

use crate::cart::store::{CartLine, CartStore};
use crate::checkout::{CheckoutFlow, CheckoutStage};

#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct CartLineResponse {
    #[serde(flatten)]
    pub line: CartLine,
    pub line_total: f64,
}

#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub lines: Vec<CartLineResponse>,
    pub total_items: u32,
    pub total_price: f64,
    pub stage: CheckoutStage,
    pub customer_name: String,
    pub last_error: Option<String>,
}

impl CartResponse {
    pub fn new(cart: &CartStore, checkout: &CheckoutFlow) -> Self {
        Self {
            lines: cart
                .lines()
                .iter()
                .map(|line| CartLineResponse {
                    line: line.clone(),
                    line_total: line.line_total(),
                })
                .collect(),
            total_items: cart.total_items(),
            total_price: cart.total_price(),
            stage: checkout.stage(),
            customer_name: checkout.customer_name().to_string(),
            last_error: checkout.last_error().map(str::to_string),
        }
    }
}

/// Outcome of `POST /cart/items`; `added` is false when the stock ceiling was reached.
#[derive(Debug, Serialize)]
pub struct AddToCartResponse {
    pub added: bool,
    pub available_stock: u32,
    pub cart: CartResponse,
}
