use serde::{Deserialize, Serialize};

use crate::checkout::OrderReceipt;
use crate::dtos::cart::CartResponse;
use crate::models::order::PaymentMethod;

#[derive(Debug, Deserialize)]
pub struct CustomerRequest {
    pub nombre: String,
}

#[derive(Debug, Deserialize)]
pub struct PaymentRequest {
    pub metodo: PaymentMethod,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub message: String,
    pub receipt: Option<OrderReceipt>,
    pub cart: CartResponse,
}
