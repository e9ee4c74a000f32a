// src/checkout.rs
//! Order review flow: payment method selection, optional QR confirmation, and the
//! single create-order call that turns the cart into an order.

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::backend::StoreApi;
use crate::cart::store::CartStore;
use crate::dtos::order::CreateOrderRequest;
use crate::error::AppError;
use crate::models::order::PaymentMethod;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStage {
    #[default]
    Idle,
    PaymentMethodSelection,
    QrConfirmation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderReceipt {
    pub order_id: Option<i64>,
    pub customer_name: String,
    pub payment_method: PaymentMethod,
    pub total: f64,
    pub items: u32,
}

/// What selecting a payment method led to.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentOutcome {
    Submitted(OrderReceipt),
    AwaitingQrConfirmation,
}

#[derive(Debug, Clone, Default)]
pub struct CheckoutFlow {
    stage: CheckoutStage,
    customer_name: String,
    last_error: Option<String>,
}

impl CheckoutFlow {
    pub fn stage(&self) -> CheckoutStage {
        self.stage
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn set_customer_name(&mut self, name: impl Into<String>) {
        self.customer_name = name.into();
    }

    pub fn open_payment(&mut self) -> Result<(), AppError> {
        match self.stage {
            CheckoutStage::Idle => {
                self.stage = CheckoutStage::PaymentMethodSelection;
                Ok(())
            }
            CheckoutStage::PaymentMethodSelection => Ok(()),
            CheckoutStage::QrConfirmation => {
                Err(AppError::conflict("QR confirmation already in progress"))
            }
        }
    }

    /// Closes any open modal; the cart is left as it is.
    pub fn cancel(&mut self) {
        self.stage = CheckoutStage::Idle;
    }

    /// Cash submits right away; QR transfer first moves to the confirmation step.
    pub async fn select_payment(
        &mut self,
        method: PaymentMethod,
        cart: &mut CartStore,
        api: &dyn StoreApi,
    ) -> Result<PaymentOutcome, AppError> {
        if self.stage != CheckoutStage::PaymentMethodSelection {
            return Err(AppError::conflict("Payment method selection is not open"));
        }
        match method {
            PaymentMethod::Cash => self
                .submit(PaymentMethod::Cash, cart, api)
                .await
                .map(PaymentOutcome::Submitted),
            PaymentMethod::QrTransfer => {
                self.stage = CheckoutStage::QrConfirmation;
                Ok(PaymentOutcome::AwaitingQrConfirmation)
            }
        }
    }

    pub async fn confirm_qr(
        &mut self,
        cart: &mut CartStore,
        api: &dyn StoreApi,
    ) -> Result<OrderReceipt, AppError> {
        if self.stage != CheckoutStage::QrConfirmation {
            return Err(AppError::conflict("No QR payment awaiting confirmation"));
        }
        self.submit(PaymentMethod::QrTransfer, cart, api).await
    }

    fn validate(&self, cart: &CartStore) -> Result<(), AppError> {
        if self.customer_name.trim().is_empty() {
            return Err(AppError::validation("Ingrese su nombre antes de continuar"));
        }
        if cart.is_empty() {
            return Err(AppError::validation("El carrito está vacío"));
        }
        Ok(())
    }

    /// Sends the cart as one order. On failure the stage and the cart stay as they were.
    #[instrument(skip(self, cart, api), fields(method = method.as_str()))]
    async fn submit(
        &mut self,
        method: PaymentMethod,
        cart: &mut CartStore,
        api: &dyn StoreApi,
    ) -> Result<OrderReceipt, AppError> {
        if let Err(e) = self.validate(cart) {
            warn!(error = %e, "Order rejected before submission");
            self.last_error = Some(e.to_string());
            return Err(e);
        }

        let request = CreateOrderRequest {
            customer_name: self.customer_name.trim().to_string(),
            payment_method: method,
            products: cart.order_lines(),
        };

        match api.create_order(&request).await {
            Ok(order_id) => {
                let receipt = OrderReceipt {
                    order_id,
                    customer_name: request.customer_name,
                    payment_method: method,
                    total: cart.total_price(),
                    items: cart.total_items(),
                };
                cart.clear();
                self.stage = CheckoutStage::Idle;
                self.last_error = None;
                info!(order_id = ?receipt.order_id, total = receipt.total, "Order registered");
                Ok(receipt)
            }
            Err(e) => {
                warn!(error = %e, "Order submission failed");
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }
}
