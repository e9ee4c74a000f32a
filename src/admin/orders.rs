use tracing::{info, instrument, warn};

use crate::backend::StoreApi;
use crate::error::AppError;
use crate::models::order::{Order, OrderStatus, StatusAction};

#[derive(Debug, Clone, Default)]
pub struct OrdersView {
    orders: Vec<Order>,
}

impl OrdersView {
    pub async fn load(api: &dyn StoreApi) -> Result<Self, AppError> {
        Ok(Self {
            orders: api.list_orders().await?,
        })
    }

    pub async fn refresh(&mut self, api: &dyn StoreApi) -> Result<(), AppError> {
        self.orders = api.list_orders().await?;
        Ok(())
    }

    pub fn with_status(&self, status: OrderStatus) -> Vec<&Order> {
        self.orders.iter().filter(|o| o.status == status).collect()
    }

    pub fn get(&self, id: i64) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    /// Applies a status action. The list is re-fetched only after the backend accepted
    /// the change, so the refreshed rows always reflect it.
    #[instrument(skip(self, api))]
    pub async fn apply(
        &mut self,
        api: &dyn StoreApi,
        id: i64,
        action: StatusAction,
    ) -> Result<OrderStatus, AppError> {
        let current = self
            .get(id)
            .map(|o| o.status)
            .ok_or_else(|| AppError::not_found(format!("Order {id} not found")))?;
        let next = current.apply(action)?;

        if let Err(e) = api.update_order_status(id, next).await {
            warn!(error = %e, "Order status update failed");
            return Err(e);
        }
        info!(status = next.label(), "Order status updated");
        self.refresh(api).await?;
        Ok(next)
    }
}
