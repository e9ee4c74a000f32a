use tracing::{info, instrument, warn};

use crate::backend::StoreApi;
use crate::catalog::ALL_CATEGORIES;
use crate::dtos::product::AdminProductSort;
use crate::error::AppError;
use crate::models::product::Product;

#[derive(Debug, Clone, Default)]
pub struct ProductsView {
    products: Vec<Product>,
}

impl ProductsView {
    pub async fn load(api: &dyn StoreApi) -> Result<Self, AppError> {
        Ok(Self {
            products: api.list_products().await?,
        })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// `BajoStock` keeps only products under the low-stock threshold, in backend order.
    pub fn filtered(&self, sort: AdminProductSort, category: Option<&str>) -> Vec<&Product> {
        let mut rows: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| sort != AdminProductSort::BajoStock || p.is_low_stock())
            .filter(|p| match category {
                None | Some(ALL_CATEGORIES) => true,
                Some(wanted) => p.category.as_deref() == Some(wanted),
            })
            .collect();

        match sort {
            AdminProductSort::Recientes => rows.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            AdminProductSort::Antiguos => rows.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            AdminProductSort::BajoStock => {}
        }
        rows
    }

    #[instrument(skip(self, api))]
    pub async fn delete(&mut self, api: &dyn StoreApi, id: i64) -> Result<(), AppError> {
        if let Err(e) = api.delete_product(id).await {
            warn!(error = %e, "Product delete failed");
            return Err(e);
        }
        self.products.retain(|p| p.id != id);
        info!("Product deleted");
        Ok(())
    }
}
