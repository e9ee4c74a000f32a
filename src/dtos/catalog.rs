use serde::{Deserialize, Serialize};

use crate::catalog::{CategoryWindow, SortMode};
use crate::cart::store::CartStore;
use crate::models::product::{round2, Product};

#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    pub categoria: Option<String>,
    pub search: Option<String>,
    pub orden: Option<SortMode>,
    pub offset: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ProductCard {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub discount: Option<f64>,
    pub final_price: f64,
    pub available_stock: u32,
    pub sold_out: bool,
    pub image: String,
}

impl ProductCard {
    pub fn project(product: &Product, cart: &CartStore) -> Self {
        let available_stock = cart.available_stock(product);
        Self {
            id: product.id,
            name: product.name.clone(),
            description: product
                .description
                .clone()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| "Sin descripción".to_string()),
            price: round2(product.price),
            discount: if product.has_discount() { product.discount } else { None },
            final_price: product.display_price(),
            available_stock,
            sold_out: available_stock == 0,
            image: product.image_or_placeholder().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub active_category: String,
    pub categories: CategoryWindow,
    pub products: Vec<ProductCard>,
    pub cart_items: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product::{sample, PLACEHOLDER_IMAGE};

    #[test]
    fn card_counts_what_is_already_in_the_cart() {
        let product = sample(1, "Atún", 1.5, 3);
        let mut cart = CartStore::new();
        cart.add(&product);

        let card = ProductCard::project(&product, &cart);
        assert_eq!(card.available_stock, 2);
        assert!(!card.sold_out);

        cart.add(&product);
        cart.add(&product);
        let card = ProductCard::project(&product, &cart);
        assert_eq!(card.available_stock, 0);
        assert!(card.sold_out);
    }

    #[test]
    fn card_falls_back_for_description_and_image() {
        let mut product = sample(2, "Arroz", 1.0, 5);
        product.description = Some("   ".into());
        let card = ProductCard::project(&product, &CartStore::new());
        assert_eq!(card.description, "Sin descripción");
        assert_eq!(card.image, PLACEHOLDER_IMAGE);
        assert_eq!(card.discount, None);

        product.description = Some("Grano largo".into());
        product.image_url = Some("https://cdn.test/arroz.png".into());
        product.discount = Some(10.0);
        let card = ProductCard::project(&product, &CartStore::new());
        assert_eq!(card.description, "Grano largo");
        assert_eq!(card.image, "https://cdn.test/arroz.png");
        assert_eq!(card.discount, Some(10.0));
        assert_eq!(card.final_price, 0.9);
    }

    #[test]
    fn out_of_stock_product_is_sold_out_with_empty_cart() {
        let card = ProductCard::project(&sample(3, "Sal", 0.5, 0), &CartStore::new());
        assert!(card.sold_out);
    }
}
