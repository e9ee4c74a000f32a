use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use super::de::{flexible_f64, flexible_opt_f64, flexible_u32, lenient_timestamp};

pub const PLACEHOLDER_IMAGE: &str = "/product-placeholder.png";
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Categories the store stocks; admin forms only accept these labels.
pub const STORE_CATEGORIES: [&str; 12] = [
    "Bebidas alcohólica",
    "Bebidas no alcohólica",
    "Snacks",
    "Confitería",
    "Abarrotes",
    "Lácteos",
    "Cárnicos",
    "Cárnicos congelados",
    "Verduras",
    "Productos de aseo",
    "Papelería",
    "Productos de aseo de hogar",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio", deserialize_with = "flexible_f64")]
    pub price: f64,
    #[serde(rename = "descuento", default, deserialize_with = "flexible_opt_f64")]
    pub discount: Option<f64>,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "flexible_u32")]
    pub stock: u32,
    #[serde(rename = "categoria", default)]
    pub category: Option<String>,
    #[serde(rename = "imagenUrl", default)]
    pub image_url: Option<String>,
    #[serde(rename = "createdAt", default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Price after discount, rounded to cents.
    pub fn display_price(&self) -> f64 {
        match self.discount {
            Some(d) if d > 0.0 => round2(self.price - self.price * d / 100.0),
            _ => round2(self.price),
        }
    }

    pub fn has_discount(&self) -> bool {
        self.discount.is_some_and(|d| d > 0.0)
    }

    pub fn is_low_stock(&self) -> bool {
        self.stock < LOW_STOCK_THRESHOLD
    }

    pub fn image_or_placeholder(&self) -> &str {
        match self.image_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url,
            _ => PLACEHOLDER_IMAGE,
        }
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
pub fn sample(id: i64, name: &str, price: f64, stock: u32) -> Product {
    Product {
        id,
        name: name.to_string(),
        price,
        discount: None,
        description: None,
        stock,
        category: None,
        image_url: None,
        created_at: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn discount_reduces_display_price() {
        let mut p = sample(1, "Leche", 2.99, 5);
        p.discount = Some(15.0);
        // 2.99 * 0.85 = 2.5415
        assert_eq!(p.display_price(), 2.54);
        assert!(p.has_discount());
    }

    #[test]
    fn zero_or_missing_discount_keeps_price() {
        let mut p = sample(1, "Pan", 0.25, 5);
        assert_eq!(p.display_price(), 0.25);
        p.discount = Some(0.0);
        assert_eq!(p.display_price(), 0.25);
        assert!(!p.has_discount());
    }

    #[test]
    fn decodes_backend_product() {
        let p: Product = serde_json::from_value(json!({
            "id": 4,
            "nombre": "Coca Cola 1L",
            "precio": "1.25",
            "descripcion": null,
            "stock": 12,
            "categoria": "Bebidas no alcohólica",
            "imagenUrl": "",
            "createdAt": "2025-05-10T08:30:00.000Z"
        }))
        .unwrap();
        assert_eq!(p.price, 1.25);
        assert_eq!(p.stock, 12);
        assert_eq!(p.image_or_placeholder(), PLACEHOLDER_IMAGE);
        assert!(!p.is_low_stock());
    }

    #[test]
    fn numeric_created_at_still_decodes() {
        let p: Product = serde_json::from_value(json!({
            "id": 1,
            "nombre": "Leche",
            "precio": "1.00",
            "stock": 3,
            "createdAt": 1717000000000i64
        }))
        .unwrap();
        assert!(p.created_at.is_some());

        let p: Product = serde_json::from_value(json!({
            "id": 2,
            "nombre": "Pan",
            "precio": 0.25,
            "createdAt": {"fecha": "hoy"}
        }))
        .unwrap();
        assert_eq!(p.created_at, None);
    }
}
