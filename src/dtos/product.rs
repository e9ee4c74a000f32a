// src/dtos/product.rs
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::error::AppError;
use crate::models::product::{Product, STORE_CATEGORIES};

#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Raw product form as submitted by the admin console.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub nombre: String,
    pub descripcion: String,
    pub precio: String,
    pub stock: String,
    pub categoria: String,
    pub descuento: String,
    pub imagen: Option<ImageUpload>,
}

/// Product form after validation, ready to be sent as multipart.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPayload {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: u32,
    pub category: String,
    pub discount: Option<f64>,
    pub image: Option<ImageUpload>,
}

impl ProductForm {
    pub fn set_field(&mut self, name: &str, value: String) {
        match name {
            "nombre" => self.nombre = value,
            "descripcion" => self.descripcion = value,
            "precio" => self.precio = value,
            "stock" => self.stock = value,
            "categoria" => self.categoria = value,
            "descuento" => self.descuento = value,
            _ => {}
        }
    }

    pub fn validate(self) -> Result<ProductPayload, AppError> {
        let name = self.nombre.trim().to_string();
        if name.is_empty() {
            return Err(AppError::validation("Product name is required"));
        }

        let price: f64 = self
            .precio
            .trim()
            .parse()
            .map_err(|_| AppError::validation("Price must be a number"))?;
        if !price.is_finite() || price < 0.0 {
            return Err(AppError::validation("Price cannot be negative"));
        }

        let stock: u32 = self
            .stock
            .trim()
            .parse()
            .map_err(|_| AppError::validation("Stock must be a whole number"))?;

        let category = self.categoria.trim().to_string();
        if !STORE_CATEGORIES.contains(&category.as_str()) {
            return Err(AppError::validation(format!("Unknown category '{category}'")));
        }

        let discount = match self.descuento.trim() {
            "" => None,
            raw => {
                let d: f64 = raw
                    .parse()
                    .map_err(|_| AppError::validation("Discount must be a number"))?;
                if !(0.0..=100.0).contains(&d) {
                    return Err(AppError::validation("Discount must be between 0 and 100"));
                }
                Some(d)
            }
        };

        Ok(ProductPayload {
            name,
            description: self.descripcion.trim().to_string(),
            price,
            stock,
            category,
            discount,
            image: self.imagen,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdminProductSort {
    #[default]
    Recientes,
    Antiguos,
    BajoStock,
}

#[derive(Debug, Default, Deserialize)]
pub struct AdminProductQuery {
    pub orden: Option<AdminProductSort>,
    pub categoria: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AdminProductRow {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: u32,
    pub low_stock: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<&Product> for AdminProductRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            category: product
                .category
                .clone()
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| "Sin categoría".to_string()),
            price: product.price,
            stock: product.stock,
            low_stock: product.is_low_stock(),
            created_at: product.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AdminProductList {
    pub categories: &'static [&'static str],
    pub products: Vec<AdminProductRow>,
}

/// Edit form pre-fill, including the current image so it can be shown.
#[derive(Debug, Serialize)]
pub struct ProductFormResponse {
    pub nombre: String,
    pub descripcion: String,
    pub precio: f64,
    pub stock: u32,
    pub categoria: String,
    pub descuento: Option<f64>,
    pub imagen_actual: String,
}

impl From<&Product> for ProductFormResponse {
    fn from(product: &Product) -> Self {
        Self {
            nombre: product.name.clone(),
            descripcion: product.description.clone().unwrap_or_default(),
            precio: product.price,
            stock: product.stock,
            categoria: product.category.clone().unwrap_or_default(),
            descuento: product.discount,
            imagen_actual: product.image_url.clone().unwrap_or_default(),
        }
    }
}
