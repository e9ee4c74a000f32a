// src/handlers/product.rs
use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};
use tracing::{info, instrument};

use crate::admin::products::ProductsView;
use crate::dtos::product::{
    AdminProductList, AdminProductQuery, AdminProductRow, AdminProductSort, ImageUpload,
    ProductForm, ProductFormResponse,
};
use crate::error::AppError;
use crate::middleware::auth::AdminContext;
use crate::models::product::STORE_CATEGORIES;
use crate::state::AppState;

fn malformed(e: axum::extract::multipart::MultipartError) -> AppError {
    AppError::validation(format!("Malformed form: {e}"))
}

async fn read_product_form(mut multipart: Multipart) -> Result<ProductForm, AppError> {
    let mut form = ProductForm::default();
    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "imagen" {
            let file_name = field.file_name().unwrap_or("imagen").to_string();
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await.map_err(malformed)?;
            if !bytes.is_empty() {
                form.imagen = Some(ImageUpload { file_name, content_type, bytes: bytes.to_vec() });
            }
        } else {
            let value = field.text().await.map_err(malformed)?;
            form.set_field(&name, value);
        }
    }
    Ok(form)
}

fn listing(view: &ProductsView, sort: AdminProductSort, category: Option<&str>) -> AdminProductList {
    AdminProductList {
        categories: &STORE_CATEGORIES,
        products: view.filtered(sort, category).into_iter().map(AdminProductRow::from).collect(),
    }
}

// GET /admin/products - List products with admin filters
#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<AdminProductQuery>,
) -> Result<Json<AdminProductList>, AppError> {
    let view = ProductsView::load(state.api.as_ref()).await?;
    let sort = query.orden.unwrap_or_default();
    Ok(Json(listing(&view, sort, query.categoria.as_deref())))
}

// GET /admin/products/{id} - Edit form pre-fill
#[instrument(skip(state))]
pub async fn get_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<ProductFormResponse>, AppError> {
    let product = state.api.get_product(id).await?;
    Ok(Json(ProductFormResponse::from(&product)))
}

// POST /admin/products - Create product (multipart, optional image)
#[instrument(skip(state, admin, multipart))]
pub async fn create_product(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminContext>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let payload = read_product_form(multipart).await?.validate()?;
    info!(admin = %admin.email, name = %payload.name, "Creating product");
    state.api.create_product(payload).await?;
    Ok((StatusCode::CREATED, Json(json!({ "message": "Producto registrado correctamente" }))))
}

// PUT /admin/products/{id} - Update product; the image is replaced only when sent
#[instrument(skip(state, admin, multipart))]
pub async fn update_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(admin): Extension<AdminContext>,
    multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let payload = read_product_form(multipart).await?.validate()?;
    info!(admin = %admin.email, replaces_image = payload.image.is_some(), "Updating product");
    state.api.update_product(id, payload).await?;
    Ok(Json(json!({ "message": "Producto actualizado correctamente" })))
}

// DELETE /admin/products/{id} - Delete and return the remaining rows
#[instrument(skip(state, admin))]
pub async fn delete_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(admin): Extension<AdminContext>,
) -> Result<Json<AdminProductList>, AppError> {
    let mut view = ProductsView::load(state.api.as_ref()).await?;
    view.delete(state.api.as_ref(), id).await?;
    info!(admin = %admin.email, "Product removed");
    Ok(Json(listing(&view, AdminProductSort::default(), None)))
}
