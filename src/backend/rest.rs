// src/backend/rest.rs
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response};
use serde_json::Value;
use tracing::{debug, error, instrument, warn};

use crate::dtos::order::{CreateOrderRequest, UpdateOrderStatusRequest};
use crate::dtos::product::ProductPayload;
use crate::dtos::user::{LoginRequest, UserForm};
use crate::error::AppError;
use crate::models::order::{Order, OrderDetail, OrderStatus};
use crate::models::product::Product;
use crate::models::user::User;

use super::{LoginOutcome, StoreApi};

/// reqwest-backed client for the store's REST API.
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("minimarket-storefront/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, AppError> {
        let response = request.send().await.map_err(|e| {
            error!(error = %e, "Backend request failed");
            AppError::from(e)
        })?;
        ensure_success(response).await
    }
}

async fn ensure_success(response: Response) -> Result<Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = backend_message(&body)
        .unwrap_or_else(|| format!("Backend responded with {status}"));
    warn!(%status, %message, "Backend rejected request");
    Err(AppError::from_backend(status, message))
}

/// Pulls a human-readable message out of a backend error body.
pub fn backend_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["mensaje", "error", "message"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

/// Keeps the rows that decode; a body that is not an array yields nothing.
fn decode_list<T: serde::de::DeserializeOwned>(value: Value, what: &str) -> Vec<T> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match serde_json::from_value(item) {
                Ok(row) => Some(row),
                Err(e) => {
                    warn!(error = %e, "Skipping undecodable {what}");
                    None
                }
            })
            .collect(),
        _ => {
            warn!("Expected a list of {what}, treating response as empty");
            Vec::new()
        }
    }
}

/// Any failed login is a 401; the backend's own message wins when it sent one.
fn login_rejection(body: &str) -> AppError {
    AppError::unauthorized(
        backend_message(body).unwrap_or_else(|| "Credenciales incorrectas".to_string()),
    )
}

fn created_id(value: &Value) -> Option<i64> {
    value
        .get("id")
        .or_else(|| value.pointer("/pedido/id"))
        .and_then(Value::as_i64)
}

fn product_form(payload: ProductPayload) -> Result<Form, AppError> {
    let mut form = Form::new()
        .text("nombre", payload.name)
        .text("descripcion", payload.description)
        .text("precio", payload.price.to_string())
        .text("stock", payload.stock.to_string())
        .text("categoria", payload.category);

    if let Some(discount) = payload.discount {
        form = form.text("descuento", discount.to_string());
    }

    if let Some(image) = payload.image {
        let mut part = Part::bytes(image.bytes).file_name(image.file_name);
        if let Some(content_type) = image.content_type {
            part = part.mime_str(&content_type)?;
        }
        form = form.part("imagen", part);
    }
    Ok(form)
}

#[async_trait]
impl StoreApi for BackendClient {
    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        let response = self.send(self.http.get(self.url("productos"))).await?;
        let body: Value = response.json().await?;
        Ok(decode_list(body, "products"))
    }

    #[instrument(skip(self))]
    async fn get_product(&self, id: i64) -> Result<Product, AppError> {
        let response = self.send(self.http.get(self.url(&format!("productos/{id}")))).await?;
        Ok(response.json().await?)
    }

    #[instrument(skip(self, payload), fields(name = %payload.name))]
    async fn create_product(&self, payload: ProductPayload) -> Result<(), AppError> {
        let form = product_form(payload)?;
        self.send(self.http.post(self.url("productos")).multipart(form)).await?;
        debug!("Product created");
        Ok(())
    }

    #[instrument(skip(self, payload))]
    async fn update_product(&self, id: i64, payload: ProductPayload) -> Result<(), AppError> {
        let form = product_form(payload)?;
        self.send(self.http.put(self.url(&format!("productos/{id}"))).multipart(form)).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_product(&self, id: i64) -> Result<(), AppError> {
        self.send(self.http.delete(self.url(&format!("productos/{id}")))).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_orders(&self) -> Result<Vec<Order>, AppError> {
        let response = self.send(self.http.get(self.url("pedidos"))).await?;
        let body: Value = response.json().await?;
        Ok(decode_list(body, "orders"))
    }

    #[instrument(skip(self))]
    async fn get_order(&self, id: i64) -> Result<OrderDetail, AppError> {
        let response = self.send(self.http.get(self.url(&format!("pedidos/{id}")))).await?;
        Ok(response.json().await?)
    }

    #[instrument(skip(self, order), fields(lines = order.products.len()))]
    async fn create_order(&self, order: &CreateOrderRequest) -> Result<Option<i64>, AppError> {
        let response = self.send(self.http.post(self.url("pedidos")).json(order)).await?;
        // Some deployments answer with an empty body.
        let body = response.text().await?;
        Ok(serde_json::from_str::<Value>(&body).ok().as_ref().and_then(created_id))
    }

    #[instrument(skip(self))]
    async fn update_order_status(&self, id: i64, status: OrderStatus) -> Result<(), AppError> {
        let body = UpdateOrderStatusRequest { status };
        self.send(self.http.put(self.url(&format!("pedidos/{id}"))).json(&body)).await?;
        Ok(())
    }

    #[instrument(skip(self, credentials), fields(email = %credentials.correo))]
    async fn login(&self, credentials: &LoginRequest) -> Result<LoginOutcome, AppError> {
        let response = self
            .http
            .post(self.url("usuarios/login"))
            .json(credentials)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Login request failed");
                AppError::from(e)
            })?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            warn!(%status, "Login rejected");
            return Err(login_rejection(&body));
        }

        Ok(LoginOutcome {
            email: credentials.correo.clone(),
            message: backend_message(&body),
        })
    }

    #[instrument(skip(self))]
    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let response = self.send(self.http.get(self.url("usuarios/listar"))).await?;
        let body: Value = response.json().await?;
        Ok(decode_list(body, "users"))
    }

    #[instrument(skip(self))]
    async fn get_user(&self, id: i64) -> Result<User, AppError> {
        let response = self.send(self.http.get(self.url(&format!("usuarios/{id}")))).await?;
        Ok(response.json().await?)
    }

    #[instrument(skip(self, form), fields(email = %form.correo))]
    async fn register_user(&self, form: &UserForm) -> Result<(), AppError> {
        self.send(self.http.post(self.url("usuarios/registrar")).json(form)).await?;
        Ok(())
    }

    #[instrument(skip(self, form))]
    async fn update_user(&self, id: i64, form: &UserForm) -> Result<(), AppError> {
        self.send(self.http.put(self.url(&format!("usuarios/{id}"))).json(form)).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, id: i64) -> Result<(), AppError> {
        self.send(self.http.delete(self.url(&format!("usuarios/{id}")))).await?;
        Ok(())
    }
}
