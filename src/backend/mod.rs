//! Seam between the storefront and the REST backend that owns every record.

pub mod rest;

use async_trait::async_trait;

use crate::dtos::order::CreateOrderRequest;
use crate::dtos::product::ProductPayload;
use crate::dtos::user::{LoginRequest, UserForm};
use crate::error::AppError;
use crate::models::order::{Order, OrderDetail, OrderStatus};
use crate::models::product::Product;
use crate::models::user::User;

pub use self::rest::BackendClient;

#[derive(Debug, Clone, PartialEq)]
pub struct LoginOutcome {
    pub email: String,
    pub message: Option<String>,
}

#[async_trait]
pub trait StoreApi: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>, AppError>;
    async fn get_product(&self, id: i64) -> Result<Product, AppError>;
    async fn create_product(&self, payload: ProductPayload) -> Result<(), AppError>;
    async fn update_product(&self, id: i64, payload: ProductPayload) -> Result<(), AppError>;
    async fn delete_product(&self, id: i64) -> Result<(), AppError>;

    async fn list_orders(&self) -> Result<Vec<Order>, AppError>;
    async fn get_order(&self, id: i64) -> Result<OrderDetail, AppError>;
    /// Returns the new order id when the backend reports one.
    async fn create_order(&self, order: &CreateOrderRequest) -> Result<Option<i64>, AppError>;
    async fn update_order_status(&self, id: i64, status: OrderStatus) -> Result<(), AppError>;

    async fn login(&self, credentials: &LoginRequest) -> Result<LoginOutcome, AppError>;
    async fn list_users(&self) -> Result<Vec<User>, AppError>;
    async fn get_user(&self, id: i64) -> Result<User, AppError>;
    async fn register_user(&self, form: &UserForm) -> Result<(), AppError>;
    async fn update_user(&self, id: i64, form: &UserForm) -> Result<(), AppError>;
    async fn delete_user(&self, id: i64) -> Result<(), AppError>;
}
