//! In-memory `StoreApi` for tests.
//!
//! Records every call by name so tests can assert which backend requests were made,
//! and can be told to fail the next call of a given name.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use http::StatusCode;

use crate::backend::{LoginOutcome, StoreApi};
use crate::dtos::order::CreateOrderRequest;
use crate::dtos::product::ProductPayload;
use crate::dtos::user::{LoginRequest, UserForm};
use crate::error::AppError;
use crate::models::order::{Order, OrderDetail, OrderStatus};
use crate::models::product::Product;
use crate::models::user::User;

#[derive(Default)]
struct Records {
    products: Vec<Product>,
    orders: Vec<Order>,
    users: Vec<User>,
    created_orders: Vec<CreateOrderRequest>,
    saved_products: Vec<ProductPayload>,
    saved_users: Vec<UserForm>,
    calls: Vec<&'static str>,
    failing: HashSet<&'static str>,
}

#[derive(Default)]
pub struct MockStore {
    records: Mutex<Records>,
}

impl MockStore {
    pub fn with_products(products: Vec<Product>) -> Self {
        let store = Self::default();
        store.records.lock().unwrap().products = products;
        store
    }

    pub fn with_orders(orders: Vec<Order>) -> Self {
        let store = Self::default();
        store.records.lock().unwrap().orders = orders;
        store
    }

    pub fn with_users(users: Vec<User>) -> Self {
        let store = Self::default();
        store.records.lock().unwrap().users = users;
        store
    }

    pub fn fail_next(&self, call: &'static str) {
        self.records.lock().unwrap().failing.insert(call);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.records.lock().unwrap().calls.clone()
    }

    pub fn created_orders(&self) -> Vec<CreateOrderRequest> {
        self.records.lock().unwrap().created_orders.clone()
    }

    pub fn saved_products(&self) -> Vec<ProductPayload> {
        self.records.lock().unwrap().saved_products.clone()
    }

    pub fn saved_users(&self) -> Vec<UserForm> {
        self.records.lock().unwrap().saved_users.clone()
    }

    /// Logs the call and hands back the records, unless a failure was queued for it.
    fn enter(&self, call: &'static str) -> Result<std::sync::MutexGuard<'_, Records>, AppError> {
        let mut records = self.records.lock().unwrap();
        records.calls.push(call);
        if records.failing.remove(call) {
            return Err(AppError::from_backend(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("{call} failed"),
            ));
        }
        Ok(records)
    }
}

fn missing(what: &str, id: i64) -> AppError {
    AppError::from_backend(StatusCode::NOT_FOUND, format!("{what} {id} no encontrado"))
}

#[async_trait]
impl StoreApi for MockStore {
    async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        Ok(self.enter("list_products")?.products.clone())
    }

    async fn get_product(&self, id: i64) -> Result<Product, AppError> {
        let records = self.enter("get_product")?;
        records.products.iter().find(|p| p.id == id).cloned().ok_or_else(|| missing("Producto", id))
    }

    async fn create_product(&self, payload: ProductPayload) -> Result<(), AppError> {
        self.enter("create_product")?.saved_products.push(payload);
        Ok(())
    }

    async fn update_product(&self, id: i64, payload: ProductPayload) -> Result<(), AppError> {
        let mut records = self.enter("update_product")?;
        if !records.products.iter().any(|p| p.id == id) {
            return Err(missing("Producto", id));
        }
        records.saved_products.push(payload);
        Ok(())
    }

    async fn delete_product(&self, id: i64) -> Result<(), AppError> {
        let mut records = self.enter("delete_product")?;
        let before = records.products.len();
        records.products.retain(|p| p.id != id);
        if records.products.len() == before {
            return Err(missing("Producto", id));
        }
        Ok(())
    }

    async fn list_orders(&self) -> Result<Vec<Order>, AppError> {
        Ok(self.enter("list_orders")?.orders.clone())
    }

    async fn get_order(&self, id: i64) -> Result<OrderDetail, AppError> {
        let records = self.enter("get_order")?;
        let order = records.orders.iter().find(|o| o.id == id).cloned().ok_or_else(|| missing("Pedido", id))?;
        Ok(OrderDetail { order, products: Vec::new() })
    }

    async fn create_order(&self, order: &CreateOrderRequest) -> Result<Option<i64>, AppError> {
        let mut records = self.enter("create_order")?;
        records.created_orders.push(order.clone());
        Ok(Some(records.created_orders.len() as i64))
    }

    async fn update_order_status(&self, id: i64, status: OrderStatus) -> Result<(), AppError> {
        let mut records = self.enter("update_order_status")?;
        let order = records.orders.iter_mut().find(|o| o.id == id).ok_or_else(|| missing("Pedido", id))?;
        order.status = status;
        Ok(())
    }

    async fn login(&self, credentials: &LoginRequest) -> Result<LoginOutcome, AppError> {
        let records = self.enter("login")?;
        let known = records.users.iter().any(|u| u.email == credentials.correo);
        if !known || credentials.contrasena.is_empty() {
            return Err(AppError::unauthorized("Credenciales incorrectas"));
        }
        Ok(LoginOutcome { email: credentials.correo.clone(), message: None })
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        Ok(self.enter("list_users")?.users.clone())
    }

    async fn get_user(&self, id: i64) -> Result<User, AppError> {
        let records = self.enter("get_user")?;
        records.users.iter().find(|u| u.id == id).cloned().ok_or_else(|| missing("Usuario", id))
    }

    async fn register_user(&self, form: &UserForm) -> Result<(), AppError> {
        self.enter("register_user")?.saved_users.push(form.clone());
        Ok(())
    }

    async fn update_user(&self, id: i64, form: &UserForm) -> Result<(), AppError> {
        let mut records = self.enter("update_user")?;
        if !records.users.iter().any(|u| u.id == id) {
            return Err(missing("Usuario", id));
        }
        records.saved_users.push(form.clone());
        Ok(())
    }

    async fn delete_user(&self, id: i64) -> Result<(), AppError> {
        let mut records = self.enter("delete_user")?;
        let before = records.users.len();
        records.users.retain(|u| u.id != id);
        if records.users.len() == before {
            return Err(missing("Usuario", id));
        }
        Ok(())
    }
}
