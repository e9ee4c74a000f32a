// src/handlers/catalog.rs
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, instrument};

use crate::cart::store::CartStore;
use crate::catalog::{CatalogFilter, CategoryBar, CategorySet, ALL_CATEGORIES};
use crate::dtos::catalog::{CatalogQuery, CatalogResponse, ProductCard};
use crate::error::AppError;
use crate::handlers::cart::session_response;
use crate::state::AppState;

// GET /catalog - Filtered product cards for the storefront
#[instrument(skip(state, headers))]
pub async fn get_catalog(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<CatalogQuery>,
) -> Result<Response, AppError> {
    let products = state.api.list_products().await?;
    let categories = CategorySet::from_products(&products);
    let active_category = query
        .categoria
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| ALL_CATEGORIES.to_string());

    let filter = CatalogFilter {
        category: Some(active_category.clone()),
        search: query.search.unwrap_or_default(),
        sort: query.orden.unwrap_or_default(),
    };

    let session = state.sessions.peek(&headers);
    let guard = match &session {
        Some((_, handle)) => Some(handle.lock().await),
        None => None,
    };
    let empty = CartStore::new();
    let cart = guard.as_ref().map_or(&empty, |s| &s.cart);

    let cards: Vec<ProductCard> = filter
        .apply(&products)
        .into_iter()
        .map(|p| ProductCard::project(p, cart))
        .collect();
    debug!(shown = cards.len(), total = products.len(), "Catalog filtered");

    let body = CatalogResponse {
        active_category,
        categories: CategoryBar::new(&categories).at(query.offset.unwrap_or(0)).window(),
        products: cards,
        cart_items: cart.total_items(),
    };
    Ok(match &session {
        Some((session_id, _)) => session_response(&state, *session_id, body),
        None => Json(body).into_response(),
    })
}
