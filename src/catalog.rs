// src/catalog.rs
//! Storefront catalog: category set, category bar window, and the
//! filter/sort pipeline applied to the product list.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::product::Product;

/// Category value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "todas";
pub const VISIBLE_CATEGORIES: usize = 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Newest first.
    #[default]
    Recientes,
    /// Oldest first.
    Antiguos,
}

/// Distinct labels in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategorySet {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl CategorySet {
    pub fn insert(&mut self, label: &str) -> bool {
        if self.seen.contains(label) {
            return false;
        }
        self.seen.insert(label.to_string());
        self.order.push(label.to_string());
        true
    }

    /// Blank or missing categories are skipped.
    pub fn from_products(products: &[Product]) -> Self {
        let mut set = Self::default();
        for label in products.iter().filter_map(|p| p.category.as_deref()) {
            if !label.trim().is_empty() {
                set.insert(label);
            }
        }
        set
    }

    pub fn contains(&self, label: &str) -> bool {
        self.seen.contains(label)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.order
    }
}

/// Sliding window over the category set, `VISIBLE_CATEGORIES` wide.
#[derive(Debug, Clone)]
pub struct CategoryBar {
    categories: Vec<String>,
    start: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryWindow {
    pub visible: Vec<String>,
    pub offset: usize,
    pub show_arrows: bool,
    pub can_scroll_back: bool,
    pub can_scroll_forward: bool,
}

impl CategoryBar {
    pub fn new(categories: &CategorySet) -> Self {
        Self {
            categories: categories.as_slice().to_vec(),
            start: 0,
        }
    }

    pub fn at(mut self, offset: usize) -> Self {
        self.start = offset.min(self.max_start());
        self
    }

    fn max_start(&self) -> usize {
        self.categories.len().saturating_sub(VISIBLE_CATEGORIES)
    }

    pub fn scroll_back(&mut self) {
        self.start = self.start.saturating_sub(1);
    }

    pub fn scroll_forward(&mut self) {
        self.start = (self.start + 1).min(self.max_start());
    }

    pub fn shows_arrows(&self) -> bool {
        self.categories.len() > VISIBLE_CATEGORIES
    }

    pub fn visible(&self) -> &[String] {
        let end = (self.start + VISIBLE_CATEGORIES).min(self.categories.len());
        &self.categories[self.start..end]
    }

    pub fn window(&self) -> CategoryWindow {
        CategoryWindow {
            visible: self.visible().to_vec(),
            offset: self.start,
            show_arrows: self.shows_arrows(),
            can_scroll_back: self.start > 0,
            can_scroll_forward: self.start < self.max_start(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    pub category: Option<String>,
    pub search: String,
    pub sort: SortMode,
}

impl CatalogFilter {
    fn category_matches(&self, product: &Product) -> bool {
        match self.category.as_deref() {
            None | Some(ALL_CATEGORIES) => true,
            Some(wanted) => product.category.as_deref() == Some(wanted),
        }
    }

    /// Filters by category (exact) and name (case-insensitive substring), then sorts by
    /// creation time. The sort is stable; products without a timestamp count as oldest.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let needle = self.search.to_lowercase();
        let mut matches: Vec<&Product> = products
            .iter()
            .filter(|p| self.category_matches(p))
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect();

        match self.sort {
            SortMode::Recientes => matches.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortMode::Antiguos => matches.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        }
        matches
    }
}
