// src/cart/store.rs
use serde::Serialize;

use crate::dtos::order::OrderLineRequest;
use crate::models::product::{round2, Product};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    pub product_id: i64,
    pub name: String,
    /// Post-discount price captured when the line was created.
    pub unit_price: f64,
    pub quantity: u32,
    /// Stock reported by the backend when the line was created.
    pub stock_ceiling: u32,
    pub image: String,
}

impl CartLine {
    pub fn line_total(&self) -> f64 {
        round2(self.unit_price * self.quantity as f64)
    }
}

/// Items a shopper has picked, in the order they were first added.
///
/// Every line satisfies `0 < quantity <= stock_ceiling`; all mutation goes through
/// [`CartStore::add`], [`CartStore::remove`] and [`CartStore::clear`].
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    lines: Vec<CartLine>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn line(&self, product_id: i64) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    pub fn quantity_of(&self, product_id: i64) -> u32 {
        self.line(product_id).map_or(0, |l| l.quantity)
    }

    /// Stock left to add for this product snapshot. A line keeps the ceiling it was
    /// created with, so a later snapshot can lower the limit but never raise it.
    pub fn available_stock(&self, product: &Product) -> u32 {
        let ceiling = self
            .line(product.id)
            .map_or(product.stock, |l| l.stock_ceiling.min(product.stock));
        ceiling.saturating_sub(self.quantity_of(product.id))
    }

    /// Adds one unit. Returns `false` and leaves the cart untouched when no stock is left.
    pub fn add(&mut self, product: &Product) -> bool {
        if self.available_stock(product) == 0 {
            return false;
        }

        match self.lines.iter_mut().find(|l| l.product_id == product.id) {
            Some(line) => line.quantity += 1,
            None => self.lines.push(CartLine {
                product_id: product.id,
                name: product.name.clone(),
                unit_price: product.display_price(),
                quantity: 1,
                stock_ceiling: product.stock,
                image: product.image_or_placeholder().to_string(),
            }),
        }
        true
    }

    /// Drops the whole line, whatever its quantity.
    pub fn remove(&mut self, product_id: i64) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        self.lines.len() != before
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total_items(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn total_price(&self) -> f64 {
        round2(self.lines.iter().map(|l| l.unit_price * l.quantity as f64).sum())
    }

    pub fn order_lines(&self) -> Vec<OrderLineRequest> {
        self.lines
            .iter()
            .map(|l| OrderLineRequest {
                id: l.product_id,
                quantity: l.quantity,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product::sample;

    #[test]
    fn add_creates_then_increments_line() {
        let mut cart = CartStore::new();
        let milk = sample(1, "Leche", 1.10, 3);
        assert!(cart.add(&milk));
        assert!(cart.add(&milk));
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.quantity_of(1), 2);
        assert_eq!(cart.available_stock(&milk), 1);
    }

    #[test]
    fn add_without_remaining_stock_is_a_no_op() {
        let mut cart = CartStore::new();
        let bread = sample(2, "Pan", 0.15, 1);
        assert!(cart.add(&bread));
        let before = cart.lines().to_vec();
        assert!(!cart.add(&bread));
        assert_eq!(cart.lines(), before.as_slice());

        let sold_out = sample(3, "Queso", 4.0, 0);
        assert!(!cart.add(&sold_out));
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn fresher_snapshot_cannot_raise_the_ceiling() {
        let mut cart = CartStore::new();
        let mut eggs = sample(4, "Huevos", 0.2, 1);
        assert!(cart.add(&eggs));
        eggs.stock = 10;
        assert!(!cart.add(&eggs));
    }

    #[test]
    fn line_records_discounted_price() {
        let mut cart = CartStore::new();
        let mut soda = sample(5, "Cola", 2.0, 5);
        soda.discount = Some(25.0);
        cart.add(&soda);
        assert_eq!(cart.lines()[0].unit_price, 1.5);
    }

    #[test]
    fn totals_match_the_lines() {
        let mut cart = CartStore::new();
        let a = sample(1, "A", 3.00, 5);
        let b = sample(2, "B", 5.00, 5);
        cart.add(&a);
        cart.add(&a);
        cart.add(&b);
        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price(), 11.00);
    }

    #[test]
    fn remove_deletes_the_whole_line() {
        let mut cart = CartStore::new();
        let a = sample(1, "A", 3.00, 5);
        cart.add(&a);
        cart.add(&a);
        assert!(cart.remove(1));
        assert!(!cart.remove(1));
        assert_eq!(cart.total_items(), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn random_add_remove_sequences_keep_totals_consistent() {
        let products: Vec<Product> = (0..4).map(|i| sample(i, "P", 1.5, i as u32 + 1)).collect();
        let mut cart = CartStore::new();
        let mut seed: u64 = 7;
        for _ in 0..500 {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let target = &products[(seed >> 33) as usize % products.len()];
            if (seed >> 20) % 4 == 0 {
                cart.remove(target.id);
            } else {
                cart.add(target);
            }
            let sum: u32 = cart.lines().iter().map(|l| l.quantity).sum();
            assert_eq!(cart.total_items(), sum);
            for line in cart.lines() {
                assert!(line.quantity > 0 && line.quantity <= line.stock_ceiling);
            }
        }
    }

    #[test]
    fn clear_empties_and_order_lines_follow_insertion() {
        let mut cart = CartStore::new();
        cart.add(&sample(9, "Z", 1.0, 2));
        cart.add(&sample(3, "C", 1.0, 2));
        let lines = cart.order_lines();
        assert_eq!(lines.iter().map(|l| l.id).collect::<Vec<_>>(), vec![9, 3]);
        cart.clear();
        assert!(cart.is_empty());
    }
}
