//! # Product Repository
//!
//! The catalog. Unlike the other lists, products keep insertion order so
//! the Produk screen shows them the way they were entered.
//!
//! ## Stock Movements
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  adjust_stock(id, qty, movement)                                        │
//! │                                                                         │
//! │  StockMovement::Sale      stock = max(0, stock − qty)                   │
//! │  StockMovement::Purchase  stock = stock + qty, at most MAX_STOCK        │
//! │                                                                         │
//! │  A sale never drives stock negative, even if the cart was built         │
//! │  against an older stock figure.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use warung_core::validation::validate_non_negative;
use warung_core::{Product, ProductUpdate};

use super::{ProductFilter, RecordFilter};
use crate::error::{StoreError, StoreResult};

/// Direction of a stock change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockMovement {
    Sale,
    Purchase,
}

#[derive(Debug, Clone, Default)]
pub struct ProductRepository {
    products: Vec<Product>,
}

impl ProductRepository {
    pub fn new() -> Self {
        ProductRepository::default()
    }

    pub fn insert(&mut self, product: Product) -> Product {
        debug!(id = %product.id, name = %product.name, "Inserting product");
        self.products.push(product.clone());
        product
    }

    pub fn get(&self, id: &str) -> StoreResult<&Product> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::not_found("Product", id))
    }

    fn get_mut(&mut self, id: &str) -> StoreResult<&mut Product> {
        self.products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::not_found("Product", id))
    }

    /// Case-insensitive exact name lookup, used to restock on purchase.
    pub fn find_by_name(&self, name: &str) -> Option<&Product> {
        let name = name.trim().to_lowercase();
        self.products
            .iter()
            .find(|p| p.name.trim().to_lowercase() == name)
    }

    /// Merges `update` into the product and returns the new value.
    pub fn update(&mut self, id: &str, update: &ProductUpdate) -> StoreResult<Product> {
        debug!(id = %id, "Updating product");
        let product = self.get_mut(id)?;
        update.apply_to(product);
        Ok(product.clone())
    }

    pub fn delete(&mut self, id: &str) -> StoreResult<Product> {
        debug!(id = %id, "Deleting product");
        let index = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StoreError::not_found("Product", id))?;
        Ok(self.products.remove(index))
    }

    pub fn adjust_stock(
        &mut self,
        id: &str,
        quantity: i64,
        movement: StockMovement,
    ) -> StoreResult<Product> {
        debug!(id = %id, quantity, ?movement, "Adjusting stock");
        let product = self.get_mut(id)?;
        let stock = match movement {
            StockMovement::Sale => product.stock.saturating_sub(quantity).max(0),
            StockMovement::Purchase => product.stock.saturating_add(quantity),
        };
        validate_non_negative("stock", stock)?;
        product.stock = stock;
        Ok(product.clone())
    }

    pub fn list(&self) -> &[Product] {
        &self.products
    }

    pub fn search(&self, filter: &ProductFilter) -> Vec<&Product> {
        let matched: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| filter.matches(p))
            .collect();
        debug!(query = ?filter.query, count = matched.len(), "Searched products");
        matched
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
