//! # Kasir Cart
//!
//! The checkout cart, cash tender and sale assembly.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Kasir Operations                                     │
//! │                                                                         │
//! │  Shell Action            Cart Method              Cart Change           │
//! │  ────────────            ───────────              ───────────           │
//! │                                                                         │
//! │  cart add <product> ───► add_product() ─────────► qty += 1 / push      │
//! │  cart set <p> <n> ─────► update_quantity() ─────► qty = n / remove     │
//! │  cart remove <p> ──────► remove() ──────────────► items.remove(i)      │
//! │  cart clear ───────────► clear() ───────────────► items.clear()        │
//! │                                                                         │
//! │  pay --cash 50rb ──────► Tender::settle() ──────► Settlement           │
//! │                          into_sale() ───────────► NewTransaction       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stock is checked against the product passed in, so callers must hand
//! over the current catalog record, not a stale copy.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{
    NewTransaction, PaymentMethod, PaymentStatus, Product, TransactionItem, TransactionKind,
};
use crate::validation::validate_quantity;
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Cart Item
// =============================================================================

/// A cart line. Price and cost are frozen when the product is first added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartItem {
    pub product_id: String,
    pub name: String,
    pub price: Money,
    pub cost: Money,
    pub quantity: i64,
}

impl CartItem {
    pub fn from_product(product: &Product) -> Self {
        CartItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            cost: product.cost,
            quantity: 1,
        }
    }

    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The Kasir cart.
///
/// ## Invariants
/// - Lines are unique by `product_id` and keep insertion order
/// - Every line has `1 <= quantity <= stock` at the time it was changed
/// - At most `MAX_CART_ITEMS` lines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Cart::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get(&self, product_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.product_id == product_id)
    }

    /// Adds one unit of `product`.
    ///
    /// ## Errors
    /// - `OutOfStock` when the product has no stock
    /// - `InsufficientStock` when the cart already holds all of it
    /// - `CartTooLarge` when a new line would exceed the cart limit
    pub fn add_product(&mut self, product: &Product) -> CoreResult<()> {
        if product.is_out_of_stock() {
            return Err(CoreError::OutOfStock {
                name: product.name.clone(),
            });
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            if item.quantity >= product.stock || item.quantity >= MAX_ITEM_QUANTITY {
                return Err(CoreError::InsufficientStock {
                    name: product.name.clone(),
                    available: product.stock,
                    requested: item.quantity + 1,
                });
            }
            item.quantity += 1;
            return Ok(());
        }

        if self.items.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        self.items.push(CartItem::from_product(product));
        Ok(())
    }

    /// Sets the quantity of a line already in the cart.
    ///
    /// A quantity of zero or less removes the line.
    pub fn update_quantity(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            return self.remove(&product.id);
        }

        if quantity > product.stock {
            return Err(CoreError::InsufficientStock {
                name: product.name.clone(),
                available: product.stock,
                requested: quantity,
            });
        }
        validate_quantity(quantity)?;

        match self.items.iter_mut().find(|i| i.product_id == product.id) {
            Some(item) => {
                item.quantity = quantity;
                Ok(())
            }
            None => Err(CoreError::NotInCart(product.name.clone())),
        }
    }

    pub fn remove(&mut self, product_id: &str) -> CoreResult<()> {
        let before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);

        if self.items.len() == before {
            Err(CoreError::NotInCart(product_id.to_string()))
        } else {
            Ok(())
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn total(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sale description, e.g. `Kopi Susu (2), Roti Bakar (1)`.
    pub fn description(&self) -> String {
        self.items
            .iter()
            .map(|i| format!("{} ({})", i.name, i.quantity))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Builds the sale transaction for this cart.
    ///
    /// Kasir sales are always recorded as paid (`Lunas`).
    pub fn into_sale(
        &self,
        date: NaiveDate,
        customer: &str,
        settlement: &Settlement,
    ) -> CoreResult<NewTransaction> {
        if self.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let items = self
            .items
            .iter()
            .map(|i| TransactionItem {
                product_id: i.product_id.clone(),
                product_name: i.name.clone(),
                quantity: i.quantity,
                price: i.price,
                cost: Some(i.cost),
            })
            .collect();

        Ok(NewTransaction {
            date,
            customer: customer.to_string(),
            kind: TransactionKind::Penjualan,
            amount: self.total(),
            description: self.description(),
            status: PaymentStatus::Lunas,
            items,
            payment_method: Some(settlement.method),
            cash_received: settlement.cash_received,
            change: settlement.change,
        })
    }
}

/// Cart totals for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: i64,
    pub total: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            total: cart.total(),
        }
    }
}

// =============================================================================
// Tender
// =============================================================================

/// How the customer intends to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tender {
    pub method: PaymentMethod,
    /// Cash handed over; only meaningful for `Tunai`.
    pub cash_received: Option<Money>,
}

/// A tender checked against the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    pub method: PaymentMethod,
    pub cash_received: Option<Money>,
    pub change: Option<Money>,
}

impl Tender {
    pub fn new(method: PaymentMethod, cash_received: Option<Money>) -> Self {
        Tender {
            method,
            cash_received,
        }
    }

    pub fn cash(received: Money) -> Self {
        Tender::new(PaymentMethod::Tunai, Some(received))
    }

    /// Checks the tender against `total`.
    ///
    /// ## Rules
    /// ```text
    /// Tunai:    cash missing or cash < total → InsufficientPayment
    ///           change = cash − total
    /// Transfer, Kredit: no cash, no change
    /// ```
    pub fn settle(&self, total: Money) -> CoreResult<Settlement> {
        match self.method {
            PaymentMethod::Tunai => {
                let received = self.cash_received.unwrap_or_default();
                if self.cash_received.is_none() || received < total {
                    return Err(CoreError::InsufficientPayment { total, received });
                }
                Ok(Settlement {
                    method: self.method,
                    cash_received: Some(received),
                    change: Some(received - total),
                })
            }
            PaymentMethod::Transfer | PaymentMethod::Kredit => Ok(Settlement {
                method: self.method,
                cash_received: None,
                change: None,
            }),
        }
    }
}

/// Quick-cash buttons shown under the payment field.
pub fn quick_amounts(total: Money) -> [(&'static str, Money); 4] {
    [
        ("Pas", total),
        ("50rb", Money::from_rupiah(50_000)),
        ("100rb", Money::from_rupiah(100_000)),
        ("200rb", Money::from_rupiah(200_000)),
    ]
}

/// Product picker search: case-insensitive match on name or category.
pub fn filter_products<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let query = query.trim().to_lowercase();
    products
        .iter()
        .filter(|p| {
            query.is_empty()
                || p.name.to_lowercase().contains(&query)
                || p.category.to_lowercase().contains(&query)
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
