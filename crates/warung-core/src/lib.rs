//! # warung-core: Pure Business Logic for Warung
//!
//! This crate holds every bookkeeping rule of the shop as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Warung Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Session Shell (apps/cli)                     │   │
//! │  │    product ──► cart ──► pay ──► journal ──► report              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                warung-store (Books + repositories)              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ warung-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐  │   │
//! │  │   │  types  │ │  money  │ │  cart   │ │ journal │ │ report  │  │   │
//! │  │   │ Product │ │  Money  │ │  Cart   │ │ posting │ │ summary │  │   │
//! │  │   │ Expense │ │ (Rp)    │ │ Tender  │ │ balance │ │ neraca  │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO GLOBAL STATE • PURE FUNCTIONS          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Records (Product, Transaction, Purchase, Expense, JournalEntry)
//! - [`money`] - Rupiah amounts with integer arithmetic
//! - [`error`] - Domain error types
//! - [`validation`] - Form validation rules
//! - [`cart`] - Kasir cart, tender and sale assembly
//! - [`journal`] - Account names, manual journal checks, auto-posting rules
//! - [`period`] - Report periods relative to a given day
//! - [`report`] - Financial summary, statements and screen statistics
//!
//! ## Example Usage
//!
//! ```rust
//! use warung_core::money::Money;
//!
//! let cost = Money::from_rupiah(10_000);
//! // Purchases are restocked with a 30% markup
//! assert_eq!(cost.apply_markup(3000).rupiah(), 13_000);
//! assert_eq!(cost.to_string(), "Rp 10.000");
//! ```

pub mod cart;
pub mod error;
pub mod journal;
pub mod money;
pub mod period;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartItem, Settlement, Tender};
pub use error::{CoreError, CoreResult, ValidationError};
pub use journal::{JournalSummary, ManualJournal, TrialBalance};
pub use money::Money;
pub use period::ReportPeriod;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct products in one cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line (cart or purchase).
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Largest amount accepted on any form or cashier input (Rp 1 triliun).
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// Largest stock count a product may hold.
pub const MAX_STOCK: i64 = 1_000_000;

/// Minimum stock used when a product is created without one.
pub const DEFAULT_MIN_STOCK: i64 = 5;

/// Markup applied to the cost of restocked products, in basis points (30%).
pub const DEFAULT_PURCHASE_MARKUP_BPS: u32 = 3000;

/// Customer name recorded on Kasir sales.
pub const WALK_IN_CUSTOMER: &str = "Pelanggan Umum";
