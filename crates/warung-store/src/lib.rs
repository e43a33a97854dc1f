//! # warung-store: In-Memory Books for Warung
//!
//! Holds every record of the shop for the life of one session and applies
//! the bookkeeping side effects (stock, automatic journals) of each action.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Warung Data Flow                                 │
//! │                                                                         │
//! │  Shell command (pay --cash 50rb)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   warung-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │    Books      │    │  Repositories │    │     Ids      │   │   │
//! │  │   │  (books.rs)   │───►│ (repository/) │    │  (ids.rs)    │   │   │
//! │  │   │               │    │               │    │              │   │   │
//! │  │   │ checkout      │    │ Product       │    │ TRX000001    │   │   │
//! │  │   │ record_*      │    │ Transaction   │    │ PUR000001    │   │   │
//! │  │   │ reports       │    │ Purchase ...  │    │ UUID v4      │   │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  warung-core (rules and formulas)                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use warung_store::{seed_demo, Books};
//! use warung_core::ReportPeriod;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
//! let mut books = Books::default();
//! seed_demo(&mut books, today).unwrap();
//!
//! let sheet = books.balance_sheet(ReportPeriod::All, today);
//! assert!(sheet.is_balanced());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod books;
pub mod error;
pub mod ids;
pub mod repository;
pub mod seed;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use books::{Books, BooksSettings, PurchaseLine, PurchaseOrder, Receipt};
pub use error::{StoreError, StoreResult};
pub use ids::{IdGenerator, IdKind};
pub use repository::product::StockMovement;
pub use repository::{
    ExpenseFilter, JournalFilter, ProductFilter, ProductRepository, PurchaseFilter,
    TransactionFilter,
};
pub use seed::{seed_demo, SeedSummary};
pub use store::Store;
