//! # Repository Module
//!
//! Owned record lists behind a small, typed API.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Books::record_expense()                                               │
//! │       │                                                                 │
//! │       │  store.expenses_mut().insert(expense)                          │
//! │       ▼                                                                 │
//! │  RecordRepository<Expense>                                             │
//! │  ├── insert(&mut self, record)     newest first                        │
//! │  ├── get(&self, id)                                                    │
//! │  ├── delete(&mut self, id)                                             │
//! │  ├── list(&self)                                                       │
//! │  └── filter(&self, &ExpenseFilter)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Vec<Expense>                                                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`] - catalog, search, stock movements
//! - [`TransactionRepository`], [`PurchaseRepository`], [`ExpenseRepository`],
//!   [`JournalRepository`] - append-and-delete record lists

pub mod filter;
pub mod product;

use tracing::debug;
use warung_core::{Expense, JournalEntry, Purchase, Transaction};

use crate::error::{StoreError, StoreResult};

pub use filter::{ExpenseFilter, JournalFilter, ProductFilter, PurchaseFilter, TransactionFilter};
pub use product::ProductRepository;

/// A record that lives in a [`RecordRepository`].
pub trait Record: Clone {
    /// Entity name used in `NotFound` errors.
    const ENTITY: &'static str;

    fn id(&self) -> &str;
}

impl Record for Transaction {
    const ENTITY: &'static str = "Transaction";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Purchase {
    const ENTITY: &'static str = "Purchase";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Expense {
    const ENTITY: &'static str = "Expense";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for JournalEntry {
    const ENTITY: &'static str = "Journal entry";

    fn id(&self) -> &str {
        &self.id
    }
}

/// A predicate used by list screens.
pub trait RecordFilter<T> {
    fn matches(&self, record: &T) -> bool;
}

/// Record list, newest first.
#[derive(Debug, Clone)]
pub struct RecordRepository<T> {
    records: Vec<T>,
}

impl<T> Default for RecordRepository<T> {
    fn default() -> Self {
        RecordRepository {
            records: Vec::new(),
        }
    }
}

pub type TransactionRepository = RecordRepository<Transaction>;
pub type PurchaseRepository = RecordRepository<Purchase>;
pub type ExpenseRepository = RecordRepository<Expense>;
pub type JournalRepository = RecordRepository<JournalEntry>;

impl<T: Record> RecordRepository<T> {
    pub fn new() -> Self {
        RecordRepository::default()
    }

    /// Stores `record` at the front of the list and returns a copy.
    pub fn insert(&mut self, record: T) -> T {
        debug!(entity = T::ENTITY, id = %record.id(), "Inserting record");
        self.records.insert(0, record.clone());
        record
    }

    pub fn get(&self, id: &str) -> StoreResult<&T> {
        self.records
            .iter()
            .find(|r| r.id() == id)
            .ok_or_else(|| StoreError::not_found(T::ENTITY, id))
    }

    /// Removes and returns the record.
    pub fn delete(&mut self, id: &str) -> StoreResult<T> {
        debug!(entity = T::ENTITY, id = %id, "Deleting record");
        let index = self
            .records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| StoreError::not_found(T::ENTITY, id))?;
        Ok(self.records.remove(index))
    }

    pub fn list(&self) -> &[T] {
        &self.records
    }

    pub fn filter<F: RecordFilter<T>>(&self, filter: &F) -> Vec<&T> {
        let matched: Vec<&T> = self.records.iter().filter(|r| filter.matches(r)).collect();
        debug!(
            entity = T::ENTITY,
            total = self.records.len(),
            matched = matched.len(),
            "Filtered records"
        );
        matched
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
