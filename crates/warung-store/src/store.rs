//! # Store
//!
//! Every record list plus the id sequences, owned in one place.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           Store                                         │
//! │                                                                         │
//! │   products()       ──► ProductRepository      (entry order)             │
//! │   transactions()   ──► TransactionRepository  (newest first)            │
//! │   purchases()      ──► PurchaseRepository     (newest first)            │
//! │   expenses()       ──► ExpenseRepository      (newest first)            │
//! │   journal()        ──► JournalRepository      (newest first)            │
//! │   ids              ──► IdGenerator                                      │
//! │                                                                         │
//! │   ledger()         ──► warung_core::report::Ledger (borrowed view)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store is single-threaded and lives for one session. Mutation goes
//! through `&mut self`; nothing is shared across threads.

use warung_core::report::Ledger;

use crate::ids::{IdGenerator, IdKind};
use crate::repository::{
    ExpenseRepository, JournalRepository, ProductRepository, PurchaseRepository,
    TransactionRepository,
};

#[derive(Debug, Clone, Default)]
pub struct Store {
    products: ProductRepository,
    transactions: TransactionRepository,
    purchases: PurchaseRepository,
    expenses: ExpenseRepository,
    journal: JournalRepository,
    ids: IdGenerator,
}

impl Store {
    /// Creates an empty store, the state of a fresh start.
    pub fn new() -> Self {
        Store::default()
    }

    pub fn products(&self) -> &ProductRepository {
        &self.products
    }

    pub fn products_mut(&mut self) -> &mut ProductRepository {
        &mut self.products
    }

    pub fn transactions(&self) -> &TransactionRepository {
        &self.transactions
    }

    pub fn transactions_mut(&mut self) -> &mut TransactionRepository {
        &mut self.transactions
    }

    pub fn purchases(&self) -> &PurchaseRepository {
        &self.purchases
    }

    pub fn purchases_mut(&mut self) -> &mut PurchaseRepository {
        &mut self.purchases
    }

    pub fn expenses(&self) -> &ExpenseRepository {
        &self.expenses
    }

    pub fn expenses_mut(&mut self) -> &mut ExpenseRepository {
        &mut self.expenses
    }

    pub fn journal(&self) -> &JournalRepository {
        &self.journal
    }

    pub fn journal_mut(&mut self) -> &mut JournalRepository {
        &mut self.journal
    }

    pub fn next_id(&mut self, kind: IdKind) -> String {
        self.ids.next(kind)
    }

    pub fn next_product_id(&self) -> String {
        self.ids.product_id()
    }

    /// Borrowed view for the report functions.
    pub fn ledger(&self) -> Ledger<'_> {
        Ledger {
            products: self.products.list(),
            transactions: self.transactions.list(),
            purchases: self.purchases.list(),
            expenses: self.expenses.list(),
            journal: self.journal.list(),
        }
    }

    /// True when nothing has been entered yet.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
            && self.transactions.is_empty()
            && self.purchases.is_empty()
            && self.expenses.is_empty()
            && self.journal.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_is_empty() {
        let store = Store::new();
        assert!(store.is_empty());
        assert!(store.ledger().products.is_empty());
    }

    #[test]
    fn test_ids_come_from_store() {
        let mut store = Store::new();
        assert_eq!(store.next_id(IdKind::Purchase), "PUR000001");
        assert_eq!(store.next_id(IdKind::Purchase), "PUR000002");
        assert_eq!(store.next_product_id().len(), 36);
    }
}
