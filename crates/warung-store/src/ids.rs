//! # Id Generation
//!
//! ```text
//! Product      → UUID v4            e.g. 3f2b…-…
//! Transaction  → TRX + 6 digits     TRX000001
//! Purchase     → PUR + 6 digits     PUR000001
//! Journal      → JRN + 6 digits     JRN000001
//! Expense      → EXP + 6 digits     EXP000001
//! ```
//!
//! Sequences are per store and never reused, even after deletes.

use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Transaction,
    Purchase,
    Journal,
    Expense,
}

impl IdKind {
    pub const fn prefix(&self) -> &'static str {
        match self {
            IdKind::Transaction => "TRX",
            IdKind::Purchase => "PUR",
            IdKind::Journal => "JRN",
            IdKind::Expense => "EXP",
        }
    }

    const fn slot(&self) -> usize {
        match self {
            IdKind::Transaction => 0,
            IdKind::Purchase => 1,
            IdKind::Journal => 2,
            IdKind::Expense => 3,
        }
    }
}

/// Monotonic id source for one store.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    counters: [u64; 4],
}

impl IdGenerator {
    pub fn new() -> Self {
        IdGenerator::default()
    }

    /// Next sequential id of `kind`.
    pub fn next(&mut self, kind: IdKind) -> String {
        let counter = &mut self.counters[kind.slot()];
        *counter += 1;
        format!("{}{:06}", kind.prefix(), counter)
    }

    /// Fresh product id.
    pub fn product_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequences_are_independent() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next(IdKind::Transaction), "TRX000001");
        assert_eq!(ids.next(IdKind::Transaction), "TRX000002");
        assert_eq!(ids.next(IdKind::Journal), "JRN000001");
        assert_eq!(ids.next(IdKind::Expense), "EXP000001");
        assert_eq!(ids.next(IdKind::Purchase), "PUR000001");
    }

    #[test]
    fn test_product_ids_are_uuids() {
        let ids = IdGenerator::new();
        let a = ids.product_id();
        assert!(Uuid::parse_str(&a).is_ok());
        assert_ne!(a, ids.product_id());
    }
}
