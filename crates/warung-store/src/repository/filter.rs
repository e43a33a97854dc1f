//! # List Filters
//!
//! The search box and drop-downs above each list screen. Text queries are
//! case-insensitive substring matches; an empty query matches everything.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use warung_core::{
    Expense, ExpenseCategory, JournalEntry, JournalKind, PaymentStatus, Product, Purchase,
    ReportPeriod, Transaction, TransactionKind,
};

use super::RecordFilter;

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn normalised(query: &Option<String>) -> Option<String> {
    query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase)
}

/// Produk screen: name or category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductFilter {
    pub query: Option<String>,
}

impl RecordFilter<Product> for ProductFilter {
    fn matches(&self, product: &Product) -> bool {
        match normalised(&self.query) {
            Some(q) => contains(&product.name, &q) || contains(&product.category, &q),
            None => true,
        }
    }
}

/// Transaksi screen: customer or id, plus type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionFilter {
    pub query: Option<String>,
    pub kind: Option<TransactionKind>,
}

impl RecordFilter<Transaction> for TransactionFilter {
    fn matches(&self, t: &Transaction) -> bool {
        let text = match normalised(&self.query) {
            Some(q) => contains(&t.customer, &q) || contains(&t.id, &q),
            None => true,
        };
        text && self.kind.map_or(true, |k| t.kind == k)
    }
}

/// Pembelian screen: supplier or id, plus status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PurchaseFilter {
    pub query: Option<String>,
    pub status: Option<PaymentStatus>,
}

impl RecordFilter<Purchase> for PurchaseFilter {
    fn matches(&self, p: &Purchase) -> bool {
        let text = match normalised(&self.query) {
            Some(q) => contains(&p.supplier, &q) || contains(&p.id, &q),
            None => true,
        };
        text && self.status.map_or(true, |s| p.status == s)
    }
}

/// Beban screen: description, category and status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpenseFilter {
    pub query: Option<String>,
    pub category: Option<ExpenseCategory>,
    pub status: Option<PaymentStatus>,
}

impl RecordFilter<Expense> for ExpenseFilter {
    fn matches(&self, e: &Expense) -> bool {
        let text = match normalised(&self.query) {
            Some(q) => contains(&e.description, &q),
            None => true,
        };
        text && self.category.map_or(true, |c| e.category == c)
            && self.status.map_or(true, |s| e.status == s)
    }
}

/// Jurnal screen: period relative to `today`, plus manual/automatic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalFilter {
    pub period: ReportPeriod,
    pub today: NaiveDate,
    pub kind: Option<JournalKind>,
}

impl JournalFilter {
    pub fn new(period: ReportPeriod, today: NaiveDate) -> Self {
        JournalFilter {
            period,
            today,
            kind: None,
        }
    }

    pub fn with_kind(mut self, kind: JournalKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

impl RecordFilter<JournalEntry> for JournalFilter {
    fn matches(&self, entry: &JournalEntry) -> bool {
        self.period.contains(entry.date, self.today) && self.kind.map_or(true, |k| entry.kind == k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warung_core::{JournalLine, Money};

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, day).unwrap()
    }

    fn transaction(id: &str, customer: &str, kind: TransactionKind) -> Transaction {
        Transaction {
            id: id.to_string(),
            date: d(5, 1),
            customer: customer.to_string(),
            kind,
            amount: Money::from_rupiah(1_000),
            description: String::new(),
            status: PaymentStatus::Lunas,
            items: vec![],
            payment_method: None,
            cash_received: None,
            change: None,
        }
    }

    #[test]
    fn test_product_filter() {
        let product = Product {
            id: "1".to_string(),
            name: "Teh Botol".to_string(),
            category: "Minuman".to_string(),
            price: Money::from_rupiah(5_000),
            cost: Money::from_rupiah(3_500),
            stock: 10,
            min_stock: 5,
            supplier: None,
        };
        let by = |q: &str| ProductFilter {
            query: Some(q.to_string()),
        };

        assert!(by("teh").matches(&product));
        assert!(by("MINUM").matches(&product));
        assert!(!by("kopi").matches(&product));
        assert!(by("  ").matches(&product));
        assert!(ProductFilter::default().matches(&product));
    }

    #[test]
    fn test_transaction_filter() {
        let t = transaction("TRX000007", "Bu Sari", TransactionKind::Penjualan);

        let by_id = TransactionFilter {
            query: Some("trx000007".to_string()),
            kind: None,
        };
        assert!(by_id.matches(&t));

        let wrong_kind = TransactionFilter {
            query: Some("sari".to_string()),
            kind: Some(TransactionKind::Pembelian),
        };
        assert!(!wrong_kind.matches(&t));
    }

    #[test]
    fn test_expense_filter() {
        let e = Expense {
            id: "EXP000001".to_string(),
            date: d(5, 1),
            description: "Bayar listrik".to_string(),
            amount: Money::from_rupiah(200_000),
            category: ExpenseCategory::Operasional,
            status: PaymentStatus::BelumLunas,
        };

        let f = ExpenseFilter {
            query: Some("listrik".to_string()),
            category: Some(ExpenseCategory::Operasional),
            status: Some(PaymentStatus::BelumLunas),
        };
        assert!(f.matches(&e));

        let paid_only = ExpenseFilter {
            status: Some(PaymentStatus::Lunas),
            ..Default::default()
        };
        assert!(!paid_only.matches(&e));
    }

    #[test]
    fn test_journal_filter() {
        let entry = JournalEntry {
            id: "JRN000001".to_string(),
            date: d(4, 30),
            description: "x".to_string(),
            reference: "r".to_string(),
            debit: vec![JournalLine::new("Kas", Money::from_rupiah(1))],
            credit: vec![JournalLine::new("Modal", Money::from_rupiah(1))],
            kind: JournalKind::Manual,
        };

        assert!(JournalFilter::new(ReportPeriod::All, d(5, 10)).matches(&entry));
        assert!(!JournalFilter::new(ReportPeriod::ThisMonth, d(5, 10)).matches(&entry));
        assert!(JournalFilter::new(ReportPeriod::LastMonth, d(5, 10)).matches(&entry));
        assert!(!JournalFilter::new(ReportPeriod::All, d(5, 10))
            .with_kind(JournalKind::Automatic)
            .matches(&entry));
    }
}
