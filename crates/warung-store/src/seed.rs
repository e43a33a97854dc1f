//! # Demo Data
//!
//! Fills a [`Books`] with a small warung so every screen has something to
//! show. Used by the shell's `seed` command and `--seed` flag, and by tests.
//!
//! ## What Gets Created
//! ```text
//! today − 7   manual journal: Kas / Modal  Rp 5.000.000
//! today − 3   purchase from CV Sumber Rejeki (new Gula Pasir, restock Aqua)
//! today − 1   expense Sewa kios      (Administrasi, Belum Lunas)
//! today       expense Listrik        (Operasional, Lunas)
//! today       2 Kasir sales          (Tunai with change, Transfer)
//! ```
//!
//! Catalog products whose name already exists are skipped, so seeding a
//! second time only adds records. A run that fails part way leaves the
//! books as they were.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::info;
use warung_core::journal::{KAS, MODAL};
use warung_core::{
    Cart, ExpenseCategory, JournalLine, ManualJournal, Money, NewExpense, NewProduct,
    PaymentMethod, PaymentStatus, Tender,
};

use crate::books::{Books, PurchaseLine, PurchaseOrder};
use crate::error::StoreResult;

/// (name, category, price, cost, stock, min stock)
const CATALOG: &[(&str, &str, i64, i64, i64, i64)] = &[
    ("Indomie Goreng", "Makanan", 3_500, 2_800, 40, 10),
    ("Roti Tawar", "Makanan", 15_000, 12_000, 8, 5),
    ("Telur Ayam 1kg", "Makanan", 28_000, 25_000, 4, 5),
    ("Aqua 600ml", "Minuman", 4_000, 2_500, 48, 12),
    ("Teh Botol Sosro", "Minuman", 5_000, 3_500, 24, 6),
    ("Kopi Kapal Api Sachet", "Minuman", 2_000, 1_500, 60, 20),
    ("Chitato 68g", "Snack", 11_000, 8_500, 15, 5),
    ("Oreo Original", "Snack", 9_500, 7_500, 0, 5),
];

/// Counts of what one seeding run added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedSummary {
    pub products: usize,
    pub purchases: usize,
    pub transactions: usize,
    pub expenses: usize,
    pub journal_entries: usize,
}

fn days_before(today: NaiveDate, days: u64) -> NaiveDate {
    today.checked_sub_days(Days::new(days)).unwrap_or(today)
}

/// Loads the demo warung into `books`.
///
/// All records go into a staged copy first; `books` changes only when the
/// whole run succeeds.
pub fn seed_demo(books: &mut Books, today: NaiveDate) -> StoreResult<SeedSummary> {
    let mut staged = books.clone();
    let summary = load_demo(&mut staged, today)?;
    *books = staged;

    info!(
        products = summary.products,
        transactions = summary.transactions,
        journal_entries = summary.journal_entries,
        "Demo data loaded"
    );
    Ok(summary)
}

fn load_demo(books: &mut Books, today: NaiveDate) -> StoreResult<SeedSummary> {
    let journal_before = books.store().journal().len();
    let mut summary = SeedSummary::default();

    for (name, category, price, cost, stock, min_stock) in CATALOG {
        if books.store().products().find_by_name(name).is_some() {
            continue;
        }
        books.add_product(NewProduct {
            name: name.to_string(),
            category: category.to_string(),
            price: Money::from_rupiah(*price),
            cost: Money::from_rupiah(*cost),
            stock: *stock,
            min_stock: Some(*min_stock),
            supplier: None,
        })?;
        summary.products += 1;
    }

    books.add_manual_journal(ManualJournal {
        date: days_before(today, 7),
        description: "Setoran modal awal".to_string(),
        reference: "MODAL-01".to_string(),
        debit: vec![JournalLine::new(KAS, Money::from_rupiah(5_000_000))],
        credit: vec![JournalLine::new(MODAL, Money::from_rupiah(5_000_000))],
    })?;

    books.record_purchase(PurchaseOrder {
        date: days_before(today, 3),
        supplier: "CV Sumber Rejeki".to_string(),
        description: "Belanja stok mingguan".to_string(),
        status: PaymentStatus::Lunas,
        payment_method: Some(PaymentMethod::Transfer),
        items: vec![
            PurchaseLine {
                name: "Gula Pasir 1kg".to_string(),
                category: "Makanan".to_string(),
                quantity: 20,
                cost: Money::from_rupiah(14_000),
            },
            PurchaseLine {
                name: "Aqua 600ml".to_string(),
                category: "Minuman".to_string(),
                quantity: 24,
                cost: Money::from_rupiah(2_500),
            },
        ],
    })?;
    summary.purchases += 1;

    books.record_expense(NewExpense {
        date: days_before(today, 1),
        description: "Sewa kios bulan ini".to_string(),
        amount: Money::from_rupiah(1_000_000),
        category: ExpenseCategory::Administrasi,
        status: PaymentStatus::BelumLunas,
    })?;
    books.record_expense(NewExpense {
        date: today,
        description: "Token listrik".to_string(),
        amount: Money::from_rupiah(350_000),
        category: ExpenseCategory::Operasional,
        status: PaymentStatus::Lunas,
    })?;
    summary.expenses += 2;

    let sales: [(&[(&str, i64)], Tender); 2] = [
        (
            &[("Indomie Goreng", 2), ("Aqua 600ml", 1)],
            Tender::cash(Money::from_rupiah(20_000)),
        ),
        (
            &[("Teh Botol Sosro", 2), ("Chitato 68g", 1)],
            Tender::new(PaymentMethod::Transfer, None),
        ),
    ];
    for (lines, tender) in sales {
        let mut cart = Cart::new();
        for (name, quantity) in lines {
            let product = books.find_product(name)?.clone();
            for _ in 0..*quantity {
                cart.add_product(&product)?;
            }
        }
        books.checkout(&mut cart, tender, today)?;
        summary.transactions += 1;
    }

    summary.journal_entries = books.store().journal().len() - journal_before;
    Ok(summary)
}
