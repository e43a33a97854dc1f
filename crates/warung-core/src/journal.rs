//! # Journal Rules
//!
//! Chart of accounts, manual journal checks and the automatic postings
//! made for every sale, purchase and expense.
//!
//! ## Automatic Postings
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Source        Status        Debit                  Credit              │
//! │  ──────        ──────        ─────                  ──────              │
//! │  Penjualan     Lunas         Kas                    Pendapatan Penjualan│
//! │  Penjualan     Belum Lunas   Piutang Usaha          Pendapatan Penjualan│
//! │  Pembelian     Lunas         Persediaan             Kas                 │
//! │  Pembelian     Belum Lunas   Persediaan             Hutang Usaha        │
//! │  Beban         Lunas         Beban {kategori}       Kas                 │
//! │  Beban         Belum Lunas   Beban {kategori}       Hutang Usaha        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every automatic entry has a single debit and a single credit line of the
//! record amount, so it is balanced by construction.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{
    Expense, JournalEntry, JournalKind, JournalLine, PaymentStatus, Purchase, Transaction,
};
use crate::validation::validate_positive_amount;

// =============================================================================
// Chart of Accounts
// =============================================================================

pub const KAS: &str = "Kas";
pub const BANK: &str = "Bank";
pub const PIUTANG_USAHA: &str = "Piutang Usaha";
pub const PERSEDIAAN: &str = "Persediaan";
pub const PERALATAN: &str = "Peralatan";
pub const AKUMULASI_PENYUSUTAN: &str = "Akumulasi Penyusutan";
pub const HUTANG_USAHA: &str = "Hutang Usaha";
pub const HUTANG_BANK: &str = "Hutang Bank";
pub const MODAL: &str = "Modal";
pub const PENDAPATAN_PENJUALAN: &str = "Pendapatan Penjualan";

/// Account names suggested by the journal form.
pub const COMMON_ACCOUNTS: [&str; 16] = [
    KAS,
    BANK,
    PIUTANG_USAHA,
    PERSEDIAAN,
    PERALATAN,
    AKUMULASI_PENYUSUTAN,
    HUTANG_USAHA,
    HUTANG_BANK,
    MODAL,
    PENDAPATAN_PENJUALAN,
    "Beban Operasional",
    "Beban Administrasi",
    "Beban Penjualan",
    "Beban Bunga",
    "Pendapatan Lain-lain",
    "Beban Lain-lain",
];

/// Accounts whose movements make up the cash flow statement.
pub const CASH_ACCOUNTS: [&str; 2] = [KAS, BANK];

pub fn is_cash_account(account: &str) -> bool {
    CASH_ACCOUNTS
        .iter()
        .any(|a| a.eq_ignore_ascii_case(account.trim()))
}

/// Account class, derived from the account name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum AccountClass {
    Asset,
    Liability,
    Equity,
    Revenue,
    Expense,
}

impl AccountClass {
    /// Classifies an account by its name prefix.
    ///
    /// ```rust
    /// use warung_core::journal::AccountClass;
    ///
    /// assert_eq!(AccountClass::of("Beban Bunga"), AccountClass::Expense);
    /// assert_eq!(AccountClass::of("Hutang Bank"), AccountClass::Liability);
    /// assert_eq!(AccountClass::of("Kas"), AccountClass::Asset);
    /// ```
    pub fn of(account: &str) -> AccountClass {
        let name = account.trim().to_lowercase();
        if name.starts_with("beban") || name.starts_with("hpp") {
            AccountClass::Expense
        } else if name.starts_with("pendapatan") {
            AccountClass::Revenue
        } else if name.starts_with("hutang") || name.starts_with("utang") {
            AccountClass::Liability
        } else if name.starts_with("modal") || name == "prive" {
            AccountClass::Equity
        } else {
            AccountClass::Asset
        }
    }

    /// Assets and expenses grow on the debit side.
    pub const fn is_debit_normal(&self) -> bool {
        matches!(self, AccountClass::Asset | AccountClass::Expense)
    }
}

/// Cash flow section an entry falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum CashFlowActivity {
    Operating,
    Investing,
    Financing,
}

impl CashFlowActivity {
    /// Section for a single counter-account.
    pub fn of(account: &str) -> CashFlowActivity {
        let name = account.trim();
        if name.eq_ignore_ascii_case(PERALATAN) || name.eq_ignore_ascii_case(AKUMULASI_PENYUSUTAN)
        {
            CashFlowActivity::Investing
        } else if name.eq_ignore_ascii_case(MODAL) || name.eq_ignore_ascii_case(HUTANG_BANK) {
            CashFlowActivity::Financing
        } else {
            CashFlowActivity::Operating
        }
    }

    /// Section for a whole entry: Investing beats Financing beats Operating.
    pub fn of_entry(entry: &JournalEntry) -> CashFlowActivity {
        entry
            .debit
            .iter()
            .chain(entry.credit.iter())
            .filter(|l| !is_cash_account(&l.account))
            .map(|l| CashFlowActivity::of(&l.account))
            .fold(CashFlowActivity::Operating, |acc, a| match (acc, a) {
                (CashFlowActivity::Investing, _) | (_, CashFlowActivity::Investing) => {
                    CashFlowActivity::Investing
                }
                (CashFlowActivity::Financing, _) | (_, CashFlowActivity::Financing) => {
                    CashFlowActivity::Financing
                }
                _ => CashFlowActivity::Operating,
            })
    }
}

/// Net movement on cash accounts in one entry (debit minus credit).
pub fn cash_movement(entry: &JournalEntry) -> Money {
    let debit: Money = entry
        .debit
        .iter()
        .filter(|l| is_cash_account(&l.account))
        .map(|l| l.amount)
        .sum();
    let credit: Money = entry
        .credit
        .iter()
        .filter(|l| is_cash_account(&l.account))
        .map(|l| l.amount)
        .sum();
    debit - credit
}

// =============================================================================
// Manual Journal
// =============================================================================

/// The manual journal form ("Tambah Jurnal").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ManualJournal {
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub description: String,
    pub reference: String,
    pub debit: Vec<JournalLine>,
    pub credit: Vec<JournalLine>,
}

impl ManualJournal {
    /// Checks the form and returns it with blank rows dropped.
    ///
    /// ## Rules
    /// 1. Description and reference are required
    /// 2. Blank rows (no account, no amount) are ignored
    /// 3. Any other row needs an account and an amount above zero
    /// 4. At least one debit and one credit row must remain
    /// 5. Σ debit == Σ credit, and the total is above zero
    pub fn validate(&self) -> CoreResult<ManualJournal> {
        if self.description.trim().is_empty() {
            return Err(ValidationError::required("description").into());
        }
        if self.reference.trim().is_empty() {
            return Err(ValidationError::required("reference").into());
        }

        let debit = clean_lines("debit", &self.debit)?;
        let credit = clean_lines("credit", &self.credit)?;

        if debit.is_empty() {
            return Err(ValidationError::required("debit").into());
        }
        if credit.is_empty() {
            return Err(ValidationError::required("credit").into());
        }

        let total_debit: Money = debit.iter().map(|l| l.amount).sum();
        let total_credit: Money = credit.iter().map(|l| l.amount).sum();
        if total_debit != total_credit || !total_debit.is_positive() {
            return Err(CoreError::Unbalanced {
                debit: total_debit,
                credit: total_credit,
            });
        }

        Ok(ManualJournal {
            date: self.date,
            description: self.description.trim().to_string(),
            reference: self.reference.trim().to_string(),
            debit,
            credit,
        })
    }

    /// Turns a validated form into a stored entry.
    pub fn into_entry(self, id: String) -> JournalEntry {
        JournalEntry {
            id,
            date: self.date,
            description: self.description,
            reference: self.reference,
            debit: self.debit,
            credit: self.credit,
            kind: JournalKind::Manual,
        }
    }
}

fn clean_lines(side: &str, lines: &[JournalLine]) -> CoreResult<Vec<JournalLine>> {
    let mut cleaned = Vec::with_capacity(lines.len());
    for line in lines.iter().filter(|l| !l.is_blank()) {
        if line.account.trim().is_empty() {
            return Err(ValidationError::required(format!("{side} account")).into());
        }
        validate_positive_amount(&format!("{side} amount"), line.amount)?;
        cleaned.push(JournalLine::new(line.account.trim(), line.amount));
    }
    Ok(cleaned)
}

// =============================================================================
// Automatic Postings
// =============================================================================

fn automatic(
    id: String,
    date: NaiveDate,
    description: String,
    reference: &str,
    debit: JournalLine,
    credit: JournalLine,
) -> JournalEntry {
    JournalEntry {
        id,
        date,
        description,
        reference: reference.to_string(),
        debit: vec![debit],
        credit: vec![credit],
        kind: JournalKind::Automatic,
    }
}

/// Paid records settle through Kas; unpaid ones stay on account
/// (Hutang Usaha for purchases and expenses).
fn settlement_account(status: PaymentStatus) -> &'static str {
    match status {
        PaymentStatus::Lunas => KAS,
        PaymentStatus::BelumLunas => HUTANG_USAHA,
    }
}

/// Posting for a sale.
///
/// A paid sale debits Kas. An unpaid one debits Piutang Usaha.
pub fn sale_entry(id: String, sale: &Transaction) -> JournalEntry {
    let debit_account = match sale.status {
        PaymentStatus::Lunas => KAS,
        PaymentStatus::BelumLunas => PIUTANG_USAHA,
    };
    automatic(
        id,
        sale.date,
        format!("Penjualan - {}", sale.description),
        &sale.id,
        JournalLine::new(debit_account, sale.amount),
        JournalLine::new(PENDAPATAN_PENJUALAN, sale.amount),
    )
}

/// Posting for a stock purchase.
pub fn purchase_entry(id: String, purchase: &Purchase) -> JournalEntry {
    automatic(
        id,
        purchase.date,
        format!("Pembelian - {}", purchase.description),
        &purchase.id,
        JournalLine::new(PERSEDIAAN, purchase.amount),
        JournalLine::new(settlement_account(purchase.status), purchase.amount),
    )
}

/// Posting for an expense.
pub fn expense_entry(id: String, expense: &Expense) -> JournalEntry {
    automatic(
        id,
        expense.date,
        format!("Beban {} - {}", expense.category, expense.description),
        &expense.id,
        JournalLine::new(expense.category.account_name(), expense.amount),
        JournalLine::new(settlement_account(expense.status), expense.amount),
    )
}

// =============================================================================
// Summaries
// =============================================================================

/// Footer of the journal screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct JournalSummary {
    pub entries: usize,
    pub total_debit: Money,
    pub total_credit: Money,
    pub is_balanced: bool,
}

impl JournalSummary {
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a JournalEntry>,
    {
        let mut summary = JournalSummary {
            entries: 0,
            total_debit: Money::zero(),
            total_credit: Money::zero(),
            is_balanced: true,
        };
        for entry in entries {
            summary.entries += 1;
            summary.total_debit += entry.total_debit();
            summary.total_credit += entry.total_credit();
        }
        summary.is_balanced = summary.total_debit == summary.total_credit;
        summary
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TrialBalanceRow {
    pub account: String,
    pub class: AccountClass,
    pub debit: Money,
    pub credit: Money,
    /// Balance on the account's normal side; negative when it runs the other way.
    pub balance: Money,
}

/// Per-account totals over a set of journal entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TrialBalance {
    pub rows: Vec<TrialBalanceRow>,
    pub total_debit: Money,
    pub total_credit: Money,
}

impl TrialBalance {
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a JournalEntry>,
    {
        let mut sides: BTreeMap<String, (Money, Money)> = BTreeMap::new();
        for entry in entries {
            for line in &entry.debit {
                sides.entry(line.account.clone()).or_default().0 += line.amount;
            }
            for line in &entry.credit {
                sides.entry(line.account.clone()).or_default().1 += line.amount;
            }
        }

        let rows: Vec<TrialBalanceRow> = sides
            .into_iter()
            .map(|(account, (debit, credit))| {
                let class = AccountClass::of(&account);
                let balance = if class.is_debit_normal() {
                    debit - credit
                } else {
                    credit - debit
                };
                TrialBalanceRow {
                    account,
                    class,
                    debit,
                    credit,
                    balance,
                }
            })
            .collect();

        TrialBalance {
            total_debit: rows.iter().map(|r| r.debit).sum(),
            total_credit: rows.iter().map(|r| r.credit).sum(),
            rows,
        }
    }

    pub fn is_balanced(&self) -> bool {
        self.total_debit == self.total_credit
    }

    pub fn row(&self, account: &str) -> Option<&TrialBalanceRow> {
        self.rows.iter().find(|r| r.account == account)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ExpenseCategory, TransactionKind};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn rp(v: i64) -> Money {
        Money::from_rupiah(v)
    }

    fn form(debit: Vec<JournalLine>, credit: Vec<JournalLine>) -> ManualJournal {
        ManualJournal {
            date: date(),
            description: "Setoran modal awal".to_string(),
            reference: "JM-001".to_string(),
            debit,
            credit,
        }
    }

    fn sale(status: PaymentStatus) -> Transaction {
        Transaction {
            id: "TRX000001".to_string(),
            date: date(),
            customer: "Pelanggan Umum".to_string(),
            kind: TransactionKind::Penjualan,
            amount: rp(16_000),
            description: "Kopi Susu (2)".to_string(),
            status,
            items: vec![],
            payment_method: None,
            cash_received: None,
            change: None,
        }
    }

    #[test]
    fn test_account_class() {
        assert_eq!(AccountClass::of("Pendapatan Lain-lain"), AccountClass::Revenue);
        assert_eq!(AccountClass::of("Modal"), AccountClass::Equity);
        assert_eq!(AccountClass::of("Piutang Usaha"), AccountClass::Asset);
        assert!(AccountClass::Expense.is_debit_normal());
        assert!(!AccountClass::Liability.is_debit_normal());
    }

    #[test]
    fn test_manual_journal_valid() {
        let journal = form(
            vec![JournalLine::new(" Kas ", rp(1_000_000)), JournalLine::new("", Money::zero())],
            vec![JournalLine::new("Modal", rp(1_000_000))],
        )
        .validate()
        .unwrap();

        assert_eq!(journal.debit.len(), 1);
        assert_eq!(journal.debit[0].account, "Kas");

        let entry = journal.into_entry("JRN000001".to_string());
        assert_eq!(entry.kind, JournalKind::Manual);
        assert!(entry.is_balanced());
    }

    #[test]
    fn test_manual_journal_requires_header() {
        let mut journal = form(
            vec![JournalLine::new("Kas", rp(1))],
            vec![JournalLine::new("Modal", rp(1))],
        );
        journal.reference = "  ".to_string();
        assert_eq!(
            journal.validate(),
            Err(CoreError::Validation(ValidationError::required("reference")))
        );
    }

    #[test]
    fn test_manual_journal_rejects_half_filled_line() {
        let journal = form(
            vec![JournalLine::new("Kas", Money::zero())],
            vec![JournalLine::new("Modal", rp(1))],
        );
        assert!(matches!(journal.validate(), Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_manual_journal_rejects_oversized_line() {
        let huge = Money::from_rupiah(crate::MAX_AMOUNT + 1);
        let journal = form(
            vec![JournalLine::new("Kas", huge)],
            vec![JournalLine::new("Modal", huge)],
        );
        assert!(matches!(
            journal.validate(),
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn test_manual_journal_unbalanced() {
        let journal = form(
            vec![JournalLine::new("Kas", rp(100_000))],
            vec![JournalLine::new("Modal", rp(90_000))],
        );
        assert_eq!(
            journal.validate(),
            Err(CoreError::Unbalanced {
                debit: rp(100_000),
                credit: rp(90_000)
            })
        );
    }

    #[test]
    fn test_manual_journal_needs_both_sides() {
        let journal = form(vec![JournalLine::new("Kas", rp(100_000))], vec![]);
        assert!(journal.validate().is_err());
    }

    #[test]
    fn test_sale_entry_depends_on_status() {
        let paid = sale_entry("JRN000001".to_string(), &sale(PaymentStatus::Lunas));
        assert_eq!(paid.debit[0].account, KAS);
        assert_eq!(paid.credit[0].account, PENDAPATAN_PENJUALAN);
        assert_eq!(paid.description, "Penjualan - Kopi Susu (2)");
        assert_eq!(paid.reference, "TRX000001");
        assert_eq!(paid.kind, JournalKind::Automatic);

        let unpaid = sale_entry("JRN000002".to_string(), &sale(PaymentStatus::BelumLunas));
        assert_eq!(unpaid.debit[0].account, PIUTANG_USAHA);
    }

    #[test]
    fn test_purchase_entry() {
        let purchase = Purchase {
            id: "PUR000001".to_string(),
            date: date(),
            supplier: "CV Maju".to_string(),
            amount: rp(500_000),
            description: "Stok gula".to_string(),
            status: PaymentStatus::BelumLunas,
            items: vec![],
            payment_method: None,
        };
        let entry = purchase_entry("JRN000001".to_string(), &purchase);
        assert_eq!(entry.debit[0].account, PERSEDIAAN);
        assert_eq!(entry.credit[0].account, HUTANG_USAHA);
        assert_eq!(entry.description, "Pembelian - Stok gula");
        assert!(entry.is_balanced());
    }

    #[test]
    fn test_expense_entry() {
        let expense = Expense {
            id: "EXP000001".to_string(),
            date: date(),
            description: "Listrik".to_string(),
            amount: rp(250_000),
            category: ExpenseCategory::Operasional,
            status: PaymentStatus::Lunas,
        };
        let entry = expense_entry("JRN000001".to_string(), &expense);
        assert_eq!(entry.debit[0].account, "Beban Operasional");
        assert_eq!(entry.credit[0].account, KAS);
        assert_eq!(entry.description, "Beban Operasional - Listrik");
    }

    #[test]
    fn test_cash_flow_activity_of_entry() {
        let equipment = form(
            vec![JournalLine::new("Peralatan", rp(300_000))],
            vec![JournalLine::new("Kas", rp(300_000))],
        )
        .into_entry("J1".to_string());
        assert_eq!(CashFlowActivity::of_entry(&equipment), CashFlowActivity::Investing);
        assert_eq!(cash_movement(&equipment), rp(-300_000));

        let capital = form(
            vec![JournalLine::new("Bank", rp(1_000_000))],
            vec![JournalLine::new("Modal", rp(1_000_000))],
        )
        .into_entry("J2".to_string());
        assert_eq!(CashFlowActivity::of_entry(&capital), CashFlowActivity::Financing);
        assert_eq!(cash_movement(&capital), rp(1_000_000));

        let paid_sale = sale_entry("J3".to_string(), &sale(PaymentStatus::Lunas));
        assert_eq!(CashFlowActivity::of_entry(&paid_sale), CashFlowActivity::Operating);
    }

    #[test]
    fn test_summary_and_trial_balance() {
        let entries = vec![
            sale_entry("J1".to_string(), &sale(PaymentStatus::Lunas)),
            form(
                vec![JournalLine::new("Kas", rp(1_000_000))],
                vec![JournalLine::new("Modal", rp(1_000_000))],
            )
            .into_entry("J2".to_string()),
        ];

        let summary = JournalSummary::from_entries(&entries);
        assert_eq!(summary.entries, 2);
        assert_eq!(summary.total_debit, rp(1_016_000));
        assert!(summary.is_balanced);

        let tb = TrialBalance::from_entries(&entries);
        assert!(tb.is_balanced());
        assert_eq!(tb.rows[0].account, "Kas");
        assert_eq!(tb.row("Kas").unwrap().balance, rp(1_016_000));
        assert_eq!(tb.row("Modal").unwrap().balance, rp(1_000_000));
        assert_eq!(tb.row("Pendapatan Penjualan").unwrap().class, AccountClass::Revenue);
    }
}
