//! # Reports
//!
//! Every figure on the dashboard and the Laporan screen, computed on demand
//! from the records. Nothing here is cached or stored.
//!
//! ## Report Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Ledger (borrowed slices)                                               │
//! │    products, transactions, purchases, expenses, journal                 │
//! │          │                                                              │
//! │          ├──► FinancialSummary ──► AccountBalances ──► BalanceSheet     │
//! │          │            │                                                 │
//! │          │            └──────────► IncomeStatement                      │
//! │          │                                                              │
//! │          ├──► CashFlowStatement (journal movements on Kas / Bank)       │
//! │          │                                                              │
//! │          └──► DashboardStats, Inventory/Transaction/Purchase/Expense    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Period Filtering
//! Flow figures (sales, purchases, expenses, journal movements) only count
//! records dated inside the period. Inventory is a snapshot of the current
//! catalog and is never filtered.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::journal::{cash_movement, CashFlowActivity};
use crate::money::Money;
use crate::period::ReportPeriod;
use crate::types::{
    Expense, ExpenseCategory, JournalEntry, PaymentStatus, Product, Purchase, Transaction,
    TransactionKind,
};

/// Share of paid purchases shown as equipment on the balance sheet (10%).
pub const EQUIPMENT_SHARE_BPS: u32 = 1000;

/// Transactions listed on the dashboard.
pub const RECENT_TRANSACTIONS: usize = 5;

// =============================================================================
// Ledger View
// =============================================================================

/// Borrowed view over every record list.
///
/// Lists are expected newest first, as the store keeps them.
#[derive(Debug, Clone, Copy)]
pub struct Ledger<'a> {
    pub products: &'a [Product],
    pub transactions: &'a [Transaction],
    pub purchases: &'a [Purchase],
    pub expenses: &'a [Expense],
    pub journal: &'a [JournalEntry],
}

impl<'a> Ledger<'a> {
    fn sales_in(
        &self,
        period: ReportPeriod,
        today: NaiveDate,
    ) -> impl Iterator<Item = &'a Transaction> + 'a {
        self.transactions
            .iter()
            .filter(move |t| t.kind == TransactionKind::Penjualan && period.contains(t.date, today))
    }

    fn purchases_in(
        &self,
        period: ReportPeriod,
        today: NaiveDate,
    ) -> impl Iterator<Item = &'a Purchase> + 'a {
        self.purchases
            .iter()
            .filter(move |p| period.contains(p.date, today))
    }

    fn expenses_in(
        &self,
        period: ReportPeriod,
        today: NaiveDate,
    ) -> impl Iterator<Item = &'a Expense> + 'a {
        self.expenses
            .iter()
            .filter(move |e| period.contains(e.date, today))
    }

    /// Σ stock × cost over the current catalog.
    pub fn inventory_value(&self) -> Money {
        self.products.iter().map(Product::inventory_value).sum()
    }

    /// Unit cost used for COGS: the product's current cost when it still
    /// exists with a cost above zero, else the cost frozen on the sale.
    fn unit_cost(&self, product_id: &str, snapshot: Option<Money>) -> Money {
        self.products
            .iter()
            .find(|p| p.id == product_id)
            .map(|p| p.cost)
            .filter(Money::is_positive)
            .or(snapshot)
            .unwrap_or_default()
    }
}

// =============================================================================
// Financial Summary
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FinancialSummary {
    pub total_revenue: Money,
    pub total_sales: Money,
    pub total_expenses: Money,
    pub total_purchases: Money,
    pub total_cogs: Money,
    pub gross_profit: Money,
    pub net_income: Money,
    pub inventory_value: Money,
    /// Revenue minus paid expenses and purchases; may be negative.
    pub cash: Money,
    pub total_assets: Money,
    pub total_liabilities: Money,
    pub equity: Money,
}

impl FinancialSummary {
    /// ## Formulas
    /// ```text
    /// revenue      = Σ paid Penjualan
    /// cogs         = Σ paid Penjualan items: qty × unit cost
    /// gross        = revenue − cogs
    /// net          = gross − paid expenses
    /// cash         = revenue − paid expenses − paid purchases
    /// assets       = max(0, cash) + inventory
    /// liabilities  = Σ unpaid purchases
    /// equity       = assets − liabilities
    /// ```
    pub fn compute(ledger: &Ledger<'_>, period: ReportPeriod, today: NaiveDate) -> Self {
        let paid_sales: Vec<&Transaction> = ledger
            .sales_in(period, today)
            .filter(|t| t.status.is_paid())
            .collect();

        let total_revenue: Money = paid_sales.iter().map(|t| t.amount).sum();
        let total_cogs: Money = paid_sales
            .iter()
            .flat_map(|t| t.items.iter())
            .map(|i| ledger.unit_cost(&i.product_id, i.cost).multiply_quantity(i.quantity))
            .sum();

        let total_purchases: Money = ledger
            .purchases_in(period, today)
            .filter(|p| p.status.is_paid())
            .map(|p| p.amount)
            .sum();
        let total_expenses: Money = ledger
            .expenses_in(period, today)
            .filter(|e| e.status.is_paid())
            .map(|e| e.amount)
            .sum();
        let total_liabilities: Money = ledger
            .purchases_in(period, today)
            .filter(|p| !p.status.is_paid())
            .map(|p| p.amount)
            .sum();

        let gross_profit = total_revenue - total_cogs;
        let net_income = gross_profit - total_expenses;
        let inventory_value = ledger.inventory_value();
        let cash = total_revenue - total_expenses - total_purchases;
        let total_assets = cash.non_negative() + inventory_value;

        FinancialSummary {
            total_revenue,
            total_sales: total_revenue,
            total_expenses,
            total_purchases,
            total_cogs,
            gross_profit,
            net_income,
            inventory_value,
            cash,
            total_assets,
            total_liabilities,
            equity: total_assets - total_liabilities,
        }
    }
}

// =============================================================================
// Account Balances
// =============================================================================

/// Headline balances shown on the Laporan screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AccountBalances {
    pub kas: Money,
    pub piutang: Money,
    pub persediaan: Money,
    pub peralatan: Money,
    pub hutang_usaha: Money,
    pub hutang_bank: Money,
    pub modal: Money,
}

impl AccountBalances {
    pub fn compute(ledger: &Ledger<'_>, period: ReportPeriod, today: NaiveDate) -> Self {
        let summary = FinancialSummary::compute(ledger, period, today);

        let piutang: Money = ledger
            .transactions
            .iter()
            .filter(|t| t.status == PaymentStatus::BelumLunas && period.contains(t.date, today))
            .map(|t| t.amount)
            .sum();
        let hutang_bank: Money = ledger
            .expenses_in(period, today)
            .filter(|e| !e.status.is_paid())
            .map(|e| e.amount)
            .sum();

        AccountBalances {
            kas: summary.cash.non_negative(),
            piutang,
            persediaan: summary.inventory_value,
            peralatan: summary.total_purchases.percentage(EQUIPMENT_SHARE_BPS),
            hutang_usaha: summary.total_liabilities,
            hutang_bank,
            modal: summary.equity,
        }
    }
}

// =============================================================================
// Income Statement
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ExpenseLine {
    pub category: ExpenseCategory,
    pub account: String,
    pub amount: Money,
}

/// Laporan Laba Rugi.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct IncomeStatement {
    pub revenue: Money,
    pub cogs: Money,
    pub gross_profit: Money,
    /// One line per category, zero included.
    pub expenses: Vec<ExpenseLine>,
    pub total_expenses: Money,
    pub net_income: Money,
}

impl IncomeStatement {
    pub fn compute(ledger: &Ledger<'_>, period: ReportPeriod, today: NaiveDate) -> Self {
        let summary = FinancialSummary::compute(ledger, period, today);

        let expenses = ExpenseCategory::ALL
            .iter()
            .map(|category| ExpenseLine {
                category: *category,
                account: category.account_name(),
                amount: ledger
                    .expenses_in(period, today)
                    .filter(|e| e.status.is_paid() && e.category == *category)
                    .map(|e| e.amount)
                    .sum(),
            })
            .collect();

        IncomeStatement {
            revenue: summary.total_revenue,
            cogs: summary.total_cogs,
            gross_profit: summary.gross_profit,
            expenses,
            total_expenses: summary.total_expenses,
            net_income: summary.net_income,
        }
    }
}

// =============================================================================
// Balance Sheet
// =============================================================================

/// Neraca.
///
/// Equity is whatever is left after liabilities, so the sheet always
/// balances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BalanceSheet {
    pub kas: Money,
    pub piutang: Money,
    pub persediaan: Money,
    pub current_assets: Money,
    pub peralatan: Money,
    pub fixed_assets: Money,
    pub total_assets: Money,
    pub current_liabilities: Money,
    pub long_term_liabilities: Money,
    pub total_liabilities: Money,
    pub equity: Money,
}

impl BalanceSheet {
    pub fn from_balances(balances: &AccountBalances) -> Self {
        let current_assets = balances.kas + balances.piutang + balances.persediaan;
        let fixed_assets = balances.peralatan;
        let total_assets = current_assets + fixed_assets;
        let total_liabilities = balances.hutang_usaha + balances.hutang_bank;

        BalanceSheet {
            kas: balances.kas,
            piutang: balances.piutang,
            persediaan: balances.persediaan,
            current_assets,
            peralatan: balances.peralatan,
            fixed_assets,
            total_assets,
            current_liabilities: balances.hutang_usaha,
            long_term_liabilities: balances.hutang_bank,
            total_liabilities,
            equity: total_assets - total_liabilities,
        }
    }

    pub fn compute(ledger: &Ledger<'_>, period: ReportPeriod, today: NaiveDate) -> Self {
        BalanceSheet::from_balances(&AccountBalances::compute(ledger, period, today))
    }

    pub fn is_balanced(&self) -> bool {
        self.total_assets == self.total_liabilities + self.equity
    }
}

// =============================================================================
// Cash Flow
// =============================================================================

/// Laporan Arus Kas, built from journal movements on Kas and Bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CashFlowStatement {
    pub operating: Money,
    pub investing: Money,
    pub financing: Money,
    pub net_change: Money,
    pub opening_cash: Money,
    pub closing_cash: Money,
}

impl CashFlowStatement {
    pub fn compute(journal: &[JournalEntry], period: ReportPeriod, today: NaiveDate) -> Self {
        let start = period.start(today);

        let opening_cash: Money = match start {
            Some(start) => journal
                .iter()
                .filter(|e| e.date < start)
                .map(cash_movement)
                .sum(),
            None => Money::zero(),
        };

        let mut operating = Money::zero();
        let mut investing = Money::zero();
        let mut financing = Money::zero();
        for entry in journal.iter().filter(|e| period.contains(e.date, today)) {
            let movement = cash_movement(entry);
            if movement.is_zero() {
                continue;
            }
            match CashFlowActivity::of_entry(entry) {
                CashFlowActivity::Operating => operating += movement,
                CashFlowActivity::Investing => investing += movement,
                CashFlowActivity::Financing => financing += movement,
            }
        }

        let net_change = operating + investing + financing;
        CashFlowStatement {
            operating,
            investing,
            financing,
            net_change,
            opening_cash,
            closing_cash: opening_cash + net_change,
        }
    }
}

// =============================================================================
// Screen Statistics
// =============================================================================

/// Dashboard cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DashboardStats {
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub today_revenue: Money,
    pub today_sales_count: usize,
    pub today_outflow: Money,
    pub today_outflow_count: usize,
    pub product_count: usize,
    pub low_stock: Vec<Product>,
    pub out_of_stock: Vec<Product>,
    pub net_income: Money,
    pub month_revenue: Money,
    pub recent_transactions: Vec<Transaction>,
    /// No products and no transactions yet.
    pub is_fresh_start: bool,
}

impl DashboardStats {
    pub fn compute(ledger: &Ledger<'_>, today: NaiveDate) -> Self {
        let today_sales: Vec<&Transaction> = ledger
            .transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Penjualan && t.date == today)
            .collect();
        let today_purchases = ledger.purchases.iter().filter(|p| p.date == today);
        let today_expenses = ledger.expenses.iter().filter(|e| e.date == today);

        let today_outflow = today_purchases.clone().map(|p| p.amount).sum::<Money>()
            + today_expenses.clone().map(|e| e.amount).sum::<Money>();

        DashboardStats {
            date: today,
            today_revenue: today_sales.iter().map(|t| t.amount).sum(),
            today_sales_count: today_sales.len(),
            today_outflow,
            today_outflow_count: today_purchases.count() + today_expenses.count(),
            product_count: ledger.products.len(),
            low_stock: ledger
                .products
                .iter()
                .filter(|p| p.is_low_stock())
                .cloned()
                .collect(),
            out_of_stock: ledger
                .products
                .iter()
                .filter(|p| p.is_out_of_stock())
                .cloned()
                .collect(),
            net_income: FinancialSummary::compute(ledger, ReportPeriod::All, today).net_income,
            month_revenue: ledger
                .sales_in(ReportPeriod::ThisMonth, today)
                .map(|t| t.amount)
                .sum(),
            recent_transactions: ledger
                .transactions
                .iter()
                .take(RECENT_TRANSACTIONS)
                .cloned()
                .collect(),
            is_fresh_start: ledger.products.is_empty() && ledger.transactions.is_empty(),
        }
    }
}

/// Produk screen footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InventoryStats {
    pub total_products: usize,
    pub low_stock_count: usize,
    /// Σ price × stock.
    pub retail_value: Money,
}

impl InventoryStats {
    pub fn compute(products: &[Product]) -> Self {
        InventoryStats {
            total_products: products.len(),
            low_stock_count: products.iter().filter(|p| p.is_low_stock()).count(),
            retail_value: products.iter().map(Product::retail_value).sum(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TransactionStats {
    pub count: usize,
    pub sales_total: Money,
    pub purchases_total: Money,
}

impl TransactionStats {
    pub fn compute<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut stats = TransactionStats {
            count: 0,
            sales_total: Money::zero(),
            purchases_total: Money::zero(),
        };
        for t in transactions {
            stats.count += 1;
            match t.kind {
                TransactionKind::Penjualan => stats.sales_total += t.amount,
                TransactionKind::Pembelian => stats.purchases_total += t.amount,
            }
        }
        stats
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PurchaseStats {
    pub count: usize,
    pub total: Money,
    pub unpaid_total: Money,
}

impl PurchaseStats {
    pub fn compute<'a, I>(purchases: I) -> Self
    where
        I: IntoIterator<Item = &'a Purchase>,
    {
        let mut stats = PurchaseStats {
            count: 0,
            total: Money::zero(),
            unpaid_total: Money::zero(),
        };
        for p in purchases {
            stats.count += 1;
            stats.total += p.amount;
            if !p.status.is_paid() {
                stats.unpaid_total += p.amount;
            }
        }
        stats
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ExpenseStats {
    pub total: Money,
    pub paid: Money,
    pub unpaid: Money,
}

impl ExpenseStats {
    pub fn compute<'a, I>(expenses: I) -> Self
    where
        I: IntoIterator<Item = &'a Expense>,
    {
        let mut stats = ExpenseStats {
            total: Money::zero(),
            paid: Money::zero(),
            unpaid: Money::zero(),
        };
        for e in expenses {
            stats.total += e.amount;
            if e.status.is_paid() {
                stats.paid += e.amount;
            } else {
                stats.unpaid += e.amount;
            }
        }
        stats
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
