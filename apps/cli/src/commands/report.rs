//! # Report Commands
//!
//! The Laporan screen plus the dashboard. Every figure is recomputed from
//! the records on each call.
//!
//! ```text
//! report summary   ──► FinancialSummary   (records)
//! report accounts  ──► AccountBalances    (records)
//! report income    ──► IncomeStatement    (records)
//! report balance   ──► BalanceSheet       (records)
//! report cashflow  ──► CashFlowStatement  (journal: Kas and Bank lines)
//! report dashboard ──► DashboardStats     (today)
//! ```

use warung_core::ReportPeriod;

use crate::error::CliResult;
use crate::output::{key_values, Out, Table};
use crate::state::Session;

fn title(name: &str, period: ReportPeriod) -> String {
    format!("{} ({})", name, period.label())
}

pub fn summary(session: &Session, period: ReportPeriod) -> CliResult<Out> {
    let s = session.books().financial_summary(period, session.today());
    let body = key_values(&[
        ("Revenue", s.total_revenue.to_string()),
        ("Sales", s.total_sales.to_string()),
        ("Cost of goods sold", s.total_cogs.to_string()),
        ("Gross profit", s.gross_profit.to_string()),
        ("Expenses", s.total_expenses.to_string()),
        ("Net income", s.net_income.to_string()),
        ("Purchases", s.total_purchases.to_string()),
        ("Cash", s.cash.to_string()),
        ("Inventory", s.inventory_value.to_string()),
        ("Total assets", s.total_assets.to_string()),
        ("Total liabilities", s.total_liabilities.to_string()),
        ("Equity", s.equity.to_string()),
    ]);
    Out::new(format!("{}\n\n{}", title("Ringkasan Keuangan", period), body), &s)
}

pub fn accounts(session: &Session, period: ReportPeriod) -> CliResult<Out> {
    let b = session.books().account_balances(period, session.today());
    let body = key_values(&[
        ("Kas", b.kas.to_string()),
        ("Piutang Usaha", b.piutang.to_string()),
        ("Persediaan", b.persediaan.to_string()),
        ("Peralatan", b.peralatan.to_string()),
        ("Hutang Usaha", b.hutang_usaha.to_string()),
        ("Hutang Bank", b.hutang_bank.to_string()),
        ("Modal", b.modal.to_string()),
    ]);
    Out::new(format!("{}\n\n{}", title("Saldo Akun", period), body), &b)
}

pub fn income(session: &Session, period: ReportPeriod) -> CliResult<Out> {
    let s = session.books().income_statement(period, session.today());

    let mut pairs = vec![
        ("Pendapatan Penjualan", s.revenue.to_string()),
        ("Harga Pokok Penjualan", format!("({})", s.cogs)),
        ("Laba Kotor", s.gross_profit.to_string()),
    ];
    for line in &s.expenses {
        pairs.push((line.account.as_str(), format!("({})", line.amount)));
    }
    pairs.push(("Total Beban", format!("({})", s.total_expenses)));
    pairs.push(("Laba Bersih", s.net_income.to_string()));

    Out::new(
        format!("{}\n\n{}", title("Laba Rugi", period), key_values(&pairs)),
        &s,
    )
}

pub fn balance(session: &Session, period: ReportPeriod) -> CliResult<Out> {
    let s = session.books().balance_sheet(period, session.today());
    let assets = key_values(&[
        ("Kas", s.kas.to_string()),
        ("Piutang Usaha", s.piutang.to_string()),
        ("Persediaan", s.persediaan.to_string()),
        ("Aset Lancar", s.current_assets.to_string()),
        ("Peralatan", s.peralatan.to_string()),
        ("Aset Tetap", s.fixed_assets.to_string()),
        ("Total Aset", s.total_assets.to_string()),
    ]);
    let claims = key_values(&[
        ("Kewajiban Lancar", s.current_liabilities.to_string()),
        ("Kewajiban Jangka Panjang", s.long_term_liabilities.to_string()),
        ("Total Kewajiban", s.total_liabilities.to_string()),
        ("Modal", s.equity.to_string()),
        ("Total Kewajiban + Modal", (s.total_liabilities + s.equity).to_string()),
    ]);
    let check = if s.is_balanced() {
        "Balanced"
    } else {
        "NOT balanced"
    };

    Out::new(
        format!(
            "{}\n\nAset\n{}\n\nKewajiban dan Modal\n{}\n\n{}",
            title("Neraca", period),
            assets,
            claims,
            check
        ),
        &s,
    )
}

pub fn cash_flow(session: &Session, period: ReportPeriod) -> CliResult<Out> {
    let s = session.books().cash_flow(period, session.today());
    let body = key_values(&[
        ("Aktivitas Operasi", s.operating.to_string()),
        ("Aktivitas Investasi", s.investing.to_string()),
        ("Aktivitas Pendanaan", s.financing.to_string()),
        ("Kenaikan Kas Bersih", s.net_change.to_string()),
        ("Kas Awal", s.opening_cash.to_string()),
        ("Kas Akhir", s.closing_cash.to_string()),
    ]);
    Out::new(format!("{}\n\n{}", title("Arus Kas", period), body), &s)
}

pub fn dashboard(session: &Session) -> CliResult<Out> {
    let d = session.books().dashboard(session.today());
    let store = &session.config().store.name;

    if d.is_fresh_start {
        return Out::new(
            format!(
                "{} - {}\n\nNo products or transactions yet. Add a product with \
                 `product add`, record a purchase, or load demo data with `seed`.",
                store, d.date
            ),
            &d,
        );
    }

    let mut text = format!(
        "{} - {}\n\n{}",
        store,
        d.date,
        key_values(&[
            ("Sales today", format!("{} ({})", d.today_revenue, d.today_sales_count)),
            ("Spent today", format!("{} ({})", d.today_outflow, d.today_outflow_count)),
            ("Sales this month", d.month_revenue.to_string()),
            ("Net income", d.net_income.to_string()),
            ("Products", d.product_count.to_string()),
        ])
    );

    if !d.low_stock.is_empty() || !d.out_of_stock.is_empty() {
        let mut table = Table::new(&["Stock alert", "Stock", "Min"]).align_right(&[1, 2]);
        for p in &d.out_of_stock {
            table.row(vec![p.name.clone(), p.stock.to_string(), p.min_stock.to_string()]);
        }
        for p in d.low_stock.iter().filter(|p| !p.is_out_of_stock()) {
            table.row(vec![p.name.clone(), p.stock.to_string(), p.min_stock.to_string()]);
        }
        text.push_str("\n\n");
        text.push_str(&table.render());
    }

    if !d.recent_transactions.is_empty() {
        let mut table = Table::new(&["Recent", "Date", "Customer", "Amount"]).align_right(&[3]);
        for t in &d.recent_transactions {
            table.row(vec![
                t.id.clone(),
                t.date.to_string(),
                t.customer.clone(),
                t.amount.to_string(),
            ]);
        }
        text.push_str("\n\n");
        text.push_str(&table.render());
    }

    Out::new(text, &d)
}
