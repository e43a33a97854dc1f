//! # Sale Commands
//!
//! Checkout and the Transaksi screen.
//!
//! ## Checkout
//! ```text
//! pay --cash 50rb
//!      │
//!      ▼
//! Tender { Tunai, 50.000 } ──► Books::checkout(cart, tender, date)
//!                                   │
//!              ┌────────────────────┼─────────────────────┐
//!              ▼                    ▼                     ▼
//!        stock checked        sale recorded         journal posted
//!                                   │
//!                                   ▼
//!                     Receipt ──► printed, cart emptied
//! ```

use tracing::debug;
use warung_core::{PaymentMethod, Tender, Transaction};
use warung_store::{Receipt, TransactionFilter};

use crate::args::{PayArgs, TransactionListArgs};
use crate::error::{CliError, CliResult};
use crate::output::{key_values, Out, Table};
use crate::state::Session;

const RECEIPT_WIDTH: usize = 32;

// =============================================================================
// Checkout
// =============================================================================

pub fn pay(session: &mut Session, args: PayArgs) -> CliResult<Out> {
    let cash = match (args.method, args.exact) {
        (PaymentMethod::Tunai, true) => Some(session.cart().total()),
        (PaymentMethod::Tunai, false) => args.cash,
        (_, true) => {
            return Err(CliError::usage("--exact only applies to tunai"));
        }
        (_, false) => None,
    };
    let tender = Tender::new(args.method, cash);
    let date = session.date_or_today(args.date);

    let receipt = {
        let (books, cart) = session.books_and_cart();
        books.checkout(cart, tender, date)?
    };

    let text = render_receipt(session, &receipt);
    Out::new(text, &receipt)
}

/// The printed receipt.
///
/// ```text
///             Warung
/// --------------------------------
/// TRX000001            2024-05-17
/// Pelanggan Umum
/// --------------------------------
/// Kopi Susu
///   2 x Rp 8.000        Rp 16.000
/// --------------------------------
/// Total                 Rp 16.000
/// Tunai                 Rp 20.000
/// Kembali                Rp 4.000
/// --------------------------------
///     Terima kasih
/// ```
pub fn render_receipt(session: &Session, receipt: &Receipt) -> String {
    let store = &session.config().store;
    let rule = "-".repeat(RECEIPT_WIDTH);
    let mut lines = vec![centered(&store.name)];
    if let Some(address) = &store.address {
        lines.push(centered(address));
    }
    lines.push(rule.clone());
    lines.push(spread(&receipt.transaction_id, &receipt.date.to_string()));
    lines.push(receipt.customer.clone());
    lines.push(rule.clone());

    for item in &receipt.items {
        lines.push(item.product_name.clone());
        lines.push(spread(
            &format!("  {} x {}", item.quantity, item.price),
            &item.line_total().to_string(),
        ));
    }

    lines.push(rule.clone());
    lines.push(spread("Total", &receipt.total.to_string()));
    match (receipt.cash_received, receipt.change) {
        (Some(cash), Some(change)) => {
            lines.push(spread(receipt.payment_method.label(), &cash.to_string()));
            lines.push(spread("Kembali", &change.to_string()));
        }
        _ => lines.push(spread("Bayar", receipt.payment_method.label())),
    }

    if !store.receipt_footer.trim().is_empty() {
        lines.push(rule);
        lines.push(centered(&store.receipt_footer));
    }
    lines.join("\n")
}

fn spread(left: &str, right: &str) -> String {
    let used = left.chars().count() + right.chars().count();
    let gap = RECEIPT_WIDTH.saturating_sub(used).max(1);
    format!("{}{}{}", left, " ".repeat(gap), right)
}

fn centered(text: &str) -> String {
    let pad = RECEIPT_WIDTH.saturating_sub(text.chars().count()) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

// =============================================================================
// Transaksi Screen
// =============================================================================

fn filter(args: &TransactionListArgs) -> TransactionFilter {
    TransactionFilter {
        query: args.query.clone(),
        kind: args.kind,
    }
}

pub fn list(session: &Session, args: &TransactionListArgs) -> CliResult<Out> {
    let transactions = session.books().transactions(&filter(args));
    debug!(count = transactions.len(), "Listing transactions");

    if transactions.is_empty() {
        return Out::new("No transactions", &transactions);
    }

    let mut table = Table::new(&["ID", "Date", "Customer", "Type", "Amount", "Status", "Method"])
        .align_right(&[4]);
    for t in &transactions {
        table.row(vec![
            t.id.clone(),
            t.date.to_string(),
            t.customer.clone(),
            t.kind.label().to_string(),
            t.amount.to_string(),
            t.status.label().to_string(),
            t.payment_method.map(|m| m.label()).unwrap_or("-").to_string(),
        ]);
    }
    Out::new(table.render(), &transactions)
}

pub fn show(session: &Session, id: &str) -> CliResult<Out> {
    let transaction = session.books().transaction(id.trim())?;
    Out::new(render_transaction(transaction), transaction)
}

fn render_transaction(t: &Transaction) -> String {
    let mut pairs = vec![
        ("ID", t.id.clone()),
        ("Date", t.date.to_string()),
        ("Customer", t.customer.clone()),
        ("Type", t.kind.label().to_string()),
        ("Status", t.status.label().to_string()),
        ("Amount", t.amount.to_string()),
    ];
    if let Some(method) = t.payment_method {
        pairs.push(("Method", method.label().to_string()));
    }
    if let Some(cash) = t.cash_received {
        pairs.push(("Cash", cash.to_string()));
    }
    if let Some(change) = t.change {
        pairs.push(("Change", change.to_string()));
    }

    let mut text = key_values(&pairs);
    if !t.items.is_empty() {
        let mut table = Table::new(&["Product", "Qty", "Price", "Subtotal"]).align_right(&[1, 2, 3]);
        for item in &t.items {
            table.row(vec![
                item.product_name.clone(),
                item.quantity.to_string(),
                item.price.to_string(),
                item.line_total().to_string(),
            ]);
        }
        text.push_str("\n\n");
        text.push_str(&table.render());
    } else if !t.description.is_empty() {
        text.push_str("\n\n");
        text.push_str(&t.description);
    }
    text
}

pub fn delete(session: &mut Session, id: &str) -> CliResult<Out> {
    let transaction = session.books_mut().delete_transaction(id.trim())?;
    Out::new(format!("Deleted {}", transaction.id), &transaction)
}

pub fn stats(session: &Session, args: &TransactionListArgs) -> CliResult<Out> {
    let stats = session.books().transaction_stats(&filter(args));
    let text = key_values(&[
        ("Transactions", stats.count.to_string()),
        ("Sales", stats.sales_total.to_string()),
        ("Purchases", stats.purchases_total.to_string()),
    ]);
    Out::new(text, &stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart;
    use crate::commands::testing::{session_with, stock_product};
    use warung_core::{CoreError, Money};
    use warung_store::StoreError;

    fn pay_args(method: PaymentMethod, cash: Option<i64>, exact: bool) -> PayArgs {
        PayArgs {
            method,
            cash: cash.map(Money::from_rupiah),
            exact,
            date: None,
        }
    }

    fn session_with_cart() -> Session {
        let mut s = session_with(&[stock_product("Kopi Susu", 8_000, 5_000, 10)]);
        cart::add(&mut s, "Kopi Susu", 2).unwrap();
        s
    }

    #[test]
    fn test_pay_cash_prints_change() {
        let mut s = session_with_cart();

        let out = pay(&mut s, pay_args(PaymentMethod::Tunai, Some(20_000), false)).unwrap();

        assert!(out.text().contains("TRX000001"));
        assert!(out.text().contains("Kembali"));
        assert!(out.text().contains("Rp 4.000"));
        assert!(s.cart().is_empty());
        assert_eq!(s.product("Kopi Susu").unwrap().stock, 8);
    }

    #[test]
    fn test_pay_exact() {
        let mut s = session_with_cart();
        pay(&mut s, pay_args(PaymentMethod::Tunai, None, true)).unwrap();

        let t = s.books().transaction("TRX000001").unwrap();
        assert_eq!(t.change, Some(Money::zero()));
    }

    #[test]
    fn test_pay_short_cash_keeps_cart() {
        let mut s = session_with_cart();

        let err = pay(&mut s, pay_args(PaymentMethod::Tunai, Some(10_000), false)).unwrap_err();

        assert!(matches!(
            err,
            CliError::Store(StoreError::Core(CoreError::InsufficientPayment { .. }))
        ));
        assert_eq!(s.cart().item_count(), 1);
    }

    #[test]
    fn test_pay_transfer_has_no_change() {
        let mut s = session_with_cart();
        let out = pay(&mut s, pay_args(PaymentMethod::Transfer, None, false)).unwrap();
        assert!(out.text().contains("Transfer"));
        assert!(!out.text().contains("Kembali"));
    }

    #[test]
    fn test_exact_requires_tunai() {
        let mut s = session_with_cart();
        let err = pay(&mut s, pay_args(PaymentMethod::Kredit, None, true)).unwrap_err();
        assert!(matches!(err, CliError::Usage(_)));
    }

    #[test]
    fn test_list_show_and_delete() {
        let mut s = session_with_cart();
        pay(&mut s, pay_args(PaymentMethod::Tunai, Some(50_000), false)).unwrap();

        let listed = list(&s, &TransactionListArgs::default()).unwrap();
        assert!(listed.text().contains("Penjualan"));

        let shown = show(&s, "TRX000001").unwrap();
        assert!(shown.text().contains("Kopi Susu"));

        let summary = stats(&s, &TransactionListArgs::default()).unwrap();
        assert!(summary.text().contains("Rp 16.000"));

        delete(&mut s, "TRX000001").unwrap();
        assert_eq!(list(&s, &TransactionListArgs::default()).unwrap().text(), "No transactions");
    }

    #[test]
    fn test_spread_fills_receipt_width() {
        assert_eq!(spread("Total", "Rp 1").chars().count(), RECEIPT_WIDTH);
    }
}
