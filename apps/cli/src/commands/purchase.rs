//! Purchase commands (Pembelian screen).

use tracing::debug;
use warung_core::Purchase;
use warung_store::{PurchaseFilter, PurchaseOrder};

use crate::args::{PurchaseAddArgs, PurchaseListArgs};
use crate::error::CliResult;
use crate::output::{key_values, Out, Table};
use crate::state::Session;

pub fn add(session: &mut Session, args: PurchaseAddArgs) -> CliResult<Out> {
    let order = PurchaseOrder {
        date: session.date_or_today(args.date),
        supplier: args.supplier,
        description: args.description,
        status: args.status,
        payment_method: args.method,
        items: args.items,
    };
    let purchase = session.books_mut().record_purchase(order)?;

    let mut text = format!(
        "Recorded {} from {}: {} ({})",
        purchase.id,
        purchase.supplier,
        purchase.amount,
        purchase.status.label()
    );
    for item in &purchase.items {
        let stock = session
            .books()
            .product(&item.product_id)
            .map(|p| p.stock.to_string())
            .unwrap_or_else(|_| "-".to_string());
        text.push_str(&format!(
            "\n  {} +{} (stock {})",
            item.product_name, item.quantity, stock
        ));
    }
    Out::new(text, &purchase)
}

fn filter(args: &PurchaseListArgs) -> PurchaseFilter {
    PurchaseFilter {
        query: args.query.clone(),
        status: args.status,
    }
}

pub fn list(session: &Session, args: &PurchaseListArgs) -> CliResult<Out> {
    let purchases = session.books().purchases(&filter(args));
    debug!(count = purchases.len(), "Listing purchases");

    if purchases.is_empty() {
        return Out::new("No purchases", &purchases);
    }
    Out::new(purchase_table(&purchases).render(), &purchases)
}

fn purchase_table(purchases: &[&Purchase]) -> Table {
    let mut table =
        Table::new(&["ID", "Date", "Supplier", "Items", "Amount", "Status"]).align_right(&[3, 4]);
    for p in purchases {
        table.row(vec![
            p.id.clone(),
            p.date.to_string(),
            p.supplier.clone(),
            p.items.len().to_string(),
            p.amount.to_string(),
            p.status.label().to_string(),
        ]);
    }
    table
}

pub fn delete(session: &mut Session, id: &str) -> CliResult<Out> {
    let purchase = session.books_mut().delete_purchase(id.trim())?;
    Out::new(format!("Deleted {}", purchase.id), &purchase)
}

pub fn stats(session: &Session, args: &PurchaseListArgs) -> CliResult<Out> {
    let stats = session.books().purchase_stats(&filter(args));
    let text = key_values(&[
        ("Purchases", stats.count.to_string()),
        ("Total", stats.total.to_string()),
        ("Unpaid", stats.unpaid_total.to_string()),
    ]);
    Out::new(text, &stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{session_with, stock_product};
    use warung_core::{Money, PaymentStatus};
    use warung_store::PurchaseLine;

    fn args(status: PaymentStatus, items: Vec<PurchaseLine>) -> PurchaseAddArgs {
        PurchaseAddArgs {
            supplier: "Toko Grosir".to_string(),
            description: "Belanja mingguan".to_string(),
            items,
            status,
            method: None,
            date: None,
        }
    }

    fn line(name: &str, quantity: i64, cost: i64) -> PurchaseLine {
        PurchaseLine {
            name: name.to_string(),
            category: String::new(),
            quantity,
            cost: Money::from_rupiah(cost),
        }
    }

    #[test]
    fn test_add_restocks_and_creates() {
        let mut s = session_with(&[stock_product("Gula 1kg", 16_000, 13_000, 3)]);

        let out = add(
            &mut s,
            args(
                PaymentStatus::Lunas,
                vec![line("gula 1kg", 10, 14_000), line("Teh Celup", 5, 4_000)],
            ),
        )
        .unwrap();

        assert!(out.text().contains("PUR000001"));
        assert!(out.text().contains("Rp 160.000"));
        let gula = s.product("Gula 1kg").unwrap();
        assert_eq!(gula.stock, 13);
        assert_eq!(gula.cost.rupiah(), 14_000);
        let teh = s.product("Teh Celup").unwrap();
        assert_eq!(teh.price.rupiah(), 5_200);
        assert_eq!(teh.category, "Umum");
    }

    #[test]
    fn test_list_filters_by_status_and_stats() {
        let mut s = session_with(&[]);
        add(&mut s, args(PaymentStatus::Lunas, vec![line("Kopi", 10, 2_000)])).unwrap();
        add(&mut s, args(PaymentStatus::BelumLunas, vec![line("Kopi", 5, 2_000)])).unwrap();

        let unpaid = PurchaseListArgs {
            query: None,
            status: Some(PaymentStatus::BelumLunas),
        };
        let out = list(&s, &unpaid).unwrap();
        assert!(out.text().contains("PUR000002"));
        assert!(!out.text().contains("PUR000001"));

        let totals = stats(&s, &PurchaseListArgs::default()).unwrap();
        assert!(totals.text().contains("Rp 30.000"));
        assert!(totals.text().contains("Rp 10.000"));
    }

    #[test]
    fn test_delete_unknown() {
        let mut s = session_with(&[]);
        assert!(delete(&mut s, "PUR999999").is_err());
    }
}
