//! # Product Commands
//!
//! The Produk screen: catalog maintenance and stock figures.
//!
//! ## Product Lookup
//! ```text
//! product edit "Kopi Susu" --price 9rb
//!               │
//!               ▼
//!   id match? ──yes──► product
//!      │ no
//!      ▼
//!   exact name (case-insensitive)? ──yes──► product
//!      │ no
//!      ▼
//!   "Product not found: Kopi Susu"
//! ```

use tracing::debug;
use warung_core::{NewProduct, Product, ProductUpdate};
use warung_store::{ProductFilter, StockMovement};

use crate::args::{ProductAddArgs, ProductEditArgs};
use crate::error::{CliError, CliResult};
use crate::output::{key_values, Out, Table};
use crate::state::Session;

pub fn add(session: &mut Session, args: ProductAddArgs) -> CliResult<Out> {
    let product = session.books_mut().add_product(NewProduct {
        name: args.name,
        category: args.category,
        price: args.price,
        cost: args.cost,
        stock: args.stock,
        min_stock: args.min_stock,
        supplier: args.supplier,
    })?;

    Out::new(
        format!("Added {} ({}) at {}", product.name, product.id, product.price),
        &product,
    )
}

pub fn edit(session: &mut Session, args: ProductEditArgs) -> CliResult<Out> {
    let id = session.product(&args.product)?.id;
    let update = ProductUpdate {
        name: args.name,
        category: args.category,
        price: args.price,
        cost: args.cost,
        stock: args.stock,
        min_stock: args.min_stock,
        supplier: args.supplier,
    };
    if update.is_empty() {
        return Err(CliError::usage(
            "Nothing to change; pass at least one of --name, --category, --price, --cost, --stock, --min-stock, --supplier",
        ));
    }

    let product = session.books_mut().update_product(&id, update)?;
    Out::new(format!("Updated {}", product.name), &product)
}

pub fn delete(session: &mut Session, product: &str) -> CliResult<Out> {
    let id = session.product(product)?.id;
    let product = session.books_mut().delete_product(&id)?;
    Out::new(format!("Deleted {}", product.name), &product)
}

pub fn list(session: &Session, query: Option<&str>, low_stock: bool) -> CliResult<Out> {
    let filter = ProductFilter {
        query: query.map(str::to_string),
    };
    let products: Vec<&Product> = session
        .books()
        .products(&filter)
        .into_iter()
        .filter(|p| !low_stock || p.is_low_stock())
        .collect();
    debug!(count = products.len(), low_stock, "Listing products");

    if products.is_empty() {
        return Out::new("No products", &products);
    }
    Out::new(product_table(&products).render(), &products)
}

pub fn restock(session: &mut Session, product: &str, quantity: i64) -> CliResult<Out> {
    let id = session.product(product)?.id;
    let product = session
        .books_mut()
        .adjust_stock(&id, quantity, StockMovement::Purchase)?;
    Out::new(
        format!("{} stock is now {}", product.name, product.stock),
        &product,
    )
}

pub fn stats(session: &Session) -> CliResult<Out> {
    let books = session.books();
    let stats = books.inventory_stats();
    let inventory_value = books.store().ledger().inventory_value();

    let text = key_values(&[
        ("Products", stats.total_products.to_string()),
        ("Low stock", stats.low_stock_count.to_string()),
        ("Value at cost", inventory_value.to_string()),
        ("Value at price", stats.retail_value.to_string()),
    ]);
    Out::new(text, &stats)
}

/// The catalog as a table, flagging stock alerts.
pub fn product_table(products: &[&Product]) -> Table {
    let mut table = Table::new(&["Name", "Category", "Price", "Cost", "Stock", "Min", ""])
        .align_right(&[2, 3, 4, 5]);
    for p in products {
        let flag = if p.is_out_of_stock() {
            "Stok Habis"
        } else if p.is_low_stock() {
            "Stok Rendah"
        } else {
            ""
        };
        table.row(vec![
            p.name.clone(),
            p.category.clone(),
            p.price.to_string(),
            p.cost.to_string(),
            p.stock.to_string(),
            p.min_stock.to_string(),
            flag.to_string(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{session_with, stock_product};
    use warung_core::Money;

    fn add_args(name: &str, stock: i64) -> ProductAddArgs {
        ProductAddArgs {
            name: name.to_string(),
            category: "Minuman".to_string(),
            price: Money::from_rupiah(8_000),
            cost: Money::from_rupiah(5_000),
            stock,
            min_stock: None,
            supplier: None,
        }
    }

    fn edit_args(product: &str) -> ProductEditArgs {
        ProductEditArgs {
            product: product.to_string(),
            name: None,
            category: None,
            price: None,
            cost: None,
            stock: None,
            min_stock: None,
            supplier: None,
        }
    }

    #[test]
    fn test_add_and_list() {
        let mut s = session_with(&[]);
        let out = add(&mut s, add_args("Kopi Susu", 10)).unwrap();
        assert!(out.text().contains("Rp 8.000"));

        let listed = list(&s, None, false).unwrap();
        assert!(listed.text().contains("Kopi Susu"));
        assert!(listed.text().contains("Minuman"));
        assert_eq!(list(&s, Some("roti"), false).unwrap().text(), "No products");
    }

    #[test]
    fn test_low_stock_filter() {
        let mut s = session_with(&[
            stock_product("Kopi Susu", 8_000, 5_000, 10),
            stock_product("Es Teh", 5_000, 2_000, 0),
        ]);

        let text = list(&s, None, true).unwrap().text().to_string();
        assert!(text.contains("Es Teh"));
        assert!(text.contains("Stok Habis"));
        assert!(!text.contains("Kopi Susu"));

        restock(&mut s, "Es Teh", 12).unwrap();
        assert_eq!(list(&s, None, true).unwrap().text(), "No products");
    }

    #[test]
    fn test_edit_requires_a_change() {
        let mut s = session_with(&[stock_product("Kopi Susu", 8_000, 5_000, 10)]);
        assert!(edit(&mut s, edit_args("Kopi Susu")).is_err());

        let mut args = edit_args("kopi susu");
        args.price = Some(Money::from_rupiah(9_000));
        edit(&mut s, args).unwrap();
        assert_eq!(s.product("Kopi Susu").unwrap().price.rupiah(), 9_000);
    }

    #[test]
    fn test_delete_and_stats() {
        let mut s = session_with(&[
            stock_product("Kopi Susu", 8_000, 5_000, 10),
            stock_product("Roti Bakar", 12_000, 7_000, 2),
        ]);

        let out = stats(&s).unwrap();
        assert!(out.text().contains("Rp 104.000"));
        assert!(out.text().contains("Rp 64.000"));

        delete(&mut s, "Roti Bakar").unwrap();
        assert!(s.product("Roti Bakar").is_err());
    }
}
