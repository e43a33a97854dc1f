//! # Cart Commands
//!
//! The Kasir cart. Changes are applied to a copy of the cart and only
//! kept when every step succeeds, so `cart add --qty 5` either adds five
//! units or nothing.

use warung_core::cart::{quick_amounts, CartTotals};
use warung_core::Cart;

use crate::error::{CliError, CliResult};
use crate::output::{Out, Table};
use crate::state::Session;

pub fn add(session: &mut Session, product: &str, qty: i64) -> CliResult<Out> {
    if qty <= 0 {
        return Err(CliError::usage("--qty must be at least 1"));
    }
    let product = session.product(product)?;

    let mut cart = session.cart().clone();
    cart.add_product(&product)?;
    if qty != 1 {
        let quantity = cart
            .get(&product.id)
            .map_or(qty, |line| (line.quantity - 1).saturating_add(qty));
        cart.update_quantity(&product, quantity)?;
    }
    *session.cart_mut() = cart;

    let quantity = session.cart().get(&product.id).map_or(0, |line| line.quantity);
    Out::new(
        format!("{} x{} in cart, total {}", product.name, quantity, session.cart().total()),
        session.cart(),
    )
}

pub fn set(session: &mut Session, product: &str, quantity: i64) -> CliResult<Out> {
    let id = session.cart_line_id(product)?;

    if quantity <= 0 {
        session.cart_mut().remove(&id)?;
        return Out::new(format!("Removed {}", product), session.cart());
    }

    let product = session.product(&id)?;
    session.cart_mut().update_quantity(&product, quantity)?;
    Out::new(
        format!("{} x{}, total {}", product.name, quantity, session.cart().total()),
        session.cart(),
    )
}

pub fn remove(session: &mut Session, product: &str) -> CliResult<Out> {
    let id = session.cart_line_id(product)?;
    session.cart_mut().remove(&id)?;
    Out::new(format!("Removed {}", product), session.cart())
}

pub fn show(session: &Session) -> CliResult<Out> {
    let cart = session.cart();
    let totals = CartTotals::from(cart);
    if cart.is_empty() {
        return Out::new("Cart is empty", &totals);
    }
    Out::new(render_cart(cart), &serde_json::json!({ "items": cart.items(), "totals": totals }))
}

pub fn clear(session: &mut Session) -> CliResult<Out> {
    session.cart_mut().clear();
    Ok(Out::message("Cart cleared"))
}

fn render_cart(cart: &Cart) -> String {
    let mut table = Table::new(&["Product", "Price", "Qty", "Subtotal"]).align_right(&[1, 2, 3]);
    for line in cart.items() {
        table.row(vec![
            line.name.clone(),
            line.price.to_string(),
            line.quantity.to_string(),
            line.line_total().to_string(),
        ]);
    }

    let total = cart.total();
    let quick = quick_amounts(total)
        .iter()
        .map(|(label, amount)| format!("{} ({})", label, amount))
        .collect::<Vec<_>>()
        .join("  ");

    format!(
        "{}\n\n{} items, {} units\nTotal: {}\nQuick cash: {}",
        table.render(),
        cart.item_count(),
        cart.total_quantity(),
        total,
        quick
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{session_with, stock_product};
    use warung_core::CoreError;

    #[test]
    fn test_add_with_quantity() {
        let mut s = session_with(&[stock_product("Kopi Susu", 8_000, 5_000, 10)]);

        add(&mut s, "Kopi Susu", 3).unwrap();
        add(&mut s, "kopi susu", 1).unwrap();

        assert_eq!(s.cart().items()[0].quantity, 4);
        assert_eq!(s.cart().total().rupiah(), 32_000);
    }

    #[test]
    fn test_add_beyond_stock_leaves_cart_untouched() {
        let mut s = session_with(&[stock_product("Roti Bakar", 12_000, 7_000, 2)]);
        add(&mut s, "Roti Bakar", 1).unwrap();

        let err = add(&mut s, "Roti Bakar", 5).unwrap_err();

        assert!(matches!(
            err,
            CliError::Core(CoreError::InsufficientStock { requested: 6, .. })
        ));
        assert_eq!(s.cart().items()[0].quantity, 1);
    }

    #[test]
    fn test_add_huge_quantity_is_rejected() {
        let mut s = session_with(&[stock_product("Kopi Susu", 8_000, 5_000, 10)]);
        add(&mut s, "Kopi Susu", 2).unwrap();

        assert!(add(&mut s, "Kopi Susu", i64::MAX).is_err());
        assert_eq!(s.cart().items()[0].quantity, 2);
    }

    #[test]
    fn test_add_out_of_stock() {
        let mut s = session_with(&[stock_product("Es Teh", 5_000, 2_000, 0)]);
        let err = add(&mut s, "Es Teh", 1).unwrap_err();
        assert!(matches!(err, CliError::Core(CoreError::OutOfStock { .. })));
        assert!(s.cart().is_empty());
    }

    #[test]
    fn test_set_zero_removes_line() {
        let mut s = session_with(&[stock_product("Kopi Susu", 8_000, 5_000, 10)]);
        add(&mut s, "Kopi Susu", 2).unwrap();

        set(&mut s, "Kopi Susu", 5).unwrap();
        assert_eq!(s.cart().items()[0].quantity, 5);

        set(&mut s, "Kopi Susu", 0).unwrap();
        assert!(s.cart().is_empty());
    }

    #[test]
    fn test_show_and_clear() {
        let mut s = session_with(&[stock_product("Kopi Susu", 8_000, 5_000, 10)]);
        assert_eq!(show(&s).unwrap().text(), "Cart is empty");

        add(&mut s, "Kopi Susu", 2).unwrap();
        let text = show(&s).unwrap().text().to_string();
        assert!(text.contains("Total: Rp 16.000"));
        assert!(text.contains("Pas (Rp 16.000)"));

        clear(&mut s).unwrap();
        assert!(s.cart().is_empty());
    }

    #[test]
    fn test_remove_unknown_line() {
        let mut s = session_with(&[stock_product("Kopi Susu", 8_000, 5_000, 10)]);
        assert!(remove(&mut s, "Kopi Susu").is_err());
    }
}
