//! # Validation Module
//!
//! Form checks for every entry screen of the shop.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Shell parsing (clap)                                         │
//! │  ├── Argument shape, enum values                                       │
//! │  └── Money::parse for amounts                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required fields, positive amounts                                 │
//! │  └── Quantity limits                                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Books (warung-store)                                         │
//! │  ├── Stock on hand at checkout                                         │
//! │  └── Record lookups (NotFound)                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use warung_core::validation::{validate_product_name, validate_quantity};
//!
//! validate_product_name("Indomie Goreng").unwrap();
//! validate_quantity(5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{NewExpense, NewProduct, ProductUpdate};
use crate::{MAX_AMOUNT, MAX_ITEM_QUANTITY, MAX_STOCK};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 200;
const MAX_QUERY_LEN: usize = 100;

// =============================================================================
// String Validators
// =============================================================================

/// Checks a required text field: non-empty after trimming, at most 200 chars.
pub fn validate_required_text(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    if value.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Example
/// ```rust
/// use warung_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Aqua 600ml").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_required_text("name", name)
}

/// Validates a search query.
///
/// Empty is fine (matches everything). Returns the trimmed query.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  cart set <product> 5                                                  │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(5) ← THIS FUNCTION                                  │
/// │       │                                                                 │
/// │       ├── qty <= 0?   → "quantity must be positive"                    │
/// │       ├── qty > 999?  → "quantity must be between 1 and 999"           │
/// │       └── OK → stock check in the cart                                 │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::must_be_positive("quantity"));
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Amount must be above zero and at most [`MAX_AMOUNT`].
pub fn validate_positive_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::must_be_positive(field));
    }
    if amount.rupiah() > MAX_AMOUNT {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 1,
            max: MAX_AMOUNT,
        });
    }
    Ok(())
}

/// Count must be between zero and [`MAX_STOCK`].
pub fn validate_non_negative(field: &str, value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    if value > MAX_STOCK {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_STOCK,
        });
    }
    Ok(())
}

/// Basis points between 0 and 10000.
pub fn validate_bps(field: &str, bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: 10000,
        });
    }
    Ok(())
}

// =============================================================================
// Form Validators
// =============================================================================

/// Product form ("Tambah Produk").
///
/// Name and category are required, price and cost must be above zero,
/// stock and minimum stock must not be negative.
pub fn validate_new_product(product: &NewProduct) -> ValidationResult<()> {
    validate_product_name(&product.name)?;
    validate_required_text("category", &product.category)?;
    validate_positive_amount("price", product.price)?;
    validate_positive_amount("cost", product.cost)?;
    validate_non_negative("stock", product.stock)?;
    if let Some(min_stock) = product.min_stock {
        validate_non_negative("min stock", min_stock)?;
    }
    Ok(())
}

/// Partial product edit: only the provided fields are checked.
pub fn validate_product_update(update: &ProductUpdate) -> ValidationResult<()> {
    if let Some(name) = &update.name {
        validate_product_name(name)?;
    }
    if let Some(category) = &update.category {
        validate_required_text("category", category)?;
    }
    if let Some(price) = update.price {
        validate_positive_amount("price", price)?;
    }
    if let Some(cost) = update.cost {
        validate_positive_amount("cost", cost)?;
    }
    if let Some(stock) = update.stock {
        validate_non_negative("stock", stock)?;
    }
    if let Some(min_stock) = update.min_stock {
        validate_non_negative("min stock", min_stock)?;
    }
    Ok(())
}

/// Expense form ("Tambah Beban").
pub fn validate_expense(expense: &NewExpense) -> ValidationResult<()> {
    validate_required_text("description", &expense.description)?;
    validate_positive_amount("amount", expense.amount)
}

/// Purchase header: supplier, description and at least one line.
pub fn validate_purchase_header(
    supplier: &str,
    description: &str,
    item_count: usize,
) -> ValidationResult<()> {
    validate_required_text("supplier", supplier)?;
    validate_required_text("description", description)?;
    if item_count == 0 {
        return Err(ValidationError::required("items"));
    }
    Ok(())
}

/// One purchase line: product name, quantity and unit cost.
pub fn validate_purchase_item(name: &str, quantity: i64, cost: Money) -> ValidationResult<()> {
    validate_required_text("product name", name)?;
    validate_quantity(quantity)?;
    validate_positive_amount("cost", cost)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ExpenseCategory, PaymentStatus};
    use chrono::NaiveDate;

    fn new_product() -> NewProduct {
        NewProduct {
            name: "Indomie Goreng".to_string(),
            category: "Makanan".to_string(),
            price: Money::from_rupiah(3_500),
            cost: Money::from_rupiah(2_800),
            stock: 40,
            min_stock: None,
            supplier: None,
        }
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Aqua 600ml").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_amount_and_stock_upper_bounds() {
        assert!(validate_positive_amount("amount", Money::from_rupiah(MAX_AMOUNT)).is_ok());
        assert!(matches!(
            validate_positive_amount("amount", Money::from_rupiah(i64::MAX)),
            Err(ValidationError::OutOfRange { max: MAX_AMOUNT, .. })
        ));

        assert!(validate_non_negative("stock", MAX_STOCK).is_ok());
        assert!(matches!(
            validate_non_negative("stock", MAX_STOCK + 1),
            Err(ValidationError::OutOfRange { max: MAX_STOCK, .. })
        ));

        let mut p = new_product();
        p.stock = i64::MAX;
        assert!(validate_new_product(&p).is_err());
    }

    #[test]
    fn test_validate_search_query_trims() {
        assert_eq!(validate_search_query("  kopi ").unwrap(), "kopi");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_new_product() {
        assert!(validate_new_product(&new_product()).is_ok());

        let mut p = new_product();
        p.category = " ".to_string();
        assert_eq!(
            validate_new_product(&p),
            Err(ValidationError::required("category"))
        );

        let mut p = new_product();
        p.price = Money::zero();
        assert_eq!(
            validate_new_product(&p),
            Err(ValidationError::must_be_positive("price"))
        );

        let mut p = new_product();
        p.stock = -1;
        assert!(validate_new_product(&p).is_err());

        let mut p = new_product();
        p.stock = 0;
        assert!(validate_new_product(&p).is_ok());
    }

    #[test]
    fn test_validate_product_update_checks_provided_fields_only() {
        assert!(validate_product_update(&ProductUpdate::default()).is_ok());

        let update = ProductUpdate {
            cost: Some(Money::from_rupiah(-1)),
            ..Default::default()
        };
        assert!(validate_product_update(&update).is_err());

        let update = ProductUpdate {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(validate_product_update(&update).is_err());
    }

    #[test]
    fn test_validate_expense() {
        let mut expense = NewExpense {
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            description: "Listrik".to_string(),
            amount: Money::from_rupiah(250_000),
            category: ExpenseCategory::Operasional,
            status: PaymentStatus::Lunas,
        };
        assert!(validate_expense(&expense).is_ok());

        expense.amount = Money::zero();
        assert!(validate_expense(&expense).is_err());

        expense.amount = Money::from_rupiah(1);
        expense.description = String::new();
        assert!(validate_expense(&expense).is_err());
    }

    #[test]
    fn test_validate_purchase() {
        assert!(validate_purchase_header("CV Sumber Rejeki", "Stok mingguan", 1).is_ok());
        assert!(validate_purchase_header("", "Stok mingguan", 1).is_err());
        assert!(validate_purchase_header("CV Sumber Rejeki", "", 1).is_err());
        assert!(validate_purchase_header("CV Sumber Rejeki", "Stok", 0).is_err());

        assert!(validate_purchase_item("Gula 1kg", 10, Money::from_rupiah(14_000)).is_ok());
        assert!(validate_purchase_item("Gula 1kg", 0, Money::from_rupiah(14_000)).is_err());
        assert!(validate_purchase_item("Gula 1kg", 10, Money::zero()).is_err());
    }

    #[test]
    fn test_validate_bps() {
        assert!(validate_bps("markup", 3000).is_ok());
        assert!(validate_bps("markup", 10000).is_ok());
        assert!(validate_bps("markup", 10001).is_err());
    }
}
