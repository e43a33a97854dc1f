//! # State Module
//!
//! Everything one shell session holds. Nothing outlives the process.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session State                                        │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │    Books     │  │     Cart     │  │   WarungConfig   │              │
//! │  │              │  │              │  │                  │              │
//! │  │  products    │  │  Kasir lines │  │  store name      │              │
//! │  │  records     │  │  (cleared by │  │  walk-in name    │              │
//! │  │  journal     │  │   checkout)  │  │  markup, min     │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  today: the business date used for defaults and report periods        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The shell is single-threaded, so the session is owned outright and
//! handed to commands as `&mut Session`.

mod config;

pub use config::{BooksSection, StoreSection, WarungConfig, CONFIG_FILE_NAME};

use chrono::NaiveDate;
use warung_core::{Cart, Product};
use warung_store::{Books, StoreError};

use crate::error::CliResult;

#[derive(Debug, Clone)]
pub struct Session {
    books: Books,
    cart: Cart,
    config: WarungConfig,
    today: NaiveDate,
}

impl Session {
    /// Starts with empty books configured from `config`.
    pub fn new(config: WarungConfig, today: NaiveDate) -> Self {
        Session {
            books: Books::new(config.to_settings()),
            cart: Cart::new(),
            config,
            today,
        }
    }

    pub fn books(&self) -> &Books {
        &self.books
    }

    pub fn books_mut(&mut self) -> &mut Books {
        &mut self.books
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    /// Books and cart together, for checkout.
    pub fn books_and_cart(&mut self) -> (&mut Books, &mut Cart) {
        (&mut self.books, &mut self.cart)
    }

    pub fn config(&self) -> &WarungConfig {
        &self.config
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// `date`, or today when absent.
    pub fn date_or_today(&self, date: Option<NaiveDate>) -> NaiveDate {
        date.unwrap_or(self.today)
    }

    /// Looks a product up by id or exact name and returns a copy.
    pub fn product(&self, id_or_name: &str) -> CliResult<Product> {
        Ok(self.books.find_product(id_or_name)?.clone())
    }

    /// Resolves a cart line by product id or name, also for products that
    /// were deleted after being put in the cart.
    pub fn cart_line_id(&self, id_or_name: &str) -> CliResult<String> {
        let needle = id_or_name.trim();
        self.cart
            .items()
            .iter()
            .find(|i| i.product_id == needle || i.name.eq_ignore_ascii_case(needle))
            .map(|i| i.product_id.clone())
            .ok_or_else(|| StoreError::not_found("Cart line", needle).into())
    }
}
