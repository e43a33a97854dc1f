//! # Domain Types
//!
//! The records every screen of the shop works with.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  Transaction    │   │    Purchase     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (TRX…)      │   │  id (PUR…)      │       │
//! │  │  price, cost    │   │  kind, status   │   │  supplier       │       │
//! │  │  stock          │   │  items[]        │   │  items[]        │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    Expense      │   │  JournalEntry   │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  id (EXP…)      │   │  id (JRN…)      │                             │
//! │  │  category       │   │  debit[]        │                             │
//! │  │  status         │   │  credit[]       │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No Referential Integrity
//! Line items carry `product_id` plus a name/price snapshot. Deleting a
//! product leaves history untouched; reports fall back to the snapshot.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

/// Normalises user input for enum parsing: lowercase, `-`/`_` → space.
fn normalise_label(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .replace(['-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn not_allowed(field: &str, allowed: &[&str]) -> ValidationError {
    ValidationError::NotAllowed {
        field: field.to_string(),
        allowed: allowed.iter().map(|s| s.to_string()).collect(),
    }
}

// =============================================================================
// Payment Status
// =============================================================================

/// Paid / unpaid flag shared by transactions, purchases and expenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PaymentStatus {
    /// Paid.
    #[default]
    Lunas,
    /// Not yet paid.
    #[serde(rename = "Belum Lunas")]
    BelumLunas,
}

impl PaymentStatus {
    /// Display label, as written on the original screens.
    pub const fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Lunas => "Lunas",
            PaymentStatus::BelumLunas => "Belum Lunas",
        }
    }

    #[inline]
    pub const fn is_paid(&self) -> bool {
        matches!(self, PaymentStatus::Lunas)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise_label(s).as_str() {
            "lunas" | "paid" => Ok(PaymentStatus::Lunas),
            "belum lunas" | "unpaid" => Ok(PaymentStatus::BelumLunas),
            _ => Err(not_allowed("status", &["lunas", "belum-lunas"])),
        }
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a sale or purchase was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PaymentMethod {
    /// Cash; the only method that records cash received and change.
    #[default]
    Tunai,
    /// Bank transfer.
    Transfer,
    /// Credit card.
    Kredit,
}

impl PaymentMethod {
    pub const fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Tunai => "Tunai",
            PaymentMethod::Transfer => "Transfer",
            PaymentMethod::Kredit => "Kredit",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise_label(s).as_str() {
            "tunai" | "cash" => Ok(PaymentMethod::Tunai),
            "transfer" | "transfer bank" => Ok(PaymentMethod::Transfer),
            "kredit" | "kartu kredit" | "card" => Ok(PaymentMethod::Kredit),
            _ => Err(not_allowed("payment method", &["tunai", "transfer", "kredit"])),
        }
    }
}

// =============================================================================
// Transaction Kind
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum TransactionKind {
    /// Sale to a customer.
    Penjualan,
    /// Purchase listed alongside sales.
    Pembelian,
}

impl TransactionKind {
    pub const fn label(&self) -> &'static str {
        match self {
            TransactionKind::Penjualan => "Penjualan",
            TransactionKind::Pembelian => "Pembelian",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TransactionKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise_label(s).as_str() {
            "penjualan" | "sale" => Ok(TransactionKind::Penjualan),
            "pembelian" | "purchase" => Ok(TransactionKind::Pembelian),
            _ => Err(not_allowed("type", &["penjualan", "pembelian"])),
        }
    }
}

// =============================================================================
// Expense Category
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ExpenseCategory {
    Operasional,
    Administrasi,
    Penjualan,
    Lainnya,
}

impl ExpenseCategory {
    /// All categories in display order.
    pub const ALL: [ExpenseCategory; 4] = [
        ExpenseCategory::Operasional,
        ExpenseCategory::Administrasi,
        ExpenseCategory::Penjualan,
        ExpenseCategory::Lainnya,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::Operasional => "Operasional",
            ExpenseCategory::Administrasi => "Administrasi",
            ExpenseCategory::Penjualan => "Penjualan",
            ExpenseCategory::Lainnya => "Lainnya",
        }
    }

    /// Expense account debited by the automatic journal, e.g. `Beban Operasional`.
    pub fn account_name(&self) -> String {
        format!("Beban {}", self.label())
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ExpenseCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = normalise_label(s);
        let bare = normalised.strip_prefix("beban ").unwrap_or(&normalised);
        match bare {
            "operasional" => Ok(ExpenseCategory::Operasional),
            "administrasi" => Ok(ExpenseCategory::Administrasi),
            "penjualan" => Ok(ExpenseCategory::Penjualan),
            "lainnya" | "lain lain" => Ok(ExpenseCategory::Lainnya),
            _ => Err(not_allowed(
                "category",
                &["operasional", "administrasi", "penjualan", "lainnya"],
            )),
        }
    }
}

// =============================================================================
// Journal Kind
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum JournalKind {
    /// Entered by hand through the journal form.
    Manual,
    /// Posted by a sale, purchase or expense.
    Automatic,
}

impl fmt::Display for JournalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            JournalKind::Manual => "Manual",
            JournalKind::Automatic => "Automatic",
        })
    }
}

impl FromStr for JournalKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise_label(s).as_str() {
            "manual" => Ok(JournalKind::Manual),
            "automatic" | "auto" | "otomatis" => Ok(JournalKind::Automatic),
            _ => Err(not_allowed("journal type", &["manual", "automatic"])),
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product on the shelf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// UUID v4.
    pub id: String,
    pub name: String,
    pub category: String,
    /// Selling price.
    pub price: Money,
    /// Cost price (harga pokok), used for COGS and inventory value.
    pub cost: Money,
    pub stock: i64,
    /// Below this the product is flagged as low stock.
    pub min_stock: i64,
    pub supplier: Option<String>,
}

impl Product {
    #[inline]
    pub fn is_out_of_stock(&self) -> bool {
        self.stock <= 0
    }

    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.stock < self.min_stock
    }

    /// Stock valued at cost.
    #[inline]
    pub fn inventory_value(&self) -> Money {
        self.cost.multiply_quantity(self.stock)
    }

    /// Stock valued at selling price.
    #[inline]
    pub fn retail_value(&self) -> Money {
        self.price.multiply_quantity(self.stock)
    }
}

/// Product form input (everything but the id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub price: Money,
    pub cost: Money,
    pub stock: i64,
    /// Falls back to the configured default when absent.
    pub min_stock: Option<i64>,
    pub supplier: Option<String>,
}

impl NewProduct {
    /// Builds the stored product, trimming text fields.
    pub fn into_product(self, id: String, default_min_stock: i64) -> Product {
        Product {
            id,
            name: self.name.trim().to_string(),
            category: self.category.trim().to_string(),
            price: self.price,
            cost: self.cost,
            stock: self.stock,
            min_stock: self.min_stock.unwrap_or(default_min_stock),
            supplier: self
                .supplier
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

/// Partial product edit; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<Money>,
    pub cost: Option<Money>,
    pub stock: Option<i64>,
    pub min_stock: Option<i64>,
    pub supplier: Option<String>,
}

impl ProductUpdate {
    pub fn is_empty(&self) -> bool {
        *self == ProductUpdate::default()
    }

    /// Merges the provided fields into `product`.
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.trim().to_string();
        }
        if let Some(category) = &self.category {
            product.category = category.trim().to_string();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(cost) = self.cost {
            product.cost = cost;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(min_stock) = self.min_stock {
            product.min_stock = min_stock;
        }
        if let Some(supplier) = &self.supplier {
            let supplier = supplier.trim();
            product.supplier = (!supplier.is_empty()).then(|| supplier.to_string());
        }
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// A line of a transaction, with the product frozen at time of sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TransactionItem {
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
    /// Unit selling price.
    pub price: Money,
    /// Unit cost at time of sale, used when the product is gone.
    pub cost: Option<Money>,
}

impl TransactionItem {
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Transaction {
    /// `TRX000001`, …
    pub id: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub customer: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Money,
    pub description: String,
    pub status: PaymentStatus,
    pub items: Vec<TransactionItem>,
    pub payment_method: Option<PaymentMethod>,
    pub cash_received: Option<Money>,
    pub change: Option<Money>,
}

impl Transaction {
    #[inline]
    pub fn is_paid_sale(&self) -> bool {
        self.kind == TransactionKind::Penjualan && self.status.is_paid()
    }
}

/// Transaction input (everything but the id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewTransaction {
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub customer: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Money,
    pub description: String,
    pub status: PaymentStatus,
    pub items: Vec<TransactionItem>,
    pub payment_method: Option<PaymentMethod>,
    pub cash_received: Option<Money>,
    pub change: Option<Money>,
}

impl NewTransaction {
    pub fn with_id(self, id: String) -> Transaction {
        Transaction {
            id,
            date: self.date,
            customer: self.customer,
            kind: self.kind,
            amount: self.amount,
            description: self.description,
            status: self.status,
            items: self.items,
            payment_method: self.payment_method,
            cash_received: self.cash_received,
            change: self.change,
        }
    }
}

// =============================================================================
// Purchase
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PurchaseItem {
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
    /// Unit cost paid to the supplier.
    pub cost: Money,
}

impl PurchaseItem {
    #[inline]
    pub fn line_total(&self) -> Money {
        self.cost.multiply_quantity(self.quantity)
    }
}

/// Stock bought from a supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Purchase {
    /// `PUR000001`, …
    pub id: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub supplier: String,
    pub amount: Money,
    pub description: String,
    pub status: PaymentStatus,
    pub items: Vec<PurchaseItem>,
    pub payment_method: Option<PaymentMethod>,
}

// =============================================================================
// Expense
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Expense {
    /// `EXP000001`, …
    pub id: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub description: String,
    pub amount: Money,
    pub category: ExpenseCategory,
    pub status: PaymentStatus,
}

/// Expense form input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewExpense {
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub description: String,
    pub amount: Money,
    pub category: ExpenseCategory,
    pub status: PaymentStatus,
}

impl NewExpense {
    pub fn with_id(self, id: String) -> Expense {
        Expense {
            id,
            date: self.date,
            description: self.description.trim().to_string(),
            amount: self.amount,
            category: self.category,
            status: self.status,
        }
    }
}

// =============================================================================
// Journal Entry
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct JournalLine {
    pub account: String,
    pub amount: Money,
}

impl JournalLine {
    pub fn new(account: impl Into<String>, amount: Money) -> Self {
        JournalLine {
            account: account.into(),
            amount,
        }
    }

    /// A form row left untouched: no account and no amount.
    pub fn is_blank(&self) -> bool {
        self.account.trim().is_empty() && self.amount.is_zero()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct JournalEntry {
    /// `JRN000001`, …
    pub id: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub description: String,
    /// Source record id for automatic entries, free text for manual ones.
    pub reference: String,
    pub debit: Vec<JournalLine>,
    pub credit: Vec<JournalLine>,
    #[serde(rename = "type")]
    pub kind: JournalKind,
}

impl JournalEntry {
    pub fn total_debit(&self) -> Money {
        self.debit.iter().map(|l| l.amount).sum()
    }

    pub fn total_credit(&self) -> Money {
        self.credit.iter().map(|l| l.amount).sum()
    }

    pub fn is_balanced(&self) -> bool {
        self.total_debit() == self.total_credit()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
