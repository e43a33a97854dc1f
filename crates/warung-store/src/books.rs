//! # Books
//!
//! The one service every screen talks to. It owns the [`Store`], applies
//! the form checks from `warung-core`, moves stock, and posts the
//! automatic journal entry for every sale, purchase and expense.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  checkout(cart, tender, date)                                           │
//! │    ├─ re-check every line against the catalog                           │
//! │    ├─ tender.settle(total)          → InsufficientPayment?              │
//! │    ├─ cart.into_sale(...)                                               │
//! │    └─ record_transaction(sale)                                          │
//! │         ├─ TRX id, insert                                               │
//! │         ├─ stock −= qty per line (floors at 0)                          │
//! │         └─ post sale journal (JRN id)                                   │
//! │                                                                         │
//! │  record_purchase(order)                                                 │
//! │    ├─ restock product with same name, or create it at cost + markup    │
//! │    ├─ PUR id, insert                                                    │
//! │    └─ post purchase journal                                             │
//! │                                                                         │
//! │  record_expense(expense)  → EXP id, insert, post expense journal        │
//! │  add_manual_journal(form) → validate, JRN id, insert                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Deletes remove only the record asked for. A deleted sale keeps its
//! journal entry and its stock movement.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use warung_core::cart::Cart;
use warung_core::journal::{self, JournalSummary, ManualJournal, TrialBalance};
use warung_core::report::{
    AccountBalances, BalanceSheet, CashFlowStatement, DashboardStats, ExpenseStats,
    FinancialSummary, IncomeStatement, InventoryStats, PurchaseStats, TransactionStats,
};
use warung_core::validation::{
    validate_bps, validate_expense, validate_new_product, validate_non_negative,
    validate_positive_amount, validate_product_update, validate_purchase_header,
    validate_purchase_item, validate_quantity, validate_required_text,
};
use warung_core::{
    CoreError, Expense, JournalEntry, Money, NewExpense, NewProduct, NewTransaction,
    PaymentMethod, PaymentStatus, Product, ProductUpdate, Purchase, PurchaseItem, ReportPeriod,
    Tender, Transaction, TransactionItem, TransactionKind, ValidationError,
    DEFAULT_MIN_STOCK, DEFAULT_PURCHASE_MARKUP_BPS, WALK_IN_CUSTOMER,
};

use crate::error::{StoreError, StoreResult};
use crate::ids::IdKind;
use crate::repository::product::StockMovement;
use crate::repository::{
    ExpenseFilter, JournalFilter, ProductFilter, PurchaseFilter, RecordFilter, TransactionFilter,
};
use crate::store::Store;

/// Category given to products created by a purchase line without one.
pub const DEFAULT_PURCHASE_CATEGORY: &str = "Umum";

// =============================================================================
// Settings
// =============================================================================

/// Shop-level knobs, filled from the shell's configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BooksSettings {
    /// Customer recorded on Kasir sales.
    pub walk_in_customer: String,
    /// Minimum stock for products created without one.
    pub default_min_stock: i64,
    /// Selling-price markup for products created by a purchase.
    pub purchase_markup_bps: u32,
}

impl Default for BooksSettings {
    fn default() -> Self {
        BooksSettings {
            walk_in_customer: WALK_IN_CUSTOMER.to_string(),
            default_min_stock: DEFAULT_MIN_STOCK,
            purchase_markup_bps: DEFAULT_PURCHASE_MARKUP_BPS,
        }
    }
}

impl BooksSettings {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_required_text("walk-in customer", &self.walk_in_customer)?;
        validate_non_negative("default min stock", self.default_min_stock)?;
        validate_bps("purchase markup", self.purchase_markup_bps)
    }
}

// =============================================================================
// Inputs and Outputs
// =============================================================================

/// One row of the purchase form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseLine {
    pub name: String,
    pub category: String,
    pub quantity: i64,
    /// Unit cost.
    pub cost: Money,
}

/// The purchase form ("Tambah Pembelian").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    pub date: NaiveDate,
    pub supplier: String,
    pub description: String,
    pub status: PaymentStatus,
    pub payment_method: Option<PaymentMethod>,
    pub items: Vec<PurchaseLine>,
}

/// What the cashier prints after a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub transaction_id: String,
    pub date: NaiveDate,
    pub customer: String,
    pub items: Vec<TransactionItem>,
    pub total: Money,
    pub payment_method: PaymentMethod,
    pub cash_received: Option<Money>,
    pub change: Option<Money>,
}

impl From<&Transaction> for Receipt {
    fn from(t: &Transaction) -> Self {
        Receipt {
            transaction_id: t.id.clone(),
            date: t.date,
            customer: t.customer.clone(),
            items: t.items.clone(),
            total: t.amount,
            payment_method: t.payment_method.unwrap_or_default(),
            cash_received: t.cash_received,
            change: t.change,
        }
    }
}

/// Logs a rejected request at `warn` and converts the error.
fn rejected<E: Into<StoreError>>(operation: &'static str) -> impl FnOnce(E) -> StoreError {
    move |err| {
        let err = err.into();
        warn!(operation, error = %err, "Request rejected");
        err
    }
}

// =============================================================================
// Books
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct Books {
    store: Store,
    settings: BooksSettings,
}

impl Books {
    pub fn new(settings: BooksSettings) -> Self {
        Books {
            store: Store::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &BooksSettings {
        &self.settings
    }

    /// Read access to every record list.
    pub fn store(&self) -> &Store {
        &self.store
    }

    // -------------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------------

    pub fn add_product(&mut self, product: NewProduct) -> StoreResult<Product> {
        validate_new_product(&product).map_err(rejected("add_product"))?;

        let id = self.store.next_product_id();
        let product = product.into_product(id, self.settings.default_min_stock);
        let product = self.store.products_mut().insert(product);

        info!(id = %product.id, name = %product.name, "Product added");
        Ok(product)
    }

    pub fn update_product(&mut self, id: &str, update: ProductUpdate) -> StoreResult<Product> {
        validate_product_update(&update).map_err(rejected("update_product"))?;

        let product = self
            .store
            .products_mut()
            .update(id, &update)
            .map_err(rejected("update_product"))?;

        info!(id = %product.id, "Product updated");
        Ok(product)
    }

    pub fn delete_product(&mut self, id: &str) -> StoreResult<Product> {
        let product = self
            .store
            .products_mut()
            .delete(id)
            .map_err(rejected("delete_product"))?;

        info!(id = %product.id, name = %product.name, "Product deleted");
        Ok(product)
    }

    /// Moves stock by `quantity` units; sales floor at zero.
    pub fn adjust_stock(
        &mut self,
        id: &str,
        quantity: i64,
        movement: StockMovement,
    ) -> StoreResult<Product> {
        if quantity <= 0 {
            return Err(rejected("adjust_stock")(ValidationError::must_be_positive(
                "quantity",
            )));
        }

        let product = self
            .store
            .products_mut()
            .adjust_stock(id, quantity, movement)
            .map_err(rejected("adjust_stock"))?;

        info!(id = %product.id, ?movement, quantity, stock = product.stock, "Stock adjusted");
        Ok(product)
    }

    pub fn products(&self, filter: &ProductFilter) -> Vec<&Product> {
        self.store.products().search(filter)
    }

    pub fn product(&self, id: &str) -> StoreResult<&Product> {
        self.store.products().get(id)
    }

    /// Resolves a product by id, or by exact (case-insensitive) name.
    pub fn find_product(&self, id_or_name: &str) -> StoreResult<&Product> {
        let products = self.store.products();
        products
            .get(id_or_name)
            .ok()
            .or_else(|| products.find_by_name(id_or_name))
            .ok_or_else(|| StoreError::not_found("Product", id_or_name))
    }

    // -------------------------------------------------------------------------
    // Transactions (Kasir)
    // -------------------------------------------------------------------------

    /// Stores a transaction; a sale also moves stock and posts its journal.
    pub fn record_transaction(&mut self, transaction: NewTransaction) -> StoreResult<Transaction> {
        validate_positive_amount("amount", transaction.amount)
            .map_err(rejected("record_transaction"))?;
        for item in &transaction.items {
            validate_quantity(item.quantity).map_err(rejected("record_transaction"))?;
        }

        let id = self.store.next_id(IdKind::Transaction);
        let transaction = self.store.transactions_mut().insert(transaction.with_id(id));

        if transaction.kind == TransactionKind::Penjualan {
            for item in &transaction.items {
                // history may reference deleted products
                if let Err(err) = self.store.products_mut().adjust_stock(
                    &item.product_id,
                    item.quantity,
                    StockMovement::Sale,
                ) {
                    debug!(product_id = %item.product_id, error = %err, "Stock not moved");
                }
            }

            let journal_id = self.store.next_id(IdKind::Journal);
            let entry = journal::sale_entry(journal_id, &transaction);
            self.post(entry);
        }

        info!(
            id = %transaction.id,
            kind = %transaction.kind,
            amount = %transaction.amount,
            "Transaction recorded"
        );
        Ok(transaction)
    }

    /// Kasir checkout: settles `tender`, records the sale and empties `cart`.
    ///
    /// ## Errors
    /// - `EmptyCart`
    /// - `NotFound` when a cart line's product was deleted meanwhile
    /// - `InsufficientStock` when stock dropped below the cart quantity
    /// - `InsufficientPayment` for short cash
    ///
    /// The cart is left untouched on error.
    pub fn checkout(
        &mut self,
        cart: &mut Cart,
        tender: Tender,
        date: NaiveDate,
    ) -> StoreResult<Receipt> {
        if cart.is_empty() {
            return Err(rejected("checkout")(CoreError::EmptyCart));
        }

        for item in cart.items() {
            let product = self
                .store
                .products()
                .get(&item.product_id)
                .map_err(rejected("checkout"))?;
            if item.quantity > product.stock {
                return Err(rejected("checkout")(CoreError::InsufficientStock {
                    name: product.name.clone(),
                    available: product.stock,
                    requested: item.quantity,
                }));
            }
        }

        let settlement = tender.settle(cart.total()).map_err(rejected("checkout"))?;
        let sale = cart
            .into_sale(date, &self.settings.walk_in_customer, &settlement)
            .map_err(rejected("checkout"))?;

        let transaction = self.record_transaction(sale)?;
        cart.clear();

        info!(id = %transaction.id, total = %transaction.amount, "Checkout completed");
        Ok(Receipt::from(&transaction))
    }

    pub fn delete_transaction(&mut self, id: &str) -> StoreResult<Transaction> {
        let transaction = self
            .store
            .transactions_mut()
            .delete(id)
            .map_err(rejected("delete_transaction"))?;
        info!(id = %transaction.id, "Transaction deleted");
        Ok(transaction)
    }

    pub fn transactions(&self, filter: &TransactionFilter) -> Vec<&Transaction> {
        self.store.transactions().filter(filter)
    }

    pub fn transaction(&self, id: &str) -> StoreResult<&Transaction> {
        self.store.transactions().get(id)
    }

    // -------------------------------------------------------------------------
    // Purchases
    // -------------------------------------------------------------------------

    /// Records a purchase and brings its lines into the catalog.
    ///
    /// ## Per Line
    /// ```text
    /// product with same name exists?
    ///   yes → stock += qty, cost = line cost
    ///   no  → new product: price = cost + markup, min stock = default,
    ///         supplier = purchase supplier
    /// ```
    pub fn record_purchase(&mut self, order: PurchaseOrder) -> StoreResult<Purchase> {
        validate_purchase_header(&order.supplier, &order.description, order.items.len())
            .map_err(rejected("record_purchase"))?;
        for line in &order.items {
            validate_purchase_item(&line.name, line.quantity, line.cost)
                .map_err(rejected("record_purchase"))?;
        }
        self.check_restock_limits(&order.items)
            .map_err(rejected("record_purchase"))?;

        let supplier = order.supplier.trim().to_string();
        let mut items = Vec::with_capacity(order.items.len());
        for line in &order.items {
            let product = self.receive_stock(line, &supplier)?;
            items.push(PurchaseItem {
                product_id: product.id,
                product_name: product.name,
                quantity: line.quantity,
                cost: line.cost,
            });
        }

        let id = self.store.next_id(IdKind::Purchase);
        let purchase = Purchase {
            id,
            date: order.date,
            amount: items.iter().map(PurchaseItem::line_total).sum(),
            supplier,
            description: order.description.trim().to_string(),
            status: order.status,
            items,
            payment_method: order.payment_method,
        };
        let purchase = self.store.purchases_mut().insert(purchase);

        let journal_id = self.store.next_id(IdKind::Journal);
        let entry = journal::purchase_entry(journal_id, &purchase);
        self.post(entry);

        info!(
            id = %purchase.id,
            supplier = %purchase.supplier,
            amount = %purchase.amount,
            "Purchase recorded"
        );
        Ok(purchase)
    }

    /// Stock each existing product would reach once every line is received.
    fn check_restock_limits(&self, lines: &[PurchaseLine]) -> Result<(), ValidationError> {
        let mut incoming: BTreeMap<&str, i64> = BTreeMap::new();
        for line in lines {
            let Some(product) = self.store.products().find_by_name(&line.name) else {
                continue;
            };
            let stock = incoming.entry(product.id.as_str()).or_insert(product.stock);
            *stock = stock.saturating_add(line.quantity);
            validate_non_negative("stock", *stock)?;
        }
        Ok(())
    }

    fn receive_stock(&mut self, line: &PurchaseLine, supplier: &str) -> StoreResult<Product> {
        let existing = self
            .store
            .products()
            .find_by_name(&line.name)
            .map(|p| p.id.clone());

        if let Some(id) = existing {
            let products = self.store.products_mut();
            products.adjust_stock(&id, line.quantity, StockMovement::Purchase)?;
            let update = ProductUpdate {
                cost: Some(line.cost),
                ..Default::default()
            };
            let product = products.update(&id, &update)?;
            debug!(id = %product.id, stock = product.stock, "Restocked product");
            return Ok(product);
        }

        let category = match line.category.trim() {
            "" => DEFAULT_PURCHASE_CATEGORY,
            category => category,
        };
        let new = NewProduct {
            name: line.name.clone(),
            category: category.to_string(),
            price: line.cost.apply_markup(self.settings.purchase_markup_bps),
            cost: line.cost,
            stock: line.quantity,
            min_stock: None,
            supplier: Some(supplier.to_string()),
        };
        let id = self.store.next_product_id();
        let product = self
            .store
            .products_mut()
            .insert(new.into_product(id, self.settings.default_min_stock));
        info!(id = %product.id, name = %product.name, price = %product.price, "Product created from purchase");
        Ok(product)
    }

    pub fn delete_purchase(&mut self, id: &str) -> StoreResult<Purchase> {
        let purchase = self
            .store
            .purchases_mut()
            .delete(id)
            .map_err(rejected("delete_purchase"))?;
        info!(id = %purchase.id, "Purchase deleted");
        Ok(purchase)
    }

    pub fn purchases(&self, filter: &PurchaseFilter) -> Vec<&Purchase> {
        self.store.purchases().filter(filter)
    }

    // -------------------------------------------------------------------------
    // Expenses
    // -------------------------------------------------------------------------

    pub fn record_expense(&mut self, expense: NewExpense) -> StoreResult<Expense> {
        validate_expense(&expense).map_err(rejected("record_expense"))?;

        let id = self.store.next_id(IdKind::Expense);
        let expense = self.store.expenses_mut().insert(expense.with_id(id));

        let journal_id = self.store.next_id(IdKind::Journal);
        let entry = journal::expense_entry(journal_id, &expense);
        self.post(entry);

        info!(
            id = %expense.id,
            category = %expense.category,
            amount = %expense.amount,
            "Expense recorded"
        );
        Ok(expense)
    }

    pub fn delete_expense(&mut self, id: &str) -> StoreResult<Expense> {
        let expense = self
            .store
            .expenses_mut()
            .delete(id)
            .map_err(rejected("delete_expense"))?;
        info!(id = %expense.id, "Expense deleted");
        Ok(expense)
    }

    pub fn expenses(&self, filter: &ExpenseFilter) -> Vec<&Expense> {
        self.store.expenses().filter(filter)
    }

    // -------------------------------------------------------------------------
    // Journal
    // -------------------------------------------------------------------------

    fn post(&mut self, entry: JournalEntry) {
        debug!(id = %entry.id, reference = %entry.reference, "Posting journal entry");
        self.store.journal_mut().insert(entry);
    }

    pub fn add_manual_journal(&mut self, form: ManualJournal) -> StoreResult<JournalEntry> {
        let form = form.validate().map_err(rejected("add_manual_journal"))?;

        let id = self.store.next_id(IdKind::Journal);
        let entry = self.store.journal_mut().insert(form.into_entry(id));

        info!(id = %entry.id, total = %entry.total_debit(), "Manual journal added");
        Ok(entry)
    }

    pub fn delete_journal_entry(&mut self, id: &str) -> StoreResult<JournalEntry> {
        let entry = self
            .store
            .journal_mut()
            .delete(id)
            .map_err(rejected("delete_journal_entry"))?;
        info!(id = %entry.id, "Journal entry deleted");
        Ok(entry)
    }

    pub fn journal_entries(&self, filter: &JournalFilter) -> Vec<&JournalEntry> {
        self.store.journal().filter(filter)
    }

    // -------------------------------------------------------------------------
    // Reports
    // -------------------------------------------------------------------------

    pub fn financial_summary(&self, period: ReportPeriod, today: NaiveDate) -> FinancialSummary {
        FinancialSummary::compute(&self.store.ledger(), period, today)
    }

    pub fn account_balances(&self, period: ReportPeriod, today: NaiveDate) -> AccountBalances {
        AccountBalances::compute(&self.store.ledger(), period, today)
    }

    pub fn income_statement(&self, period: ReportPeriod, today: NaiveDate) -> IncomeStatement {
        IncomeStatement::compute(&self.store.ledger(), period, today)
    }

    pub fn balance_sheet(&self, period: ReportPeriod, today: NaiveDate) -> BalanceSheet {
        BalanceSheet::compute(&self.store.ledger(), period, today)
    }

    pub fn cash_flow(&self, period: ReportPeriod, today: NaiveDate) -> CashFlowStatement {
        CashFlowStatement::compute(self.store.journal().list(), period, today)
    }

    pub fn dashboard(&self, today: NaiveDate) -> DashboardStats {
        DashboardStats::compute(&self.store.ledger(), today)
    }

    pub fn inventory_stats(&self) -> InventoryStats {
        InventoryStats::compute(self.store.products().list())
    }

    pub fn transaction_stats(&self, filter: &TransactionFilter) -> TransactionStats {
        TransactionStats::compute(self.transactions(filter))
    }

    pub fn purchase_stats(&self, filter: &PurchaseFilter) -> PurchaseStats {
        PurchaseStats::compute(self.purchases(filter))
    }

    pub fn expense_stats(&self, filter: &ExpenseFilter) -> ExpenseStats {
        ExpenseStats::compute(self.expenses(filter))
    }

    pub fn journal_summary(&self, filter: &JournalFilter) -> JournalSummary {
        JournalSummary::from_entries(self.journal_entries(filter))
    }

    pub fn trial_balance(&self, filter: &JournalFilter) -> TrialBalance {
        let entries = self
            .store
            .journal()
            .list()
            .iter()
            .filter(|e| filter.matches(e));
        TrialBalance::from_entries(entries)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use warung_core::{JournalKind, JournalLine, MAX_STOCK};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
    }

    fn rp(v: i64) -> Money {
        Money::from_rupiah(v)
    }

    fn kopi() -> NewProduct {
        NewProduct {
            name: "Kopi Susu".to_string(),
            category: "Minuman".to_string(),
            price: rp(8_000),
            cost: rp(5_000),
            stock: 3,
            min_stock: None,
            supplier: None,
        }
    }

    #[test]
    fn test_add_product_assigns_uuid_and_default_min_stock() {
        let mut books = Books::default();
        let product = books.add_product(kopi()).unwrap();

        assert_eq!(product.id.len(), 36);
        assert_eq!(product.min_stock, DEFAULT_MIN_STOCK);
        assert_eq!(books.store().products().len(), 1);
    }

    #[test]
    fn test_add_product_rejects_invalid_form() {
        let mut books = Books::default();
        let mut p = kopi();
        p.cost = Money::zero();

        assert!(matches!(
            books.add_product(p),
            Err(StoreError::Validation(ValidationError::MustBePositive { .. }))
        ));
        assert!(books.store().products().is_empty());
    }

    #[test]
    fn test_checkout_moves_stock_and_posts_journal() {
        let mut books = Books::default();
        let product = books.add_product(kopi()).unwrap();

        let mut cart = Cart::new();
        cart.add_product(&product).unwrap();
        cart.add_product(&product).unwrap();

        let receipt = books
            .checkout(&mut cart, Tender::cash(rp(20_000)), today())
            .unwrap();

        assert_eq!(receipt.transaction_id, "TRX000001");
        assert_eq!(receipt.customer, WALK_IN_CUSTOMER);
        assert_eq!(receipt.total, rp(16_000));
        assert_eq!(receipt.change, Some(rp(4_000)));
        assert!(cart.is_empty());

        assert_eq!(books.product(&product.id).unwrap().stock, 1);

        let journal = books.store().journal().list();
        assert_eq!(journal.len(), 1);
        assert_eq!(journal[0].reference, "TRX000001");
        assert_eq!(journal[0].kind, JournalKind::Automatic);
        assert_eq!(journal[0].debit[0].account, "Kas");
    }

    #[test]
    fn test_checkout_keeps_cart_on_short_cash() {
        let mut books = Books::default();
        let product = books.add_product(kopi()).unwrap();
        let mut cart = Cart::new();
        cart.add_product(&product).unwrap();

        let err = books
            .checkout(&mut cart, Tender::cash(rp(5_000)), today())
            .unwrap_err();

        assert!(matches!(
            err,
            StoreError::Core(CoreError::InsufficientPayment { .. })
        ));
        assert_eq!(cart.item_count(), 1);
        assert!(books.store().transactions().is_empty());
    }

    #[test]
    fn test_checkout_rechecks_catalog_stock() {
        let mut books = Books::default();
        let product = books.add_product(kopi()).unwrap();
        let mut cart = Cart::new();
        cart.add_product(&product).unwrap();
        cart.add_product(&product).unwrap();

        let update = ProductUpdate {
            stock: Some(1),
            ..Default::default()
        };
        books.update_product(&product.id, update).unwrap();

        let err = books
            .checkout(&mut cart, Tender::new(PaymentMethod::Transfer, None), today())
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::InsufficientStock { available: 1, .. })
        ));
    }

    #[test]
    fn test_checkout_empty_cart() {
        let mut books = Books::default();
        let err = books
            .checkout(&mut Cart::new(), Tender::cash(rp(1)), today())
            .unwrap_err();
        assert_eq!(err, StoreError::Core(CoreError::EmptyCart));
    }

    #[test]
    fn test_record_unpaid_sale_posts_receivable() {
        let mut books = Books::default();
        let sale = NewTransaction {
            date: today(),
            customer: "Toko Sebelah".to_string(),
            kind: TransactionKind::Penjualan,
            amount: rp(50_000),
            description: "Titip jual".to_string(),
            status: PaymentStatus::BelumLunas,
            items: vec![TransactionItem {
                product_id: "deleted".to_string(),
                product_name: "Barang lama".to_string(),
                quantity: 1,
                price: rp(50_000),
                cost: None,
            }],
            payment_method: None,
            cash_received: None,
            change: None,
        };

        books.record_transaction(sale).unwrap();
        assert_eq!(books.store().journal().list()[0].debit[0].account, "Piutang Usaha");
    }

    #[test]
    fn test_purchase_creates_then_restocks() {
        let mut books = Books::default();
        let order = |qty: i64, cost: i64, status: PaymentStatus| PurchaseOrder {
            date: today(),
            supplier: "CV Sumber Rejeki".to_string(),
            description: "Stok gula".to_string(),
            status,
            payment_method: None,
            items: vec![PurchaseLine {
                name: "Gula 1kg".to_string(),
                category: String::new(),
                quantity: qty,
                cost: rp(cost),
            }],
        };

        let first = books.record_purchase(order(10, 14_000, PaymentStatus::Lunas)).unwrap();
        assert_eq!(first.id, "PUR000001");
        assert_eq!(first.amount, rp(140_000));

        let product = books.find_product("gula 1kg").unwrap().clone();
        assert_eq!(product.price, rp(18_200));
        assert_eq!(product.category, DEFAULT_PURCHASE_CATEGORY);
        assert_eq!(product.supplier.as_deref(), Some("CV Sumber Rejeki"));
        assert_eq!(first.items[0].product_id, product.id);

        let second = books
            .record_purchase(order(5, 15_000, PaymentStatus::BelumLunas))
            .unwrap();
        assert_eq!(books.store().products().len(), 1);
        let product = books.product(&product.id).unwrap();
        assert_eq!(product.stock, 15);
        assert_eq!(product.cost, rp(15_000));
        assert_eq!(second.items[0].product_id, product.id);

        let journal = books.store().journal().list();
        assert_eq!(journal[0].credit[0].account, "Hutang Usaha");
        assert_eq!(journal[1].credit[0].account, "Kas");
    }

    #[test]
    fn test_purchase_rejects_bad_line_without_side_effects() {
        let mut books = Books::default();
        let order = PurchaseOrder {
            date: today(),
            supplier: "CV Maju".to_string(),
            description: "Stok".to_string(),
            status: PaymentStatus::Lunas,
            payment_method: None,
            items: vec![
                PurchaseLine {
                    name: "Teh".to_string(),
                    category: "Minuman".to_string(),
                    quantity: 2,
                    cost: rp(3_000),
                },
                PurchaseLine {
                    name: "Kopi".to_string(),
                    category: "Minuman".to_string(),
                    quantity: 0,
                    cost: rp(3_000),
                },
            ],
        };

        assert!(books.record_purchase(order).is_err());
        assert!(books.store().is_empty());
    }

    #[test]
    fn test_expense_and_manual_journal() {
        let mut books = Books::default();
        let expense = books
            .record_expense(NewExpense {
                date: today(),
                description: "Gaji karyawan".to_string(),
                amount: rp(1_500_000),
                category: warung_core::ExpenseCategory::Operasional,
                status: PaymentStatus::BelumLunas,
            })
            .unwrap();
        assert_eq!(expense.id, "EXP000001");

        let entry = books
            .add_manual_journal(ManualJournal {
                date: today(),
                description: "Setoran modal".to_string(),
                reference: "JM-01".to_string(),
                debit: vec![JournalLine::new("Kas", rp(2_000_000))],
                credit: vec![JournalLine::new("Modal", rp(2_000_000))],
            })
            .unwrap();
        assert_eq!(entry.id, "JRN000002");

        let filter = JournalFilter::new(ReportPeriod::All, today());
        let summary = books.journal_summary(&filter);
        assert_eq!(summary.entries, 2);
        assert!(summary.is_balanced);
        assert_eq!(
            books.journal_entries(&filter.with_kind(JournalKind::Manual)).len(),
            1
        );
    }

    #[test]
    fn test_deletes_do_not_cascade() {
        let mut books = Books::default();
        let product = books.add_product(kopi()).unwrap();
        let mut cart = Cart::new();
        cart.add_product(&product).unwrap();
        let receipt = books
            .checkout(&mut cart, Tender::new(PaymentMethod::Kredit, None), today())
            .unwrap();

        books.delete_product(&product.id).unwrap();
        assert_eq!(books.store().transactions().len(), 1);

        books.delete_transaction(&receipt.transaction_id).unwrap();
        assert_eq!(books.store().journal().len(), 1);
        assert!(books.delete_transaction(&receipt.transaction_id).is_err());
    }

    #[test]
    fn test_adjust_stock_requires_positive_quantity() {
        let mut books = Books::default();
        let product = books.add_product(kopi()).unwrap();

        assert!(books.adjust_stock(&product.id, 0, StockMovement::Purchase).is_err());
        let p = books.adjust_stock(&product.id, 10, StockMovement::Sale).unwrap();
        assert_eq!(p.stock, 0);
    }

    #[test]
    fn test_oversized_amounts_and_stock_are_rejected() {
        let mut books = Books::default();
        let product = books
            .add_product(NewProduct {
                stock: MAX_STOCK,
                ..kopi()
            })
            .unwrap();

        let err = books
            .adjust_stock(&product.id, 1, StockMovement::Purchase)
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::OutOfRange { .. })
        ));
        assert_eq!(books.product(&product.id).unwrap().stock, MAX_STOCK);

        let err = books
            .record_expense(NewExpense {
                date: today(),
                description: "Sewa".to_string(),
                amount: rp(i64::MAX),
                category: warung_core::ExpenseCategory::Lainnya,
                status: PaymentStatus::Lunas,
            })
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::OutOfRange { .. })
        ));
        assert!(books.store().expenses().is_empty());
    }

    #[test]
    fn test_purchase_past_stock_limit_has_no_side_effects() {
        let mut books = Books::default();
        books
            .add_product(NewProduct {
                name: "Gula 1kg".to_string(),
                stock: MAX_STOCK - 10,
                ..kopi()
            })
            .unwrap();
        let line = |name: &str, quantity: i64| PurchaseLine {
            name: name.to_string(),
            category: String::new(),
            quantity,
            cost: rp(14_000),
        };
        let order = PurchaseOrder {
            date: today(),
            supplier: "CV Sumber Rejeki".to_string(),
            description: "Stok gula".to_string(),
            status: PaymentStatus::Lunas,
            payment_method: None,
            items: vec![line("Teh", 5), line("Gula 1kg", 6), line("gula 1kg", 6)],
        };

        assert!(books.record_purchase(order).is_err());
        assert_eq!(books.store().products().len(), 1);
        assert!(books.store().purchases().is_empty());
        assert!(books.store().journal().is_empty());
    }

    #[test]
    fn test_settings_validate() {
        assert!(BooksSettings::default().validate().is_ok());
        let bad = BooksSettings {
            purchase_markup_bps: 20_000,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }
}
