//! Command-line interface: the process arguments and the grammar of each
//! shell line.
//!
//! Shell lines are parsed with the same clap machinery as the process
//! arguments, so `help`, `product --help` and error messages come for free.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;
use warung_core::{
    ExpenseCategory, JournalKind, JournalLine, Money, PaymentMethod, PaymentStatus, ReportPeriod,
    TransactionKind,
};
use warung_store::PurchaseLine;

// =============================================================================
// Process Arguments
// =============================================================================

/// warung: point-of-sale and bookkeeping for a small shop.
///
/// Starts an interactive shell by default. Type `help` inside the shell for
/// the list of commands. Nothing is saved: the books start empty on every
/// run (use --seed for demo data).
///
/// Run a single command with `warung -- <command>`, e.g.
/// `warung --seed -- report balance`.
#[derive(Debug, Parser, Clone)]
#[command(name = "warung", version)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    /// Run the commands in this file, one per line, then exit. Lines starting
    /// with `#` are ignored.
    #[arg(long, conflicts_with = "command")]
    script: Option<PathBuf>,

    /// A single shell command to run instead of the interactive shell.
    #[arg(last = true)]
    command: Vec<String>,
}

impl Args {
    pub fn new(common: Common, script: Option<PathBuf>, command: Vec<String>) -> Self {
        Self {
            common,
            script,
            command,
        }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn script(&self) -> Option<&PathBuf> {
        self.script.as_ref()
    }

    pub fn command(&self) -> &[String] {
        &self.command
    }
}

/// Arguments shared by every mode.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG. Logs go to stderr.
    #[arg(long, default_value_t = LevelFilter::WARN)]
    log_level: LevelFilter,

    /// Path to warung.toml. Defaults to the platform config directory.
    #[arg(long, env = "WARUNG_CONFIG")]
    config: Option<PathBuf>,

    /// Load the demo warung before running anything.
    #[arg(long)]
    seed: bool,

    /// Print command output as JSON.
    #[arg(long)]
    json: bool,
}

impl Common {
    pub fn new(log_level: LevelFilter, config: Option<PathBuf>, seed: bool, json: bool) -> Self {
        Self {
            log_level,
            config,
            seed,
            json,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn config(&self) -> Option<&PathBuf> {
        self.config.as_ref()
    }

    pub fn seed(&self) -> bool {
        self.seed
    }

    pub fn json(&self) -> bool {
        self.json
    }
}

// =============================================================================
// Shell Line
// =============================================================================

/// One line typed at the `warung>` prompt.
#[derive(Debug, Parser, Clone)]
#[command(
    name = "warung",
    no_binary_name = true,
    disable_version_flag = true,
    subcommand_required = true
)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Debug, Subcommand, Clone)]
pub enum ShellCommand {
    /// Manage the product catalog (Produk).
    #[command(subcommand)]
    Product(ProductCommand),

    /// Build the sale at the register (Kasir).
    #[command(subcommand)]
    Cart(CartCommand),

    /// Pay for the cart and record the sale.
    Pay(PayArgs),

    /// Browse recorded sales (Transaksi).
    #[command(subcommand, alias = "trx")]
    Transaction(TransactionCommand),

    /// Record stock bought from suppliers (Pembelian).
    #[command(subcommand)]
    Purchase(PurchaseCommand),

    /// Record running costs (Beban).
    #[command(subcommand)]
    Expense(ExpenseCommand),

    /// Manual and automatic journal entries (Jurnal).
    #[command(subcommand)]
    Journal(JournalCommand),

    /// Financial reports (Laporan).
    #[command(subcommand)]
    Report(ReportCommand),

    /// Load the demo warung into the current books.
    Seed,

    /// Leave the shell. Everything entered is discarded.
    #[command(alias = "quit")]
    Exit,
}

// =============================================================================
// Products
// =============================================================================

#[derive(Debug, Subcommand, Clone)]
pub enum ProductCommand {
    /// Add a product to the catalog.
    Add(ProductAddArgs),

    /// Change a product. Only the flags given are applied.
    Edit(ProductEditArgs),

    /// Remove a product. Past transactions keep their lines.
    Delete {
        /// Product id or exact name
        product: String,
    },

    /// List products, optionally filtered by name or category.
    List {
        query: Option<String>,

        /// Only products below their minimum stock.
        #[arg(long)]
        low_stock: bool,
    },

    /// Receive stock outside a purchase.
    Restock {
        /// Product id or exact name
        product: String,
        quantity: i64,
    },

    /// Inventory totals.
    Stats,
}

#[derive(Debug, clap::Args, Clone)]
pub struct ProductAddArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub category: String,

    /// Selling price, e.g. 3500, 3.500 or 35rb.
    #[arg(long)]
    pub price: Money,

    /// Cost price (harga pokok).
    #[arg(long)]
    pub cost: Money,

    #[arg(long, default_value_t = 0)]
    pub stock: i64,

    /// Defaults to the configured minimum stock.
    #[arg(long)]
    pub min_stock: Option<i64>,

    #[arg(long)]
    pub supplier: Option<String>,
}

#[derive(Debug, clap::Args, Clone)]
pub struct ProductEditArgs {
    /// Product id or exact name
    pub product: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub price: Option<Money>,

    #[arg(long)]
    pub cost: Option<Money>,

    #[arg(long)]
    pub stock: Option<i64>,

    #[arg(long)]
    pub min_stock: Option<i64>,

    /// An empty value clears the supplier.
    #[arg(long)]
    pub supplier: Option<String>,
}

// =============================================================================
// Kasir
// =============================================================================

#[derive(Debug, Subcommand, Clone)]
pub enum CartCommand {
    /// Put a product in the cart.
    Add {
        /// Product id or exact name
        product: String,

        #[arg(long, short, default_value_t = 1)]
        qty: i64,
    },

    /// Set the quantity of a cart line; 0 or less removes it.
    Set {
        product: String,

        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Take a line out of the cart.
    Remove { product: String },

    /// Show the cart, its total and the quick cash amounts.
    Show,

    /// Empty the cart.
    Clear,
}

#[derive(Debug, clap::Args, Clone)]
pub struct PayArgs {
    /// tunai, transfer or kredit
    #[arg(long, short, default_value = "tunai")]
    pub method: PaymentMethod,

    /// Cash handed over, e.g. 50000 or 50rb. Required for tunai.
    #[arg(long)]
    pub cash: Option<Money>,

    /// Cash equals the total (the "Pas" button).
    #[arg(long, conflicts_with = "cash")]
    pub exact: bool,

    /// Sale date (YYYY-MM-DD); defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

// =============================================================================
// Transactions
// =============================================================================

#[derive(Debug, Subcommand, Clone)]
pub enum TransactionCommand {
    /// List transactions, newest first.
    List(TransactionListArgs),

    /// Show one transaction with its lines.
    Show { id: String },

    /// Delete a transaction. Its journal entry and stock movement stay.
    Delete { id: String },

    /// Totals over the listed transactions.
    Stats(TransactionListArgs),
}

#[derive(Debug, clap::Args, Clone, Default)]
pub struct TransactionListArgs {
    /// Matches customer or id.
    #[arg(long, short)]
    pub query: Option<String>,

    /// penjualan or pembelian
    #[arg(long)]
    pub kind: Option<TransactionKind>,
}

// =============================================================================
// Purchases
// =============================================================================

#[derive(Debug, Subcommand, Clone)]
pub enum PurchaseCommand {
    /// Record a purchase. Each item restocks the product with the same name
    /// or creates it with the configured markup.
    Add(PurchaseAddArgs),

    /// List purchases, newest first.
    List(PurchaseListArgs),

    /// Delete a purchase. Stock and journal are left as they are.
    Delete { id: String },

    /// Totals over the listed purchases.
    Stats(PurchaseListArgs),
}

#[derive(Debug, clap::Args, Clone)]
pub struct PurchaseAddArgs {
    #[arg(long)]
    pub supplier: String,

    #[arg(long)]
    pub description: String,

    /// One line as "name;category;qty;cost". Repeat for more lines. The
    /// category may be left out: "name;qty;cost".
    #[arg(long = "item", required = true, value_parser = parse_purchase_line)]
    pub items: Vec<PurchaseLine>,

    /// lunas or belum-lunas
    #[arg(long, default_value = "lunas")]
    pub status: PaymentStatus,

    #[arg(long)]
    pub method: Option<PaymentMethod>,

    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, clap::Args, Clone, Default)]
pub struct PurchaseListArgs {
    /// Matches supplier or id.
    #[arg(long, short)]
    pub query: Option<String>,

    #[arg(long)]
    pub status: Option<PaymentStatus>,
}

// =============================================================================
// Expenses
// =============================================================================

#[derive(Debug, Subcommand, Clone)]
pub enum ExpenseCommand {
    /// Record an expense.
    Add(ExpenseAddArgs),

    /// List expenses, newest first.
    List(ExpenseListArgs),

    /// Delete an expense. Its journal entry stays.
    Delete { id: String },

    /// Paid and unpaid totals over the listed expenses.
    Stats(ExpenseListArgs),
}

#[derive(Debug, clap::Args, Clone)]
pub struct ExpenseAddArgs {
    #[arg(long)]
    pub description: String,

    #[arg(long)]
    pub amount: Money,

    /// operasional, administrasi, penjualan or lainnya
    #[arg(long, default_value = "operasional")]
    pub category: ExpenseCategory,

    #[arg(long, default_value = "lunas")]
    pub status: PaymentStatus,

    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, clap::Args, Clone, Default)]
pub struct ExpenseListArgs {
    /// Matches description.
    #[arg(long, short)]
    pub query: Option<String>,

    #[arg(long)]
    pub category: Option<ExpenseCategory>,

    #[arg(long)]
    pub status: Option<PaymentStatus>,
}

// =============================================================================
// Journal
// =============================================================================

#[derive(Debug, Subcommand, Clone)]
pub enum JournalCommand {
    /// Add a manual entry. Debits and credits must balance.
    Add(JournalAddArgs),

    /// List entries, newest first, with their totals.
    List(JournalListArgs),

    /// Delete an entry.
    Delete { id: String },

    /// Debit, credit and balance per account.
    TrialBalance(JournalListArgs),

    /// Account names in common use.
    Accounts,
}

#[derive(Debug, clap::Args, Clone)]
pub struct JournalAddArgs {
    #[arg(long)]
    pub description: String,

    /// Source document, e.g. an invoice or receipt number.
    #[arg(long)]
    pub reference: String,

    /// A debit line as "Account=amount", e.g. "Kas=100000". Repeatable.
    #[arg(long, required = true, value_parser = parse_journal_line)]
    pub debit: Vec<JournalLine>,

    /// A credit line as "Account=amount". Repeatable.
    #[arg(long, required = true, value_parser = parse_journal_line)]
    pub credit: Vec<JournalLine>,

    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, clap::Args, Clone, Default)]
pub struct JournalListArgs {
    #[clap(flatten)]
    pub period: PeriodArg,

    /// manual or automatic
    #[arg(long)]
    pub kind: Option<JournalKind>,
}

// =============================================================================
// Reports
// =============================================================================

#[derive(Debug, Subcommand, Clone)]
pub enum ReportCommand {
    /// Revenue, COGS, profit, cash and equity.
    Summary(PeriodArg),

    /// Headline account balances.
    Accounts(PeriodArg),

    /// Income statement (Laba Rugi).
    Income(PeriodArg),

    /// Balance sheet (Neraca).
    Balance(PeriodArg),

    /// Cash flow statement (Arus Kas), from the journal.
    #[command(alias = "cash-flow")]
    Cashflow(PeriodArg),

    /// Today's figures, stock alerts and recent transactions.
    Dashboard,
}

#[derive(Debug, clap::Args, Clone, Default)]
pub struct PeriodArg {
    /// semua, bulan-ini, bulan-lalu, triwulan or tahun-ini
    #[arg(long, short, default_value = "semua")]
    pub period: ReportPeriod,
}

// =============================================================================
// Value Parsers
// =============================================================================

/// Parses `name;category;qty;cost` (or `name;qty;cost`).
pub fn parse_purchase_line(input: &str) -> Result<PurchaseLine, String> {
    let parts: Vec<&str> = input.split(';').map(str::trim).collect();
    let (name, category, quantity, cost) = match parts.as_slice() {
        [name, category, quantity, cost] => (*name, *category, *quantity, *cost),
        [name, quantity, cost] => (*name, "", *quantity, *cost),
        _ => {
            return Err(format!(
                "expected \"name;category;qty;cost\", got \"{}\"",
                input
            ))
        }
    };

    let quantity = quantity
        .parse::<i64>()
        .map_err(|_| format!("quantity '{}' is not a whole number", quantity))?;
    let cost = Money::parse(cost).map_err(|e| e.to_string())?;

    Ok(PurchaseLine {
        name: name.to_string(),
        category: category.to_string(),
        quantity,
        cost,
    })
}

/// Parses `Account=amount`.
pub fn parse_journal_line(input: &str) -> Result<JournalLine, String> {
    let (account, amount) = input
        .rsplit_once('=')
        .ok_or_else(|| format!("expected \"Account=amount\", got \"{}\"", input))?;
    let amount = Money::parse(amount).map_err(|e| e.to_string())?;
    Ok(JournalLine::new(account.trim(), amount))
}
