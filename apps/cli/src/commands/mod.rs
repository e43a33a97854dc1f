//! # Shell Commands Module
//!
//! One function per shell command. Each takes the session and its parsed
//! arguments and returns an [`Out`].
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (dispatch)
//! ├── product.rs   ◄─── product add|edit|delete|list|restock|stats
//! ├── cart.rs      ◄─── cart add|set|remove|show|clear
//! ├── sale.rs      ◄─── pay, transaction list|show|delete|stats
//! ├── purchase.rs  ◄─── purchase add|list|delete|stats
//! ├── expense.rs   ◄─── expense add|list|delete|stats
//! ├── journal.rs   ◄─── journal add|list|delete|trial-balance|accounts
//! └── report.rs    ◄─── report summary|accounts|income|balance|cashflow|dashboard
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Shell Command Flow                                   │
//! │                                                                         │
//! │  warung> cart add "Kopi Susu" --qty 2                                   │
//! │         │                                                               │
//! │         │ (shell::split_line + clap)                                    │
//! │         ▼                                                               │
//! │  ShellCommand::Cart(CartCommand::Add { product, qty })                  │
//! │         │                                                               │
//! │         │ (execute)                                                     │
//! │         ▼                                                               │
//! │  cart::add(&mut Session, product, qty) -> CliResult<Out>                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Out { message, data } ──► text, or JSON under --json                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod expense;
pub mod journal;
pub mod product;
pub mod purchase;
pub mod report;
pub mod sale;

use tracing::debug;
use warung_store::seed_demo;

use crate::args::{
    CartCommand, ExpenseCommand, JournalCommand, ProductCommand, PurchaseCommand, ReportCommand,
    ShellCommand, TransactionCommand,
};
use crate::error::CliResult;
use crate::output::Out;
use crate::state::Session;

/// Runs one parsed command against the session.
pub fn execute(session: &mut Session, command: ShellCommand) -> CliResult<Out> {
    debug!(?command, "Executing command");

    match command {
        ShellCommand::Product(cmd) => match cmd {
            ProductCommand::Add(args) => product::add(session, args),
            ProductCommand::Edit(args) => product::edit(session, args),
            ProductCommand::Delete { product } => product::delete(session, &product),
            ProductCommand::List { query, low_stock } => {
                product::list(session, query.as_deref(), low_stock)
            }
            ProductCommand::Restock { product, quantity } => {
                product::restock(session, &product, quantity)
            }
            ProductCommand::Stats => product::stats(session),
        },

        ShellCommand::Cart(cmd) => match cmd {
            CartCommand::Add { product, qty } => cart::add(session, &product, qty),
            CartCommand::Set { product, quantity } => cart::set(session, &product, quantity),
            CartCommand::Remove { product } => cart::remove(session, &product),
            CartCommand::Show => cart::show(session),
            CartCommand::Clear => cart::clear(session),
        },

        ShellCommand::Pay(args) => sale::pay(session, args),

        ShellCommand::Transaction(cmd) => match cmd {
            TransactionCommand::List(args) => sale::list(session, &args),
            TransactionCommand::Show { id } => sale::show(session, &id),
            TransactionCommand::Delete { id } => sale::delete(session, &id),
            TransactionCommand::Stats(args) => sale::stats(session, &args),
        },

        ShellCommand::Purchase(cmd) => match cmd {
            PurchaseCommand::Add(args) => purchase::add(session, args),
            PurchaseCommand::List(args) => purchase::list(session, &args),
            PurchaseCommand::Delete { id } => purchase::delete(session, &id),
            PurchaseCommand::Stats(args) => purchase::stats(session, &args),
        },

        ShellCommand::Expense(cmd) => match cmd {
            ExpenseCommand::Add(args) => expense::add(session, args),
            ExpenseCommand::List(args) => expense::list(session, &args),
            ExpenseCommand::Delete { id } => expense::delete(session, &id),
            ExpenseCommand::Stats(args) => expense::stats(session, &args),
        },

        ShellCommand::Journal(cmd) => match cmd {
            JournalCommand::Add(args) => journal::add(session, args),
            JournalCommand::List(args) => journal::list(session, &args),
            JournalCommand::Delete { id } => journal::delete(session, &id),
            JournalCommand::TrialBalance(args) => journal::trial_balance(session, &args),
            JournalCommand::Accounts => journal::accounts(),
        },

        ShellCommand::Report(cmd) => match cmd {
            ReportCommand::Summary(p) => report::summary(session, p.period),
            ReportCommand::Accounts(p) => report::accounts(session, p.period),
            ReportCommand::Income(p) => report::income(session, p.period),
            ReportCommand::Balance(p) => report::balance(session, p.period),
            ReportCommand::Cashflow(p) => report::cash_flow(session, p.period),
            ReportCommand::Dashboard => report::dashboard(session),
        },

        ShellCommand::Seed => seed(session),

        ShellCommand::Exit => Ok(Out::message("Sampai jumpa!")),
    }
}

fn seed(session: &mut Session) -> CliResult<Out> {
    let today = session.today();
    let summary = seed_demo(session.books_mut(), today)?;
    let message = format!(
        "Demo data loaded: {} products, {} purchases, {} sales, {} expenses, {} journal entries",
        summary.products,
        summary.purchases,
        summary.transactions,
        summary.expenses,
        summary.journal_entries
    );
    Out::new(message, &summary)
}
