//! Expense commands (Beban screen).

use tracing::debug;
use warung_core::NewExpense;
use warung_store::ExpenseFilter;

use crate::args::{ExpenseAddArgs, ExpenseListArgs};
use crate::error::CliResult;
use crate::output::{key_values, Out, Table};
use crate::state::Session;

pub fn add(session: &mut Session, args: ExpenseAddArgs) -> CliResult<Out> {
    let date = session.date_or_today(args.date);
    let expense = session.books_mut().record_expense(NewExpense {
        date,
        description: args.description,
        amount: args.amount,
        category: args.category,
        status: args.status,
    })?;

    Out::new(
        format!(
            "Recorded {}: {} {} ({})",
            expense.id,
            expense.category.account_name(),
            expense.amount,
            expense.status.label()
        ),
        &expense,
    )
}

fn filter(args: &ExpenseListArgs) -> ExpenseFilter {
    ExpenseFilter {
        query: args.query.clone(),
        category: args.category,
        status: args.status,
    }
}

pub fn list(session: &Session, args: &ExpenseListArgs) -> CliResult<Out> {
    let expenses = session.books().expenses(&filter(args));
    debug!(count = expenses.len(), "Listing expenses");

    if expenses.is_empty() {
        return Out::new("No expenses", &expenses);
    }

    let mut table = Table::new(&["ID", "Date", "Description", "Category", "Amount", "Status"])
        .align_right(&[4]);
    for e in &expenses {
        table.row(vec![
            e.id.clone(),
            e.date.to_string(),
            e.description.clone(),
            e.category.label().to_string(),
            e.amount.to_string(),
            e.status.label().to_string(),
        ]);
    }
    Out::new(table.render(), &expenses)
}

pub fn delete(session: &mut Session, id: &str) -> CliResult<Out> {
    let expense = session.books_mut().delete_expense(id.trim())?;
    Out::new(format!("Deleted {}", expense.id), &expense)
}

pub fn stats(session: &Session, args: &ExpenseListArgs) -> CliResult<Out> {
    let stats = session.books().expense_stats(&filter(args));
    let text = key_values(&[
        ("Total", stats.total.to_string()),
        ("Paid", stats.paid.to_string()),
        ("Unpaid", stats.unpaid.to_string()),
    ]);
    Out::new(text, &stats)
}
