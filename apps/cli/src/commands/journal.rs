//! # Journal Commands
//!
//! The Jurnal screen. Automatic entries are posted by sales, purchases and
//! expenses; `journal add` enters a manual one.
//!
//! ```text
//! journal add --description "Setoran modal" --reference SETOR-01 \
//!             --debit Kas=1jt --credit Modal=1jt
//!
//!   Debit                      Credit
//!   Kas          Rp 1.000.000
//!                              Modal        Rp 1.000.000
//!   ─────────────────────────  ─────────────────────────
//!   Σ debit  ==  Σ credit  > 0, or the entry is rejected
//! ```

use tracing::debug;
use warung_core::journal::COMMON_ACCOUNTS;
use warung_core::{JournalEntry, ManualJournal};
use warung_store::JournalFilter;

use crate::args::{JournalAddArgs, JournalListArgs};
use crate::error::CliResult;
use crate::output::{key_values, Out, Table};
use crate::state::Session;

pub fn add(session: &mut Session, args: JournalAddArgs) -> CliResult<Out> {
    let date = session.date_or_today(args.date);
    let entry = session.books_mut().add_manual_journal(ManualJournal {
        date,
        description: args.description,
        reference: args.reference,
        debit: args.debit,
        credit: args.credit,
    })?;

    Out::new(
        format!("Recorded {} for {}\n\n{}", entry.id, entry.total_debit(), render_entry(&entry)),
        &entry,
    )
}

fn filter(session: &Session, args: &JournalListArgs) -> JournalFilter {
    let mut filter = JournalFilter::new(args.period.period, session.today());
    filter.kind = args.kind;
    filter
}

pub fn list(session: &Session, args: &JournalListArgs) -> CliResult<Out> {
    let filter = filter(session, args);
    let books = session.books();
    let entries = books.journal_entries(&filter);
    let summary = books.journal_summary(&filter);
    debug!(count = entries.len(), period = %args.period.period.label(), "Listing journal entries");

    if entries.is_empty() {
        return Out::new("No journal entries", &summary);
    }

    let blocks: Vec<String> = entries.iter().map(|e| render_entry(e)).collect();
    let footer = key_values(&[
        ("Entries", summary.entries.to_string()),
        ("Total debit", summary.total_debit.to_string()),
        ("Total credit", summary.total_credit.to_string()),
        ("Balanced", yes_no(summary.is_balanced).to_string()),
    ]);
    let text = format!("{}\n\n{}", blocks.join("\n\n"), footer);

    Out::new(
        text,
        &serde_json::json!({ "entries": entries, "summary": summary }),
    )
}

/// One entry as a small debit/credit table under its header line.
fn render_entry(entry: &JournalEntry) -> String {
    let header = format!(
        "{}  {}  {}  [{}] {}",
        entry.id, entry.date, entry.reference, entry.kind, entry.description
    );

    let mut table = Table::new(&["Account", "Debit", "Credit"]).align_right(&[1, 2]);
    for line in &entry.debit {
        table.row(vec![line.account.clone(), line.amount.to_string(), String::new()]);
    }
    for line in &entry.credit {
        table.row(vec![
            format!("    {}", line.account),
            String::new(),
            line.amount.to_string(),
        ]);
    }
    format!("{}\n{}", header, table.render())
}

pub fn delete(session: &mut Session, id: &str) -> CliResult<Out> {
    let entry = session.books_mut().delete_journal_entry(id.trim())?;
    Out::new(format!("Deleted {}", entry.id), &entry)
}

pub fn trial_balance(session: &Session, args: &JournalListArgs) -> CliResult<Out> {
    let trial = session.books().trial_balance(&filter(session, args));
    if trial.rows.is_empty() {
        return Out::new("No journal entries", &trial);
    }

    let mut table =
        Table::new(&["Account", "Class", "Debit", "Credit", "Balance"]).align_right(&[2, 3, 4]);
    for row in &trial.rows {
        table.row(vec![
            row.account.clone(),
            format!("{:?}", row.class),
            row.debit.to_string(),
            row.credit.to_string(),
            row.balance.to_string(),
        ]);
    }
    table.row(vec![
        "Total".to_string(),
        String::new(),
        trial.total_debit.to_string(),
        trial.total_credit.to_string(),
        String::new(),
    ]);

    let text = format!(
        "Trial balance ({})\n\n{}\n\nBalanced: {}",
        args.period.period.label(),
        table.render(),
        yes_no(trial.is_balanced())
    );
    Out::new(text, &trial)
}

pub fn accounts() -> CliResult<Out> {
    Out::new(COMMON_ACCOUNTS.join("\n"), &COMMON_ACCOUNTS)
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "NO"
    }
}
