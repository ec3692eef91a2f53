use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::open_ledger;
use crate::error::Result;
use crate::fmt::{local_date, money};
use crate::models::TransactionType;
use crate::summary::sorted_by_date_desc;

const SHORT_ID: usize = 8;

pub fn run(limit: Option<usize>) -> Result<()> {
    let (settings, ledger) = open_ledger()?;
    if ledger.is_empty() {
        println!("No transactions yet. Add one with `financas add`.");
        return Ok(());
    }

    let sorted = sorted_by_date_desc(ledger.transactions());
    let shown = limit.unwrap_or(sorted.len()).min(sorted.len());

    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Description", "Category", "Method", "Amount"]);
    for t in sorted.iter().take(shown) {
        let amount = match t.kind {
            TransactionType::Income => format!("+{}", money(t.amount, &settings.currency)).green(),
            TransactionType::Expense => format!("-{}", money(t.amount, &settings.currency)).red(),
        };
        table.add_row(vec![
            Cell::new(t.id.chars().take(SHORT_ID).collect::<String>()),
            Cell::new(local_date(t.parsed_date(), &t.date)),
            Cell::new(&t.description),
            Cell::new(t.category),
            Cell::new(t.payment_method.label()),
            Cell::new(amount),
        ]);
    }
    println!("Transactions\n{table}");
    if shown < sorted.len() {
        println!("Showing {shown} of {}", sorted.len());
    }
    Ok(())
}
