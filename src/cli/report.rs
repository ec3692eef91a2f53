use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::open_ledger;
use crate::error::Result;
use crate::fmt::{money, share_bar};
use crate::models::Transaction;
use crate::settings::Settings;
use crate::summary::{category_breakdown, Summary};

const BAR_WIDTH: usize = 24;

fn summary_table(transactions: &[Transaction], settings: &Settings) -> Table {
    let now = chrono::Local::now();
    let summary = Summary::compute(transactions, &now);
    let currency = &settings.currency;

    let balance = money(summary.balance, currency);
    let balance = if summary.balance >= 0.0 {
        balance.bold()
    } else {
        balance.red().bold()
    };

    let mut table = Table::new();
    table.set_header(vec!["", "Amount"]);
    table.add_row(vec![Cell::new("Income".green()), Cell::new(money(summary.income, currency))]);
    table.add_row(vec![Cell::new("Expenses".red()), Cell::new(money(summary.expenses, currency))]);
    table.add_row(vec![Cell::new("Balance".bold()), Cell::new(balance)]);
    table.add_row(vec![
        Cell::new(format!("Credit card ({})", now.format("%b %Y")).magenta()),
        Cell::new(money(summary.monthly_credit_card, currency)),
    ]);
    table
}

pub fn summary() -> Result<()> {
    let (settings, ledger) = open_ledger()?;
    println!("Summary\n{}", summary_table(ledger.transactions(), &settings));
    Ok(())
}

pub fn breakdown() -> Result<()> {
    let (settings, ledger) = open_ledger()?;
    let shares = category_breakdown(ledger.transactions());
    if shares.is_empty() {
        println!("No expenses recorded.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Category", "Amount", "%", ""]);
    for share in &shares {
        table.add_row(vec![
            Cell::new(share.category),
            Cell::new(money(share.total, &settings.currency)),
            Cell::new(format!("{:.1}%", share.pct)),
            Cell::new(share_bar(share.pct, BAR_WIDTH).cyan()),
        ]);
    }
    let total: f64 = shares.iter().map(|s| s.total).sum();
    table.add_row(vec![
        Cell::new("Total".bold()),
        Cell::new(money(total, &settings.currency)),
        Cell::new(""),
        Cell::new(""),
    ]);
    println!("Expenses by Category\n{table}");
    Ok(())
}

/// Shown when financas runs without a subcommand.
pub fn dashboard() -> Result<()> {
    let (settings, ledger) = open_ledger()?;
    println!("Summary\n{}", summary_table(ledger.transactions(), &settings));
    println!();
    if ledger.is_empty() {
        println!("No transactions yet. Add one with `financas add`, or run `financas --help`.");
    } else {
        println!(
            "{} transactions. `financas list` to browse, `financas advise` for a health report.",
            ledger.len()
        );
    }
    Ok(())
}
