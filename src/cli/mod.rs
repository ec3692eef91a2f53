pub mod add;
pub mod advise;
pub mod backup;
pub mod delete;
pub mod import;
pub mod init;
pub mod list;
pub mod report;
pub mod status;

use clap::{Parser, Subcommand};

use crate::error::Result;
use crate::ledger::Ledger;
use crate::models::{Category, PaymentMethod, TransactionType};
use crate::settings::{load_settings, Settings};
use crate::store::JsonFileStore;

/// Load settings and the ledger stored in the configured data directory.
pub(crate) fn open_ledger() -> Result<(Settings, Ledger<JsonFileStore>)> {
    let settings = load_settings();
    let store = JsonFileStore::in_dir(&settings.data_path());
    Ok((settings, Ledger::open(store)))
}

#[derive(Parser)]
#[command(
    name = "financas",
    version,
    about = "Track income and expenses and get an AI health check of your finances."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Choose a data directory and create the transaction file.
    Init {
        /// Path for financas data (default: ~/Documents/financas)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
        /// Currency code used for display and analysis, e.g. BRL, USD
        #[arg(long)]
        currency: Option<String>,
    },
    /// Record a new transaction.
    Add {
        /// What the money was for, e.g. 'Supermarket'
        description: String,
        /// Amount, always positive. A lone comma is a decimal separator
        /// ('1,234' is 1.234); write thousands as '1234' or '1,234.00'
        amount: String,
        /// Income or expense
        #[arg(long = "type", value_enum, default_value_t = TransactionType::Expense)]
        kind: TransactionType,
        /// Category label
        #[arg(long, value_enum, default_value_t = Category::Food)]
        category: Category,
        /// Payment method (income is always cash)
        #[arg(long, value_enum, default_value_t = PaymentMethod::CashOrDebit)]
        method: PaymentMethod,
    },
    /// Delete a transaction by ID (a unique prefix of 4+ characters is enough).
    Delete {
        /// Transaction ID as shown by `financas list`
        id: String,
    },
    /// List transactions, newest first.
    List {
        /// Show at most N transactions
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show income, expenses, balance and this month's credit card spending.
    Summary,
    /// Show expenses by category, largest first.
    Breakdown,
    /// Ask the AI advisor for a financial health report.
    Advise,
    /// Write all transactions to a JSON backup file.
    Export {
        /// Output path (default: <data_dir>/backups/financas-backup-YYYY-MM-DD.json)
        #[arg(long)]
        output: Option<String>,
    },
    /// Replace all transactions with the contents of a backup file.
    Import {
        /// Path to a JSON backup
        file: String,
    },
    /// Show settings, data file and record count.
    Status,
    /// Print a shell completion script.
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
