mod advisor;
mod backup;
mod cli;
mod error;
mod fmt;
mod ledger;
mod models;
mod settings;
mod store;
mod summary;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use cli::add::TransactionDraft;
use cli::{Cli, Commands};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        None => cli::report::dashboard(),
        Some(Commands::Init { data_dir, currency }) => cli::init::run(data_dir, currency),
        Some(Commands::Add {
            description,
            amount,
            kind,
            category,
            method,
        }) => cli::add::run(TransactionDraft {
            description: &description,
            amount: &amount,
            kind,
            category,
            method,
        }),
        Some(Commands::Delete { id }) => cli::delete::run(&id),
        Some(Commands::List { limit }) => cli::list::run(limit),
        Some(Commands::Summary) => cli::report::summary(),
        Some(Commands::Breakdown) => cli::report::breakdown(),
        Some(Commands::Advise) => cli::advise::run(),
        Some(Commands::Export { output }) => cli::backup::run(output),
        Some(Commands::Import { file }) => cli::import::run(&file),
        Some(Commands::Status) => cli::status::run(),
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "financas", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
