use std::path::PathBuf;

use crate::backup::restore;
use crate::cli::open_ledger;
use crate::error::Result;

pub fn run(file: &str) -> Result<()> {
    let file_path = PathBuf::from(file);
    let (_, mut ledger) = open_ledger()?;
    let replaced = ledger.len();

    let restored = restore(&mut ledger, &file_path)?;

    println!("Restored {restored} transactions from {}", file_path.display());
    if replaced > 0 {
        println!("{replaced} previous transactions were replaced.");
    }
    Ok(())
}
