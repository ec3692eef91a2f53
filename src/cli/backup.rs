use std::path::PathBuf;

use crate::backup::write_backup;
use crate::cli::open_ledger;
use crate::error::Result;
use crate::fmt::format_bytes;

pub fn run(output: Option<String>) -> Result<()> {
    let (settings, ledger) = open_ledger()?;
    let dest_path = write_backup(
        ledger.transactions(),
        output.map(PathBuf::from),
        &settings.backups_dir(),
    )?;

    let size = std::fs::metadata(&dest_path)?.len();
    println!("Backup saved to {}", dest_path.display());
    println!("Transactions: {}", ledger.len());
    println!("Size: {}", format_bytes(size));
    Ok(())
}
