//! Backup export and restore.
//!
//! A backup is a pretty-printed JSON array of transaction records, the same
//! shape as the store file. Restoring checks every record before anything is
//! replaced, so a bad file leaves the ledger as it was.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde_json::Value;

use crate::error::{FinancasError, Result};
use crate::ledger::Ledger;
use crate::models::Transaction;
use crate::store::TransactionStore;

pub fn export_json(transactions: &[Transaction]) -> Result<String> {
    Ok(serde_json::to_string_pretty(transactions)?)
}

pub fn backup_file_name(date: NaiveDate) -> String {
    format!("financas-backup-{}.json", date.format("%Y-%m-%d"))
}

/// Write a backup to `output`, or to a dated file in `backups_dir`.
pub fn write_backup(
    transactions: &[Transaction],
    output: Option<PathBuf>,
    backups_dir: &Path,
) -> Result<PathBuf> {
    let dest = match output {
        Some(p) => p,
        None => {
            std::fs::create_dir_all(backups_dir)?;
            backups_dir.join(backup_file_name(chrono::Local::now().date_naive()))
        }
    };
    let json = export_json(transactions)?;
    std::fs::write(&dest, format!("{json}\n"))?;
    Ok(dest)
}

fn invalid(index: usize, reason: impl Into<String>) -> FinancasError {
    FinancasError::InvalidData {
        index,
        reason: reason.into(),
    }
}

fn check_record(index: usize, value: &Value) -> Result<()> {
    let obj = value
        .as_object()
        .ok_or_else(|| invalid(index, "record is not an object"))?;
    match obj.get("id").and_then(Value::as_str) {
        Some(id) if !id.trim().is_empty() => {}
        _ => return Err(invalid(index, "missing id")),
    }
    match obj.get("amount").and_then(Value::as_f64) {
        Some(a) if a.is_finite() && a >= 0.0 => Ok(()),
        Some(_) => Err(invalid(index, "amount must be a non-negative number")),
        None => Err(invalid(index, "missing numeric amount")),
    }
}

/// Parse a backup document, checking every record in order and reporting
/// the first problem with its position.
pub fn decode_backup(content: &str) -> Result<Vec<Transaction>> {
    let root: Value = serde_json::from_str(content)
        .map_err(|e| FinancasError::InvalidFormat(format!("not valid JSON ({e})")))?;
    let Value::Array(items) = root else {
        return Err(FinancasError::InvalidFormat(
            "expected a list of transactions".to_string(),
        ));
    };

    let mut seen = HashSet::new();
    let mut transactions = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        check_record(index, &item)?;
        let txn: Transaction =
            serde_json::from_value(item).map_err(|e| invalid(index, e.to_string()))?;
        if !seen.insert(txn.id.clone()) {
            return Err(invalid(index, format!("duplicate id {}", txn.id)));
        }
        transactions.push(txn);
    }
    Ok(transactions)
}

/// Replace the ledger's contents with the backup at `path`. Returns the
/// number of records restored.
pub fn restore<S: TransactionStore>(ledger: &mut Ledger<S>, path: &Path) -> Result<usize> {
    let content = std::fs::read_to_string(path)?;
    let transactions = decode_backup(&content)?;
    let count = transactions.len();
    ledger.import_replace(transactions)?;
    Ok(count)
}
