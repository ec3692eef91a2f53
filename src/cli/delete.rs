use crate::cli::open_ledger;
use crate::error::{FinancasError, Result};
use crate::fmt::money;
use crate::models::Transaction;

/// Shortest input accepted as an id prefix.
const MIN_PREFIX: usize = 4;

/// IDs in `transactions` equal to `needle`, or starting with it when there
/// is no exact match and `needle` is at least [`MIN_PREFIX`] characters.
fn matching_ids<'a>(transactions: &'a [Transaction], needle: &str) -> Vec<&'a str> {
    if needle.is_empty() {
        return Vec::new();
    }
    if let Some(exact) = transactions.iter().find(|t| t.id == needle) {
        return vec![exact.id.as_str()];
    }
    if needle.chars().count() < MIN_PREFIX {
        return Vec::new();
    }
    transactions
        .iter()
        .filter(|t| t.id.starts_with(needle))
        .map(|t| t.id.as_str())
        .collect()
}

pub fn run(id: &str) -> Result<()> {
    let (settings, mut ledger) = open_ledger()?;
    let id = id.trim();
    if id.is_empty() {
        return Err(FinancasError::InvalidInput("an ID is required".to_string()));
    }
    let resolved = match matching_ids(ledger.transactions(), id).as_slice() {
        [] => id.to_string(),
        [one] => one.to_string(),
        many => {
            return Err(FinancasError::InvalidInput(format!(
                "'{id}' matches {} transactions; use more characters",
                many.len()
            )))
        }
    };

    let label = ledger
        .find(&resolved)
        .map(|t| format!("{} {}", t.description, money(t.amount, &settings.currency)));
    if ledger.delete(&resolved)? {
        println!("Deleted {resolved}: {}", label.unwrap_or_default());
    } else {
        println!("No transaction with ID {id}; nothing deleted.");
    }
    Ok(())
}
