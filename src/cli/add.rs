use crate::cli::open_ledger;
use crate::error::{FinancasError, Result};
use crate::fmt::money;
use crate::models::{Category, PaymentMethod, Transaction, TransactionType};

/// Raw form input, checked before it becomes a [`Transaction`].
pub struct TransactionDraft<'a> {
    pub description: &'a str,
    pub amount: &'a str,
    pub kind: TransactionType,
    pub category: Category,
    pub method: PaymentMethod,
}

impl TransactionDraft<'_> {
    pub fn validate(&self) -> Result<Transaction> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(FinancasError::InvalidInput("description is required".to_string()));
        }
        let amount = parse_amount(self.amount).ok_or_else(|| {
            FinancasError::InvalidInput(format!("'{}' is not a positive amount", self.amount))
        })?;
        Ok(Transaction::new(description, amount, self.kind, self.category, self.method))
    }
}

/// Accepts `12.50` and `12,50`; anything not finite and above zero is rejected.
/// With no `.` present a comma is always decimal, so `1,234` reads as 1.234.
fn parse_amount(raw: &str) -> Option<f64> {
    let s = raw.trim();
    let normalized = if s.contains(',') && !s.contains('.') {
        s.replace(',', ".")
    } else {
        s.replace(',', "")
    };
    let amount: f64 = normalized.parse().ok()?;
    (amount.is_finite() && amount > 0.0).then_some(amount)
}

pub fn run(draft: TransactionDraft) -> Result<()> {
    let transaction = draft.validate()?;
    let (settings, mut ledger) = open_ledger()?;
    let added = ledger.add(transaction)?;
    println!(
        "Added {}: {} {} ({}, {})",
        added.kind.label().to_lowercase(),
        added.description,
        money(added.amount, &settings.currency),
        added.category,
        added.payment_method.label()
    );
    println!("ID: {}", added.id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft<'a>(description: &'a str, amount: &'a str) -> TransactionDraft<'a> {
        TransactionDraft {
            description,
            amount,
            kind: TransactionType::Expense,
            category: Category::Food,
            method: PaymentMethod::CreditCard,
        }
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12.50"), Some(12.5));
        assert_eq!(parse_amount("12,50"), Some(12.5));
        assert_eq!(parse_amount("1,234.56"), Some(1234.56));
        assert_eq!(parse_amount("1,234"), Some(1.234));
        assert_eq!(parse_amount("1,234.00"), Some(1234.0));
        assert_eq!(parse_amount(" 7 "), Some(7.0));
        assert_eq!(parse_amount("0"), None);
        assert_eq!(parse_amount("-5"), None);
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("inf"), None);
        assert_eq!(parse_amount("NaN"), None);
    }

    #[test]
    fn test_validate_builds_transaction() {
        let t = draft("  Market ", "99.90").validate().unwrap();
        assert_eq!(t.description, "Market");
        assert_eq!(t.amount, 99.9);
        assert_eq!(t.payment_method, PaymentMethod::CreditCard);
    }

    #[test]
    fn test_validate_rejects_blank_description() {
        assert!(matches!(draft("   ", "10").validate(), Err(FinancasError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_rejects_bad_amount() {
        assert!(matches!(draft("Market", "-3").validate(), Err(FinancasError::InvalidInput(_))));
    }
}
