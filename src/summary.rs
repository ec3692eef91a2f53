use std::collections::HashMap;

use chrono::{DateTime, Datelike, Local};

use crate::models::{Category, PaymentMethod, Transaction, TransactionType};

// ---------------------------------------------------------------------------
// Totals
// ---------------------------------------------------------------------------

pub fn total_by_type(transactions: &[Transaction], kind: TransactionType) -> f64 {
    transactions
        .iter()
        .filter(|t| t.kind == kind)
        .map(|t| t.amount)
        .sum()
}

pub fn balance(transactions: &[Transaction]) -> f64 {
    total_by_type(transactions, TransactionType::Income)
        - total_by_type(transactions, TransactionType::Expense)
}

/// Credit card spending in the calendar month of `reference`, in local time.
/// Records with an unreadable date are left out.
pub fn monthly_credit_card_total(
    transactions: &[Transaction],
    reference: &DateTime<Local>,
) -> f64 {
    transactions
        .iter()
        .filter(|t| {
            t.kind == TransactionType::Expense && t.payment_method == PaymentMethod::CreditCard
        })
        .filter(|t| match t.parsed_date() {
            Some(d) => {
                let local = d.with_timezone(&Local);
                local.year() == reference.year() && local.month() == reference.month()
            }
            None => false,
        })
        .map(|t| t.amount)
        .sum()
}

pub struct Summary {
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
    pub monthly_credit_card: f64,
}

impl Summary {
    pub fn compute(transactions: &[Transaction], reference: &DateTime<Local>) -> Self {
        Self {
            income: total_by_type(transactions, TransactionType::Income),
            expenses: total_by_type(transactions, TransactionType::Expense),
            balance: balance(transactions),
            monthly_credit_card: monthly_credit_card_total(transactions, reference),
        }
    }
}

// ---------------------------------------------------------------------------
// Category breakdown
// ---------------------------------------------------------------------------

pub fn expense_by_category(transactions: &[Transaction]) -> HashMap<Category, f64> {
    let mut totals = HashMap::new();
    for t in transactions.iter().filter(|t| t.kind == TransactionType::Expense) {
        *totals.entry(t.category).or_insert(0.0) += t.amount;
    }
    totals
}

pub struct CategoryShare {
    pub category: Category,
    pub total: f64,
    pub pct: f64,
}

/// Expense totals per category, largest first.
pub fn category_breakdown(transactions: &[Transaction]) -> Vec<CategoryShare> {
    let totals = expense_by_category(transactions);
    let grand: f64 = totals.values().sum();
    let mut shares: Vec<CategoryShare> = totals
        .into_iter()
        .map(|(category, total)| CategoryShare {
            category,
            total,
            pct: if grand != 0.0 { total / grand * 100.0 } else { 0.0 },
        })
        .collect();
    shares.sort_by(|a, b| b.total.total_cmp(&a.total).then(a.category.cmp(&b.category)));
    shares
}

// ---------------------------------------------------------------------------
// Display order
// ---------------------------------------------------------------------------

/// Newest first. Unreadable dates go to the end.
pub fn sorted_by_date_desc(transactions: &[Transaction]) -> Vec<&Transaction> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by_cached_key(|t| std::cmp::Reverse(t.parsed_date()));
    sorted
}
