use std::fmt;

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use clap::ValueEnum;
use serde::de::IntoDeserializer;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum TransactionType {
    #[serde(rename = "INCOME", alias = "income")]
    Income,
    #[serde(rename = "EXPENSE", alias = "expense")]
    Expense,
}

impl TransactionType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }
}

/// Spending/earning label. Serialized with the labels used by the web app's
/// stored documents; the English names are accepted on input.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum,
)]
pub enum Category {
    #[serde(rename = "Salário", alias = "Salary", alias = "SALARY")]
    Salary,
    #[serde(rename = "Freelance", alias = "FREELANCE")]
    Freelance,
    #[serde(rename = "Investimentos", alias = "Investment", alias = "INVESTMENT")]
    Investment,
    #[serde(rename = "Alimentação", alias = "Food", alias = "FOOD")]
    Food,
    #[serde(rename = "Moradia", alias = "Housing", alias = "HOUSING")]
    Housing,
    #[serde(rename = "Transporte", alias = "Transport", alias = "TRANSPORT")]
    Transport,
    #[serde(rename = "Lazer", alias = "Entertainment", alias = "ENTERTAINMENT")]
    Entertainment,
    #[serde(rename = "Saúde", alias = "Health", alias = "HEALTH")]
    Health,
    #[serde(rename = "Educação", alias = "Education", alias = "EDUCATION")]
    Education,
    #[serde(rename = "Compras", alias = "Shopping", alias = "SHOPPING")]
    Shopping,
    #[serde(rename = "Outros", alias = "Others", alias = "OTHERS")]
    Others,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Salary => "Salary",
            Self::Freelance => "Freelance",
            Self::Investment => "Investment",
            Self::Food => "Food",
            Self::Housing => "Housing",
            Self::Transport => "Transport",
            Self::Entertainment => "Entertainment",
            Self::Health => "Health",
            Self::Education => "Education",
            Self::Shopping => "Shopping",
            Self::Others => "Others",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum,
)]
pub enum PaymentMethod {
    #[default]
    #[serde(rename = "Dinheiro/Débito", alias = "CASH_OR_DEBIT", alias = "CASH")]
    #[value(name = "cash", alias = "debit")]
    CashOrDebit,
    #[serde(rename = "Cartão de Crédito", alias = "CREDIT_CARD")]
    #[value(name = "credit", alias = "credit-card")]
    CreditCard,
}

impl PaymentMethod {
    pub fn label(&self) -> &'static str {
        match self {
            Self::CashOrDebit => "Cash/Debit",
            Self::CreditCard => "Credit Card",
        }
    }

    /// Symbolic name sent to the advisory provider.
    pub fn code(&self) -> &'static str {
        match self {
            Self::CashOrDebit => "CASH_OR_DEBIT",
            Self::CreditCard => "CREDIT_CARD",
        }
    }
}

/// Missing, null and empty payment methods predate the field and mean cash.
fn payment_method_or_default<'de, D>(deserializer: D) -> Result<PaymentMethod, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(PaymentMethod::CashOrDebit),
        Some(s) => {
            let de: serde::de::value::StrDeserializer<D::Error> = s.into_deserializer();
            PaymentMethod::deserialize(de)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub description: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: Category,
    #[serde(default, deserialize_with = "payment_method_or_default")]
    pub payment_method: PaymentMethod,
    pub date: String,
    /// Keys this version does not know about, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Transaction {
    /// A fresh record with a new id and the current time. Income is always
    /// recorded as cash/debit.
    pub fn new(
        description: &str,
        amount: f64,
        kind: TransactionType,
        category: Category,
        payment_method: PaymentMethod,
    ) -> Self {
        let payment_method = match kind {
            TransactionType::Income => PaymentMethod::CashOrDebit,
            TransactionType::Expense => payment_method,
        };
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            description: description.to_string(),
            amount,
            kind,
            category,
            payment_method,
            date: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            extra: Map::new(),
        }
    }

    pub fn parsed_date(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.date).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialAdvice {
    pub health_score: f64,
    pub summary: String,
    pub actionable_tips: Vec<String>,
    pub budget_alerts: Vec<String>,
}

impl FinancialAdvice {
    pub fn tier(&self) -> HealthTier {
        HealthTier::from_score(self.health_score)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthTier {
    Good,
    Fair,
    Poor,
}

impl HealthTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Good
        } else if score >= 50.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_income_forces_cash() {
        let t = Transaction::new(
            "Paycheck",
            5000.0,
            TransactionType::Income,
            Category::Salary,
            PaymentMethod::CreditCard,
        );
        assert_eq!(t.payment_method, PaymentMethod::CashOrDebit);
        assert!(t.parsed_date().is_some());
        assert!(!t.id.is_empty());
    }

    #[test]
    fn test_expense_keeps_method() {
        let t = Transaction::new(
            "Groceries",
            120.0,
            TransactionType::Expense,
            Category::Food,
            PaymentMethod::CreditCard,
        );
        assert_eq!(t.payment_method, PaymentMethod::CreditCard);
    }

    #[test]
    fn test_new_ids_are_unique() {
        let new = |d: &str| {
            Transaction::new(
                d,
                1.0,
                TransactionType::Expense,
                Category::Others,
                PaymentMethod::CashOrDebit,
            )
        };
        assert_ne!(new("a").id, new("b").id);
    }

    #[test]
    fn test_reads_web_app_record() {
        let json = r#"{
            "id": "abc",
            "description": "Mercado",
            "amount": 450.5,
            "type": "EXPENSE",
            "category": "Alimentação",
            "paymentMethod": "Cartão de Crédito",
            "date": "2025-03-10T15:00:00.000Z"
        }"#;
        let t: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(t.kind, TransactionType::Expense);
        assert_eq!(t.category, Category::Food);
        assert_eq!(t.payment_method, PaymentMethod::CreditCard);
        assert!(t.extra.is_empty());
    }

    #[test]
    fn test_missing_payment_method_defaults_to_cash() {
        let json = r#"{"id":"1","description":"x","amount":5,"type":"EXPENSE","category":"Lazer","date":"2025-01-01T00:00:00Z"}"#;
        let t: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(t.payment_method, PaymentMethod::CashOrDebit);
        assert_eq!(t.amount, 5.0);
    }

    #[test]
    fn test_empty_and_null_payment_method_default_to_cash() {
        for raw in [r#""""#, "null"] {
            let json = format!(
                r#"{{"id":"1","description":"x","amount":5,"type":"EXPENSE","category":"Lazer","paymentMethod":{raw},"date":"2025-01-01T00:00:00Z"}}"#
            );
            let t: Transaction = serde_json::from_str(&json).unwrap();
            assert_eq!(t.payment_method, PaymentMethod::CashOrDebit);
        }
    }

    #[test]
    fn test_symbolic_and_english_aliases() {
        let json = r#"{"id":"1","description":"x","amount":5,"type":"EXPENSE","category":"Housing","paymentMethod":"CREDIT_CARD","date":"2025-01-01T00:00:00Z"}"#;
        let t: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(t.category, Category::Housing);
        assert_eq!(t.payment_method, PaymentMethod::CreditCard);
    }

    #[test]
    fn test_serializes_with_web_app_labels() {
        let mut t = Transaction::new(
            "Rent",
            1800.0,
            TransactionType::Expense,
            Category::Housing,
            PaymentMethod::CashOrDebit,
        );
        t.id = "r1".to_string();
        let value = serde_json::to_value(&t).unwrap();
        assert_eq!(value["type"], "EXPENSE");
        assert_eq!(value["category"], "Moradia");
        assert_eq!(value["paymentMethod"], "Dinheiro/Débito");
    }

    #[test]
    fn test_unknown_fields_round_trip() {
        let json = r#"{"id":"1","description":"x","amount":5,"type":"INCOME","category":"Freelance","date":"2025-01-01T00:00:00Z","note":"kept"}"#;
        let t: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(t.extra.get("note"), Some(&Value::from("kept")));
        let back = serde_json::to_value(&t).unwrap();
        assert_eq!(back["note"], "kept");
    }

    #[test]
    fn test_health_tiers() {
        assert_eq!(HealthTier::from_score(80.0), HealthTier::Good);
        assert_eq!(HealthTier::from_score(79.9), HealthTier::Fair);
        assert_eq!(HealthTier::from_score(50.0), HealthTier::Fair);
        assert_eq!(HealthTier::from_score(49.0), HealthTier::Poor);
    }

    #[test]
    fn test_advice_requires_all_fields() {
        let json = r#"{"healthScore": 70, "summary": "ok", "actionableTips": []}"#;
        assert!(serde_json::from_str::<FinancialAdvice>(json).is_err());
    }
}
