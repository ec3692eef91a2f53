//! AI-generated financial health reports.
//!
//! The [`Advisor`] trait is the seam between the ledger and the remote model.
//! [`GeminiAdvisor`] talks to the Gemini `generateContent` endpoint and asks
//! for a JSON response constrained to the [`FinancialAdvice`] shape.

use std::time::Duration;

use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::models::{Category, FinancialAdvice, Transaction, TransactionType};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Error, Debug)]
pub enum AdviceError {
    #[error("add at least one transaction before requesting an analysis")]
    EmptyCollection,

    #[error("no API key configured (set GEMINI_API_KEY)")]
    MissingCredential,

    #[error("request failed: {0}")]
    Request(String),

    #[error("could not read the analysis: {0}")]
    Malformed(String),
}

/// Produces a health report for a transaction collection.
///
/// Calls are independent round trips and need not return the same report for
/// the same input.
pub trait Advisor {
    fn analyze(&self, transactions: &[Transaction]) -> Result<FinancialAdvice, AdviceError>;
}

/// Reduced record sent to the model.
#[derive(Debug, Serialize)]
pub struct AdviceRecord<'a> {
    pub date: &'a str,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: Category,
    pub amount: f64,
    pub method: &'static str,
    pub desc: &'a str,
}

impl<'a> From<&'a Transaction> for AdviceRecord<'a> {
    fn from(t: &'a Transaction) -> Self {
        Self {
            date: &t.date,
            kind: t.kind,
            category: t.category,
            amount: t.amount,
            method: t.payment_method.code(),
            desc: &t.description,
        }
    }
}

pub fn build_prompt(transactions: &[Transaction], currency: &str) -> Result<String, AdviceError> {
    let records: Vec<AdviceRecord> = transactions.iter().map(AdviceRecord::from).collect();
    let data = serde_json::to_string(&records).map_err(|e| AdviceError::Request(e.to_string()))?;
    Ok(format!(
        "Analyze the following personal finance transactions and produce a financial health report.\n\
         Amounts are in {currency}.\n\
         Pay special attention to credit card usage (method: CREDIT_CARD) versus cash/debit.\n\
         \n\
         Data:\n\
         {data}\n"
    ))
}

/// Body for `generateContent` with the response constrained to the four
/// advice fields.
pub fn request_body(prompt: &str) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "healthScore": {
                        "type": "NUMBER",
                        "description": "A score from 0 to 100 rating overall financial health."
                    },
                    "summary": {
                        "type": "STRING",
                        "description": "A concise executive summary of the current situation, mentioning credit usage where relevant (at most 2 paragraphs)."
                    },
                    "actionableTips": {
                        "type": "ARRAY",
                        "items": { "type": "STRING" },
                        "description": "3 to 5 practical, specific tips based on the spending."
                    },
                    "budgetAlerts": {
                        "type": "ARRAY",
                        "items": { "type": "STRING" },
                        "description": "Alerts about categories or excessive credit usage."
                    }
                },
                "required": ["healthScore", "summary", "actionableTips", "budgetAlerts"]
            }
        }
    })
}

/// Pull the generated text out of a `generateContent` response.
pub fn extract_text(response: &Value) -> Result<String, AdviceError> {
    let parts = response
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)
        .ok_or_else(|| AdviceError::Malformed("response has no candidates".to_string()))?;
    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(Value::as_str))
        .collect();
    if text.trim().is_empty() {
        return Err(AdviceError::Malformed("response text is empty".to_string()));
    }
    Ok(text)
}

pub fn parse_advice(text: &str) -> Result<FinancialAdvice, AdviceError> {
    let advice: FinancialAdvice =
        serde_json::from_str(text.trim()).map_err(|e| AdviceError::Malformed(e.to_string()))?;
    if !advice.health_score.is_finite() {
        return Err(AdviceError::Malformed("healthScore is not a number".to_string()));
    }
    Ok(advice)
}

pub struct GeminiAdvisor {
    api_key: String,
    model: String,
    endpoint: String,
    currency: String,
    agent: ureq::Agent,
}

impl GeminiAdvisor {
    pub fn new(api_key: &str, model: &str, endpoint: &str, currency: &str) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build();
        Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            currency: currency.to_string(),
            agent,
        }
    }

    fn url(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.endpoint, self.model)
    }
}

impl Advisor for GeminiAdvisor {
    fn analyze(&self, transactions: &[Transaction]) -> Result<FinancialAdvice, AdviceError> {
        if transactions.is_empty() {
            return Err(AdviceError::EmptyCollection);
        }
        if self.api_key.is_empty() {
            return Err(AdviceError::MissingCredential);
        }
        let body = request_body(&build_prompt(transactions, &self.currency)?);

        tracing::debug!(model = %self.model, count = transactions.len(), "requesting analysis");
        let response = self
            .agent
            .post(&self.url())
            .set("x-goog-api-key", &self.api_key)
            .send_json(body)
            .map_err(|e| match e {
                ureq::Error::Status(code, resp) => {
                    let detail = resp.into_string().unwrap_or_default();
                    AdviceError::Request(format!("HTTP {code}: {}", detail.trim()))
                }
                ureq::Error::Transport(t) => AdviceError::Request(t.to_string()),
            })?;
        let value: Value = response
            .into_json()
            .map_err(|e| AdviceError::Malformed(e.to_string()))?;

        parse_advice(&extract_text(&value)?)
    }
}

/// Identifies one advice request issued through an [`AdviceSlot`].
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Holds the advice on display. Only the most recently issued request may
/// fill it; answers to older requests are dropped.
///
/// For hosts that can have several analyses in flight. The CLI runs one
/// request per process and calls [`Ledger::request_advice`] directly.
///
/// [`Ledger::request_advice`]: crate::ledger::Ledger::request_advice
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct AdviceSlot {
    issued: u64,
    current: Option<Result<FinancialAdvice, AdviceError>>,
}

#[allow(dead_code)]
impl AdviceSlot {
    pub fn begin(&mut self) -> RequestToken {
        self.issued += 1;
        self.current = None;
        RequestToken(self.issued)
    }

    /// Record the outcome of `token`'s request. Returns false when a newer
    /// request has been issued since.
    pub fn resolve(
        &mut self,
        token: RequestToken,
        outcome: Result<FinancialAdvice, AdviceError>,
    ) -> bool {
        if token.0 != self.issued {
            tracing::debug!(stale = token.0, latest = self.issued, "dropping stale analysis");
            return false;
        }
        self.current = Some(outcome);
        true
    }

    pub fn take(&mut self) -> Option<Result<FinancialAdvice, AdviceError>> {
        self.current.take()
    }
}
