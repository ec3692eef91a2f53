use colored::Colorize;

use crate::advisor::GeminiAdvisor;
use crate::cli::open_ledger;
use crate::error::{FinancasError, Result};
use crate::models::{FinancialAdvice, HealthTier};
use crate::settings::api_key;

const WRAP: usize = 80;

fn print_advice(advice: &FinancialAdvice) {
    let score = format!("{:.0}/100", advice.health_score);
    let score = match advice.tier() {
        HealthTier::Good => score.green().bold(),
        HealthTier::Fair => score.yellow().bold(),
        HealthTier::Poor => score.red().bold(),
    };
    println!("Financial health: {score}");
    println!();
    println!("{}", textwrap::fill(&advice.summary, WRAP));

    if !advice.actionable_tips.is_empty() {
        println!();
        println!("{}", "Tips".bold());
        for (i, tip) in advice.actionable_tips.iter().enumerate() {
            let opts = textwrap::Options::new(WRAP)
                .initial_indent("")
                .subsequent_indent("   ");
            println!("{}. {}", i + 1, textwrap::fill(tip, opts));
        }
    }

    if !advice.budget_alerts.is_empty() {
        println!();
        println!("{}", "Alerts".bold());
        for alert in &advice.budget_alerts {
            let opts = textwrap::Options::new(WRAP).subsequent_indent("   ");
            println!(" {} {}", "!".yellow().bold(), textwrap::fill(alert, opts));
        }
    }
}

pub fn run() -> Result<()> {
    let (settings, ledger) = open_ledger()?;
    let advisor = GeminiAdvisor::new(
        &api_key().unwrap_or_default(),
        &settings.model,
        &settings.endpoint,
        &settings.currency,
    );

    if !ledger.is_empty() {
        println!("Analyzing {} transactions...", ledger.len());
    }
    let advice = ledger
        .request_advice(&advisor)
        .map_err(FinancasError::AdviceUnavailable)?;
    print_advice(&advice);
    Ok(())
}
