//! Narrative insights: prompt assembly and the summarization collaborator seam.
//!
//! The collaborator only ever sees an opaque text prompt. Its failure is
//! recovered here with a placeholder and never touches the ledger.

use smartspend_core::{Ledger, render_table};
use thiserror::Error;
use tracing::warn;

use crate::stats::LedgerStats;

pub const SYSTEM_PROMPT: &str = "You are a careful personal-finance analyst. \
Work only from the transaction table and figures provided. Amounts are in the statement's currency.";

pub const PLACEHOLDER: &str = "Financial insights are unavailable right now. The extracted ledger and statistics above are complete.";

/// Anything that can turn a prompt into prose (LLM client, test double)
pub trait InsightModel {
    fn complete(&self, system: &str, prompt: &str) -> anyhow::Result<String>;
}

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("summarization unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsightSource {
    Model,
    Placeholder { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insights {
    pub text: String,
    pub source: InsightSource,
}

impl Insights {
    pub fn is_placeholder(&self) -> bool {
        matches!(self.source, InsightSource::Placeholder { .. })
    }
}

/// Prompt handed to the model: table, local figures, requested headings.
pub fn build_prompt(ledger: &Ledger, stats: &LedgerStats) -> String {
    format!(
        "Analyze the following bank transaction history and generate financial insights.\n\n\
Transactions:\n{table}\n\
Computed figures:\n{figures}\n\
Provide a detailed breakdown in the following format:\n\n\
**Financial Insights**\n\n\
- **Monthly Income/Expense Summary**\n\
- **Savings Percentage**\n\
- **Top Spending Categories**\n\
- **Trends/Recommendations**\n",
        table = render_table(ledger),
        figures = stats.render(),
    )
}

/// Ask the model once. Errors and empty replies become `Unavailable`.
pub fn request_insights(model: &dyn InsightModel, prompt: &str) -> Result<String, SummaryError> {
    let reply = model
        .complete(SYSTEM_PROMPT, prompt)
        .map_err(|e| SummaryError::Unavailable(format!("{e:#}")))?;
    let reply = reply.trim();
    if reply.is_empty() {
        return Err(SummaryError::Unavailable("empty response".to_string()));
    }
    Ok(reply.to_string())
}

/// Produce insights, falling back to [`PLACEHOLDER`] when no model is
/// configured or the model fails.
pub fn generate_insights(model: Option<&dyn InsightModel>, ledger: &Ledger, stats: &LedgerStats) -> Insights {
    let Some(model) = model else {
        return placeholder("no summarization model configured".to_string());
    };

    let prompt = build_prompt(ledger, stats);
    match request_insights(model, &prompt) {
        Ok(text) => Insights {
            text,
            source: InsightSource::Model,
        },
        Err(SummaryError::Unavailable(reason)) => {
            warn!(%reason, "summarization unavailable; using placeholder");
            placeholder(reason)
        }
    }
}

fn placeholder(reason: String) -> Insights {
    Insights {
        text: PLACEHOLDER.to_string(),
        source: InsightSource::Placeholder { reason },
    }
}
