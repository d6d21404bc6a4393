//! Financial advice boundary
//!
//! The budget engine hands a list of meaningful budget lines to an
//! [`AdviceProvider`] and gets back a short analysis plus a list of
//! recommendations. Whatever the provider returns is validated against a
//! fixed shape before it reaches the user; any failure becomes
//! [`HearthError::Advisor`].

pub mod prompt;
pub mod provider;

use serde::{Deserialize, Serialize};

use crate::error::{HearthError, HearthResult};
use crate::models::BudgetLine;

pub use prompt::build_prompt;
pub use provider::{AdviceProvider, CommandProvider};

/// One budget line as sent to the advisor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdviceItem {
    pub category: String,
    pub subcategory: String,
    pub budgeted: i64,
    pub spent: i64,
    pub difference: i64,
}

impl From<&BudgetLine> for AdviceItem {
    fn from(line: &BudgetLine) -> Self {
        Self {
            category: line.key.category.clone(),
            subcategory: line.key.subcategory.clone(),
            budgeted: line.budgeted.units(),
            spent: line.spent.units(),
            difference: line.difference.units(),
        }
    }
}

/// Validated advisor answer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AdviceResponse {
    pub analysis: String,
    pub recommendations: Vec<String>,
}

impl AdviceResponse {
    /// Parse and validate raw provider output
    ///
    /// Models often wrap JSON in prose or code fences, so only the
    /// outermost `{...}` is read.
    pub fn parse(raw: &str) -> HearthResult<Self> {
        let start = raw.find('{');
        let end = raw.rfind('}');
        let json = match (start, end) {
            (Some(start), Some(end)) if start < end => &raw[start..=end],
            _ => return Err(HearthError::Advisor("response contains no JSON object".into())),
        };

        let response: AdviceResponse = serde_json::from_str(json)
            .map_err(|e| HearthError::Advisor(format!("malformed response: {}", e)))?;
        response.validate()?;
        Ok(response)
    }

    pub fn validate(&self) -> HearthResult<()> {
        if self.analysis.trim().is_empty() {
            return Err(HearthError::Advisor("response has an empty analysis".into()));
        }
        if !self.recommendations.iter().any(|r| !r.trim().is_empty()) {
            return Err(HearthError::Advisor("response has no recommendations".into()));
        }
        Ok(())
    }
}

/// Ask `provider` for advice on `lines`
///
/// Lines with neither budget nor spending are dropped first. Transport and
/// schema failures come back as errors for the caller to show.
pub fn request_advice(provider: &dyn AdviceProvider, lines: &[BudgetLine]) -> HearthResult<AdviceResponse> {
    let items: Vec<AdviceItem> = lines
        .iter()
        .filter(|line| line.is_meaningful())
        .map(AdviceItem::from)
        .collect();
    if items.is_empty() {
        return Err(HearthError::Advisor(
            "nothing to analyse: no budgets or spending this month".into(),
        ));
    }

    let prompt = build_prompt(&items)?;
    tracing::debug!(items = items.len(), "requesting advice");

    let raw = provider.complete(&prompt).map_err(|e| {
        tracing::warn!(error = %e, "advice provider failed");
        match e {
            HearthError::Advisor(_) => e,
            other => HearthError::Advisor(other.to_string()),
        }
    })?;

    AdviceResponse::parse(&raw)
}
