//! Prompt template for the advisor

use super::AdviceItem;
use crate::error::{HearthError, HearthResult};

const INSTRUCTIONS: &str = "You are a household finance advisor. Below is this month's budget \
as a JSON array. Amounts are whole currency units; difference is budgeted minus spent, so a \
negative difference means overspending.";

const RESPONSE_SHAPE: &str = "Reply with a single JSON object and nothing else, shaped exactly \
like {\"analysis\": \"<short paragraph>\", \"recommendations\": [\"<action>\", ...]}.";

/// Render the advice prompt for `items`
pub fn build_prompt(items: &[AdviceItem]) -> HearthResult<String> {
    let data = serde_json::to_string_pretty(items)
        .map_err(|e| HearthError::Advisor(format!("failed to encode budget lines: {}", e)))?;
    Ok(format!("{}\n\n{}\n\n{}\n", INSTRUCTIONS, data, RESPONSE_SHAPE))
}
