//! Response validation: locate JSON in a free-form completion and
//! normalize it into [`ProposalAnalysis`].
//!
//! The upstream model is untrusted with respect to schema adherence, so
//! every field degrades gracefully instead of propagating absent or
//! mistyped values into persistence.

use serde_json::Value;

use crate::error::{AnalysisError, Result};
use crate::types::{AnalysisVerdict, ProposalAnalysis};

/// Locate the outermost JSON object in free-form text: from the first `{`
/// to the last `}`.
///
/// Deliberately a heuristic, isolated here so it can be swapped for a
/// strict provider JSON mode without touching the normalization below.
pub fn isolate_json_object(completion: &str) -> Option<&str> {
    let start = completion.find('{')?;
    let end = completion.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&completion[start..=end])
}

/// Parse a completion into a [`ProposalAnalysis`].
///
/// Fails with [`AnalysisError::MalformedResponse`] when no JSON object can
/// be located or the located object does not parse. Individual fields
/// never fail: anything absent or mistyped gets its safe default.
pub fn parse_proposal_analysis(completion: &str) -> Result<ProposalAnalysis> {
    let json = isolate_json_object(completion).ok_or(AnalysisError::MalformedResponse)?;
    let value: Value = serde_json::from_str(json).map_err(|_| AnalysisError::MalformedResponse)?;
    Ok(normalize(&value))
}

/// Map any JSON value to an always-valid analysis struct.
fn normalize(value: &Value) -> ProposalAnalysis {
    let verdict = &value["analysis"];

    ProposalAnalysis {
        total_cost: truthy_number(&value["totalCost"]),
        timeline: truthy_number(&value["timeline"]),
        features: string_array(&value["features"]),
        company_name: non_empty_string(&value["companyName"]),
        company_logo: non_empty_string(&value["companyLogo"]),
        analysis: AnalysisVerdict {
            comparison_score: verdict["comparisonScore"].as_f64().unwrap_or(0.0),
            ai_questions: string_array(&verdict["aiQuestions"]),
            ai_suggestions: string_array(&verdict["aiSuggestions"]),
        },
    }
}

/// Numbers pass through only when present and truthy (nonzero).
fn truthy_number(value: &Value) -> Option<f64> {
    value.as_f64().filter(|n| *n != 0.0)
}

/// Strings pass through trimmed; blank or non-string values are absent.
fn non_empty_string(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Arrays pass through with scalar items stringified; anything that is
/// not an array becomes the empty list.
fn string_array(value: &Value) -> Vec<String> {
    match value.as_array() {
        Some(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                _ => None,
            })
            .collect(),
        None => Vec::new(),
    }
}
