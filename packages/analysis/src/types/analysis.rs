//! Structured result of single-document extraction.

use serde::{Deserialize, Serialize};

/// Structured fields extracted from a single proposal document.
///
/// After normalization the three list fields are always arrays (never
/// absent), and `analysis.comparison_score` defaults to 0. Optional scalar
/// fields stay `None` when the model omitted them or returned something
/// that is not usable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalAnalysis {
    /// Total project cost, if stated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<f64>,

    /// Timeline in days, if stated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<f64>,

    /// Features or deliverables listed in the proposal
    #[serde(default)]
    pub features: Vec<String>,

    /// Vendor company name, if stated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,

    /// Vendor logo URL, if stated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_logo: Option<String>,

    /// Evaluative sub-object produced by the model
    #[serde(default)]
    pub analysis: AnalysisVerdict,
}

/// The model's evaluative verdict on a proposal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisVerdict {
    /// Score from 0 to 100; 0 when the model gave none
    #[serde(default)]
    pub comparison_score: f64,

    /// Clarifying questions worth asking the vendor
    #[serde(default)]
    pub ai_questions: Vec<String>,

    /// Suggested improvements to the proposal
    #[serde(default)]
    pub ai_suggestions: Vec<String>,
}

impl ProposalAnalysis {
    /// The all-defaults analysis substituted when AI enrichment fails.
    ///
    /// Proposal creation must succeed even when enrichment does not, so
    /// every failure degrades to this value rather than surfacing.
    pub fn degraded() -> Self {
        Self::default()
    }
}
