//! Project and proposal records as the persistence layer hands them to
//! the pipeline, plus the comparison output.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A project owned by the comparing user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Persistence-layer identifier
    #[serde(default, alias = "_id")]
    pub id: String,

    pub title: String,

    /// Budget in the project's currency, if set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,

    /// Expected duration in days, if set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,

    #[serde(default)]
    pub status: String,

    /// Reference to the project's requirements document, if uploaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_file: Option<String>,
}

/// A vendor proposal attached to a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    /// Persistence-layer identifier
    #[serde(default, alias = "_id")]
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<f64>,

    /// Timeline in days, if stated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<f64>,

    #[serde(default)]
    pub features: Vec<String>,

    #[serde(default)]
    pub status: String,

    /// Reference to the uploaded proposal document, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposal_file: Option<String>,
}

impl Proposal {
    /// Display name used in prompts and logs.
    pub fn display_name(&self) -> &str {
        self.company_name.as_deref().unwrap_or("Unknown vendor")
    }
}

/// Narrative comparison of all proposals for one project.
///
/// The narrative is opaque prose; the pipeline never parses its own
/// aggregate output. Regenerable at any time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSummary {
    pub project_id: String,
    pub proposal_count: usize,
    pub generated_at: DateTime<Utc>,
    pub narrative: String,
}
