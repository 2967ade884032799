//! Pipeline orchestration: single-proposal analysis and project-level
//! comparison.

use chrono::Utc;
use tracing::{info, warn};

use crate::error::Result;
use crate::extract::Extractor;
use crate::inference::{CompletionOptions, Inference};
use crate::parse::parse_proposal_analysis;
use crate::pipeline::compare::{build_comparison_prompt, ProposalDocument};
use crate::prompts::{format_extraction_prompt, CONTENT_UNAVAILABLE};
use crate::types::{
    ComparisonSummary, DocumentReference, Project, PromptBudget, Proposal, ProposalAnalysis,
};

/// Orchestrates extraction, prompting, inference, and validation.
///
/// Generic over the [`Inference`] provider so tests and alternate
/// deployments can swap it out.
pub struct Analyzer<I: Inference> {
    extractor: Extractor,
    inference: I,
    model: String,
    budget: PromptBudget,
}

impl<I: Inference> Analyzer<I> {
    pub fn new(extractor: Extractor, inference: I, model: impl Into<String>) -> Self {
        Self {
            extractor,
            inference,
            model: model.into(),
            budget: PromptBudget::default(),
        }
    }

    /// Override the comparison prompt budgets.
    pub fn with_budget(mut self, budget: PromptBudget) -> Self {
        self.budget = budget;
        self
    }

    /// Analyze one proposal document into structured fields.
    ///
    /// Enrichment is best-effort, not transactional: any failure in
    /// extraction, inference, or validation degrades to the all-defaults
    /// analysis so proposal creation never visibly fails on AI issues.
    pub async fn analyze_proposal(&self, reference: &DocumentReference) -> ProposalAnalysis {
        match self.try_analyze(reference).await {
            Ok(analysis) => analysis,
            Err(error) => {
                warn!(
                    error = %error,
                    reference = %reference.describe(),
                    analysis_degraded = true,
                    "AI enrichment failed, storing default analysis"
                );
                ProposalAnalysis::degraded()
            }
        }
    }

    async fn try_analyze(&self, reference: &DocumentReference) -> Result<ProposalAnalysis> {
        let text = self.extractor.extract(reference).await?;
        let prompt = format_extraction_prompt(&text);
        let completion = self
            .inference
            .complete(&prompt, &CompletionOptions::extraction(self.model.as_str()))
            .await?;
        parse_proposal_analysis(&completion)
    }

    /// Generate the narrative comparison of all proposals for a project.
    ///
    /// Precondition: `proposals` is non-empty; the route handler rejects
    /// empty sets before calling in.
    ///
    /// Per-document extraction failures are isolated: an unreadable
    /// requirements document leaves the project section empty, and an
    /// unreadable proposal document gets a placeholder, without blocking
    /// the comparison of the others. A failed inference call propagates:
    /// there is no meaningful narrative to substitute.
    pub async fn generate_comparison_summary(
        &self,
        project: &Project,
        proposals: &[Proposal],
    ) -> Result<ComparisonSummary> {
        let requirements = self.extract_requirements(project).await;

        let mut documents = Vec::with_capacity(proposals.len());
        for proposal in proposals {
            let content = self.extract_proposal_content(proposal).await;
            documents.push(ProposalDocument {
                proposal: proposal.clone(),
                content,
            });
        }

        let prompt =
            build_comparison_prompt(project, requirements.as_deref(), &documents, &self.budget);

        info!(
            project_id = %project.id,
            proposal_count = proposals.len(),
            prompt_chars = prompt.chars().count(),
            "requesting comparison narrative"
        );

        let narrative = self
            .inference
            .complete(&prompt, &CompletionOptions::comparison(self.model.as_str()))
            .await?;

        Ok(ComparisonSummary {
            project_id: project.id.clone(),
            proposal_count: proposals.len(),
            generated_at: Utc::now(),
            narrative,
        })
    }

    async fn extract_requirements(&self, project: &Project) -> Option<String> {
        let file = project.document_file.as_deref()?;
        match self.extractor.extract(&DocumentReference::parse(file)).await {
            Ok(text) => Some(text),
            Err(error) => {
                warn!(
                    error = %error,
                    project_id = %project.id,
                    "could not read project requirements document, continuing without it"
                );
                None
            }
        }
    }

    async fn extract_proposal_content(&self, proposal: &Proposal) -> String {
        let Some(file) = proposal.proposal_file.as_deref() else {
            return CONTENT_UNAVAILABLE.to_string();
        };

        match self.extractor.extract(&DocumentReference::parse(file)).await {
            // Empty text is passed through, only failures get the placeholder.
            Ok(text) => text,
            Err(error) => {
                warn!(
                    error = %error,
                    proposal_id = %proposal.id,
                    "could not read proposal document, using placeholder"
                );
                CONTENT_UNAVAILABLE.to_string()
            }
        }
    }
}
