//! Document-Grounded Proposal Analysis
//!
//! The AI pipeline behind DevProposals: normalizes heterogeneous uploaded
//! documents (PDF/Office/text, local or URL-hosted) into plain text,
//! builds bounded deterministic prompts for a remote LLM, validates the
//! model's semi-structured JSON into the application's data model, and
//! aggregates competing proposals into one budgeted comparison prompt.
//!
//! # Design Philosophy
//!
//! - The model is untrusted: every response field degrades to a safe
//!   default instead of failing proposal creation.
//! - Enrichment is best-effort, comparison is not: a failed extraction
//!   never blocks a proposal, but a failed narrative call surfaces,
//!   because prose has no safe empty default.
//! - Budgets are layered: per-document ceilings run before the global
//!   prompt ceiling so no single document starves the others.
//!
//! # Usage
//!
//! ```rust,ignore
//! use proposal_analysis::{Analyzer, Extractor, OpenRouterClient};
//! use proposal_analysis::types::DocumentReference;
//!
//! let client = OpenRouterClient::from_env()?;
//! let model = client.model().to_string();
//! let analyzer = Analyzer::new(Extractor::new(), client, model);
//!
//! // Best-effort: always yields an analysis, degraded on failure.
//! let analysis = analyzer
//!     .analyze_proposal(&DocumentReference::parse("uploads/proposal.pdf"))
//!     .await;
//! ```
//!
//! # Modules
//!
//! - [`extract`] - Text extraction from local and remote documents
//! - [`prompts`] - Fixed prompt templates
//! - [`inference`] - The LLM provider seam and the OpenRouter client
//! - [`parse`] - Response validation and normalization
//! - [`pipeline`] - Orchestration and comparison prompt budgeting
//! - [`testing`] - Mock inference provider for tests

pub mod credentials;
pub mod error;
pub mod extract;
pub mod inference;
pub mod parse;
pub mod pipeline;
pub mod prompts;
pub mod testing;
pub mod types;

// Re-export core types at crate root
pub use credentials::{InferenceCredentials, SecretString, DEFAULT_MODEL};
pub use error::{AnalysisError, ExtractError, InferenceError};
pub use extract::{cleanup, read_plain_text, Extractor};
pub use inference::{CompletionOptions, Inference, OpenRouterClient};
pub use parse::{isolate_json_object, parse_proposal_analysis};
pub use pipeline::{build_comparison_prompt, truncate_with_notice, Analyzer, ProposalDocument};
pub use types::{
    AnalysisVerdict, ComparisonSummary, DocumentReference, Project, PromptBudget, Proposal,
    ProposalAnalysis,
};

// Re-export testing utilities
pub use testing::MockInference;
