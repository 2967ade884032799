//! Data types for the analysis pipeline.

pub mod analysis;
pub mod budget;
pub mod document;
pub mod project;

pub use analysis::{AnalysisVerdict, ProposalAnalysis};
pub use budget::PromptBudget;
pub use document::DocumentReference;
pub use project::{ComparisonSummary, Project, Proposal};
