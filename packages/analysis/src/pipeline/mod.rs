//! Pipeline orchestration and comparison prompt assembly.

pub mod analyze;
pub mod compare;

pub use analyze::Analyzer;
pub use compare::{build_comparison_prompt, truncate_with_notice, ProposalDocument};
