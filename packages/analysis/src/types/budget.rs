//! Character budgets enforced at comparison-prompt construction time.

use serde::{Deserialize, Serialize};

/// Per-document and whole-prompt character ceilings for the comparison
/// prompt.
///
/// The defaults track the provider's context window. Independent
/// per-document ceilings keep a single oversized document from starving
/// the budget for every other proposal; the global ceiling is a blunt
/// final safety net against many-proposal fan-out.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PromptBudget {
    /// Ceiling for the project's requirements document
    pub project_chars: usize,

    /// Ceiling for each individual proposal document
    pub proposal_chars: usize,

    /// Ceiling for the fully rendered prompt
    pub prompt_chars: usize,
}

impl Default for PromptBudget {
    fn default() -> Self {
        Self {
            project_chars: 50_000,
            proposal_chars: 30_000,
            prompt_chars: 200_000,
        }
    }
}

impl PromptBudget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project_chars(mut self, chars: usize) -> Self {
        self.project_chars = chars;
        self
    }

    pub fn with_proposal_chars(mut self, chars: usize) -> Self {
        self.proposal_chars = chars;
        self
    }

    pub fn with_prompt_chars(mut self, chars: usize) -> Self {
        self.prompt_chars = chars;
        self
    }
}
