//! LLM prompt templates for proposal extraction and comparison.
//!
//! Templates are fixed strings with `{placeholder}` substitution; prompt
//! construction is pure and deterministic. Document truncation happens in
//! the comparison aggregator, never here.

/// Appended to a document cut to fit its per-document budget.
pub const DOCUMENT_TRUNCATION_NOTICE: &str = "\n\n[Document truncated due to length]";

/// Appended when the whole rendered prompt is cut to the global budget.
pub const PROMPT_TRUNCATION_NOTICE: &str = "\n\n[Prompt truncated to fit size limits]";

/// Placeholder content for a proposal whose document could not be read.
pub const CONTENT_UNAVAILABLE: &str = "Content not available";

/// Prompt for extracting structured fields from one proposal document.
///
/// The response validator isolates a single JSON object from the reply,
/// so the prompt insists the model emit only the object.
pub const EXTRACTION_PROMPT: &str = r#"You are analyzing a vendor proposal document for a software project.

Extract the following information and respond with ONLY a JSON object - no explanation, no markdown fences, no text before or after it:

{
  "totalCost": number,
  "timeline": number,
  "features": ["string", ...],
  "companyName": "string",
  "companyLogo": "string",
  "analysis": {
    "comparisonScore": number,
    "aiQuestions": ["string", ...],
    "aiSuggestions": ["string", ...]
  }
}

Field rules:
- totalCost: total project cost as a plain number (omit if not stated)
- timeline: project duration in days (omit if not stated)
- features: list of features or deliverables the proposal commits to
- companyName: the vendor's company name (omit if not stated)
- companyLogo: URL of the vendor's logo (omit if not stated)
- analysis.comparisonScore: your 0-100 assessment of proposal quality and completeness
- analysis.aiQuestions: clarifying questions the project owner should ask this vendor
- analysis.aiSuggestions: concrete improvements that would strengthen this proposal

Document text:
{text}"#;

/// Analytical framework for the multi-proposal comparison narrative.
pub const COMPARISON_PROMPT: &str = r#"You are an experienced procurement analyst. Compare the following vendor proposals submitted for one software project and produce a thorough narrative analysis in markdown.

{project}

{proposals}

Structure your analysis with exactly these sections:

# Proposal Comparison Analysis

## Requirements Comparison Table
A table with one row per project requirement and one column per vendor, showing how each proposal addresses it.

## Technical Capability Comparison
Depth of technical approach, architecture, and team skills demonstrated by each proposal.

## Commercial Terms Comparison
Cost, payment structure, and value for money, compared against the project budget.

## Execution Capability Comparison
Timeline realism, delivery methodology, and capacity to deliver.

## Requirements Alignment Assessment
How completely each proposal covers the project's stated requirements; call out gaps.

## Risk Assessment
Risks of selecting each vendor: technical, commercial, and delivery risks.

## Final Recommendation
A ranked recommendation of the vendors with clear justification for the ranking.

Base every judgment on the document content above. Where a proposal's content is unavailable, say so rather than inventing details."#;

/// Format the single-document extraction prompt.
///
/// Embeds `text` verbatim with no truncation at this stage.
pub fn format_extraction_prompt(text: &str) -> String {
    EXTRACTION_PROMPT.replace("{text}", text)
}

/// Format the comparison prompt from pre-rendered project and proposal
/// blocks.
pub fn format_comparison_prompt(project_block: &str, proposals_block: &str) -> String {
    COMPARISON_PROMPT
        .replace("{project}", project_block)
        .replace("{proposals}", proposals_block)
}
