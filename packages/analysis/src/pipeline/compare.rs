//! Comparison prompt construction with three-tier character budgeting.
//!
//! Pure and deterministic given already-extracted document texts. The
//! per-document ceilings run before the global ceiling so one oversized
//! document cannot starve the budget for every other proposal.

use crate::prompts::{
    format_comparison_prompt, DOCUMENT_TRUNCATION_NOTICE, PROMPT_TRUNCATION_NOTICE,
};
use crate::types::{Project, PromptBudget, Proposal};

/// A proposal paired with its extracted (or placeholder) document text.
#[derive(Debug, Clone)]
pub struct ProposalDocument {
    pub proposal: Proposal,
    pub content: String,
}

/// Cut `text` to at most `limit` characters, appending `notice` when
/// anything was dropped. Text at or under the limit passes through
/// unmodified.
pub fn truncate_with_notice(text: &str, limit: usize, notice: &str) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(limit).collect();
    truncated.push_str(notice);
    truncated
}

/// Render the full comparison prompt for one project and its proposals.
///
/// `requirements` is the project's own requirements text, already
/// extracted; `None` when the project has no readable document.
pub fn build_comparison_prompt(
    project: &Project,
    requirements: Option<&str>,
    documents: &[ProposalDocument],
    budget: &PromptBudget,
) -> String {
    let project_block = render_project_block(project, requirements, budget);

    let proposals_block = documents
        .iter()
        .enumerate()
        .map(|(i, doc)| render_proposal_block(i + 1, doc, budget))
        .collect::<Vec<_>>()
        .join("\n\n---\n\n");

    let prompt = format_comparison_prompt(&project_block, &proposals_block);

    // Blunt final safety net against many-proposal fan-out.
    truncate_with_notice(&prompt, budget.prompt_chars, PROMPT_TRUNCATION_NOTICE)
}

fn render_project_block(
    project: &Project,
    requirements: Option<&str>,
    budget: &PromptBudget,
) -> String {
    let mut block = format!(
        "## Project: {}\nBudget: {}\nDuration: {}\nStatus: {}",
        project.title,
        format_amount(project.budget),
        format_days(project.duration),
        display_or(&project.status, "Not specified"),
    );

    if let Some(requirements) = requirements.filter(|r| !r.trim().is_empty()) {
        block.push_str("\n\n### Project Requirements Document\n");
        block.push_str(&truncate_with_notice(
            requirements,
            budget.project_chars,
            DOCUMENT_TRUNCATION_NOTICE,
        ));
    }

    block
}

fn render_proposal_block(index: usize, doc: &ProposalDocument, budget: &PromptBudget) -> String {
    let proposal = &doc.proposal;
    let features = if proposal.features.is_empty() {
        "None listed".to_string()
    } else {
        proposal.features.join(", ")
    };

    format!(
        "### Proposal {}: {}\nQuoted cost: {}\nQuoted timeline: {}\nStatus: {}\nListed features: {}\n\nDocument content:\n{}",
        index,
        proposal.display_name(),
        format_amount(proposal.total_cost),
        format_days(proposal.timeline),
        display_or(&proposal.status, "Not specified"),
        features,
        truncate_with_notice(&doc.content, budget.proposal_chars, DOCUMENT_TRUNCATION_NOTICE),
    )
}

fn format_amount(amount: Option<f64>) -> String {
    match amount {
        Some(amount) => format!("${amount}"),
        None => "Not specified".to_string(),
    }
}

fn format_days(days: Option<f64>) -> String {
    match days {
        Some(days) => format!("{days} days"),
        None => "Not specified".to_string(),
    }
}

fn display_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::CONTENT_UNAVAILABLE;

    fn project() -> Project {
        Project {
            id: "p-1".to_string(),
            title: "Customer Portal".to_string(),
            budget: Some(20_000.0),
            duration: Some(90.0),
            status: "active".to_string(),
            document_file: None,
        }
    }

    fn proposal(name: &str) -> Proposal {
        Proposal {
            id: format!("prop-{name}"),
            company_name: Some(name.to_string()),
            total_cost: Some(5_000.0),
            timeline: Some(14.0),
            features: vec!["login".to_string()],
            status: "submitted".to_string(),
            proposal_file: None,
        }
    }

    fn doc(name: &str, content: &str) -> ProposalDocument {
        ProposalDocument {
            proposal: proposal(name),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_truncate_below_limit_is_identity() {
        let text = "a".repeat(30_000);
        assert_eq!(
            truncate_with_notice(&text, 30_000, DOCUMENT_TRUNCATION_NOTICE),
            text
        );
    }

    #[test]
    fn test_truncate_boundary_one_over() {
        let text = "a".repeat(30_001);
        let truncated = truncate_with_notice(&text, 30_000, DOCUMENT_TRUNCATION_NOTICE);
        assert_eq!(
            truncated.chars().count(),
            30_000 + DOCUMENT_TRUNCATION_NOTICE.chars().count()
        );
        assert!(truncated.ends_with(DOCUMENT_TRUNCATION_NOTICE));
    }

    #[test]
    fn test_per_proposal_ceiling_applies_independently() {
        let budget = PromptBudget::default();
        let oversized = "x".repeat(40_000);
        let documents = vec![doc("Acme", &oversized), doc("Globex", "short content")];

        let prompt = build_comparison_prompt(&project(), None, &documents, &budget);

        assert!(prompt.contains(DOCUMENT_TRUNCATION_NOTICE));
        assert!(prompt.contains("short content"));
        // The second proposal's short content must not be truncated.
        assert_eq!(prompt.matches(DOCUMENT_TRUNCATION_NOTICE).count(), 1);
    }

    #[test]
    fn test_global_ceiling_boundary() {
        let budget = PromptBudget::default();
        // 10 proposals near the per-document ceiling exceed 200k combined.
        let content = "y".repeat(29_000);
        let documents: Vec<_> = (0..10)
            .map(|i| doc(&format!("Vendor{i}"), &content))
            .collect();

        let prompt = build_comparison_prompt(&project(), None, &documents, &budget);

        assert_eq!(
            prompt.chars().count(),
            budget.prompt_chars + PROMPT_TRUNCATION_NOTICE.chars().count()
        );
        assert!(prompt.ends_with(PROMPT_TRUNCATION_NOTICE));
    }

    #[test]
    fn test_project_requirements_section_present_when_extracted() {
        let budget = PromptBudget::default();
        let documents = vec![doc("Acme", "content")];

        let with_requirements = build_comparison_prompt(
            &project(),
            Some("The system must support SSO."),
            &documents,
            &budget,
        );
        let without_requirements = build_comparison_prompt(&project(), None, &documents, &budget);

        assert!(with_requirements.contains("Project Requirements Document"));
        assert!(with_requirements.contains("The system must support SSO."));
        assert!(!without_requirements.contains("Project Requirements Document"));
    }

    #[test]
    fn test_requirements_use_project_ceiling() {
        let budget = PromptBudget::default();
        let requirements = "r".repeat(60_000);
        let documents = vec![doc("Acme", "content")];

        let prompt =
            build_comparison_prompt(&project(), Some(&requirements), &documents, &budget);

        // 50k of requirements kept, the rest cut with a notice.
        assert!(prompt.contains(&"r".repeat(50_000)));
        assert!(!prompt.contains(&"r".repeat(50_001)));
        assert!(prompt.contains(DOCUMENT_TRUNCATION_NOTICE));
    }

    #[test]
    fn test_unavailable_content_placeholder_renders() {
        let budget = PromptBudget::default();
        let documents = vec![doc("Acme", CONTENT_UNAVAILABLE)];

        let prompt = build_comparison_prompt(&project(), None, &documents, &budget);
        assert!(prompt.contains(CONTENT_UNAVAILABLE));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let budget = PromptBudget::default();
        let documents = vec![doc("Acme", "content"), doc("Globex", "other")];

        let a = build_comparison_prompt(&project(), Some("reqs"), &documents, &budget);
        let b = build_comparison_prompt(&project(), Some("reqs"), &documents, &budget);
        assert_eq!(a, b);
    }
}
