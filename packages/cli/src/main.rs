//! DevProposals command-line frontend.
//!
//! Drives the analysis pipeline from the shell: extract text from a
//! document, analyze a single proposal, or generate the comparison
//! narrative for a project and its proposals.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use proposal_analysis::{
    Analyzer, DocumentReference, Extractor, OpenRouterClient, Project, PromptBudget, Proposal,
};

#[derive(Parser)]
#[command(name = "devproposals", about = "Document-grounded proposal analysis", version)]
struct Cli {
    /// Directory relative document paths resolve against
    #[arg(long, global = true, default_value = "uploads")]
    uploads_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract plain text from a document (local path or URL)
    Extract {
        /// Document path or http(s) URL
        document: String,
    },

    /// Analyze one proposal document into structured JSON
    Analyze {
        /// Document path or http(s) URL
        document: String,

        /// Override the inference model
        #[arg(long, env = "OPENROUTER_MODEL")]
        model: Option<String>,
    },

    /// Generate the comparison narrative for a project's proposals
    Compare {
        /// Project record (JSON file)
        #[arg(long)]
        project: PathBuf,

        /// Proposal records (JSON files), at least one
        proposals: Vec<PathBuf>,

        /// Override the inference model
        #[arg(long, env = "OPENROUTER_MODEL")]
        model: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();
    let extractor = Extractor::new().with_uploads_dir(&cli.uploads_dir);

    match cli.command {
        Command::Extract { document } => {
            let text = extractor
                .extract(&DocumentReference::parse(&document))
                .await
                .with_context(|| format!("failed to extract {document}"))?;
            if text.is_empty() {
                eprintln!("{}", "document contained no extractable text".yellow());
            }
            println!("{text}");
        }

        Command::Analyze { document, model } => {
            let analyzer = build_analyzer(extractor, model)?;
            let analysis = analyzer
                .analyze_proposal(&DocumentReference::parse(&document))
                .await;
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        }

        Command::Compare {
            project,
            proposals,
            model,
        } => {
            if proposals.is_empty() {
                bail!("at least one proposal file is required for a comparison");
            }

            let project: Project = read_json(&project)?;
            let proposals: Vec<Proposal> = proposals
                .iter()
                .map(|path| read_json(path))
                .collect::<Result<_>>()?;

            let analyzer =
                build_analyzer(extractor, model)?.with_budget(PromptBudget::default());
            let summary = analyzer
                .generate_comparison_summary(&project, &proposals)
                .await
                .context("comparison generation failed")?;

            eprintln!(
                "{} {} proposals for project {}",
                "compared".green().bold(),
                summary.proposal_count,
                summary.project_id.cyan()
            );
            println!("{}", summary.narrative);
        }
    }

    Ok(())
}

fn build_analyzer(
    extractor: Extractor,
    model: Option<String>,
) -> Result<Analyzer<OpenRouterClient>> {
    let mut client = OpenRouterClient::from_env()
        .context("inference credentials not configured; set OPENROUTER_API_KEY")?;
    if let Some(model) = model {
        client = client.with_model(model);
    }
    let model = client.model().to_string();
    Ok(Analyzer::new(extractor, client, model))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &PathBuf) -> Result<T> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("invalid JSON in {}", path.display()))
}
