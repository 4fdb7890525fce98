use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ats::{AtsEngine, EngineConfig, OptimizeFailure};

#[derive(Parser)]
#[command(name = "ats", version, about = "Score and optimize resumes against job descriptions")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the match score of a resume against a job description
    Score(DocumentArgs),
    /// Print an ATS-optimized rewrite of the resume for the job description
    Optimize(DocumentArgs),
}

#[derive(Args)]
struct DocumentArgs {
    /// Plain-text resume file
    #[arg(long)]
    resume: PathBuf,
    /// Plain-text job description file
    #[arg(long)]
    job: PathBuf,
}

impl DocumentArgs {
    fn read(&self) -> Result<(String, String)> {
        let resume = std::fs::read_to_string(&self.resume)
            .with_context(|| format!("reading resume {}", self.resume.display()))?;
        let job = std::fs::read_to_string(&self.job)
            .with_context(|| format!("reading job description {}", self.job.display()))?;
        Ok((resume, job))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (fails on missing required env vars)
    let config = EngineConfig::from_env()?;

    // Logs go to stderr so stdout stays pure JSON
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting ATS engine v{} (model: {})", env!("CARGO_PKG_VERSION"), config.model);
    let engine = AtsEngine::from_config(&config)?;

    match cli.command {
        Command::Score(args) => {
            let (resume, job) = args.read()?;
            let result = engine.score(&resume, &job).await;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Optimize(args) => {
            let (resume, job) = args.read()?;
            match engine.optimize(&resume, &job).await {
                Ok(optimized) => println!("{}", serde_json::to_string_pretty(&optimized)?),
                Err(e) => {
                    println!("{}", serde_json::to_string_pretty(&OptimizeFailure::from(&e))?);
                    bail!("optimization failed: {e}");
                }
            }
        }
    }

    Ok(())
}
