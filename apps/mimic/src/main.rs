mod config;
mod errors;
mod generation;
mod llm_client;
mod session;
mod shell;
mod timeline;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::errors::MimicError;
use crate::generation::prompts::TONE_RUBRIC;
use crate::llm_client::{GenerationProfiles, LlmClient};
use crate::session::{Pipeline, SessionRequest, DEFAULT_ROUNDS};
use crate::shell::{Console, ShellOptions};
use crate::timeline::{FetchWindow, TwitterApi};

/// Writes new posts in the style of an existing account.
#[derive(Parser, Debug)]
#[command(name = "mimic", version, about, long_about = None)]
struct Cli {
    /// Print every intermediate artifact (posts, tone, subjects, drafts)
    #[arg(long)]
    verbose: bool,

    /// Pause for Enter after each verbose block (implies --verbose)
    #[arg(long)]
    slow: bool,

    /// Print each session as a JSON document instead of text
    #[arg(long, conflicts_with_all = ["verbose", "slow"])]
    json: bool,

    /// Run a single session for this handle instead of prompting
    #[arg(long)]
    handle: Option<String>,

    /// Posts to generate per session
    #[arg(long, default_value_t = DEFAULT_ROUNDS as u32, value_parser = clap::value_parser!(u32).range(1..))]
    rounds: u32,

    /// Recent posts to request from the source
    #[arg(long, default_value_t = 70)]
    pull_count: u32,

    /// Lines of post text to keep as style examples
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..))]
    return_count: u32,

    /// File holding a custom tone rubric
    #[arg(long)]
    rubric: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env();

    // Logs go to stderr; stdout carries only generated output.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting mimic v{}", env!("CARGO_PKG_VERSION"));
    config.warn_missing_credentials();

    let rubric = match &cli.rubric {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read rubric file {}", path.display()))?,
        None => TONE_RUBRIC.to_string(),
    };

    let timeline = TwitterApi::new(config.twitter_bearer_token.clone(), &config.timeline_api_base);
    let llm = LlmClient::new(config.openai_api_key.clone(), &config.llm_api_base);
    let profiles = GenerationProfiles::for_model(&config.llm_model);
    info!("LLM client initialized (model: {})", config.llm_model);

    let pipeline = Pipeline {
        timeline: &timeline,
        llm: &llm,
        profiles: &profiles,
        window: FetchWindow {
            pull_count: cli.pull_count,
            return_count: cli.return_count as usize,
        },
        rubric: &rubric,
    };

    let options = ShellOptions {
        verbose: cli.verbose || cli.slow,
        slow: cli.slow,
        json: cli.json,
    };
    let mut console = Console::new(std::io::stdin().lock(), std::io::stdout(), options);
    let rounds = cli.rounds as usize;

    let outcome = match cli.handle {
        Some(handle) => {
            let request = SessionRequest::new(handle).with_rounds(rounds);
            shell::run_once(&pipeline, &request, &mut console)
                .await
                .map(|_| ())
        }
        None => shell::run_interactive(&pipeline, rounds, &mut console)
            .await
            .map(|sessions| info!("Completed {} sessions", sessions)),
    };

    outcome.map_err(session_failure)
}

fn session_failure(err: MimicError) -> anyhow::Error {
    if let Some(status) = err.status() {
        error!("Upstream API answered with HTTP {}", status);
    }
    anyhow::Error::new(err).context("Session failed")
}
