///
/// This module implements the CLI interface for crev: command parsing, config
/// merging and the user-visible output of each subcommand.
///
/// All pipeline logic (walking, filtering, loading, rendering, reviewing) lives
/// in the [`crev-core`] crate. This module is glue only.
///
/// ## Subcommands
/// - `bundle`: write the project bundle to `crev-project.txt`
/// - `review`: send `crev-project.txt` off for review, save `crev-review.md`
/// - `init`: write a default `.crev-config.yaml`
///
/// For programmatic/integration use: call [`run`] with a constructed [`Cli`].
///
/// [`crev-core`]: ../../crev-core/
use crate::load_config::{
    bundle_config, load_config_or_default, resolve_api_key, write_default_config, BundleFlags,
    CliConfig,
};
use crate::review_client::ReviewClient;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crev_core::bundle::build_bundle;
use crev_core::config::{BUNDLE_FILE, DEFAULT_MAX_CONCURRENCY, REVIEW_FILE};
use crev_core::review::review_bundle;
use crev_core::write::save_string_to_file;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// CLI for crev: bundle a project into one file and let an AI review it.
#[derive(Parser)]
#[clap(
    name = "crev",
    version,
    about = "Bundle your project into a single file and let an AI review it"
)]
pub struct Cli {
    /// Path to the YAML config file (default: .crev-config.yaml in the current directory)
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Bundle your project into a single file, starting from the current directory
    ///
    /// Common configuration and setup files (.vscode, .venv, package.lock, ...)
    /// and non-text extensions (.jpeg, .png, .pdf, ...) are always ignored.
    ///
    /// Examples:
    ///   crev bundle
    ///   crev bundle --ignore-pre=tests,readme --ignore-ext=.txt
    ///   crev bundle --ignore-pre=tests,readme --include-ext=.go,.py,.js
    #[clap(verbatim_doc_comment)]
    Bundle {
        /// Comma-separated prefixes of file and dir names to ignore. Ex tests,readme
        #[clap(long = "ignore-pre", value_delimiter = ',')]
        ignore_pre: Vec<String>,
        /// Comma-separated file extensions to ignore. Ex .txt,.md
        #[clap(long = "ignore-ext", value_delimiter = ',')]
        ignore_ext: Vec<String>,
        /// Comma-separated file extensions to include. Ex .go,.py,.js
        #[clap(long = "include-ext", value_delimiter = ',')]
        include_ext: Vec<String>,
        /// Maximum number of files and directories read at the same time
        #[clap(long = "max-concurrency", default_value_t = DEFAULT_MAX_CONCURRENCY)]
        max_concurrency: usize,
    },
    /// Let an AI review the bundled project in crev-project.txt
    Review {
        /// Your CREV API key
        #[clap(long = "api-key")]
        api_key: Option<String>,
    },
    /// Create a default .crev-config.yaml in the current directory
    Init,
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Bundle {
            ignore_pre,
            ignore_ext,
            include_ext,
            max_concurrency,
        } => {
            let file = load_config_or_default(cli.config.as_deref())?;
            let flags = BundleFlags {
                ignore_pre,
                ignore_ext,
                include_ext,
            };
            run_bundle(flags, max_concurrency, &file).await
        }
        Commands::Review { api_key } => {
            let file = load_config_or_default(cli.config.as_deref())?;
            let api_key = resolve_api_key(api_key, &file)?;
            run_review(&api_key).await
        }
        Commands::Init => run_init(),
    }
}

async fn run_bundle(flags: BundleFlags, max_concurrency: usize, file: &CliConfig) -> Result<()> {
    let start = Instant::now();
    tracing::info!(command = "bundle", "Starting bundle");

    let config = bundle_config(".", flags, file).with_max_concurrency(max_concurrency);
    let bundle = build_bundle(&config)
        .await
        .context("Failed to bundle project")?;

    save_string_to_file(&bundle.text, Path::new(BUNDLE_FILE))
        .context("Failed to save project bundle")?;

    let (low, high) = bundle.summary.estimated_tokens;
    println!("Project overview successfully saved to: {BUNDLE_FILE}");
    println!("Estimated token count: {low} - {high} tokens");
    println!("Execution time: {:?}", start.elapsed());
    tracing::info!(
        command = "bundle",
        paths = bundle.summary.paths,
        digest = %bundle.summary.digest,
        "Bundle complete"
    );
    Ok(())
}

async fn run_review(api_key: &str) -> Result<()> {
    tracing::info!(command = "review", "Starting review");

    let code = match std::fs::read_to_string(BUNDLE_FILE) {
        Ok(code) => code,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            anyhow::bail!("{BUNDLE_FILE} not found. Run `crev bundle` first to create it.")
        }
        Err(e) => {
            return Err(anyhow::Error::new(e).context(format!("Failed to read {BUNDLE_FILE}")))
        }
    };

    let client = ReviewClient::from_env(api_key);
    println!("Reviewing code please wait...");
    match review_bundle(&client, &code, Path::new(REVIEW_FILE)).await {
        Ok(_) => {
            println!("Successfully saved code review to {REVIEW_FILE}");
            tracing::info!(command = "review", "Review complete");
            Ok(())
        }
        Err(e) => {
            tracing::error!(command = "review", error = %e, "Review failed");
            Err(anyhow::Error::new(e))
        }
    }
}

fn run_init() -> Result<()> {
    let dir = std::env::current_dir().context("Unable to get current directory")?;
    let path = write_default_config(&dir)?;
    println!("Config file created at {}", path.display());
    Ok(())
}
