use crate::config::{CliOverrides, Config};
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "flashcards")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Build a flashcard CSV deck from a vocabulary table on a web page")]
#[command(
    long_about = "Flashcards fetches a web page, reads the first HTML table on it and writes \
                  the second and third column of every row as a Tagalog,English CSV deck."
)]
#[command(after_help = "EXAMPLES:\n  \
    flashcards\n  \
    flashcards --output decks/tagalog.csv\n  \
    flashcards --url https://example.com/words --timeout 10 -v\n  \
    flashcards --dry-run --output-format json")]
pub struct Cli {
    /// Page containing the vocabulary table
    #[arg(short, long, env = "FLASHCARDS_URL", value_parser = validate_source_url)]
    pub url: Option<String>,

    /// Where to write the CSV deck (default: flashcards.csv)
    #[arg(short, long, env = "FLASHCARDS_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// User-Agent header sent with the request
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (only the final summary or error is printed)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Fetch and extract, then show the entries without writing the deck
    #[arg(long)]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Write a sample configuration file and exit")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_url(self.url.clone())
            .with_timeout(self.timeout)
            .with_user_agent(self.user_agent.clone())
            .with_output_path(self.output.clone())
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

pub fn validate_source_url(s: &str) -> std::result::Result<String, String> {
    let url =
        Url::parse(s).map_err(|_| "Invalid URL format. Please provide a full URL.".to_string())?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(format!("Unsupported scheme '{}': use http or https", other)),
    }

    if url.host_str().is_none() {
        return Err("URL must include a hostname".to_string());
    }

    Ok(s.to_string())
}
