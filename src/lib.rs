pub mod cli;
pub mod config;
pub mod deck;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod models;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, OutputConfig, SourceConfig};
pub use error::{FlashcardsError, PipelineStage, Result, UserFriendlyError};
pub use models::{FlashcardEntry, SourceRow, DECK_HEADER};

// Core functionality re-exports
pub use deck::{read_deck, DeckWriter};
pub use extractor::{Extraction, TableScraper};
pub use fetcher::PageFetcher;
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Outcome of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeReport {
    pub source_url: String,
    pub output_path: PathBuf,
    pub rows_examined: usize,
    pub entries_written: usize,
    pub skipped_rows: usize,
    pub bytes_written: u64,
    pub duration: Duration,
    pub finished_at: DateTime<Utc>,
}

impl ScrapeReport {
    pub fn summary_line(&self) -> String {
        format!(
            "Wrote {} with {} entries.",
            self.output_path.display(),
            self.entries_written
        )
    }
}

/// Main library interface: fetch, extract, write.
pub struct Flashcards {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl Flashcards {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Result<Self> {
        config.validate()?;

        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(output_mode == OutputMode::Human && !quiet);

        Ok(Self {
            config,
            output_formatter,
            progress_manager,
        })
    }

    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Self::new(config, output_mode, cli_args.verbosity_level(), cli_args.quiet)
    }

    /// Run the whole pipeline. Nothing is written unless every earlier step succeeded.
    pub fn run(&self) -> Result<ScrapeReport> {
        let start_time = Instant::now();

        let extraction = self.fetch_and_extract()?;

        let output_path = self.config.output.path.clone();
        self.output_formatter
            .start_operation(&format!("Writing {}", output_path.display()));
        let bytes_written = DeckWriter::new(&output_path).write(&extraction.entries)?;
        self.output_formatter
            .debug(&format!("{} bytes written", bytes_written));

        Ok(ScrapeReport {
            source_url: self.config.source.url.clone(),
            output_path,
            rows_examined: extraction.rows_examined,
            entries_written: extraction.entry_count(),
            skipped_rows: extraction.skipped_rows.len(),
            bytes_written,
            duration: start_time.elapsed(),
            finished_at: Utc::now(),
        })
    }

    /// Fetch and extract without touching the output file.
    pub fn preview(&self) -> Result<Extraction> {
        self.fetch_and_extract()
    }

    fn fetch_and_extract(&self) -> Result<Extraction> {
        let html = self.fetch_page()?;

        self.output_formatter.start_operation("Extracting vocabulary table");
        let extraction = TableScraper::new().extract(&html)?;

        self.output_formatter.info(&format!(
            "Found {} rows, {} usable",
            extraction.rows_examined,
            extraction.entry_count()
        ));
        if !extraction.skipped_rows.is_empty() {
            self.output_formatter.debug(&format!(
                "Skipped rows with fewer than 3 cells: {:?}",
                extraction.skipped_rows
            ));
        }

        Ok(extraction)
    }

    fn fetch_page(&self) -> Result<String> {
        let url = &self.config.source.url;
        self.output_formatter
            .start_operation(&format!("Fetching {}", url));

        let fetcher = PageFetcher::new(&self.config)?;
        let spinner = self.progress_manager.create_spinner("Downloading page");
        let started = Instant::now();

        match fetcher.fetch(url) {
            Ok(html) => {
                ui::progress::finish_progress_with_summary(
                    &spinner,
                    "Page downloaded",
                    started.elapsed(),
                );
                self.output_formatter
                    .debug(&format!("Received {} bytes", html.len()));
                Ok(html)
            }
            Err(e) => {
                ui::progress::abandon_progress(&spinner);
                Err(e)
            }
        }
    }

    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config)?;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    pub fn handle_error(&self, error: &FlashcardsError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Convenience wrapper with default settings apart from the two locations.
/// Returns the number of table rows examined, skipped rows included.
pub fn build_flashcards_csv<P: AsRef<Path>>(url: &str, output_path: P) -> Result<usize> {
    let mut config = Config::default();
    config.source.url = url.to_string();
    config.output.path = output_path.as_ref().to_path_buf();

    let flashcards = Flashcards::new(config, OutputMode::Plain, 0, true)?;
    let report = flashcards.run()?;
    Ok(report.rows_examined)
}

pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
