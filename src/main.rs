use clap::Parser;
use flashcards::{Cli, Flashcards, FlashcardsError, OutputFormatter, OutputMode, UserFriendlyError};
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let flashcards = match Flashcards::from_cli(&cli) {
        Ok(flashcards) => flashcards,
        Err(e) => {
            print_startup_error(&e);
            return exit_code(&e);
        }
    };

    if cli.dry_run {
        return handle_dry_run(&flashcards);
    }

    match flashcards.run() {
        Ok(report) => {
            flashcards.output_formatter().print_scrape_report(&report);
            0
        }
        Err(e) => {
            flashcards.handle_error(&e);
            exit_code(&e)
        }
    }
}

fn exit_code(error: &FlashcardsError) -> i32 {
    match error {
        FlashcardsError::Config { .. } | FlashcardsError::InvalidUrl { .. } => 2,
        FlashcardsError::Network { .. }
        | FlashcardsError::HttpStatus { .. }
        | FlashcardsError::Timeout { .. } => 3,
        FlashcardsError::Parse { .. } => 4,
        FlashcardsError::TableNotFound => 5,
        FlashcardsError::Io(_) | FlashcardsError::Csv(_) | FlashcardsError::Write { .. } => 6,
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli.config.as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "flashcards.toml".to_string());

    match Flashcards::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  flashcards --config {}", config_path);
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn handle_dry_run(flashcards: &Flashcards) -> i32 {
    let formatter = flashcards.output_formatter();
    formatter.info("DRY RUN MODE - the deck will not be written");

    match flashcards.preview() {
        Ok(extraction) => {
            formatter.print_preview(&extraction);
            formatter.info(&format!(
                "Run without --dry-run to write {}",
                flashcards.config().output.path.display()
            ));
            0
        }
        Err(e) => {
            flashcards.handle_error(&e);
            exit_code(&e)
        }
    }
}

fn print_startup_error(error: &FlashcardsError) {
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_generate_config_command() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let cli = Cli {
            url: None,
            output: None,
            timeout: None,
            user_agent: None,
            config: Some(config_path.clone()),
            output_format: flashcards::OutputFormat::Plain,
            verbose: 0,
            quiet: true,
            dry_run: false,
            generate_config: true,
        };

        let exit_code = handle_generate_config(&cli);
        assert_eq!(exit_code, 0);

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[source]"));
    }

    #[test]
    fn test_exit_codes_by_stage() {
        assert_eq!(exit_code(&FlashcardsError::TableNotFound), 5);
        assert_eq!(
            exit_code(&FlashcardsError::HttpStatus {
                url: "https://example.com".to_string(),
                status: 404,
            }),
            3
        );
        assert_eq!(
            exit_code(&FlashcardsError::Parse {
                message: "bad bytes".to_string(),
            }),
            4
        );
        assert_eq!(
            exit_code(&FlashcardsError::Write {
                path: "deck.csv".to_string(),
                message: "denied".to_string(),
            }),
            6
        );
    }
}
