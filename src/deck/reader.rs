use crate::error::{FlashcardsError, Result};
use crate::models::{FlashcardEntry, DECK_HEADER};
use std::path::Path;

/// Load a deck by its header names, the way the flashcard front-end reads it.
pub fn read_deck<P: AsRef<Path>>(path: P) -> Result<Vec<FlashcardEntry>> {
    let mut reader = csv::Reader::from_path(path.as_ref())?;

    let headers = reader.headers()?.clone();
    for expected in DECK_HEADER {
        if !headers.iter().any(|h| h == expected) {
            return Err(FlashcardsError::Parse {
                message: format!(
                    "{} is missing the \"{}\" column",
                    path.as_ref().display(),
                    expected
                ),
            });
        }
    }

    let mut entries = Vec::new();
    for record in reader.deserialize() {
        let entry: FlashcardEntry = record?;
        entries.push(entry);
    }

    Ok(entries)
}
