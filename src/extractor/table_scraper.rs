use crate::error::{FlashcardsError, Result};
use crate::extractor::table::{cells_of, find_first_table, rows_of};
use crate::models::{FlashcardEntry, SourceRow};
use scraper::Html;
use serde::Serialize;

/// What a pass over the first table produced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Extraction {
    /// Every row in the table, including the ones that were skipped.
    pub rows_examined: usize,
    pub entries: Vec<FlashcardEntry>,
    /// Positions of rows with fewer than three data cells.
    pub skipped_rows: Vec<usize>,
}

impl Extraction {
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Row count minus one, as older versions of this tool reported it.
    pub fn legacy_count(&self) -> usize {
        self.rows_examined.saturating_sub(1)
    }
}

#[derive(Debug, Default)]
pub struct TableScraper;

impl TableScraper {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, html: &str) -> Result<Extraction> {
        let document = Html::parse_document(html);
        let table = find_first_table(&document).ok_or(FlashcardsError::TableNotFound)?;

        let mut extraction = Extraction::default();
        for (index, row) in rows_of(table).into_iter().enumerate() {
            extraction.rows_examined += 1;

            let source_row = SourceRow::new(index, cells_of(row));
            match source_row.to_entry() {
                Some(entry) => extraction.entries.push(entry),
                None => extraction.skipped_rows.push(index),
            }
        }

        Ok(extraction)
    }
}
