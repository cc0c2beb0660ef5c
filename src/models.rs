use serde::{Deserialize, Serialize};

/// Header row written at the top of every deck.
pub const DECK_HEADER: [&str; 2] = ["Tagalog", "English"];

/// Source layout is `Rank | Tagalog | English | ...`.
pub const TERM_COLUMN: usize = 1;
pub const TRANSLATION_COLUMN: usize = 2;
pub const MIN_CELLS: usize = 3;

/// The trimmed data cells of one table row, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    pub index: usize,
    pub cells: Vec<String>,
}

impl SourceRow {
    pub fn new(index: usize, cells: Vec<String>) -> Self {
        Self { index, cells }
    }

    /// `None` for rows with fewer than three data cells.
    pub fn to_entry(&self) -> Option<FlashcardEntry> {
        if self.cells.len() < MIN_CELLS {
            return None;
        }

        Some(FlashcardEntry::new(
            self.cells[TERM_COLUMN].clone(),
            self.cells[TRANSLATION_COLUMN].clone(),
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashcardEntry {
    #[serde(rename = "Tagalog")]
    pub term: String,
    #[serde(rename = "English")]
    pub translation: String,
}

impl FlashcardEntry {
    pub fn new<T: Into<String>, U: Into<String>>(term: T, translation: U) -> Self {
        Self {
            term: term.into(),
            translation: translation.into(),
        }
    }

    pub fn as_record(&self) -> [&str; 2] {
        [self.term.as_str(), self.translation.as_str()]
    }
}
