pub mod reader;
pub mod writer;

pub use reader::read_deck;
pub use writer::DeckWriter;
