pub mod table;
pub mod table_scraper;

pub use table::{cells_of, find_first_table, rows_of};
pub use table_scraper::{Extraction, TableScraper};
