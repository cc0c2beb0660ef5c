//! Typed traversal over a parsed document: first table, its rows, a row's data cells.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

// Selector strings are constants; parse cannot fail on them.
static TABLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("table").expect("valid table selector")
});

static ROW_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("tr").expect("valid row selector")
});

static DATA_CELL_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("td").expect("valid cell selector")
});

/// First `<table>` in document order.
pub fn find_first_table(document: &Html) -> Option<ElementRef<'_>> {
    document.select(&TABLE_SELECTOR).next()
}

/// Every `<tr>` under the table, in document order.
pub fn rows_of<'a>(table: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    table.select(&ROW_SELECTOR).collect()
}

/// Text of each `<td>` under the row. Header cells (`<th>`) are not included.
///
/// A cell's text nodes are joined first and the result is trimmed once at its outer
/// edges. Whitespace inside or between nodes is kept: `<td> I, <i>me</i> </td>` gives
/// `"I, me"`, not `"I,me"`.
pub fn cells_of(row: ElementRef<'_>) -> Vec<String> {
    row.select(&DATA_CELL_SELECTOR)
        .map(|cell| cell.text().collect::<String>().trim().to_string())
        .collect()
}
