use flashcards::{
    build_flashcards_csv, read_deck, Config, FlashcardEntry, Flashcards, FlashcardsError,
    OutputMode, PipelineStage,
};
use mockito::{Mock, Server, ServerGuard};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn serve(server: &mut ServerGuard, body: &str) -> Mock {
    server
        .mock("GET", "/words")
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(body)
        .create()
}

fn run(server: &ServerGuard, output: &Path) -> flashcards::Result<flashcards::ScrapeReport> {
    let mut config = Config::default();
    config.source.url = format!("{}/words", server.url());
    config.source.timeout = 5;
    config.output.path = output.to_path_buf();

    Flashcards::new(config, OutputMode::Plain, 0, true)?.run()
}

fn deck_path(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("flashcards.csv")
}

#[test]
fn test_single_row_table() {
    let mut server = Server::new();
    let _mock = serve(
        &mut server,
        "<table><tr><td>1</td><td>aso</td><td>dog</td></tr></table>",
    );
    let temp_dir = TempDir::new().unwrap();
    let output = deck_path(&temp_dir);

    let report = run(&server, &output).unwrap();

    assert_eq!(report.entries_written, 1);
    assert_eq!(fs::read_to_string(&output).unwrap(), "Tagalog,English\naso,dog\n");
}

#[test]
fn test_two_cell_row_produces_nothing() {
    let mut server = Server::new();
    let _mock = serve(&mut server, "<table><tr><td>2</td><td>pusa</td></tr></table>");
    let temp_dir = TempDir::new().unwrap();
    let output = deck_path(&temp_dir);

    let report = run(&server, &output).unwrap();

    assert_eq!(report.rows_examined, 1);
    assert_eq!(report.entries_written, 0);
    assert_eq!(fs::read_to_string(&output).unwrap(), "Tagalog,English\n");
}

#[test]
fn test_http_404_writes_nothing() {
    let mut server = Server::new();
    let _mock = server.mock("GET", "/words").with_status(404).create();
    let temp_dir = TempDir::new().unwrap();
    let output = deck_path(&temp_dir);

    let err = run(&server, &output).unwrap_err();

    assert!(matches!(err, FlashcardsError::HttpStatus { status: 404, .. }));
    assert_eq!(err.stage(), PipelineStage::Fetch);
    assert!(!output.exists());
}

#[test]
fn test_http_failure_leaves_existing_deck_untouched() {
    let mut server = Server::new();
    let _mock = server.mock("GET", "/words").with_status(500).create();
    let temp_dir = TempDir::new().unwrap();
    let output = deck_path(&temp_dir);
    fs::write(&output, "Tagalog,English\nluma,old\n").unwrap();

    assert!(run(&server, &output).is_err());
    assert_eq!(fs::read_to_string(&output).unwrap(), "Tagalog,English\nluma,old\n");
}

#[test]
fn test_comma_in_cell_is_quoted() {
    let mut server = Server::new();
    let _mock = serve(
        &mut server,
        "<table><tr><td>9</td><td>bata, o ano</td><td>child</td></tr></table>",
    );
    let temp_dir = TempDir::new().unwrap();
    let output = deck_path(&temp_dir);

    run(&server, &output).unwrap();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "Tagalog,English\n\"bata, o ano\",child\n"
    );
}

#[test]
fn test_no_table_creates_no_file() {
    let mut server = Server::new();
    let _mock = serve(&mut server, "<html><body><p>Page moved</p></body></html>");
    let temp_dir = TempDir::new().unwrap();
    let output = deck_path(&temp_dir);

    let err = run(&server, &output).unwrap_err();

    assert!(matches!(err, FlashcardsError::TableNotFound));
    assert_eq!(err.stage(), PipelineStage::Locate);
    assert!(!output.exists());
}

#[test]
fn test_mixed_rows_keep_order() {
    let mut server = Server::new();
    let _mock = serve(
        &mut server,
        "<html><body><h1>1000 words</h1>\
         <table><tbody>\
         <tr><th>Number</th><th>Filipino</th><th>in English</th></tr>\
         <tr><td>1</td><td>ang</td><td>the</td></tr>\
         <tr><td colspan=\"3\">advertisement</td></tr>\
         <tr><td>2</td><td> ng </td><td>of</td><td>extra</td></tr>\
         <tr><td>3</td><td>sa</td><td>in, at</td></tr>\
         </tbody></table>\
         <table><tr><td>99</td><td>ignored</td><td>second table</td></tr></table>\
         </body></html>",
    );
    let temp_dir = TempDir::new().unwrap();
    let output = deck_path(&temp_dir);

    let report = run(&server, &output).unwrap();

    assert_eq!(report.rows_examined, 5);
    assert_eq!(report.skipped_rows, 2);
    assert_eq!(
        read_deck(&output).unwrap(),
        vec![
            FlashcardEntry::new("ang", "the"),
            FlashcardEntry::new("ng", "of"),
            FlashcardEntry::new("sa", "in, at"),
        ]
    );
}

#[test]
fn test_rerun_is_byte_identical() {
    let mut server = Server::new();
    let _mock = serve(
        &mut server,
        "<table><tr><td>1</td><td>\"oo\"</td><td>yes</td></tr>\
         <tr><td>2</td><td>hindi</td><td>no\nnot</td></tr></table>",
    );
    let temp_dir = TempDir::new().unwrap();
    let first = temp_dir.path().join("first.csv");
    let second = temp_dir.path().join("second.csv");

    run(&server, &first).unwrap();
    run(&server, &second).unwrap();

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn test_escaped_cells_reparse_exactly() {
    let mut server = Server::new();
    let _mock = serve(
        &mut server,
        "<table><tr><td>1</td><td>sabi &quot;niya&quot;, diba</td><td>line one\nline two</td></tr></table>",
    );
    let temp_dir = TempDir::new().unwrap();
    let output = deck_path(&temp_dir);

    run(&server, &output).unwrap();

    assert_eq!(
        read_deck(&output).unwrap(),
        vec![FlashcardEntry::new("sabi \"niya\", diba", "line one\nline two")]
    );
}

#[test]
fn test_convenience_wrapper_counts_rows() {
    let mut server = Server::new();
    let _mock = serve(
        &mut server,
        "<table><tr><th>#</th></tr><tr><td>1</td><td>aso</td><td>dog</td></tr></table>",
    );
    let temp_dir = TempDir::new().unwrap();
    let output = deck_path(&temp_dir);

    let rows = build_flashcards_csv(&format!("{}/words", server.url()), &output).unwrap();

    assert_eq!(rows, 2);
    assert!(output.exists());
}
