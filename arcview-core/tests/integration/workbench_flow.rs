//! End-to-end workbench flows over real document files
//!
//! These tests drive the [`Workbench`] facade the way a host does: a zip
//! document written to disk, a file-backed content store and a recent list
//! on a temp directory, and transform replies pumped from the worker pool.

use std::fs::File;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use arcview_core::config::WorkbenchConfig;
use arcview_core::content::{ContentKind, ContentStore, FileStore};
use arcview_core::editor::NullEditorFactory;
use arcview_core::recent::RecentDocuments;
use arcview_core::workbench::{OpenOutcome, Workbench};

const REPLY_TIMEOUT: Duration = Duration::from_secs(5);

/// Writes a small document archive to disk and returns its path.
fn write_document(dir: &Path, name: &str, document_xml: &[u8]) -> PathBuf {
    let path = dir.join(name);
    let file = File::create(&path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default();

    writer.start_file("[Content_Types].xml", options).unwrap();
    writer
        .write_all(b"<Types><Default Extension=\"xml\" ContentType=\"application/xml\"/></Types>")
        .unwrap();
    writer.add_directory("word/", options).unwrap();
    writer.start_file("word/document.xml", options).unwrap();
    writer.write_all(document_xml).unwrap();
    writer.start_file("docProps/app.txt", options).unwrap();
    writer.write_all(b"application metadata").unwrap();
    writer.start_file("media/image1.png", options).unwrap();
    writer
        .write_all(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A])
        .unwrap();
    writer.finish().unwrap();

    path
}

fn config_for(dir: &Path) -> WorkbenchConfig {
    WorkbenchConfig {
        store_dir: Some(dir.join("store")),
        recent_file: Some(dir.join("recent.json")),
        ..WorkbenchConfig::default()
    }
}

fn workbench_for(config: &WorkbenchConfig) -> Workbench {
    let store = Arc::new(FileStore::new(config.store_dir()));
    Workbench::with_config(config, store, Arc::new(NullEditorFactory)).unwrap()
}

const BODY_WITH_PARAGRAPH: &[u8] = b"<w:document><w:body><w:p/></w:body></w:document>";

#[tokio::test]
async fn opening_a_document_file_lists_entries_and_records_it() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    let path = write_document(dir.path(), "report.docx", BODY_WITH_PARAGRAPH);

    let mut wb = workbench_for(&config);
    let pane = wb.open_document_file(&path).unwrap();

    assert_eq!(wb.document(), Some("report.docx"));
    assert_eq!(wb.active_pane_id(), Some(pane));
    let mut entries = wb.entries();
    entries.sort_unstable();
    assert_eq!(
        entries,
        vec![
            "[Content_Types].xml",
            "docProps/app.txt",
            "media/image1.png",
            "word/document.xml",
        ]
    );

    // The open landed in the recent list, and the list reached its file.
    assert_eq!(wb.recent().entries()[0].name, "report.docx");
    let reloaded = RecentDocuments::load(&config.recent_file(), 10);
    assert_eq!(reloaded.entries()[0].path, path);
}

#[tokio::test]
async fn text_and_image_entries_open_without_a_transform() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    let path = write_document(dir.path(), "report.docx", BODY_WITH_PARAGRAPH);

    let mut wb = workbench_for(&config);
    let pane = wb.open_document_file(&path).unwrap();

    let outcome = wb.open_entry("docProps/app.txt").await.unwrap();
    assert_eq!(outcome, OpenOutcome::Opened);
    let tab = wb
        .pane(pane)
        .unwrap()
        .session()
        .get("docProps/app.txt")
        .unwrap();
    assert_eq!(tab.kind, ContentKind::Plaintext);
    assert_eq!(tab.content.as_text(), Some("application metadata"));

    let outcome = wb.open_entry("media/image1.png").await.unwrap();
    assert_eq!(outcome, OpenOutcome::Opened);
    let tab = wb
        .pane(pane)
        .unwrap()
        .session()
        .get("media/image1.png")
        .unwrap();
    assert_eq!(tab.kind, ContentKind::Image);
    assert_eq!(
        tab.content.as_image(),
        Some(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A][..])
    );
}

#[tokio::test]
async fn xml_entries_format_in_the_background() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    let path = write_document(dir.path(), "report.docx", BODY_WITH_PARAGRAPH);

    let mut wb = workbench_for(&config);
    let pane = wb.open_document_file(&path).unwrap();

    let outcome = wb.open_entry("word/document.xml").await.unwrap();
    assert_eq!(outcome, OpenOutcome::Loading);
    assert_eq!(wb.await_transforms(REPLY_TIMEOUT).await, 1);

    let tab = wb
        .pane(pane)
        .unwrap()
        .session()
        .get("word/document.xml")
        .unwrap();
    assert_eq!(tab.kind, ContentKind::Code);
    assert_eq!(
        tab.content.as_text(),
        Some("<w:document>\n  <w:body>\n    <w:p/>\n  </w:body>\n</w:document>")
    );
}

#[tokio::test]
async fn formatted_text_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    let path = write_document(dir.path(), "report.docx", BODY_WITH_PARAGRAPH);

    let formatted = {
        let mut wb = workbench_for(&config);
        let pane = wb.open_document_file(&path).unwrap();
        wb.open_entry("word/document.xml").await.unwrap();
        assert_eq!(wb.await_transforms(REPLY_TIMEOUT).await, 1);

        wb.pane(pane)
            .unwrap()
            .session()
            .get("word/document.xml")
            .unwrap()
            .content
            .as_text()
            .unwrap()
            .to_string()
    };

    // A fresh session over the same store serves the entry from disk, with
    // no transform round-trip.
    let mut wb = workbench_for(&config);
    let pane = wb.open_document_file(&path).unwrap();
    let outcome = wb.open_entry("word/document.xml").await.unwrap();
    assert_eq!(outcome, OpenOutcome::Opened);

    let tab = wb
        .pane(pane)
        .unwrap()
        .session()
        .get("word/document.xml")
        .unwrap();
    assert_eq!(tab.content.as_text(), Some(formatted.as_str()));
}

#[tokio::test]
async fn the_store_keeps_documents_apart() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    let first = write_document(dir.path(), "report.docx", BODY_WITH_PARAGRAPH);
    let second = write_document(
        dir.path(),
        "letter.docx",
        b"<w:document><w:body><w:tbl/></w:body></w:document>",
    );

    let mut wb = workbench_for(&config);
    wb.open_document_file(&first).unwrap();
    wb.open_entry("word/document.xml").await.unwrap();
    assert_eq!(wb.await_transforms(REPLY_TIMEOUT).await, 1);

    // Same key, different document: the first document's cached text must
    // not leak in.
    let pane = wb.open_document_file(&second).unwrap();
    let outcome = wb.open_entry("word/document.xml").await.unwrap();
    assert_eq!(outcome, OpenOutcome::Loading);
    assert_eq!(wb.await_transforms(REPLY_TIMEOUT).await, 1);

    let tab = wb
        .pane(pane)
        .unwrap()
        .session()
        .get("word/document.xml")
        .unwrap();
    let text = tab.content.as_text().unwrap();
    assert!(text.contains("<w:tbl/>"));
    assert!(!text.contains("<w:p/>"));

    let store = FileStore::new(config.store_dir());
    assert_eq!(
        store.documents().await.unwrap(),
        vec!["letter.docx", "report.docx"]
    );
}

#[tokio::test]
async fn reopening_a_document_moves_it_to_the_front_of_recent() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    let first = write_document(dir.path(), "report.docx", BODY_WITH_PARAGRAPH);
    let second = write_document(dir.path(), "letter.docx", BODY_WITH_PARAGRAPH);

    let mut wb = workbench_for(&config);
    wb.open_document_file(&first).unwrap();
    wb.open_document_file(&second).unwrap();
    wb.open_document_file(&first).unwrap();

    let names: Vec<&str> = wb.recent().entries().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["report.docx", "letter.docx"]);
}
