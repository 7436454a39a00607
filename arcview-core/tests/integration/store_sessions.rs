//! Store lifecycle across workbench sessions
//!
//! These tests pin down what persists between two runs over the same store
//! directory: successful transforms come back from disk, failures never do,
//! and clearing a document's entries sends the next open back through the
//! worker.

use std::fs::File;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use arcview_core::config::WorkbenchConfig;
use arcview_core::content::{ContentKind, ContentStore, FileStore};
use arcview_core::editor::NullEditorFactory;
use arcview_core::workbench::{OpenOutcome, Workbench};

const REPLY_TIMEOUT: Duration = Duration::from_secs(5);

/// Writes a document archive with one well-formed and one malformed XML
/// part, returning its path.
fn write_document(dir: &Path) -> PathBuf {
    let path = dir.join("report.docx");
    let file = File::create(&path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default();

    writer.start_file("[Content_Types].xml", options).unwrap();
    writer
        .write_all(b"<Types><Default Extension=\"xml\" ContentType=\"application/xml\"/></Types>")
        .unwrap();
    writer.start_file("word/document.xml", options).unwrap();
    writer
        .write_all(b"<w:document><w:body/></w:document>")
        .unwrap();
    writer.start_file("word/broken.xml", options).unwrap();
    writer.write_all(b"<w:document><unclosed>").unwrap();
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

#[tokio::test]
async fn transform_failures_are_never_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    let path = write_document(dir.path());

    {
        let mut wb = workbench_for(&config);
        let pane = wb.open_document_file(&path).unwrap();
        let outcome = wb.open_entry("word/broken.xml").await.unwrap();
        assert_eq!(outcome, OpenOutcome::Loading);
        assert_eq!(wb.await_transforms(REPLY_TIMEOUT).await, 1);

        let tab = wb
            .pane(pane)
            .unwrap()
            .session()
            .get("word/broken.xml")
            .unwrap();
        assert_eq!(tab.kind, ContentKind::Plaintext);
        assert!(
            tab.content
                .as_text()
                .unwrap()
                .starts_with("Error formatting XML: ")
        );
    }

    // The placeholder text never reached the store, so a new session
    // retries the transform instead of replaying the error.
    let mut wb = workbench_for(&config);
    wb.open_document_file(&path).unwrap();
    let outcome = wb.open_entry("word/broken.xml").await.unwrap();
    assert_eq!(outcome, OpenOutcome::Loading);

    let store = FileStore::new(config.store_dir());
    assert!(
        store
            .load("report.docx", "word/broken.xml")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn clearing_a_document_forces_a_fresh_transform() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    let path = write_document(dir.path());

    {
        let mut wb = workbench_for(&config);
        wb.open_document_file(&path).unwrap();
        wb.open_entry("word/document.xml").await.unwrap();
        assert_eq!(wb.await_transforms(REPLY_TIMEOUT).await, 1);
    }

    let store = FileStore::new(config.store_dir());
    assert!(!store.keys("report.docx").await.unwrap().is_empty());
    store.clear_document("report.docx").await.unwrap();

    let mut wb = workbench_for(&config);
    wb.open_document_file(&path).unwrap();
    let outcome = wb.open_entry("word/document.xml").await.unwrap();
    assert_eq!(outcome, OpenOutcome::Loading);
}

#[tokio::test]
async fn idle_await_returns_zero() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    let path = write_document(dir.path());

    let mut wb = workbench_for(&config);
    wb.open_document_file(&path).unwrap();

    assert_eq!(wb.await_transforms(Duration::from_millis(50)).await, 0);
}

#[tokio::test]
async fn every_formatted_entry_reaches_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    let path = write_document(dir.path());

    let mut wb = workbench_for(&config);
    wb.open_document_file(&path).unwrap();

    let outcome = wb.open_entry("[Content_Types].xml").await.unwrap();
    assert_eq!(outcome, OpenOutcome::Loading);
    let outcome = wb.open_entry("word/document.xml").await.unwrap();
    assert_eq!(outcome, OpenOutcome::Loading);

    let mut handled = 0;
    while handled < 2 {
        let drained = wb.await_transforms(REPLY_TIMEOUT).await;
        assert!(drained > 0, "timed out waiting for transform replies");
        handled += drained;
    }

    let store = FileStore::new(config.store_dir());
    assert_eq!(
        store.keys("report.docx").await.unwrap(),
        vec!["[Content_Types].xml", "word/document.xml"]
    );
}
