//! Show entry content command.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use arcview_core::archive::{ArchiveReader, ZipArchiveReader};
use arcview_core::config::WorkbenchConfig;
use arcview_core::content::{ContentKind, ContentStore, FileStore};
use arcview_core::editor::{EditorFactory, NullEditorFactory};
use arcview_core::pane::Tab;
use arcview_core::split::PaneId;
use arcview_core::workbench::{OpenOutcome, Workbench};

use crate::error::CliError;
use crate::format::human_size;
use crate::util::{find_entry, load_config, record_recent};

/// How long to wait for the transform worker before giving up.
const REPLY_TIMEOUT: Duration = Duration::from_secs(10);

/// Show entry command handler
pub fn cmd_show(
    config_path: Option<&Path>,
    document: &Path,
    key: &str,
    raw: bool,
) -> Result<(), CliError> {
    let config = load_config(config_path)?;

    if raw {
        return show_raw(&config, document, key);
    }

    let store: Arc<dyn ContentStore> = Arc::new(FileStore::new(config.store_dir()));
    let factory: Arc<dyn EditorFactory> = Arc::new(NullEditorFactory);
    let mut workbench = Workbench::with_config(&config, store, factory)?;

    let pane_id = workbench.open_document_file(document)?;
    let key = find_entry(&workbench.entries(), key)?;

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::Resolve(format!("Failed to create async runtime: {e}")))?;

    match runtime.block_on(workbench.open_entry(&key))? {
        OpenOutcome::Opened => {}
        OpenOutcome::Loading => {
            runtime.block_on(wait_for_tab(&mut workbench, pane_id, &key))?;
        }
        OpenOutcome::Ignored => {
            return Err(CliError::Resolve(format!(
                "No pane accepted entry '{key}'"
            )));
        }
    }

    let tab = workbench
        .pane(pane_id)
        .and_then(|pane| pane.session().get(&key))
        .ok_or_else(|| CliError::Resolve(format!("Entry '{key}' did not open")))?;

    print_tab(&key, tab)
}

/// Pumps transform replies until the entry's tab appears or the deadline
/// passes.
async fn wait_for_tab(
    workbench: &mut Workbench,
    pane_id: PaneId,
    key: &str,
) -> Result<(), CliError> {
    let deadline = Instant::now() + REPLY_TIMEOUT;
    loop {
        let arrived = workbench
            .pane(pane_id)
            .is_some_and(|pane| pane.session().contains(key));
        if arrived {
            return Ok(());
        }
        if Instant::now() >= deadline {
            return Err(CliError::Resolve(format!(
                "Timed out waiting for '{key}' to format"
            )));
        }
        workbench.await_transforms(Duration::from_millis(500)).await;
    }
}

/// Prints a resolved tab's content.
///
/// A key detected as code that landed as a plaintext tab can only be the
/// formatting-failure placeholder, so it surfaces as an error instead.
fn print_tab(key: &str, tab: &Tab) -> Result<(), CliError> {
    if let Some(bytes) = tab.content.as_image() {
        println!("Binary entry: {key} ({}, {})", tab.kind, human_size(bytes.len() as u64));
        return Ok(());
    }

    let text = tab.content.as_text().unwrap_or_default();
    if ContentKind::detect(key).needs_transform() && tab.kind == ContentKind::Plaintext {
        return Err(CliError::Resolve(text.to_string()));
    }

    println!("{text}");
    Ok(())
}

/// Prints the raw entry straight from the archive, skipping the transform
/// and both cache tiers.
fn show_raw(config: &WorkbenchConfig, document: &Path, key: &str) -> Result<(), CliError> {
    let mut reader = ZipArchiveReader::open(document)?;
    record_recent(config, reader.identity(), document);

    let key = find_entry(&reader.entries(), key)?;

    if ContentKind::detect(&key).is_image() {
        let size = reader.entry_size(&key)?;
        println!("Binary entry: {key} (image, {})", human_size(size));
        return Ok(());
    }

    let text = reader.read_text(&key)?;
    println!("{text}");
    Ok(())
}
