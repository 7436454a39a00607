//! Editor component seam
//!
//! The workbench never renders text itself; it drives an external editor
//! component through this trait pair. The host supplies an [`EditorFactory`]
//! and panes create their instance lazily on first use. View states are
//! opaque snapshots (scroll and cursor position); the core stores and routes
//! them but never inspects their contents.

use crate::content::ContentKind;
use crate::split::PaneId;

/// Opaque per-tab view snapshot produced and consumed by the editor.
pub type ViewState = serde_json::Value;

/// One editor-component instance embedded in a pane.
///
/// `set_content` replaces the displayed text and resets the view to the
/// start; a subsequent `restore_view_state` re-applies a saved position.
/// Dropping the instance releases its display resources.
pub trait Editor: Send {
    /// Replaces the displayed text, requesting syntax-aware display for
    /// [`ContentKind::Code`] and none for [`ContentKind::Plaintext`].
    fn set_content(&mut self, text: &str, kind: ContentKind);

    /// Captures the current view state, or `None` if there is nothing to
    /// capture yet.
    fn save_view_state(&mut self) -> Option<ViewState>;

    /// Re-applies a previously captured view state.
    fn restore_view_state(&mut self, state: &ViewState);

    /// Clears the displayed content (empty-pane state).
    fn clear(&mut self);
}

/// Creates editor instances for panes on first use.
pub trait EditorFactory: Send + Sync {
    /// Creates a fresh editor instance for the given pane.
    fn create(&self, pane: PaneId) -> Box<dyn Editor>;
}

/// Editor that renders nothing, for headless embeds.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEditor;

impl Editor for NullEditor {
    fn set_content(&mut self, _text: &str, _kind: ContentKind) {}

    fn save_view_state(&mut self) -> Option<ViewState> {
        None
    }

    fn restore_view_state(&mut self, _state: &ViewState) {}

    fn clear(&mut self) {}
}

/// Factory producing [`NullEditor`] instances.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEditorFactory;

impl EditorFactory for NullEditorFactory {
    fn create(&self, _pane: PaneId) -> Box<dyn Editor> {
        Box::new(NullEditor)
    }
}
