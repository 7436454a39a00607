//! Pane: a leaf editing surface
//!
//! A pane owns one [`TabSession`] and one lazily-created editor instance.
//! Opening, closing and switching tabs goes through the pane so view states
//! are captured before a switch and restored after, and so image tabs bypass
//! the editor path entirely.

mod session;

pub use session::{Tab, TabContent, TabSession};

use std::fmt;
use std::sync::Arc;

use crate::content::ContentKind;
use crate::editor::{Editor, EditorFactory};
use crate::split::PaneId;

/// A leaf editing surface with its own tab session and editor instance.
///
/// The editor is created on first text display and disposed when the pane is
/// dropped. A pane never outlives its manager registry entry.
pub struct Pane {
    id: PaneId,
    session: TabSession,
    editor: Option<Box<dyn Editor>>,
    factory: Arc<dyn EditorFactory>,
    loading: bool,
}

impl Pane {
    /// Creates an empty pane.
    #[must_use]
    pub fn new(id: PaneId, factory: Arc<dyn EditorFactory>) -> Self {
        Self {
            id,
            session: TabSession::new(),
            editor: None,
            factory,
            loading: false,
        }
    }

    /// The pane's id.
    #[must_use]
    pub const fn id(&self) -> PaneId {
        self.id
    }

    /// Read access to the tab session.
    #[must_use]
    pub const fn session(&self) -> &TabSession {
        &self.session
    }

    /// Returns true while a background transform for this pane is pending.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Sets the loading indicator.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Returns true once the editor instance has been created.
    #[must_use]
    pub const fn has_editor(&self) -> bool {
        self.editor.is_some()
    }

    /// Opens a tab, or activates it if the key is already open.
    ///
    /// Re-opening an open key never reloads content or touches its view
    /// state. For a new key, the outgoing tab's view state is captured
    /// before the new tab is appended, marked active and displayed. Content
    /// arriving here also clears the loading indicator.
    pub fn open_tab(
        &mut self,
        key: &str,
        display_name: &str,
        content: TabContent,
        kind: ContentKind,
    ) {
        self.loading = false;

        if self.session.contains(key) {
            self.switch_to_tab(key);
            return;
        }

        self.capture_view_state();
        self.session
            .push(Tab::new(key, display_name, content, kind));
        self.render_active();
    }

    /// Closes the tab with the key.
    ///
    /// If it was active and other tabs remain, the tab at index
    /// `max(0, closed_index - 1)` becomes active and its saved view state is
    /// restored. Closing the last tab leaves the pane in the empty state.
    pub fn close_tab(&mut self, key: &str) {
        let was_active = self.session.active_key() == Some(key);
        if self.session.remove(key).is_none() {
            return;
        }

        if was_active {
            if self.session.is_empty() {
                if let Some(editor) = self.editor.as_mut() {
                    editor.clear();
                }
            } else {
                self.render_active();
            }
        }
    }

    /// Switches to an open tab.
    ///
    /// No-op if the key is already active or not open. Otherwise the
    /// outgoing tab's view state is captured, the target activated and its
    /// saved view state restored (or the view left at the start if none was
    /// saved).
    pub fn switch_to_tab(&mut self, key: &str) {
        if self.session.active_key() == Some(key) || !self.session.contains(key) {
            return;
        }

        self.capture_view_state();
        self.session.activate(key);
        self.render_active();
    }

    /// Captures the active tab's view state into the tab.
    ///
    /// Image tabs have no editor view state and are skipped; so is a pane
    /// whose editor has not been created yet.
    fn capture_view_state(&mut self) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        let Some(tab) = self.session.active_tab_mut() else {
            return;
        };
        if !tab.kind.is_image() {
            tab.view_state = editor.save_view_state();
        }
    }

    /// Displays the active tab through the editor.
    ///
    /// Image tabs bypass the editor; their bytes stay in the tab for the
    /// host's media surface. The editor is created lazily on the first text
    /// display.
    fn render_active(&mut self) {
        let Some(tab) = self.session.active_tab() else {
            return;
        };
        if tab.kind.is_image() {
            return;
        }
        let Some(text) = tab.content.as_text() else {
            return;
        };

        if self.editor.is_none() {
            self.editor = Some(self.factory.create(self.id));
        }
        if let Some(editor) = self.editor.as_mut() {
            editor.set_content(text, tab.kind);
            if let Some(state) = &tab.view_state {
                editor.restore_view_state(state);
            }
        }
    }
}

impl fmt::Debug for Pane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pane")
            .field("id", &self.id)
            .field("tabs", &self.session.len())
            .field("active", &self.session.active_key())
            .field("has_editor", &self.editor.is_some())
            .field("loading", &self.loading)
            .finish()
    }
}
