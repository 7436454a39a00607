//! Tab session bookkeeping for a single pane
//!
//! A session is the ordered list of open tabs plus the active-tab pointer.
//! Order is insertion order; activation never reorders. The session is pure
//! bookkeeping; editor interaction (view-state capture and restore, content
//! display) lives in [`crate::pane::Pane`].

use std::sync::Arc;

use crate::content::ContentKind;
use crate::editor::ViewState;

/// Content carried by one tab.
#[derive(Debug, Clone)]
pub enum TabContent {
    /// Decoded text content.
    Text(String),
    /// Raw image bytes behind a shared handle.
    Image(Arc<Vec<u8>>),
}

impl TabContent {
    /// Wraps text content.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Wraps image bytes in a shared handle.
    #[must_use]
    pub fn image(bytes: Vec<u8>) -> Self {
        Self::Image(Arc::new(bytes))
    }

    /// Returns the text content, if this is text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Image(_) => None,
        }
    }

    /// Returns the image bytes, if this is an image.
    #[must_use]
    pub fn as_image(&self) -> Option<&[u8]> {
        match self {
            Self::Text(_) => None,
            Self::Image(bytes) => Some(bytes),
        }
    }

    /// Content size in bytes.
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        match self {
            Self::Text(text) => text.len(),
            Self::Image(bytes) => bytes.len(),
        }
    }
}

/// One opened content item's display state within a pane.
#[derive(Debug, Clone)]
pub struct Tab {
    /// Content key: the item's path within the archive. Unique per session.
    pub key: String,
    /// Name shown on the tab strip.
    pub display_name: String,
    /// The displayed content.
    pub content: TabContent,
    /// Display kind.
    pub kind: ContentKind,
    /// Saved view state from the last time this tab was switched away from.
    pub view_state: Option<ViewState>,
}

impl Tab {
    /// Creates a tab with no saved view state.
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        display_name: impl Into<String>,
        content: TabContent,
        kind: ContentKind,
    ) -> Self {
        Self {
            key: key.into(),
            display_name: display_name.into(),
            content,
            kind,
            view_state: None,
        }
    }
}

/// Ordered tabs plus the active-tab pointer for one pane.
///
/// Invariant: `active_key` is `None` exactly when the session is empty;
/// otherwise it equals some tab's key.
#[derive(Debug, Clone, Default)]
pub struct TabSession {
    tabs: Vec<Tab>,
    active_key: Option<String>,
}

impl TabSession {
    /// Creates an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the tabs in insertion order.
    #[must_use]
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    /// Number of open tabs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// Returns true if no tabs are open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// The active tab's key, if any tab is open.
    #[must_use]
    pub fn active_key(&self) -> Option<&str> {
        self.active_key.as_deref()
    }

    /// The active tab, if any.
    #[must_use]
    pub fn active_tab(&self) -> Option<&Tab> {
        let key = self.active_key.as_deref()?;
        self.get(key)
    }

    /// Mutable access to the active tab, if any.
    #[must_use]
    pub fn active_tab_mut(&mut self) -> Option<&mut Tab> {
        let key = self.active_key.clone()?;
        self.get_mut(&key)
    }

    /// Returns true if a tab with the key is open.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.tabs.iter().any(|t| t.key == key)
    }

    /// Looks up a tab by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.key == key)
    }

    /// Looks up a tab by key, mutably.
    #[must_use]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|t| t.key == key)
    }

    /// Position of a tab in insertion order.
    #[must_use]
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t.key == key)
    }

    /// Appends a tab and marks it active.
    ///
    /// The caller checks [`contains`](Self::contains) first; keys are unique
    /// within a session.
    pub fn push(&mut self, tab: Tab) {
        self.active_key = Some(tab.key.clone());
        self.tabs.push(tab);
    }

    /// Marks the tab with the key active.
    ///
    /// Returns `false` (leaving the pointer untouched) if no such tab is
    /// open.
    pub fn activate(&mut self, key: &str) -> bool {
        if self.contains(key) {
            self.active_key = Some(key.to_string());
            true
        } else {
            false
        }
    }

    /// Removes the tab with the key, returning it.
    ///
    /// If the removed tab was active and other tabs remain, the tab at index
    /// `max(0, closed_index - 1)` becomes active. If the session empties,
    /// the active pointer clears.
    pub fn remove(&mut self, key: &str) -> Option<Tab> {
        let index = self.index_of(key)?;
        let removed = self.tabs.remove(index);

        if self.active_key.as_deref() == Some(key) {
            self.active_key = if self.tabs.is_empty() {
                None
            } else {
                let next = index.saturating_sub(1);
                Some(self.tabs[next].key.clone())
            };
        }

        Some(removed)
    }
}
