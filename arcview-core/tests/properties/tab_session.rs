//! Property-based tests for the tab session
//!
//! These tests compare a [`TabSession`] against a plain reference model
//! under arbitrary open, switch and close sequences: the session keeps tabs
//! in insertion order, keys stay unique, the active pointer always names a
//! live tab, and closing the active tab falls back to its left neighbor.

use proptest::prelude::*;

use arcview_core::content::ContentKind;
use arcview_core::pane::{Tab, TabContent, TabSession};

// ============================================================================
// Test Strategies
// ============================================================================

/// Entry keys the operations draw from; small enough that sequences revisit
/// the same key often.
const KEY_POOL: [&str; 6] = [
    "word/document.xml",
    "word/styles.xml",
    "word/settings.xml",
    "docProps/core.xml",
    "docProps/app.xml",
    "word/_rels/document.xml.rels",
];

/// An operation on a tab session, addressing keys by pool index.
#[derive(Debug, Clone)]
enum SessionOperation {
    /// Open the key, or activate it if already open.
    Open { key_index: usize },
    /// Activate the key if it is open.
    Switch { key_index: usize },
    /// Close the key if it is open.
    Close { key_index: usize },
}

/// Strategy for generating session operations
fn operation_strategy() -> impl Strategy<Value = SessionOperation> {
    prop_oneof![
        (0..KEY_POOL.len()).prop_map(|key_index| SessionOperation::Open { key_index }),
        (0..KEY_POOL.len()).prop_map(|key_index| SessionOperation::Switch { key_index }),
        (0..KEY_POOL.len()).prop_map(|key_index| SessionOperation::Close { key_index }),
    ]
}

/// Strategy for generating a sequence of session operations
fn operations_strategy(max_ops: usize) -> impl Strategy<Value = Vec<SessionOperation>> {
    proptest::collection::vec(operation_strategy(), 0..=max_ops)
}

fn text_tab(key: &str) -> Tab {
    Tab::new(
        key,
        key.rsplit('/').next().unwrap_or(key),
        TabContent::text(format!("content of {key}")),
        ContentKind::Plaintext,
    )
}

/// Applies one operation the way a pane drives its session: a push only
/// happens for a key that is not already open.
fn apply_operation(session: &mut TabSession, op: &SessionOperation) {
    match op {
        SessionOperation::Open { key_index } => {
            let key = KEY_POOL[*key_index];
            if session.contains(key) {
                session.activate(key);
            } else {
                session.push(text_tab(key));
            }
        }
        SessionOperation::Switch { key_index } => {
            session.activate(KEY_POOL[*key_index]);
        }
        SessionOperation::Close { key_index } => {
            let _ = session.remove(KEY_POOL[*key_index]);
        }
    }
}

// ============================================================================
// Reference Model
// ============================================================================

/// Plain model of a session: live keys in insertion order plus the active
/// key, updated by the documented rules.
#[derive(Debug, Clone, Default, PartialEq)]
struct SessionModel {
    keys: Vec<String>,
    active: Option<String>,
}

impl SessionModel {
    fn apply(&mut self, op: &SessionOperation) {
        match op {
            SessionOperation::Open { key_index } => {
                let key = KEY_POOL[*key_index];
                if !self.keys.iter().any(|k| k == key) {
                    self.keys.push(key.to_string());
                }
                self.active = Some(key.to_string());
            }
            SessionOperation::Switch { key_index } => {
                let key = KEY_POOL[*key_index];
                if self.keys.iter().any(|k| k == key) {
                    self.active = Some(key.to_string());
                }
            }
            SessionOperation::Close { key_index } => {
                let key = KEY_POOL[*key_index];
                let Some(index) = self.keys.iter().position(|k| k == key) else {
                    return;
                };
                self.keys.remove(index);

                if self.active.as_deref() == Some(key) {
                    self.active = if self.keys.is_empty() {
                        None
                    } else {
                        Some(self.keys[index.saturating_sub(1)].clone())
                    };
                }
            }
        }
    }
}

// ============================================================================
// Property 1: Model Agreement
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// After every operation the session agrees with the reference model on
    /// tab order, tab count and the active key.
    #[test]
    fn prop_session_matches_model(ops in operations_strategy(24)) {
        let mut session = TabSession::new();
        let mut model = SessionModel::default();

        for op in &ops {
            apply_operation(&mut session, op);
            model.apply(op);

            let session_keys: Vec<&str> = session.tabs().iter().map(|t| t.key.as_str()).collect();
            let model_keys: Vec<&str> = model.keys.iter().map(String::as_str).collect();
            prop_assert_eq!(session_keys, model_keys, "tab order diverged from the model");
            prop_assert_eq!(session.len(), model.keys.len());
            prop_assert_eq!(
                session.active_key(),
                model.active.as_deref(),
                "active key diverged from the model"
            );
        }
    }

    /// The active pointer is empty exactly when the session is, and
    /// otherwise always names an open tab.
    #[test]
    fn prop_active_key_is_always_live(ops in operations_strategy(24)) {
        let mut session = TabSession::new();

        for op in &ops {
            apply_operation(&mut session, op);

            match session.active_key() {
                None => prop_assert!(session.is_empty(), "a non-empty session lost its active tab"),
                Some(key) => prop_assert!(
                    session.contains(key),
                    "active key '{}' is not an open tab",
                    key
                ),
            }
        }
    }
}

// ============================================================================
// Property 2: Open Idempotence
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Re-opening an open key only moves activation; the tab list does not
    /// change.
    #[test]
    fn prop_reopening_a_key_is_idempotent(
        ops in operations_strategy(16),
        key_index in 0..KEY_POOL.len(),
    ) {
        let mut session = TabSession::new();
        for op in &ops {
            apply_operation(&mut session, op);
        }

        let open = SessionOperation::Open { key_index };
        apply_operation(&mut session, &open);
        let keys_after_first: Vec<String> =
            session.tabs().iter().map(|t| t.key.clone()).collect();

        apply_operation(&mut session, &open);

        let keys_after_second: Vec<String> =
            session.tabs().iter().map(|t| t.key.clone()).collect();
        prop_assert_eq!(keys_after_first, keys_after_second, "re-open changed the tab list");
        prop_assert_eq!(session.active_key(), Some(KEY_POOL[key_index]));
    }
}

// ============================================================================
// Property 3: Close Fallback
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Closing the active tab activates its left neighbor, or the new first
    /// tab when the leftmost one closes.
    #[test]
    fn prop_closing_active_tab_activates_left_neighbor(
        count in 2..=KEY_POOL.len(),
        active_index in 0..KEY_POOL.len(),
    ) {
        let mut session = TabSession::new();
        for key in &KEY_POOL[..count] {
            session.push(text_tab(key));
        }

        let closed = active_index % count;
        session.activate(KEY_POOL[closed]);
        session.remove(KEY_POOL[closed]);

        let expected = if closed == 0 {
            KEY_POOL[1]
        } else {
            KEY_POOL[closed - 1]
        };
        prop_assert_eq!(
            session.active_key(),
            Some(expected),
            "closing tab {} of {} fell back to the wrong neighbor",
            closed,
            count
        );
        prop_assert_eq!(session.len(), count - 1);
    }
}
