//! Session state, the actions that mutate it, and the reducer.
//!
//! Every state transition goes through [`reduce`], a pure function, so the
//! store's behavior is deterministic and testable without a UI harness.

use serde::{Deserialize, Serialize};

/// One committed translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: String,
    pub source: String,
    pub translated: String,
    /// Creation time, milliseconds since the Unix epoch.
    pub timestamp: u64,
}

/// The full in-memory session state.
///
/// `source_text` and `translated_text` are ephemeral and reset on every
/// restart; only the [`PersistedState`] subset is durable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    pub is_dark_mode: bool,
    /// Newest entry first.
    pub history: Vec<HistoryItem>,
    pub source_text: String,
    pub translated_text: String,
}

/// The durable `{isDarkMode, history}` subset. Field names match the JSON
/// the web frontend wrote, so a store saved by either side round-trips.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    pub is_dark_mode: bool,
    pub history: Vec<HistoryItem>,
}

impl SessionState {
    /// Rebuild a session from its persisted subset; the text fields always
    /// start empty.
    pub fn from_persisted(persisted: PersistedState) -> Self {
        SessionState {
            is_dark_mode: persisted.is_dark_mode,
            history: persisted.history,
            ..SessionState::default()
        }
    }

    /// The subset that survives a restart.
    pub fn persisted(&self) -> PersistedState {
        PersistedState {
            is_dark_mode: self.is_dark_mode,
            history: self.history.clone(),
        }
    }
}

/// State transitions applied by [`reduce`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Replace the source text and its recomputed translation.
    SetSourceText { source: String, translated: String },
    /// Insert a history entry, newest first, unless an entry with the same
    /// (source, translated) pair already exists.
    CommitEntry(HistoryItem),
    /// Remove the entry with the given id; unknown ids are a no-op.
    RemoveEntry { id: String },
    /// Drop all history entries.
    ClearHistory,
    /// Flip the dark-mode flag.
    ToggleTheme,
}

/// Pure reducer over the session state.
pub fn reduce(state: SessionState, action: Action) -> SessionState {
    let mut state = state;
    match action {
        Action::SetSourceText { source, translated } => {
            state.source_text = source;
            state.translated_text = translated;
        }
        Action::CommitEntry(item) => {
            let duplicate = state.history.iter().any(|existing| {
                existing.source == item.source && existing.translated == item.translated
            });
            if !duplicate {
                state.history.insert(0, item);
            }
        }
        Action::RemoveEntry { id } => {
            state.history.retain(|item| item.id != id);
        }
        Action::ClearHistory => {
            state.history.clear();
        }
        Action::ToggleTheme => {
            state.is_dark_mode = !state.is_dark_mode;
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, source: &str, translated: &str) -> HistoryItem {
        HistoryItem {
            id: id.to_string(),
            source: source.to_string(),
            translated: translated.to_string(),
            timestamp: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_set_source_text() {
        let state = reduce(
            SessionState::default(),
            Action::SetSourceText {
                source: "Hello".to_string(),
                translated: "ʜᴇʟʟᴏ".to_string(),
            },
        );
        assert_eq!(state.source_text, "Hello");
        assert_eq!(state.translated_text, "ʜᴇʟʟᴏ");
        assert!(state.history.is_empty());
    }

    #[test]
    fn test_commit_inserts_newest_first() {
        let state = reduce(
            SessionState::default(),
            Action::CommitEntry(entry("1", "one", "ᴏɴᴇ")),
        );
        let state = reduce(state, Action::CommitEntry(entry("2", "two", "ᴛᴡᴏ")));
        assert_eq!(state.history.len(), 2);
        assert_eq!(state.history[0].id, "2");
        assert_eq!(state.history[1].id, "1");
    }

    #[test]
    fn test_commit_drops_duplicate_pairs() {
        let state = reduce(
            SessionState::default(),
            Action::CommitEntry(entry("1", "hello", "ʜᴇʟʟᴏ")),
        );
        // Same pair under a different id and timestamp is still a duplicate.
        let state = reduce(state, Action::CommitEntry(entry("2", "hello", "ʜᴇʟʟᴏ")));
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.history[0].id, "1");

        // A different translation of the same source is not.
        let state = reduce(state, Action::CommitEntry(entry("3", "hello", "other")));
        assert_eq!(state.history.len(), 2);
    }

    #[test]
    fn test_remove_entry() {
        let state = reduce(
            SessionState::default(),
            Action::CommitEntry(entry("1", "one", "ᴏɴᴇ")),
        );
        let state = reduce(state, Action::CommitEntry(entry("2", "two", "ᴛᴡᴏ")));

        // Unknown id leaves the history unchanged.
        let state = reduce(
            state,
            Action::RemoveEntry {
                id: "missing".to_string(),
            },
        );
        assert_eq!(state.history.len(), 2);

        let state = reduce(state, Action::RemoveEntry { id: "1".to_string() });
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.history[0].id, "2");
    }

    #[test]
    fn test_clear_history() {
        let state = reduce(
            SessionState::default(),
            Action::CommitEntry(entry("1", "one", "ᴏɴᴇ")),
        );
        let state = reduce(state, Action::ClearHistory);
        assert!(state.history.is_empty());
        // Clearing an empty history is a no-op, not an error.
        let state = reduce(state, Action::ClearHistory);
        assert!(state.history.is_empty());
    }

    #[test]
    fn test_toggle_theme() {
        let state = reduce(SessionState::default(), Action::ToggleTheme);
        assert!(state.is_dark_mode);
        let state = reduce(state, Action::ToggleTheme);
        assert!(!state.is_dark_mode);
    }

    #[test]
    fn test_persisted_subset_excludes_text_fields() {
        let mut state = SessionState::default();
        state.is_dark_mode = true;
        state.source_text = "typed".to_string();
        state.translated_text = "ᴛʏᴘᴇᴅ".to_string();
        state.history.push(entry("1", "typed", "ᴛʏᴘᴇᴅ"));

        let restored = SessionState::from_persisted(state.persisted());
        assert!(restored.is_dark_mode);
        assert_eq!(restored.history, state.history);
        assert_eq!(restored.source_text, "");
        assert_eq!(restored.translated_text, "");
    }

    #[test]
    fn test_persisted_state_json_field_names() {
        let persisted = PersistedState {
            is_dark_mode: true,
            history: vec![entry("1", "one", "ᴏɴᴇ")],
        };
        let json = serde_json::to_string(&persisted).unwrap();
        assert!(json.contains("\"isDarkMode\":true"));
        assert!(json.contains("\"timestamp\":1700000000000"));

        let back: PersistedState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, persisted);
    }
}
