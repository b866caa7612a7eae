//! The session store: owns the mutable state, runs the transform, and
//! debounces the history append.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::VerbosityLevel;
use crate::state::{Action, HistoryItem, PersistedState, SessionState, reduce};
use crate::storage::SessionStorage;
use crate::translator::translate;

/// Namespace key under which the persisted subset is stored.
pub const STORAGE_KEY: &str = "gen2-storage";

/// Quiet period after the last edit before a history entry is committed.
pub const HISTORY_DEBOUNCE: Duration = Duration::from_millis(1000);

/// Source of the current time, used for timestamps and id generation.
/// Tests substitute a fixed implementation.
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;
}

/// System wall clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// A translation session: the state container plus the debounced
/// history-append side effect.
///
/// Cloning is cheap and clones share the same state, so one can be handed
/// to each part of the UI. Construct it over a storage backend, chain
/// `with_*` configuration as needed, then call [`Session::restore`] once
/// before first use. Editing operations spawn the debounce task and must
/// run inside a Tokio runtime.
#[derive(Clone)]
pub struct Session {
    state: Arc<Mutex<SessionState>>,
    storage: Arc<dyn SessionStorage>,
    clock: Arc<dyn Clock>,
    debounce: Duration,
    verbosity: VerbosityLevel,
    pending: Arc<Mutex<Option<JoinHandle<()>>>>,
    sequence: Arc<AtomicU64>,
}

impl Session {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Session {
            state: Arc::new(Mutex::new(SessionState::default())),
            storage,
            clock: Arc::new(SystemClock),
            debounce: HISTORY_DEBOUNCE,
            verbosity: VerbosityLevel::Normal,
            pending: Arc::new(Mutex::new(None)),
            sequence: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_verbosity(mut self, verbosity: VerbosityLevel) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Load the persisted subset and merge it over the defaults. The text
    /// fields always start empty; a load failure leaves the defaults in
    /// place.
    pub async fn restore(&self) {
        match self.storage.load(STORAGE_KEY).await {
            Ok(Some(saved)) => {
                if self.verbosity >= VerbosityLevel::Verbose {
                    eprintln!(
                        "[session] Restored {} history entries from {}",
                        saved.history.len(),
                        self.storage.backend_name()
                    );
                }
                *self.state.lock() = SessionState::from_persisted(saved);
            }
            Ok(None) => {}
            Err(err) => {
                if self.verbosity >= VerbosityLevel::Normal {
                    eprintln!(
                        "[session] Could not restore state from {}: {}",
                        self.storage.backend_name(),
                        err
                    );
                }
            }
        }
    }

    /// Replace the source text, recompute the translation synchronously,
    /// and arm the debounced history append. Returns the translated text.
    pub fn set_source_text(&self, text: &str) -> String {
        let translated = translate(text);
        {
            let mut state = self.state.lock();
            *state = reduce(
                state.clone(),
                Action::SetSourceText {
                    source: text.to_owned(),
                    translated: translated.clone(),
                },
            );
        }
        self.schedule_history_append(text.to_owned(), translated.clone());
        translated
    }

    /// Arm the one-shot append timer, superseding any pending one.
    ///
    /// At most one append is ever in flight: arming aborts the previous
    /// task rather than queuing behind it. When the timer fires uncanceled
    /// and the trimmed source is non-empty, a history entry is committed
    /// unless an identical (source, translated) pair already exists.
    pub fn schedule_history_append(&self, source: String, translated: String) {
        let mut pending = self.pending.lock();
        if let Some(previous) = pending.take() {
            previous.abort();
            if self.verbosity >= VerbosityLevel::Verbose {
                eprintln!("[session] Superseded pending history append");
            }
        }

        let session = self.clone();
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(session.debounce).await;
            session.commit_history(source, translated).await;
        }));
    }

    async fn commit_history(&self, source: String, translated: String) {
        if source.trim().is_empty() {
            return;
        }
        let entry = HistoryItem {
            id: self.next_id(),
            timestamp: self.clock.now_millis(),
            source,
            translated,
        };
        let snapshot = {
            let mut state = self.state.lock();
            let before = state.history.len();
            *state = reduce(state.clone(), Action::CommitEntry(entry));
            (state.history.len() != before).then(|| state.persisted())
        };
        match snapshot {
            Some(snapshot) => self.persist(snapshot).await,
            None => {
                if self.verbosity >= VerbosityLevel::Verbose {
                    eprintln!("[session] Discarded duplicate history entry");
                }
            }
        }
    }

    fn next_id(&self) -> String {
        // Wall-clock millis alone can collide within one tick; the sequence
        // suffix keeps ids unique per session.
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", self.clock.now_millis(), sequence)
    }

    /// Remove one history entry by id; an unknown id leaves the history
    /// unchanged.
    pub async fn remove_history_item(&self, id: &str) {
        let snapshot = self.apply(Action::RemoveEntry { id: id.to_owned() });
        self.persist(snapshot).await;
    }

    /// Drop all history entries.
    pub async fn clear_history(&self) {
        let snapshot = self.apply(Action::ClearHistory);
        self.persist(snapshot).await;
    }

    /// Flip dark mode; returns the new value.
    pub async fn toggle_theme(&self) -> bool {
        let snapshot = self.apply(Action::ToggleTheme);
        let is_dark_mode = snapshot.is_dark_mode;
        self.persist(snapshot).await;
        is_dark_mode
    }

    fn apply(&self, action: Action) -> PersistedState {
        let mut state = self.state.lock();
        *state = reduce(state.clone(), action);
        state.persisted()
    }

    async fn persist(&self, snapshot: PersistedState) {
        if let Err(err) = self.storage.save(STORAGE_KEY, &snapshot).await {
            if self.verbosity >= VerbosityLevel::Normal {
                eprintln!(
                    "[session] Could not persist state to {}: {}",
                    self.storage.backend_name(),
                    err
                );
            }
        }
    }

    /// A point-in-time copy of the full state.
    pub fn snapshot(&self) -> SessionState {
        self.state.lock().clone()
    }

    pub fn history(&self) -> Vec<HistoryItem> {
        self.state.lock().history.clone()
    }

    pub fn translated_text(&self) -> String {
        self.state.lock().translated_text.clone()
    }

    pub fn is_dark_mode(&self) -> bool {
        self.state.lock().is_dark_mode
    }
}
