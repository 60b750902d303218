//! Application state and transitions
//!
//! `reduce` is a pure `(state, action) -> state` function. `Session` owns the
//! current state and writes the history through `HistoryStore` whenever a
//! transition changes it; if the write fails the transition is discarded.

use anyhow::Result;

use crate::history::{History, HistoryStore};
use crate::models::GeneratedContent;

/// State transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A generation request was submitted
    GenerationStarted,
    /// Content arrived (remote or fallback)
    Generated(GeneratedContent),
    /// Show a history entry by id (or id prefix)
    Select(String),
    /// Delete the history entry with exactly this id
    Remove(String),
    /// Delete all history
    ClearHistory,
}

/// Application state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    /// Past generations, newest first
    pub history: History,
    /// Content currently displayed
    pub current: Option<GeneratedContent>,
    /// Whether a generation is in flight
    pub loading: bool,
    /// Status message for the user
    pub status: Option<String>,
}

/// Apply `action` to `state`
pub fn reduce(mut state: AppState, action: Action) -> AppState {
    match action {
        Action::GenerationStarted => {
            state.loading = true;
            state.current = None;
            state.status = Some("Generating...".to_string());
        }
        Action::Generated(content) => {
            state.loading = false;
            state.history.push(content.clone());
            state.current = Some(content);
            state.status = None;
        }
        Action::Select(id) => match state.history.find(&id).cloned() {
            Some(content) => {
                state.current = Some(content);
                state.status = None;
            }
            None => state.status = Some(format!("No history entry matches '{id}'")),
        },
        Action::Remove(id) => {
            if state.history.remove(&id) {
                if state.current.as_ref().is_some_and(|c| c.id == id) {
                    state.current = None;
                }
                state.status = Some("Deleted".to_string());
            } else {
                state.status = Some(format!("No history entry matches '{id}'"));
            }
        }
        Action::ClearHistory => {
            state.history = History::default();
            state.current = None;
            state.status = Some("History cleared".to_string());
        }
    }
    state
}

/// State bound to its persistence
pub struct Session {
    state: AppState,
    store: HistoryStore,
}

impl Session {
    /// Start a session with the history loaded from `store`
    pub fn open(store: HistoryStore) -> Self {
        let state = AppState {
            history: store.load(),
            ..AppState::default()
        };
        Self { state, store }
    }

    /// Current state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Apply an action, persisting the history if it changed
    pub fn dispatch(&mut self, action: Action) -> Result<()> {
        let next = reduce(self.state.clone(), action);
        if next.history != self.state.history {
            self.store.persist(&next.history)?;
        }
        self.state = next;
        Ok(())
    }

    /// Record new content at the head of the history
    pub fn append(&mut self, content: GeneratedContent) -> Result<()> {
        self.dispatch(Action::Generated(content))
    }

    /// Delete the entry with exactly `id`. Unknown ids leave everything unchanged.
    pub fn remove(&mut self, id: &str) -> Result<()> {
        self.dispatch(Action::Remove(id.to_string()))
    }

    /// Delete all history
    pub fn clear(&mut self) -> Result<()> {
        self.dispatch(Action::ClearHistory)
    }
}
