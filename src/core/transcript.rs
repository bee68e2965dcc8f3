//! # Session Transcript
//!
//! Optional record of what a navigation session did: every action, its
//! outcome, and the flattened stack right after it. Written as one JSON file
//! when the session ends (`--record <file>`), for debugging a host's
//! navigation flow.
//!
//! A transcript is never fed back into a live back stack; navigation state
//! itself stays session-scoped.
//!
//! Writes use atomic rename (write `.tmp`, then `rename()`).

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use chrono::Utc;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::action::Outcome;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TranscriptEntry {
    /// Unix seconds.
    pub at: i64,
    pub action: String,
    pub outcome: Outcome,
    pub stack: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct Transcript {
    pub id: String,
    pub started_at: i64,
    pub start: String,
    pub entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new(start: impl fmt::Display) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            started_at: Utc::now().timestamp(),
            start: start.to_string(),
            entries: Vec::new(),
        }
    }

    pub fn record<K: fmt::Display>(&mut self, action: impl fmt::Display, outcome: Outcome, stack: &[K]) {
        self.entries.push(TranscriptEntry {
            at: Utc::now().timestamp(),
            action: action.to_string(),
            outcome,
            stack: stack.iter().map(ToString::to_string).collect(),
        });
    }

    /// Number of actions that actually moved the stack.
    pub fn navigations(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.outcome == Outcome::Navigated)
            .count()
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        atomic_write_json(path, self)?;
        debug!(
            "Transcript {} saved to {} ({} entries)",
            self.id,
            path.display(),
            self.entries.len()
        );
        Ok(())
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let json = fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

/// Atomically write `data` as JSON to `path` (via `.tmp` + rename).
fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::test_support::{chat_detail, chat_list, home, test_stack};

    #[test]
    fn test_record_captures_stack_text() {
        let mut stack = test_stack();
        let mut transcript = Transcript::new(home());

        let action = Action::Open(chat_detail());
        let label = action.to_string();
        let outcome = update(&mut stack, action);
        transcript.record(label, outcome, stack.flattened());

        assert_eq!(transcript.start, "Home");
        assert_eq!(transcript.entries.len(), 1);
        assert_eq!(transcript.entries[0].action, "push ChatDetail");
        assert_eq!(transcript.entries[0].outcome, Outcome::Navigated);
        assert_eq!(transcript.entries[0].stack, vec!["Home", "ChatDetail"]);
    }

    #[test]
    fn test_navigations_skips_unchanged_and_exit() {
        let mut transcript = Transcript::new(home());
        transcript.record("tab ChatList", Outcome::Navigated, &[home(), chat_list()]);
        transcript.record("tab ChatList", Outcome::Unchanged, &[home(), chat_list()]);
        transcript.record("back", Outcome::Navigated, &[home()]);
        transcript.record("back", Outcome::Exit, &[home()]);
        assert_eq!(transcript.navigations(), 2);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runs").join("session.json");

        let mut transcript = Transcript::new(home());
        transcript.record("tab Camera", Outcome::Navigated, &["Home", "Camera"]);
        transcript.save(&path).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());

        let loaded = Transcript::load(&path).unwrap();
        assert_eq!(loaded.id, transcript.id);
        assert_eq!(loaded.entries, transcript.entries);
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "not json").unwrap();
        let err = Transcript::load(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
