//! # Actions
//!
//! Everything a host can ask of the back stack becomes an `Action`.
//! User taps a tab? That's `Action::SelectTab(key)`.
//! A button opens a detail page? That's `Action::Open(key)`.
//! System back gesture? That's `Action::Back`.
//!
//! The `update()` function applies an action to the back stack and reports
//! what happened. No I/O here.
//!
//! ```text
//! TopLevelBackStack + Action  →  update()  →  Outcome
//! ```
//!
//! `update()` is also where the host guard lives: "back" on the lone
//! starting root is refused and reported as `Outcome::Exit`, so the stack
//! never reaches its terminal state through normal use.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::back_stack::TopLevelBackStack;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action<K> {
    SelectTab(K),
    Open(K),
    Back,
}

impl<K: fmt::Display> fmt::Display for Action<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::SelectTab(key) => write!(f, "tab {key}"),
            Action::Open(key) => write!(f, "push {key}"),
            Action::Back => write!(f, "back"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The back stack changed.
    Navigated,
    /// Re-selecting the tab already on top.
    Unchanged,
    /// Back was pressed with nothing behind the current screen; the host
    /// should leave the navigation surface.
    Exit,
}

pub fn update<K>(stack: &mut TopLevelBackStack<K>, action: Action<K>) -> Outcome
where
    K: Clone + PartialEq + fmt::Debug,
{
    debug!("Action: {:?}", action);
    match action {
        Action::SelectTab(key) => {
            if stack.is_top_section(&key) {
                return Outcome::Unchanged;
            }
            stack.switch_to_section(key);
            Outcome::Navigated
        }
        Action::Open(key) => {
            if stack.active_section().is_none() {
                warn!("Ignoring push of {:?}: no active section", key);
                return Outcome::Exit;
            }
            stack.push(key);
            Outcome::Navigated
        }
        Action::Back => {
            if stack.back_steps() == 0 {
                debug!("Back on last remaining entry, leaving");
                return Outcome::Exit;
            }
            match stack.pop() {
                Ok(_) => Outcome::Navigated,
                Err(e) => {
                    warn!("Back failed: {}", e);
                    Outcome::Exit
                }
            }
        }
    }
}
