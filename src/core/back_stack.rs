//! # Top-Level Back Stack
//!
//! Independent navigation histories per top-level section (tab), presented
//! to the host as one linear back stack.
//!
//! ```text
//! sections (insertion order)            flattened
//! ├── Home     → [Home]                 [Home,
//! └── ChatList → [ChatList, ChatDetail]  ChatList, ChatDetail]
//!                                                   ▲ visible
//! ```
//!
//! Switching to a section moves it to the end of the insertion order, so its
//! pages sit above every other section's. Popping a section's root drops the
//! whole section and re-activates whichever section is now last. Only one
//! level of "previous tab" exists: the order of `sections` itself.
//!
//! The flattened view is rebuilt inside every mutation, before listeners run,
//! so nobody observes a stale stack.

use log::debug;
use std::fmt;

/// Callback invoked with the fresh snapshot after every mutation.
pub type Listener<K> = Box<dyn FnMut(&Snapshot<K>)>;

/// Owned, immutable copy of the navigation state at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot<K> {
    /// `None` only once the last section has been popped.
    pub active: Option<K>,
    pub stack: Vec<K>,
}

impl<K> Snapshot<K> {
    /// The visible entry.
    pub fn current(&self) -> Option<&K> {
        self.stack.last()
    }

    pub fn back_steps(&self) -> usize {
        self.stack.len().saturating_sub(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopError {
    /// No entries remain anywhere.
    Empty,
}

impl fmt::Display for PopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PopError::Empty => write!(f, "back stack is empty"),
        }
    }
}

impl std::error::Error for PopError {}

pub struct TopLevelBackStack<K> {
    /// Section key → history, in insertion order. Each history starts with its section key.
    sections: Vec<(K, Vec<K>)>,
    active: Option<K>,
    /// Concatenation of every history in `sections` order.
    stack: Vec<K>,
    listeners: Vec<Listener<K>>,
}

impl<K: Clone + PartialEq + fmt::Debug> TopLevelBackStack<K> {
    /// Starts a session with a single section rooted at `start`.
    pub fn new(start: K) -> Self {
        let mut back_stack = Self {
            sections: vec![(start.clone(), vec![start.clone()])],
            active: Some(start),
            stack: Vec::new(),
            listeners: Vec::new(),
        };
        back_stack.flatten();
        back_stack
    }

    /// Activates `key`, creating its section if unseen, and moves it to the
    /// end of the insertion order. An existing history is kept as is.
    pub fn switch_to_section(&mut self, key: K) {
        match self.position(&key) {
            Some(idx) => {
                let section = self.sections.remove(idx);
                self.sections.push(section);
                debug!("Switched to existing section {:?}", key);
            }
            None => {
                self.sections.push((key.clone(), vec![key.clone()]));
                debug!("Opened new section {:?}", key);
            }
        }
        self.active = Some(key);
        self.commit();
    }

    /// Appends `key` to the active section's history.
    ///
    /// Calling this with no active section is a logic fault: it panics in
    /// debug builds and does nothing in release builds.
    pub fn push(&mut self, key: K) {
        let Some(idx) = self.active_index() else {
            debug_assert!(false, "push({key:?}) without an active section");
            return;
        };
        debug!("Push {:?} onto {:?}", key, self.sections[idx].0);
        self.sections[idx].1.push(key);
        self.commit();
    }

    /// Removes and returns the newest entry of the active section.
    ///
    /// The section is dropped only when its history becomes empty, i.e. its
    /// root was popped. Popping a leaf that happens to equal the section key
    /// leaves the section in place. After a drop, the section now last in
    /// insertion order becomes active.
    pub fn pop(&mut self) -> Result<K, PopError> {
        let Some(idx) = self.active_index() else {
            return Err(PopError::Empty);
        };
        let Some(removed) = self.sections[idx].1.pop() else {
            return Err(PopError::Empty);
        };

        if self.sections[idx].1.is_empty() {
            let (section, _) = self.sections.remove(idx);
            debug!("Popped root of {:?}, section closed", section);
        } else {
            debug!("Popped {:?}", removed);
        }

        self.active = self.sections.last().map(|(key, _)| key.clone());
        self.commit();
        Ok(removed)
    }

    /// Registers a listener that receives a snapshot after every mutation.
    pub fn subscribe(&mut self, listener: impl FnMut(&Snapshot<K>) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn flattened(&self) -> &[K] {
        &self.stack
    }

    pub fn active_section(&self) -> Option<&K> {
        self.active.as_ref()
    }

    pub fn current(&self) -> Option<&K> {
        self.stack.last()
    }

    /// How many times "back" can be pressed before only one entry is left.
    pub fn back_steps(&self) -> usize {
        self.stack.len().saturating_sub(1)
    }

    /// True once every section has been popped away.
    pub fn is_terminal(&self) -> bool {
        self.sections.is_empty()
    }

    /// True when `key` is active and already last in insertion order,
    /// i.e. switching to it would change nothing.
    pub fn is_top_section(&self, key: &K) -> bool {
        self.active.as_ref() == Some(key)
            && self.sections.last().is_some_and(|(section, _)| section == key)
    }

    /// Sections and their histories in insertion order.
    pub fn sections(&self) -> impl Iterator<Item = (&K, &[K])> {
        self.sections
            .iter()
            .map(|(key, history)| (key, history.as_slice()))
    }

    pub fn history(&self, section: &K) -> Option<&[K]> {
        self.position(section)
            .map(|idx| self.sections[idx].1.as_slice())
    }

    pub fn snapshot(&self) -> Snapshot<K> {
        Snapshot {
            active: self.active.clone(),
            stack: self.stack.clone(),
        }
    }

    fn position(&self, key: &K) -> Option<usize> {
        self.sections.iter().position(|(section, _)| section == key)
    }

    fn active_index(&self) -> Option<usize> {
        let active = self.active.as_ref()?;
        let idx = self.position(active);
        debug_assert!(idx.is_some(), "active section {active:?} has no history");
        idx
    }

    fn flatten(&mut self) {
        self.stack = self
            .sections
            .iter()
            .flat_map(|(_, history)| history.iter().cloned())
            .collect();
    }

    fn commit(&mut self) {
        self.flatten();
        if self.listeners.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for listener in &mut self.listeners {
            listener(&snapshot);
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for TopLevelBackStack<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TopLevelBackStack")
            .field("sections", &self.sections)
            .field("active", &self.active)
            .field("stack", &self.stack)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
