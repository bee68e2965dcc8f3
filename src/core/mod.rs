//! # Core Navigation Logic
//!
//! This module contains tabstack's navigation model.
//! It knows nothing about how screens are drawn.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • TopLevelBackStack    │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    CLI     │      │  Tab bar   │      │ Transcript │
//!     │   driver   │      │   host     │      │  (debug)   │
//!     │  (stdin)   │      │  (future)  │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`back_stack`]: `TopLevelBackStack`, per-tab histories behind one flattened stack
//! - [`key`]: `NavKey` and the `Tabs` registry that tells sections from leaves
//! - [`action`]: the `Action` enum and the `update()` reducer
//! - [`config`]: layered settings (defaults → file → env → CLI)
//! - [`transcript`]: JSON record of what a session did

pub mod action;
pub mod back_stack;
pub mod config;
pub mod key;
pub mod transcript;

pub use action::{Action, Outcome, update};
pub use back_stack::{PopError, Snapshot, TopLevelBackStack};
pub use key::{KeyError, NavKey, Tabs};
