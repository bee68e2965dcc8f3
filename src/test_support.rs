//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::back_stack::TopLevelBackStack;
use crate::core::key::NavKey;

pub fn home() -> NavKey {
    NavKey::section("Home")
}

pub fn chat_list() -> NavKey {
    NavKey::section("ChatList")
}

pub fn camera() -> NavKey {
    NavKey::section("Camera")
}

pub fn chat_detail() -> NavKey {
    NavKey::leaf("ChatDetail")
}

/// Creates a back stack rooted at Home, the demo's start tab.
pub fn test_stack() -> TopLevelBackStack<NavKey> {
    TopLevelBackStack::new(home())
}
