//! # Navigation Keys
//!
//! `NavKey` is what the back stack stores. Sections are the tab roots
//! (Home, ChatList, Camera); leaves are everything pushed on top of them,
//! optionally carrying a payload such as an id (`RouteB:42`).
//!
//! Which names are sections is decided by the `Tabs` registry, not by the
//! key text itself.

use std::fmt;

/// Tabs shown in the bottom bar when nothing else is configured.
pub const DEFAULT_TABS: &[&str] = &["Home", "ChatList", "Camera"];

/// Separates a leaf name from its payload in textual form.
const ARG_SEPARATOR: char = ':';

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NavKey {
    Section(String),
    Leaf { name: String, arg: Option<String> },
}

impl NavKey {
    pub fn section(name: impl Into<String>) -> Self {
        NavKey::Section(name.into())
    }

    pub fn leaf(name: impl Into<String>) -> Self {
        NavKey::Leaf {
            name: name.into(),
            arg: None,
        }
    }

    pub fn leaf_with(name: impl Into<String>, arg: impl Into<String>) -> Self {
        NavKey::Leaf {
            name: name.into(),
            arg: Some(arg.into()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            NavKey::Section(name) | NavKey::Leaf { name, .. } => name,
        }
    }

    pub fn is_section(&self) -> bool {
        matches!(self, NavKey::Section(_))
    }
}

impl fmt::Display for NavKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavKey::Section(name) | NavKey::Leaf { name, arg: None } => write!(f, "{name}"),
            NavKey::Leaf {
                name,
                arg: Some(arg),
            } => write!(f, "{name}{}{arg}", ARG_SEPARATOR),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    Empty,
    /// `:42` with nothing before the separator.
    MissingName(String),
    /// Tabs are plain roots and never carry a payload.
    SectionWithArg(String),
}

impl fmt::Display for KeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyError::Empty => write!(f, "empty destination"),
            KeyError::MissingName(token) => write!(f, "destination name missing in '{token}'"),
            KeyError::SectionWithArg(name) => write!(f, "tab '{name}' does not take an argument"),
        }
    }
}

impl std::error::Error for KeyError {}

/// Ordered set of section names (the bottom bar).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tabs {
    names: Vec<String>,
}

impl Default for Tabs {
    fn default() -> Self {
        Tabs::new(DEFAULT_TABS.iter().copied())
    }
}

impl Tabs {
    /// Builds the registry, dropping blanks and repeats but keeping order.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tabs = Tabs { names: Vec::new() };
        for name in names {
            tabs.ensure(name);
        }
        tabs
    }

    /// Adds `name` at the end unless it is blank or already present.
    pub fn ensure(&mut self, name: impl Into<String>) {
        let name = name.into().trim().to_string();
        if !name.is_empty() && !self.contains(&name) {
            self.names.push(name);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Resolves a textual destination into a key.
    ///
    /// Registered tab names become sections; anything else becomes a leaf,
    /// with the text after the first `:` as its payload.
    pub fn key(&self, token: &str) -> Result<NavKey, KeyError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(KeyError::Empty);
        }

        let (name, arg) = match token.split_once(ARG_SEPARATOR) {
            Some((name, arg)) => (name.trim(), Some(arg.trim())),
            None => (token, None),
        };
        if name.is_empty() {
            return Err(KeyError::MissingName(token.to_string()));
        }

        if self.contains(name) {
            return match arg {
                None => Ok(NavKey::section(name)),
                Some(_) => Err(KeyError::SectionWithArg(name.to_string())),
            };
        }

        Ok(match arg {
            Some(arg) => NavKey::leaf_with(name, arg),
            None => NavKey::leaf(name),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tabs() {
        let tabs = Tabs::default();
        assert_eq!(tabs.names(), &["Home", "ChatList", "Camera"]);
    }

    #[test]
    fn test_tabs_drop_blanks_and_repeats() {
        let tabs = Tabs::new(["Home", " ", "Camera", "Home", " Camera "]);
        assert_eq!(tabs.names(), &["Home", "Camera"]);
    }

    #[test]
    fn test_key_resolves_tab_to_section() {
        let tabs = Tabs::default();
        assert_eq!(tabs.key("ChatList"), Ok(NavKey::section("ChatList")));
        assert!(tabs.key(" Home ").unwrap().is_section());
    }

    #[test]
    fn test_key_resolves_other_names_to_leaves() {
        let tabs = Tabs::default();
        assert_eq!(tabs.key("ChatDetail"), Ok(NavKey::leaf("ChatDetail")));
        assert_eq!(tabs.key("RouteB:42"), Ok(NavKey::leaf_with("RouteB", "42")));
    }

    #[test]
    fn test_key_payload_keeps_later_separators() {
        let tabs = Tabs::default();
        assert_eq!(
            tabs.key("RouteB:a:b"),
            Ok(NavKey::leaf_with("RouteB", "a:b"))
        );
    }

    #[test]
    fn test_key_errors() {
        let tabs = Tabs::default();
        assert_eq!(tabs.key("   "), Err(KeyError::Empty));
        assert_eq!(
            tabs.key(":42"),
            Err(KeyError::MissingName(":42".to_string()))
        );
        assert_eq!(
            tabs.key("Home:1"),
            Err(KeyError::SectionWithArg("Home".to_string()))
        );
    }

    #[test]
    fn test_display_round_trips_through_tabs() {
        let tabs = Tabs::default();
        for key in [
            NavKey::section("Camera"),
            NavKey::leaf("ChatDetail"),
            NavKey::leaf_with("RouteB", "7"),
        ] {
            assert_eq!(tabs.key(&key.to_string()), Ok(key));
        }
    }

    #[test]
    fn test_leaf_with_payload_differs_from_bare_leaf() {
        assert_ne!(NavKey::leaf("RouteB"), NavKey::leaf_with("RouteB", "1"));
        assert_ne!(NavKey::leaf_with("RouteB", "1"), NavKey::leaf_with("RouteB", "2"));
        assert_eq!(NavKey::leaf_with("RouteB", "1").name(), "RouteB");
    }
}
