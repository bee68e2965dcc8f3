//! Plain-text and JSON-lines views of a back stack snapshot.
//!
//! ```text
//! [Home]  ChatList  Camera | Home > ChatDetail
//! {"active":"Home","stack":["Home","ChatDetail"],"back_steps":1}
//! ```

use std::io::{self, Write};

use serde::Serialize;

use crate::OutputFormat;
use crate::core::back_stack::Snapshot;
use crate::core::key::{NavKey, Tabs};

#[derive(Serialize)]
struct StackView {
    active: Option<String>,
    stack: Vec<String>,
    back_steps: usize,
}

impl From<&Snapshot<NavKey>> for StackView {
    fn from(snapshot: &Snapshot<NavKey>) -> Self {
        Self {
            active: snapshot.active.as_ref().map(ToString::to_string),
            stack: snapshot.stack.iter().map(ToString::to_string).collect(),
            back_steps: snapshot.back_steps(),
        }
    }
}

/// Bottom bar with the active tab bracketed.
pub fn tab_bar(tabs: &Tabs, active: Option<&NavKey>) -> String {
    tabs.names()
        .iter()
        .map(|name| {
            if active.is_some_and(|key| key.is_section() && key.name() == name.as_str()) {
                format!("[{name}]")
            } else {
                name.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn write_snapshot<W: Write>(
    writer: &mut W,
    format: OutputFormat,
    tabs: &Tabs,
    snapshot: &Snapshot<NavKey>,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            let stack = snapshot
                .stack
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" > ");
            writeln!(writer, "{} | {}", tab_bar(tabs, snapshot.active.as_ref()), stack)
        }
        OutputFormat::Json => write_json(writer, &StackView::from(snapshot)),
    }
}

pub fn write_error<W: Write>(
    writer: &mut W,
    format: OutputFormat,
    error: &dyn std::error::Error,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => writeln!(writer, "error: {error}"),
        OutputFormat::Json => write_json(writer, &serde_json::json!({ "error": error.to_string() })),
    }
}

pub fn write_exit<W: Write>(writer: &mut W, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Text => writeln!(writer, "exit"),
        OutputFormat::Json => write_json(writer, &serde_json::json!({ "exit": true })),
    }
}

fn write_json<W: Write, T: Serialize>(writer: &mut W, value: &T) -> io::Result<()> {
    let line = serde_json::to_string(value).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{line}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{camera, chat_detail, chat_list, home, test_stack};

    fn render(format: OutputFormat, snapshot: &Snapshot<NavKey>) -> String {
        let mut out = Vec::new();
        write_snapshot(&mut out, format, &Tabs::default(), snapshot).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_tab_bar_brackets_active_tab() {
        let tabs = Tabs::default();
        assert_eq!(tab_bar(&tabs, Some(&camera())), "Home  ChatList  [Camera]");
        assert_eq!(tab_bar(&tabs, None), "Home  ChatList  Camera");
    }

    #[test]
    fn test_tab_bar_ignores_leaf_with_tab_name() {
        let tabs = Tabs::default();
        assert_eq!(tab_bar(&tabs, Some(&NavKey::leaf("Home"))), "Home  ChatList  Camera");
    }

    #[test]
    fn test_text_view() {
        let mut stack = test_stack();
        stack.switch_to_section(chat_list());
        stack.push(chat_detail());
        assert_eq!(
            render(OutputFormat::Text, &stack.snapshot()),
            "Home  [ChatList]  Camera | Home > ChatList > ChatDetail\n"
        );
    }

    #[test]
    fn test_json_view() {
        let mut stack = test_stack();
        stack.push(NavKey::leaf_with("RouteB", "42"));
        let line = render(OutputFormat::Json, &stack.snapshot());
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["active"], "Home");
        assert_eq!(value["stack"], serde_json::json!(["Home", "RouteB:42"]));
        assert_eq!(value["back_steps"], 1);
        assert_eq!(stack.active_section(), Some(&home()));
    }

    #[test]
    fn test_json_error_and_exit_lines() {
        let mut out = Vec::new();
        let err = crate::core::key::KeyError::Empty;
        write_error(&mut out, OutputFormat::Json, &err).unwrap();
        write_exit(&mut out, OutputFormat::Json).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec![r#"{"error":"empty destination"}"#, r#"{"exit":true}"#]);
    }
}
