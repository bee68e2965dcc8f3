use std::fmt;

use crate::core::action::Action;
use crate::core::key::{KeyError, NavKey, Tabs};

pub const HELP: &str = "\
commands:
  tab <Name>          switch to a tab (one of the bottom bar)
  push <Name[:arg]>   open a page on the current tab
  back                go back one page
  show                print the current stack
  help                this text
  quit                leave";

/// One line of host input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Passed to core::update
    Navigate(Action<NavKey>),

    // Handled by the driver
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Unknown(String),
    MissingArgument(&'static str),
    UnexpectedArgument(&'static str),
    UnknownTab(String),
    /// `push` with a tab name; tabs are selected, not pushed.
    TabPushed(String),
    Key(KeyError),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Unknown(word) => write!(f, "unknown command '{word}' (try 'help')"),
            CommandError::MissingArgument(cmd) => write!(f, "'{cmd}' needs a destination"),
            CommandError::UnexpectedArgument(cmd) => write!(f, "'{cmd}' takes no argument"),
            CommandError::UnknownTab(name) => write!(f, "'{name}' is not a tab"),
            CommandError::TabPushed(name) => write!(f, "'{name}' is a tab; use 'tab {name}'"),
            CommandError::Key(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<KeyError> for CommandError {
    fn from(e: KeyError) -> Self {
        CommandError::Key(e)
    }
}

/// Parses one input line. Blank lines and `#` comments yield `Ok(None)`.
pub fn parse(line: &str, tabs: &Tabs) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "tab" | "t" => {
            let key = tabs.key(required(rest, "tab")?)?;
            if !key.is_section() {
                return Err(CommandError::UnknownTab(key.to_string()));
            }
            Command::Navigate(Action::SelectTab(key))
        }
        "push" | "p" => {
            let key = tabs.key(required(rest, "push")?)?;
            if key.is_section() {
                return Err(CommandError::TabPushed(key.to_string()));
            }
            Command::Navigate(Action::Open(key))
        }
        "back" | "b" => no_argument(rest, "back", Command::Navigate(Action::Back))?,
        "show" | "s" => no_argument(rest, "show", Command::Show)?,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => return Err(CommandError::Unknown(word.to_string())),
    };
    Ok(Some(command))
}

fn required<'a>(rest: &'a str, cmd: &'static str) -> Result<&'a str, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument(cmd))
    } else {
        Ok(rest)
    }
}

fn no_argument(rest: &str, cmd: &'static str, command: Command) -> Result<Command, CommandError> {
    if rest.is_empty() {
        Ok(command)
    } else {
        Err(CommandError::UnexpectedArgument(cmd))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{chat_detail, chat_list};

    fn parse_default(line: &str) -> Result<Option<Command>, CommandError> {
        parse(line, &Tabs::default())
    }

    #[test]
    fn test_blank_and_comment_lines_are_skipped() {
        assert_eq!(parse_default(""), Ok(None));
        assert_eq!(parse_default("   "), Ok(None));
        assert_eq!(parse_default("# open the chat"), Ok(None));
    }

    #[test]
    fn test_tab_command() {
        assert_eq!(
            parse_default("tab ChatList"),
            Ok(Some(Command::Navigate(Action::SelectTab(chat_list()))))
        );
        assert_eq!(
            parse_default("T   ChatList  "),
            Ok(Some(Command::Navigate(Action::SelectTab(chat_list()))))
        );
    }

    #[test]
    fn test_tab_rejects_non_tabs() {
        assert_eq!(
            parse_default("tab ChatDetail"),
            Err(CommandError::UnknownTab("ChatDetail".to_string()))
        );
        assert_eq!(parse_default("tab"), Err(CommandError::MissingArgument("tab")));
    }

    #[test]
    fn test_push_command() {
        assert_eq!(
            parse_default("push ChatDetail"),
            Ok(Some(Command::Navigate(Action::Open(chat_detail()))))
        );
        assert_eq!(
            parse_default("p RouteB:42"),
            Ok(Some(Command::Navigate(Action::Open(NavKey::leaf_with(
                "RouteB", "42"
            )))))
        );
    }

    #[test]
    fn test_push_rejects_tabs() {
        let err = parse_default("push Home").unwrap_err();
        assert_eq!(err, CommandError::TabPushed("Home".to_string()));
        assert_eq!(err.to_string(), "'Home' is a tab; use 'tab Home'");
    }

    #[test]
    fn test_push_surfaces_key_errors() {
        assert_eq!(
            parse_default("push :7"),
            Err(CommandError::Key(KeyError::MissingName(":7".to_string())))
        );
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(
            parse_default("back"),
            Ok(Some(Command::Navigate(Action::Back)))
        );
        assert_eq!(parse_default("show"), Ok(Some(Command::Show)));
        assert_eq!(parse_default("help"), Ok(Some(Command::Help)));
        assert_eq!(parse_default("exit"), Ok(Some(Command::Quit)));
        assert_eq!(
            parse_default("back twice"),
            Err(CommandError::UnexpectedArgument("back"))
        );
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            parse_default("jump Home"),
            Err(CommandError::Unknown("jump".to_string()))
        );
    }
}
