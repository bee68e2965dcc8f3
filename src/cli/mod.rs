//! # Command-Line Host
//!
//! Stands in for the UI event-handling layer: reads one command per line,
//! turns it into an `Action`, applies it through `core::update`, and prints
//! the resulting tab bar and flattened stack.
//!
//! ```text
//! stdin / --script ─► command::parse ─► Session::apply ─► view::write_snapshot ─► stdout
//!                                            │
//!                                            └─► Transcript (--record)
//! ```
//!
//! Input ends the session on `quit`, end of input, or `back` with nothing
//! left behind the current screen.

pub mod command;
pub mod view;

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use log::{debug, info, warn};

use crate::OutputFormat;
use crate::core::action::{Action, Outcome, update};
use crate::core::back_stack::TopLevelBackStack;
use crate::core::config::ResolvedConfig;
use crate::core::key::{NavKey, Tabs};
use crate::core::transcript::Transcript;
use command::Command;

/// One navigation surface: the back stack plus what the host needs around it.
pub struct Session {
    pub stack: TopLevelBackStack<NavKey>,
    pub tabs: Tabs,
    pub format: OutputFormat,
    pub transcript: Option<Transcript>,
}

impl Session {
    pub fn new(config: &ResolvedConfig) -> Self {
        let start = NavKey::section(config.start_section.as_str());
        let mut stack = TopLevelBackStack::new(start);
        stack.subscribe(|snapshot| {
            let stack: Vec<String> = snapshot.stack.iter().map(ToString::to_string).collect();
            debug!("Back stack now [{}]", stack.join(", "));
        });
        Self {
            stack,
            tabs: config.tabs.clone(),
            format: config.output,
            transcript: None,
        }
    }

    /// Starts recording every applied action.
    pub fn with_transcript(mut self) -> Self {
        let start = self.stack.flattened().first().cloned();
        self.transcript = start.map(Transcript::new);
        self
    }

    pub fn apply(&mut self, action: Action<NavKey>) -> Outcome {
        let label = action.to_string();
        let outcome = update(&mut self.stack, action);
        if let Some(transcript) = &mut self.transcript {
            transcript.record(label, outcome, self.stack.flattened());
        }
        outcome
    }

    fn show<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        view::write_snapshot(writer, self.format, &self.tabs, &self.stack.snapshot())
    }
}

/// Runs the read/apply/print loop until quit, end of input, or exit.
///
/// Lines that are not valid UTF-8 are reported like any other bad input.
pub fn run_session<R: BufRead, W: Write>(
    session: &mut Session,
    mut reader: R,
    writer: &mut W,
) -> io::Result<()> {
    session.show(writer)?;

    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line,
            Err(e) => {
                warn!("Rejected input line: {}", e);
                view::write_error(writer, session.format, &e)?;
                writer.flush()?;
                continue;
            }
        };

        match command::parse(line, &session.tabs) {
            Ok(None) => continue,
            Ok(Some(Command::Quit)) => break,
            Ok(Some(Command::Help)) => writeln!(writer, "{}", command::HELP)?,
            Ok(Some(Command::Show)) => session.show(writer)?,
            Ok(Some(Command::Navigate(action))) => {
                if session.apply(action) == Outcome::Exit {
                    view::write_exit(writer, session.format)?;
                    break;
                }
                session.show(writer)?;
            }
            Err(e) => {
                warn!("Rejected input '{}': {}", line.trim(), e);
                view::write_error(writer, session.format, &e)?;
            }
        }
        writer.flush()?;
    }

    Ok(())
}

/// Entry point for the binary: wires stdin or a script file to stdout.
pub fn run(config: &ResolvedConfig, script: Option<&Path>, record: Option<&Path>) -> io::Result<()> {
    let mut session = Session::new(config);
    if record.is_some() {
        session = session.with_transcript();
    }

    let stdout = io::stdout();
    let mut writer = stdout.lock();

    let result = match script {
        Some(path) => {
            info!("Reading commands from {}", path.display());
            File::open(path)
                .and_then(|file| run_session(&mut session, BufReader::new(file), &mut writer))
        }
        None => {
            let stdin = io::stdin();
            run_session(&mut session, stdin.lock(), &mut writer)
        }
    };
    if let Err(e) = &result {
        warn!("Session ended early: {}", e);
    }

    // Whatever was applied before a failure is still worth keeping
    if let (Some(path), Some(transcript)) = (record, &session.transcript) {
        transcript.save(path)?;
        info!(
            "Recorded {} actions ({} navigations) to {}",
            transcript.entries.len(),
            transcript.navigations(),
            path.display()
        );
    }

    result
}
