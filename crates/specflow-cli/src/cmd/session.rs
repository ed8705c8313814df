//! Line-oriented session over one in-memory store.
//!
//! Each input line is one command (`new`, `open`, `start`, ...). A failing
//! command prints `error: ...` and the session carries on; only I/O errors
//! on the output end it.

use crate::cmd::{servers, spec, task};
use anyhow::Context;
use clap::{Parser, Subcommand};
use specflow_core::{config::Config, types::DocumentKind, SpecStore};
use std::io::{BufRead, Write};

#[derive(Parser)]
#[command(name = "specflow", no_binary_name = true, disable_version_flag = true)]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

#[derive(Subcommand)]
enum SessionCommand {
    /// Generate a specification from a feature description and open it
    New {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        prompt: Vec<String>,
    },
    /// List specifications (* marks the open one)
    List,
    /// Open a specification by id
    Open { id: String },
    /// Close the open specification
    Close,
    /// Print the documents of the open specification
    Show {
        /// requirements, design or tasks (default: all three)
        doc: Option<DocumentKind>,
    },
    /// List tasks of the open specification
    Tasks,
    /// Move a pending task to in-progress
    Start { task_id: u32 },
    /// Move an in-progress task to completed
    Complete { task_id: u32 },
    /// Move a task to the given status
    Advance { task_id: u32, status: String },
    /// Show the first unfinished task
    Next,
    /// Summarize the open specification
    Status,
    /// List configured tool servers
    Servers,
    /// End the session
    #[command(alias = "exit")]
    Quit,
}

enum Flow {
    Continue,
    Quit,
}

pub struct Session {
    store: SpecStore,
    json: bool,
}

impl Session {
    pub fn new(config: Config, json: bool) -> Self {
        Self {
            store: SpecStore::new(config),
            json,
        }
    }

    pub fn store(&self) -> &SpecStore {
        &self.store
    }

    /// Run commands from `input` until it is exhausted or `quit` is read.
    pub fn run<R: BufRead>(
        &mut self,
        input: R,
        out: &mut dyn Write,
        interactive: bool,
    ) -> anyhow::Result<()> {
        if interactive {
            prompt(out)?;
        }
        for line in input.lines() {
            let line = line.context("failed to read input")?;
            if let Flow::Quit = self.execute(&line, out)? {
                break;
            }
            if interactive {
                prompt(out)?;
            }
        }
        Ok(())
    }

    /// Execute a single command line.
    fn execute(&mut self, line: &str, out: &mut dyn Write) -> anyhow::Result<Flow> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Flow::Continue);
        }

        let parsed = match SessionLine::try_parse_from(line.split_whitespace()) {
            Ok(parsed) => parsed,
            Err(e) => {
                // Covers `help` as well as malformed commands.
                write!(out, "{}", e.render())?;
                return Ok(Flow::Continue);
            }
        };

        tracing::debug!(command = line, "session command");
        let json = self.json;
        let store = &mut self.store;
        let result = match parsed.command {
            // Take the prompt verbatim so runs of whitespace survive tokenizing.
            SessionCommand::New { prompt } => {
                let joined = prompt.join(" ");
                spec::create(store, remainder(line).unwrap_or(&joined), out, json)
            }
            SessionCommand::List => spec::list(store, out, json),
            SessionCommand::Open { id } => spec::open(store, &id, out, json),
            SessionCommand::Close => spec::close(store, out, json),
            SessionCommand::Show { doc } => spec::show(store, doc, out, json),
            SessionCommand::Tasks => task::list(store, out, json),
            SessionCommand::Start { task_id } => task::start(store, task_id, out, json),
            SessionCommand::Complete { task_id } => task::complete(store, task_id, out, json),
            SessionCommand::Advance { task_id, status } => {
                task::advance(store, task_id, &status, out, json)
            }
            SessionCommand::Next => task::next(store, out, json),
            SessionCommand::Status => spec::status(store, out, json),
            SessionCommand::Servers => servers::run(store.config(), out, json),
            SessionCommand::Quit => return Ok(Flow::Quit),
        };

        if let Err(e) = result {
            writeln!(out, "error: {e:#}")?;
        }
        Ok(Flow::Continue)
    }
}

/// Everything after the command word, untouched.
fn remainder(line: &str) -> Option<&str> {
    line.split_once(char::is_whitespace).map(|(_, rest)| rest.trim())
}

fn prompt(out: &mut dyn Write) -> anyhow::Result<()> {
    write!(out, "specflow> ")?;
    out.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
