//! Console interaction used by the resolver.
//!
//! `ConsolePrompter` talks to the controlling terminal through rustyline;
//! listings go to stderr so stdout carries only the JSON result.
//! `ScriptedPrompter` (tests and the `testing` feature) replays canned answers.

#[cfg(any(test, feature = "testing"))]
use std::collections::VecDeque;

use rustyline::config::{Behavior, Config};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use ceos_core::{ScrapeError, ScrapeResult};

/// Line-oriented user interaction.
pub trait Prompter {
    /// Clear the screen before a new set of choices.
    fn clear(&mut self);
    /// Show one line of output.
    fn say(&mut self, line: &str);
    /// Show `prompt` and read one line of input.
    fn ask(&mut self, prompt: &str) -> ScrapeResult<String>;
}

/// Terminal prompter backed by a rustyline editor.
pub struct ConsolePrompter {
    editor: DefaultEditor,
    clear_screen: bool,
}

impl ConsolePrompter {
    pub fn new(clear_screen: bool) -> ScrapeResult<Self> {
        let editor = DefaultEditor::with_config(editor_config())
            .map_err(|e| ScrapeError::Prompt(format!("cannot open console: {e}")))?;
        Ok(Self {
            editor,
            clear_screen,
        })
    }
}

/// Prompts and echo go to the tty, never to stdout, which may be redirected.
fn editor_config() -> Config {
    Config::builder().behavior(Behavior::PreferTerm).build()
}

impl Prompter for ConsolePrompter {
    fn clear(&mut self) {
        if self.clear_screen {
            eprint!("\x1b[2J\x1b[H");
        }
    }

    fn say(&mut self, line: &str) {
        eprintln!("{line}");
    }

    fn ask(&mut self, prompt: &str) -> ScrapeResult<String> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(line),
            Err(ReadlineError::Interrupted) => Err(ScrapeError::Prompt("interrupted".into())),
            Err(ReadlineError::Eof) => Err(ScrapeError::Prompt("input closed".into())),
            Err(e) => Err(ScrapeError::Prompt(e.to_string())),
        }
    }
}

/// Replays fixed answers and records everything shown.
#[cfg(any(test, feature = "testing"))]
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    /// Lines said and prompts asked, in order.
    pub transcript: Vec<String>,
    /// Number of screen clears requested.
    pub clears: usize,
}

#[cfg(any(test, feature = "testing"))]
impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Number of prompts answered so far.
    pub fn asked(&self) -> usize {
        self.transcript
            .iter()
            .filter(|line| line.starts_with("? "))
            .count()
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

#[cfg(any(test, feature = "testing"))]
impl Prompter for ScriptedPrompter {
    fn clear(&mut self) {
        self.clears += 1;
    }

    fn say(&mut self, line: &str) {
        self.transcript.push(line.to_string());
    }

    fn ask(&mut self, prompt: &str) -> ScrapeResult<String> {
        self.transcript.push(format!("? {prompt}"));
        self.answers
            .pop_front()
            .ok_or_else(|| ScrapeError::Prompt(format!("no scripted answer for: {prompt}")))
    }
}
