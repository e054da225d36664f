//! Line-oriented console abstraction consumed by the acquisition engine.
//!
//! Every `acquire_*` operation prompts and reads through this trait, so the
//! same engine serves the interactive terminal and scripted (non-interactive)
//! hosts. A host whose input runs out surfaces `InputClosed`, the explicit
//! cancellation signal for an otherwise unbounded retry loop.

use crate::core::error::RegistrarError;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

pub trait Console {
    /// Print `prompt` without a trailing newline and read one line of input.
    /// Returns `InputClosed` when the input stream has ended.
    fn read_line(&mut self, prompt: &str) -> Result<String, RegistrarError>;

    /// Print a full line (validation feedback, option listings).
    fn say(&mut self, text: &str);
}

/// Interactive stdin/stdout console.
pub struct Terminal;

impl Console for Terminal {
    fn read_line(&mut self, prompt: &str) -> Result<String, RegistrarError> {
        print!("{}", prompt);
        io::stdout().flush().map_err(RegistrarError::Io)?;
        let mut buf = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut buf)
            .map_err(RegistrarError::Io)?;
        if read == 0 {
            return Err(RegistrarError::InputClosed);
        }
        Ok(buf.trim().to_string())
    }

    fn say(&mut self, text: &str) {
        println!("{}", text);
    }
}

/// Console fed from a fixed queue of lines, for tests and piped hosts.
/// Prompts and feedback lines are recorded for inspection.
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    pub prompts: Vec<String>,
    pub messages: Vec<String>,
}

impl ScriptedConsole {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            inputs: lines.iter().map(|l| l.to_string()).collect(),
            prompts: Vec::new(),
            messages: Vec::new(),
        }
    }

    /// True once every scripted line has been consumed.
    pub fn inputs_exhausted(&self) -> bool {
        self.inputs.is_empty()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> Result<String, RegistrarError> {
        self.prompts.push(prompt.to_string());
        self.inputs
            .pop_front()
            .map(|l| l.trim().to_string())
            .ok_or(RegistrarError::InputClosed)
    }

    fn say(&mut self, text: &str) {
        self.messages.push(text.to_string());
    }
}
