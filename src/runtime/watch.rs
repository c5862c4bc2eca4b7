//! External process checks that end the loop.

use std::process::{Command, Stdio};

/// Answers whether some watched process is currently running.
pub trait ProcessProbe {
    fn is_running(&mut self) -> bool;
}

/// Runs `pgrep <name>`; a zero exit status means running.
#[derive(Clone, Debug)]
pub struct PgrepProbe {
    name: String,
}

impl PgrepProbe {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl ProcessProbe for PgrepProbe {
    fn is_running(&mut self) -> bool {
        match Command::new("pgrep")
            .arg(&self.name)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
        {
            Ok(status) => status.success(),
            Err(e) => {
                tracing::warn!(name = %self.name, error = %e, "failed to run pgrep");
                false
            }
        }
    }
}

/// Probe answering from a fixed script; the last answer repeats.
#[derive(Clone, Debug)]
pub struct ScriptedProbe {
    answers: Vec<bool>,
    calls: usize,
}

impl ScriptedProbe {
    pub fn new(answers: impl Into<Vec<bool>>) -> Self {
        Self {
            answers: answers.into(),
            calls: 0,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl ProcessProbe for ScriptedProbe {
    fn is_running(&mut self) -> bool {
        let answer = self
            .answers
            .get(self.calls)
            .or_else(|| self.answers.last())
            .copied()
            .unwrap_or(false);
        self.calls += 1;
        answer
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/watch.rs"]
mod tests;
