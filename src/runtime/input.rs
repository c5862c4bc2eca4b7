//! Discrete navigation events and the sources that produce them.

use std::{
    collections::VecDeque,
    io::BufRead,
    sync::mpsc::{self, Receiver, TryRecvError},
    thread,
};

use crate::foundation::error::{ShowError, ShowResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    Accept,
    Back,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum InputEvent {
    Press(Button),
    Release(Button),
    Quit,
}

/// Non-blocking event source polled once per loop iteration.
pub trait InputSource {
    /// Append every pending event to `out` without blocking.
    fn poll(&mut self, out: &mut Vec<InputEvent>);
}

/// Source that never produces events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoInput;

impl InputSource for NoInput {
    fn poll(&mut self, _out: &mut Vec<InputEvent>) {}
}

/// Pre-recorded batches, one per poll.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    batches: VecDeque<Vec<InputEvent>>,
}

impl ScriptedInput {
    pub fn new(batches: impl IntoIterator<Item = Vec<InputEvent>>) -> Self {
        Self {
            batches: batches.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.batches.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, out: &mut Vec<InputEvent>) {
        if let Some(batch) = self.batches.pop_front() {
            out.extend(batch);
        }
    }
}

/// Map one command line to events.
///
/// `up`, `down`, `left`, `right`, `a` and `b` press and release the button; `quit` quits.
/// Anything else non-empty counts as an unmapped button. Case and surrounding whitespace are
/// ignored.
pub fn parse_command(line: &str) -> Vec<InputEvent> {
    let word = line.trim().to_ascii_lowercase();
    let button = match word.as_str() {
        "" => return Vec::new(),
        "quit" => return vec![InputEvent::Quit],
        "up" => Button::Up,
        "down" => Button::Down,
        "left" => Button::Left,
        "right" => Button::Right,
        "a" => Button::Accept,
        "b" => Button::Back,
        _ => Button::Other,
    };
    vec![InputEvent::Press(button), InputEvent::Release(button)]
}

/// Commands read line by line from stdin on a background thread.
///
/// End of input only stops the reader; it does not quit.
pub struct StdinInput {
    rx: Receiver<Vec<InputEvent>>,
    closed: bool,
}

impl StdinInput {
    pub fn spawn() -> ShowResult<Self> {
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("imgshow-stdin".to_owned())
            .spawn(move || {
                let stdin = std::io::stdin();
                for line in stdin.lock().lines() {
                    let Ok(line) = line else {
                        break;
                    };
                    if tx.send(parse_command(&line)).is_err() {
                        return;
                    }
                }
                tracing::debug!("stdin closed");
            })
            .map_err(|e| ShowError::backend(format!("failed to spawn stdin reader: {e}")))?;
        Ok(Self { rx, closed: false })
    }
}

impl InputSource for StdinInput {
    fn poll(&mut self, out: &mut Vec<InputEvent>) {
        while !self.closed {
            match self.rx.try_recv() {
                Ok(events) => out.extend(events),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => self.closed = true,
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/input.rs"]
mod tests;
