//! Player commands
//!
//! The front end decodes raw events (mouse clicks, key presses, window close)
//! into [`Command`]s and queues them. The simulation drains the queue once per
//! frame.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// A single decoded player request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Fire from the emitter toward a screen position
    Fire { x: i32, y: i32 },
    /// Throw away the current level and generate a new one
    Restart,
    /// Leave the game
    Quit,
}

/// Anything that can be polled for pending commands
pub trait InputSource {
    /// Next pending command, or `None` once this frame's input is drained
    fn poll(&mut self) -> Option<Command>;
}

/// FIFO of commands waiting to be applied
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    pending: VecDeque<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.pending.push_back(command);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl InputSource for CommandQueue {
    fn poll(&mut self) -> Option<Command> {
        self.pending.pop_front()
    }
}

impl FromIterator<Command> for CommandQueue {
    fn from_iter<T: IntoIterator<Item = Command>>(iter: T) -> Self {
        Self {
            pending: iter.into_iter().collect(),
        }
    }
}
