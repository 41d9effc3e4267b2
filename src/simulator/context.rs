//! Mutable state of one run, owned by the progression controller and lent
//! to each stage for the duration of a call.

use super::report::ResultAggregator;
use crate::core::PlayerState;

#[derive(Debug)]
pub struct RunContext {
    pub player: PlayerState,
    pub results: ResultAggregator,
    /// Narrative lines not yet handed to the observer, oldest first.
    pub messages: Vec<String>,
}

impl RunContext {
    pub fn new(player: PlayerState) -> Self {
        Self {
            player,
            results: ResultAggregator::new(),
            messages: Vec::new(),
        }
    }

    pub fn log(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn take_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }
}
