//! Progress and log sinks, plus cooperative cancellation.

use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// State at a day boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    /// 1-based chapter the player is on.
    pub chapter: usize,
    pub total_chapters: usize,
    pub day: u32,
    pub current_power: f64,
    pub required_power: f64,
    pub total_game_days: u64,
}

/// Receives a run's output as it happens.
///
/// `on_log` sees every narrative line in the order it was produced;
/// `on_progress` is called once per simulated day, after that day's lines.
pub trait SimObserver {
    fn on_progress(&mut self, _snapshot: &ProgressSnapshot) {}

    fn on_log(&mut self, _message: &str) {}
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl SimObserver for NullObserver {}

/// Adapts a pair of closures.
pub struct FnObserver<P, L> {
    progress: P,
    log: L,
}

impl<P, L> FnObserver<P, L>
where
    P: FnMut(&ProgressSnapshot),
    L: FnMut(&str),
{
    pub fn new(progress: P, log: L) -> Self {
        Self { progress, log }
    }
}

impl<P, L> SimObserver for FnObserver<P, L>
where
    P: FnMut(&ProgressSnapshot),
    L: FnMut(&str),
{
    fn on_progress(&mut self, snapshot: &ProgressSnapshot) {
        (self.progress)(snapshot)
    }

    fn on_log(&mut self, message: &str) {
        (self.log)(message)
    }
}

/// Keeps everything it is given.
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    pub snapshots: Vec<ProgressSnapshot>,
    pub lines: Vec<String>,
}

impl SimObserver for RecordingObserver {
    fn on_progress(&mut self, snapshot: &ProgressSnapshot) {
        self.snapshots.push(*snapshot);
    }

    fn on_log(&mut self, message: &str) {
        self.lines.push(message.to_string());
    }
}

/// Stop flag checked by the runner between days. Clones share the flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_token_shared_between_clones() {
        let token = CancelToken::new();
        let driver = token.clone();
        assert!(!token.is_cancelled());
        driver.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_fn_observer_forwards() {
        let mut days = 0;
        let mut lines = Vec::new();
        {
            let mut observer =
                FnObserver::new(|_: &ProgressSnapshot| days += 1, |m: &str| lines.push(m.to_string()));
            observer.on_log("hello");
            observer.on_progress(&ProgressSnapshot {
                chapter: 1,
                total_chapters: 1,
                day: 1,
                current_power: 0.0,
                required_power: 0.0,
                total_game_days: 1,
            });
        }
        assert_eq!(days, 1);
        assert_eq!(lines, ["hello"]);
    }
}
