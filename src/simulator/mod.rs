//! Chapter progression simulator.
//!
//! Plays a configured game from the first chapter to the last, one in-game
//! day at a time:
//! - each day draws 1-3 events from the active chapter (battles, treasure,
//!   shops, random encounters)
//! - at the end of a chapter the party's power decides completion; failures
//!   buy upgrades and retry the chapter
//! - every counter and time series lands in a [`SimulationResult`]
//!
//! [`run_simulation`] drives one run with an observer and a cancel token;
//! [`run_batch`] repeats seeded runs for balance analysis.

mod batch;
mod config;
mod context;
pub mod events;
pub mod export;
pub mod observer;
pub mod progression;
pub mod report;
mod runner;
pub mod upgrade;

pub use batch::{run_batch, BatchReport};
pub use config::{SimConfig, DEFAULT_MAX_GAME_DAYS};
pub use context::RunContext;
pub use observer::{
    CancelToken, FnObserver, NullObserver, ProgressSnapshot, RecordingObserver, SimObserver,
};
pub use progression::{DayReport, Phase, ProgressionController};
pub use report::{
    format_duration, format_mm_ss, BattleRecord, BattleResult, ChapterOutcome, ChapterRecord,
    PowerSample, ResultAggregator, RunStatus, SimulationResult, TimeBreakdown,
};
pub use runner::{make_rng, run_simulation, run_with_rng};
