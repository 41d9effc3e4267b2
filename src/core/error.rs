use std::io;
use thiserror::Error;

/// Failures that stop a simulation before it starts.
///
/// Anything that can go wrong *during* a run (lost battles, failed chapters,
/// unaffordable upgrades) is a normal game branch and never surfaces here.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("no chapters configured for simulation")]
    NoChapters,

    #[error("no pokemon configured for simulation")]
    EmptyRoster,

    #[error("failed to read configuration: {0}")]
    Io(#[from] io::Error),

    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SimResult<T> = Result<T, SimError>;
