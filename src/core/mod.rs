//! Constants, errors and the mutable player state shared by every simulator stage.

pub mod constants;
pub mod error;
pub mod player_state;

pub use error::{SimError, SimResult};
pub use player_state::PlayerState;
