//! Battle types and resolution.

pub mod logic;
pub mod types;

pub use logic::{calculate_damage, remaining_hp_fraction, resolve_battle};
pub use types::{BattleOutcome, BattleUnit, Side};
