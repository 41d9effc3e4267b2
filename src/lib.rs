//! Pokesim - chapter progression simulator library.
//!
//! Content (chapters, events, a creature roster) goes in; a day-by-day
//! simulated playthrough and its statistics come out.

pub mod build_info;
pub mod combat;
pub mod content;
pub mod core;
pub mod creature;
pub mod simulator;
