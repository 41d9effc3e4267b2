//! Combat strength scoring.
//!
//! Power drives chapter gating and enemy scaling, so every creature's cached
//! value is produced here and nowhere else.

use super::{Creature, StatWeights};

/// Score a stat line.
///
/// `sqrt(hp*hpW + atk*atkW + def*defW*hp)`. The defence term scales with hp
/// instead of being added on its own; balance numbers in existing content are
/// tuned against this shape.
pub fn calculate_power(hp: u32, atk: u32, def: u32, weights: &StatWeights) -> f64 {
    let hp = hp as f64;
    let atk = atk as f64;
    let def = def as f64;
    (hp * weights.hp + atk * weights.atk + def * weights.def * hp).sqrt()
}

/// Total power of a party (sum of members).
pub fn party_power(party: &[Creature]) -> f64 {
    party.iter().map(Creature::power).sum()
}

/// Round to two decimals for display.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
