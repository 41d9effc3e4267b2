use crate::creature::Creature;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

/// Value copy of a creature's combat stats. Battles only ever touch these,
/// so the creatures they were built from stay untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct BattleUnit {
    pub name: String,
    pub atk: u32,
    pub def: u32,
    pub hp: i64,
    /// Hp when the battle started; the denominator for the round-cap decision.
    pub starting_hp: i64,
}

impl BattleUnit {
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

impl From<&Creature> for BattleUnit {
    fn from(creature: &Creature) -> Self {
        let hp = creature.hp() as i64;
        Self {
            name: creature.name.clone(),
            atk: creature.atk(),
            def: creature.def(),
            hp,
            starting_hp: hp,
        }
    }
}

/// Result of one battle.
#[derive(Debug, Clone)]
pub struct BattleOutcome {
    pub winner: Side,
    pub rounds: u32,
    /// Decided by remaining-hp comparison at the round cap.
    pub timed_out: bool,
    /// Blow-by-blow lines, in order.
    pub log: Vec<String>,
}

impl BattleOutcome {
    pub fn player_won(&self) -> bool {
        self.winner == Side::Player
    }
}
