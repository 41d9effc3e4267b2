//! The player's side of a run: gold, party, inventory and position.

use crate::content::Item;
use crate::core::constants::{MAX_PARTY_SIZE, STARTING_GOLD};
use crate::creature::{party_power, Creature};

#[derive(Debug, Clone)]
pub struct PlayerState {
    pub gold: u64,
    /// Oldest member first.
    pub party: Vec<Creature>,
    pub inventory: Vec<Item>,
    /// 0-based chapter index.
    pub current_chapter: usize,
    /// 1-based day within the current chapter.
    pub current_day: u32,
    pub total_game_days: u64,
    pub pokemon_caught: u64,
    pub pokemon_evolved: u64,
}

impl PlayerState {
    /// Fresh player with the starting purse and one copy of `starter`.
    pub fn new(starter: &Creature) -> Self {
        Self {
            gold: STARTING_GOLD,
            party: vec![starter.instantiate()],
            inventory: Vec::new(),
            current_chapter: 0,
            current_day: 1,
            total_game_days: 0,
            pokemon_caught: 0,
            pokemon_evolved: 0,
        }
    }

    pub fn party_power(&self) -> f64 {
        party_power(&self.party)
    }

    pub fn earn(&mut self, amount: u64) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// Remove up to `amount`; returns what was actually taken.
    pub fn lose(&mut self, amount: u64) -> u64 {
        let taken = amount.min(self.gold);
        self.gold -= taken;
        taken
    }

    /// Pay `cost` in full if affordable.
    pub fn try_spend(&mut self, cost: u64) -> bool {
        if self.gold >= cost {
            self.gold -= cost;
            true
        } else {
            false
        }
    }

    /// Append to the party, evicting the oldest member if over capacity.
    pub fn add_to_party(&mut self, creature: Creature) -> Option<Creature> {
        self.party.push(creature);
        if self.party.len() > MAX_PARTY_SIZE {
            Some(self.party.remove(0))
        } else {
            None
        }
    }
}
