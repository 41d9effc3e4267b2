//! Declarative game content: chapters, events, the creature roster and
//! simulation tuning, in the JSON shape written by the configuration editor.

pub mod sample;

use crate::core::constants::PACING_BASE_MS;
use crate::core::{SimError, SimResult};
use crate::creature::Creature;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;
use uuid::Uuid;

/// What a drawn event does. Dispatch over this is exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Battle,
    #[serde(rename = "Trainer Battle")]
    TrainerBattle,
    #[serde(rename = "Boss Battle")]
    BossBattle,
    Treasure,
    Shop,
    #[serde(rename = "Random Encounter")]
    RandomEncounter,
}

impl EventKind {
    pub fn is_battle(self) -> bool {
        matches!(
            self,
            EventKind::Battle | EventKind::TrainerBattle | EventKind::BossBattle
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            EventKind::Battle => "Battle",
            EventKind::TrainerBattle => "Trainer Battle",
            EventKind::BossBattle => "Boss Battle",
            EventKind::Treasure => "Treasure",
            EventKind::Shop => "Shop",
            EventKind::RandomEncounter => "Random Encounter",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl Item {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub reward_gold: u64,
    #[serde(default)]
    pub reward_items: Vec<Item>,
    /// Fixed opponent for battle events; synthesized when absent.
    #[serde(default, rename = "pokemonEncounter")]
    pub encounter: Option<Creature>,
    #[serde(default = "default_multiplier")]
    pub difficulty_multiplier: f64,
}

impl Event {
    pub fn new(name: impl Into<String>, kind: EventKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            description: String::new(),
            reward_gold: 0,
            reward_items: Vec::new(),
            encounter: None,
            difficulty_multiplier: 1.0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_reward_gold(mut self, gold: u64) -> Self {
        self.reward_gold = gold;
        self
    }

    pub fn with_items(mut self, items: Vec<Item>) -> Self {
        self.reward_items = items;
        self
    }

    pub fn with_encounter(mut self, creature: Creature) -> Self {
        self.encounter = Some(creature);
        self
    }

    pub fn with_difficulty(mut self, multiplier: f64) -> Self {
        self.difficulty_multiplier = multiplier;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    #[serde(default = "default_multiplier")]
    pub difficulty_multiplier: f64,
    pub days: u32,
    #[serde(default)]
    pub required_power_to_complete: f64,
    #[serde(default)]
    pub events: Vec<Event>,
}

impl Chapter {
    pub fn new(name: impl Into<String>, days: u32, required_power: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            difficulty_multiplier: 1.0,
            days,
            required_power_to_complete: required_power,
            events: Vec::new(),
        }
    }

    pub fn with_difficulty(mut self, multiplier: f64) -> Self {
        self.difficulty_multiplier = multiplier;
        self
    }

    pub fn with_events(mut self, events: Vec<Event>) -> Self {
        self.events = events;
        self
    }

    /// Day count used by the simulator; a zero-day chapter still plays one day.
    pub fn effective_days(&self) -> u32 {
        self.days.max(1)
    }
}

/// Tuning that only affects how a run is presented, never its outcome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSettings {
    #[serde(default)]
    pub auto_run: bool,
    #[serde(default = "default_speed")]
    pub speed: f64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            auto_run: false,
            speed: default_speed(),
        }
    }
}

impl SimulationSettings {
    /// Pause between days when pacing is on: `floor(1000 / speed)` ms.
    /// `None` for a non-positive or non-finite speed.
    pub fn day_delay(&self) -> Option<Duration> {
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return None;
        }
        Some(Duration::from_millis((PACING_BASE_MS / self.speed).floor() as u64))
    }
}

/// Everything the simulator needs to run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub chapters: Vec<Chapter>,
    pub pokemons: Vec<Creature>,
    #[serde(default, rename = "simulationConfig")]
    pub settings: SimulationSettings,
}

impl Configuration {
    pub fn new(chapters: Vec<Chapter>, pokemons: Vec<Creature>) -> Self {
        Self {
            chapters,
            pokemons,
            settings: SimulationSettings::default(),
        }
    }

    pub fn from_json(json: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The two preconditions a run cannot start without.
    pub fn validate(&self) -> SimResult<()> {
        if self.chapters.is_empty() {
            return Err(SimError::NoChapters);
        }
        if self.pokemons.is_empty() {
            return Err(SimError::EmptyRoster);
        }
        Ok(())
    }

    pub fn roster(&self) -> Roster {
        Roster::new(&self.pokemons)
    }
}

/// Name-keyed lookup over the configured creatures.
///
/// Evolution links are species names, resolved here at evolution time; the
/// roster keeps its own copies so party members never alias roster entries.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    entries: Vec<Creature>,
    by_base_species: HashMap<String, usize>,
}

impl Roster {
    pub fn new(creatures: &[Creature]) -> Self {
        let mut by_base_species = HashMap::new();
        for (idx, creature) in creatures.iter().enumerate() {
            if let Some(from) = &creature.evolves_from {
                // First entry in roster order wins.
                by_base_species.entry(from.clone()).or_insert(idx);
            }
        }
        Self {
            entries: creatures.to_vec(),
            by_base_species,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn starter(&self) -> Option<&Creature> {
        self.entries.first()
    }

    pub fn get(&self, name: &str) -> Option<&Creature> {
        self.entries.iter().find(|c| c.name == name)
    }

    /// The roster entry whose `evolves_from` names `species`.
    pub fn evolution_of(&self, species: &str) -> Option<&Creature> {
        self.by_base_species
            .get(species)
            .and_then(|&idx| self.entries.get(idx))
    }
}

fn default_multiplier() -> f64 {
    1.0
}

fn default_speed() -> f64 {
    1.0
}
