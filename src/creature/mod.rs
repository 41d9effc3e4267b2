//! Creature records: stats, rarity, evolution links and cached power.

pub mod power;

use crate::core::constants::{
    DEFAULT_ATK_WEIGHT, DEFAULT_DEF_WEIGHT, DEFAULT_HP_WEIGHT, LEVEL_UP_ATK, LEVEL_UP_DEF,
    LEVEL_UP_HP,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use power::{calculate_power, party_power, round2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EvolutionStage {
    #[default]
    Basic,
    #[serde(rename = "Stage 1")]
    Stage1,
    #[serde(rename = "Stage 2")]
    Stage2,
    Mega,
}

/// Per-creature coefficients for [`calculate_power`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatWeights {
    pub hp: f64,
    pub atk: f64,
    pub def: f64,
}

impl Default for StatWeights {
    fn default() -> Self {
        Self {
            hp: DEFAULT_HP_WEIGHT,
            atk: DEFAULT_ATK_WEIGHT,
            def: DEFAULT_DEF_WEIGHT,
        }
    }
}

/// A creature in the roster, a party, or an event encounter.
///
/// Stats are private so that every change goes through a method that
/// refreshes the cached power.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CreatureRecord", into = "CreatureRecord")]
pub struct Creature {
    pub id: Uuid,
    pub name: String,
    hp: u32,
    atk: u32,
    def: u32,
    level: u32,
    pub rarity: Rarity,
    pub evolution_stage: EvolutionStage,
    /// Species name this creature evolves from (roster lookup key).
    pub evolves_from: Option<String>,
    /// Species name this creature evolves into (informational).
    pub evolves_to: Option<String>,
    weights: StatWeights,
    power: f64,
}

impl Creature {
    pub fn new(name: impl Into<String>, hp: u32, atk: u32, def: u32, level: u32) -> Self {
        let mut creature = Self {
            id: Uuid::new_v4(),
            name: name.into(),
            hp,
            atk,
            def,
            level,
            rarity: Rarity::default(),
            evolution_stage: EvolutionStage::default(),
            evolves_from: None,
            evolves_to: None,
            weights: StatWeights::default(),
            power: 0.0,
        };
        creature.refresh_power();
        creature
    }

    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    pub fn with_stage(mut self, stage: EvolutionStage) -> Self {
        self.evolution_stage = stage;
        self
    }

    pub fn with_evolution(mut self, from: Option<&str>, to: Option<&str>) -> Self {
        self.evolves_from = from.map(str::to_string);
        self.evolves_to = to.map(str::to_string);
        self
    }

    pub fn with_weights(mut self, weights: StatWeights) -> Self {
        self.weights = weights;
        self.refresh_power();
        self
    }

    /// Independent copy with a fresh id, used whenever a roster or encounter
    /// template enters the party.
    pub fn instantiate(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            ..self.clone()
        }
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn atk(&self) -> u32 {
        self.atk
    }

    pub fn def(&self) -> u32 {
        self.def
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn weights(&self) -> StatWeights {
        self.weights
    }

    pub fn power(&self) -> f64 {
        self.power
    }

    /// Replace the stat line.
    pub fn set_stats(&mut self, hp: u32, atk: u32, def: u32) {
        self.hp = hp;
        self.atk = atk;
        self.def = def;
        self.refresh_power();
    }

    /// One level: +10 hp, +2 atk, +1 def.
    pub fn level_up(&mut self) {
        self.level = self.level.saturating_add(1);
        self.hp = self.hp.saturating_add(LEVEL_UP_HP);
        self.atk = self.atk.saturating_add(LEVEL_UP_ATK);
        self.def = self.def.saturating_add(LEVEL_UP_DEF);
        self.refresh_power();
    }

    pub fn snapshot(&self) -> CreatureSnapshot {
        CreatureSnapshot {
            name: self.name.clone(),
            level: self.level,
            hp: self.hp,
            atk: self.atk,
            def: self.def,
            power: self.power,
        }
    }

    fn refresh_power(&mut self) {
        self.power = calculate_power(self.hp, self.atk, self.def, &self.weights);
    }
}

/// Frozen view of a creature for battle logs and reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureSnapshot {
    pub name: String,
    pub level: u32,
    pub hp: u32,
    pub atk: u32,
    pub def: u32,
    pub power: f64,
}

impl CreatureSnapshot {
    /// "Name (Lvl N)" label used by the battle log export.
    pub fn label(&self) -> String {
        format!("{} (Lvl {})", self.name, self.level)
    }
}

/// Wire shape shared with the configuration editor.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatureRecord {
    #[serde(default = "Uuid::new_v4")]
    id: Uuid,
    name: String,
    hp: u32,
    atk: u32,
    def: u32,
    #[serde(default = "default_level")]
    level: u32,
    #[serde(default)]
    rarity: Rarity,
    #[serde(default, rename = "evolutionType")]
    evolution_stage: EvolutionStage,
    #[serde(default)]
    evolves_from: Option<String>,
    #[serde(default)]
    evolves_to: Option<String>,
    #[serde(default)]
    hp_weight: Option<f64>,
    #[serde(default)]
    atk_weight: Option<f64>,
    #[serde(default)]
    def_weight: Option<f64>,
    // Output only; recomputed on load.
    #[serde(default, skip_deserializing)]
    total_power: f64,
}

fn default_level() -> u32 {
    1
}

// Zero counts as unset, as the editor never writes a zero weight on purpose.
fn weight_or(value: Option<f64>, default: f64) -> f64 {
    value
        .filter(|w| w.is_finite() && *w != 0.0)
        .unwrap_or(default)
}

impl From<CreatureRecord> for Creature {
    fn from(record: CreatureRecord) -> Self {
        let weights = StatWeights {
            hp: weight_or(record.hp_weight, DEFAULT_HP_WEIGHT),
            atk: weight_or(record.atk_weight, DEFAULT_ATK_WEIGHT),
            def: weight_or(record.def_weight, DEFAULT_DEF_WEIGHT),
        };
        let mut creature = Creature {
            id: record.id,
            name: record.name,
            hp: record.hp,
            atk: record.atk,
            def: record.def,
            level: record.level,
            rarity: record.rarity,
            evolution_stage: record.evolution_stage,
            evolves_from: record.evolves_from.filter(|s| !s.is_empty()),
            evolves_to: record.evolves_to.filter(|s| !s.is_empty()),
            weights,
            power: 0.0,
        };
        creature.refresh_power();
        creature
    }
}

impl From<Creature> for CreatureRecord {
    fn from(creature: Creature) -> Self {
        Self {
            id: creature.id,
            name: creature.name,
            hp: creature.hp,
            atk: creature.atk,
            def: creature.def,
            level: creature.level,
            rarity: creature.rarity,
            evolution_stage: creature.evolution_stage,
            evolves_from: creature.evolves_from,
            evolves_to: creature.evolves_to,
            hp_weight: Some(creature.weights.hp),
            atk_weight: Some(creature.weights.atk),
            def_weight: Some(creature.weights.def),
            total_power: round2(creature.power),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_creature_has_power() {
        let c = Creature::new("Bulbasaur", 100, 10, 10, 1);
        assert!((c.power() - 760f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_level_up_refreshes_power() {
        let mut c = Creature::new("Bulbasaur", 100, 10, 10, 1);
        let before = c.power();
        c.level_up();
        assert_eq!(c.level(), 2);
        assert_eq!((c.hp(), c.atk(), c.def()), (110, 12, 11));
        assert!((c.power() - calculate_power(110, 12, 11, &c.weights())).abs() < 1e-9);
        assert!(c.power() > before);
    }

    #[test]
    fn test_set_stats_refreshes_power() {
        let mut c = Creature::new("Pidgey", 10, 1, 1, 1);
        c.set_stats(100, 10, 10);
        assert_eq!(round2(c.power()), 27.57);
    }

    #[test]
    fn test_instantiate_gets_new_id() {
        let c = Creature::new("Squirtle", 110, 14, 20, 1);
        let copy = c.instantiate();
        assert_ne!(c.id, copy.id);
        assert_eq!(c.name, copy.name);
        assert_eq!(c.power(), copy.power());
    }

    #[test]
    fn test_deserialize_defaults_weights_and_recomputes_power() {
        let json = r#"{
            "name": "Bulbasaur",
            "hp": 100,
            "atk": 10,
            "def": 10,
            "evolutionType": "Stage 1",
            "evolvesFrom": "Seed",
            "totalPower": 9999.0
        }"#;
        let c: Creature = serde_json::from_str(json).unwrap();
        assert_eq!(c.level(), 1);
        assert_eq!(c.weights(), StatWeights::default());
        assert_eq!(c.evolution_stage, EvolutionStage::Stage1);
        assert_eq!(c.evolves_from.as_deref(), Some("Seed"));
        assert_eq!(round2(c.power()), 27.57);
    }

    #[test]
    fn test_serialize_uses_editor_field_names() {
        let c = Creature::new("Ivysaur", 160, 24, 24, 16)
            .with_rarity(Rarity::Uncommon)
            .with_evolution(Some("Bulbasaur"), Some("Venusaur"));
        let value = serde_json::to_value(&c).unwrap();
        assert_eq!(value["evolvesFrom"], "Bulbasaur");
        assert_eq!(value["rarity"], "Uncommon");
        assert_eq!(value["hpWeight"], 0.5);
        assert!(value["totalPower"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn test_snapshot_label() {
        let c = Creature::new("Pikachu", 85, 20, 10, 5);
        assert_eq!(c.snapshot().label(), "Pikachu (Lvl 5)");
    }
}
