// Player start
pub const STARTING_GOLD: u64 = 100;
pub const MAX_PARTY_SIZE: usize = 3;

// Real-player time estimate
pub const SECONDS_PER_GAME_DAY: u64 = 2;

// Daily event draw (inclusive range)
pub const MIN_EVENTS_PER_DAY: u32 = 1;
pub const MAX_EVENTS_PER_DAY: u32 = 3;

// Battle
pub const MAX_BATTLE_ROUNDS: u32 = 50;
pub const DEFENSE_MITIGATION: f64 = 0.5;
pub const MIN_DAMAGE: i64 = 1;
pub const CAPTURE_CHANCE: f64 = 0.3;

// Synthesized enemies (scaled from implied power)
pub const ENEMY_HP_PER_POWER: f64 = 10.0;
pub const ENEMY_DEF_PER_POWER: f64 = 0.5;
pub const ENEMY_POWER_PER_LEVEL: f64 = 10.0;
pub const WILD_SPECIES: [&str; 5] = ["Pikachu", "Charmander", "Bulbasaur", "Squirtle", "Pidgey"];

// Leveling (shop and party upgrade share these)
pub const UPGRADE_COST_PER_LEVEL: u64 = 50;
pub const SHOP_MIN_GOLD: u64 = 50;
pub const LEVEL_UP_HP: u32 = 10;
pub const LEVEL_UP_ATK: u32 = 2;
pub const LEVEL_UP_DEF: u32 = 1;

// Evolution
pub const EVOLUTION_COPIES_REQUIRED: usize = 3;

// Random encounters (inclusive ranges)
pub const ENCOUNTER_GOOD_CHANCE: f64 = 0.5;
pub const ENCOUNTER_GOLD_FOUND_MIN: u64 = 10;
pub const ENCOUNTER_GOLD_FOUND_MAX: u64 = 39;
pub const ENCOUNTER_GOLD_LOST_MIN: u64 = 5;
pub const ENCOUNTER_GOLD_LOST_MAX: u64 = 24;

// Power weight defaults
pub const DEFAULT_HP_WEIGHT: f64 = 0.5;
pub const DEFAULT_ATK_WEIGHT: f64 = 1.0;
pub const DEFAULT_DEF_WEIGHT: f64 = 0.7;

// Pacing
pub const PACING_BASE_MS: f64 = 1000.0;
