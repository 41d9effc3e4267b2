//! Built-in sample content: three starter evolution lines, Pikachu/Raichu,
//! and a three-chapter campaign. Used by the CLI when no config is given.

use super::{Chapter, Configuration, Event, EventKind, SimulationSettings};
use crate::creature::{Creature, EvolutionStage, Rarity};

pub fn sample_pokemons() -> Vec<Creature> {
    use EvolutionStage::*;
    use Rarity::*;

    let line = |name: &str,
                stats: (u32, u32, u32, u32),
                rarity: Rarity,
                stage: EvolutionStage,
                from: Option<&str>,
                to: Option<&str>| {
        let (hp, atk, def, level) = stats;
        Creature::new(name, hp, atk, def, level)
            .with_rarity(rarity)
            .with_stage(stage)
            .with_evolution(from, to)
    };

    vec![
        line("Bulbasaur", (100, 15, 15, 1), Common, Basic, None, Some("Ivysaur")),
        line("Ivysaur", (160, 24, 24, 16), Uncommon, Stage1, Some("Bulbasaur"), Some("Venusaur")),
        line("Venusaur", (230, 38, 38, 32), Rare, Stage2, Some("Ivysaur"), None),
        line("Charmander", (90, 18, 12, 1), Common, Basic, None, Some("Charmeleon")),
        line("Charmeleon", (150, 28, 20, 16), Uncommon, Stage1, Some("Charmander"), Some("Charizard")),
        line("Charizard", (220, 44, 34, 36), Rare, Stage2, Some("Charmeleon"), None),
        line("Squirtle", (110, 14, 20, 1), Common, Basic, None, Some("Wartortle")),
        line("Wartortle", (170, 22, 32, 16), Uncommon, Stage1, Some("Squirtle"), Some("Blastoise")),
        line("Blastoise", (240, 34, 48, 36), Rare, Stage2, Some("Wartortle"), None),
        line("Pikachu", (85, 20, 10, 5), Uncommon, Basic, None, Some("Raichu")),
        line("Raichu", (160, 40, 25, 20), Rare, Stage1, Some("Pikachu"), None),
    ]
}

pub fn sample_events() -> Vec<Event> {
    vec![
        Event::new("Wild Pokemon Battle", EventKind::Battle)
            .with_description("A wild Pokemon appears!")
            .with_reward_gold(25),
        Event::new("Trainer Battle", EventKind::TrainerBattle)
            .with_description("A Pokemon trainer challenges you!")
            .with_reward_gold(50)
            .with_difficulty(1.2),
        Event::new("Gym Leader Battle", EventKind::BossBattle)
            .with_description("A gym leader wants to test your skills!")
            .with_reward_gold(100)
            .with_difficulty(1.5),
        Event::new("Pokemon Center", EventKind::Shop)
            .with_description("Visit the Pokemon Center to heal your Pokemon and buy items")
            .with_difficulty(0.0),
        Event::new("Hidden Treasure", EventKind::Treasure)
            .with_description("You found a hidden treasure chest!")
            .with_reward_gold(75)
            .with_difficulty(0.0),
        Event::new("Random Encounter", EventKind::RandomEncounter)
            .with_description("Something unusual happens...")
            .with_reward_gold(15)
            .with_difficulty(0.8),
    ]
}

pub fn sample_chapters() -> Vec<Chapter> {
    let events = sample_events();
    let pick = |idx: &[usize]| idx.iter().map(|&i| events[i].clone()).collect::<Vec<_>>();

    vec![
        Chapter::new("Pallet Town", 5, 50.0).with_events(pick(&[0, 4, 5])),
        Chapter::new("Viridian City", 7, 100.0)
            .with_difficulty(1.2)
            .with_events(pick(&[0, 1, 3, 5])),
        Chapter::new("Pewter City", 10, 200.0)
            .with_difficulty(1.4)
            .with_events(pick(&[0, 1, 2, 3, 4, 5])),
    ]
}

pub fn sample_configuration() -> Configuration {
    Configuration {
        chapters: sample_chapters(),
        pokemons: sample_pokemons(),
        settings: SimulationSettings {
            auto_run: true,
            speed: 2.0,
        },
    }
}
