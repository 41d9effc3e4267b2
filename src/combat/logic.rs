//! Turn-based party-vs-party battle resolution.

use super::types::{BattleOutcome, BattleUnit, Side};
use crate::core::constants::{DEFENSE_MITIGATION, MAX_BATTLE_ROUNDS, MIN_DAMAGE};
use crate::creature::Creature;

/// Damage of one attack: `max(1, floor(atk - 0.5 * def))`.
pub fn calculate_damage(atk: u32, def: u32) -> i64 {
    let raw = (atk as f64 - DEFENSE_MITIGATION * def as f64).floor() as i64;
    raw.max(MIN_DAMAGE)
}

/// Share of battle-start hp a side still has, with each unit floored at 0.
///
/// A side that started with no hp at all scores 0.
pub fn remaining_hp_fraction(units: &[BattleUnit]) -> f64 {
    let starting: i64 = units.iter().map(|u| u.starting_hp).sum();
    if starting <= 0 {
        return 0.0;
    }
    let current: i64 = units.iter().map(|u| u.hp.max(0)).sum();
    current as f64 / starting as f64
}

/// Fight `player` against `enemy`, both in party order.
///
/// Each round every living player unit hits the first living enemy, then every
/// living enemy hits the first living player unit. A side is beaten the moment
/// its last unit falls. At the round cap the side with the larger remaining-hp
/// fraction wins, and an exact tie goes to the player.
pub fn resolve_battle(player: &[Creature], enemy: &[Creature]) -> BattleOutcome {
    let mut players: Vec<BattleUnit> = player.iter().map(BattleUnit::from).collect();
    let mut enemies: Vec<BattleUnit> = enemy.iter().map(BattleUnit::from).collect();
    let mut log = Vec::new();
    let mut rounds = 0u32;

    loop {
        rounds += 1;

        if attack_phase(&players, &mut enemies, &mut log) {
            return finish(Side::Player, rounds, false, log);
        }
        if attack_phase(&enemies, &mut players, &mut log) {
            return finish(Side::Enemy, rounds, false, log);
        }

        if rounds >= MAX_BATTLE_ROUNDS {
            log.push("Battle timed out.".to_string());
            let player_fraction = remaining_hp_fraction(&players);
            let enemy_fraction = remaining_hp_fraction(&enemies);
            let winner = if player_fraction >= enemy_fraction {
                Side::Player
            } else {
                Side::Enemy
            };
            return finish(winner, rounds, true, log);
        }
    }
}

/// Every living attacker strikes the first living defender.
/// Returns true once no defender is left standing.
fn attack_phase(
    attackers: &[BattleUnit],
    defenders: &mut [BattleUnit],
    log: &mut Vec<String>,
) -> bool {
    for attacker in attackers.iter().filter(|a| a.is_alive()) {
        let Some(target) = defenders.iter_mut().find(|d| d.is_alive()) else {
            return true;
        };

        let damage = calculate_damage(attacker.atk, target.def);
        target.hp -= damage;
        log.push(format!(
            "{} attacks {} for {} damage",
            attacker.name, target.name, damage
        ));

        if !target.is_alive() {
            log.push(format!("{} fainted!", target.name));
        }
    }

    !defenders.iter().any(BattleUnit::is_alive)
}

fn finish(winner: Side, rounds: u32, timed_out: bool, log: Vec<String>) -> BattleOutcome {
    BattleOutcome {
        winner,
        rounds,
        timed_out,
        log,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_formula() {
        assert_eq!(calculate_damage(20, 10), 15);
        assert_eq!(calculate_damage(21, 3), 19); // floor(19.5)
    }

    #[test]
    fn test_damage_never_below_one() {
        assert_eq!(calculate_damage(1, 100), 1);
        assert_eq!(calculate_damage(0, 0), 1);
    }

    #[test]
    fn test_stronger_player_wins_quickly() {
        let player = [Creature::new("Charizard", 220, 44, 34, 36)];
        let enemy = [Creature::new("Pidgey", 30, 5, 2, 1)];
        let outcome = resolve_battle(&player, &enemy);
        assert!(outcome.player_won());
        assert_eq!(outcome.rounds, 1);
        assert!(!outcome.timed_out);
        assert!(outcome.log.iter().any(|l| l == "Pidgey fainted!"));
    }

    #[test]
    fn test_stronger_enemy_wins() {
        let player = [Creature::new("Pidgey", 30, 5, 2, 1)];
        let enemy = [Creature::new("Charizard", 220, 44, 34, 36)];
        let outcome = resolve_battle(&player, &enemy);
        assert_eq!(outcome.winner, Side::Enemy);
        assert_eq!(outcome.rounds, 1);
    }

    #[test]
    fn test_player_strikes_first() {
        // Both one-shot each other; the player's phase comes first.
        let player = [Creature::new("A", 10, 100, 0, 1)];
        let enemy = [Creature::new("B", 10, 100, 0, 1)];
        assert!(resolve_battle(&player, &enemy).player_won());
    }

    #[test]
    fn test_round_cap_tie_goes_to_player() {
        // 1 damage per hit each way: both sides at 950/1000 after 50 rounds.
        let player = [Creature::new("Wall", 1000, 1, 100, 1)];
        let enemy = [Creature::new("Wall", 1000, 1, 100, 1)];
        let outcome = resolve_battle(&player, &enemy);
        assert_eq!(outcome.rounds, MAX_BATTLE_ROUNDS);
        assert!(outcome.timed_out);
        assert!(outcome.player_won());
    }

    #[test]
    fn test_round_cap_higher_fraction_wins() {
        let player = [Creature::new("Small", 100, 1, 100, 1)];
        let enemy = [Creature::new("Big", 1000, 1, 100, 1)];
        // Player loses 50/100, enemy loses 50/1000.
        let outcome = resolve_battle(&player, &enemy);
        assert!(outcome.timed_out);
        assert_eq!(outcome.winner, Side::Enemy);
    }

    #[test]
    fn test_attacks_target_first_living_enemy() {
        let player = [Creature::new("Hitter", 500, 30, 0, 1)];
        let enemy = [
            Creature::new("Front", 20, 1, 0, 1),
            Creature::new("Back", 20, 1, 0, 1),
        ];
        let outcome = resolve_battle(&player, &enemy);
        assert!(outcome.player_won());
        assert_eq!(outcome.rounds, 2);
        assert_eq!(outcome.log[0], "Hitter attacks Front for 30 damage");
        assert!(outcome
            .log
            .iter()
            .any(|l| l == "Hitter attacks Back for 30 damage"));
    }

    #[test]
    fn test_zero_hp_enemy_loses_immediately() {
        let player = [Creature::new("A", 10, 1, 1, 1)];
        let enemy = [Creature::new("Ghost", 0, 0, 0, 1)];
        let outcome = resolve_battle(&player, &enemy);
        assert!(outcome.player_won());
        assert_eq!(outcome.rounds, 1);
    }

    #[test]
    fn test_canonical_party_untouched() {
        let player = vec![Creature::new("A", 50, 10, 5, 1)];
        let enemy = vec![Creature::new("B", 50, 10, 5, 1)];
        let before = player.clone();
        let _ = resolve_battle(&player, &enemy);
        assert_eq!(player, before);
    }

    #[test]
    fn test_remaining_fraction_floors_dead_units() {
        let units = [
            BattleUnit {
                name: "A".into(),
                atk: 1,
                def: 1,
                hp: -40,
                starting_hp: 50,
            },
            BattleUnit {
                name: "B".into(),
                atk: 1,
                def: 1,
                hp: 25,
                starting_hp: 50,
            },
        ];
        assert_eq!(remaining_hp_fraction(&units), 0.25);
        assert_eq!(remaining_hp_fraction(&[]), 0.0);
    }
}
