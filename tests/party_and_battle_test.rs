//! Integration test: battle resolution and party composition
//!
//! Covers the combat rules, the party cap under repeated captures, and
//! evolution through the upgrade pass.

use pokesim::combat::{calculate_damage, resolve_battle, Side};
use pokesim::content::{Event, EventKind, Roster};
use pokesim::core::constants::MAX_PARTY_SIZE;
use pokesim::core::PlayerState;
use pokesim::creature::{round2, Creature, StatWeights};
use pokesim::simulator::events::dispatch_event;
use pokesim::simulator::upgrade::upgrade_party;
use pokesim::simulator::RunContext;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn test_reference_power() {
    let creature = Creature::new("Pikachu", 100, 10, 10, 1);
    assert_eq!(round2(creature.power()), 27.57);

    let custom = Creature::new("Pikachu", 100, 10, 10, 1).with_weights(StatWeights {
        hp: 1.0,
        atk: 2.0,
        def: 0.1,
    });
    assert_eq!(round2(custom.power()), round2(220f64.sqrt()));
}

#[test]
fn test_damage_rules() {
    assert_eq!(calculate_damage(20, 10), 15);
    assert_eq!(calculate_damage(1, 100), 1);
}

#[test]
fn test_round_cap_tie_goes_to_player() {
    let wall = || Creature::new("Wall", 1000, 1, 100, 10);
    let outcome = resolve_battle(&[wall()], &[wall()]);

    assert_eq!(outcome.rounds, 50);
    assert!(outcome.timed_out);
    assert_eq!(outcome.winner, Side::Player);
}

#[test]
fn test_round_cap_compares_fractions_not_totals() {
    // After 50 rounds the player holds 800/1000 hp, the enemy 450/500.
    let player = Creature::new("Tank", 1000, 1, 0, 10);
    let enemy = Creature::new("Brawler", 500, 4, 100, 10);

    let outcome = resolve_battle(&[player], &[enemy]);

    assert!(outcome.timed_out);
    assert_eq!(outcome.winner, Side::Enemy);
    assert!(!outcome.player_won());
}

#[test]
fn test_battle_leaves_party_untouched() {
    let party = vec![Creature::new("Pidgey", 40, 45, 40, 3)];
    let enemy = vec![Creature::new("Onix", 350, 45, 160, 12)];
    let before = party.clone();

    let outcome = resolve_battle(&party, &enemy);

    assert_eq!(outcome.winner, Side::Enemy);
    assert_eq!(party[0].hp(), before[0].hp());
    assert_eq!(party[0].power(), before[0].power());
}

#[test]
fn test_party_never_exceeds_cap_under_captures() {
    let mut ctx = RunContext::new(PlayerState::new(&Creature::new("Mewtwo", 1000, 300, 200, 70)));
    let mut rng = ChaCha8Rng::seed_from_u64(31);
    let mut captured_names = Vec::new();

    for i in 0..60 {
        let event = Event::new("Wild", EventKind::Battle)
            .with_encounter(Creature::new(format!("Rattata{}", i), 30, 5, 5, 2));
        let caught_before = ctx.player.pokemon_caught;
        dispatch_event(&mut ctx, &event, &mut rng);
        if ctx.player.pokemon_caught > caught_before {
            captured_names.push(format!("Rattata{}", i));
        }
        assert!(ctx.player.party.len() <= MAX_PARTY_SIZE);
    }

    assert!(captured_names.len() >= 4, "expected several captures");
    // Oldest-first eviction leaves the three most recent captures, in order.
    let party: Vec<&str> = ctx.player.party.iter().map(|c| c.name.as_str()).collect();
    let newest: Vec<&str> = captured_names[captured_names.len() - 3..]
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(party, newest);
}

#[test]
fn test_triple_bulbasaur_evolves_through_upgrade() {
    let bulbasaur = Creature::new("Bulbasaur", 45, 49, 49, 5);
    let ivysaur = Creature::new("Ivysaur", 60, 62, 63, 16)
        .with_evolution(Some("Bulbasaur"), Some("Venusaur"));
    let roster = Roster::new(&[bulbasaur.clone(), ivysaur]);

    let mut player = PlayerState::new(&bulbasaur);
    player.party = vec![bulbasaur.instantiate(), bulbasaur.instantiate(), bulbasaur.instantiate()];
    player.gold = 0;
    let mut ctx = RunContext::new(player);

    upgrade_party(&mut ctx, &roster);

    assert!(ctx.player.party.iter().all(|c| c.name != "Bulbasaur"));
    assert_eq!(ctx.player.party.len(), 1);
    assert_eq!(ctx.player.party[0].name, "Ivysaur");
    assert_eq!(ctx.player.pokemon_evolved, 1);
}
