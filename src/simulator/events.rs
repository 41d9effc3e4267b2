//! Daily event draw and per-kind handlers.

use super::context::RunContext;
use crate::combat::resolve_battle;
use crate::content::{Chapter, Event, EventKind};
use crate::core::constants::*;
use crate::creature::Creature;
use rand::seq::SliceRandom;
use rand::Rng;

/// Play one day: draw 1-3 events (with replacement) and handle each.
pub fn run_day_events(ctx: &mut RunContext, chapter: &Chapter, rng: &mut impl Rng) {
    let count = rng.gen_range(MIN_EVENTS_PER_DAY..=MAX_EVENTS_PER_DAY);

    if chapter.events.is_empty() {
        ctx.log("A quiet day. Nothing happened.");
        return;
    }

    for _ in 0..count {
        if let Some(event) = chapter.events.choose(rng) {
            dispatch_event(ctx, event, rng);
        }
    }
}

/// Route one event to its handler.
pub fn dispatch_event(ctx: &mut RunContext, event: &Event, rng: &mut impl Rng) {
    ctx.log(format!("Event: {} ({})", event.name, event.kind.label()));

    match event.kind {
        EventKind::Battle | EventKind::TrainerBattle | EventKind::BossBattle => {
            handle_battle(ctx, event, rng)
        }
        EventKind::Treasure => handle_treasure(ctx, event),
        EventKind::Shop => handle_shop(ctx, rng),
        EventKind::RandomEncounter => handle_random_encounter(ctx, rng),
    }
}

/// Build a lone wild creature whose implied power is `party_power * multiplier`.
pub fn synthesize_enemy(party_power: f64, multiplier: f64, rng: &mut impl Rng) -> Creature {
    let power = (party_power * multiplier).max(0.0);
    let species = WILD_SPECIES[rng.gen_range(0..WILD_SPECIES.len())];

    Creature::new(
        format!("Wild {}", species),
        (power * ENEMY_HP_PER_POWER).floor() as u32,
        power.floor() as u32,
        (power * ENEMY_DEF_PER_POWER).floor() as u32,
        ((power / ENEMY_POWER_PER_LEVEL).floor() as u32).saturating_add(1),
    )
}

fn handle_battle(ctx: &mut RunContext, event: &Event, rng: &mut impl Rng) {
    let enemy_party = match &event.encounter {
        Some(creature) => vec![creature.instantiate()],
        None => vec![synthesize_enemy(
            ctx.player.party_power(),
            event.difficulty_multiplier,
            rng,
        )],
    };

    let names: Vec<&str> = enemy_party.iter().map(|c| c.name.as_str()).collect();
    ctx.log(format!("Battle started against {}", names.join(", ")));

    // The party as it entered the fight, for the battle log.
    let fighting_party = ctx.player.party.clone();
    let outcome = resolve_battle(&fighting_party, &enemy_party);
    ctx.messages.extend(outcome.log.iter().cloned());

    if outcome.player_won() {
        ctx.log("Battle won!");
        ctx.player.earn(event.reward_gold);
        ctx.results.record_gold_earned(event.reward_gold);
        ctx.log(format!("Earned {} gold", event.reward_gold));

        if rng.gen_bool(CAPTURE_CHANCE) {
            let captured = enemy_party[0].instantiate();
            ctx.log(format!("Captured {}!", captured.name));
            ctx.player.pokemon_caught += 1;
            if let Some(released) = ctx.player.add_to_party(captured) {
                ctx.log(format!("Party full. Released {}.", released.name));
            }
        }
    } else {
        ctx.log("Battle lost!");
        let lost = ctx.player.lose(event.reward_gold / 2);
        ctx.results.record_gold_lost(lost);
        ctx.log(format!("Lost {} gold", lost));
    }

    ctx.results.record_battle(
        &fighting_party,
        &enemy_party,
        outcome.player_won(),
        outcome.rounds,
    );
}

fn handle_treasure(ctx: &mut RunContext, event: &Event) {
    ctx.log("Found a treasure chest!");
    ctx.player.earn(event.reward_gold);
    ctx.results.record_gold_earned(event.reward_gold);
    ctx.log(format!("Found {} gold", event.reward_gold));

    for item in &event.reward_items {
        ctx.player.inventory.push(item.clone());
        ctx.results.record_item_found();
        ctx.log(format!("Found item: {}", item.name));
    }
}

fn handle_shop(ctx: &mut RunContext, rng: &mut impl Rng) {
    ctx.log("Entered a Pokemon shop");

    if ctx.player.party.is_empty() || ctx.player.gold < SHOP_MIN_GOLD {
        ctx.log("Nothing to buy at the shop.");
        return;
    }

    let idx = rng.gen_range(0..ctx.player.party.len());
    let cost = UPGRADE_COST_PER_LEVEL * ctx.player.party[idx].level() as u64;

    if ctx.player.try_spend(cost) {
        let member = &mut ctx.player.party[idx];
        member.level_up();
        let message = format!(
            "Upgraded {} to level {} for {} gold",
            member.name,
            member.level(),
            cost
        );
        ctx.results.record_gold_spent(cost);
        ctx.log(message);
    } else {
        ctx.log(format!(
            "Not enough gold to upgrade Pokemon. Need {} gold.",
            cost
        ));
    }
}

fn handle_random_encounter(ctx: &mut RunContext, rng: &mut impl Rng) {
    ctx.log("Random encounter!");

    if rng.gen_bool(ENCOUNTER_GOOD_CHANCE) {
        let found = rng.gen_range(ENCOUNTER_GOLD_FOUND_MIN..=ENCOUNTER_GOLD_FOUND_MAX);
        ctx.player.earn(found);
        ctx.results.record_gold_earned(found);
        ctx.log(format!("Found {} gold on the ground!", found));
    } else {
        let roll = rng.gen_range(ENCOUNTER_GOLD_LOST_MIN..=ENCOUNTER_GOLD_LOST_MAX);
        let lost = ctx.player.lose(roll);
        ctx.results.record_gold_lost(lost);
        ctx.log(format!("Lost {} gold in a mishap!", lost));
    }
}
