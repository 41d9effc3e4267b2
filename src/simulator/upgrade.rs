//! Party upgrades run after a failed chapter: buy levels, then evolve.

use super::context::RunContext;
use crate::content::Roster;
use crate::core::constants::{EVOLUTION_COPIES_REQUIRED, UPGRADE_COST_PER_LEVEL};
use std::collections::HashMap;

/// Level every affordable member in party order, then try one evolution.
pub fn upgrade_party(ctx: &mut RunContext, roster: &Roster) {
    ctx.log("Trying to upgrade party...");

    for idx in 0..ctx.player.party.len() {
        let cost = UPGRADE_COST_PER_LEVEL * ctx.player.party[idx].level() as u64;
        if !ctx.player.try_spend(cost) {
            continue;
        }
        ctx.results.record_upgrade_gold_spent(cost);

        let member = &mut ctx.player.party[idx];
        member.level_up();
        let message = format!(
            "Upgraded {} to level {} for {} gold",
            member.name,
            member.level(),
            cost
        );
        ctx.log(message);
    }

    try_evolve(ctx, roster);
}

/// Evolve the first species to reach the copy threshold that has a known
/// evolved form. Returns the evolved form's name.
pub fn try_evolve(ctx: &mut RunContext, roster: &Roster) -> Option<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut species = None;

    for member in &ctx.player.party {
        let count = counts.entry(member.name.as_str()).or_insert(0);
        *count += 1;
        if *count >= EVOLUTION_COPIES_REQUIRED && roster.evolution_of(&member.name).is_some() {
            species = Some(member.name.clone());
            break;
        }
    }

    let species = species?;
    let evolved = roster.evolution_of(&species)?.instantiate();

    let consumed = ctx.player.party.len();
    ctx.player.party.retain(|c| c.name != species);
    let consumed = consumed - ctx.player.party.len();

    let evolved_name = evolved.name.clone();
    ctx.player.add_to_party(evolved);
    ctx.player.pokemon_evolved += 1;
    ctx.log(format!(
        "Evolved {}x {} into {}!",
        consumed, species, evolved_name
    ));

    Some(evolved_name)
}
