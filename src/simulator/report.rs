//! Run statistics: the aggregator that collects them and the final report.

use crate::core::constants::SECONDS_PER_GAME_DAY;
use crate::core::PlayerState;
use crate::creature::{round2, Creature, CreatureSnapshot};
use serde::Serialize;
use std::time::Instant;

/// Chapter decisions listed in the text report before truncating.
const CHAPTER_ROWS_SHOWN: usize = 30;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Every chapter completed.
    Completed,
    /// Stopped by the driver; counters cover the days that ran.
    Cancelled,
    /// Hit the driver's day budget; counters cover the days that ran.
    TimedOut,
}

impl RunStatus {
    pub fn label(self) -> &'static str {
        match self {
            RunStatus::Completed => "completed",
            RunStatus::Cancelled => "cancelled",
            RunStatus::TimedOut => "timed out",
        }
    }
}

/// A duration expressed whole in each unit (not a remainder split).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TimeBreakdown {
    pub seconds: u64,
    pub minutes: u64,
    pub hours: u64,
    pub days: u64,
}

impl TimeBreakdown {
    pub fn from_seconds(seconds: u64) -> Self {
        Self {
            seconds,
            minutes: seconds / 60,
            hours: seconds / 3600,
            days: seconds / 86_400,
        }
    }
}

/// "1 hour 2 minutes 3 seconds"; zero-valued leading units are dropped.
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    let plural = |n: u64| if n == 1 { "" } else { "s" };

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{} hour{}", hours, plural(hours)));
    }
    if minutes > 0 {
        parts.push(format!("{} minute{}", minutes, plural(minutes)));
    }
    if seconds > 0 || (hours == 0 && minutes == 0) {
        parts.push(format!("{} second{}", seconds, plural(seconds)));
    }
    parts.join(" ")
}

/// `mm:ss`, minutes not wrapped into hours.
pub fn format_mm_ss(total_seconds: u64) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerSample {
    pub chapter: usize,
    pub day: u32,
    pub total_power: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChapterOutcome {
    Completed,
    Failed,
}

impl ChapterOutcome {
    pub fn label(self) -> &'static str {
        match self {
            ChapterOutcome::Completed => "completed",
            ChapterOutcome::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterRecord {
    pub chapter: usize,
    pub day: u32,
    pub result: ChapterOutcome,
    /// In-game days elapsed in the run when this was recorded.
    pub game_day: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BattleResult {
    Win,
    Lose,
}

impl BattleResult {
    pub fn label(self) -> &'static str {
        match self {
            BattleResult::Win => "win",
            BattleResult::Lose => "lose",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleRecord {
    pub player_party: Vec<CreatureSnapshot>,
    pub enemy_party: Vec<CreatureSnapshot>,
    pub result: BattleResult,
    pub rounds: u32,
}

/// Collects counters and series while a run is in progress.
#[derive(Debug)]
pub struct ResultAggregator {
    started: Instant,
    chapters_completed: u32,
    highest_chapter_reached: usize,
    highest_day_reached: u32,
    total_battles: u64,
    battles_won: u64,
    battles_lost: u64,
    gold_earned: u64,
    gold_spent: u64,
    upgrade_gold_spent: u64,
    gold_lost: u64,
    items_found: u64,
    items_used: u64,
    power_progression: Vec<PowerSample>,
    chapter_progression: Vec<ChapterRecord>,
    battle_log: Vec<BattleRecord>,
}

impl Default for ResultAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            chapters_completed: 0,
            highest_chapter_reached: 0,
            highest_day_reached: 0,
            total_battles: 0,
            battles_won: 0,
            battles_lost: 0,
            gold_earned: 0,
            gold_spent: 0,
            upgrade_gold_spent: 0,
            gold_lost: 0,
            items_found: 0,
            items_used: 0,
            power_progression: Vec::new(),
            chapter_progression: Vec::new(),
            battle_log: Vec::new(),
        }
    }

    /// Note that day `day` of chapter index `chapter_idx` is being played.
    pub fn record_day(&mut self, chapter_idx: usize, day: u32) {
        self.highest_chapter_reached = self.highest_chapter_reached.max(chapter_idx + 1);
        self.highest_day_reached = self.highest_day_reached.max(day);
    }

    pub fn record_power_sample(&mut self, chapter_idx: usize, day: u32, total_power: f64) {
        self.power_progression.push(PowerSample {
            chapter: chapter_idx + 1,
            day,
            total_power,
        });
    }

    pub fn record_chapter(
        &mut self,
        chapter_idx: usize,
        day: u32,
        result: ChapterOutcome,
        game_day: u64,
    ) {
        if result == ChapterOutcome::Completed {
            self.chapters_completed = self.chapters_completed.saturating_add(1);
        }
        self.chapter_progression.push(ChapterRecord {
            chapter: chapter_idx + 1,
            day,
            result,
            game_day,
        });
    }

    pub fn record_battle(
        &mut self,
        player_party: &[Creature],
        enemy_party: &[Creature],
        won: bool,
        rounds: u32,
    ) {
        self.total_battles = self.total_battles.saturating_add(1);
        if won {
            self.battles_won = self.battles_won.saturating_add(1);
        } else {
            self.battles_lost = self.battles_lost.saturating_add(1);
        }
        self.battle_log.push(BattleRecord {
            player_party: player_party.iter().map(Creature::snapshot).collect(),
            enemy_party: enemy_party.iter().map(Creature::snapshot).collect(),
            result: if won { BattleResult::Win } else { BattleResult::Lose },
            rounds,
        });
    }

    pub fn record_gold_earned(&mut self, amount: u64) {
        self.gold_earned = self.gold_earned.saturating_add(amount);
    }

    /// Shop purchases.
    pub fn record_gold_spent(&mut self, amount: u64) {
        self.gold_spent = self.gold_spent.saturating_add(amount);
    }

    /// Level-ups bought by the upgrade pass after a failed chapter. Kept out
    /// of `gold_spent` so net gold reflects event spending only.
    pub fn record_upgrade_gold_spent(&mut self, amount: u64) {
        self.upgrade_gold_spent = self.upgrade_gold_spent.saturating_add(amount);
    }

    pub fn record_gold_lost(&mut self, amount: u64) {
        self.gold_lost = self.gold_lost.saturating_add(amount);
    }

    pub fn record_item_found(&mut self) {
        self.items_found = self.items_found.saturating_add(1);
    }

    pub fn chapters_completed(&self) -> u32 {
        self.chapters_completed
    }

    pub fn total_battles(&self) -> u64 {
        self.total_battles
    }

    pub fn gold_earned(&self) -> u64 {
        self.gold_earned
    }

    pub fn gold_spent(&self) -> u64 {
        self.gold_spent
    }

    pub fn upgrade_gold_spent(&self) -> u64 {
        self.upgrade_gold_spent
    }

    pub fn battle_log(&self) -> &[BattleRecord] {
        &self.battle_log
    }

    pub fn power_progression(&self) -> &[PowerSample] {
        &self.power_progression
    }

    /// Stamp durations and produce the report.
    pub fn finalize(self, status: RunStatus, player: &PlayerState) -> SimulationResult {
        let elapsed = self.started.elapsed();
        let real_player_seconds = player.total_game_days * SECONDS_PER_GAME_DAY;

        SimulationResult {
            status,
            elapsed_millis: elapsed.as_millis() as u64,
            simulation_time: TimeBreakdown::from_seconds(elapsed.as_secs()),
            real_player_time: TimeBreakdown::from_seconds(real_player_seconds),
            total_game_days: player.total_game_days,
            chapters_completed: self.chapters_completed,
            highest_chapter_reached: self.highest_chapter_reached,
            highest_day_reached: self.highest_day_reached,
            total_battles: self.total_battles,
            battles_won: self.battles_won,
            battles_lost: self.battles_lost,
            pokemon_caught: player.pokemon_caught,
            pokemon_evolved: player.pokemon_evolved,
            gold_earned: self.gold_earned,
            gold_spent: self.gold_spent,
            upgrade_gold_spent: self.upgrade_gold_spent,
            gold_lost: self.gold_lost,
            final_gold: player.gold,
            items_found: self.items_found,
            items_used: self.items_used,
            final_party: player.party.iter().map(Creature::snapshot).collect(),
            final_power: player.party_power(),
            power_progression: self.power_progression,
            chapter_progression: self.chapter_progression,
            battle_log: self.battle_log,
        }
    }
}

/// Everything a finished (or stopped) run produced.
#[derive(Debug, Clone)]
pub struct SimulationResult {
    pub status: RunStatus,
    /// Wall-clock time the run took.
    pub elapsed_millis: u64,
    pub simulation_time: TimeBreakdown,
    /// `total_game_days` at two seconds per day.
    pub real_player_time: TimeBreakdown,
    pub total_game_days: u64,
    pub chapters_completed: u32,
    pub highest_chapter_reached: usize,
    /// Largest day index played in any chapter, not the day the run ended on.
    pub highest_day_reached: u32,
    pub total_battles: u64,
    pub battles_won: u64,
    pub battles_lost: u64,
    pub pokemon_caught: u64,
    pub pokemon_evolved: u64,
    pub gold_earned: u64,
    /// Shop purchases only.
    pub gold_spent: u64,
    pub upgrade_gold_spent: u64,
    pub gold_lost: u64,
    pub final_gold: u64,
    pub items_found: u64,
    pub items_used: u64,
    pub final_party: Vec<CreatureSnapshot>,
    pub final_power: f64,
    pub power_progression: Vec<PowerSample>,
    pub chapter_progression: Vec<ChapterRecord>,
    pub battle_log: Vec<BattleRecord>,
}

impl SimulationResult {
    pub fn is_complete(&self) -> bool {
        self.status == RunStatus::Completed
    }

    /// Percentage of battles won.
    pub fn win_rate(&self) -> f64 {
        if self.total_battles == 0 {
            0.0
        } else {
            self.battles_won as f64 / self.total_battles as f64 * 100.0
        }
    }

    pub fn battles_per_day(&self) -> f64 {
        per_day(self.total_battles, self.total_game_days)
    }

    pub fn gold_per_day(&self) -> f64 {
        per_day(self.gold_earned, self.total_game_days)
    }

    pub fn net_gold(&self) -> i64 {
        let earned = i64::try_from(self.gold_earned).unwrap_or(i64::MAX);
        let spent = i64::try_from(self.gold_spent).unwrap_or(i64::MAX);
        earned.saturating_sub(spent)
    }

    /// Real-player seconds represented by each second of simulation.
    pub fn time_ratio(&self) -> f64 {
        if self.simulation_time.seconds == 0 {
            0.0
        } else {
            self.real_player_time.seconds as f64 / self.simulation_time.seconds as f64
        }
    }

    pub fn failed_attempts(&self) -> usize {
        self.chapter_progression
            .iter()
            .filter(|r| r.result == ChapterOutcome::Failed)
            .count()
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION RESULTS\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!("Status: {}\n\n", self.status.label()));

        report.push_str("── TIME ─────────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Simulation Time:     {} ({} ms)\n",
            format_duration(self.simulation_time.seconds),
            self.elapsed_millis
        ));
        report.push_str(&format!(
            "  In-Game Days:        {}\n",
            self.total_game_days
        ));
        report.push_str(&format!(
            "  Real Player Time:    {}\n",
            format_duration(self.real_player_time.seconds)
        ));
        report.push_str(&format!(
            "  Time Ratio:          {:.2} player s / sim s\n\n",
            self.time_ratio()
        ));

        report.push_str("── PROGRESS ─────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Chapters Completed:  {}\n",
            self.chapters_completed
        ));
        report.push_str(&format!(
            "  Highest Chapter:     {}\n",
            self.highest_chapter_reached
        ));
        report.push_str(&format!(
            "  Highest Day:         {}\n",
            self.highest_day_reached
        ));
        report.push_str(&format!(
            "  Failed Attempts:     {}\n\n",
            self.failed_attempts()
        ));

        report.push_str("── COMBAT ───────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Battles:             {} ({} won, {} lost)\n",
            self.total_battles, self.battles_won, self.battles_lost
        ));
        report.push_str(&format!("  Win Rate:            {:.2}%\n", self.win_rate()));
        report.push_str(&format!(
            "  Battles per Day:     {:.2}\n\n",
            self.battles_per_day()
        ));

        report.push_str("── PARTY ────────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Pokemon Caught:      {}\n", self.pokemon_caught));
        report.push_str(&format!("  Pokemon Evolved:     {}\n", self.pokemon_evolved));
        for member in &self.final_party {
            report.push_str(&format!(
                "  {:<20} power {:.2}\n",
                member.label(),
                round2(member.power)
            ));
        }
        report.push_str(&format!(
            "  Total Power:         {:.2}\n\n",
            round2(self.final_power)
        ));

        report.push_str("── ECONOMY ──────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Gold Earned:         {}\n", self.gold_earned));
        report.push_str(&format!("  Gold Spent:          {}\n", self.gold_spent));
        report.push_str(&format!(
            "  Upgrade Spending:    {}\n",
            self.upgrade_gold_spent
        ));
        report.push_str(&format!("  Gold Lost:           {}\n", self.gold_lost));
        report.push_str(&format!("  Net Gold:            {}\n", self.net_gold()));
        report.push_str(&format!("  Gold per Day:        {:.2}\n", self.gold_per_day()));
        report.push_str(&format!(
            "  Items Found/Used:    {}/{}\n",
            self.items_found, self.items_used
        ));

        if !self.chapter_progression.is_empty() {
            report.push_str("\n── CHAPTERS ─────────────────────────────────────────────────────\n");
            report.push_str("  Chapter   Day   Result      Game Day\n");
            for record in self.chapter_progression.iter().take(CHAPTER_ROWS_SHOWN) {
                report.push_str(&format!(
                    "  {:7}   {:3}   {:<10}  {:8}\n",
                    record.chapter,
                    record.day,
                    record.result.label(),
                    record.game_day
                ));
            }
            if self.chapter_progression.len() > CHAPTER_ROWS_SHOWN {
                report.push_str(&format!(
                    "  ... {} more (see JSON/CSV export)\n",
                    self.chapter_progression.len() - CHAPTER_ROWS_SHOWN
                ));
            }
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

// camelCase keys with flat time fields, the shape the results viewer reads.
impl Serialize for SimulationResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("SimulationResult", 33)?;
        state.serialize_field("status", &self.status)?;
        state.serialize_field("elapsedMillis", &self.elapsed_millis)?;
        state.serialize_field("totalPlaytimeSeconds", &self.simulation_time.seconds)?;
        state.serialize_field("totalPlaytimeMinutes", &self.simulation_time.minutes)?;
        state.serialize_field("totalPlaytimeHours", &self.simulation_time.hours)?;
        state.serialize_field("totalPlaytimeDays", &self.simulation_time.days)?;
        state.serialize_field("totalGameDays", &self.total_game_days)?;
        state.serialize_field("realPlayerTimeSeconds", &self.real_player_time.seconds)?;
        state.serialize_field("realPlayerTimeMinutes", &self.real_player_time.minutes)?;
        state.serialize_field("realPlayerTimeHours", &self.real_player_time.hours)?;
        state.serialize_field("realPlayerTimeDays", &self.real_player_time.days)?;
        state.serialize_field("chaptersCompleted", &self.chapters_completed)?;
        state.serialize_field("highestChapterReached", &self.highest_chapter_reached)?;
        state.serialize_field("highestDayReached", &self.highest_day_reached)?;
        state.serialize_field("totalBattles", &self.total_battles)?;
        state.serialize_field("battlesWon", &self.battles_won)?;
        state.serialize_field("battlesLost", &self.battles_lost)?;
        state.serialize_field("winRate", &round2(self.win_rate()))?;
        state.serialize_field("totalPokemonCaught", &self.pokemon_caught)?;
        state.serialize_field("totalPokemonEvolved", &self.pokemon_evolved)?;
        state.serialize_field("goldEarned", &self.gold_earned)?;
        state.serialize_field("goldSpent", &self.gold_spent)?;
        state.serialize_field("upgradeGoldSpent", &self.upgrade_gold_spent)?;
        state.serialize_field("goldLost", &self.gold_lost)?;
        state.serialize_field("netGold", &self.net_gold())?;
        state.serialize_field("finalGold", &self.final_gold)?;
        state.serialize_field("itemsFound", &self.items_found)?;
        state.serialize_field("itemsUsed", &self.items_used)?;
        state.serialize_field("finalParty", &self.final_party)?;
        state.serialize_field("finalPower", &self.final_power)?;
        state.serialize_field("totalPowerProgression", &self.power_progression)?;
        state.serialize_field("chapterProgression", &self.chapter_progression)?;
        state.serialize_field("battleLog", &self.battle_log)?;
        state.end()
    }
}

fn per_day(total: u64, days: u64) -> f64 {
    if days == 0 {
        0.0
    } else {
        total as f64 / days as f64
    }
}
