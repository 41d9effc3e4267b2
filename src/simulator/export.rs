//! Flat tables for spreadsheet export, and a CSV writer for them.

use super::report::{format_duration, format_mm_ss, SimulationResult};
use crate::core::constants::SECONDS_PER_GAME_DAY;
use crate::creature::{round2, CreatureSnapshot};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A named sheet: header row plus data rows, all cells as text.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: &'static str,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    fn new(name: &'static str, headers: &[&'static str]) -> Self {
        Self {
            name,
            headers: headers.to_vec(),
            rows: Vec::new(),
        }
    }

    fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// RFC 4180 text; cells holding commas, quotes or newlines are quoted.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        write_csv_row(&mut out, self.headers.iter().copied());
        for row in &self.rows {
            write_csv_row(&mut out, row.iter().map(String::as_str));
        }
        out
    }

    /// File name used by [`write_csv`], e.g. `power_progression.csv`.
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.name.to_lowercase().replace(' ', "_"))
    }
}

fn write_csv_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>) {
    for (idx, cell) in cells.enumerate() {
        if idx > 0 {
            out.push(',');
        }
        if cell.contains(&[',', '"', '\n', '\r'][..]) {
            out.push('"');
            out.push_str(&cell.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(cell);
        }
    }
    out.push('\n');
}

/// Every counter and duration breakdown as one key/value row each.
pub fn summary_table(result: &SimulationResult) -> Table {
    let mut table = Table::new("Summary", &["Metric", "Value"]);
    let mut row = |key: &str, value: String| table.push(vec![key.to_string(), value]);

    row("Status", result.status.label().to_string());
    row("Simulation Time (ms)", result.elapsed_millis.to_string());
    row("Simulation Time (seconds)", result.simulation_time.seconds.to_string());
    row("Simulation Time (minutes)", result.simulation_time.minutes.to_string());
    row("Simulation Time (hours)", result.simulation_time.hours.to_string());
    row("Simulation Time (days)", result.simulation_time.days.to_string());
    row("Real Player Time (seconds)", result.real_player_time.seconds.to_string());
    row("Real Player Time (minutes)", result.real_player_time.minutes.to_string());
    row("Real Player Time (hours)", result.real_player_time.hours.to_string());
    row("Real Player Time (days)", result.real_player_time.days.to_string());
    row(
        "Real Player Time",
        format_duration(result.real_player_time.seconds),
    );
    row("Total Game Days", result.total_game_days.to_string());
    row("Chapters Completed", result.chapters_completed.to_string());
    row("Highest Chapter Reached", result.highest_chapter_reached.to_string());
    row("Highest Day Reached", result.highest_day_reached.to_string());
    row("Total Battles", result.total_battles.to_string());
    row("Battles Won", result.battles_won.to_string());
    row("Battles Lost", result.battles_lost.to_string());
    row("Win Rate (%)", format!("{:.1}", result.win_rate()));
    row("Pokemon Caught", result.pokemon_caught.to_string());
    row("Pokemon Evolved", result.pokemon_evolved.to_string());
    row("Gold Earned", result.gold_earned.to_string());
    row("Gold Spent", result.gold_spent.to_string());
    row("Upgrade Gold Spent", result.upgrade_gold_spent.to_string());
    row("Net Gold", result.net_gold().to_string());
    row("Gold Lost", result.gold_lost.to_string());
    row("Final Gold", result.final_gold.to_string());
    row("Items Found", result.items_found.to_string());
    row("Items Used", result.items_used.to_string());
    row("Final Power", round2(result.final_power).to_string());

    table
}

/// One row per simulated day; elapsed time assumes 2 s per row.
pub fn power_progression_table(result: &SimulationResult) -> Table {
    let mut table = Table::new(
        "Power Progression",
        &["Chapter", "Day", "Total Power", "Elapsed Seconds", "Elapsed (mm:ss)"],
    );
    for (idx, sample) in result.power_progression.iter().enumerate() {
        let elapsed = idx as u64 * SECONDS_PER_GAME_DAY;
        table.push(vec![
            sample.chapter.to_string(),
            sample.day.to_string(),
            round2(sample.total_power).to_string(),
            elapsed.to_string(),
            format_mm_ss(elapsed),
        ]);
    }
    table
}

/// One row per chapter decision, with cumulative elapsed time.
pub fn chapter_progression_table(result: &SimulationResult) -> Table {
    let mut table = Table::new(
        "Chapter Progression",
        &["Chapter", "Day", "Result", "Elapsed Seconds", "Elapsed (mm:ss)"],
    );
    for record in &result.chapter_progression {
        let elapsed = record.game_day * SECONDS_PER_GAME_DAY;
        table.push(vec![
            record.chapter.to_string(),
            record.day.to_string(),
            record.result.label().to_string(),
            elapsed.to_string(),
            format_mm_ss(elapsed),
        ]);
    }
    table
}

pub fn battle_log_table(result: &SimulationResult) -> Table {
    let mut table = Table::new(
        "Battle Log",
        &["Battle", "Result", "Rounds", "Player Party", "Enemy Party"],
    );
    for (idx, battle) in result.battle_log.iter().enumerate() {
        table.push(vec![
            (idx + 1).to_string(),
            battle.result.label().to_string(),
            battle.rounds.to_string(),
            party_labels(&battle.player_party),
            party_labels(&battle.enemy_party),
        ]);
    }
    table
}

fn party_labels(party: &[CreatureSnapshot]) -> String {
    party
        .iter()
        .map(CreatureSnapshot::label)
        .collect::<Vec<_>>()
        .join(", ")
}

/// All four sheets, in workbook order.
pub fn export_tables(result: &SimulationResult) -> Vec<Table> {
    vec![
        summary_table(result),
        power_progression_table(result),
        chapter_progression_table(result),
        battle_log_table(result),
    ]
}

/// Write one CSV per sheet into `dir` (created if missing).
pub fn write_csv(result: &SimulationResult, dir: impl AsRef<Path>) -> io::Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let mut written = Vec::new();
    for table in export_tables(result) {
        let path = dir.join(table.file_name());
        fs::write(&path, table.to_csv())?;
        log::debug!("wrote {} rows to {}", table.rows.len(), path.display());
        written.push(path);
    }
    Ok(written)
}
