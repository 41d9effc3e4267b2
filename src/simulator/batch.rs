//! Multi-run balance analysis.

use super::config::SimConfig;
use super::observer::{CancelToken, NullObserver};
use super::report::{ChapterOutcome, RunStatus, SimulationResult};
use super::runner::{make_rng, run_with_rng};
use crate::content::Configuration;
use crate::core::SimResult;
use serde::Serialize;

/// Run `config.num_runs` independent simulations and aggregate them.
///
/// Run `i` is seeded with `seed + i` when a seed is configured. Cancelling
/// `cancel` stops the current run and skips the rest.
pub fn run_batch(
    content: &Configuration,
    config: &SimConfig,
    cancel: &CancelToken,
) -> SimResult<BatchReport> {
    let mut runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        if cancel.is_cancelled() {
            break;
        }

        let mut rng = make_rng(config.seed_for_run(run_idx));
        let result = run_with_rng(content, config, &mut NullObserver, cancel, &mut rng)?;

        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - {}, {} days, {} chapters, {} battles ({:.1}% won), {} caught, {} evolved",
                run_idx + 1,
                config.num_runs,
                result.status.label(),
                result.total_game_days,
                result.chapters_completed,
                result.total_battles,
                result.win_rate(),
                result.pokemon_caught,
                result.pokemon_evolved
            );
        }
        runs.push(result);
    }

    Ok(BatchReport::from_runs(&runs, content.chapters.len()))
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub num_runs: u32,
    pub runs_completed: u32,
    pub runs_cancelled: u32,
    pub runs_timed_out: u32,

    // Aggregated stats
    pub avg_game_days: f64,
    pub avg_chapters_completed: f64,
    pub avg_battles: f64,
    pub avg_win_rate: f64,
    pub avg_caught: f64,
    pub avg_evolved: f64,
    pub avg_final_power: f64,
    pub avg_final_gold: f64,

    /// Mean failed attempts per chapter, index 0 = chapter 1.
    pub avg_failures_per_chapter: Vec<f64>,

    /// Game days of completed runs, for min/median/max.
    pub completion_days: Vec<u64>,
}

impl BatchReport {
    pub fn from_runs(runs: &[SimulationResult], num_chapters: usize) -> Self {
        let num_runs = runs.len() as u32;
        let count = |status: RunStatus| runs.iter().filter(|r| r.status == status).count() as u32;

        let mut avg_failures_per_chapter = vec![0.0; num_chapters];
        for run in runs {
            for record in &run.chapter_progression {
                if record.result == ChapterOutcome::Failed {
                    if let Some(slot) = avg_failures_per_chapter.get_mut(record.chapter - 1) {
                        *slot += 1.0;
                    }
                }
            }
        }
        for slot in &mut avg_failures_per_chapter {
            *slot /= num_runs.max(1) as f64;
        }

        let mut completion_days: Vec<u64> = runs
            .iter()
            .filter(|r| r.status == RunStatus::Completed)
            .map(|r| r.total_game_days)
            .collect();
        completion_days.sort_unstable();

        Self {
            num_runs,
            runs_completed: count(RunStatus::Completed),
            runs_cancelled: count(RunStatus::Cancelled),
            runs_timed_out: count(RunStatus::TimedOut),
            avg_game_days: mean(runs, |r| r.total_game_days as f64),
            avg_chapters_completed: mean(runs, |r| r.chapters_completed as f64),
            avg_battles: mean(runs, |r| r.total_battles as f64),
            avg_win_rate: mean(runs, |r| r.win_rate()),
            avg_caught: mean(runs, |r| r.pokemon_caught as f64),
            avg_evolved: mean(runs, |r| r.pokemon_evolved as f64),
            avg_final_power: mean(runs, |r| r.final_power),
            avg_final_gold: mean(runs, |r| r.final_gold as f64),
            avg_failures_per_chapter,
            completion_days,
        }
    }

    pub fn completion_rate(&self) -> f64 {
        if self.num_runs == 0 {
            return 0.0;
        }
        self.runs_completed as f64 / self.num_runs as f64 * 100.0
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    BATCH SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} completed, {} cancelled, {} timed out\n\n",
            self.num_runs, self.runs_completed, self.runs_cancelled, self.runs_timed_out
        ));

        report.push_str("── PROGRESSION ──────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Game Days:       {:.1}\n", self.avg_game_days));
        report.push_str(&format!(
            "  Avg Chapters Done:   {:.2}\n",
            self.avg_chapters_completed
        ));
        report.push_str(&format!("  Avg Final Power:     {:.2}\n", self.avg_final_power));
        report.push_str(&format!("  Avg Final Gold:      {:.0}\n\n", self.avg_final_gold));

        report.push_str("── BATTLES & PARTY ──────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Battles:         {:.1}\n", self.avg_battles));
        report.push_str(&format!("  Avg Win Rate:        {:.1}%\n", self.avg_win_rate));
        report.push_str(&format!("  Avg Caught:          {:.2}\n", self.avg_caught));
        report.push_str(&format!("  Avg Evolved:         {:.2}\n\n", self.avg_evolved));

        report.push_str("── CHAPTER RETRIES ──────────────────────────────────────────────\n");
        report.push_str("  Chapter   Avg Failures\n");
        report.push_str("  ───────   ────────────\n");
        for (idx, failures) in self.avg_failures_per_chapter.iter().enumerate() {
            let bar: String = "█".repeat((*failures).min(40.0) as usize);
            report.push_str(&format!("  {:7}   {:12.2} {}\n", idx + 1, failures, bar));
        }
        report.push('\n');

        if !self.completion_days.is_empty() {
            report.push_str("── COMPLETION TIME ──────────────────────────────────────────────\n");
            let min = self.completion_days.first().copied().unwrap_or(0);
            let max = self.completion_days.last().copied().unwrap_or(0);
            let median = self
                .completion_days
                .get(self.completion_days.len() / 2)
                .copied()
                .unwrap_or(0);
            report.push_str(&format!("  Min Days:    {}\n", min));
            report.push_str(&format!("  Median Days: {}\n", median));
            report.push_str(&format!("  Max Days:    {}\n\n", max));
        }

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        report.push_str(&format!("  Completion Rate: {:.1}%\n", self.completion_rate()));
        for (idx, failures) in self.avg_failures_per_chapter.iter().enumerate() {
            if *failures > 5.0 {
                report.push_str(&format!(
                    "  ⚠️  Chapter {} needs {:.1} retries on average - threshold too high?\n",
                    idx + 1,
                    failures
                ));
            }
        }
        if self.runs_timed_out > 0 {
            report.push_str("  ⚠️  Some runs hit the day budget - a chapter may be unclearable\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

fn mean(runs: &[SimulationResult], f: impl Fn(&SimulationResult) -> f64) -> f64 {
    runs.iter().map(f).sum::<f64>() / runs.len().max(1) as f64
}
