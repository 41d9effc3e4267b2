//! Drives a [`ProgressionController`] day by day, feeding an observer,
//! honouring cancellation and the day budget.

use super::config::SimConfig;
use super::observer::{CancelToken, SimObserver};
use super::progression::ProgressionController;
use super::report::{format_duration, RunStatus, SimulationResult};
use crate::content::Configuration;
use crate::core::constants::SECONDS_PER_GAME_DAY;
use crate::core::SimResult;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Build the RNG for one run: seeded when a seed is given, fresh entropy otherwise.
pub fn make_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Run one simulation to completion, cancellation, or the day budget.
pub fn run_simulation(
    content: &Configuration,
    config: &SimConfig,
    observer: &mut dyn SimObserver,
    cancel: &CancelToken,
) -> SimResult<SimulationResult> {
    let mut rng = make_rng(config.seed);
    run_with_rng(content, config, observer, cancel, &mut rng)
}

/// Same as [`run_simulation`] with a caller-supplied random source.
pub fn run_with_rng(
    content: &Configuration,
    config: &SimConfig,
    observer: &mut dyn SimObserver,
    cancel: &CancelToken,
    rng: &mut impl Rng,
) -> SimResult<SimulationResult> {
    let mut controller = ProgressionController::new(content)?;
    let delay = config.day_delay(&content.settings);

    log::info!(
        "run started: {} chapters, {} roster entries, seed {:?}",
        content.chapters.len(),
        content.pokemons.len(),
        config.seed
    );

    let status = loop {
        if controller.is_finished() {
            break RunStatus::Completed;
        }
        if cancel.is_cancelled() {
            break RunStatus::Cancelled;
        }
        if let Some(limit) = config.max_game_days {
            if controller.player().total_game_days >= limit {
                log::warn!("day budget of {} reached, stopping run", limit);
                break RunStatus::TimedOut;
            }
        }

        let Some(report) = controller.advance_day(rng) else {
            break RunStatus::Completed;
        };

        for line in &report.messages {
            observer.on_log(line);
        }
        observer.on_progress(&report.snapshot);

        if let Some(delay) = delay {
            std::thread::sleep(delay);
        }
    };

    let days = controller.player().total_game_days;
    let mut closing = controller.take_messages();
    closing.push(match status {
        RunStatus::Completed => "Simulation completed".to_string(),
        RunStatus::Cancelled => "Simulation stopped by user.".to_string(),
        RunStatus::TimedOut => format!("Simulation stopped after {} days.", days),
    });
    closing.push(format!("Total in-game days: {}", days));
    closing.push(format!(
        "Estimated real player time: {}",
        format_duration(days * SECONDS_PER_GAME_DAY)
    ));
    for line in &closing {
        observer.on_log(line);
    }

    let result = controller.finish(status);
    log::info!(
        "run {}: {} game days, {} chapters completed, {} battles in {} ms",
        status.label(),
        result.total_game_days,
        result.chapters_completed,
        result.total_battles,
        result.elapsed_millis
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Chapter, Event, EventKind};
    use crate::creature::Creature;
    use crate::simulator::observer::{NullObserver, RecordingObserver};

    fn one_chapter(days: u32, required: f64) -> Configuration {
        Configuration::new(
            vec![Chapter::new("Route 1", days, required)
                .with_events(vec![Event::new("Chest", EventKind::Treasure).with_reward_gold(10)])],
            vec![Creature::new("Pikachu", 100, 10, 10, 1)],
        )
    }

    #[test]
    fn test_completed_run_reports_every_day() {
        let content = one_chapter(4, 0.0);
        let mut observer = RecordingObserver::default();
        let result = run_simulation(
            &content,
            &SimConfig::seeded(7),
            &mut observer,
            &CancelToken::new(),
        )
        .unwrap();

        assert_eq!(result.status, RunStatus::Completed);
        assert_eq!(observer.snapshots.len(), 4);
        assert_eq!(observer.lines.first().map(String::as_str), Some("Simulation started"));
        assert!(observer.lines.iter().any(|l| l == "Simulation completed"));
        assert!(observer
            .lines
            .iter()
            .any(|l| l == "Estimated real player time: 8 seconds"));
    }

    #[test]
    fn test_pre_cancelled_run_plays_nothing() {
        let content = one_chapter(4, 0.0);
        let cancel = CancelToken::new();
        cancel.cancel();
        let mut observer = RecordingObserver::default();

        let result =
            run_simulation(&content, &SimConfig::seeded(7), &mut observer, &cancel).unwrap();

        assert_eq!(result.status, RunStatus::Cancelled);
        assert_eq!(result.total_game_days, 0);
        assert!(observer.lines.iter().any(|l| l == "Simulation stopped by user."));
    }

    #[test]
    fn test_unreachable_chapter_times_out() {
        let content = one_chapter(2, f64::MAX);
        let config = SimConfig {
            max_game_days: Some(10),
            ..SimConfig::seeded(7)
        };

        let result =
            run_simulation(&content, &config, &mut NullObserver, &CancelToken::new()).unwrap();

        assert_eq!(result.status, RunStatus::TimedOut);
        assert_eq!(result.total_game_days, 10);
        assert_eq!(result.chapters_completed, 0);
        assert_eq!(result.failed_attempts(), 5);
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let content = crate::content::sample::sample_configuration();
        let config = SimConfig {
            max_game_days: Some(200),
            ..SimConfig::seeded(99)
        };
        let a = run_simulation(&content, &config, &mut NullObserver, &CancelToken::new()).unwrap();
        let b = run_simulation(&content, &config, &mut NullObserver, &CancelToken::new()).unwrap();

        assert_eq!(a.total_game_days, b.total_game_days);
        assert_eq!(a.gold_earned, b.gold_earned);
        assert_eq!(a.battle_log, b.battle_log);
    }
}
