//! Chapter/day state machine.
//!
//! The controller owns the player and the aggregator for the whole run. Each
//! call to [`ProgressionController::advance_day`] plays exactly one in-game
//! day, then settles whatever chapter bookkeeping that day triggered
//! (completion, failure and retry, the next chapter's start, the end of the
//! game) before handing back the day's narrative.

use super::context::RunContext;
use super::events::run_day_events;
use super::observer::ProgressSnapshot;
use super::report::{ChapterOutcome, ResultAggregator, RunStatus, SimulationResult};
use super::upgrade::upgrade_party;
use crate::content::{Chapter, Configuration, Roster};
use crate::core::{PlayerState, SimError, SimResult};
use crate::creature::round2;
use rand::Rng;

/// Where the controller is between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// About to enter chapter `idx`, or finish if there is none.
    AwaitingChapter(usize),
    /// Next call plays `day` (1-based) of `chapter`.
    RunningDay { chapter: usize, day: u32 },
    /// Last day played; the power check is due.
    ChapterResolution { chapter: usize },
    ChapterCompleted(usize),
    Finished,
}

/// One simulated day's output.
#[derive(Debug, Clone)]
pub struct DayReport {
    pub snapshot: ProgressSnapshot,
    /// Narrative lines in the order they happened, including any chapter
    /// bookkeeping that followed the day.
    pub messages: Vec<String>,
}

pub struct ProgressionController<'a> {
    config: &'a Configuration,
    roster: Roster,
    ctx: RunContext,
    phase: Phase,
}

impl<'a> ProgressionController<'a> {
    /// Validate `config` and set up a player holding the first roster entry.
    pub fn new(config: &'a Configuration) -> SimResult<Self> {
        config.validate()?;
        let roster = config.roster();
        let starter = roster.starter().ok_or(SimError::EmptyRoster)?;

        let mut ctx = RunContext::new(PlayerState::new(starter));
        ctx.log("Simulation started");
        ctx.log(format!("Starting with Pokemon: {}", starter.name));

        Ok(Self {
            config,
            roster,
            ctx,
            phase: Phase::AwaitingChapter(0),
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn player(&self) -> &PlayerState {
        &self.ctx.player
    }

    pub fn results(&self) -> &ResultAggregator {
        &self.ctx.results
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Play one day. Returns `None` once every chapter is done.
    pub fn advance_day(&mut self, rng: &mut impl Rng) -> Option<DayReport> {
        self.settle();

        let Phase::RunningDay { chapter: idx, day } = self.phase else {
            return None;
        };
        let config = self.config;
        let chapter = &config.chapters[idx];

        self.ctx.player.current_day = day;
        self.ctx.player.total_game_days += 1;
        self.ctx.results.record_day(idx, day);
        self.ctx.log(format!("Day {} of Chapter {}", day, idx + 1));

        run_day_events(&mut self.ctx, chapter, rng);

        let power = self.ctx.player.party_power();
        self.ctx.results.record_power_sample(idx, day, power);

        let snapshot = ProgressSnapshot {
            chapter: idx + 1,
            total_chapters: config.chapters.len(),
            day,
            current_power: power,
            required_power: chapter.required_power_to_complete,
            total_game_days: self.ctx.player.total_game_days,
        };

        self.phase = if day >= chapter.effective_days() {
            Phase::ChapterResolution { chapter: idx }
        } else {
            Phase::RunningDay {
                chapter: idx,
                day: day + 1,
            }
        };
        self.settle();

        Some(DayReport {
            snapshot,
            messages: self.ctx.take_messages(),
        })
    }

    /// Lines logged since the last report, e.g. the closing line of a run.
    pub fn take_messages(&mut self) -> Vec<String> {
        self.ctx.take_messages()
    }

    /// Stamp the run with `status` and produce its report.
    pub fn finish(self, status: RunStatus) -> SimulationResult {
        let RunContext {
            player, results, ..
        } = self.ctx;
        results.finalize(status, &player)
    }

    /// Step through every transition that doesn't play a day.
    fn settle(&mut self) {
        loop {
            match self.phase {
                Phase::RunningDay { .. } | Phase::Finished => return,
                Phase::AwaitingChapter(idx) => self.enter_chapter(idx),
                Phase::ChapterResolution { chapter } => self.resolve_chapter(chapter),
                Phase::ChapterCompleted(idx) => {
                    self.phase = Phase::AwaitingChapter(idx + 1);
                }
            }
        }
    }

    fn enter_chapter(&mut self, idx: usize) {
        let Some(chapter) = self.config.chapters.get(idx) else {
            self.ctx.log("All chapters completed! Game finished.");
            log::debug!("all {} chapters cleared", self.config.chapters.len());
            self.phase = Phase::Finished;
            return;
        };

        if chapter.days == 0 {
            log::warn!("chapter '{}' has no days, playing it as one", chapter.name);
        }
        log::debug!("entering chapter {} ({})", idx + 1, chapter.name);

        self.ctx.player.current_chapter = idx;
        self.ctx.player.current_day = 1;
        self.ctx
            .log(format!("Starting Chapter {}: {}", idx + 1, chapter.name));
        self.phase = Phase::RunningDay {
            chapter: idx,
            day: 1,
        };
    }

    fn resolve_chapter(&mut self, idx: usize) {
        let chapter: &Chapter = &self.config.chapters[idx];
        let power = self.ctx.player.party_power();
        let day = self.ctx.player.current_day;
        let game_day = self.ctx.player.total_game_days;

        if power >= chapter.required_power_to_complete {
            self.ctx
                .results
                .record_chapter(idx, day, ChapterOutcome::Completed, game_day);
            self.ctx.log(format!(
                "Chapter {} completed! Party power: {}",
                idx + 1,
                round2(power)
            ));
            log::debug!("chapter {} cleared on game day {}", idx + 1, game_day);
            self.phase = Phase::ChapterCompleted(idx);
        } else {
            self.ctx
                .results
                .record_chapter(idx, day, ChapterOutcome::Failed, game_day);
            self.ctx.log(format!(
                "Failed to complete Chapter {}. Required power: {}, Current power: {}",
                idx + 1,
                chapter.required_power_to_complete,
                round2(power)
            ));
            log::debug!("chapter {} failed, retrying", idx + 1);

            upgrade_party(&mut self.ctx, &self.roster);

            self.ctx.player.current_day = 1;
            self.phase = Phase::RunningDay {
                chapter: idx,
                day: 1,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Event, EventKind};
    use crate::creature::Creature;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn starter() -> Creature {
        Creature::new("Pikachu", 100, 10, 10, 1)
    }

    fn chest(gold: u64) -> Event {
        Event::new("Chest", EventKind::Treasure).with_reward_gold(gold)
    }

    #[test]
    fn test_zero_threshold_completes_first_evaluation() {
        let config = Configuration::new(
            vec![Chapter::new("Route 1", 3, 0.0).with_events(vec![chest(1)])],
            vec![starter()],
        );
        let mut controller = ProgressionController::new(&config).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let mut days = 0;
        while controller.advance_day(&mut rng).is_some() {
            days += 1;
        }

        assert_eq!(days, 3);
        assert!(controller.is_finished());
        let result = controller.finish(RunStatus::Completed);
        assert_eq!(result.chapters_completed, 1);
        assert_eq!(result.chapter_progression.len(), 1);
        assert_eq!(result.chapter_progression[0].result, ChapterOutcome::Completed);
    }

    #[test]
    fn test_day_index_never_exceeds_chapter_days() {
        let config = Configuration::new(
            vec![
                Chapter::new("A", 2, 0.0).with_events(vec![chest(5)]),
                Chapter::new("B", 4, 0.0).with_events(vec![chest(5)]),
            ],
            vec![starter()],
        );
        let mut controller = ProgressionController::new(&config).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        while let Some(report) = controller.advance_day(&mut rng) {
            let days = config.chapters[report.snapshot.chapter - 1].days;
            assert!(report.snapshot.day >= 1 && report.snapshot.day <= days);
        }
        assert_eq!(controller.player().total_game_days, 6);
    }

    #[test]
    fn test_failed_chapter_retries_from_day_one() {
        // Unreachable for the first pass; the retry upgrades the party.
        let config = Configuration::new(
            vec![Chapter::new("Gym", 2, 28.0).with_events(vec![chest(0)])],
            vec![starter()],
        );
        let mut controller = ProgressionController::new(&config).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        controller.advance_day(&mut rng);
        let report = controller.advance_day(&mut rng).unwrap();
        assert!(report
            .messages
            .iter()
            .any(|m| m.starts_with("Failed to complete Chapter 1")));
        assert_eq!(
            controller.phase(),
            Phase::RunningDay { chapter: 0, day: 1 }
        );

        // Level 2 after the 50 gold upgrade clears 28.
        while controller.advance_day(&mut rng).is_some() {}
        let result = controller.finish(RunStatus::Completed);
        assert_eq!(result.chapters_completed, 1);
        assert_eq!(result.total_game_days, 4);
        assert_eq!(result.failed_attempts(), 1);
        assert_eq!(result.upgrade_gold_spent, 50);
        assert_eq!(result.gold_spent, 0);
    }

    #[test]
    fn test_zero_day_chapter_plays_once() {
        let config = Configuration::new(
            vec![Chapter::new("Blink", 0, 0.0).with_events(vec![chest(1)])],
            vec![starter()],
        );
        let mut controller = ProgressionController::new(&config).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(4);

        assert!(controller.advance_day(&mut rng).is_some());
        assert!(controller.advance_day(&mut rng).is_none());
        assert_eq!(controller.player().total_game_days, 1);
    }

    #[test]
    fn test_messages_follow_chapter_flow() {
        let config = Configuration::new(
            vec![Chapter::new("Pallet Town", 1, 0.0).with_events(vec![chest(75)])],
            vec![starter()],
        );
        let mut controller = ProgressionController::new(&config).unwrap();
        let report = controller
            .advance_day(&mut ChaCha8Rng::seed_from_u64(5))
            .unwrap();

        assert_eq!(report.messages[0], "Simulation started");
        assert_eq!(report.messages[1], "Starting with Pokemon: Pikachu");
        assert_eq!(report.messages[2], "Starting Chapter 1: Pallet Town");
        assert_eq!(report.messages[3], "Day 1 of Chapter 1");
        assert_eq!(
            report.messages.last().map(String::as_str),
            Some("All chapters completed! Game finished.")
        );
        assert_eq!(report.snapshot.chapter, 1);
        assert_eq!(report.snapshot.total_chapters, 1);
    }

    #[test]
    fn test_rejects_empty_content() {
        let no_chapters = Configuration::new(vec![], vec![starter()]);
        assert!(matches!(
            ProgressionController::new(&no_chapters),
            Err(SimError::NoChapters)
        ));

        let no_roster = Configuration::new(vec![Chapter::new("A", 1, 0.0)], vec![]);
        assert!(matches!(
            ProgressionController::new(&no_roster),
            Err(SimError::EmptyRoster)
        ));
    }
}
