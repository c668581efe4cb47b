//! Rhythm rain: hit the drum when a drop reaches the hit zone.
//!
//! Drops spawn on a fixed per-level arrival pattern and fall for a
//! level-dependent time. Hits score, misses and landed drops cost points,
//! and the level follows the score. Reaching the target score fills the
//! water gauge and wins.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{EngineError, GameRng, Result};
use crate::effects::{Cue, Effect, EffectBatch, Feedback, Music, Overlay, Presenter, Screen};
use crate::input::Gesture;
use crate::schedule::{PlaybackScheduler, TaskId};

/// One difficulty level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RainLevel {
    /// Minimum score for this level.
    pub threshold: i64,

    /// Gaps (ms) between drop spawns, repeated cyclically.
    pub pattern: Vec<u64>,

    /// Time (ms) a drop takes to land.
    pub fall_ms: u64,
}

/// Rhythm rain configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainConfig {
    /// Spawn clock resolution.
    pub tick_ms: u64,

    /// Score that wins the game.
    pub target_score: i64,

    /// Points per drop hit.
    pub hit_points: i64,

    /// Points lost for a hit on an empty zone or a landed drop.
    pub miss_penalty: i64,

    /// A drop can be hit during its last `hit_window_ms` of falling.
    pub hit_window_ms: u64,

    /// Particles per successful hit.
    pub particles: u32,

    /// How long the level-up message stays up.
    pub level_up_ms: u64,

    /// Levels in ascending threshold order.
    pub levels: Vec<RainLevel>,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            target_score: 300,
            hit_points: 10,
            miss_penalty: 5,
            hit_window_ms: 700,
            particles: 20,
            level_up_ms: 2000,
            levels: vec![
                RainLevel {
                    threshold: 0,
                    pattern: vec![1500, 1500, 2500],
                    fall_ms: 5000,
                },
                RainLevel {
                    threshold: 100,
                    pattern: vec![1200, 600, 600, 2000],
                    fall_ms: 4500,
                },
                RainLevel {
                    threshold: 200,
                    pattern: vec![600, 600, 600, 600, 1200, 1200],
                    fall_ms: 4000,
                },
            ],
        }
    }
}

impl RainConfig {
    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the clock ticks and every level can spawn drops.
    pub fn validate(&self) -> Result<()> {
        if self.tick_ms == 0 {
            return Err(EngineError::ZeroInterval);
        }
        if self.levels.is_empty() {
            return Err(EngineError::NoLevels);
        }
        for (i, level) in self.levels.iter().enumerate() {
            if level.pattern.is_empty() {
                return Err(EngineError::EmptyPattern(i as u32 + 1));
            }
        }
        Ok(())
    }

    /// 1-based level for a score.
    #[must_use]
    pub fn level_for(&self, score: i64) -> u32 {
        self.levels
            .iter()
            .rposition(|l| score >= l.threshold)
            .map_or(1, |i| i as u32 + 1)
    }
}

/// Result of a drum hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitOutcome {
    /// The game is not running.
    Ignored,
    /// `count` drops were in the zone.
    Hit { count: usize },
    /// Nothing was in the zone.
    Miss,
    /// The hit reached the target score.
    Victory,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RainTask {
    Tick,
    Land(u32),
    ClearFeedback,
}

#[derive(Clone, Copy, Debug)]
struct FallingDrop {
    lands_at: u64,
    task: TaskId,
}

/// The rhythm rain game.
#[derive(Clone, Debug)]
pub struct RainGame {
    config: RainConfig,
    rng: GameRng,

    running: bool,
    score: i64,
    level: u32,

    /// Time since the last spawn.
    accumulated: u64,
    pattern_index: usize,

    drops: FxHashMap<u32, FallingDrop>,
    next_drop: u32,

    scheduler: PlaybackScheduler<RainTask>,
    effects: EffectBatch,
}

impl RainGame {
    /// Create the game on the menu with the default levels.
    pub fn new(seed: u64) -> Result<Self> {
        Self::with_config(RainConfig::default(), seed)
    }

    /// Create the game with custom levels.
    pub fn with_config(config: RainConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng: GameRng::new(seed).for_context("lanes"),
            running: false,
            score: 0,
            level: 1,
            accumulated: 0,
            pattern_index: 0,
            drops: FxHashMap::default(),
            next_drop: 0,
            scheduler: PlaybackScheduler::new(),
            effects: EffectBatch::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &RainConfig {
        &self.config
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Current score (never negative).
    #[must_use]
    pub fn score(&self) -> i64 {
        self.score
    }

    /// Current 1-based level.
    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.scheduler.now()
    }

    /// Number of falling drops.
    #[must_use]
    pub fn drop_count(&self) -> usize {
        self.drops.len()
    }

    /// Landing times of the falling drops, earliest first.
    #[must_use]
    pub fn landing_times(&self) -> Vec<u64> {
        let mut times: Vec<u64> = self.drops.values().map(|d| d.lands_at).collect();
        times.sort_unstable();
        times
    }

    /// Leave the menu and start raining.
    pub fn start(&mut self) {
        self.effects.push(Effect::ShowScreen(Screen::Game));
        self.effects.push(Effect::Music(Music::Pause));
        self.reset();
    }

    /// Start over from the victory overlay.
    pub fn play_again(&mut self) {
        self.effects.push(Effect::HideOverlay(Overlay::Victory));
        self.reset();
    }

    /// Stop and leave to the menu.
    pub fn exit(&mut self) {
        self.stop();
        self.effects.push(Effect::ShowScreen(Screen::Menu));
        self.effects.push(Effect::Music(Music::Resume));
    }

    /// Strike the drum.
    pub fn hit(&mut self) -> HitOutcome {
        if !self.running {
            return HitOutcome::Ignored;
        }
        let now = self.scheduler.now();
        let window = self.config.hit_window_ms;
        let mut in_zone: Vec<u32> = self
            .drops
            .iter()
            .filter(|(_, d)| d.lands_at.saturating_sub(now) <= window)
            .map(|(&id, _)| id)
            .collect();
        in_zone.sort_unstable();

        if in_zone.is_empty() {
            self.score -= self.config.miss_penalty;
            self.effects.push(Effect::Cue(Cue::Wrong));
            self.publish_score();
            self.update_level();
            return HitOutcome::Miss;
        }

        for id in &in_zone {
            if let Some(drop) = self.drops.remove(id) {
                self.scheduler.cancel(drop.task);
            }
            self.effects.push(Effect::RemoveDrop(*id));
        }
        self.score += self.config.hit_points * in_zone.len() as i64;
        self.effects.push(Effect::Cue(Cue::Hit));
        self.effects.push(Effect::Cue(Cue::Correct));
        self.effects.push(Effect::Particles {
            count: self.config.particles,
        });
        self.publish_score();
        self.update_level();

        if self.check_win() {
            HitOutcome::Victory
        } else {
            HitOutcome::Hit {
                count: in_zone.len(),
            }
        }
    }

    /// Handle a click on the drum or the space bar.
    pub fn handle(&mut self, gesture: &Gesture) -> HitOutcome {
        match gesture {
            Gesture::Click { .. } => self.hit(),
            Gesture::Key { key } if key == " " || key.eq_ignore_ascii_case("space") => self.hit(),
            _ => HitOutcome::Ignored,
        }
    }

    /// Advance the virtual clock, spawning and landing drops on the way.
    pub fn advance(&mut self, elapsed_ms: u64) {
        let horizon = self.scheduler.now().saturating_add(elapsed_ms);
        while let Some(entry) = self.scheduler.pop_due(horizon) {
            match entry.task {
                RainTask::Tick => self.tick(),
                RainTask::Land(id) => self.land(id),
                RainTask::ClearFeedback => self.effects.push(Effect::Feedback(Feedback::Clear)),
            }
        }
        self.scheduler.settle(horizon);
    }

    /// Take every pending effect.
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        self.effects.drain()
    }

    /// Hand every pending effect to a presenter.
    pub fn flush_to<P: Presenter + ?Sized>(&mut self, presenter: &mut P) {
        self.effects.flush_to(presenter);
    }

    fn reset(&mut self) {
        self.stop();
        self.running = true;
        self.score = 0;
        self.level = 1;
        self.effects.push(Effect::Level(1));
        self.effects.push(Effect::Feedback(Feedback::Clear));
        self.publish_score();
        self.scheduler
            .schedule_after(self.config.tick_ms, RainTask::Tick);
    }

    fn stop(&mut self) {
        self.running = false;
        self.scheduler.cancel_all();
        self.drops.clear();
        self.accumulated = 0;
        self.pattern_index = 0;
        self.effects.push(Effect::ClearDrops);
    }

    fn current_level(&self) -> &RainLevel {
        let index = (self.level as usize).saturating_sub(1);
        &self.config.levels[index.min(self.config.levels.len() - 1)]
    }

    fn tick(&mut self) {
        self.accumulated += self.config.tick_ms;
        let level = self.current_level();
        let gap = level.pattern[self.pattern_index % level.pattern.len()];
        let fall_ms = level.fall_ms;
        let len = level.pattern.len();

        if self.accumulated >= gap {
            self.accumulated = 0;
            self.pattern_index = (self.pattern_index + 1) % len;
            self.spawn(fall_ms);
        }
        self.scheduler
            .schedule_after(self.config.tick_ms, RainTask::Tick);
    }

    fn spawn(&mut self, fall_ms: u64) {
        let id = self.next_drop;
        self.next_drop = self.next_drop.wrapping_add(1);
        let lane = self.rng.gen_unit();
        let task = self.scheduler.schedule_after(fall_ms, RainTask::Land(id));
        let lands_at = self.scheduler.now() + fall_ms;
        self.drops.insert(id, FallingDrop { lands_at, task });
        self.effects.push(Effect::SpawnDrop { id, lane, fall_ms });
    }

    fn land(&mut self, id: u32) {
        if self.drops.remove(&id).is_none() {
            return;
        }
        self.effects.push(Effect::RemoveDrop(id));
        self.effects.push(Effect::Cue(Cue::Wrong));
        self.score -= self.config.miss_penalty;
        self.publish_score();
    }

    fn publish_score(&mut self) {
        self.score = self.score.max(0);
        self.effects.push(Effect::Score(self.score));
        let fill = self.score as f32 / self.config.target_score.max(1) as f32;
        self.effects.push(Effect::WaterLevel(fill.clamp(0.0, 1.0)));
    }

    fn update_level(&mut self) {
        let level = self.config.level_for(self.score);
        if level == self.level {
            return;
        }
        debug!(from = self.level, to = level, score = self.score, "rain level change");
        let up = level > self.level;
        self.level = level;
        // The new pattern starts from its first gap.
        self.pattern_index = 0;
        self.accumulated = 0;
        self.effects.push(Effect::Level(level));
        if up {
            self.effects.push(Effect::Feedback(Feedback::LevelUp(level)));
            self.scheduler
                .schedule_after(self.config.level_up_ms, RainTask::ClearFeedback);
        }
    }

    fn check_win(&mut self) -> bool {
        if self.score < self.config.target_score {
            return false;
        }
        debug!(score = self.score, "rain target reached");
        self.stop();
        self.effects.push(Effect::Feedback(Feedback::Victory));
        self.effects.push(Effect::ShowOverlay(Overlay::Victory));
        self.effects.push(Effect::Celebrate);
        true
    }
}
