//! Scoring and level progression.
//!
//! Score counts obstacle pairs the avatar has cleared. Every
//! `points_per_level` points the level goes up, which speeds obstacles up
//! and narrows the gap of pairs spawned afterwards.

use log::info;

use crate::config::GameConfig;
use crate::entities::ObstaclePair;

/// Obstacle speed and gap width in effect for new spawns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    pub speed: f64,
    pub gap: f64,
}

impl Difficulty {
    /// Starting difficulty of every run.
    pub fn base(config: &GameConfig) -> Self {
        Difficulty {
            speed: config.base_speed,
            gap: config.base_gap,
        }
    }

    /// Derived difficulty after reaching `level`. The gap never drops below the floor.
    pub fn for_level(level: u32, config: &GameConfig) -> Self {
        let level = level as f64;
        Difficulty {
            speed: config.base_speed + level,
            gap: (config.base_gap - level * config.gap_shrink_per_level).max(config.min_gap),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scoreboard {
    pub score: u32,
    pub level: u32,
    pub difficulty: Difficulty,
    /// Frames left to show the level-up banner.
    pub level_up_timer: u32,
}

impl Scoreboard {
    pub fn new(config: &GameConfig) -> Self {
        Scoreboard {
            score: 0,
            level: 1,
            difficulty: Difficulty::base(config),
            level_up_timer: 0,
        }
    }

    /// Adds one point. Returns true if this point crossed a level threshold.
    pub fn record_pass(&mut self, config: &GameConfig) -> bool {
        self.score += 1;
        if self.score % config.points_per_level != 0 {
            return false;
        }
        self.level += 1;
        self.difficulty = Difficulty::for_level(self.level, config);
        self.level_up_timer = config.level_up_display_frames;
        info!(
            "Level up: level {}, score {}, speed {}, gap {}",
            self.level, self.score, self.difficulty.speed, self.difficulty.gap
        );
        true
    }

    pub fn tick_banner(&mut self) {
        self.level_up_timer = self.level_up_timer.saturating_sub(1);
    }

    pub fn banner_active(&self) -> bool {
        self.level_up_timer > 0
    }
}

/// Scores every pair whose lower rect has moved fully behind `avatar_x`.
///
/// Pairs are visited in spawn order so a multi-pass tick levels up on the
/// same pass every time. Already-passed pairs are skipped. Returns the
/// number of new passes.
pub fn score_passed_obstacles(
    obstacles: &mut [ObstaclePair],
    avatar_x: f64,
    scoreboard: &mut Scoreboard,
    config: &GameConfig,
) -> u32 {
    let mut passes = 0;
    for pair in obstacles.iter_mut() {
        if pair.passed || pair.lower.right() >= avatar_x {
            continue;
        }
        pair.passed = true;
        passes += 1;
        scoreboard.record_pass(config);
    }
    passes
}
