//! Game tunables and startup validation.
//!
//! Everything the simulation reads lives in [`GameConfig`]. A bad config is
//! a fatal startup condition, never a per-frame one, so [`GameConfig::validate`]
//! is called once before the frame loop starts.

use std::fmt;
use std::time::Duration;

use crate::constants::*;

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub world_width: f64,
    pub world_height: f64,
    pub ground_height: f64,

    pub avatar_x: f64,
    pub avatar_start_y: f64,
    pub avatar_radius: f64,
    pub gravity: f64,
    pub jump_impulse: f64,

    pub obstacle_width: f64,
    pub gap_anchor_min: i32,
    pub gap_anchor_max: i32,
    pub spawn_interval: Duration,

    pub base_speed: f64,
    pub base_gap: f64,
    pub min_gap: f64,
    pub gap_shrink_per_level: f64,
    pub points_per_level: u32,
    pub level_up_display_frames: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            ground_height: GROUND_HEIGHT,
            avatar_x: AVATAR_X,
            avatar_start_y: AVATAR_START_Y,
            avatar_radius: AVATAR_RADIUS,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            obstacle_width: OBSTACLE_WIDTH,
            gap_anchor_min: GAP_ANCHOR_MIN,
            gap_anchor_max: GAP_ANCHOR_MAX,
            spawn_interval: Duration::from_millis(SPAWN_INTERVAL_MS),
            base_speed: BASE_OBSTACLE_SPEED,
            base_gap: BASE_GAP_WIDTH,
            min_gap: MIN_GAP_WIDTH,
            gap_shrink_per_level: GAP_SHRINK_PER_LEVEL,
            points_per_level: POINTS_PER_LEVEL,
            level_up_display_frames: LEVEL_UP_DISPLAY_FRAMES,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NonPositiveWorld { width: f64, height: f64 },
    GroundTooTall { ground: f64, world_height: f64 },
    NonPositiveGapFloor(f64),
    GapFloorAboveBase { floor: f64, base: f64 },
    EmptyAnchorRange { min: i32, max: i32 },
    BaseGapExceedsAnchor { base: f64, anchor_max: i32 },
    AnchorBelowWorld { anchor_max: i32, world_height: f64 },
    AvatarOutOfBounds { top: f64, bottom: f64 },
    NonPositiveObstacleWidth(f64),
    ZeroSpawnInterval,
    ZeroPointsPerLevel,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositiveWorld { width, height } => {
                write!(f, "world size must be positive, got {}x{}", width, height)
            }
            ConfigError::GroundTooTall { ground, world_height } => {
                write!(f, "ground height {} leaves no room in a world {} tall", ground, world_height)
            }
            ConfigError::NonPositiveGapFloor(floor) => {
                write!(f, "minimum gap width must be positive, got {}", floor)
            }
            ConfigError::GapFloorAboveBase { floor, base } => {
                write!(f, "minimum gap width {} is larger than the base gap {}", floor, base)
            }
            ConfigError::EmptyAnchorRange { min, max } => {
                write!(f, "gap anchor range {}..={} is empty", min, max)
            }
            ConfigError::BaseGapExceedsAnchor { base, anchor_max } => {
                write!(f, "base gap {} does not fit above the highest gap anchor {}", base, anchor_max)
            }
            ConfigError::AnchorBelowWorld { anchor_max, world_height } => {
                write!(f, "gap anchor {} lies outside a world {} tall", anchor_max, world_height)
            }
            ConfigError::AvatarOutOfBounds { top, bottom } => {
                write!(f, "avatar starts outside the playable band (top {}, bottom {})", top, bottom)
            }
            ConfigError::NonPositiveObstacleWidth(width) => {
                write!(f, "obstacle width must be positive, got {}", width)
            }
            ConfigError::ZeroSpawnInterval => write!(f, "obstacle spawn interval must be non-zero"),
            ConfigError::ZeroPointsPerLevel => write!(f, "points per level must be non-zero"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl GameConfig {
    /// Height of the playable band above the ground strip.
    pub fn floor_y(&self) -> f64 {
        self.world_height - self.ground_height
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world_width <= 0.0 || self.world_height <= 0.0 {
            return Err(ConfigError::NonPositiveWorld {
                width: self.world_width,
                height: self.world_height,
            });
        }
        if self.ground_height < 0.0 || self.ground_height >= self.world_height {
            return Err(ConfigError::GroundTooTall {
                ground: self.ground_height,
                world_height: self.world_height,
            });
        }
        if self.min_gap <= 0.0 {
            return Err(ConfigError::NonPositiveGapFloor(self.min_gap));
        }
        if self.min_gap > self.base_gap {
            return Err(ConfigError::GapFloorAboveBase {
                floor: self.min_gap,
                base: self.base_gap,
            });
        }
        if self.gap_anchor_min > self.gap_anchor_max {
            return Err(ConfigError::EmptyAnchorRange {
                min: self.gap_anchor_min,
                max: self.gap_anchor_max,
            });
        }
        // Gap only shrinks with level, so the base gap is the worst case for the anchor draw.
        if self.base_gap.ceil() > self.gap_anchor_max as f64 {
            return Err(ConfigError::BaseGapExceedsAnchor {
                base: self.base_gap,
                anchor_max: self.gap_anchor_max,
            });
        }
        if self.gap_anchor_max as f64 >= self.world_height {
            return Err(ConfigError::AnchorBelowWorld {
                anchor_max: self.gap_anchor_max,
                world_height: self.world_height,
            });
        }
        let top = self.avatar_start_y - self.avatar_radius;
        let bottom = self.avatar_start_y + self.avatar_radius;
        if top <= 0.0 || bottom >= self.floor_y() {
            return Err(ConfigError::AvatarOutOfBounds { top, bottom });
        }
        if self.obstacle_width <= 0.0 {
            return Err(ConfigError::NonPositiveObstacleWidth(self.obstacle_width));
        }
        if self.spawn_interval.is_zero() {
            return Err(ConfigError::ZeroSpawnInterval);
        }
        if self.points_per_level == 0 {
            return Err(ConfigError::ZeroPointsPerLevel);
        }
        Ok(())
    }
}
