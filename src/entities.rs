use std::ops::RangeInclusive;

use log::info;
use rand::Rng;

use crate::config::GameConfig;
use crate::types::{Rect, Vector2D};

// --- Avatar: the falling player body ---
#[derive(Clone, Debug, PartialEq)]
pub struct Avatar {
    pub position: Vector2D, // x never changes during a run
    pub velocity: f64,      // Vertical only, positive is downward
    pub radius: f64,
}

impl Avatar {
    pub fn new(x: f64, y: f64, radius: f64) -> Self {
        Avatar {
            position: Vector2D::new(x, y),
            velocity: 0.0,
            radius,
        }
    }

    pub fn spawn(config: &GameConfig) -> Self {
        Avatar::new(config.avatar_x, config.avatar_start_y, config.avatar_radius)
    }

    /// One physics step. No clamping; leaving the world is the collision check's job.
    pub fn update(&mut self, gravity: f64) {
        self.velocity += gravity;
        self.position.y += self.velocity;
    }

    /// Overrides the current velocity so every jump reaches the same height.
    pub fn jump(&mut self, impulse: f64) {
        self.velocity = impulse;
    }

    pub fn bounds(&self) -> Rect {
        Rect::centered(self.position, self.radius)
    }
}

// --- ObstaclePair: upper and lower rect with a gap between them ---
#[derive(Clone, Debug, PartialEq)]
pub struct ObstaclePair {
    pub upper: Rect,
    pub lower: Rect,
    pub passed: bool, // Set once the avatar has scored against this pair
}

impl ObstaclePair {
    /// `anchor` is the top of the lower rect; the upper rect ends `gap` above it.
    pub fn new(x: f64, anchor: f64, gap: f64, width: f64, world_height: f64) -> Self {
        let upper_height = (anchor - gap).max(0.0);
        ObstaclePair {
            upper: Rect::new(x, 0.0, width, upper_height),
            lower: Rect::new(x, anchor, width, world_height - anchor),
            passed: false,
        }
    }

    /// New pair at the right edge of the world with a random gap position.
    pub fn spawn<R: Rng>(rng: &mut R, config: &GameConfig, gap: f64) -> Self {
        let anchor = rng.gen_range(gap_anchor_range(config, gap));
        info!("Obstacle spawned: anchor {}, gap {}", anchor, gap);
        ObstaclePair::new(
            config.world_width,
            anchor as f64,
            gap,
            config.obstacle_width,
            config.world_height,
        )
    }

    pub fn translate(&mut self, dx: f64) {
        self.upper.translate_x(dx);
        self.lower.translate_x(dx);
    }

    pub fn is_off_screen(&self) -> bool {
        self.lower.right() <= 0.0
    }

    pub fn gap_width(&self) -> f64 {
        self.lower.top() - self.upper.bottom()
    }

    pub fn rects(&self) -> [Rect; 2] {
        [self.upper, self.lower]
    }
}

/// Anchor values a spawn may draw from at the given gap width.
///
/// The lower bound is lifted to the gap so the upper rect never gets a
/// negative height. If difficulty scaling would invert the range it
/// collapses onto the upper bound instead, so the draw is always valid.
pub fn gap_anchor_range(config: &GameConfig, gap: f64) -> RangeInclusive<i32> {
    let max = config.gap_anchor_max;
    let min = config.gap_anchor_min.max(gap.ceil() as i32);
    if min > max { max..=max } else { min..=max }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    #[test]
    fn test_avatar_spawns_at_config_start() {
        let avatar = Avatar::spawn(&GameConfig::default());
        assert_eq!(avatar.position, Vector2D::new(100.0, 300.0));
        assert_eq!(avatar.velocity, 0.0);
        assert_eq!(avatar.radius, 14.0);
    }

    #[test]
    fn test_gravity_accumulates() {
        let mut avatar = Avatar::new(100.0, 300.0, 14.0);
        avatar.update(0.4);
        assert!((avatar.velocity - 0.4).abs() < 1e-9);
        assert!((avatar.position.y - 300.4).abs() < 1e-9);
        avatar.update(0.4);
        assert!((avatar.velocity - 0.8).abs() < 1e-9);
        assert!((avatar.position.y - 301.2).abs() < 1e-9);
        assert_eq!(avatar.position.x, 100.0);
    }

    #[test]
    fn test_jump_overrides_velocity() {
        let mut fast = Avatar::new(100.0, 300.0, 14.0);
        fast.velocity = 12.0;
        fast.jump(-8.0);
        let mut slow = Avatar::new(100.0, 300.0, 14.0);
        slow.velocity = 0.5;
        slow.jump(-8.0);
        assert_eq!(fast.velocity, -8.0);
        assert_eq!(fast.velocity, slow.velocity);
    }

    #[test]
    fn test_avatar_bounds() {
        let avatar = Avatar::new(100.0, 300.0, 14.0);
        assert_eq!(avatar.bounds(), Rect::new(86.0, 286.0, 28.0, 28.0));
    }

    #[test]
    fn test_pair_geometry() {
        let pair = ObstaclePair::new(400.0, 300.0, 180.0, 60.0, 600.0);
        assert_eq!(pair.upper, Rect::new(400.0, 0.0, 60.0, 120.0));
        assert_eq!(pair.lower, Rect::new(400.0, 300.0, 60.0, 300.0));
        assert_eq!(pair.gap_width(), 180.0);
        assert!(!pair.passed);
    }

    #[test]
    fn test_translate_moves_both_rects() {
        let mut pair = ObstaclePair::new(400.0, 300.0, 180.0, 60.0, 600.0);
        pair.translate(-4.0);
        assert_eq!(pair.upper.x, 396.0);
        assert_eq!(pair.lower.x, 396.0);
    }

    #[test]
    fn test_off_screen_once_fully_left() {
        let mut pair = ObstaclePair::new(0.0, 300.0, 180.0, 60.0, 600.0);
        pair.translate(-59.0);
        assert!(!pair.is_off_screen());
        pair.translate(-1.0);
        assert!(pair.is_off_screen());
    }

    #[test]
    fn test_spawn_within_range() {
        let config = GameConfig::default();
        let mut rng = create_test_rng();
        for _ in 0..200 {
            let pair = ObstaclePair::spawn(&mut rng, &config, 180.0);
            assert_eq!(pair.upper.x, config.world_width);
            assert_eq!(pair.upper.width, config.obstacle_width);
            assert!(pair.lower.top() >= 180.0 && pair.lower.top() <= 400.0);
            assert!(pair.upper.height >= 0.0);
            assert_eq!(pair.lower.bottom(), config.world_height);
            assert!((pair.gap_width() - 180.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_anchor_range_respects_configured_bounds() {
        let config = GameConfig::default();
        assert_eq!(gap_anchor_range(&config, 120.0), 150..=400);
        assert_eq!(gap_anchor_range(&config, 180.0), 180..=400);
    }

    #[test]
    fn test_anchor_range_never_inverts() {
        let config = GameConfig::default();
        let range = gap_anchor_range(&config, 500.0);
        assert_eq!(range, 400..=400);
        assert!(!range.is_empty());
    }
}
