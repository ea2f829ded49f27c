use crate::config::GameConfig;
use crate::entities::{Avatar, ObstaclePair};

/// True while the avatar touches no obstacle and stays inside the playable band.
pub fn is_alive(avatar: &Avatar, obstacles: &[ObstaclePair], config: &GameConfig) -> bool {
    !hits_obstacle(avatar, obstacles) && !hits_world_bounds(avatar, config)
}

pub fn hits_obstacle(avatar: &Avatar, obstacles: &[ObstaclePair]) -> bool {
    let bounds = avatar.bounds();
    obstacles
        .iter()
        .flat_map(|pair| pair.rects())
        .any(|rect| bounds.intersects(&rect))
}

/// Touching the ceiling counts, as does touching the top of the ground strip.
pub fn hits_world_bounds(avatar: &Avatar, config: &GameConfig) -> bool {
    let bounds = avatar.bounds();
    bounds.top() <= 0.0 || bounds.bottom() >= config.floor_y()
}
