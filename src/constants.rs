use std::time::Duration;

// --- World ---
pub const WORLD_WIDTH: f64 = 400.0;
pub const WORLD_HEIGHT: f64 = 600.0;
pub const GROUND_HEIGHT: f64 = 40.0;

// --- Avatar ---
pub const AVATAR_X: f64 = 100.0;
pub const AVATAR_START_Y: f64 = WORLD_HEIGHT / 2.0;
pub const AVATAR_RADIUS: f64 = 14.0;
pub const GRAVITY: f64 = 0.4; // Added to velocity every tick
pub const JUMP_IMPULSE: f64 = -8.0; // Velocity is set to this on jump, not added

// --- Obstacles ---
pub const OBSTACLE_WIDTH: f64 = 60.0;
pub const OBSTACLE_LIP_HEIGHT: f64 = 10.0;
pub const GAP_ANCHOR_MIN: i32 = 150; // Lower rect top, measured from world top
pub const GAP_ANCHOR_MAX: i32 = 400;
pub const SPAWN_INTERVAL_MS: u64 = 1500;

// --- Difficulty ---
pub const BASE_OBSTACLE_SPEED: f64 = 4.0;
pub const BASE_GAP_WIDTH: f64 = 180.0;
pub const MIN_GAP_WIDTH: f64 = 120.0;
pub const GAP_SHRINK_PER_LEVEL: f64 = 5.0;
pub const POINTS_PER_LEVEL: u32 = 10;
pub const LEVEL_UP_DISPLAY_FRAMES: u32 = 60;

// --- Frame loop ---
pub const TARGET_FPS: u64 = 60;
pub const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

// --- Menu layout (world units) ---
pub const BUTTON_WIDTH: f64 = 160.0;
pub const BUTTON_HEIGHT: f64 = 50.0;
pub const START_BUTTON_Y: f64 = WORLD_HEIGHT / 2.0 - 30.0;
pub const EXIT_BUTTON_Y: f64 = WORLD_HEIGHT / 2.0 + 40.0;
pub const BUTTON_X: f64 = WORLD_WIDTH / 2.0 - BUTTON_WIDTH / 2.0;

// --- Headless debug run ---
pub const DEBUG_COLUMNS: u16 = 80;
pub const DEBUG_ROWS: u16 = 24;
pub const DEBUG_QUIT_FRAME: u64 = 600;
pub const DEBUG_JUMP_INTERVAL_FRAMES: u64 = 36;

pub const LOG_FILE: &str = "flappy-levels.log";
