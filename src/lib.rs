//! Flappy Levels - a single-screen arcade game for the terminal.
//!
//! The avatar falls under gravity and has to pass through gaps in obstacle
//! pairs scrolling in from the right. Every ten pairs cleared raises the
//! level: obstacles speed up and new gaps get narrower.
//!
//! Modules:
//! - `state`: game state aggregate and the menu/playing/game-over machine
//! - `entities`, `collision`, `scoring`: the simulation pieces it drives
//! - `rendering`, `terminal_io`: crossterm-facing draw and input boundary
//! - `game`: the fixed-rate frame loop

pub mod collision;
pub mod config;
pub mod constants;
pub mod entities;
pub mod game;
pub mod rendering;
pub mod scoring;
pub mod state;
pub mod terminal_io;
pub mod timer;
pub mod types;

pub use config::{ConfigError, GameConfig};
pub use game::Game;
pub use state::{Flow, GameEvent, GameState, Mode};
