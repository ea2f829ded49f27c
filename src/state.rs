//! Game state aggregate and mode transitions.
//!
//! `GameState` owns everything a run mutates. The frame loop feeds it
//! events through [`GameState::handle_event`] and then advances it once with
//! [`GameState::update`]. Both dispatch on [`Mode`]:
//!
//! | From     | Event                      | To       |
//! |----------|----------------------------|----------|
//! | Menu     | PointerDown on Start       | Playing  |
//! | Menu     | PointerDown on Exit        | exit     |
//! | Playing  | collision                  | GameOver |
//! | GameOver | Jump                       | Playing  |
//! | GameOver | Cancel                     | Menu     |
//! | any      | Quit                       | exit     |

use log::info;
use rand::Rng;

use crate::collision;
use crate::config::GameConfig;
use crate::constants::*;
use crate::entities::{Avatar, ObstaclePair};
use crate::scoring::{self, Scoreboard};
use crate::types::{Rect, Vector2D};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Menu,
    Playing,
    GameOver,
}

/// Discrete input the core reacts to. Spawn ticks arrive through the same queue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Quit,
    PointerDown(Vector2D),
    PointerMoved(Vector2D),
    Jump,
    Cancel,
    SpawnObstacle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub const START_BUTTON: Rect = Rect::new(BUTTON_X, START_BUTTON_Y, BUTTON_WIDTH, BUTTON_HEIGHT);
pub const EXIT_BUTTON: Rect = Rect::new(BUTTON_X, EXIT_BUTTON_Y, BUTTON_WIDTH, BUTTON_HEIGHT);

#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub config: GameConfig,
    pub mode: Mode,
    pub avatar: Avatar,
    /// Spawn order, oldest first.
    pub obstacles: Vec<ObstaclePair>,
    pub scoreboard: Scoreboard,
    /// Last known pointer position, for button hover.
    pub pointer: Option<Vector2D>,
}

impl GameState {
    pub fn new(config: GameConfig) -> Self {
        GameState {
            avatar: Avatar::spawn(&config),
            obstacles: Vec::new(),
            scoreboard: Scoreboard::new(&config),
            mode: Mode::Menu,
            pointer: None,
            config,
        }
    }

    /// Clears the run back to its starting values. Mode and pointer are left alone.
    pub fn reset(&mut self) {
        self.obstacles.clear();
        self.avatar = Avatar::spawn(&self.config);
        self.scoreboard = Scoreboard::new(&self.config);
    }

    fn start_run(&mut self) {
        self.reset();
        self.mode = Mode::Playing;
        info!("Run started.");
    }

    pub fn handle_event<R: Rng>(&mut self, event: GameEvent, rng: &mut R) -> Flow {
        match event {
            GameEvent::Quit => {
                info!("Quit requested in {:?} mode.", self.mode);
                return Flow::Exit;
            }
            GameEvent::PointerMoved(position) => {
                self.pointer = Some(position);
                return Flow::Continue;
            }
            GameEvent::PointerDown(position) => self.pointer = Some(position),
            _ => {}
        }

        match self.mode {
            Mode::Menu => {
                if let GameEvent::PointerDown(position) = event {
                    if START_BUTTON.contains(position) {
                        self.start_run();
                    } else if EXIT_BUTTON.contains(position) {
                        info!("Exit selected from menu.");
                        return Flow::Exit;
                    }
                }
            }
            Mode::Playing => match event {
                GameEvent::Jump => self.avatar.jump(self.config.jump_impulse),
                GameEvent::SpawnObstacle => {
                    let gap = self.scoreboard.difficulty.gap;
                    self.obstacles.push(ObstaclePair::spawn(rng, &self.config, gap));
                }
                _ => {}
            },
            Mode::GameOver => match event {
                GameEvent::Jump => self.start_run(),
                GameEvent::Cancel => {
                    self.mode = Mode::Menu;
                    info!("Back to menu.");
                }
                _ => {}
            },
        }
        Flow::Continue
    }

    /// Advances one frame. Only Playing mode has anything to simulate.
    pub fn update(&mut self) {
        if self.mode != Mode::Playing {
            return;
        }

        self.scoreboard.tick_banner();
        self.avatar.update(self.config.gravity);

        let dx = -self.scoreboard.difficulty.speed;
        for pair in self.obstacles.iter_mut() {
            pair.translate(dx);
        }
        self.obstacles.retain(|pair| !pair.is_off_screen());

        let alive = collision::is_alive(&self.avatar, &self.obstacles, &self.config);

        // Passes completed on the fatal tick still count
        scoring::score_passed_obstacles(
            &mut self.obstacles,
            self.avatar.position.x,
            &mut self.scoreboard,
            &self.config,
        );

        if !alive {
            self.mode = Mode::GameOver;
            info!(
                "Game over: score {}, level {}.",
                self.scoreboard.score, self.scoreboard.level
            );
        }
    }
}
