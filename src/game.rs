use std::io::{self, Write};
use std::time::Instant;

use log::{error, info};
use rand::Rng;

use crate::config::GameConfig;
use crate::constants::FRAME_DURATION;
use crate::rendering::{GameGrid, OutputTarget, Viewport, build_frame};
use crate::state::{Flow, GameEvent, GameState};
use crate::terminal_io::InputSource;
use crate::timer::SpawnTimer;

pub struct Game {
    pub viewport: Viewport,
    pub stdout_target: OutputTarget,
    pub state: GameState,
    input: InputSource,
    spawn_timer: SpawnTimer,
    debug_mode_active: bool,
    max_frames: Option<u64>,
}

impl Game {
    pub fn new(
        config: GameConfig,
        terminal_width: u16,
        terminal_height: u16,
        stdout_target: OutputTarget,
        input: InputSource,
        debug_mode_active: bool,
        max_frames: Option<u64>,
    ) -> Self {
        Game {
            viewport: Viewport::new(terminal_width, terminal_height, &config),
            stdout_target,
            spawn_timer: SpawnTimer::new(config.spawn_interval),
            state: GameState::new(config),
            input,
            debug_mode_active,
            max_frames,
        }
    }

    /// Runs frames until a quit or the frame limit. Returns the number of frames run.
    pub fn run(&mut self) -> io::Result<u64> {
        self.run_with_rng(&mut rand::thread_rng())
    }

    pub fn run_with_rng<R: Rng>(&mut self, rng: &mut R) -> io::Result<u64> {
        let frame_duration = FRAME_DURATION;
        let mut game_grid = GameGrid::new(self.viewport.columns, self.viewport.rows);
        let mut frame_count = 0;
        let mut last_frame = Instant::now();

        while self.max_frames.is_none_or(|max| frame_count < max) {
            let frame_start = Instant::now();
            // Headless runs step the clock by exactly one frame so spawns are reproducible
            let dt = if self.debug_mode_active {
                frame_duration
            } else {
                frame_start.duration_since(last_frame)
            };
            last_frame = frame_start;

            let mut events = self.input.poll_events(frame_count, &mut self.viewport)?;
            for _ in 0..self.spawn_timer.advance(dt) {
                events.push(GameEvent::SpawnObstacle);
            }

            if self.dispatch(events, rng) == Flow::Exit {
                info!("Exiting after {} frames.", frame_count);
                return Ok(frame_count);
            }
            self.state.update();

            if game_grid.width != self.viewport.columns || game_grid.height != self.viewport.rows {
                game_grid = GameGrid::new(self.viewport.columns, self.viewport.rows);
            }
            self.render(&mut game_grid)?;

            frame_count += 1;

            if !self.debug_mode_active {
                let spent = frame_start.elapsed();
                if spent < frame_duration {
                    std::thread::sleep(frame_duration - spent);
                }
            }
        }

        info!("Frame limit reached after {} frames.", frame_count);
        Ok(frame_count)
    }

    fn dispatch<R: Rng>(&mut self, events: Vec<GameEvent>, rng: &mut R) -> Flow {
        for event in events {
            if self.state.handle_event(event, rng) == Flow::Exit {
                return Flow::Exit;
            }
        }
        Flow::Continue
    }

    fn render(&mut self, game_grid: &mut GameGrid) -> io::Result<()> {
        let frame = build_frame(&self.state);
        game_grid.draw_frame(&self.viewport, &frame);

        if let OutputTarget::ScreenBuffer(ref mut sb) = self.stdout_target {
            sb.clear();
        }
        game_grid
            .render(&mut self.stdout_target)
            .map_err(|e| { error!("Failed to render game grid: {}", e); e })?;
        self.stdout_target
            .flush()
            .map_err(|e| { error!("Failed to flush stdout after rendering: {}", e); e })?;

        if self.debug_mode_active {
            if let OutputTarget::ScreenBuffer(ref sb) = self.stdout_target {
                sb.print_to_log();
            }
        }
        Ok(())
    }
}
