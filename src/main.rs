use std::env;
use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, Show},
    event::{DisableMouseCapture, EnableMouseCapture},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode, size},
};
use log::{error, info};

use flappy_levels::constants::{DEBUG_COLUMNS, DEBUG_ROWS, LOG_FILE};
use flappy_levels::rendering::{GameGrid, OutputTarget, ScreenBuffer};
use flappy_levels::terminal_io::{InputSource, SimulatedInput};
use flappy_levels::{Game, GameConfig};

const USAGE: &str = "\
Flappy Levels - terminal arcade game

Usage:
  flappy-levels [max_frames]
  flappy-levels --debug [cols rows [max_frames]]
  flappy-levels --help

Controls:
  Mouse      : Click Start / Exit on the menu
  Space / Up : Jump (restart after game over)
  Esc        : Back to menu after game over
  q          : Quit";

fn main() -> io::Result<()> {
    simple_logging::log_to_file(LOG_FILE, log::LevelFilter::Info)?;
    info!("Starting Flappy Levels.");

    let args: Vec<String> = env::args().collect();
    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h") {
        println!("{}", USAGE);
        return Ok(());
    }
    let debug_mode_active = args.len() > 1 && args[1] == "--debug";

    let config = GameConfig::default();
    if let Err(e) = config.validate() {
        error!("Invalid game configuration: {}", e);
        eprintln!("Invalid game configuration: {}", e);
        return Err(io::Error::new(io::ErrorKind::InvalidInput, e));
    }

    let max_frames: Option<u64> = if debug_mode_active {
        args.get(4).and_then(|arg| arg.parse::<u64>().ok())
    } else {
        args.get(1).and_then(|arg| arg.parse::<u64>().ok())
    };

    if debug_mode_active {
        info!("Debug mode enabled.");
        let mut debug_width = DEBUG_COLUMNS;
        let mut debug_height = DEBUG_ROWS;
        if args.len() >= 4 {
            debug_width = args[2].parse::<u16>().unwrap_or(DEBUG_COLUMNS);
            debug_height = args[3].parse::<u16>().unwrap_or(DEBUG_ROWS);
        }
        info!("Debug resolution set to {}x{}", debug_width, debug_height);
        let mut game = Game::new(
            config,
            debug_width,
            debug_height,
            OutputTarget::ScreenBuffer(ScreenBuffer::new(debug_width, debug_height)),
            InputSource::Simulated(SimulatedInput::scripted_demo()),
            true,
            max_frames,
        );
        game.run()?;
        info!("Debug run finished.");
        return Ok(());
    }

    info!("Attempting to enable raw mode.");
    enable_raw_mode().map_err(|e| { error!("Failed to enable raw mode: {}", e); e })?;
    let (terminal_width, terminal_height) = match size() {
        Ok(dimensions) => dimensions,
        Err(e) => {
            error!("Failed to get terminal size: {}", e);
            let _ = disable_raw_mode();
            return Err(e);
        }
    };
    info!("Terminal size: {}x{}", terminal_width, terminal_height);

    let mut stdout_target = OutputTarget::Stdout(io::stdout());
    let result = setup_terminal(&mut stdout_target, terminal_width, terminal_height).and_then(|_| {
        let mut game = Game::new(
            config,
            terminal_width,
            terminal_height,
            stdout_target,
            InputSource::Terminal,
            false,
            max_frames,
        );
        game.run()
    });

    // Restore the terminal even when the game loop failed
    let mut stdout_target = OutputTarget::Stdout(io::stdout());
    restore_terminal(&mut stdout_target);

    match result {
        Ok(frames) => {
            info!("Game exited cleanly after {} frames.", frames);
            Ok(())
        }
        Err(e) => {
            error!("Game loop failed: {}", e);
            Err(e)
        }
    }
}

fn setup_terminal(stdout_target: &mut OutputTarget, terminal_width: u16, terminal_height: u16) -> io::Result<()> {
    info!("Attempting to clear screen and hide cursor.");
    stdout_target
        .execute_other_command(EnterAlternateScreen)
        .map_err(|e| { error!("Failed to enter alternate screen: {}", e); e })?;
    let game_grid_dummy = GameGrid::new(terminal_width, terminal_height);
    game_grid_dummy
        .clear_screen_manual(stdout_target, terminal_width, terminal_height)
        .map_err(|e| { error!("Failed to clear screen manually: {}", e); e })?;
    stdout_target
        .execute_other_command(Hide)
        .map_err(|e| { error!("Failed to hide cursor: {}", e); e })?;
    stdout_target
        .execute_other_command(EnableMouseCapture)
        .map_err(|e| { error!("Failed to enable mouse capture: {}", e); e })?;
    stdout_target
        .flush()
        .map_err(|e| { error!("Failed to flush stdout after initial clear: {}", e); e })?;
    info!("Screen cleared and cursor hidden.");
    Ok(())
}

fn restore_terminal(stdout_target: &mut OutputTarget) {
    if let Err(e) = stdout_target.execute_other_command(DisableMouseCapture) {
        error!("Failed to disable mouse capture on exit: {}", e);
    }
    if let Err(e) = stdout_target.execute_other_command(Show) {
        error!("Failed to show cursor on exit: {}", e);
    }
    if let Err(e) = stdout_target.execute_other_command(LeaveAlternateScreen) {
        error!("Failed to leave alternate screen on exit: {}", e);
    }
    if let Err(e) = disable_raw_mode() {
        error!("Failed to disable raw mode on exit: {}", e);
    }
}
