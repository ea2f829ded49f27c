use std::collections::HashMap;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};
use log::error;

use crate::constants::{DEBUG_JUMP_INTERVAL_FRAMES, DEBUG_QUIT_FRAME};
use crate::rendering::Viewport;
use crate::state::{GameEvent, START_BUTTON};

/// Maps one terminal event to a game event. Resizes are handled by the caller.
pub fn translate_event(event: &Event, viewport: &Viewport) -> Option<GameEvent> {
    match event {
        Event::Key(key_event) => {
            if key_event.kind != KeyEventKind::Press {
                return None;
            }
            match key_event.code {
                KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => Some(GameEvent::Quit),
                KeyCode::Char('q') => Some(GameEvent::Quit),
                KeyCode::Char(' ') | KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => Some(GameEvent::Jump),
                KeyCode::Esc => Some(GameEvent::Cancel),
                _ => None,
            }
        }
        Event::Mouse(mouse_event) => {
            let position = viewport.to_world(mouse_event.column, mouse_event.row);
            match mouse_event.kind {
                MouseEventKind::Down(MouseButton::Left) => Some(GameEvent::PointerDown(position)),
                MouseEventKind::Moved | MouseEventKind::Drag(_) => Some(GameEvent::PointerMoved(position)),
                _ => None,
            }
        }
        _ => None,
    }
}

// --- SimulatedInput for debugging ---
pub struct SimulatedInput {
    events: HashMap<u64, Vec<GameEvent>>,
}

impl SimulatedInput {
    pub fn new(events: HashMap<u64, Vec<GameEvent>>) -> Self {
        SimulatedInput { events }
    }

    /// Click Start, jump at a steady rhythm, then quit.
    pub fn scripted_demo() -> Self {
        let mut events: HashMap<u64, Vec<GameEvent>> = HashMap::new();
        events.insert(1, vec![GameEvent::PointerDown(START_BUTTON.center())]);
        let mut frame = 10;
        while frame < DEBUG_QUIT_FRAME {
            events.entry(frame).or_default().push(GameEvent::Jump);
            frame += DEBUG_JUMP_INTERVAL_FRAMES;
        }
        events.entry(DEBUG_QUIT_FRAME).or_default().push(GameEvent::Quit);
        SimulatedInput::new(events)
    }

    pub fn poll(&mut self, frame_count: u64) -> Vec<GameEvent> {
        self.events.remove(&frame_count).unwrap_or_default()
    }
}

pub enum InputSource {
    Terminal,
    Simulated(SimulatedInput),
}

impl InputSource {
    /// Drains everything pending for this frame without blocking.
    pub fn poll_events(&mut self, frame_count: u64, viewport: &mut Viewport) -> io::Result<Vec<GameEvent>> {
        match self {
            InputSource::Simulated(sim_input) => Ok(sim_input.poll(frame_count)),
            InputSource::Terminal => {
                let mut events = Vec::new();
                while event::poll(Duration::ZERO).map_err(|e| { error!("Failed to poll event: {}", e); e })? {
                    let terminal_event = event::read().map_err(|e| { error!("Failed to read event: {}", e); e })?;
                    if let Event::Resize(new_width, new_height) = terminal_event {
                        viewport.resize(new_width, new_height);
                        continue;
                    }
                    if let Some(game_event) = translate_event(&terminal_event, viewport) {
                        events.push(game_event);
                    }
                }
                Ok(events)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crossterm::event::{KeyEvent, KeyEventState, MouseEvent};

    fn viewport() -> Viewport {
        Viewport::new(40, 60, &GameConfig::default())
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_key_mapping() {
        let vp = viewport();
        assert_eq!(translate_event(&key(KeyCode::Char(' ')), &vp), Some(GameEvent::Jump));
        assert_eq!(translate_event(&key(KeyCode::Up), &vp), Some(GameEvent::Jump));
        assert_eq!(translate_event(&key(KeyCode::Esc), &vp), Some(GameEvent::Cancel));
        assert_eq!(translate_event(&key(KeyCode::Char('q')), &vp), Some(GameEvent::Quit));
        assert_eq!(translate_event(&key(KeyCode::Char('x')), &vp), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let vp = viewport();
        let event = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(translate_event(&event, &vp), Some(GameEvent::Quit));
    }

    #[test]
    fn test_key_release_is_ignored() {
        let vp = viewport();
        let event = Event::Key(KeyEvent {
            code: KeyCode::Char(' '),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(translate_event(&event, &vp), None);
    }

    #[test]
    fn test_mouse_maps_to_world_position() {
        let vp = viewport();
        let down = mouse(MouseEventKind::Down(MouseButton::Left), 20, 29);
        assert_eq!(
            translate_event(&down, &vp),
            Some(GameEvent::PointerDown(crate::types::Vector2D::new(205.0, 295.0)))
        );
        let moved = mouse(MouseEventKind::Moved, 0, 0);
        assert!(matches!(translate_event(&moved, &vp), Some(GameEvent::PointerMoved(_))));
        let right = mouse(MouseEventKind::Down(MouseButton::Right), 20, 29);
        assert_eq!(translate_event(&right, &vp), None);
    }

    #[test]
    fn test_simulated_input_replays_per_frame() {
        let mut events = HashMap::new();
        events.insert(3, vec![GameEvent::Jump, GameEvent::Cancel]);
        let mut input = SimulatedInput::new(events);
        assert!(input.poll(2).is_empty());
        assert_eq!(input.poll(3), vec![GameEvent::Jump, GameEvent::Cancel]);
        assert!(input.poll(3).is_empty());
    }

    #[test]
    fn test_scripted_demo_starts_and_quits() {
        let mut input = SimulatedInput::scripted_demo();
        assert_eq!(input.poll(1), vec![GameEvent::PointerDown(START_BUTTON.center())]);
        assert_eq!(input.poll(10), vec![GameEvent::Jump]);
        assert_eq!(input.poll(DEBUG_QUIT_FRAME), vec![GameEvent::Quit]);
    }

    #[test]
    fn test_simulated_source_ignores_viewport() {
        let mut vp = viewport();
        let mut source = InputSource::Simulated(SimulatedInput::scripted_demo());
        let events = source.poll_events(1, &mut vp).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(vp, viewport());
    }
}
