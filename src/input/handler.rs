use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::world::Direction;

/// What a key press asks the frontend to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Stage a heading for the next tick.
    Steer(Direction),
    /// Toggle the start/pause state.
    TogglePause,
    /// Rebuild the session with a fresh world.
    Restart,
    /// Grow the world by one cell per side.
    WidenWorld,
    /// Shrink the world by one cell per side.
    NarrowWorld,
    /// Leave the program.
    Quit,
    /// Anything unmapped.
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Map a key press. Steering listens to the arrow keys only; every
    /// other key either hits a session control or is ignored.
    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Up => KeyAction::Steer(Direction::Up),
            KeyCode::Right => KeyAction::Steer(Direction::Right),
            KeyCode::Down => KeyAction::Steer(Direction::Down),
            KeyCode::Left => KeyAction::Steer(Direction::Left),

            KeyCode::Char(' ') => KeyAction::TogglePause,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,
            KeyCode::Char('+') | KeyCode::Char('=') => KeyAction::WidenWorld,
            KeyCode::Char('-') | KeyCode::Char('_') => KeyAction::NarrowWorld,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrow_keys_steer() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(press(KeyCode::Up)),
            KeyAction::Steer(Direction::Up)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Right)),
            KeyAction::Steer(Direction::Right)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Down)),
            KeyAction::Steer(Direction::Down)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Left)),
            KeyAction::Steer(Direction::Left)
        );
    }

    #[test]
    fn test_only_arrows_steer() {
        let handler = InputHandler::new();

        // WASD is deliberately not bound.
        assert_eq!(handler.handle_key_event(press(KeyCode::Char('w'))), KeyAction::None);
        assert_eq!(handler.handle_key_event(press(KeyCode::Char('a'))), KeyAction::None);
        assert_eq!(handler.handle_key_event(press(KeyCode::Char('x'))), KeyAction::None);
        assert_eq!(handler.handle_key_event(press(KeyCode::Tab)), KeyAction::None);
    }

    #[test]
    fn test_session_controls() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char(' '))),
            KeyAction::TogglePause
        );
        assert_eq!(handler.handle_key_event(press(KeyCode::Char('r'))), KeyAction::Restart);
        assert_eq!(handler.handle_key_event(press(KeyCode::Char('R'))), KeyAction::Restart);
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('+'))),
            KeyAction::WidenWorld
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('='))),
            KeyAction::WidenWorld
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('-'))),
            KeyAction::NarrowWorld
        );
    }

    #[test]
    fn test_quit_keys() {
        let handler = InputHandler::new();

        assert_eq!(handler.handle_key_event(press(KeyCode::Char('q'))), KeyAction::Quit);
        assert_eq!(handler.handle_key_event(press(KeyCode::Esc)), KeyAction::Quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
    }
}
