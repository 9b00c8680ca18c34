use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::platform::Buttons;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// A console button went down
    Press(Buttons),
    Quit,
    None,
}

/// Maps keyboard keys onto console buttons
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // D-pad - Arrow keys
            KeyCode::Up => KeyAction::Press(Buttons::UP),
            KeyCode::Down => KeyAction::Press(Buttons::DOWN),
            KeyCode::Left => KeyAction::Press(Buttons::LEFT),
            KeyCode::Right => KeyAction::Press(Buttons::RIGHT),

            // D-pad - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Press(Buttons::UP),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Press(Buttons::DOWN),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Press(Buttons::LEFT),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Press(Buttons::RIGHT),

            // Face and system buttons
            KeyCode::Char('z') | KeyCode::Char('Z') => KeyAction::Press(Buttons::A),
            KeyCode::Char('x') | KeyCode::Char('X') => KeyAction::Press(Buttons::B),
            KeyCode::Enter => KeyAction::Press(Buttons::START),
            KeyCode::Char(' ') => KeyAction::Press(Buttons::SELECT),

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
    fn test_arrow_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(press(KeyCode::Up)),
            KeyAction::Press(Buttons::UP)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Down)),
            KeyAction::Press(Buttons::DOWN)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Left)),
            KeyAction::Press(Buttons::LEFT)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Right)),
            KeyAction::Press(Buttons::RIGHT)
        );
    }

    #[test]
    fn test_wasd_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('w'))),
            KeyAction::Press(Buttons::UP)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('a'))),
            KeyAction::Press(Buttons::LEFT)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('s'))),
            KeyAction::Press(Buttons::DOWN)
        );

        let d_upper = KeyEvent::new(KeyCode::Char('D'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.handle_key_event(d_upper),
            KeyAction::Press(Buttons::RIGHT)
        );
    }

    #[test]
    fn test_system_buttons() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(press(KeyCode::Enter)),
            KeyAction::Press(Buttons::START)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char(' '))),
            KeyAction::Press(Buttons::SELECT)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('z'))),
            KeyAction::Press(Buttons::A)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('x'))),
            KeyAction::Press(Buttons::B)
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

    #[test]
    fn test_unknown_key() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('m'))),
            KeyAction::None
        );
    }
}
