use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Direction, Intent, Phase};

/// What a key event means at the application level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// A game intent to hand to the session
    Game(Intent),
    /// Leave the application
    Quit,
    /// Unrecognized or filtered out by the current phase
    None,
}

/// Maps raw key identifiers to intents, filtered by the current phase.
/// Starting the game is not a key mapping; the app triggers it as an
/// explicit action, so every game key is dead while NotStarted.
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn map_key(&self, key: KeyEvent, phase: Phase) -> KeyAction {
        // Quit keys work in every phase
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }
        if matches!(
            key.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) {
            return KeyAction::Quit;
        }

        if phase == Phase::NotStarted {
            return KeyAction::None;
        }

        match key.code {
            // Space restarts after a game over, otherwise toggles pause
            KeyCode::Char(' ') => {
                if phase == Phase::GameOver {
                    KeyAction::Game(Intent::Restart)
                } else {
                    KeyAction::Game(Intent::TogglePause)
                }
            }

            // Movement, only meaningful while the game is running
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
                self.movement(Direction::Up, phase)
            }
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
                self.movement(Direction::Down, phase)
            }
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                self.movement(Direction::Left, phase)
            }
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                self.movement(Direction::Right, phase)
            }

            _ => KeyAction::None,
        }
    }

    fn movement(&self, direction: Direction, phase: Phase) -> KeyAction {
        if phase == Phase::Running {
            KeyAction::Game(Intent::Move(direction))
        } else {
            KeyAction::None
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
