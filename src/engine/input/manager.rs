// Input manager - turns key events into player commands

use super::action::{Command, InputSource};
use super::config::InputConfigManager;
use log::trace;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Maps raw keyboard events to `Command`s for the two players
#[derive(Debug, Default)]
pub struct InputManager {
    config: InputConfigManager,
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            config: InputConfigManager::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&self, event: &KeyEvent) -> Option<Command> {
        match event.physical_key {
            PhysicalKey::Code(code) => self.process_key(code, event.state, event.repeat),
            PhysicalKey::Unidentified(_) => None,
        }
    }

    /// Resolve a key transition to a command.
    ///
    /// Only fresh presses count; releases and OS auto-repeat are ignored.
    pub fn process_key(&self, code: KeyCode, state: ElementState, repeat: bool) -> Option<Command> {
        if state != ElementState::Pressed || repeat {
            return None;
        }

        let (player, action) = self.config.resolve(InputSource::key(code))?;
        trace!("{:?} -> {} {:?}", code, player, action);
        Some(Command::new(player, action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::{Action, PlayerSlot};

    #[test]
    fn test_press_resolves_command() {
        let manager = InputManager::new();
        assert_eq!(
            manager.process_key(KeyCode::KeyW, ElementState::Pressed, false),
            Some(Command::new(PlayerSlot::One, Action::Attack))
        );
        assert_eq!(
            manager.process_key(KeyCode::KeyJ, ElementState::Pressed, false),
            Some(Command::new(PlayerSlot::Two, Action::Reset))
        );
    }

    #[test]
    fn test_release_is_ignored() {
        let manager = InputManager::new();
        assert_eq!(
            manager.process_key(KeyCode::KeyW, ElementState::Released, false),
            None
        );
    }

    #[test]
    fn test_repeat_is_ignored() {
        let manager = InputManager::new();
        assert_eq!(
            manager.process_key(KeyCode::KeyD, ElementState::Pressed, true),
            None
        );
    }

    #[test]
    fn test_unbound_key_is_ignored() {
        let manager = InputManager::new();
        assert_eq!(
            manager.process_key(KeyCode::F5, ElementState::Pressed, false),
            None
        );
    }
}
