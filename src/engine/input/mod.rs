// Input handling system
//
// Keyboard presses are resolved to per-player commands:
//
// - `action`: logical actions, player slots and default key bindings
// - `config`: per-player binding tables
// - `manager`: turns winit key events into `Command`s
//
// ```rust
// let input = InputManager::new();
// if let Some(command) = input.process_keyboard_event(&key_event) {
//     arena.handle_command(command);
// }
// ```

pub mod action;
pub mod config;
pub mod manager;

// Re-export commonly used types
pub use action::{Action, Command, PlayerSlot};
pub use manager::InputManager;
