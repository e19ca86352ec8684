// Game action definitions and mappings

use std::fmt;
use winit::keyboard::KeyCode;

/// Logical actions a player can trigger from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Switch the fighter back to its idle animation
    Idle,
    Attack,
    Defend,
    /// Launch the ball toward the opponent
    Fire,
    /// Step toward the opponent
    Advance,
    /// Return to the starting position
    Reset,
}

/// Which of the two local players an input belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    pub const ALL: [PlayerSlot; 2] = [PlayerSlot::One, PlayerSlot::Two];

    /// Zero-based index of the slot
    pub fn index(&self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }
}

impl fmt::Display for PlayerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.index() + 1)
    }
}

/// A resolved key press: who did what
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub player: PlayerSlot,
    pub action: Action,
}

impl Command {
    pub fn new(player: PlayerSlot, action: Action) -> Self {
        Self { player, action }
    }
}

/// Represents an input source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
}

impl InputSource {
    /// Create a keyboard input source
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }
}

/// Default keyboard bindings for Player 1 (left side of the keyboard)
pub fn default_p1_bindings() -> Vec<(InputSource, Action)> {
    vec![
        (InputSource::key(KeyCode::KeyQ), Action::Idle),
        (InputSource::key(KeyCode::KeyW), Action::Attack),
        (InputSource::key(KeyCode::KeyE), Action::Defend),
        (InputSource::key(KeyCode::KeyR), Action::Fire),
        (InputSource::key(KeyCode::KeyD), Action::Advance),
        (InputSource::key(KeyCode::KeyA), Action::Reset),
    ]
}

/// Default keyboard bindings for Player 2 (arrows plus J/L)
pub fn default_p2_bindings() -> Vec<(InputSource, Action)> {
    vec![
        (InputSource::key(KeyCode::ArrowLeft), Action::Idle),
        (InputSource::key(KeyCode::ArrowDown), Action::Attack),
        (InputSource::key(KeyCode::ArrowRight), Action::Defend),
        (InputSource::key(KeyCode::ArrowUp), Action::Fire),
        (InputSource::key(KeyCode::KeyL), Action::Advance),
        (InputSource::key(KeyCode::KeyJ), Action::Reset),
    ]
}

/// Default bindings for a slot
pub fn default_bindings(player: PlayerSlot) -> Vec<(InputSource, Action)> {
    match player {
        PlayerSlot::One => default_p1_bindings(),
        PlayerSlot::Two => default_p2_bindings(),
    }
}
