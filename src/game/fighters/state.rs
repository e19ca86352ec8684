// Fighter action state machine

use std::fmt;
use std::str::FromStr;

/// The action a fighter is currently performing; selects which animation plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FighterAction {
    /// Resting loop; the only state a fighter stays in on its own
    #[default]
    Idle,
    Attack,
    Defend,
}

impl FighterAction {
    pub const ALL: [FighterAction; 3] = [Self::Idle, Self::Attack, Self::Defend];

    /// Get the animation name for this action
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Attack => "attack",
            Self::Defend => "defend",
        }
    }

    /// Transient actions play one loop and then hand back to idle
    pub fn is_transient(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

impl fmt::Display for FighterAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when parsing a name that is not one of the three actions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown fighter action: {0}")]
pub struct UnknownAction(pub String);

impl FromStr for FighterAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.name() == s)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}

/// Tracks the current action and whether it should fall back to idle
#[derive(Debug, Clone, Default)]
pub struct ActionStateMachine {
    current: FighterAction,
    returning_to_idle: bool,
}

impl ActionStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current action
    pub fn state(&self) -> FighterAction {
        self.current
    }

    /// Whether the current action reverts to idle when its loop completes
    pub fn returning_to_idle(&self) -> bool {
        self.returning_to_idle
    }

    /// Switch to a new action. Returns false (and changes nothing) if the
    /// fighter is already performing it.
    pub fn transition(&mut self, new_action: FighterAction) -> bool {
        if self.current == new_action {
            return false;
        }
        self.current = new_action;
        self.returning_to_idle = new_action.is_transient();
        true
    }

    /// Called when the current animation wraps back to its first frame.
    /// Returns true if this ended a transient action.
    pub fn loop_completed(&mut self) -> bool {
        if !self.returning_to_idle {
            return false;
        }
        self.current = FighterAction::Idle;
        self.returning_to_idle = false;
        true
    }
}
