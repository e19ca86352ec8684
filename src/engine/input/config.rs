// Per-player key binding tables

use super::action::{default_bindings, Action, InputSource, PlayerSlot};
use std::collections::HashMap;

/// Input configuration for a single player
/// Maps input sources (keys) to game actions
#[derive(Debug, Clone)]
pub struct InputConfig {
    /// Player this config is for
    player: PlayerSlot,

    /// Mapping from input sources to actions
    bindings: HashMap<InputSource, Action>,
}

impl InputConfig {
    /// Create an empty input configuration
    pub fn new(player: PlayerSlot) -> Self {
        Self {
            player,
            bindings: HashMap::new(),
        }
    }

    /// Create a configuration holding the default bindings for `player`
    pub fn with_defaults(player: PlayerSlot) -> Self {
        let mut config = Self::new(player);
        for (source, action) in default_bindings(player) {
            config.bind(source, action);
        }
        config
    }

    pub fn player(&self) -> PlayerSlot {
        self.player
    }

    /// Bind an input source to an action, replacing any earlier binding
    pub fn bind(&mut self, source: InputSource, action: Action) {
        self.bindings.insert(source, action);
    }

    /// Get the action bound to an input source
    pub fn get_action(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }
}

/// Binding tables for both players
#[derive(Debug, Clone)]
pub struct InputConfigManager {
    configs: [InputConfig; 2],
}

impl InputConfigManager {
    /// Create a config manager with the default layout for both players
    pub fn new() -> Self {
        Self {
            configs: PlayerSlot::ALL.map(InputConfig::with_defaults),
        }
    }

    /// Resolve a source to the first player that has it bound
    pub fn resolve(&self, source: InputSource) -> Option<(PlayerSlot, Action)> {
        self.configs
            .iter()
            .find_map(|config| config.get_action(source).map(|a| (config.player(), a)))
    }
}

impl Default for InputConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
