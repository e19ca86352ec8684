// Fighters: animation, action state, stats and the fighter entity

pub mod animation;
pub mod fighter;
pub mod state;
pub mod stats;

pub use animation::{AnimationSet, SpriteSheet};
pub use fighter::Fighter;
pub use state::FighterAction;
pub use stats::BASE_STATS;
