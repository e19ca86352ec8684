// Projectile fired between fighters

use glam::Vec2;

use super::fighters::Fighter;
use crate::engine::renderer::{Canvas, Color};

/// Horizontal direction of travel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// -1.0 for left, +1.0 for right
    pub fn sign(&self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// Projectile tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileConfig {
    /// Pixels travelled per tick
    pub speed: f32,
    /// Drawn diameter
    pub size: f32,
}

pub const DEFAULT_PROJECTILE: ProjectileConfig = ProjectileConfig {
    speed: 10.0,
    size: 20.0,
};

impl Default for ProjectileConfig {
    fn default() -> Self {
        DEFAULT_PROJECTILE
    }
}

/// A ball flying horizontally at constant speed
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    position: Vec2,
    direction: Direction,
    config: ProjectileConfig,
}

impl Projectile {
    pub fn new(position: Vec2, direction: Direction, config: ProjectileConfig) -> Self {
        Self {
            position,
            direction,
            config,
        }
    }

    /// Move one tick along the direction of travel
    pub fn advance(&mut self) {
        self.position.x += self.config.speed * self.direction.sign();
    }

    /// Whether the projectile's centre is strictly inside the fighter's box.
    ///
    /// The ball's radius is not considered.
    pub fn collides_with(&self, fighter: &Fighter) -> bool {
        fighter.hitbox().contains_exclusive(self.position)
    }

    pub fn render(&self, canvas: &mut impl Canvas) {
        canvas.fill_ellipse(self.position, self.config.size, Color::WHITE);
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn size(&self) -> f32 {
        self.config.size
    }
}
