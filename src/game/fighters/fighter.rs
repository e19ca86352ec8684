// Fighter entity

use glam::{Affine2, Vec2};
use log::debug;

use super::animation::{AnimationPlayer, AnimationSet, SpriteSheet};
use super::state::FighterAction;
use super::stats::FighterStats;
use crate::core::math::Rect;
use crate::engine::input::PlayerSlot;
use crate::engine::renderer::{Canvas, Color, TextAlign};
use crate::game::projectile::Direction;

/// Vertical gap between the fighter's top edge and its health bar
const HEALTH_BAR_OFFSET: f32 = 20.0;
const HEALTH_BAR_HEIGHT: f32 = 10.0;
/// Vertical gap between the fighter's top edge and its debug line
const DEBUG_TEXT_OFFSET: f32 = 30.0;
const DEBUG_TEXT_SIZE: f32 = 16.0;

/// One of the two on-screen combatants
#[derive(Debug, Clone)]
pub struct Fighter {
    /// Which player controls this fighter
    pub slot: PlayerSlot,
    /// Top-left corner of the bounding box
    position: Vec2,
    /// Horizontal position restored by `reset_position`
    initial_x: f32,
    /// Faces left when true; sprites are drawn flipped
    mirrored: bool,
    health: u32,
    stats: FighterStats,
    animation: AnimationPlayer,
    /// Bounding box height, taken from the idle animation
    height: f32,
}

impl Fighter {
    /// Create a fighter standing idle at `position` with full health
    pub fn new(
        slot: PlayerSlot,
        position: Vec2,
        sprites: AnimationSet,
        mirrored: bool,
        stats: FighterStats,
    ) -> Self {
        let height = sprites.sheet(FighterAction::Idle).frame_height as f32;
        Self {
            slot,
            position,
            initial_x: position.x,
            mirrored,
            health: stats.max_health,
            stats,
            animation: AnimationPlayer::new(sprites, stats.animation_speed),
            height,
        }
    }

    /// Switch to another action, restarting its animation.
    ///
    /// Asking for the action already playing is a no-op.
    pub fn change_action(&mut self, action: FighterAction) {
        if self.animation.play(action) {
            debug!("{} -> {}", self.slot, action);
        }
    }

    /// Advance the animation clock by one tick
    pub fn advance_frame(&mut self) {
        self.animation.update();
    }

    /// Step toward the side the fighter is facing
    pub fn move_forward(&mut self) {
        self.position.x += self.facing().sign() * self.stats.move_speed;
    }

    /// Return to the starting x; y is left alone
    pub fn reset_position(&mut self) {
        self.position.x = self.initial_x;
    }

    /// Remove health, stopping at zero
    pub fn apply_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    /// Take a projectile hit
    pub fn hit(&mut self) {
        self.apply_damage(self.stats.hit_damage);
    }

    /// Place the fighter's top edge at `y`
    pub fn set_vertical_position(&mut self, y: f32) {
        self.position.y = y;
    }

    /// Direction the fighter faces (and fires)
    pub fn facing(&self) -> Direction {
        if self.mirrored {
            Direction::Left
        } else {
            Direction::Right
        }
    }

    /// Box used for projectile collision
    pub fn hitbox(&self) -> Rect {
        Rect::from_min_size(self.position, Vec2::new(self.bounding_width(), self.height))
    }

    /// Where a projectile fired by this fighter appears, and which way it flies.
    ///
    /// It leaves from the front edge of the bounding box at mid height.
    pub fn launch_point(&self) -> (Vec2, Direction) {
        let facing = self.facing();
        let x = match facing {
            Direction::Right => self.position.x + self.bounding_width(),
            Direction::Left => self.position.x,
        };
        (Vec2::new(x, self.position.y + self.height / 2.0), facing)
    }

    /// Maps the current frame's local space onto the screen, centred in the
    /// bounding box and flipped about its vertical axis when mirrored
    pub fn sprite_transform(&self) -> Affine2 {
        let offset = self.animation.current_sheet().center_offset();
        if self.mirrored {
            Affine2::from_translation(Vec2::new(
                self.position.x + self.bounding_width(),
                self.position.y,
            )) * Affine2::from_scale(Vec2::new(-1.0, 1.0))
                * Affine2::from_translation(Vec2::new(offset, 0.0))
        } else {
            Affine2::from_translation(Vec2::new(self.position.x + offset, self.position.y))
        }
    }

    /// Advance one tick and draw
    pub fn render(&mut self, canvas: &mut impl Canvas) {
        self.advance_frame();
        self.draw(canvas);
    }

    /// Draw the current frame, the health bar and the debug line
    pub fn draw(&self, canvas: &mut impl Canvas) {
        let sheet = self.current_sheet();
        canvas.blit(sheet.texture, sheet.source_rect(), self.sprite_transform());

        canvas.fill_rect(
            Rect::new(
                self.position.x,
                self.position.y - HEALTH_BAR_OFFSET,
                self.health as f32,
                HEALTH_BAR_HEIGHT,
            ),
            Color::RED,
        );

        let label = format!(
            "Width: {} Action: {} Frame: {}",
            sheet.frame_width,
            self.current_action(),
            sheet.current_frame()
        );
        canvas.draw_text(
            &label,
            Vec2::new(
                self.position.x + self.bounding_width() / 2.0,
                self.position.y - DEBUG_TEXT_OFFSET,
            ),
            DEBUG_TEXT_SIZE,
            TextAlign::Center,
            Color::WHITE,
        );
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn initial_x(&self) -> f32 {
        self.initial_x
    }

    #[cfg(test)]
    pub fn is_mirrored(&self) -> bool {
        self.mirrored
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Width of the widest animation frame
    pub fn bounding_width(&self) -> f32 {
        self.animation.sheets().max_frame_width() as f32
    }

    pub fn current_action(&self) -> FighterAction {
        self.animation.current_action()
    }

    pub fn current_sheet(&self) -> &SpriteSheet {
        self.animation.current_sheet()
    }

    pub fn animation(&self) -> &AnimationPlayer {
        &self.animation
    }
}
