// Per-tick match orchestration

use glam::Vec2;
use log::{debug, info};

use super::fighters::{Fighter, FighterAction};
use super::projectile::{Projectile, ProjectileConfig};
use crate::core::math::{within, Rect};
use crate::engine::input::{Action, Command, PlayerSlot};
use crate::engine::renderer::{Canvas, Color, TextAlign, TextureHandle};

const HUD_TEXT_SIZE: f32 = 16.0;
const HUD_LINE_SPACING: f32 = 20.0;
const HUD_TOP: f32 = 30.0;
const HUD_WIDTH_LINE_Y: f32 = 180.0;
/// Left edge of each player's control legend
const HUD_COLUMNS: [f32; 2] = [10.0, 200.0];

const P1_LEGEND: [&str; 7] = [
    "PLAYER 1 CONTROLS:",
    "Q: IDLE",
    "W: ATTACK",
    "E: DEFEND",
    "R: FIRE",
    "D: ADVANCE",
    "A: RESET",
];

const P2_LEGEND: [&str; 7] = [
    "PLAYER 2 CONTROLS:",
    "LEFT: IDLE",
    "DOWN: ATTACK",
    "RIGHT: DEFEND",
    "UP: FIRE",
    "L: ADVANCE",
    "J: RESET",
];

/// Fighters stand with their top edge at this fraction of the viewport height
pub const GROUND_RATIO: f32 = 2.0 / 3.0;

/// Image stretched over the whole viewport each tick
#[derive(Debug, Clone, Copy)]
pub struct Backdrop {
    pub texture: TextureHandle,
    pub size: Vec2,
}

/// What happened to the projectile during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileEvent {
    /// Nothing in flight
    None,
    Flying,
    /// Struck the given player's fighter and was removed
    Hit(PlayerSlot),
    /// Crossed the viewport edge and was removed
    LeftArena,
}

/// Owns both fighters and the projectile, and advances them one tick at a time
#[derive(Debug)]
pub struct MatchLoop {
    fighters: [Fighter; 2],
    projectile: Option<Projectile>,
    projectile_config: ProjectileConfig,
    viewport: Vec2,
    background: Option<Backdrop>,
}

impl MatchLoop {
    /// Create a match. `fighters` is indexed by `PlayerSlot::index`.
    pub fn new(
        fighters: [Fighter; 2],
        viewport: Vec2,
        background: Option<Backdrop>,
        projectile_config: ProjectileConfig,
    ) -> Self {
        Self {
            fighters,
            projectile: None,
            projectile_config,
            viewport,
            background,
        }
    }

    /// Run one frame: draw the scene, then move and resolve the projectile
    pub fn tick(&mut self, canvas: &mut impl Canvas) -> ProjectileEvent {
        let viewport = Rect::from_min_size(Vec2::ZERO, self.viewport);
        match self.background {
            Some(backdrop) => canvas.draw_image(backdrop.texture, backdrop.size, viewport),
            None => canvas.fill_rect(viewport, Color::BLACK),
        }

        for fighter in &mut self.fighters {
            fighter.render(canvas);
        }

        self.draw_hud(canvas);
        self.update_projectile(canvas)
    }

    fn update_projectile(&mut self, canvas: &mut impl Canvas) -> ProjectileEvent {
        let Some(projectile) = &mut self.projectile else {
            return ProjectileEvent::None;
        };

        projectile.advance();
        projectile.render(canvas);

        // first match wins, so one shot never damages both fighters
        let struck = PlayerSlot::ALL
            .into_iter()
            .find(|slot| projectile.collides_with(&self.fighters[slot.index()]));

        if let Some(slot) = struck {
            let fighter = &mut self.fighters[slot.index()];
            fighter.hit();
            info!("{} hit, health {}", slot, fighter.health());
            self.projectile = None;
            return ProjectileEvent::Hit(slot);
        }

        let x = projectile.position().x;
        if !within(x, 0.0, self.viewport.x) {
            info!("Projectile left the arena at x={}", x);
            self.projectile = None;
            return ProjectileEvent::LeftArena;
        }

        ProjectileEvent::Flying
    }

    fn draw_hud(&self, canvas: &mut impl Canvas) {
        for (slot, legend) in PlayerSlot::ALL.into_iter().zip([P1_LEGEND, P2_LEGEND]) {
            let x = HUD_COLUMNS[slot.index()];
            for (line, text) in legend.iter().enumerate() {
                let y = HUD_TOP + line as f32 * HUD_LINE_SPACING;
                canvas.draw_text(text, Vec2::new(x, y), HUD_TEXT_SIZE, TextAlign::Left, Color::WHITE);
            }

            let width = self.fighter(slot).current_sheet().frame_width;
            canvas.draw_text(
                &format!("PLAYER {} WIDTH: {}", slot.index() + 1, width),
                Vec2::new(x, HUD_WIDTH_LINE_Y),
                HUD_TEXT_SIZE,
                TextAlign::Left,
                Color::WHITE,
            );
        }
    }

    /// Apply a resolved key press
    pub fn handle_command(&mut self, command: Command) {
        let fighter = &mut self.fighters[command.player.index()];
        match command.action {
            Action::Idle => fighter.change_action(FighterAction::Idle),
            Action::Attack => fighter.change_action(FighterAction::Attack),
            Action::Defend => fighter.change_action(FighterAction::Defend),
            Action::Advance => fighter.move_forward(),
            Action::Reset => fighter.reset_position(),
            Action::Fire => self.fire(command.player),
        }
    }

    /// Launch a projectile from the given fighter.
    ///
    /// Only one projectile exists at a time; a live one is discarded.
    pub fn fire(&mut self, slot: PlayerSlot) {
        let (position, direction) = self.fighter(slot).launch_point();
        if self.projectile.is_some() {
            debug!("{} fired over a live projectile", slot);
        }
        debug!("{} fired at ({}, {})", slot, position.x, position.y);
        self.projectile = Some(Projectile::new(position, direction, self.projectile_config));
    }

    /// Track a new viewport size; fighters keep their x and move to the new ground line
    pub fn on_resize(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
        let ground = height * GROUND_RATIO;
        for fighter in &mut self.fighters {
            fighter.set_vertical_position(ground);
        }
        info!("Arena resized to {}x{}", width, height);
    }

    pub fn fighter(&self, slot: PlayerSlot) -> &Fighter {
        &self.fighters[slot.index()]
    }

    #[cfg(test)]
    pub fn fighter_mut(&mut self, slot: PlayerSlot) -> &mut Fighter {
        &mut self.fighters[slot.index()]
    }

    pub fn projectile(&self) -> Option<&Projectile> {
        self.projectile.as_ref()
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::renderer::canvas::recording::{DrawCall, RecordingCanvas};
    use crate::game::fighters::{AnimationSet, SpriteSheet, BASE_STATS};
    use crate::game::projectile::{Direction, DEFAULT_PROJECTILE};
    use approx::assert_relative_eq;

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

    fn sprites(first_texture: usize, width: u32) -> AnimationSet {
        let sheet = |offset, height, frames| {
            SpriteSheet::new(
                TextureHandle::from_index(first_texture + offset),
                width,
                height,
                frames,
            )
        };
        AnimationSet::new(sheet(0, 118, 9), sheet(1, 102, 9), sheet(2, 109, 11))
    }

    fn fighter_at(slot: PlayerSlot, x: f32, mirrored: bool) -> Fighter {
        Fighter::new(
            slot,
            Vec2::new(x, VIEWPORT.y * GROUND_RATIO),
            sprites(slot.index() * 3, 60),
            mirrored,
            BASE_STATS,
        )
    }

    fn arena(p1_x: f32, p2_x: f32) -> MatchLoop {
        MatchLoop::new(
            [
                fighter_at(PlayerSlot::One, p1_x, false),
                fighter_at(PlayerSlot::Two, p2_x, true),
            ],
            VIEWPORT,
            None,
            DEFAULT_PROJECTILE,
        )
    }

    fn press(game: &mut MatchLoop, player: PlayerSlot, action: Action) {
        game.handle_command(Command::new(player, action));
    }

    #[test]
    fn test_tick_without_projectile() {
        let mut game = arena(100.0, 500.0);
        let mut canvas = RecordingCanvas::new();
        assert_eq!(game.tick(&mut canvas), ProjectileEvent::None);
        assert_eq!(canvas.ellipse_count(), 0);
        assert_eq!(game.fighter(PlayerSlot::One).animation().clock(), 1);
        assert_eq!(game.fighter(PlayerSlot::Two).animation().clock(), 1);
    }

    #[test]
    fn test_tick_draw_order() {
        let mut game = arena(100.0, 500.0);
        press(&mut game, PlayerSlot::One, Action::Fire);
        let mut canvas = RecordingCanvas::new();
        game.tick(&mut canvas);

        assert_eq!(
            canvas.calls[0],
            DrawCall::Rect {
                rect: Rect::new(0.0, 0.0, 800.0, 600.0),
                color: Color::BLACK,
            }
        );
        // fighter 1 then fighter 2
        let blits = canvas.blits();
        assert_eq!(blits.len(), 2);
        assert_eq!(blits[0].0, TextureHandle::from_index(0));
        assert_eq!(blits[1].0, TextureHandle::from_index(3));
        // projectile comes last
        assert!(matches!(canvas.calls.last(), Some(DrawCall::Ellipse { .. })));
    }

    #[test]
    fn test_background_stretched_to_viewport() {
        let mut game = arena(100.0, 500.0);
        game.background = Some(Backdrop {
            texture: TextureHandle::from_index(9),
            size: Vec2::new(400.0, 300.0),
        });
        let mut canvas = RecordingCanvas::new();
        game.tick(&mut canvas);

        let (texture, _, transform) = canvas.blits()[0];
        assert_eq!(texture, TextureHandle::from_index(9));
        assert_eq!(
            transform.transform_point2(Vec2::new(400.0, 300.0)),
            VIEWPORT
        );
    }

    #[test]
    fn test_hud_lines() {
        let mut game = arena(100.0, 500.0);
        let mut canvas = RecordingCanvas::new();
        game.tick(&mut canvas);

        let texts = canvas.texts();
        assert!(texts.contains(&"PLAYER 1 CONTROLS:".to_string()));
        assert!(texts.contains(&"UP: FIRE".to_string()));
        assert!(texts.contains(&"PLAYER 1 WIDTH: 60".to_string()));
        assert!(texts.contains(&"PLAYER 2 WIDTH: 60".to_string()));

        let reset_line = canvas.calls.iter().find_map(|call| match call {
            DrawCall::Text { text, position, .. } if text == "J: RESET" => Some(*position),
            _ => None,
        });
        assert_eq!(reset_line, Some(Vec2::new(200.0, 150.0)));
    }

    #[test]
    fn test_fire_spawns_from_front_edge() {
        let mut game = arena(100.0, 500.0);
        press(&mut game, PlayerSlot::One, Action::Fire);
        let ball = game.projectile().cloned().unwrap();
        assert_eq!(ball.direction(), Direction::Right);
        assert_relative_eq!(ball.position().x, 160.0);
        assert_relative_eq!(ball.position().y, 400.0 + 59.0);

        press(&mut game, PlayerSlot::Two, Action::Fire);
        let ball = game.projectile().cloned().unwrap();
        assert_eq!(ball.direction(), Direction::Left);
        assert_relative_eq!(ball.position().x, 500.0);
    }

    #[test]
    fn test_fire_overwrites_live_projectile() {
        let mut game = arena(100.0, 500.0);
        press(&mut game, PlayerSlot::One, Action::Fire);
        let mut canvas = RecordingCanvas::new();
        game.tick(&mut canvas);
        press(&mut game, PlayerSlot::One, Action::Fire);

        // fresh shot, not advanced yet
        assert_relative_eq!(game.projectile().unwrap().position().x, 160.0);
    }

    #[test]
    fn test_shot_hits_opponent() {
        let mut game = arena(100.0, 300.0);
        press(&mut game, PlayerSlot::One, Action::Fire);
        let mut canvas = RecordingCanvas::new();

        let mut event = ProjectileEvent::Flying;
        let mut ticks = 0;
        while event == ProjectileEvent::Flying {
            event = game.tick(&mut canvas);
            ticks += 1;
        }

        // 160 -> 310 crosses into the box at x > 300
        assert_eq!(ticks, 15);
        assert_eq!(event, ProjectileEvent::Hit(PlayerSlot::Two));
        assert_eq!(game.fighter(PlayerSlot::Two).health(), 95);
        assert_eq!(game.fighter(PlayerSlot::One).health(), 100);
        assert!(game.projectile().is_none());
    }

    #[test]
    fn test_overlapping_fighters_only_first_takes_damage() {
        let mut game = arena(100.0, 100.0);
        game.projectile = Some(Projectile::new(
            Vec2::new(120.0, 450.0),
            Direction::Right,
            DEFAULT_PROJECTILE,
        ));
        let mut canvas = RecordingCanvas::new();

        assert_eq!(game.tick(&mut canvas), ProjectileEvent::Hit(PlayerSlot::One));
        assert_eq!(game.fighter(PlayerSlot::One).health(), 95);
        assert_eq!(game.fighter(PlayerSlot::Two).health(), 100);
        assert!(game.projectile().is_none());
    }

    #[test]
    fn test_missed_shot_leaves_arena_without_damage() {
        let mut game = arena(100.0, 500.0);
        game.fighter_mut(PlayerSlot::Two).set_vertical_position(0.0);
        press(&mut game, PlayerSlot::One, Action::Fire);
        let mut canvas = RecordingCanvas::new();

        // (800 - 160) / 10 = 64 ticks lands exactly on the edge
        for _ in 0..64 {
            assert_eq!(game.tick(&mut canvas), ProjectileEvent::Flying);
        }
        assert_relative_eq!(game.projectile().unwrap().position().x, 800.0);

        assert_eq!(game.tick(&mut canvas), ProjectileEvent::LeftArena);
        assert!(game.projectile().is_none());
        assert_eq!(game.fighter(PlayerSlot::One).health(), 100);
        assert_eq!(game.fighter(PlayerSlot::Two).health(), 100);
    }

    #[test]
    fn test_shot_leaves_left_edge() {
        let mut game = arena(100.0, 50.0);
        game.fighter_mut(PlayerSlot::One).set_vertical_position(0.0);
        press(&mut game, PlayerSlot::Two, Action::Fire);
        let mut canvas = RecordingCanvas::new();

        for _ in 0..5 {
            assert_eq!(game.tick(&mut canvas), ProjectileEvent::Flying);
        }
        assert_eq!(game.tick(&mut canvas), ProjectileEvent::LeftArena);
    }

    #[test]
    fn test_commands_reach_owning_fighter() {
        let mut game = arena(100.0, 500.0);
        press(&mut game, PlayerSlot::One, Action::Attack);
        press(&mut game, PlayerSlot::Two, Action::Advance);
        press(&mut game, PlayerSlot::Two, Action::Defend);

        assert_eq!(
            game.fighter(PlayerSlot::One).current_action(),
            FighterAction::Attack
        );
        assert_eq!(
            game.fighter(PlayerSlot::Two).current_action(),
            FighterAction::Defend
        );
        assert_relative_eq!(game.fighter(PlayerSlot::Two).position().x, 495.0);

        press(&mut game, PlayerSlot::Two, Action::Reset);
        press(&mut game, PlayerSlot::One, Action::Idle);
        assert_relative_eq!(game.fighter(PlayerSlot::Two).position().x, 500.0);
        assert_eq!(
            game.fighter(PlayerSlot::One).current_action(),
            FighterAction::Idle
        );
    }

    #[test]
    fn test_resize_moves_fighters_to_ground() {
        let mut game = arena(100.0, 500.0);
        press(&mut game, PlayerSlot::One, Action::Advance);
        game.on_resize(1200.0, 900.0);

        assert_eq!(game.viewport(), Vec2::new(1200.0, 900.0));
        assert_eq!(game.fighter(PlayerSlot::One).position(), Vec2::new(105.0, 600.0));
        assert_eq!(game.fighter(PlayerSlot::Two).position(), Vec2::new(500.0, 600.0));
    }
}
