// Fighter animation system

use log::debug;

use super::state::{ActionStateMachine, FighterAction};
use crate::core::math::Rect;
use crate::engine::renderer::TextureHandle;

/// One animation: a horizontal strip of equally sized frames
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    /// Texture holding the frame strip
    pub texture: TextureHandle,
    /// Width of each frame in pixels
    pub frame_width: u32,
    /// Height of each frame in pixels
    pub frame_height: u32,
    /// Number of frames in the loop
    pub frame_count: u32,
    current_frame: u32,
    /// Horizontal inset that centres this animation in the fighter's bounding box
    center_offset: f32,
}

impl SpriteSheet {
    /// Create a sprite sheet; `frame_count` is at least 1
    pub fn new(texture: TextureHandle, frame_width: u32, frame_height: u32, frame_count: u32) -> Self {
        Self {
            texture,
            frame_width,
            frame_height,
            frame_count: frame_count.max(1),
            current_frame: 0,
            center_offset: 0.0,
        }
    }

    /// Get the current frame index
    pub fn current_frame(&self) -> u32 {
        self.current_frame
    }

    pub fn center_offset(&self) -> f32 {
        self.center_offset
    }

    /// Step to the next frame. Returns true when the loop wrapped to frame 0.
    pub fn advance(&mut self) -> bool {
        self.current_frame = (self.current_frame + 1) % self.frame_count;
        self.current_frame == 0
    }

    /// Restart from the first frame
    pub fn rewind(&mut self) {
        self.current_frame = 0;
    }

    /// Pixel region of the current frame within the texture
    pub fn source_rect(&self) -> Rect {
        Rect::new(
            (self.current_frame * self.frame_width) as f32,
            0.0,
            self.frame_width as f32,
            self.frame_height as f32,
        )
    }
}

/// The three animations belonging to one fighter
#[derive(Debug, Clone)]
pub struct AnimationSet {
    idle: SpriteSheet,
    attack: SpriteSheet,
    defend: SpriteSheet,
    max_frame_width: u32,
}

impl AnimationSet {
    /// Group the sheets and compute each one's centring offset against the
    /// widest frame in the set
    pub fn new(idle: SpriteSheet, attack: SpriteSheet, defend: SpriteSheet) -> Self {
        let max_frame_width = idle
            .frame_width
            .max(attack.frame_width)
            .max(defend.frame_width);

        let mut set = Self {
            idle,
            attack,
            defend,
            max_frame_width,
        };
        for action in FighterAction::ALL {
            let sheet = set.sheet_mut(action);
            sheet.center_offset = (max_frame_width - sheet.frame_width) as f32 / 2.0;
        }
        set
    }

    /// Widest frame across all three animations
    pub fn max_frame_width(&self) -> u32 {
        self.max_frame_width
    }

    pub fn sheet(&self, action: FighterAction) -> &SpriteSheet {
        match action {
            FighterAction::Idle => &self.idle,
            FighterAction::Attack => &self.attack,
            FighterAction::Defend => &self.defend,
        }
    }

    pub fn sheet_mut(&mut self, action: FighterAction) -> &mut SpriteSheet {
        match action {
            FighterAction::Idle => &mut self.idle,
            FighterAction::Attack => &mut self.attack,
            FighterAction::Defend => &mut self.defend,
        }
    }
}

/// Drives a fighter's animations from the tick clock
#[derive(Debug, Clone)]
pub struct AnimationPlayer {
    sheets: AnimationSet,
    state: ActionStateMachine,
    /// Ticks since the last action change
    clock: u32,
    /// Ticks per animation frame
    ticks_per_frame: u32,
}

impl AnimationPlayer {
    pub fn new(sheets: AnimationSet, ticks_per_frame: u32) -> Self {
        Self {
            sheets,
            state: ActionStateMachine::new(),
            clock: 0,
            ticks_per_frame: ticks_per_frame.max(1),
        }
    }

    /// Play an action's animation from its first frame.
    ///
    /// Requesting the action that is already playing does nothing, so holding
    /// a move never restarts it. Returns whether the action changed.
    pub fn play(&mut self, action: FighterAction) -> bool {
        if !self.state.transition(action) {
            return false;
        }
        self.sheets.sheet_mut(action).rewind();
        self.clock = 0;
        true
    }

    /// Advance the clock by one tick
    pub fn update(&mut self) {
        self.clock = self.clock.wrapping_add(1);
        if self.clock % self.ticks_per_frame != 0 {
            return;
        }

        let action = self.state.state();
        let wrapped = self.sheets.sheet_mut(action).advance();
        if wrapped && self.state.loop_completed() {
            debug!("{} finished, back to idle", action);
        }
    }

    /// Get the current action
    pub fn current_action(&self) -> FighterAction {
        self.state.state()
    }

    /// Sheet of the action currently playing
    pub fn current_sheet(&self) -> &SpriteSheet {
        self.sheets.sheet(self.state.state())
    }

    pub fn clock(&self) -> u32 {
        self.clock
    }

    pub fn returning_to_idle(&self) -> bool {
        self.state.returning_to_idle()
    }

    pub fn sheets(&self) -> &AnimationSet {
        &self.sheets
    }

    pub fn ticks_per_frame(&self) -> u32 {
        self.ticks_per_frame
    }
}
