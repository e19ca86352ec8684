// Fighter roster and match setup

use glam::Vec2;
use log::{info, warn};

use super::fighters::{AnimationSet, Fighter, FighterAction, SpriteSheet, BASE_STATS};
use super::match_loop::{Backdrop, MatchLoop, GROUND_RATIO};
use super::projectile::DEFAULT_PROJECTILE;
use crate::engine::assets::{AssetError, AssetManager};
use crate::engine::input::PlayerSlot;
use crate::engine::renderer::{Texture, TextureManager};

pub const BACKGROUND_FILE: &str = "background.jpg";
const BACKGROUND_PLACEHOLDER: [u8; 4] = [32, 32, 48, 255];

/// Layout of one sprite strip on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteSpec {
    pub file: &'static str,
    pub frame_width: u32,
    pub frame_height: u32,
    pub frame_count: u32,
}

/// Everything needed to spawn one fighter
#[derive(Debug, Clone, Copy)]
pub struct FighterSpec {
    pub idle: SpriteSpec,
    pub attack: SpriteSpec,
    pub defend: SpriteSpec,
    /// Tint of the stand-in strips used when a file is missing
    pub placeholder: [u8; 4],
}

impl FighterSpec {
    pub fn sprite(&self, action: FighterAction) -> &SpriteSpec {
        match action {
            FighterAction::Idle => &self.idle,
            FighterAction::Attack => &self.attack,
            FighterAction::Defend => &self.defend,
        }
    }
}

pub const PLAYER_ONE: FighterSpec = FighterSpec {
    idle: SpriteSpec {
        file: "player1_beat.png",
        frame_width: 59,
        frame_height: 118,
        frame_count: 9,
    },
    attack: SpriteSpec {
        file: "player1_kick.png",
        frame_width: 59,
        frame_height: 102,
        frame_count: 9,
    },
    defend: SpriteSpec {
        file: "player1_roll.png",
        frame_width: 62,
        frame_height: 109,
        frame_count: 11,
    },
    placeholder: [70, 130, 220, 255],
};

pub const PLAYER_TWO: FighterSpec = FighterSpec {
    idle: SpriteSpec {
        file: "player2_fall.png",
        frame_width: 64,
        frame_height: 97,
        frame_count: 12,
    },
    attack: SpriteSpec {
        file: "player2_hit.png",
        frame_width: 73,
        frame_height: 103,
        frame_count: 8,
    },
    defend: SpriteSpec {
        file: "player2_kick.png",
        frame_width: 64,
        frame_height: 104,
        frame_count: 8,
    },
    placeholder: [220, 110, 60, 255],
};

pub fn spec_for(slot: PlayerSlot) -> &'static FighterSpec {
    match slot {
        PlayerSlot::One => &PLAYER_ONE,
        PlayerSlot::Two => &PLAYER_TWO,
    }
}

/// Load the three sprite strips of a fighter
pub fn load_sprites(
    assets: &mut AssetManager,
    textures: &mut TextureManager,
    spec: &FighterSpec,
) -> Result<AnimationSet, AssetError> {
    let mut load = |sprite: &SpriteSpec| -> Result<SpriteSheet, AssetError> {
        let handle = assets.load_texture_or(textures, sprite.file, || {
            Texture::placeholder_strip(
                sprite.frame_width,
                sprite.frame_height,
                sprite.frame_count,
                spec.placeholder,
            )
        })?;

        if let Some(texture) = textures.get(handle) {
            let needed = sprite.frame_width * sprite.frame_count;
            if texture.width < needed || texture.height < sprite.frame_height {
                warn!(
                    "{} is {}x{}, expected at least {}x{}",
                    sprite.file, texture.width, texture.height, needed, sprite.frame_height
                );
            }
        }

        Ok(SpriteSheet::new(
            handle,
            sprite.frame_width,
            sprite.frame_height,
            sprite.frame_count,
        ))
    };

    Ok(AnimationSet::new(
        load(spec.sprite(FighterAction::Idle))?,
        load(spec.sprite(FighterAction::Attack))?,
        load(spec.sprite(FighterAction::Defend))?,
    ))
}

/// Where each fighter starts in a viewport of the given size
pub fn spawn_point(slot: PlayerSlot, viewport: Vec2) -> Vec2 {
    let ground = viewport.y * GROUND_RATIO;
    match slot {
        PlayerSlot::One => Vec2::new(100.0, ground),
        PlayerSlot::Two => Vec2::new(viewport.x - 300.0, ground),
    }
}

/// Place both fighters at their starting positions; player two faces left
pub fn spawn_fighters(viewport: Vec2, sprites: [AnimationSet; 2]) -> [Fighter; 2] {
    let [one, two] = sprites;
    [
        Fighter::new(
            PlayerSlot::One,
            spawn_point(PlayerSlot::One, viewport),
            one,
            false,
            BASE_STATS,
        ),
        Fighter::new(
            PlayerSlot::Two,
            spawn_point(PlayerSlot::Two, viewport),
            two,
            true,
            BASE_STATS,
        ),
    ]
}

/// Load every texture and set up a fresh match
pub fn build_match(
    assets: &mut AssetManager,
    textures: &mut TextureManager,
    viewport: Vec2,
) -> Result<MatchLoop, AssetError> {
    let background = assets.load_texture_or(textures, BACKGROUND_FILE, || {
        Texture::from_color(16, 9, BACKGROUND_PLACEHOLDER)
    })?;
    let backdrop = textures.get(background).map(|texture| Backdrop {
        texture: background,
        size: texture.size(),
    });

    let sprites = [
        load_sprites(assets, textures, spec_for(PlayerSlot::One))?,
        load_sprites(assets, textures, spec_for(PlayerSlot::Two))?,
    ];

    let stats = assets.stats();
    info!(
        "Match ready: {} assets loaded, {} placeholders",
        stats.loaded, stats.placeholders
    );

    Ok(MatchLoop::new(
        spawn_fighters(viewport, sprites),
        viewport,
        backdrop,
        DEFAULT_PROJECTILE,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::fs;
    use tempfile::TempDir;

    fn write_png(dir: &TempDir, name: &str, width: u32, height: u32) {
        let textures = dir.path().join("textures");
        fs::create_dir_all(&textures).unwrap();
        RgbaImage::from_pixel(width, height, Rgba([1, 2, 3, 255]))
            .save(textures.join(name))
            .unwrap();
    }

    #[test]
    fn test_spawn_points() {
        let viewport = Vec2::new(1200.0, 900.0);
        assert_eq!(spawn_point(PlayerSlot::One, viewport), Vec2::new(100.0, 600.0));
        assert_eq!(spawn_point(PlayerSlot::Two, viewport), Vec2::new(900.0, 600.0));
    }

    #[test]
    fn test_roster_bounding_widths() {
        let width = |spec: &FighterSpec| {
            FighterAction::ALL
                .iter()
                .map(|a| spec.sprite(*a).frame_width)
                .max()
        };
        assert_eq!(width(&PLAYER_ONE), Some(62));
        assert_eq!(width(&PLAYER_TWO), Some(73));
    }

    #[test]
    fn test_build_match_with_missing_assets_uses_placeholders() {
        let dir = TempDir::new().unwrap();
        let mut assets = AssetManager::new(dir.path());
        let mut textures = TextureManager::new();

        let game = build_match(&mut assets, &mut textures, Vec2::new(1200.0, 900.0)).unwrap();

        assert_eq!(assets.stats().placeholders, 7);
        assert_eq!(textures.texture_count(), 7);

        let p1 = game.fighter(PlayerSlot::One);
        let p2 = game.fighter(PlayerSlot::Two);
        assert!(!p1.is_mirrored());
        assert!(p2.is_mirrored());
        assert_eq!(p1.bounding_width(), 62.0);
        assert_eq!(p1.height(), 118.0);
        assert_eq!(p2.height(), 97.0);
        assert_eq!(p2.position(), Vec2::new(900.0, 600.0));

        // idle strip placeholder is sized to the frame layout
        let idle = textures.get(p1.current_sheet().texture).unwrap();
        assert_eq!((idle.width, idle.height), (59 * 9, 118));
    }

    #[test]
    fn test_build_match_loads_files_from_disk() {
        let dir = TempDir::new().unwrap();
        write_png(&dir, "player1_beat.png", 59 * 9, 118);
        let mut assets = AssetManager::new(dir.path());
        let mut textures = TextureManager::new();

        build_match(&mut assets, &mut textures, Vec2::new(800.0, 600.0)).unwrap();

        assert_eq!(assets.stats().loaded, 1);
        assert_eq!(assets.stats().placeholders, 6);
    }

    #[test]
    fn test_corrupt_sprite_is_an_error() {
        let dir = TempDir::new().unwrap();
        let textures_dir = dir.path().join("textures");
        fs::create_dir_all(&textures_dir).unwrap();
        fs::write(textures_dir.join("player2_hit.png"), b"not an image").unwrap();

        let mut assets = AssetManager::new(dir.path());
        let mut textures = TextureManager::new();
        let result = build_match(&mut assets, &mut textures, Vec2::new(800.0, 600.0));

        assert!(matches!(result, Err(AssetError::Decode { name, .. }) if name == "player2_hit.png"));
    }
}
