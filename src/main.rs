use anyhow::{Context, Result};
use glam::Vec2;
use log::{error, info};
use std::sync::Arc;
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::assets::AssetManager;
use engine::game_loop::GameLoop;
use engine::input::InputManager;
use engine::renderer::{PresentStatus, Renderer, SpriteBatch};
use game::roster;

/// Environment variable pointing at the asset directory
const ASSETS_ENV: &str = "SPRITE_DUEL_ASSETS";
const DEFAULT_ASSETS_DIR: &str = "assets";
/// HUD and label font, looked up in `<assets>/fonts/`
const FONT_FILE: &str = "DejaVuSans.ttf";

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting Sprite Duel...");

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Sprite Duel")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
            .with_resizable(true)
            .build(&event_loop)?,
    );

    info!("Window created successfully");

    let mut renderer = pollster::block_on(Renderer::new(window.clone()))
        .context("Failed to initialize renderer")?;

    let assets_dir = std::env::var(ASSETS_ENV).unwrap_or_else(|_| DEFAULT_ASSETS_DIR.to_string());
    let mut assets = AssetManager::new(&assets_dir);
    let font = assets
        .load_font(FONT_FILE)
        .context("Failed to load HUD font")?;
    let mut batch = SpriteBatch::new(font);

    let size = window.inner_size();
    let viewport = Vec2::new(size.width.max(1) as f32, size.height.max(1) as f32);
    let mut game = roster::build_match(&mut assets, batch.textures_mut(), viewport)
        .context("Failed to load match assets")?;

    let input = InputManager::new();
    let mut game_loop = GameLoop::new();

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!("Close requested, shutting down...");
                    elwt.exit();
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    if let Some(command) = input.process_keyboard_event(&event) {
                        game.handle_command(command);
                    }
                }
                WindowEvent::Resized(physical_size) => {
                    if physical_size.width == 0 || physical_size.height == 0 {
                        return;
                    }
                    // the batch still holds the last frame until the next tick
                    renderer.resize(physical_size);
                    game.on_resize(physical_size.width as f32, physical_size.height as f32);
                }
                WindowEvent::RedrawRequested => {
                    for _ in 0..game_loop.begin_frame() {
                        batch.begin_frame();
                        game.tick(&mut batch);
                    }
                    if renderer.present(&batch) == PresentStatus::Fatal {
                        error!("GPU out of memory, exiting");
                        elwt.exit();
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
