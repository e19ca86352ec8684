// Engine modules: renderer, input, assets, tick pacing

pub mod assets;
pub mod game_loop;
pub mod input;
pub mod renderer;
