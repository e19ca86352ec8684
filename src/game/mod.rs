// Game logic: fighters, the projectile and the match that ties them together

pub mod fighters;
pub mod match_loop;
pub mod projectile;
pub mod roster;
