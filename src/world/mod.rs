//! World module: the lunar surface, the player, the camera and the collectibles.
pub mod plugin;
pub mod systems;

pub use plugin::WorldPlugin;
