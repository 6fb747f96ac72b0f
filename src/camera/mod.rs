//! Camera module: an orbit camera that follows the player.
pub mod components;
pub mod config;
pub mod plugin;
pub mod systems;

pub use plugin::CameraPlugin;
