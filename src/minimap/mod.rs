//! Minimap module: player and marker icons projected onto a HUD map.

pub mod components;
pub mod config;
pub mod events;
pub mod plugin;
pub mod projection;
pub mod systems;

pub use plugin::MinimapPlugin;
