//! Player module - keyboard walking with camera-relative axes, slope limits, and ground snapping.

pub mod components;
pub mod config;
pub mod movement;
pub mod plugin;
pub mod systems;

pub use plugin::PlayerPlugin;
