// src/ui/hud/mod.rs
//
// HUD module: minimap frame with icons, pickup counters and a controls hint.

pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::UiPlugin;
