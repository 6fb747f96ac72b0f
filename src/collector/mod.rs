//! Collector module - proximity pickups feeding two HUD counters.

pub mod components;
pub mod config;
pub mod events;
pub mod plugin;
pub mod systems;

pub use plugin::CollectorPlugin;
