//! Core module: frame ordering, simulation clock, and config loading.
pub mod config;
pub mod plugin;

pub use plugin::CorePlugin;
