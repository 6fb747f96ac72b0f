// src/ui/mod.rs
//
// UI module providing the screen-space HUD.
//
// Current features:
// - Minimap frame with player and collectible icons (driven by the minimap module)
// - Pickup counters and a controls hint

pub mod hud;

// Re-export the main plugin
pub use hud::UiPlugin;
