//! Collider components consumed by ray casts and overlap queries.
use bevy::prelude::*;

/// Layer 1: anything not explicitly assigned.
pub const LAYER_DEFAULT: u32 = 0b1;
/// Layer 2: walkable terrain patches.
pub const LAYER_TERRAIN: u32 = 0b10;
/// Layer 3: pickups the player can collect.
pub const LAYER_COLLECTIBLES: u32 = 0b100;
/// Mask matching every layer.
pub const ALL_LAYERS: u32 = u32::MAX;

/// Flat rectangular ground patch lying in the entity's local XZ plane.
///
/// The surface normal is the entity's local +Y axis, so tilting the
/// transform produces a slope. Only hit from the side the normal faces.
#[derive(Component, Debug, Clone, Copy)]
pub struct GroundSurface {
    /// Half extents along local X and local Z (world units).
    pub half_size: Vec2,
}

impl GroundSurface {
    pub fn new(half_size: Vec2) -> Self {
        Self {
            half_size: half_size.abs(),
        }
    }
}

/// Sphere volume used by overlap queries.
#[derive(Component, Debug, Clone, Copy)]
pub struct SphereCollider {
    pub radius: f32,
}

impl SphereCollider {
    pub fn new(radius: f32) -> Self {
        Self {
            radius: radius.max(0.0),
        }
    }
}

/// Layer membership bitmask of a collider. Colliders without it are on `LAYER_DEFAULT`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionLayers(pub u32);

impl CollisionLayers {
    pub fn matches(self, mask: u32) -> bool {
        self.0 & mask != 0
    }
}

impl Default for CollisionLayers {
    fn default() -> Self {
        Self(LAYER_DEFAULT)
    }
}

/// Links a child collider to the body entity that owns it.
///
/// Overlap hits resolve to this entity instead of the collider itself.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachedBody(pub Entity);
