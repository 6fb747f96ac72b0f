//! Minimal collision layer: ground patches for ray casts and spheres for overlaps.
pub mod components;
pub mod query;

pub use components::{AttachedBody, CollisionLayers, GroundSurface, SphereCollider};
pub use query::{OverlapBuffer, RayCaster, SpatialQuery};
