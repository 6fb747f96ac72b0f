//! World-to-map projection: horizontal world position to a point on the map image.
use bevy::prelude::*;

/// Smallest accepted map extent on either axis (world units).
pub const MIN_MAP_EXTENT: f32 = 0.01;

/// Where world (0, 0) sits on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapOrigin {
    /// World origin at the center of the map.
    Center,
    /// World origin at the bottom-left corner of the map.
    Corner,
}

/// Linear mapping from the horizontal plane onto a fixed world-space rectangle.
///
/// Map X follows world +X and map Y follows world north (-Z).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapProjection {
    extent: Vec2,
    origin: MapOrigin,
}

impl MapProjection {
    pub fn new(extent: Vec2, origin: MapOrigin) -> Self {
        Self {
            extent: extent.max(Vec2::splat(MIN_MAP_EXTENT)),
            origin,
        }
    }

    pub fn extent(&self) -> Vec2 {
        self.extent
    }

    pub fn origin(&self) -> MapOrigin {
        self.origin
    }

    /// World position to map coordinates in `[0, 1]^2`, saturating at the edges.
    pub fn normalize(&self, world: Vec3) -> Vec2 {
        let planar = Vec2::new(world.x, -world.z);
        let (min, max) = match self.origin {
            MapOrigin::Center => (-self.extent * 0.5, self.extent * 0.5),
            MapOrigin::Corner => (Vec2::ZERO, self.extent),
        };

        Vec2::new(
            inverse_lerp(min.x, max.x, planar.x),
            inverse_lerp(min.y, max.y, planar.y),
        )
    }

    /// Normalized map coordinates to a position anchored at the frame center.
    pub fn to_anchored(normalized: Vec2, frame_size: Vec2) -> Vec2 {
        let half = frame_size * 0.5;
        // Component-wise lerp from -half to half (glam's `lerp` takes a scalar `t`).
        let t = normalized.clamp(Vec2::ZERO, Vec2::ONE);
        -half + (half - (-half)) * t
    }

    pub fn project(&self, world: Vec3, frame_size: Vec2) -> Vec2 {
        Self::to_anchored(self.normalize(world), frame_size)
    }
}

impl Default for MapProjection {
    fn default() -> Self {
        Self::new(Vec2::splat(125.0), MapOrigin::Center)
    }
}

fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        return 0.0;
    }
    ((value - a) / (b - a)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Vec2 = Vec2::new(500.0, 500.0);

    #[test]
    fn half_extent_reaches_frame_edge() {
        let projection = MapProjection::default();
        let anchored = projection.project(Vec3::new(62.5, 0.0, 0.0), FRAME);
        assert!((anchored - Vec2::new(250.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn positions_beyond_extent_saturate() {
        let projection = MapProjection::default();
        let inside_edge = projection.project(Vec3::new(62.5, 0.0, 10.0), FRAME);
        let far_out = projection.project(Vec3::new(125.0, 0.0, 10.0), FRAME);
        assert_eq!(far_out.x, 250.0);
        assert_eq!(far_out.x, inside_edge.x);

        let normalized = projection.normalize(Vec3::new(-400.0, 0.0, -400.0));
        assert_eq!(normalized, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn interior_points_stay_strictly_inside() {
        let projection = MapProjection::default();
        for step in 1..25 {
            let offset = -62.5 + step as f32 * 5.0;
            let normalized = projection.normalize(Vec3::new(offset, 3.0, -offset * 0.5));
            assert!(normalized.x > 0.0 && normalized.x < 1.0);
            assert!(normalized.y > 0.0 && normalized.y < 1.0);
        }
    }

    #[test]
    fn boundary_points_hit_exact_edges() {
        let projection = MapProjection::default();
        assert_eq!(projection.normalize(Vec3::new(-62.5, 0.0, 62.5)), Vec2::ZERO);
        assert_eq!(projection.normalize(Vec3::new(62.5, 0.0, -62.5)), Vec2::ONE);
    }

    #[test]
    fn projection_is_monotonic_per_axis() {
        let projection = MapProjection::default();
        let mut previous = projection.normalize(Vec3::new(-80.0, 0.0, 7.0)).x;
        for step in 1..=40 {
            let x = -80.0 + step as f32 * 4.0;
            let current = projection.normalize(Vec3::new(x, 0.0, 7.0)).x;
            assert!(current >= previous);
            previous = current;
        }

        let mut previous = projection.normalize(Vec3::new(3.0, 0.0, 80.0)).y;
        for step in 1..=40 {
            let z = 80.0 - step as f32 * 4.0;
            let current = projection.normalize(Vec3::new(3.0, 0.0, z)).y;
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn corner_origin_maps_from_zero() {
        let projection = MapProjection::new(Vec2::new(100.0, 50.0), MapOrigin::Corner);
        assert_eq!(projection.normalize(Vec3::ZERO), Vec2::ZERO);
        assert_eq!(
            projection.normalize(Vec3::new(50.0, 0.0, -25.0)),
            Vec2::new(0.5, 0.5)
        );
        assert_eq!(
            projection.project(Vec3::ZERO, Vec2::new(200.0, 100.0)),
            Vec2::new(-100.0, -50.0)
        );
    }

    #[test]
    fn tiny_extents_are_clamped() {
        let projection = MapProjection::new(Vec2::new(0.0, -5.0), MapOrigin::Center);
        assert_eq!(projection.extent(), Vec2::splat(MIN_MAP_EXTENT));
    }
}
