//! Ray casts against ground patches and sphere overlap queries.
use bevy::{
    ecs::system::SystemParam,
    math::bounding::{BoundingSphere, IntersectsVolume},
    prelude::*,
};

use super::components::{CollisionLayers, GroundSurface, SphereCollider};

/// Nearest impact returned by a ray cast.
#[cfg_attr(not(test), allow(dead_code))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: Entity,
    pub point: Vec3,
    pub normal: Vec3,
    pub distance: f32,
}

/// Anything that can answer "what is the nearest surface along this ray".
///
/// Movement code only depends on this trait so it can be driven by stubs in tests.
pub trait RayCaster {
    fn cast_ray(&self, ray: Ray3d, max_distance: f32) -> Option<RayHit>;
}

/// Intersects a ray with a single ground patch.
///
/// Returns `(distance, point, normal)` when the ray reaches the patch from
/// the side its normal faces, within `max_distance`.
pub fn ray_surface_hit(
    ray: Ray3d,
    max_distance: f32,
    transform: &GlobalTransform,
    surface: &GroundSurface,
) -> Option<(f32, Vec3, Vec3)> {
    let (_, rotation, translation) = transform.to_scale_rotation_translation();
    let normal = (rotation * Vec3::Y).normalize_or_zero();
    if normal == Vec3::ZERO || ray.direction.dot(normal) >= 0.0 {
        return None;
    }

    let distance = ray.intersect_plane(translation, InfinitePlane3d::new(normal))?;
    if distance > max_distance {
        return None;
    }

    let point = ray.get_point(distance);
    let local = rotation.inverse() * (point - translation);
    if local.x.abs() > surface.half_size.x || local.z.abs() > surface.half_size.y {
        return None;
    }

    Some((distance, point, normal))
}

/// Fixed-capacity result buffer for overlap queries, reused across calls.
#[derive(Debug, Clone)]
pub struct OverlapBuffer {
    hits: Vec<Entity>,
    capacity: usize,
}

impl OverlapBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            hits: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Reallocates the backing storage when the capacity actually changes.
    pub fn resize(&mut self, capacity: usize) {
        let capacity = capacity.max(1);
        if capacity != self.capacity {
            *self = Self::with_capacity(capacity);
        }
    }

    pub fn clear(&mut self) {
        self.hits.clear();
    }

    /// Stores a hit; returns `false` once the buffer is full.
    pub fn push(&mut self, entity: Entity) -> bool {
        if self.hits.len() >= self.capacity {
            return false;
        }
        self.hits.push(entity);
        true
    }

    pub fn hits(&self) -> &[Entity] {
        &self.hits
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }
}

/// Collider candidate fed to [`collect_overlaps`]: entity, center, radius, layers.
pub type OverlapCandidate = (Entity, Vec3, f32, u32);

/// Fills `buffer` with every candidate sphere touching the query sphere.
///
/// Results past the buffer capacity are dropped without notice.
pub fn collect_overlaps(
    center: Vec3,
    radius: f32,
    layer_mask: u32,
    candidates: impl IntoIterator<Item = OverlapCandidate>,
    buffer: &mut OverlapBuffer,
) -> usize {
    buffer.clear();
    let query = BoundingSphere::new(center, radius.max(0.0));

    for (entity, position, collider_radius, layers) in candidates {
        if !CollisionLayers(layers).matches(layer_mask) {
            continue;
        }
        if !query.intersects(&BoundingSphere::new(position, collider_radius)) {
            continue;
        }
        if !buffer.push(entity) {
            break;
        }
    }

    buffer.len()
}

/// World-facing spatial queries over the collider components.
#[derive(SystemParam)]
pub struct SpatialQuery<'w, 's> {
    surfaces: Query<'w, 's, (Entity, &'static GlobalTransform, &'static GroundSurface)>,
    colliders: Query<
        'w,
        's,
        (
            Entity,
            &'static GlobalTransform,
            &'static SphereCollider,
            Option<&'static CollisionLayers>,
        ),
    >,
}

impl SpatialQuery<'_, '_> {
    /// Sphere overlap against every `SphereCollider` on a layer in `layer_mask`.
    pub fn overlap_sphere(
        &self,
        center: Vec3,
        radius: f32,
        layer_mask: u32,
        buffer: &mut OverlapBuffer,
    ) -> usize {
        let candidates = self
            .colliders
            .iter()
            .map(|(entity, transform, collider, layers)| {
                (
                    entity,
                    transform.translation(),
                    collider.radius,
                    layers.copied().unwrap_or_default().0,
                )
            });
        collect_overlaps(center, radius, layer_mask, candidates, buffer)
    }
}

impl RayCaster for SpatialQuery<'_, '_> {
    fn cast_ray(&self, ray: Ray3d, max_distance: f32) -> Option<RayHit> {
        let mut nearest: Option<RayHit> = None;
        for (entity, transform, surface) in self.surfaces.iter() {
            let Some((distance, point, normal)) =
                ray_surface_hit(ray, max_distance, transform, surface)
            else {
                continue;
            };
            if nearest.is_some_and(|best| best.distance <= distance) {
                continue;
            }
            nearest = Some(RayHit {
                entity,
                point,
                normal,
                distance,
            });
        }
        nearest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::components::{LAYER_COLLECTIBLES, LAYER_DEFAULT};

    fn entities(count: usize) -> Vec<Entity> {
        let mut world = World::new();
        (0..count).map(|_| world.spawn_empty().id()).collect()
    }

    fn down_from(origin: Vec3) -> Ray3d {
        Ray3d::new(origin, Dir3::NEG_Y)
    }

    #[test]
    fn ray_hits_flat_patch_from_above() {
        let transform = GlobalTransform::from_xyz(0.0, 1.0, 0.0);
        let surface = GroundSurface::new(Vec2::splat(5.0));

        let (distance, point, normal) =
            ray_surface_hit(down_from(Vec3::new(1.0, 4.0, -2.0)), 10.0, &transform, &surface)
                .expect("ray should hit the patch");

        assert!((distance - 3.0).abs() < 1e-5);
        assert!((point - Vec3::new(1.0, 1.0, -2.0)).length() < 1e-5);
        assert!((normal - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn ray_misses_outside_bounds_or_beyond_range() {
        let transform = GlobalTransform::from_xyz(0.0, 0.0, 0.0);
        let surface = GroundSurface::new(Vec2::splat(2.0));

        assert!(ray_surface_hit(down_from(Vec3::new(3.0, 1.0, 0.0)), 5.0, &transform, &surface)
            .is_none());
        assert!(ray_surface_hit(down_from(Vec3::new(0.0, 10.0, 0.0)), 5.0, &transform, &surface)
            .is_none());
    }

    #[test]
    fn ray_ignores_patch_from_below() {
        let transform = GlobalTransform::from_xyz(0.0, 2.0, 0.0);
        let surface = GroundSurface::new(Vec2::splat(2.0));
        let ray = Ray3d::new(Vec3::ZERO, Dir3::Y);
        assert!(ray_surface_hit(ray, 5.0, &transform, &surface).is_none());
    }

    #[test]
    fn tilted_patch_reports_slope_normal() {
        let transform = GlobalTransform::from(
            Transform::from_rotation(Quat::from_rotation_x(30f32.to_radians())),
        );
        let surface = GroundSurface::new(Vec2::splat(5.0));

        let (_, _, normal) =
            ray_surface_hit(down_from(Vec3::new(0.0, 3.0, 0.0)), 10.0, &transform, &surface)
                .expect("ray should hit the ramp");
        let angle = normal.angle_between(Vec3::Y).to_degrees();
        assert!((angle - 30.0).abs() < 1e-3);
    }

    #[test]
    fn overlap_filters_layers_and_distance() {
        let ids = entities(3);
        let (near, far, wrong_layer) = (ids[0], ids[1], ids[2]);
        let mut buffer = OverlapBuffer::with_capacity(8);

        let count = collect_overlaps(
            Vec3::ZERO,
            3.0,
            LAYER_COLLECTIBLES,
            [
                (near, Vec3::new(3.2, 0.0, 0.0), 0.5, LAYER_COLLECTIBLES),
                (far, Vec3::new(10.0, 0.0, 0.0), 0.5, LAYER_COLLECTIBLES),
                (wrong_layer, Vec3::new(1.0, 0.0, 0.0), 0.5, LAYER_DEFAULT),
            ],
            &mut buffer,
        );

        assert_eq!(count, 1);
        assert_eq!(buffer.hits(), &[near]);
    }

    #[test]
    fn overlap_truncates_silently_at_capacity() {
        let mut buffer = OverlapBuffer::with_capacity(2);
        let candidates = entities(5)
            .into_iter()
            .map(|entity| (entity, Vec3::ZERO, 0.5, LAYER_DEFAULT));

        let count = collect_overlaps(Vec3::ZERO, 1.0, u32::MAX, candidates, &mut buffer);
        assert_eq!(count, 2);
    }

    #[test]
    fn buffer_reallocates_only_on_change() {
        let mut buffer = OverlapBuffer::with_capacity(4);
        buffer.push(entities(1)[0]);
        buffer.resize(4);
        assert_eq!(buffer.len(), 1);

        buffer.resize(0);
        assert_eq!(buffer.capacity(), 1);
        assert_eq!(buffer.len(), 0);
    }
}
