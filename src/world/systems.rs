//! Systems for the world module.
use bevy::prelude::*;

use crate::{
    camera::{components::OrbitCamera, config::CameraSettings},
    collector::{
        components::{Collectible, PickupCategory, ProximityCollector},
        config::CollectorSettings,
    },
    minimap::components::MinimapTracking,
    physics::{
        components::{LAYER_COLLECTIBLES, LAYER_TERRAIN},
        CollisionLayers, GroundSurface, SphereCollider,
    },
    player::{
        components::{Player, PlayerMover},
        config::MovementSettings,
    },
};

/// Half the side of the square surface; matches the default minimap extent.
pub const SURFACE_HALF_EXTENT: f32 = 62.5;
pub const PLAYER_START: Vec3 = Vec3::new(0.0, 0.9, 0.0);

const CAMERA_START_OFFSET: Vec3 = Vec3::new(0.0, 3.0, 6.0);
const COLLECTIBLE_COUNT: usize = 16;
const COLLECTIBLE_RADIUS: f32 = 0.5;
const GOLDEN_ANGLE: f32 = 2.399_963;

/// Tilted patch on the surface: center, half size, tilt about X in degrees.
struct CraterRim {
    center: Vec2,
    half_size: Vec2,
    tilt_degrees: f32,
}

const CRATER_RIMS: [CraterRim; 2] = [
    CraterRim {
        center: Vec2::new(18.0, -14.0),
        half_size: Vec2::new(5.0, 6.0),
        tilt_degrees: 20.0,
    },
    CraterRim {
        center: Vec2::new(-22.0, 10.0),
        half_size: Vec2::new(6.0, 4.0),
        tilt_degrees: 50.0,
    },
];

/// Spawns the scene: surface, crater rims, sun, player, orbit camera and collectibles.
pub fn spawn_world_environment(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    movement: Res<MovementSettings>,
    camera_settings: Res<CameraSettings>,
    collector_settings: Res<CollectorSettings>,
    mut tracking: ResMut<MinimapTracking>,
) {
    let regolith = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(128, 126, 122),
        perceptual_roughness: 0.95,
        metallic: 0.0,
        ..default()
    });

    commands.spawn((
        Name::new("Lunar surface"),
        Mesh3d(meshes.add(Plane3d::new(Vec3::Y, Vec2::splat(SURFACE_HALF_EXTENT)))),
        MeshMaterial3d(regolith.clone()),
        Transform::default(),
        GroundSurface::new(Vec2::splat(SURFACE_HALF_EXTENT)),
        CollisionLayers(LAYER_TERRAIN),
    ));

    for rim in &CRATER_RIMS {
        let tilt = rim.tilt_degrees.to_radians();
        // Lift the patch so its low edge rests on the surface.
        let lift = rim.half_size.y * tilt.sin();
        commands.spawn((
            Name::new(format!("Crater rim ({:.0} deg)", rim.tilt_degrees)),
            Mesh3d(meshes.add(Plane3d::new(Vec3::Y, rim.half_size))),
            MeshMaterial3d(regolith.clone()),
            Transform::from_xyz(rim.center.x, lift, rim.center.y)
                .with_rotation(Quat::from_rotation_x(tilt)),
            GroundSurface::new(rim.half_size),
            CollisionLayers(LAYER_TERRAIN),
        ));
    }

    commands.spawn((
        DirectionalLight {
            illuminance: 30_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(40.0, 18.0, 25.0).looking_at(Vec3::ZERO, Vec3::Y),
        Name::new("Sun"),
    ));

    let player = commands
        .spawn((
            Name::new("Player"),
            Player,
            PlayerMover::from_settings(&movement),
            ProximityCollector::from_settings(&collector_settings),
            Mesh3d(meshes.add(Capsule3d::new(0.35, 1.0))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb_u8(235, 235, 240),
                ..default()
            })),
            Transform::from_translation(PLAYER_START),
        ))
        .id();
    tracking.set_player(Some(player));

    commands.spawn((
        Name::new("Orbit camera"),
        Camera3d::default(),
        Transform::from_translation(PLAYER_START + CAMERA_START_OFFSET)
            .looking_at(PLAYER_START, Vec3::Y),
        OrbitCamera::from_settings(Some(player), &camera_settings),
    ));

    let collectible_mesh = meshes.add(Sphere::new(COLLECTIBLE_RADIUS));
    let regolith_sample = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(196, 150, 92),
        ..default()
    });
    let ice_sample = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(170, 220, 255),
        perceptual_roughness: 0.2,
        ..default()
    });

    for (index, position) in collectible_positions(COLLECTIBLE_COUNT).enumerate() {
        let (category, material, label) = if index % 2 == 0 {
            (PickupCategory::REGOLITH, regolith_sample.clone(), "Regolith sample")
        } else {
            (PickupCategory::ICE, ice_sample.clone(), "Ice sample")
        };

        commands.spawn((
            Name::new(format!("{} {}", label, index + 1)),
            Mesh3d(collectible_mesh.clone()),
            MeshMaterial3d(material),
            Transform::from_translation(position),
            SphereCollider::new(COLLECTIBLE_RADIUS),
            CollisionLayers(LAYER_COLLECTIBLES),
            Collectible,
            category,
        ));
    }

    info!(
        "Lunar surface ready: {} collectibles, player at {:?}",
        COLLECTIBLE_COUNT, PLAYER_START
    );
}

/// Spiral of resting positions spread over the surface.
fn collectible_positions(count: usize) -> impl Iterator<Item = Vec3> {
    (0..count).map(|index| {
        let angle = index as f32 * GOLDEN_ANGLE;
        let distance = (6.0 + index as f32 * 3.2).min(SURFACE_HALF_EXTENT - 2.0);
        Vec3::new(
            angle.cos() * distance,
            COLLECTIBLE_RADIUS,
            angle.sin() * distance,
        )
    })
}
