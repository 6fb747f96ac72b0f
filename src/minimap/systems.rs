// src/minimap/systems.rs
//
// Systems keeping minimap icons in step with the world.

use bevy::{ecs::system::SystemParam, prelude::*, transform::helper::TransformHelper};

use super::{
    components::{
        AnchoredPosition, MapMarker, MarkerDisposal, MarkerIndex, MinimapFrame, MinimapTracking,
        PlayerMapIcon,
    },
    config::MinimapSettings,
    events::{RefreshMinimap, RemoveMapMarkers},
};

/// Everything one projection pass reads and writes.
///
/// World positions are computed from `Transform`, not the propagated
/// `GlobalTransform`, so moves made earlier in the frame are already visible.
#[derive(SystemParam)]
pub struct MinimapProjector<'w, 's> {
    settings: Res<'w, MinimapSettings>,
    tracking: Res<'w, MinimapTracking>,
    frames: Query<'w, 's, &'static MinimapFrame>,
    world_positions: TransformHelper<'w, 's>,
    player_icons: Query<
        'w,
        's,
        (&'static mut AnchoredPosition, &'static mut Visibility),
        (With<PlayerMapIcon>, Without<MapMarker>),
    >,
    markers: Query<
        'w,
        's,
        (
            &'static MapMarker,
            &'static mut AnchoredPosition,
            &'static mut Visibility,
        ),
        Without<PlayerMapIcon>,
    >,
}

impl MinimapProjector<'_, '_> {
    /// Projects the player and every marker target; returns how many markers are shown.
    pub fn refresh(&mut self) -> usize {
        let frame_size = self
            .frames
            .single()
            .map(|frame| frame.size)
            .unwrap_or(self.settings.frame_size);
        let projection = self.settings.projection;

        let player_position = self
            .tracking
            .player()
            .and_then(|player| live_translation(&self.world_positions, player));
        for (mut anchored, mut visibility) in self.player_icons.iter_mut() {
            match player_position {
                Some(position) => {
                    anchored.set_if_neq(AnchoredPosition(projection.project(position, frame_size)));
                    visibility.set_if_neq(Visibility::Inherited);
                }
                None => {
                    visibility.set_if_neq(Visibility::Hidden);
                }
            }
        }

        let mut shown = 0;
        for (marker, mut anchored, mut visibility) in self.markers.iter_mut() {
            let target_position = marker
                .target()
                .and_then(|target| live_translation(&self.world_positions, target));

            match target_position {
                Some(position) => {
                    anchored.set_if_neq(AnchoredPosition(projection.project(position, frame_size)));
                    visibility.set_if_neq(Visibility::Inherited);
                    shown += 1;
                }
                None => {
                    visibility.set_if_neq(Visibility::Hidden);
                }
            }
        }
        shown
    }
}

fn live_translation(transforms: &TransformHelper, entity: Entity) -> Option<Vec3> {
    transforms
        .compute_global_transform(entity)
        .ok()
        .map(|global| global.translation())
}

/// Registers freshly spawned markers under their target.
pub fn index_new_markers(
    mut index: ResMut<MarkerIndex>,
    added: Query<(Entity, &MapMarker), Added<MapMarker>>,
) {
    for (icon, marker) in added.iter() {
        if let Some(target) = marker.target() {
            index.insert(target, icon);
        }
    }
}

/// Handles [`RemoveMapMarkers`] requests.
pub fn remove_map_markers(
    mut commands: Commands,
    mut requests: MessageReader<RemoveMapMarkers>,
    mut index: ResMut<MarkerIndex>,
    mut icons: Query<(&MapMarker, &mut Visibility)>,
) {
    for request in requests.read() {
        let removed = index.take(request.target);
        if removed.is_empty() {
            continue;
        }

        for icon in &removed {
            let Ok((marker, mut visibility)) = icons.get_mut(*icon) else {
                continue;
            };
            debug!("Removing map marker '{}' ({:?})", marker.name, request.disposal);
            match request.disposal {
                MarkerDisposal::Despawn => commands.entity(*icon).despawn(),
                MarkerDisposal::Hide => {
                    *visibility = Visibility::Hidden;
                    commands.entity(*icon).remove::<MapMarker>();
                }
            }
        }

        debug!("Removed {} map marker(s) for {:?}", removed.len(), request.target);
    }
}

/// Drops index entries whose icon no longer carries a marker.
pub fn prune_stale_markers(mut index: ResMut<MarkerIndex>, markers: Query<(), With<MapMarker>>) {
    if index.is_empty() {
        return;
    }
    let dropped = index.retain_icons(|icon| markers.contains(icon));
    if dropped > 0 {
        debug!("Pruned {} stale map marker(s)", dropped);
    }
}

/// Picks up the real frame size once UI layout has run.
pub fn sync_frame_size(
    mut frames: Query<(&mut MinimapFrame, &ComputedNode), Changed<ComputedNode>>,
) {
    for (mut frame, computed) in frames.iter_mut() {
        let size = inner_frame_size(computed);
        if size.x > 0.0 && size.y > 0.0 && frame.size != size {
            frame.size = size;
        }
    }
}

/// Logical size of the area absolute children are placed in: the node minus its border.
fn inner_frame_size(computed: &ComputedNode) -> Vec2 {
    let border = computed.border();
    let inner = computed.size() - Vec2::new(border.left + border.right, border.top + border.bottom);
    inner.max(Vec2::ZERO) * computed.inverse_scale_factor()
}

/// Projects every frame in continuous mode, otherwise only on request.
///
/// Several refresh requests in one frame collapse into a single pass.
pub fn refresh_minimap(
    mut requests: MessageReader<RefreshMinimap>,
    settings: Res<MinimapSettings>,
    mut projector: MinimapProjector,
) {
    let requested = requests.read().count() > 0;
    if !settings.continuous && !requested {
        return;
    }
    projector.refresh();
}

/// Converts center-anchored icon offsets into `left`/`top` inside the frame.
pub fn apply_anchored_positions(
    frames: Query<&MinimapFrame>,
    mut icons: Query<(&AnchoredPosition, &mut Node, Option<&ComputedNode>), Without<MinimapFrame>>,
) {
    let Ok(frame) = frames.single() else {
        return;
    };
    let half = frame.size * 0.5;

    for (anchored, mut node, computed) in icons.iter_mut() {
        let icon_size = computed
            .map(|computed| computed.size() * computed.inverse_scale_factor())
            .filter(|size| size.x > 0.0 && size.y > 0.0)
            .unwrap_or_else(|| authored_size(&node));

        let left = Val::Px(half.x + anchored.0.x - icon_size.x * 0.5);
        let top = Val::Px(half.y - anchored.0.y - icon_size.y * 0.5);
        if node.left != left || node.top != top {
            node.left = left;
            node.top = top;
        }
    }
}

fn authored_size(node: &Node) -> Vec2 {
    let px = |value: Val| match value {
        Val::Px(pixels) => pixels,
        _ => 0.0,
    };
    Vec2::new(px(node.width), px(node.height))
}
