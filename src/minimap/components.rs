// src/minimap/components.rs
//
// Minimap frame, icons and the registry of markers keyed by tracked entity.

use std::collections::HashMap;

use bevy::prelude::*;
use serde::Deserialize;

/// What happens to a marker icon when its marker is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerDisposal {
    #[default]
    Despawn,
    /// Keep the icon entity but stop drawing and tracking it.
    Hide,
}

/// UI node the map image is drawn in. Icons are its absolutely positioned children.
#[derive(Component, Debug, Clone, Copy)]
pub struct MinimapFrame {
    /// Logical pixel size, synced from layout once it is known.
    pub size: Vec2,
}

impl MinimapFrame {
    pub fn new(size: Vec2) -> Self {
        Self { size }
    }
}

/// Icon that shows where the tracked player is.
#[derive(Component, Debug, Default)]
pub struct PlayerMapIcon;

/// Icon tracking a world entity on the map.
#[derive(Component, Debug, Clone)]
pub struct MapMarker {
    pub name: String,
    target: Option<Entity>,
}

impl MapMarker {
    pub fn new(name: impl Into<String>, target: Option<Entity>) -> Self {
        Self {
            name: name.into(),
            target,
        }
    }

    pub fn target(&self) -> Option<Entity> {
        self.target
    }
}

/// Icon offset from the frame center in pixels, +Y up.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct AnchoredPosition(pub Vec2);

/// Marker icons grouped by the entity they track.
#[derive(Resource, Debug, Default)]
pub struct MarkerIndex {
    by_target: HashMap<Entity, Vec<Entity>>,
}

impl MarkerIndex {
    pub fn insert(&mut self, target: Entity, icon: Entity) {
        let icons = self.by_target.entry(target).or_default();
        if !icons.contains(&icon) {
            icons.push(icon);
        }
    }

    /// Removes and returns every icon tracking `target`; empty when none do.
    pub fn take(&mut self, target: Entity) -> Vec<Entity> {
        self.by_target.remove(&target).unwrap_or_default()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn icons_for(&self, target: Entity) -> &[Entity] {
        self.by_target
            .get(&target)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Keeps only icons for which `keep` holds; returns how many were dropped.
    pub fn retain_icons(&mut self, mut keep: impl FnMut(Entity) -> bool) -> usize {
        let mut dropped = 0;
        self.by_target.retain(|_, icons| {
            let before = icons.len();
            icons.retain(|icon| keep(*icon));
            dropped += before - icons.len();
            !icons.is_empty()
        });
        dropped
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn len(&self) -> usize {
        self.by_target.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_target.is_empty()
    }
}

/// The entity drawn by the [`PlayerMapIcon`].
#[derive(Resource, Debug, Default)]
pub struct MinimapTracking {
    player: Option<Entity>,
}

impl MinimapTracking {
    pub fn player(&self) -> Option<Entity> {
        self.player
    }

    pub fn set_player(&mut self, player: Option<Entity>) {
        self.player = player;
    }
}

/// Square map icon, hidden until the first projection pass places it.
pub fn map_icon(size: f32, color: Color) -> impl Bundle {
    (
        Node {
            position_type: PositionType::Absolute,
            width: Val::Px(size),
            height: Val::Px(size),
            ..default()
        },
        BackgroundColor(color),
        AnchoredPosition::default(),
        Visibility::Hidden,
    )
}
