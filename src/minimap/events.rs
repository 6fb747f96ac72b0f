//! Requests other systems send to the minimap.
use bevy::prelude::*;

use super::components::MarkerDisposal;

/// Remove every marker tracking `target`. Does nothing when none do.
#[derive(Message, Debug, Clone, Copy)]
pub struct RemoveMapMarkers {
    pub target: Entity,
    pub disposal: MarkerDisposal,
}

/// Run a projection pass now, e.g. after a teleport or a batch of pickups.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct RefreshMinimap;
