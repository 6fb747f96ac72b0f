//! Messages emitted by pickups.
use bevy::prelude::*;

/// Fired once per item a collector picks up.
#[derive(Message, Debug, Clone, Copy)]
pub struct ItemCollected {
    pub collector: Entity,
    pub item: Entity,
    /// Raw category of the item, `None` when it had none.
    pub category: Option<u8>,
}
