//! Pickup systems: overlap query on key press, tally, HUD counters.
use bevy::{ecs::system::SystemParam, prelude::*};

use crate::{
    collector::{
        components::{
            Collectible, CollectionTally, CounterText, PickupCategory, ProximityCollector,
        },
        config::CollectorSettings,
        events::ItemCollected,
    },
    minimap::events::{RefreshMinimap, RemoveMapMarkers},
    physics::{AttachedBody, SpatialQuery},
};

/// Key that triggers a pickup.
pub const COLLECT_KEY: KeyCode = KeyCode::Space;

/// Lookups needed to turn an overlapping collider into a collected item.
#[derive(SystemParam)]
pub struct PickupTargets<'w, 's> {
    tagged: Query<'w, 's, (), With<Collectible>>,
    bodies: Query<'w, 's, &'static AttachedBody>,
    categories: Query<'w, 's, Option<&'static PickupCategory>>,
}

impl PickupTargets<'_, '_> {
    /// The entity owning `collider`: its attached body, or the collider itself.
    fn owner(&self, collider: Entity) -> Entity {
        self.bodies
            .get(collider)
            .map(|body| body.0)
            .unwrap_or(collider)
    }

    /// `None` when the entity is gone, otherwise its category if it has one.
    fn category(&self, item: Entity) -> Option<Option<PickupCategory>> {
        self.categories.get(item).ok().map(|category| category.copied())
    }
}

/// Outgoing messages of a pickup batch.
#[derive(SystemParam)]
pub struct PickupMessages<'w> {
    collected: MessageWriter<'w, ItemCollected>,
    removals: MessageWriter<'w, RemoveMapMarkers>,
    refresh: MessageWriter<'w, RefreshMinimap>,
}

/// Collects every item around each collector when the collect key is pressed.
pub fn collect_nearby_items(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    spatial: SpatialQuery,
    targets: PickupTargets,
    mut tally: ResMut<CollectionTally>,
    mut messages: PickupMessages,
    mut collectors: Query<(Entity, &Transform, &mut ProximityCollector)>,
) {
    if !keyboard.just_pressed(COLLECT_KEY) {
        return;
    }

    let mut taken: Vec<Entity> = Vec::new();
    for (collector_entity, transform, mut collector) in collectors.iter_mut() {
        let use_tag_filter = collector.use_tag_filter;
        let notify_minimap = collector.notify_minimap;
        let disposal = collector.disposal;
        let mut batch = 0;

        for &collider in collector.gather(transform.translation, &spatial) {
            if use_tag_filter && !targets.tagged.contains(collider) {
                continue;
            }

            let item = targets.owner(collider);
            if item == collector_entity || taken.contains(&item) {
                continue;
            }
            let Some(category) = targets.category(item) else {
                continue;
            };
            taken.push(item);

            if notify_minimap {
                messages.removals.write(RemoveMapMarkers {
                    target: item,
                    disposal,
                });
            }
            commands.entity(item).despawn();

            if let Some(slot) = category.and_then(PickupCategory::slot) {
                tally.record(slot);
            }
            messages.collected.write(ItemCollected {
                collector: collector_entity,
                item,
                category: category.map(|category| category.0),
            });
            batch += 1;
        }

        if batch > 0 {
            messages.refresh.write(RefreshMinimap);
            debug!("Collector {:?} picked up {} item(s)", collector_entity, batch);
        }
    }
}

/// Logs every pickup, naming the collector when it has a [`Name`].
pub fn log_collected_items(mut collected: MessageReader<ItemCollected>, names: Query<&Name>) {
    for event in collected.read() {
        let collector = names
            .get(event.collector)
            .map(|name| name.as_str().to_owned())
            .unwrap_or_else(|_| format!("{:?}", event.collector));
        match event.category {
            Some(category) => info!(
                "{} collected {:?} (category {})",
                collector, event.item, category
            ),
            None => info!("{} collected {:?} (no category)", collector, event.item),
        }
    }
}

/// Rewrites counter texts when the tally changes or a counter appears.
pub fn update_counter_texts(
    tally: Res<CollectionTally>,
    settings: Res<CollectorSettings>,
    mut texts: Query<(Ref<CounterText>, &mut Text)>,
) {
    let tally_changed = tally.is_changed();
    for (counter, mut text) in texts.iter_mut() {
        if !tally_changed && !counter.is_added() {
            continue;
        }
        text.0 = format!("{}: {}", settings.label(counter.0), tally.count(counter.0));
    }
}

#[cfg(test)]
mod tests {
    use bevy::ecs::message::Messages;

    use super::*;
    use crate::{
        collector::components::CounterSlot,
        minimap::{
            components::{AnchoredPosition, MapMarker, MarkerDisposal, MarkerIndex},
            systems::{index_new_markers, remove_map_markers},
        },
        physics::{
            components::{LAYER_COLLECTIBLES, LAYER_DEFAULT},
            CollisionLayers, SphereCollider,
        },
    };

    fn collector_app() -> App {
        let mut app = App::new();
        app.init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<CollectionTally>()
            .init_resource::<MarkerIndex>()
            .insert_resource(CollectorSettings::default())
            .add_message::<ItemCollected>()
            .add_message::<RemoveMapMarkers>()
            .add_message::<RefreshMinimap>()
            .add_systems(
                Update,
                (
                    index_new_markers,
                    collect_nearby_items,
                    log_collected_items,
                    remove_map_markers,
                    update_counter_texts,
                )
                    .chain(),
            );
        app
    }

    fn spawn_collector(app: &mut App, collector: ProximityCollector) -> Entity {
        app.world_mut()
            .spawn((Transform::default(), collector))
            .id()
    }

    fn spawn_item(app: &mut App, position: Vec3, category: u8) -> Entity {
        app.world_mut()
            .spawn((
                GlobalTransform::from_translation(position),
                SphereCollider::new(0.5),
                CollisionLayers(LAYER_COLLECTIBLES),
                Collectible,
                PickupCategory(category),
            ))
            .id()
    }

    fn press_collect(app: &mut App) {
        let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keyboard.release(COLLECT_KEY);
        keyboard.clear();
        keyboard.press(COLLECT_KEY);
    }

    fn exists(app: &App, entity: Entity) -> bool {
        app.world().get_entity(entity).is_ok()
    }

    #[test]
    fn categories_feed_their_counters() {
        let mut app = collector_app();
        let collector = spawn_collector(&mut app, ProximityCollector::new(3.0, 32));
        let items = [
            spawn_item(&mut app, Vec3::new(1.0, 0.0, 0.0), 1),
            spawn_item(&mut app, Vec3::new(0.0, 0.0, 1.0), 1),
            spawn_item(&mut app, Vec3::new(-1.0, 0.0, 0.0), 2),
            spawn_item(&mut app, Vec3::new(0.0, 0.0, -1.0), 7),
        ];

        press_collect(&mut app);
        app.update();

        let tally = *app.world().resource::<CollectionTally>();
        assert_eq!(tally.count(CounterSlot::First), 2);
        assert_eq!(tally.count(CounterSlot::Second), 1);
        assert!(items.iter().all(|item| !exists(&app, *item)));

        let collected = app.world().resource::<Messages<ItemCollected>>();
        assert_eq!(collected.len(), 4);
        let mut categories: Vec<Option<u8>> = collected
            .iter_current_update_messages()
            .inspect(|event| {
                assert_eq!(event.collector, collector);
                assert!(items.contains(&event.item));
            })
            .map(|event| event.category)
            .collect();
        categories.sort();
        assert_eq!(categories, vec![Some(1), Some(1), Some(2), Some(7)]);

        assert_eq!(app.world().resource::<Messages<RefreshMinimap>>().len(), 1);
    }

    #[test]
    fn nothing_happens_without_key_or_outside_radius() {
        let mut app = collector_app();
        spawn_collector(&mut app, ProximityCollector::new(3.0, 32));
        let near = spawn_item(&mut app, Vec3::new(1.0, 0.0, 0.0), 1);
        let far = spawn_item(&mut app, Vec3::new(10.0, 0.0, 0.0), 1);

        app.update();
        assert!(exists(&app, near));

        press_collect(&mut app);
        app.update();
        assert!(!exists(&app, near));
        assert!(exists(&app, far));
        assert_eq!(app.world().resource::<Messages<RefreshMinimap>>().len(), 1);
    }

    #[test]
    fn untagged_items_are_skipped_when_filtering() {
        let mut app = collector_app();
        spawn_collector(&mut app, ProximityCollector::new(3.0, 32));
        let untagged = app
            .world_mut()
            .spawn((
                GlobalTransform::from_xyz(1.0, 0.0, 0.0),
                SphereCollider::new(0.5),
                PickupCategory(2),
            ))
            .id();

        press_collect(&mut app);
        app.update();
        assert!(exists(&app, untagged));
        assert_eq!(app.world().resource::<Messages<RefreshMinimap>>().len(), 0);

        let mut unfiltered = ProximityCollector::new(3.0, 32);
        unfiltered.use_tag_filter = false;
        app.world_mut().spawn((Transform::default(), unfiltered));

        press_collect(&mut app);
        app.update();
        assert!(!exists(&app, untagged));
        let tally = *app.world().resource::<CollectionTally>();
        assert_eq!(tally.count(CounterSlot::Second), 1);
    }

    #[test]
    fn attached_colliders_collect_their_body_once() {
        let mut app = collector_app();
        spawn_collector(&mut app, ProximityCollector::new(3.0, 32));
        let body = app.world_mut().spawn(PickupCategory::ICE).id();
        for offset in [0.5, -0.5] {
            app.world_mut().spawn((
                GlobalTransform::from_xyz(offset, 0.0, 0.0),
                SphereCollider::new(0.25),
                Collectible,
                AttachedBody(body),
            ));
        }

        press_collect(&mut app);
        app.update();

        assert!(!exists(&app, body));
        let tally = *app.world().resource::<CollectionTally>();
        assert_eq!(tally.count(CounterSlot::Second), 1);
        assert_eq!(app.world().resource::<Messages<ItemCollected>>().len(), 1);
    }

    #[test]
    fn full_buffer_truncates_the_batch() {
        let mut app = collector_app();
        spawn_collector(&mut app, ProximityCollector::new(5.0, 2));
        for step in 0..5 {
            spawn_item(&mut app, Vec3::new(step as f32 * 0.5, 0.0, 0.0), 1);
        }

        press_collect(&mut app);
        app.update();

        let tally = *app.world().resource::<CollectionTally>();
        assert_eq!(tally.count(CounterSlot::First), 2);
        let remaining = app
            .world_mut()
            .query::<&Collectible>()
            .iter(app.world())
            .count();
        assert_eq!(remaining, 3);
    }

    #[test]
    fn layer_mask_limits_candidates() {
        let mut app = collector_app();
        let mut collector = ProximityCollector::new(3.0, 32);
        collector.layer_mask = LAYER_DEFAULT;
        spawn_collector(&mut app, collector);
        let item = spawn_item(&mut app, Vec3::new(1.0, 0.0, 0.0), 1);

        press_collect(&mut app);
        app.update();

        assert!(exists(&app, item));
    }

    #[test]
    fn collected_items_lose_their_map_markers() {
        let mut app = collector_app();
        let mut hiding = ProximityCollector::new(3.0, 32);
        hiding.disposal = MarkerDisposal::Hide;
        spawn_collector(&mut app, hiding);
        let item = spawn_item(&mut app, Vec3::new(1.0, 0.0, 0.0), 1);
        let icon = app
            .world_mut()
            .spawn((
                MapMarker::new("ore", Some(item)),
                AnchoredPosition::default(),
                Visibility::Inherited,
            ))
            .id();
        app.update();

        press_collect(&mut app);
        app.update();

        assert!(exists(&app, icon));
        assert!(app.world().get::<MapMarker>(icon).is_none());
        assert_eq!(app.world().get::<Visibility>(icon), Some(&Visibility::Hidden));
        assert!(app.world().resource::<MarkerIndex>().is_empty());
    }

    #[test]
    fn counter_texts_track_the_tally() {
        let mut app = collector_app();
        spawn_collector(&mut app, ProximityCollector::new(3.0, 32));
        spawn_item(&mut app, Vec3::new(1.0, 0.0, 0.0), 1);
        let text = app
            .world_mut()
            .spawn((Text::default(), CounterText(CounterSlot::First)))
            .id();
        let ice_text = app
            .world_mut()
            .spawn((Text::default(), CounterText(CounterSlot::Second)))
            .id();

        app.update();
        assert_eq!(
            app.world().get::<Text>(text).map(|t| t.0.as_str()),
            Some("Regolith: 0")
        );
        assert_eq!(
            app.world().get::<Text>(ice_text).map(|t| t.0.as_str()),
            Some("Ice: 0")
        );

        press_collect(&mut app);
        app.update();
        assert_eq!(
            app.world().get::<Text>(text).map(|t| t.0.as_str()),
            Some("Regolith: 1")
        );
        assert_eq!(
            app.world().get::<Text>(ice_text).map(|t| t.0.as_str()),
            Some("Ice: 0")
        );

        spawn_item(&mut app, Vec3::new(-1.0, 0.0, 0.0), 2);
        press_collect(&mut app);
        app.update();
        assert_eq!(
            app.world().get::<Text>(ice_text).map(|t| t.0.as_str()),
            Some("Ice: 1")
        );
        assert_eq!(
            app.world().get::<Text>(text).map(|t| t.0.as_str()),
            Some("Regolith: 1")
        );
    }
}
