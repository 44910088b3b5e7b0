//! Path: horde_sim/src/game_logic/systems/items.rs
//! Summary: 地面アイテムの輪郭表示・拾う/落とす・装備品の使用とタイマー

use super::projectiles::spawn_shots;
use crate::world::{EntityStore, FrameEvent, GameWorld};
use glam::Vec2;
use horde_core::entity::{Entity, EntityId};
use horde_core::item::ItemUse;
use horde_core::physics::entity_index::EntityIndex;
use rustc_hash::FxHashSet;

/// 中心から `radius` 以内の地面アイテム（中心同士の距離、近い順）。
/// ストアを直接走査するので、このフレームに木箱から出たものも含まれる
fn items_within(center: Vec2, radius: f32, items: &EntityStore) -> Vec<(EntityId, f32)> {
    let mut found: Vec<(EntityId, f32)> = items
        .iter()
        .filter_map(|item| {
            let d = item.center().distance(center);
            (d <= radius).then_some((item.id, d))
        })
        .collect();
    found.sort_by(|a, b| a.1.total_cmp(&b.1));
    found
}

/// 全アイテムの輪郭を消してから、範囲内のものだけ付け直す
pub fn update_outlines(center: Vec2, radius: f32, items: &mut EntityStore) -> usize {
    for item in items.iter_mut() {
        item.outlined = false;
    }
    let near = items_within(center, radius, items);
    for &(id, _) in &near {
        if let Some(item) = items.get_mut(id) {
            item.outlined = true;
        }
    }
    near.len()
}

/// 拾えるアイテムのうち最も近いもの
pub fn find_pickup(
    center: Vec2,
    radius: f32,
    items: &EntityStore,
    ignore: &FxHashSet<EntityId>,
) -> Option<EntityId> {
    items_within(center, radius, items)
        .into_iter()
        .map(|(id, _)| id)
        .find(|id| !ignore.contains(id))
}

/// 装備中のアイテムを所持者の中心に置いて地面に戻す。インデックスにも即座に入れる
pub fn drop_held_item(holder: &mut Entity, items: &mut EntityStore, index: &mut EntityIndex) -> Option<EntityId> {
    let center = holder.center();
    let mut item = holder.humanoid_mut()?.drop_held()?;
    item.rect.set_center(center);
    let id = item.id;
    index.insert(&item);
    items.insert(item);
    Some(id)
}

/// 所持品を所持者の中心へ追従させる
pub(crate) fn sync_held_items(holder: &mut Entity) {
    let center = holder.center();
    let angle = holder.angle;
    if let Some(h) = holder.humanoid_mut() {
        for item in h.inventory.iter_mut() {
            item.rect.set_center(center);
            item.angle = angle;
        }
    }
}

/// 所持品のタイマー（発射間隔・リロード）を進める
pub(crate) fn tick_inventories(w: &mut GameWorld, dt: f32) {
    for e in std::iter::once(&mut w.player).chain(w.actors.iter_mut()) {
        if let Some(h) = e.humanoid_mut() {
            for item in h.inventory.iter_mut() {
                if let Some(state) = item.item_mut() {
                    state.tick(dt);
                }
            }
        }
    }
}

pub(crate) fn update_items(w: &mut GameWorld) {
    let input = w.input;
    let player_id = w.player.id;
    let center = w.player.center();

    update_outlines(center, w.config.outline_radius, &mut w.items);

    if w.player.dead {
        return;
    }

    // 落としたばかりのアイテムを同じフレームで拾い直さない
    let mut ignore = FxHashSet::default();
    if input.drop {
        if let Some(id) = drop_held_item(&mut w.player, &mut w.items, &mut w.entity_index) {
            ignore.insert(id);
            w.frame_events.push(FrameEvent::ItemDropped { item: id, by: player_id });
        }
    }

    if input.pickup {
        let found = find_pickup(center, w.config.pickup_radius, &w.items, &ignore);
        if let Some(item) = found.and_then(|id| w.items.remove(id)) {
            let id = item.id;
            log::debug!("player picked up {}", item.item().map(|s| s.label()).unwrap_or("?"));
            if let Some(h) = w.player.humanoid_mut() {
                h.pickup(player_id, item);
            }
            w.frame_events.push(FrameEvent::ItemPickedUp { item: id, by: player_id });
        }
    }

    sync_held_items(&mut w.player);

    let aim = w.player.angle;
    let used = w
        .player
        .humanoid_mut()
        .and_then(|h| h.held_item_mut())
        .and_then(|e| e.item_mut())
        .map(|s| s.operate(aim, input.shoot, input.reload))
        .unwrap_or(ItemUse::None);

    match used {
        ItemUse::Fired(shots) => {
            spawn_shots(&mut w.ids, &mut w.bullets, center, player_id, &shots, w.config.bullet_lifetime);
            w.frame_events.push(FrameEvent::ShotFired { by: player_id, bullets: shots.len() as u32 });
        }
        ItemUse::Healed(amount) => {
            w.player.heal(amount);
            w.frame_events.push(FrameEvent::Healed { amount });
        }
        ItemUse::None => {}
    }
    if let Some(h) = w.player.humanoid_mut() {
        h.discard_spent();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_logic::systems::crates::update_crates;
    use crate::world::InputSnapshot;
    use horde_core::config::SimConfig;
    use horde_core::entity::IdRegistry;
    use horde_core::entity_params::GunKind;

    fn store_of(items: Vec<Entity>) -> EntityStore {
        let mut store = EntityStore::new();
        for e in items {
            store.insert(e);
        }
        store
    }

    #[test]
    fn outline_marks_only_nearby_items() {
        let mut ids = IdRegistry::new();
        let near = Entity::medkit(ids.next_id(), Vec2::new(100.0, 100.0));
        let far = Entity::medkit(ids.next_id(), Vec2::new(200.0, 100.0));
        let (near_id, far_id) = (near.id, far.id);
        let mut store = store_of(vec![near, far]);
        if let Some(e) = store.get_mut(far_id) {
            e.outlined = true;
        }

        let n = update_outlines(Vec2::new(110.0, 104.0), 30.0, &mut store);
        assert_eq!(n, 1);
        assert!(store.get(near_id).is_some_and(|e| e.outlined));
        assert!(store.get(far_id).is_some_and(|e| !e.outlined));
    }

    #[test]
    fn stacked_items_are_all_outlined() {
        let mut ids = IdRegistry::new();
        let a = Entity::medkit(ids.next_id(), Vec2::new(105.0, 100.0));
        let b = Entity::medkit(ids.next_id(), Vec2::new(105.0, 100.0));
        let mut store = store_of(vec![a, b]);
        assert_eq!(update_outlines(Vec2::new(110.0, 104.0), 30.0, &mut store), 2);
        assert!(store.iter().all(|e| e.outlined));
    }

    #[test]
    fn crate_loot_is_pickable_in_the_release_tick() {
        let mut w = GameWorld::new(SimConfig::default());
        w.player.set_pos(Vec2::new(100.0, 100.0));
        let kit = Entity::medkit(w.ids.next_id(), Vec2::new(100.0, 100.0));
        let kit_id = kit.id;
        let c = w.ids.next_id();
        w.actors.insert(Entity::loot_crate(c, Vec2::new(100.0, 100.0), vec![kit]));
        w.rebuild_indices();
        if let Some(e) = w.actors.get_mut(c) {
            e.damage(200.0, Vec2::X);
        }

        update_crates(&mut w);
        w.input = InputSnapshot { pickup: true, ..InputSnapshot::default() };
        update_items(&mut w);

        assert!(!w.items.contains(kit_id));
        assert_eq!(w.player.humanoid().and_then(|h| h.held_item()).map(|e| e.id), Some(kit_id));
    }

    #[test]
    fn pickup_prefers_the_nearest_item() {
        let mut ids = IdRegistry::new();
        let a = Entity::medkit(ids.next_id(), Vec2::new(120.0, 100.0));
        let b = Entity::gun(ids.next_id(), Vec2::new(95.0, 98.0), GunKind::Pistol);
        let (a_id, b_id) = (a.id, b.id);
        let store = store_of(vec![a, b]);
        let center = Vec2::new(105.0, 102.0);

        let none = FxHashSet::default();
        assert_eq!(find_pickup(center, 30.0, &store, &none), Some(b_id));
        let ignore: FxHashSet<EntityId> = [b_id].into_iter().collect();
        assert_eq!(find_pickup(center, 30.0, &store, &ignore), Some(a_id));
        assert_eq!(find_pickup(Vec2::new(400.0, 400.0), 30.0, &store, &none), None);
    }

    #[test]
    fn dropped_item_lands_at_holder_center_and_is_indexed() {
        let mut ids = IdRegistry::new();
        let mut player = Entity::player(ids.next_id(), Vec2::new(50.0, 50.0));
        let gun = Entity::gun(ids.next_id(), Vec2::ZERO, GunKind::Rifle);
        let gun_id = gun.id;
        let owner = player.id;
        if let Some(h) = player.humanoid_mut() {
            h.pickup(owner, gun);
        }
        let mut store = EntityStore::new();
        let mut index = EntityIndex::new(32.0);

        assert_eq!(drop_held_item(&mut player, &mut store, &mut index), Some(gun_id));
        assert_eq!(store.get(gun_id).map(|e| e.center()), Some(player.center()));
        assert!(index.get_all().iter().any(|e| e.payload == gun_id));
        assert_eq!(drop_held_item(&mut player, &mut store, &mut index), None);
    }

    #[test]
    fn pickup_then_shoot_spawns_owned_bullets() {
        let mut w = GameWorld::new(SimConfig::default());
        w.player.set_pos(Vec2::new(100.0, 100.0));
        let gun_id = w.ids.next_id();
        w.place_item(Entity::gun(gun_id, Vec2::new(100.0, 100.0), GunKind::Pistol));
        w.rebuild_indices();

        w.input = InputSnapshot { pickup: true, ..InputSnapshot::default() };
        update_items(&mut w);
        assert!(w.items.is_empty());
        assert_eq!(w.player.humanoid().and_then(|h| h.held_item()).map(|e| e.id), Some(gun_id));

        w.input = InputSnapshot { shoot: true, ..InputSnapshot::default() };
        update_items(&mut w);
        assert_eq!(w.bullets.len(), 1);
        assert!(w.bullets.iter().all(|b| b.bullet_state().map(|s| s.owner) == Some(w.player.id)));
        assert!(w.frame_events.iter().any(|e| matches!(e, FrameEvent::ShotFired { bullets: 1, .. })));
    }

    #[test]
    fn drop_is_not_undone_by_pickup_in_the_same_frame() {
        let mut w = GameWorld::new(SimConfig::default());
        let gun = Entity::gun(w.ids.next_id(), Vec2::ZERO, GunKind::Shotgun);
        let gun_id = gun.id;
        let owner = w.player.id;
        if let Some(h) = w.player.humanoid_mut() {
            h.pickup(owner, gun);
        }
        w.rebuild_indices();
        w.input = InputSnapshot { drop: true, pickup: true, ..InputSnapshot::default() };
        update_items(&mut w);
        assert!(w.items.contains(gun_id));
        assert!(w.player.humanoid().is_some_and(|h| h.inventory.is_empty()));
    }

    #[test]
    fn medkit_heals_and_is_discarded() {
        let mut w = GameWorld::new(SimConfig::default());
        w.player.damage(80.0, Vec2::X);
        let kit = Entity::medkit(w.ids.next_id(), Vec2::ZERO);
        let owner = w.player.id;
        if let Some(h) = w.player.humanoid_mut() {
            h.pickup(owner, kit);
        }
        w.input = InputSnapshot { shoot: true, ..InputSnapshot::default() };
        update_items(&mut w);
        assert_eq!(w.player.health(), Some(170.0));
        assert!(w.player.humanoid().is_some_and(|h| h.inventory.is_empty()));
    }
}
