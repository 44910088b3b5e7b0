//! Path: horde_sim/src/world/entity_store.rs
//! Summary: EntityId で引けるエンティティ格納庫（swap_remove + スロット表）

use horde_core::entity::{Entity, EntityId};
use rustc_hash::FxHashMap;

/// 連続配列に詰めて持ち、ID → 添字の表で O(1) に引く。
/// 削除は swap_remove なので反復順は安定しない
#[derive(Default)]
pub struct EntityStore {
    entities: Vec<Entity>,
    slots:    FxHashMap<EntityId, usize>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// 同じ ID が既にあれば置き換える
    pub fn insert(&mut self, e: Entity) {
        if let Some(&i) = self.slots.get(&e.id) {
            self.entities[i] = e;
            return;
        }
        self.slots.insert(e.id, self.entities.len());
        self.entities.push(e);
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let i = self.slots.remove(&id)?;
        let removed = self.entities.swap_remove(i);
        if let Some(moved) = self.entities.get(i) {
            self.slots.insert(moved.id, i);
        }
        Some(removed)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.slots.contains_key(&id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.slots.get(&id).and_then(|&i| self.entities.get(i))
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let i = *self.slots.get(&id)?;
        self.entities.get_mut(i)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Entity> {
        self.entities.iter_mut()
    }

    /// rayon で読むとき用
    pub fn as_slice(&self) -> &[Entity] {
        &self.entities
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.entities.iter().map(|e| e.id).collect()
    }

    /// 条件に合うものを取り除いて返す
    pub fn extract_if(&mut self, mut pred: impl FnMut(&Entity) -> bool) -> Vec<Entity> {
        let doomed: Vec<EntityId> = self.entities.iter().filter(|e| pred(e)).map(|e| e.id).collect();
        doomed.into_iter().filter_map(|id| self.remove(id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use horde_core::entity::IdRegistry;

    #[test]
    fn remove_keeps_other_handles_valid() {
        let mut ids = IdRegistry::new();
        let mut store = EntityStore::new();
        let all: Vec<EntityId> = (0..5)
            .map(|i| {
                let e = Entity::zombie(ids.next_id(), Vec2::new(i as f32 * 10.0, 0.0));
                let id = e.id;
                store.insert(e);
                id
            })
            .collect();
        assert!(store.remove(all[1]).is_some());
        assert!(store.remove(all[1]).is_none());
        assert_eq!(store.len(), 4);
        for &id in all.iter().filter(|&&id| id != all[1]) {
            assert_eq!(store.get(id).map(|e| e.id), Some(id));
        }
    }

    #[test]
    fn extract_if_collects_matches() {
        let mut ids = IdRegistry::new();
        let mut store = EntityStore::new();
        store.insert(Entity::medkit(ids.next_id(), Vec2::ZERO));
        store.insert(Entity::zombie(ids.next_id(), Vec2::ZERO));
        store.insert(Entity::medkit(ids.next_id(), Vec2::ZERO));
        let items = store.extract_if(|e| e.is_item());
        assert_eq!(items.len(), 2);
        assert_eq!(store.len(), 1);
        assert!(store.iter().all(|e| e.is_zombie()));
    }
}
