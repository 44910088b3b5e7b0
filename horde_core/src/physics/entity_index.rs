//! Path: horde_core/src/physics/entity_index.rs
//! Summary: エンティティ用の空間インデックス（毎フレーム再構築・近傍/円クエリ）

use super::spatial_hash::{AnchorKey, IndexEntry, SpatialHash};
use crate::entity::{Entity, EntityId};
use glam::Vec2;
use rustc_hash::FxHashSet;

/// ペイロードは `EntityId`。ストアから引けなくなった ID は呼び出し側で読み飛ばす
pub struct EntityIndex {
    hash: SpatialHash<EntityId>,
}

impl EntityIndex {
    pub fn new(cell_size: f32) -> Self {
        Self {
            hash: SpatialHash::new(cell_size),
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.hash.cell_size()
    }

    /// 全消去してから各エンティティをアンカー（左上）と外接矩形で登録する
    pub fn rebuild<'a, I>(&mut self, entities: I)
    where
        I: IntoIterator<Item = &'a Entity>,
    {
        self.hash.clear();
        for e in entities {
            self.insert(e);
        }
    }

    /// 1 件だけ追加（アイテムを落としたとき）
    pub fn insert(&mut self, e: &Entity) {
        self.hash.insert(e.pos(), e.rect, e.id);
    }

    pub fn query_near(&self, position: Vec2, size: Vec2) -> Vec<IndexEntry<EntityId>> {
        self.hash.query(position, size)
    }

    pub fn query_near_ignoring(
        &self,
        position: Vec2,
        size: Vec2,
        ignore: &FxHashSet<AnchorKey>,
    ) -> Vec<IndexEntry<EntityId>> {
        self.hash.query_point(position, size, ignore)
    }

    /// 中心からの距離が `radius` 以下のアンカーだけを返す（セル走査は粗い絞り込み）
    pub fn query_circle(&self, center: Vec2, radius: f32) -> Vec<IndexEntry<EntityId>> {
        let corner = center - Vec2::splat(radius);
        self.hash
            .query_box_span(corner, Vec2::splat(radius * 2.0), &FxHashSet::default())
            .into_iter()
            .filter(|e| e.anchor.distance(center) <= radius)
            .collect()
    }

    pub fn get_all(&self) -> Vec<IndexEntry<EntityId>> {
        self.hash.get_all()
    }

    pub fn clear(&mut self) {
        self.hash.clear();
    }

    pub fn occupied_cells(&self) -> usize {
        self.hash.occupied_cells()
    }
}
