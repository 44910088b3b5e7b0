//! Path: horde_core/src/physics/tile_collision.rs
//! Summary: 軸分離の矩形 vs タイル衝突解決（X を動かして押し戻し → Y を動かして押し戻し）

use crate::constants::{PHYSICS_LAYER, PHYSICS_TILES};
use crate::entity::Entity;
use crate::geometry::Rect;
use crate::tilemap::TileMap;

/// 1 体分の解決。死亡中・速度 0 のエンティティは触らない。
/// 候補タイルは移動前のタイル範囲 ±1 で一度だけ集める
pub fn resolve_tile_collision(entity: &mut Entity, dt: f32, tilemap: &TileMap) {
    if entity.dead || entity.velocity == glam::Vec2::ZERO {
        return;
    }
    let solids: Vec<Rect> = tilemap
        .get_around(entity.pos(), entity.rect.size(), PHYSICS_LAYER, PHYSICS_TILES)
        .into_iter()
        .map(|t| tilemap.tile_rect(t))
        .collect();

    let vx = entity.velocity.x * dt;
    entity.rect.x += vx;
    // 押し戻す前に当たったタイルを確定させる
    let hits = overlapping(&entity.rect, &solids);
    for t in &hits {
        if vx > 0.0 {
            entity.rect.set_right(t.left());
        } else if vx < 0.0 {
            entity.rect.set_left(t.right());
        }
    }

    let vy = entity.velocity.y * dt;
    entity.rect.y += vy;
    let hits = overlapping(&entity.rect, &solids);
    for t in &hits {
        if vy > 0.0 {
            entity.rect.set_bottom(t.top());
        } else if vy < 0.0 {
            entity.rect.set_top(t.bottom());
        }
    }
}

fn overlapping(rect: &Rect, solids: &[Rect]) -> Vec<Rect> {
    solids.iter().filter(|t| rect.overlaps(t)).copied().collect()
}

/// 複数エンティティをまとめて解決する
pub fn resolve_all<'a, I>(entities: I, dt: f32, tilemap: &TileMap)
where
    I: IntoIterator<Item = &'a mut Entity>,
{
    for e in entities {
        resolve_tile_collision(e, dt, tilemap);
    }
}
