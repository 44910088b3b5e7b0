//! Path: horde_sim/src/game_logic/systems/explosions.rs
//! Summary: 爆発ダメージ（候補矩形 → 距離フィルタ → 距離減衰ダメージ）

use crate::constants::{BLOOD_PER_HIT, SPARKS_PER_EXPLOSION, SPARK_CONE};
use crate::world::{FrameEvent, GameWorld, ParticleKind};
use glam::Vec2;
use horde_core::entity::{Entity, EntityId, EntityTag};
use horde_core::geometry::normalize_or_zero;
use horde_core::physics::entity_index::EntityIndex;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExplosionHit {
    pub id:        EntityId,
    pub damage:    f32,
    /// 爆心からアンカーへの単位ベクトル
    pub direction: Vec2,
}

/// 爆心からの距離 d（アンカー基準）に対するダメージ
#[inline]
pub fn explosion_damage(radius: f32, distance: f32, factor: f32) -> f32 {
    (radius / (distance + 1.0)) * radius * factor
}

/// 候補を引く矩形 (左上, 大きさ)。旧挙動は一辺 radius² で取る
pub fn explosion_window(center: Vec2, radius: f32, legacy: bool) -> (Vec2, Vec2) {
    let corner = center - Vec2::splat(radius);
    if legacy {
        (corner, Vec2::splat(radius * radius))
    } else {
        (corner, Vec2::splat(radius * 2.0))
    }
}

/// 半径内にアンカーがある被弾可能・生存中のエンティティを列挙する。
/// `lookup` が None を返す ID（アイテムなど）は無視する
pub fn explosion_hits<'a, F>(
    index: &EntityIndex,
    center: Vec2,
    radius: f32,
    factor: f32,
    legacy: bool,
    lookup: F,
) -> Vec<ExplosionHit>
where
    F: Fn(EntityId) -> Option<&'a Entity>,
{
    let (corner, size) = explosion_window(center, radius, legacy);
    index
        .query_near(corner, size)
        .into_iter()
        .filter_map(|entry| {
            let e = lookup(entry.payload)?;
            if !e.damageable || e.dead {
                return None;
            }
            let d = entry.anchor.distance(center);
            if d > radius {
                return None;
            }
            Some(ExplosionHit {
                id:        entry.payload,
                damage:    explosion_damage(radius, d, factor),
                direction: normalize_or_zero(entry.anchor - center),
            })
        })
        .collect()
}

/// 予約済みの爆発をまとめて処理する（インデックス再構築の後に呼ぶ）
pub(crate) fn apply_pending_explosions(w: &mut GameWorld) {
    let pending = std::mem::take(&mut w.pending_explosions);
    let factor = w.config.explosion_damage_factor;
    let legacy = w.config.legacy_explosion_window;

    for ex in pending {
        let hits = explosion_hits(&w.entity_index, ex.center, ex.radius, factor, legacy, |id| w.target(id));
        log::debug!(
            "explosion from {:?} at {} r={} hits {}",
            ex.source,
            ex.center,
            ex.radius,
            hits.len()
        );
        w.particles.emit(ex.center.x, ex.center.y, SPARKS_PER_EXPLOSION, ParticleKind::Spark);

        for hit in &hits {
            let Some(target) = w.target_mut(hit.id) else { continue };
            let was_dead = target.dead;
            target.damage(hit.damage, hit.direction);
            let killed = !was_dead && target.dead;
            let tag = target.tag();
            let center = target.center();
            if target.bleeds() {
                let angle = hit.direction.y.atan2(hit.direction.x);
                w.particles.emit_cone(center.x, center.y, BLOOD_PER_HIT, ParticleKind::Blood, angle, SPARK_CONE);
            }
            if tag == EntityTag::Player {
                w.frame_events.push(FrameEvent::PlayerDamaged { damage: hit.damage });
            }
            if killed {
                if tag != EntityTag::Player {
                    w.kill_count += 1;
                }
                w.frame_events.push(FrameEvent::EntityKilled { id: hit.id, tag });
            }
        }

        w.frame_events.push(FrameEvent::Explosion {
            center: ex.center,
            radius: ex.radius,
            hits:   hits.len() as u32,
        });
    }
}
