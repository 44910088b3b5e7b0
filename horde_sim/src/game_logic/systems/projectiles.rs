//! Path: horde_sim/src/game_logic/systems/projectiles.rs
//! Summary: 弾の移動・寿命と、弾 vs 被弾体 / 障害物タイルの判定（集めてから適用）

use crate::constants::{BLOOD_PER_HIT, SPARKS_PER_HIT, SPARK_CONE};
use crate::world::{DecalKind, EntityStore, FrameEvent, GameWorld, ParticleKind};
use glam::Vec2;
use horde_core::entity::{Entity, EntityId, EntityKind, EntityTag, IdRegistry};
use horde_core::geometry::vec_from_angle;
use horde_core::item::Shot;
use horde_core::physics::entity_index::EntityIndex;
use horde_core::tilemap::TileMap;
use rustc_hash::FxHashSet;

/// 1 発分の判定結果
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectileHit {
    pub projectile: EntityId,
    pub pos:        Vec2,
    pub angle:      f32,
    /// false なら障害物タイル
    pub hit_entity: bool,
    pub target:     Option<(EntityId, EntityTag)>,
    pub damage:     f32,
    pub bleeds:     bool,
    /// この弾で生存 → 死亡に変わった
    pub killed:     bool,
}

/// 被弾体ごとにヒットボックス周辺の弾を引いて当て、残った弾を障害物レイヤーと突き合わせる。
/// 弾の削除やエフェクトは呼び出し側が結果を見て行う
pub fn resolve_projectile_hits<'a, I>(
    targets: I,
    bullets: &EntityStore,
    projectile_index: &EntityIndex,
    tilemap: &TileMap,
) -> Vec<ProjectileHit>
where
    I: IntoIterator<Item = &'a mut Entity>,
{
    let mut consumed: FxHashSet<EntityId> = FxHashSet::default();
    let mut hits = Vec::new();

    for target in targets {
        if target.dead || !target.damageable {
            continue;
        }
        let hitbox = target.hitbox();
        for entry in projectile_index.query_near(hitbox.pos(), hitbox.size()) {
            if consumed.contains(&entry.payload) {
                continue;
            }
            // インデックス構築後に消えた弾は読み飛ばす
            let Some(b) = bullets.get(entry.payload) else { continue };
            let Some(state) = b.bullet_state() else { continue };
            if state.owner == target.id || !b.rect.overlaps(&hitbox) {
                continue;
            }
            let was_dead = target.dead;
            target.damage(state.damage, vec_from_angle(b.angle));
            consumed.insert(b.id);
            hits.push(ProjectileHit {
                projectile: b.id,
                pos:        b.pos(),
                angle:      b.angle,
                hit_entity: true,
                target:     Some((target.id, target.tag())),
                damage:     state.damage,
                bleeds:     target.bleeds(),
                killed:     !was_dead && target.dead,
            });
        }
    }

    let ts = tilemap.tile_size();
    for b in bullets.iter() {
        if consumed.contains(&b.id) {
            continue;
        }
        if tilemap.is_obstructed(b.tile_pos(ts)) {
            hits.push(ProjectileHit {
                projectile: b.id,
                pos:        b.pos(),
                angle:      b.angle,
                hit_entity: false,
                target:     None,
                damage:     0.0,
                bleeds:     false,
                killed:     false,
            });
        }
    }
    hits
}

/// 発射指示から弾を生成する
pub fn spawn_shots(
    ids: &mut IdRegistry,
    bullets: &mut EntityStore,
    origin: Vec2,
    owner: EntityId,
    shots: &[Shot],
    lifetime: f32,
) {
    for s in shots {
        let mut b = Entity::bullet(ids.next_id(), origin, s.angle, s.speed, s.damage, owner);
        if let EntityKind::Bullet(state) = &mut b.kind {
            state.lifetime = lifetime;
        }
        bullets.insert(b);
    }
}

/// 弾を速度で進め、寿命を過ぎたものを捨てる
pub(crate) fn advance_bullets(bullets: &mut EntityStore, dt: f32) {
    for b in bullets.iter_mut() {
        b.rect.x += b.velocity.x * dt;
        b.rect.y += b.velocity.y * dt;
        if let EntityKind::Bullet(state) = &mut b.kind {
            state.age += dt;
        }
    }
    bullets.extract_if(|b| b.bullet_state().is_some_and(|s| s.age >= s.lifetime));
}

pub(crate) fn update_projectiles(w: &mut GameWorld, dt: f32) {
    advance_bullets(&mut w.bullets, dt);

    let hits = resolve_projectile_hits(
        std::iter::once(&mut w.player).chain(w.actors.iter_mut()),
        &w.bullets,
        &w.projectile_index,
        &w.tilemap,
    );

    for hit in hits {
        w.bullets.remove(hit.projectile);
        // 火花は常に、弾の進行方向の逆向きに散らす
        let back = hit.angle + std::f32::consts::PI;
        w.particles.emit_cone(hit.pos.x, hit.pos.y, SPARKS_PER_HIT, ParticleKind::Spark, back, SPARK_CONE);
        if hit.hit_entity && hit.bleeds {
            w.particles.emit_cone(hit.pos.x, hit.pos.y, BLOOD_PER_HIT, ParticleKind::Blood, hit.angle, SPARK_CONE);
            w.decals.add(hit.pos, DecalKind::Blood, hit.angle);
        }
        w.frame_events.push(FrameEvent::ProjectileHit {
            pos:        hit.pos,
            angle:      hit.angle,
            hit_entity: hit.hit_entity,
        });
        if let Some((id, tag)) = hit.target {
            if tag == EntityTag::Player {
                w.frame_events.push(FrameEvent::PlayerDamaged { damage: hit.damage });
            }
            if hit.killed {
                if tag != EntityTag::Player {
                    w.kill_count += 1;
                }
                w.frame_events.push(FrameEvent::EntityKilled { id, tag });
            }
        }
    }
}
