//! Path: horde_sim/src/game_logic/systems/zombie_ai.rs
//! Summary: ゾンビ AI（rayon で操舵を並列計算 → 逐次で状態・射撃・拾得・死体処理を適用）
//!
//! 操舵は「目標点への引力（rule1）」と「近くの仲間からの反発（rule2）」の和。
//! プレイヤーが見えないときの目標点は、同じセルにいる仲間が最後に見た位置の平均。

use super::items::sync_held_items;
use super::projectiles::spawn_shots;
use crate::world::{DecalKind, FrameEvent, GameWorld, PendingExplosion};
use glam::Vec2;
use horde_core::constants::{ZOMBIE_SEEK_WEIGHT, ZOMBIE_SEPARATION_WEIGHT};
use horde_core::entity::{Entity, EntityId, EntityKind};
use horde_core::geometry::normalize_or_zero;
use horde_core::item::ItemUse;
use horde_core::physics::entity_index::EntityIndex;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

/// 並列フェーズで読むだけの共有状態
pub struct AiContext<'a> {
    pub player_pos:      Vec2,
    pub index:           &'a EntityIndex,
    pub last_seen:       &'a FxHashMap<EntityId, Vec2>,
    pub items:           &'a crate::world::EntityStore,
    pub separation_dist: f32,
}

/// 1 体分の操舵結果
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Steering {
    pub id:          EntityId,
    pub target:      Vec2,
    pub sees_player: bool,
    pub velocity:    Vec2,
    /// 素手のゾンビが重なっている銃
    pub pickup:      Option<EntityId>,
}

/// 見失ったときの目標点。自分の位置と、同じセルの仲間の「最後に見た位置」を平均して床関数で丸める
pub fn shared_target(pos: Vec2, index: &EntityIndex, last_seen: &FxHashMap<EntityId, Vec2>) -> Vec2 {
    let mut sum = pos;
    let mut count = 1.0;
    for entry in index.query_near(pos, Vec2::ZERO) {
        if let Some(p) = last_seen.get(&entry.payload) {
            sum += *p;
            count += 1.0;
        }
    }
    (sum / count).floor()
}

/// rule1 + rule2 を正規化して速さを掛ける
pub fn steer(pos: Vec2, target: Vec2, speed: f32, index: &EntityIndex, separation_dist: f32) -> Vec2 {
    let seek = (target - pos) * ZOMBIE_SEEK_WEIGHT;
    let mut push = Vec2::ZERO;
    for entry in index.query_circle(pos, separation_dist) {
        if entry.anchor.distance(pos) < separation_dist {
            push += pos - entry.anchor;
        }
    }
    normalize_or_zero(seek + push * ZOMBIE_SEPARATION_WEIGHT) * speed
}

fn plan_zombie(z: &Entity, ctx: &AiContext) -> Option<Steering> {
    if z.dead {
        return None;
    }
    let pos = z.pos();
    match &z.kind {
        EntityKind::Zombie(h, brain) => {
            if brain.spawn_delay > 0.0 {
                return None;
            }
            let sees_player = ctx.player_pos.distance(pos) <= brain.see_dist;
            let target = if sees_player {
                ctx.player_pos
            } else {
                shared_target(pos, ctx.index, ctx.last_seen)
            };
            let pickup = if h.held_item().is_none() {
                ctx.index
                    .query_near(pos, z.rect.size())
                    .into_iter()
                    .filter_map(|entry| ctx.items.get(entry.payload))
                    .find(|item| item.item().is_some_and(|s| s.is_gun()) && item.rect.overlaps(&z.rect))
                    .map(|item| item.id)
            } else {
                None
            };
            Some(Steering {
                id: z.id,
                target,
                sees_player,
                velocity: steer(pos, target, brain.speed, ctx.index, ctx.separation_dist),
                pickup,
            })
        }
        EntityKind::SuicideZombie(_, brain) => {
            if brain.spawn_delay > 0.0 {
                return None;
            }
            Some(Steering {
                id:          z.id,
                target:      ctx.player_pos,
                sees_player: true,
                velocity:    steer(pos, ctx.player_pos, brain.speed, ctx.index, ctx.separation_dist),
                pickup:      None,
            })
        }
        _ => None,
    }
}

/// 生存中で待機の終わったゾンビの操舵を並列に計算する
pub fn plan_steering(actors: &[Entity], ctx: &AiContext) -> Vec<Steering> {
    actors.par_iter().filter_map(|z| plan_zombie(z, ctx)).collect()
}

pub(crate) fn update_zombies(w: &mut GameWorld, dt: f32) {
    let player_pos = w.player.pos();
    let player_center = w.player.center();
    let plans: FxHashMap<EntityId, Steering> = {
        let ctx = AiContext {
            player_pos,
            index:           &w.entity_index,
            last_seen:       &w.last_seen,
            items:           &w.items,
            separation_dist: w.config.zombie_separation_dist,
        };
        plan_steering(w.actors.as_slice(), &ctx)
            .into_iter()
            .map(|s| (s.id, s))
            .collect()
    };

    let mut corpses = Vec::new();
    for id in w.actors.ids() {
        let Some(z) = w.actors.get_mut(id) else { continue };
        let pos = z.pos();
        let center = z.center();
        let dead = z.dead;
        let plan = plans.get(&id);

        match &mut z.kind {
            EntityKind::Zombie(h, brain) => {
                if brain.spawn_delay > 0.0 {
                    brain.spawn_delay -= dt;
                    z.velocity = Vec2::ZERO;
                    continue;
                }
                if dead {
                    z.velocity = Vec2::ZERO;
                    // 持っていた物はその場に落とす
                    while let Some(mut item) = h.drop_held() {
                        item.rect.set_center(center);
                        w.items.insert(item);
                    }
                    brain.time_dead += dt;
                    if brain.time_dead >= w.config.corpse_linger {
                        corpses.push((id, center));
                    }
                    continue;
                }
                let Some(plan) = plan else { continue };

                let gun = h.held_item().and_then(|e| e.item()).and_then(|s| s.gun_ref());
                let (armed, ammo, full) = match gun {
                    Some(g) => (true, g.ammo, g.is_full()),
                    None    => (false, 0, true),
                };
                if armed && !full {
                    brain.time_between_reload += dt;
                } else {
                    brain.time_between_reload = 0.0;
                }
                let do_reload = armed && !full && brain.time_between_reload > ammo as f32 * 2.0;
                let can_shoot = plan.sees_player && armed && ammo > 0;

                if plan.sees_player {
                    w.last_seen.insert(id, player_pos);
                    brain.no_target_sight_time = 0.0;
                } else {
                    brain.no_target_sight_time += dt;
                }
                // 撃っている間は足を止めずに直前の速度を保つ
                if do_reload || !can_shoot {
                    z.velocity = plan.velocity;
                }
                brain.target_point = plan.target;
                brain.shoot_input = can_shoot;
                brain.reload_input = do_reload;

                let to_player = player_center - center;
                let aim = to_player.y.atan2(to_player.x);
                z.angle = aim;
                let used = h
                    .held_item_mut()
                    .and_then(|e| e.item_mut())
                    .map(|s| s.operate(aim, can_shoot, do_reload))
                    .unwrap_or(ItemUse::None);
                if let ItemUse::Fired(shots) = used {
                    spawn_shots(&mut w.ids, &mut w.bullets, center, id, &shots, w.config.bullet_lifetime);
                    w.frame_events.push(FrameEvent::ShotFired { by: id, bullets: shots.len() as u32 });
                }

                // 先に取った方が勝ち
                if let Some(item) = plan.pickup.and_then(|item_id| w.items.remove(item_id)) {
                    let item_id = item.id;
                    h.pickup(id, item);
                    w.frame_events.push(FrameEvent::ItemPickedUp { item: item_id, by: id });
                }
            }
            EntityKind::SuicideZombie(_, brain) => {
                if brain.spawn_delay > 0.0 {
                    brain.spawn_delay -= dt;
                    z.velocity = Vec2::ZERO;
                    continue;
                }
                if dead {
                    z.velocity = Vec2::ZERO;
                    brain.time_dead += dt;
                    // 撃ち倒されても導火線が尽きれば爆発する
                    if !brain.did_explode && brain.time_dead > w.config.suicide_fuse {
                        brain.did_explode = true;
                        w.pending_explosions.push(PendingExplosion {
                            center,
                            radius: brain.explode_range,
                            source: id,
                        });
                    }
                    if brain.did_explode && brain.time_dead >= w.config.corpse_linger {
                        corpses.push((id, center));
                    }
                    continue;
                }
                let Some(plan) = plan else { continue };
                w.last_seen.insert(id, player_pos);
                z.velocity = plan.velocity;
                brain.target_point = plan.target;

                if player_pos.distance(pos) < brain.explode_range && !brain.did_explode {
                    brain.did_explode = true;
                    w.pending_explosions.push(PendingExplosion {
                        center,
                        radius: brain.explode_range,
                        source: id,
                    });
                    z.kill();
                    z.velocity = Vec2::ZERO;
                    w.kill_count += 1;
                    w.frame_events.push(FrameEvent::EntityKilled { id, tag: z.tag() });
                    log::debug!("suicide zombie {id:?} detonated at {center}");
                }
            }
            _ => {}
        }
    }

    for z in w.actors.iter_mut() {
        if z.is_zombie() {
            sync_held_items(z);
        }
    }

    for (id, center) in corpses {
        w.actors.remove(id);
        w.last_seen.remove(&id);
        w.decals.add(center, DecalKind::Corpse, 0.0);
    }
}
