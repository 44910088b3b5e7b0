//! Path: horde_sim/src/game_logic/systems/crates.rs
//! Summary: 木箱の中身抽選・木片パーティクル・破壊時のドロップ

use crate::world::{FrameEvent, GameWorld};
use glam::Vec2;
use horde_core::entity::{Entity, EntityKind, IdRegistry};
use horde_core::entity_params::GunKind;
use horde_core::physics::rng::SimpleRng;

/// 1..=4 回抽選し、半分は銃、残りの半分は救急キット、それ以外は空振り
pub(crate) fn roll_crate_contents(rng: &mut SimpleRng, ids: &mut IdRegistry, pos: Vec2) -> Vec<Entity> {
    let rolls = rng.gen_range_inclusive(1, 4);
    let mut contents = Vec::new();
    for _ in 0..rolls {
        if rng.gen_range_inclusive(0, 100) <= 50 {
            let kind = GunKind::roll_crate_drop(rng);
            contents.push(Entity::gun(ids.next_id(), pos, kind));
        } else if rng.gen_range_inclusive(0, 100) > 50 {
            contents.push(Entity::medkit(ids.next_id(), pos));
        }
    }
    contents
}

pub(crate) fn update_crates(w: &mut GameWorld) {
    for c in w.actors.iter_mut() {
        let center = c.center();
        if let EntityKind::Crate(state) = &mut c.kind {
            if state.pending_planks > 0 {
                w.particles.emit_planks(center.x, center.y, state.pending_planks as usize);
                state.pending_planks = 0;
            }
        }
    }

    let broken = w
        .actors
        .extract_if(|e| matches!(&e.kind, EntityKind::Crate(s) if s.broken()));
    for c in broken {
        let EntityKind::Crate(state) = c.kind else { continue };
        let released = state.contents.len() as u32;
        for item in state.contents {
            w.items.insert(item);
        }
        log::debug!("crate {:?} broken, released {released} items", c.id);
        w.frame_events.push(FrameEvent::CrateBroken { id: c.id, released });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::ParticleKind;
    use horde_core::config::SimConfig;

    #[test]
    fn contents_stay_within_four_items_at_the_crate() {
        let mut rng = SimpleRng::new(99);
        let mut ids = IdRegistry::new();
        let pos = Vec2::new(30.0, 45.0);
        let mut total = 0;
        for _ in 0..200 {
            let items = roll_crate_contents(&mut rng, &mut ids, pos);
            assert!(items.len() <= 4);
            assert!(items.iter().all(|e| e.is_item() && e.pos() == pos));
            total += items.len();
        }
        // 1 回あたり 0.5 + 0.25 = 0.75 個、平均 2.5 回
        assert!(total > 200 && total < 550, "total {total}");
    }

    #[test]
    fn broken_crate_releases_its_contents() {
        let mut w = GameWorld::new(SimConfig::default());
        let id = w.ids.next_id();
        let medkit = Entity::medkit(w.ids.next_id(), Vec2::new(10.0, 10.0));
        w.actors.insert(Entity::loot_crate(id, Vec2::new(10.0, 10.0), vec![medkit]));

        if let Some(c) = w.actors.get_mut(id) {
            c.damage(100.0, Vec2::X);
        }
        update_crates(&mut w);
        assert!(w.actors.contains(id));
        assert_eq!(w.particles.count_of(ParticleKind::Plank), 1);

        if let Some(c) = w.actors.get_mut(id) {
            c.damage(60.0, Vec2::X);
        }
        update_crates(&mut w);
        assert!(!w.actors.contains(id));
        assert_eq!(w.items.len(), 1);
        assert!(w
            .frame_events
            .iter()
            .any(|e| matches!(e, FrameEvent::CrateBroken { released: 1, .. })));
    }
}
