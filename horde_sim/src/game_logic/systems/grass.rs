//! Path: horde_sim/src/game_logic/systems/grass.rs
//! Summary: 草の戻り（多いときは rayon）・足元での曲がり・風

use crate::world::GameWorld;
use glam::Vec2;
use rayon::prelude::*;

pub(crate) fn update_grass(w: &mut GameWorld, dt: f32) {
    if w.grass.is_empty() {
        return;
    }
    let cfg = &w.config;
    if w.grass.len() >= cfg.grass_parallel_threshold {
        let amount = cfg.blades_stiffness * dt;
        w.grass.tiles_mut().par_iter_mut().for_each(|t| t.relax(amount));
    } else {
        w.grass.relax(dt, cfg.blades_stiffness);
    }

    if cfg.wind_strength > 0.0 {
        let (t, strength) = (w.elapsed_seconds, cfg.wind_strength);
        w.grass.apply_wind(|p| (t * 2.0 + p.x * 0.05).sin() * strength);
    }

    let feet: Vec<Vec2> = std::iter::once(&w.player)
        .chain(w.actors.iter().filter(|e| e.is_zombie()))
        .filter(|e| !e.dead)
        .map(|e| e.rect.bottom_center())
        .collect();
    w.grass.deform(&feet, cfg.grass_force_radius, cfg.grass_force_dropoff);
}

#[cfg(test)]
mod tests {
    use super::*;
    use horde_core::config::SimConfig;
    use horde_core::tilemap::grass::{Blade, GrassTile};

    fn world_with_bent_blade(threshold: usize) -> GameWorld {
        let cfg = SimConfig { grass_parallel_threshold: threshold, ..SimConfig::default() };
        let mut w = GameWorld::new(cfg);
        w.player.set_pos(Vec2::new(900.0, 900.0));
        let mut tile = GrassTile::empty((0, 0));
        tile.blades.push(Blade { pos: Vec2::new(3.0, 0.0), variant: 0, angle: 45.0 });
        w.grass.insert(tile);
        w
    }

    fn first_angle(w: &GameWorld) -> Option<f32> {
        w.grass.get((0, 0)).and_then(|t| t.blades.first()).map(|b| b.angle)
    }

    #[test]
    fn serial_and_parallel_relax_agree() {
        let mut serial = world_with_bent_blade(usize::MAX);
        let mut parallel = world_with_bent_blade(0);
        update_grass(&mut serial, 0.1);
        update_grass(&mut parallel, 0.1);
        assert_eq!(first_angle(&serial), Some(9.0));
        assert_eq!(first_angle(&serial), first_angle(&parallel));
    }

    #[test]
    fn player_feet_bend_nearby_blades() {
        let mut w = world_with_bent_blade(usize::MAX);
        if let Some(t) = w.grass.tiles_mut().first_mut() {
            t.blades[0].angle = 0.0;
        }
        // 根元 (3, 12) の左に足を置く
        let size = w.player.rect.size();
        w.player.set_pos(Vec2::new(1.0 - size.x / 2.0, 12.0 - size.y));
        update_grass(&mut w, 0.0);
        assert!(first_angle(&w).is_some_and(|a| a < 0.0));
    }
}
