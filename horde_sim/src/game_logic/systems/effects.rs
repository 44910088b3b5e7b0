//! Path: horde_sim/src/game_logic/systems/effects.rs
//! Summary: パーティクル・デカールの更新

use crate::world::GameWorld;

pub(crate) fn update_particles(w: &mut GameWorld, dt: f32) {
    w.particles.update(dt);
}

pub(crate) fn update_decals(w: &mut GameWorld, dt: f32) {
    w.decals.update(dt);
}
