//! Path: horde_sim/src/game_logic/systems/collision.rs
//! Summary: プレイヤー・アクターの移動とタイル衝突解決

use crate::world::GameWorld;
use horde_core::physics::tile_collision::resolve_all;

/// 速度で動かし、物理レイヤーの固いタイルから押し戻す
pub(crate) fn resolve_collisions(w: &mut GameWorld, dt: f32) {
    resolve_all(
        std::iter::once(&mut w.player).chain(w.actors.iter_mut()),
        dt,
        &w.tilemap,
    );
}
