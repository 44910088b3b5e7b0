//! Path: horde_sim/src/game_logic/systems/player.rs
//! Summary: 入力からプレイヤーの速度・向き・所持品の選択を決める

use crate::world::GameWorld;
use glam::Vec2;

pub(crate) fn update_player(w: &mut GameWorld) {
    let input = w.input;
    if w.player.dead {
        w.player.velocity = Vec2::ZERO;
        return;
    }
    if input.inventory_cycle != 0 {
        if let Some(h) = w.player.humanoid_mut() {
            h.cycle_inventory(input.inventory_cycle.signum());
        }
    }
    let boost = if input.boost { w.config.player_boost } else { 1.0 };
    w.player.velocity = input.movement * w.config.player_speed * boost;

    let to_aim = input.aim - w.player.center();
    if to_aim != Vec2::ZERO {
        w.player.angle = to_aim.y.atan2(to_aim.x);
    }
}
