//! Path: horde_sim/src/game_logic/physics_step.rs
//! Summary: 1 フレーム分のシミュレーション（各処理を決まった順で呼ぶ）

use super::systems::collision::resolve_collisions;
use super::systems::crates::update_crates;
use super::systems::effects::{update_decals, update_particles};
use super::systems::explosions::apply_pending_explosions;
use super::systems::grass::update_grass;
use super::systems::items::{tick_inventories, update_items};
use super::systems::player::update_player;
use super::systems::projectiles::update_projectiles;
use super::systems::spawn::{update_game_state, update_waves};
use super::systems::zombie_ai::update_zombies;
use crate::world::{GameWorld, InputSnapshot};

/// 1 フレーム進める。勝敗が決まった後は dt = 0 で回し、入力も無視する
pub fn physics_step(w: &mut GameWorld, input: InputSnapshot, delta_ms: f64) {
    // trace にしておき、RUST_LOG=trace のときだけ毎フレーム出力
    log::trace!("physics_step: delta={}ms frame_id={}", delta_ms, w.frame_id);
    let t_start = std::time::Instant::now();

    w.frame_id += 1;
    let dt = w.loop_state.effective_dt(delta_ms as f32 / 1000.0);
    w.elapsed_seconds += dt;
    w.input = if w.loop_state.is_over() { InputSnapshot::idle() } else { input };

    // ── 入力・タイマー ──────────────────────────────────────────
    tick_inventories(w, dt);
    update_grass(w, dt);
    update_player(w);

    // ── 移動とタイル衝突 ────────────────────────────────────────
    resolve_collisions(w, dt);

    // ── 木箱 → 弾 → アイテム → ゾンビ ────────────────────────────
    update_crates(w);
    update_projectiles(w, dt);
    update_items(w);
    update_zombies(w, dt);
    update_decals(w, dt);

    // ── 同期点: インデックス再構築、その後で爆発を処理 ──────────────
    w.rebuild_indices();
    apply_pending_explosions(w);

    update_waves(w, dt);
    update_particles(w, dt);
    update_game_state(w);

    // ── フレーム時間計測 ────────────────────────────────────────
    let elapsed_ms = t_start.elapsed().as_secs_f64() * 1000.0;
    w.last_frame_time_ms = elapsed_ms;
    if elapsed_ms > w.config.frame_budget_ms {
        log::warn!(
            "frame budget exceeded: {:.2}ms (actors: {}, bullets: {})",
            elapsed_ms,
            w.actors.len(),
            w.bullets.len()
        );
    }
}
