//! Path: horde_sim/src/bin/headless.rs
//! Summary: 描画なしでシミュレーションを回す（動作確認・プロファイル用）
//!
//! 使い方: `headless [map.json] [frames]`。設定は `HORDE_CONFIG`、ログは `RUST_LOG`。

use glam::Vec2;
use horde_core::config::SimConfig;
use horde_core::entity::EntityTag;
use horde_sim::{drain_frame_events, physics_step, FrameEvent, GameWorld, InputSnapshot};
use serde::Serialize;
use std::error::Error;

const FRAME_MS: f64 = 1000.0 / 60.0;
const DEFAULT_FRAMES: u32 = 60 * 60;

/// 実行結果（標準出力に JSON で出す）
#[derive(Debug, Serialize)]
struct RunSummary {
    frames:           u32,
    seconds:          f32,
    state:            String,
    kills:            u32,
    bullets_fired:    u32,
    zombies_left:     usize,
    crates_left:      usize,
    slowest_frame_ms: f64,
}

/// プレイヤーを円を描くように歩かせ、最寄りのゾンビを撃ち続ける
fn scripted_input(w: &GameWorld) -> InputSnapshot {
    let t = w.elapsed_seconds;
    let movement = Vec2::new(t.cos(), t.sin());
    let center = w.player.center();
    let nearest = w
        .actors
        .iter()
        .filter(|e| e.is_zombie() && !e.dead)
        .min_by(|a, b| a.center().distance(center).total_cmp(&b.center().distance(center)));
    InputSnapshot {
        movement,
        aim: nearest.map(|z| z.center()).unwrap_or(center + Vec2::X),
        shoot: nearest.is_some(),
        pickup: w.frame_id % 30 == 0,
        ..InputSnapshot::default()
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let _ = env_logger::Builder::from_default_env().try_init();

    let mut args = std::env::args().skip(1);
    let map = args.next();
    let frames = match args.next() {
        Some(n) => n.parse::<u32>()?,
        None => DEFAULT_FRAMES,
    };

    let config = SimConfig::load_or_default();
    let mut world = match map {
        Some(path) => GameWorld::from_map_file(config, path)?,
        None => GameWorld::new(config),
    };

    let mut shots = 0u32;
    let mut max_frame_ms = 0.0f64;
    for _ in 0..frames {
        let input = scripted_input(&world);
        physics_step(&mut world, input, FRAME_MS);
        max_frame_ms = max_frame_ms.max(world.last_frame_time_ms);
        for event in drain_frame_events(&mut world) {
            match event {
                FrameEvent::ShotFired { bullets, .. } => shots += bullets,
                FrameEvent::GameOver { won } => log::info!("frame {}: game over, won = {won}", world.frame_id),
                _ => {}
            }
        }
        if world.loop_state.is_over() {
            break;
        }
    }

    let summary = RunSummary {
        frames:           world.frame_id,
        seconds:          world.elapsed_seconds,
        state:            format!("{:?}", world.loop_state),
        kills:            world.kill_count,
        bullets_fired:    shots,
        zombies_left:     world.live_zombie_count(),
        crates_left:      world.count_of(EntityTag::Crate),
        slowest_frame_ms: max_frame_ms,
    };
    log::info!("ran {} frames ({:.1}s), state {}", summary.frames, summary.seconds, summary.state);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
