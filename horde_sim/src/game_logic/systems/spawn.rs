//! Path: horde_sim/src/game_logic/systems/spawn.rs
//! Summary: ウェーブ出現と勝敗判定

use crate::constants::FALLBACK_SPAWN_DIST;
use crate::world::{FrameEvent, GameWorld, LoopState};
use glam::Vec2;

/// ウェーブ用の出現地点。マップに地点が無ければプレイヤーの四方
pub(crate) fn wave_spawn_points(w: &GameWorld) -> Vec<Vec2> {
    let mut points: Vec<Vec2> = w
        .spawners
        .zombie
        .iter()
        .chain(w.spawners.suicide.iter())
        .copied()
        .collect();
    if points.is_empty() {
        let p = w.player.pos();
        let d = FALLBACK_SPAWN_DIST;
        points = vec![
            p + Vec2::new(d, 0.0),
            p + Vec2::new(-d, 0.0),
            p + Vec2::new(0.0, d),
            p + Vec2::new(0.0, -d),
        ];
    }
    points
}

pub(crate) fn update_waves(w: &mut GameWorld, dt: f32) {
    if w.waves.waves_spawned >= w.config.waves {
        return;
    }
    w.waves.until_next -= dt;
    if w.waves.until_next > 0.0 {
        return;
    }
    w.waves.until_next = w.config.wave_interval;
    w.waves.waves_spawned += 1;
    let wave = w.waves.waves_spawned;

    let points = wave_spawn_points(w);
    for i in 0..w.config.zombies_per_wave as usize {
        w.waves.spawn_counter += 1;
        let every = w.config.suicide_every;
        let suicide = every > 0 && w.waves.spawn_counter % every == 0;
        let p = points[i % points.len()];
        w.spawn_zombie(p, suicide);
    }
    log::info!("wave {wave}/{} started ({} zombies)", w.config.waves, w.config.zombies_per_wave);
    w.frame_events.push(FrameEvent::WaveStarted { wave });
}

/// プレイヤー死亡で敗北、全ウェーブ出し切って全滅させたら勝利
pub(crate) fn update_game_state(w: &mut GameWorld) {
    if w.loop_state.is_over() {
        return;
    }
    let next = if w.player.dead {
        LoopState::Lost
    } else if w.waves.waves_spawned >= w.config.waves && w.live_zombie_count() == 0 {
        LoopState::Won
    } else {
        return;
    };
    w.loop_state = next;
    let won = next == LoopState::Won;
    log::info!(
        "game over ({}) at {:.1}s, kills: {}",
        if won { "won" } else { "lost" },
        w.elapsed_seconds,
        w.kill_count
    );
    w.frame_events.push(FrameEvent::GameOver { won });
}

#[cfg(test)]
mod tests {
    use super::*;
    use horde_core::config::SimConfig;
    use horde_core::entity::EntityTag;

    fn config(waves: u32) -> SimConfig {
        SimConfig {
            waves,
            wave_interval: 1.0,
            zombies_per_wave: 4,
            suicide_every: 4,
            ..SimConfig::default()
        }
    }

    #[test]
    fn wave_spawns_after_interval_with_every_fourth_suicide() {
        let mut w = GameWorld::new(config(2));
        update_waves(&mut w, 0.5);
        assert_eq!(w.live_zombie_count(), 0);
        update_waves(&mut w, 0.5);
        assert_eq!(w.waves.waves_spawned, 1);
        assert_eq!(w.count_of(EntityTag::Zombie), 3);
        assert_eq!(w.count_of(EntityTag::SuicideZombie), 1);
        assert!(w.frame_events.iter().any(|e| matches!(e, FrameEvent::WaveStarted { wave: 1 })));

        update_waves(&mut w, 1.0);
        update_waves(&mut w, 1.0);
        assert_eq!(w.waves.waves_spawned, 2);
        assert_eq!(w.live_zombie_count(), 8);
    }

    #[test]
    fn fallback_points_surround_the_player() {
        let mut w = GameWorld::new(config(1));
        w.player.set_pos(Vec2::new(10.0, 10.0));
        let pts = wave_spawn_points(&w);
        assert_eq!(pts.len(), 4);
        assert!(pts.iter().all(|p| (p.distance(Vec2::new(10.0, 10.0)) - FALLBACK_SPAWN_DIST).abs() < 1e-3));
        w.spawners.zombie.push(Vec2::new(7.0, 7.0));
        assert_eq!(wave_spawn_points(&w), vec![Vec2::new(7.0, 7.0)]);
    }

    #[test]
    fn dead_player_loses_once() {
        let mut w = GameWorld::new(config(1));
        w.player.kill();
        update_game_state(&mut w);
        update_game_state(&mut w);
        assert_eq!(w.loop_state, LoopState::Lost);
        let overs = w.frame_events.iter().filter(|e| matches!(e, FrameEvent::GameOver { .. })).count();
        assert_eq!(overs, 1);
    }

    #[test]
    fn clearing_every_wave_wins() {
        let mut w = GameWorld::new(config(1));
        update_game_state(&mut w);
        assert_eq!(w.loop_state, LoopState::Running);
        update_waves(&mut w, 1.0);
        for z in w.actors.iter_mut() {
            z.kill();
        }
        update_game_state(&mut w);
        assert_eq!(w.loop_state, LoopState::Won);
        assert!(w.frame_events.iter().any(|e| matches!(e, FrameEvent::GameOver { won: true })));
    }
}
