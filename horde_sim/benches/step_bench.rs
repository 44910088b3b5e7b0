//! 1 フレーム分のベンチマーク: ゾンビ多数 + 草地

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use glam::Vec2;
use horde_core::config::SimConfig;
use horde_core::tilemap::grass::GrassField;
use horde_core::tilemap::TileMap;
use horde_sim::{physics_step, GameWorld, InputSnapshot};

fn setup_world(zombies: usize) -> GameWorld {
    let cfg = SimConfig { zombie_spawn_delay: 0.0, waves: 0, ..SimConfig::default() };
    let mut grass = GrassField::new(cfg.tile_size);
    for x in 0..64 {
        for y in 0..48 {
            grass.place((x, y));
        }
    }
    let mut w = GameWorld::with_map(cfg, TileMap::new(15.0), grass);
    w.player.set_pos(Vec2::new(480.0, 360.0));
    for i in 0..zombies {
        let x = (i as f32 * 17.3) % 960.0;
        let y = (i as f32 * 23.9) % 720.0;
        w.spawn_zombie(Vec2::new(x, y), i % 8 == 0);
    }
    w.rebuild_indices();
    w
}

fn bench_step(c: &mut Criterion) {
    let input = InputSnapshot::moving(Vec2::new(1.0, 0.0));

    c.bench_function("physics_step_1k_zombies", |b| {
        b.iter_batched(
            || setup_world(1_000),
            |mut w| {
                physics_step(&mut w, input, 16.0);
                w
            },
            BatchSize::PerIteration,
        )
    });
}

criterion_group!(benches, bench_step);
criterion_main!(benches);
