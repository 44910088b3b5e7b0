//! Path: horde_sim/src/constants.rs
//! Summary: ワールド側の定数（スポーンマーカー・エフェクト量）

// Spawner markers（オフグリッドタイル "spawners" の variant）
pub const SPAWNER_KIND:    &str = "spawners";
pub const SPAWNER_PLAYER:  u32 = 0;
pub const SPAWNER_ZOMBIE:  u32 = 1;
pub const SPAWNER_SUICIDE: u32 = 2;
pub const SPAWNER_CRATE:   u32 = 3;

// Effects
pub const SPARKS_PER_HIT:       usize = 4;
pub const BLOOD_PER_HIT:        usize = 6;
pub const SPARKS_PER_EXPLOSION: usize = 24;
pub const SPARK_CONE:           f32 = 0.6;

/// ウェーブ用スポーン地点がマップに無いとき、プレイヤーからこの距離に出す
pub const FALLBACK_SPAWN_DIST: f32 = 150.0;

