//! Path: horde_sim/src/lib.rs
//! Summary: ワールド状態とフレームループ（モジュール宣言と pub use のみ）

pub mod constants;
pub mod game_logic;
pub mod world;

pub use game_logic::{drain_frame_events, physics_step};
pub use world::{
    Decal, DecalKind, DecalWorld, EntityStore, FrameEvent, GameWorld, InputSnapshot, LoopState,
    ParticleKind, ParticleWorld, PendingExplosion, Spawners, WaveDirector,
};
