//! Path: horde_sim/src/world/mod.rs
//! Summary: ワールド型（GameWorld, EntityStore, ParticleWorld, DecalWorld, FrameEvent, LoopState, InputSnapshot）

mod decal;
mod entity_store;
mod frame_event;
mod game_loop_control;
mod game_world;
mod input;
mod particle;

pub use decal::{Decal, DecalKind, DecalWorld, MAX_DECALS};
pub use entity_store::EntityStore;
pub use frame_event::FrameEvent;
pub use game_loop_control::LoopState;
pub use game_world::{GameWorld, PendingExplosion, Spawners, WaveDirector};
pub use input::InputSnapshot;
pub use particle::{ParticleKind, ParticleWorld};
