//! Path: horde_sim/src/game_logic/mod.rs
//! Summary: 物理ステップ・各処理・イベント drain

mod events;
mod physics_step;
pub mod systems;

pub use events::drain_frame_events;
pub use physics_step::physics_step;
