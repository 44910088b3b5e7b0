//! Path: horde_sim/src/game_logic/events.rs
//! Summary: フレームイベントの drain

use crate::world::{FrameEvent, GameWorld};

/// このフレームまでに溜まったイベントを取り出す（発生順）
pub fn drain_frame_events(w: &mut GameWorld) -> Vec<FrameEvent> {
    w.frame_events.drain(..).collect()
}
