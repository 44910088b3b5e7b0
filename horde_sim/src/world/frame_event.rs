//! Path: horde_sim/src/world/frame_event.rs
//! Summary: フレーム内で発生したゲームイベント（呼び出し側が毎フレーム drain する）

use glam::Vec2;
use horde_core::entity::{EntityId, EntityTag};

#[derive(Debug, Clone, PartialEq)]
pub enum FrameEvent {
    /// 弾が何かに当たった。`hit_entity` が false なら壁
    ProjectileHit { pos: Vec2, angle: f32, hit_entity: bool },
    EntityKilled  { id: EntityId, tag: EntityTag },
    PlayerDamaged { damage: f32 },
    ItemPickedUp  { item: EntityId, by: EntityId },
    ItemDropped   { item: EntityId, by: EntityId },
    ShotFired     { by: EntityId, bullets: u32 },
    Healed        { amount: f32 },
    CrateBroken   { id: EntityId, released: u32 },
    Explosion     { center: Vec2, radius: f32, hits: u32 },
    ZombieSpawned { id: EntityId, tag: EntityTag },
    WaveStarted   { wave: u32 },
    GameOver      { won: bool },
}
