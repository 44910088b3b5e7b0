//! Path: horde_sim/src/game_logic/systems/mod.rs
//! Summary: フレームの各処理（プレイヤー・衝突・木箱・弾・アイテム・ゾンビ AI・爆発・出現・草・エフェクト）

pub(crate) mod collision;
pub(crate) mod crates;
pub(crate) mod effects;
pub mod explosions;
pub(crate) mod grass;
pub mod items;
pub(crate) mod player;
pub mod projectiles;
pub(crate) mod spawn;
pub mod zombie_ai;
