//! Path: horde_core/src/physics/mod.rs
//! Summary: 物理モジュール（空間ハッシュ・エンティティインデックス・タイル衝突・RNG）

pub mod entity_index;
pub mod rng;
pub mod spatial_hash;
pub mod tile_collision;
