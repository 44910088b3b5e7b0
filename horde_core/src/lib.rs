//! Path: horde_core/src/lib.rs
//! Summary: シミュレーションコア共通ロジック（定数・設定・エンティティ・タイルマップ・物理プリミティブ）

pub mod config;
pub mod constants;
pub mod entity;
pub mod entity_params;
pub mod geometry;
pub mod item;
pub mod physics;
pub mod tilemap;
pub mod timer;
