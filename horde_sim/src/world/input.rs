//! Path: horde_sim/src/world/input.rs
//! Summary: 1 フレーム分の入力スナップショット（デバイス割り当ては外側で済ませる）

use glam::Vec2;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    /// 移動方向（各軸 -1..=1）
    pub movement:        Vec2,
    pub boost:           bool,
    /// 照準点（ワールド座標）
    pub aim:             Vec2,
    pub shoot:           bool,
    pub reload:          bool,
    pub pickup:          bool,
    pub drop:            bool,
    /// 所持品の切り替え（-1 / 0 / 1）
    pub inventory_cycle: i32,
}

impl InputSnapshot {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn moving(dir: Vec2) -> Self {
        Self { movement: dir, ..Self::default() }
    }
}
