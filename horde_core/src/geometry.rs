//! Path: horde_core/src/geometry.rs
//! Summary: 軸平行矩形（Rect）と距離・正規化・量子化などの小さな数学ユーティリティ

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// 左上原点の軸平行矩形（浮動小数）
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_pos_size(pos: Vec2, size: (f32, f32)) -> Self {
        Self::new(pos.x, pos.y, size.0, size.1)
    }

    pub fn pos(&self) -> Vec2 { Vec2::new(self.x, self.y) }
    pub fn size(&self) -> Vec2 { Vec2::new(self.w, self.h) }

    pub fn left(&self)   -> f32 { self.x }
    pub fn right(&self)  -> f32 { self.x + self.w }
    pub fn top(&self)    -> f32 { self.y }
    pub fn bottom(&self) -> f32 { self.y + self.h }

    pub fn set_left(&mut self, v: f32)   { self.x = v; }
    pub fn set_right(&mut self, v: f32)  { self.x = v - self.w; }
    pub fn set_top(&mut self, v: f32)    { self.y = v; }
    pub fn set_bottom(&mut self, v: f32) { self.y = v - self.h; }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    pub fn set_center(&mut self, c: Vec2) {
        self.x = c.x - self.w * 0.5;
        self.y = c.y - self.h * 0.5;
    }

    /// 足元（下辺中央）。草の変形はこの点を使う
    pub fn bottom_center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.bottom())
    }

    /// 厳密な重なり判定。辺が接しているだけでは重ならない
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y >= self.top() && p.y < self.bottom()
    }
}

/// 長さ 0 のベクトルはそのまま返す
pub fn normalize_or_zero(v: Vec2) -> Vec2 {
    let len = v.length();
    if len > 0.0 { v / len } else { Vec2::ZERO }
}

/// `value` を `amount` だけ `target` に近づける（届く場合はスナップ）
pub fn step_toward(value: f32, amount: f32, target: f32) -> f32 {
    if value > target + amount {
        value - amount
    } else if value < target - amount {
        value + amount
    } else {
        target
    }
}

/// [start, end] にクランプした後 `step` 刻みに丸める
pub fn clamp_to_steps(n: f32, start: f32, end: f32, step: f32) -> f32 {
    (n.clamp(start, end) / step).round() * step
}

/// 角度（ラジアン）から単位ベクトル
pub fn vec_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_rects_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        let c = Rect::new(9.5, 9.5, 1.0, 1.0);
        assert!(a.overlaps(&c));
    }

    #[test]
    fn edge_setters_keep_size() {
        let mut r = Rect::new(5.0, 5.0, 4.0, 6.0);
        r.set_right(20.0);
        assert_eq!(r.x, 16.0);
        r.set_bottom(3.0);
        assert_eq!(r.y, -3.0);
        assert_eq!((r.w, r.h), (4.0, 6.0));
    }

    #[test]
    fn step_toward_snaps_when_close() {
        assert_eq!(step_toward(10.0, 3.0, 0.0), 7.0);
        assert_eq!(step_toward(-10.0, 3.0, 0.0), -7.0);
        assert_eq!(step_toward(2.0, 3.0, 0.0), 0.0);
    }

    #[test]
    fn clamp_to_steps_quantizes() {
        let step = 180.0 / 25.0;
        assert_eq!(clamp_to_steps(200.0, -90.0, 90.0, step), (90.0_f32 / step).round() * step);
        assert_eq!(clamp_to_steps(0.0, -90.0, 90.0, step), 0.0);
    }
}
