//! Path: horde_core/src/physics/spatial_hash.rs
//! Summary: 一様グリッドの空間ハッシュ（矩形の複数セル挿入・重複除去付きクエリ）
//!
//! 矩形は重なる全セルに登録される。点クエリは最大 4 セル、セルより大きい
//! クエリ矩形はセル範囲全体を走査する。クエリ結果は (アンカー, ペイロード) で
//! 重複除去されるので、同じ座標に置かれた別エンティティは両方返る。
//! `get_all` だけはアンカー座標のみで畳む。

use crate::geometry::Rect;
use glam::Vec2;
use rustc_hash::{FxHashMap, FxHashSet};
use std::hash::Hash;

/// セルキー。`floor(p / cell_size) * cell_size` をワールド座標のまま持つ
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellKey {
    pub x: i32,
    pub y: i32,
}

/// 重複除去用のアンカー識別子（-0.0 と 0.0 は同一視）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnchorKey(u32, u32);

impl AnchorKey {
    pub fn of(p: Vec2) -> Self {
        Self(canonical_bits(p.x), canonical_bits(p.y))
    }
}

#[inline]
fn canonical_bits(v: f32) -> u32 {
    if v == 0.0 { 0.0_f32.to_bits() } else { v.to_bits() }
}

/// グリッドに登録される 1 件。`payload` は所有しないハンドル
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndexEntry<T> {
    pub anchor:  Vec2,
    pub payload: T,
}

pub struct SpatialHash<T> {
    cell_size: f32,
    cells:     FxHashMap<(i32, i32), Vec<IndexEntry<T>>>,
}

impl<T: Copy + Eq + Hash> SpatialHash<T> {
    /// `cell_size` は正の有限値であること
    pub fn new(cell_size: f32) -> Self {
        debug_assert!(cell_size > 0.0 && cell_size.is_finite());
        Self {
            cell_size,
            cells: FxHashMap::default(),
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// 占有セル数
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// 負の座標も床関数で丸める（-0.5 / 10 → -1）
    #[inline]
    fn cell_index(&self, v: f32) -> i32 {
        (v / self.cell_size).floor() as i32
    }

    #[inline]
    fn cell_of(&self, p: Vec2) -> (i32, i32) {
        (self.cell_index(p.x), self.cell_index(p.y))
    }

    /// NaN / ∞ は呼び出し側の前提違反
    pub fn key(&self, p: Vec2) -> CellKey {
        let (ix, iy) = self.cell_of(p);
        CellKey {
            x: (ix as f32 * self.cell_size) as i32,
            y: (iy as f32 * self.cell_size) as i32,
        }
    }

    /// 矩形が触れる全セルに `(anchor, payload)` を追加する
    pub fn insert(&mut self, anchor: Vec2, rect: Rect, payload: T) {
        let (left, top) = self.cell_of(Vec2::new(rect.left(), rect.top()));
        let (right, bottom) = self.cell_of(Vec2::new(rect.right(), rect.bottom()));
        let entry = IndexEntry { anchor, payload };
        for ix in left..=right {
            for iy in top..=bottom {
                self.cells.entry((ix, iy)).or_default().push(entry);
            }
        }
    }

    /// `[point, point + size]` に触れるエントリ。
    /// size が両軸ともセル以下なら 4 隅のセルだけを、そうでなければ範囲全体を見る
    pub fn query_point(
        &self,
        point: Vec2,
        size: Vec2,
        ignore: &FxHashSet<AnchorKey>,
    ) -> Vec<IndexEntry<T>> {
        if size.x > self.cell_size || size.y > self.cell_size {
            return self.query_box_span(point, size, ignore);
        }
        let far = point + size;
        let mut corners = [
            self.cell_of(point),
            self.cell_of(Vec2::new(far.x, point.y)),
            self.cell_of(Vec2::new(point.x, far.y)),
            self.cell_of(far),
        ];
        corners.sort_unstable();
        let mut out = Vec::new();
        let mut seen = FxHashSet::default();
        let mut prev = None;
        for cell in corners {
            if prev == Some(cell) {
                continue;
            }
            prev = Some(cell);
            self.collect_cell(cell, ignore, &mut seen, &mut out);
        }
        out
    }

    /// ignore なしの簡易版
    pub fn query(&self, point: Vec2, size: Vec2) -> Vec<IndexEntry<T>> {
        self.query_point(point, size, &FxHashSet::default())
    }

    /// クエリ矩形のセル範囲（両端含む）を全走査する
    pub fn query_box_span(
        &self,
        point: Vec2,
        size: Vec2,
        ignore: &FxHashSet<AnchorKey>,
    ) -> Vec<IndexEntry<T>> {
        let (x0, y0) = self.cell_of(point);
        let (x1, y1) = self.cell_of(point + size);
        let mut out = Vec::new();
        let mut seen = FxHashSet::default();
        for ix in x0..=x1 {
            for iy in y0..=y1 {
                self.collect_cell((ix, iy), ignore, &mut seen, &mut out);
            }
        }
        out
    }

    fn collect_cell(
        &self,
        cell: (i32, i32),
        ignore: &FxHashSet<AnchorKey>,
        seen: &mut FxHashSet<(AnchorKey, T)>,
        out: &mut Vec<IndexEntry<T>>,
    ) {
        let Some(entries) = self.cells.get(&cell) else {
            return;
        };
        for e in entries {
            let k = AnchorKey::of(e.anchor);
            if ignore.contains(&k) {
                continue;
            }
            if seen.insert((k, e.payload)) {
                out.push(*e);
            }
        }
    }

    /// 全エントリ（アンカーで重複除去、最初に見つかったものを採用）
    pub fn get_all(&self) -> Vec<IndexEntry<T>> {
        let mut seen = FxHashSet::default();
        self.cells
            .values()
            .flat_map(|entries| entries.iter())
            .filter(|e| seen.insert(AnchorKey::of(e.anchor)))
            .copied()
            .collect()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }
}
