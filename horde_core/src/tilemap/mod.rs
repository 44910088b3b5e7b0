//! Path: horde_core/src/tilemap/mod.rs
//! Summary: レイヤー付きタイルマップ（配置・検索・周辺タイル収集・障害物判定）

pub mod grass;
pub mod map_file;

use crate::constants::{NEIGHBOR_OFFSETS, OBSTRUCTION_LAYER, PHYSICS_LAYER, PHYSICS_TILES};
use crate::geometry::Rect;
use glam::Vec2;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// タイル 1 枚。グリッド上のタイルは `pos` がタイル座標、オフグリッドはワールド座標
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    #[serde(rename = "type")]
    pub kind:    String,
    pub variant: u32,
    pub pos:     [f32; 2],
}

impl Tile {
    pub fn new(kind: impl Into<String>, variant: u32, pos: [f32; 2]) -> Self {
        Self { kind: kind.into(), variant, pos }
    }

    pub fn is_physics_solid(&self) -> bool {
        PHYSICS_TILES.contains(&self.kind.as_str())
    }
}

pub type TilePos = (i32, i32);

#[derive(Debug)]
pub struct TileMap {
    tile_size:   f32,
    layers:      BTreeMap<i32, FxHashMap<TilePos, Tile>>,
    pub offgrid: Vec<Tile>,
}

impl TileMap {
    pub fn new(tile_size: f32) -> Self {
        let mut layers = BTreeMap::new();
        layers.insert(PHYSICS_LAYER, FxHashMap::default());
        Self {
            tile_size,
            layers,
            offgrid: Vec::new(),
        }
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn layers(&self) -> impl Iterator<Item = (i32, &FxHashMap<TilePos, Tile>)> {
        self.layers.iter().map(|(k, v)| (*k, v))
    }

    pub fn tile_count(&self) -> usize {
        self.layers.values().map(|l| l.len()).sum()
    }

    pub fn to_tile_pos(&self, world: Vec2) -> TilePos {
        (
            (world.x / self.tile_size).floor() as i32,
            (world.y / self.tile_size).floor() as i32,
        )
    }

    pub fn place_tile(&mut self, pos: TilePos, kind: &str, variant: u32, layer: i32) {
        let tile = Tile::new(kind, variant, [pos.0 as f32, pos.1 as f32]);
        self.layers.entry(layer).or_default().insert(pos, tile);
    }

    pub fn remove_tile(&mut self, pos: TilePos, layer: i32) -> Option<Tile> {
        self.layers.get_mut(&layer)?.remove(&pos)
    }

    pub fn get_tile(&self, pos: TilePos, layer: i32) -> Option<&Tile> {
        self.layers.get(&layer)?.get(&pos)
    }

    pub fn get_tile_at(&self, world: Vec2, layer: i32) -> Option<&Tile> {
        self.get_tile(self.to_tile_pos(world), layer)
    }

    /// 障害物レイヤーにタイルがあるか（弾が止まる）
    pub fn is_obstructed(&self, pos: TilePos) -> bool {
        self.get_tile(pos, OBSTRUCTION_LAYER).is_some()
    }

    /// 大きさ `size` の箱が余分にまたぐタイル数（1 タイル以下なら 0）
    pub fn tile_span(&self, size: f32) -> i32 {
        if size <= self.tile_size {
            return 0;
        }
        (size / self.tile_size).ceil() as i32 - 1
    }

    /// 箱のタイル範囲と、その各タイルの 3x3 近傍にあるタイル（重複なし）。
    /// `kinds` が空なら全種類
    pub fn get_around(&self, pos: Vec2, size: Vec2, layer: i32, kinds: &[&str]) -> Vec<&Tile> {
        let Some(grid) = self.layers.get(&layer) else {
            return Vec::new();
        };
        let (tx, ty) = self.to_tile_pos(pos);
        let (ex, ey) = (tx + self.tile_span(size.x), ty + self.tile_span(size.y));
        let mut seen: FxHashSet<TilePos> = FxHashSet::default();
        let mut out = Vec::new();
        for x in tx..=ex {
            for y in ty..=ey {
                for (ox, oy) in NEIGHBOR_OFFSETS {
                    let p = (x + ox, y + oy);
                    let Some(t) = grid.get(&p) else { continue };
                    if !kinds.is_empty() && !kinds.contains(&t.kind.as_str()) {
                        continue;
                    }
                    if seen.insert(p) {
                        out.push(t);
                    }
                }
            }
        }
        out
    }

    /// グリッドタイルのワールド矩形
    pub fn tile_rect(&self, tile: &Tile) -> Rect {
        Rect::new(
            tile.pos[0] * self.tile_size,
            tile.pos[1] * self.tile_size,
            self.tile_size,
            self.tile_size,
        )
    }

    /// 物理レイヤーの通れないタイル矩形
    pub fn physics_rects_around(&self, pos: Vec2, size: Vec2) -> Vec<Rect> {
        self.get_around(pos, size, PHYSICS_LAYER, PHYSICS_TILES)
            .into_iter()
            .map(|t| self.tile_rect(t))
            .collect()
    }

    /// (種類, variant) が一致するタイルを取り出す。グリッドタイルの pos はワールド座標に直す
    pub fn extract(&mut self, pairs: &[(&str, u32)], keep: bool) -> Vec<Tile> {
        let matches = |t: &Tile| pairs.iter().any(|(k, v)| t.kind == *k && t.variant == *v);
        let mut found: Vec<Tile> = self.offgrid.iter().filter(|t| matches(*t)).cloned().collect();
        if !keep {
            self.offgrid.retain(|t| !matches(t));
        }
        let ts = self.tile_size;
        for grid in self.layers.values_mut() {
            let mut hits: Vec<TilePos> = grid
                .iter()
                .filter(|(_, t)| matches(*t))
                .map(|(p, _)| *p)
                .collect();
            hits.sort_unstable();
            for p in hits {
                let t = if keep { grid.get(&p).cloned() } else { grid.remove(&p) };
                if let Some(mut t) = t {
                    t.pos = [t.pos[0] * ts, t.pos[1] * ts];
                    found.push(t);
                }
            }
        }
        found
    }

    pub(crate) fn insert_raw(&mut self, layer: i32, pos: TilePos, tile: Tile) {
        self.layers.entry(layer).or_default().insert(pos, tile);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walled() -> TileMap {
        let mut m = TileMap::new(15.0);
        for x in -2..=2 {
            m.place_tile((x, 2), "stone", 0, 0);
        }
        m.place_tile((0, 0), "grass", 0, 0);
        m.place_tile((1, 0), "blocker", 0, 1);
        m
    }

    #[test]
    fn get_tile_by_world_position_floors_negatives() {
        let m = walled();
        assert!(m.get_tile_at(Vec2::new(-0.5, 31.0), 0).is_some());
        assert_eq!(m.to_tile_pos(Vec2::new(-0.5, -0.5)), (-1, -1));
        assert!(m.get_tile((9, 9), 0).is_none());
        assert!(m.get_tile((0, 0), 7).is_none());
    }

    #[test]
    fn tile_span_counts_extra_tiles() {
        let m = TileMap::new(15.0);
        assert_eq!(m.tile_span(9.0), 0);
        assert_eq!(m.tile_span(15.0), 0);
        assert_eq!(m.tile_span(16.0), 1);
        assert_eq!(m.tile_span(31.0), 2);
    }

    #[test]
    fn get_around_filters_and_dedups() {
        let m = walled();
        let solid = m.get_around(Vec2::new(1.0, 16.0), Vec2::new(20.0, 5.0), 0, PHYSICS_TILES);
        // (0,1) と (1,1) の近傍に stone が x=-1..=2 の 4 枚
        assert_eq!(solid.len(), 4);
        let all = m.get_around(Vec2::new(1.0, 1.0), Vec2::new(5.0, 5.0), 0, &[]);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].kind, "grass");
    }

    #[test]
    fn obstruction_layer_is_separate() {
        let m = walled();
        assert!(m.is_obstructed((1, 0)));
        assert!(!m.is_obstructed((0, 0)));
        assert!(m.get_tile((1, 0), 0).is_none());
    }

    #[test]
    fn extract_converts_grid_positions_to_world() {
        let mut m = TileMap::new(15.0);
        m.place_tile((2, 3), "spawners", 1, 0);
        m.offgrid.push(Tile::new("spawners", 0, [7.5, 9.0]));
        m.offgrid.push(Tile::new("decor", 0, [1.0, 1.0]));
        let found = m.extract(&[("spawners", 0), ("spawners", 1)], false);
        assert_eq!(found.len(), 2);
        assert!(found.iter().any(|t| t.pos == [30.0, 45.0]));
        assert_eq!(m.offgrid.len(), 1);
        assert!(m.get_tile((2, 3), 0).is_none());
    }
}
