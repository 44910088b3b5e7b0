//! Path: horde_core/src/tilemap/grass.rs
//! Summary: 草タイルと葉（生成・戻り・エンティティによる押し倒し・風）

use crate::constants::{BLADE_ROOT_OFFSET, MAX_GRASS_STEPS, NEIGHBOR_OFFSETS};
use crate::geometry::{clamp_to_steps, step_toward};
use crate::physics::rng::SimpleRng;
use super::TilePos;
use glam::Vec2;
use rustc_hash::{FxHashMap, FxHashSet};

/// 葉を置く候補オフセット（タイル左上から、上方向が負）
const BLADE_OFFSETS: [(f32, f32); 9] = [
    (0.0, 0.0),  (4.0, 0.0),  (8.0, 0.0),
    (0.0, -4.0), (4.0, -4.0), (8.0, -4.0),
    (0.0, -8.0), (4.0, -8.0), (8.0, -8.0),
];

const BLADE_CHANCE: f32 = 3.0 / 9.0;
const BLADE_VARIANTS: i32 = 6;

#[derive(Clone, Debug, PartialEq)]
pub struct Blade {
    /// ワールド座標
    pub pos:     Vec2,
    pub variant: u8,
    /// 傾き（度）
    pub angle:   f32,
}

#[derive(Clone, Debug)]
pub struct GrassTile {
    pub pos:    TilePos,
    pub blades: Vec<Blade>,
}

impl GrassTile {
    pub fn empty(pos: TilePos) -> Self {
        Self { pos, blades: Vec::new() }
    }

    /// タイル座標から決まる乱数で葉を生やす（同じタイルは毎回同じ）
    pub fn generate(pos: TilePos, tile_size: f32) -> Self {
        let mut rng = SimpleRng::for_tile(pos.0, pos.1);
        let origin = Vec2::new(pos.0 as f32 * tile_size, pos.1 as f32 * tile_size);
        let blades = BLADE_OFFSETS
            .iter()
            .filter_map(|&(ox, oy)| {
                if !rng.chance(BLADE_CHANCE) {
                    return None;
                }
                let variant = rng.gen_range_inclusive(0, BLADE_VARIANTS - 1) as u8;
                Some(Blade { pos: origin + Vec2::new(ox, oy), variant, angle: 0.0 })
            })
            .collect();
        Self { pos, blades }
    }

    /// 全ての葉を 0 度へ `amount` だけ戻す
    pub fn relax(&mut self, amount: f32) {
        for b in &mut self.blades {
            b.angle = step_toward(b.angle, amount, 0.0);
        }
    }
}

/// 押し倒しの強さ。半径内は 2、外側は dropoff で 0 まで減衰
pub fn bend_force(distance: f32, force_radius: f32, force_dropoff: f32) -> f32 {
    if distance < force_radius {
        2.0
    } else {
        1.0 - ((distance - force_radius).max(0.0) / force_dropoff).min(1.0)
    }
}

/// 1 枚の葉を足元 `feet` から押す。今の傾きより強い力のときだけ上書きする
pub fn bend_blade(blade: &mut Blade, feet: Vec2, force_radius: f32, force_dropoff: f32) {
    let root = Vec2::new(blade.pos.x, blade.pos.y + BLADE_ROOT_OFFSET);
    let force = bend_force(root.distance(feet), force_radius, force_dropoff);
    let dir = if feet.x < blade.pos.x { -1.0 } else { 1.0 };
    if blade.angle.abs() < force * 90.0 {
        let bent = (dir * force * 90.0 + blade.angle * 0.5).clamp(-90.0, 90.0);
        blade.angle = clamp_to_steps(bent, -90.0, 90.0, 180.0 / MAX_GRASS_STEPS);
    }
}

/// 草の生えているタイルの集合
#[derive(Debug)]
pub struct GrassField {
    tile_size: f32,
    tiles:     Vec<GrassTile>,
    lookup:    FxHashMap<TilePos, usize>,
}

impl GrassField {
    pub fn new(tile_size: f32) -> Self {
        Self {
            tile_size,
            tiles:  Vec::new(),
            lookup: FxHashMap::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn blade_count(&self) -> usize {
        self.tiles.iter().map(|t| t.blades.len()).sum()
    }

    pub fn tiles(&self) -> &[GrassTile] {
        &self.tiles
    }

    /// 並列処理用（rayon の par_iter_mut に渡す）
    pub fn tiles_mut(&mut self) -> &mut [GrassTile] {
        &mut self.tiles
    }

    pub fn get(&self, pos: TilePos) -> Option<&GrassTile> {
        self.lookup.get(&pos).and_then(|&i| self.tiles.get(i))
    }

    /// ワールド座標の位置に草タイルを置き、葉を生成する。既にあれば何もしない
    pub fn place(&mut self, pos: TilePos) {
        if self.lookup.contains_key(&pos) {
            return;
        }
        self.insert(GrassTile::generate(pos, self.tile_size));
    }

    pub fn insert(&mut self, tile: GrassTile) {
        if let Some(&i) = self.lookup.get(&tile.pos) {
            self.tiles[i] = tile;
            return;
        }
        self.lookup.insert(tile.pos, self.tiles.len());
        self.tiles.push(tile);
    }

    pub fn remove(&mut self, pos: TilePos) -> Option<GrassTile> {
        let i = self.lookup.remove(&pos)?;
        let removed = self.tiles.swap_remove(i);
        if let Some(moved) = self.tiles.get(i) {
            self.lookup.insert(moved.pos, i);
        }
        Some(removed)
    }

    pub fn relax(&mut self, dt: f32, stiffness: f32) {
        let amount = stiffness * dt;
        for t in &mut self.tiles {
            t.relax(amount);
        }
    }

    /// 各足元が乗っているタイルごとに 1 回だけ、その 3x3 近傍の葉を押し倒す
    pub fn deform(&mut self, feet: &[Vec2], force_radius: f32, force_dropoff: f32) {
        let mut processed: FxHashSet<TilePos> = FxHashSet::default();
        for &p in feet {
            let tile = (
                (p.x / self.tile_size).floor() as i32,
                (p.y / self.tile_size).floor() as i32,
            );
            if !self.lookup.contains_key(&tile) || !processed.insert(tile) {
                continue;
            }
            for (ox, oy) in NEIGHBOR_OFFSETS {
                let Some(&i) = self.lookup.get(&(tile.0 + ox, tile.1 + oy)) else { continue };
                for blade in &mut self.tiles[i].blades {
                    bend_blade(blade, p, force_radius, force_dropoff);
                }
            }
        }
    }

    /// 風。`f(pos)` の度数を量子化して 1/180 だけ加える
    pub fn apply_wind(&mut self, f: impl Fn(Vec2) -> f32) {
        let step = 180.0 / MAX_GRASS_STEPS;
        for t in &mut self.tiles {
            for b in &mut t.blades {
                b.angle += clamp_to_steps(f(b.pos), -90.0, 90.0, step) / 180.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_is_deterministic_per_tile() {
        let a = GrassTile::generate((4, -2), 15.0);
        let b = GrassTile::generate((4, -2), 15.0);
        assert_eq!(a.blades, b.blades);
        assert!(a.blades.len() <= 9);
        assert!(a.blades.iter().all(|bl| bl.variant < 6));
    }

    #[test]
    fn roughly_a_third_of_slots_grow() {
        let total: usize = (0..100)
            .map(|i| GrassTile::generate((i, i * 3), 15.0).blades.len())
            .sum();
        // 900 スロット中およそ 300
        assert!((200..400).contains(&total), "total={total}");
    }

    #[test]
    fn force_falls_off_outside_radius() {
        assert_eq!(bend_force(1.0, 6.0, 12.0), 2.0);
        assert_eq!(bend_force(12.0, 6.0, 12.0), 0.5);
        assert_eq!(bend_force(100.0, 6.0, 12.0), 0.0);
    }

    #[test]
    fn blade_bends_away_from_feet_in_steps() {
        let mut blade = Blade { pos: Vec2::new(10.0, 0.0), variant: 0, angle: 0.0 };
        bend_blade(&mut blade, Vec2::new(5.0, 12.0), 6.0, 12.0);
        // 足元が左 → 左に倒れ、7.2 度刻みに丸まる
        let step = 180.0 / 25.0_f32;
        assert_eq!(blade.angle, (-90.0 / step).round() * step);
        assert!(blade.angle < -85.0);

        // 既に強く倒れている葉は弱い力では上書きされない
        let before = blade.angle;
        bend_blade(&mut blade, Vec2::new(30.0, 12.0), 6.0, 12.0);
        assert_eq!(blade.angle, before);
    }

    #[test]
    fn relax_returns_to_rest() {
        let mut field = GrassField::new(15.0);
        field.insert(GrassTile {
            pos: (0, 0),
            blades: vec![Blade { pos: Vec2::ZERO, variant: 0, angle: 45.0 }],
        });
        field.relax(0.1, 360.0);
        assert_eq!(field.tiles()[0].blades[0].angle, 9.0);
        field.relax(0.1, 360.0);
        assert_eq!(field.tiles()[0].blades[0].angle, 0.0);
    }

    #[test]
    fn deform_touches_each_tile_once() {
        let mut field = GrassField::new(15.0);
        field.insert(GrassTile {
            pos: (0, 0),
            blades: vec![Blade { pos: Vec2::new(8.0, 0.0), variant: 0, angle: 0.0 }],
        });
        // 同じタイル上の 2 つの足元。2 回目は処理されない
        field.deform(&[Vec2::new(10.0, 12.0), Vec2::new(2.0, 12.0)], 6.0, 12.0);
        assert!(field.tiles()[0].blades[0].angle > 0.0);
    }

    #[test]
    fn remove_keeps_lookup_consistent() {
        let mut field = GrassField::new(15.0);
        for x in 0..4 {
            field.place((x, 0));
        }
        assert!(field.remove((1, 0)).is_some());
        assert_eq!(field.len(), 3);
        for x in [0, 2, 3] {
            assert_eq!(field.get((x, 0)).map(|t| t.pos), Some((x, 0)));
        }
        assert!(field.get((1, 0)).is_none());
    }
}
