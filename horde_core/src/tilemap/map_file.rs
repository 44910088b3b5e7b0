//! Path: horde_core/src/tilemap/map_file.rs
//! Summary: マップ JSON の読み書き（タイルレイヤー・オフグリッド・草の葉）
//!
//! 形式:
//! `{"tilemap": {"0": {"x;y": {"type", "variant", "pos": [x, y]}}}, "tile_size": 15,
//!   "offgrid": [...], "blades": {"x;y": [[[x, y], variant], ...]}}`

use super::grass::{Blade, GrassField, GrassTile};
use super::{Tile, TileMap, TilePos};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum MapLoadError {
    #[error("failed to access map file {path}: {source}")]
    Io {
        path:   String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid map json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("bad tile key {0:?} (expected \"x;y\")")]
    BadTileKey(String),
    #[error("bad layer key {0:?}")]
    BadLayer(String),
}

/// 保存された葉 1 枚: `[[x, y], variant]`
type SavedBlade = ([f32; 2], u8);

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct MapFile {
    pub tilemap:   BTreeMap<String, BTreeMap<String, Tile>>,
    pub tile_size: f32,
    #[serde(default)]
    pub offgrid:   Vec<Tile>,
    #[serde(default)]
    pub blades:    BTreeMap<String, Vec<SavedBlade>>,
}

pub fn parse_tile_key(key: &str) -> Result<TilePos, MapLoadError> {
    let bad = || MapLoadError::BadTileKey(key.to_string());
    let (x, y) = key.split_once(';').ok_or_else(bad)?;
    let x = x.trim().parse::<i32>().map_err(|_| bad())?;
    let y = y.trim().parse::<i32>().map_err(|_| bad())?;
    Ok((x, y))
}

pub fn tile_key(pos: TilePos) -> String {
    format!("{};{}", pos.0, pos.1)
}

impl MapFile {
    pub fn from_json_str(s: &str) -> Result<Self, MapLoadError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, MapLoadError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| MapLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), MapLoadError> {
        let path = path.as_ref();
        let text = serde_json::to_string(self)?;
        std::fs::write(path, text).map_err(|source| MapLoadError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    /// 文字列キーを検証しながらタイルマップと草に展開する。
    /// 葉が保存されていない草タイルはタイル座標から生成し直す
    pub fn into_world(self) -> Result<(TileMap, GrassField), MapLoadError> {
        let mut map = TileMap::new(self.tile_size);
        for (layer_key, grid) in self.tilemap {
            let layer: i32 = layer_key
                .trim()
                .parse()
                .map_err(|_| MapLoadError::BadLayer(layer_key.clone()))?;
            for (key, tile) in grid {
                map.insert_raw(layer, parse_tile_key(&key)?, tile);
            }
        }
        map.offgrid = self.offgrid;

        let mut grass = GrassField::new(self.tile_size);
        for (key, saved) in self.blades {
            let pos = parse_tile_key(&key)?;
            if saved.is_empty() {
                grass.place(pos);
                continue;
            }
            let blades = saved
                .into_iter()
                .map(|(p, variant)| Blade { pos: Vec2::from(p), variant, angle: 0.0 })
                .collect();
            grass.insert(GrassTile { pos, blades });
        }
        log::debug!(
            "map loaded: {} tiles, {} offgrid, {} grass tiles",
            map.tile_count(),
            map.offgrid.len(),
            grass.len()
        );
        Ok((map, grass))
    }

    pub fn from_world(map: &TileMap, grass: &GrassField) -> Self {
        let tilemap = map
            .layers()
            .map(|(layer, grid)| {
                let tiles = grid.iter().map(|(p, t)| (tile_key(*p), t.clone())).collect();
                (layer.to_string(), tiles)
            })
            .collect();
        let blades = grass
            .tiles()
            .iter()
            .map(|t| {
                let saved = t.blades.iter().map(|b| (b.pos.to_array(), b.variant)).collect();
                (tile_key(t.pos), saved)
            })
            .collect();
        Self {
            tilemap,
            tile_size: map.tile_size(),
            offgrid: map.offgrid.clone(),
            blades,
        }
    }
}

pub fn load_map(path: impl AsRef<Path>) -> Result<(TileMap, GrassField), MapLoadError> {
    MapFile::from_path(path)?.into_world()
}

pub fn save_map(path: impl AsRef<Path>, map: &TileMap, grass: &GrassField) -> Result<(), MapLoadError> {
    MapFile::from_world(map, grass).write_to(path)
}
