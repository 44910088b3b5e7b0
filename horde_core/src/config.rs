//! Path: horde_core/src/config.rs
//! Summary: シミュレーション設定（SimConfig）の既定値・JSON 読み込み・環境変数指定
//!
//! すべての項目に既定値があり、JSON では変更したいキーだけを書けばよい。

use crate::constants::{
    BLADES_STIFFNESS, BULLET_LIFETIME, CORPSE_LINGER, ENTITY_CELL_SIZE, EXPLOSION_DAMAGE_FACTOR,
    FRAME_BUDGET_MS, GRASS_FORCE_DROPOFF, GRASS_FORCE_RADIUS, OUTLINE_RADIUS, PICKUP_RADIUS,
    PLAYER_BOOST, PLAYER_SPEED, PROJECTILE_CELL_SIZE, SUICIDE_FUSE, TILE_SIZE,
    ZOMBIE_SEPARATION_DIST,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 設定ファイルのパスを指定する環境変数
pub const CONFIG_ENV_VAR: &str = "HORDE_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path:   String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub tile_size:                f32,
    pub entity_cell_size:         f32,
    pub projectile_cell_size:     f32,
    pub pickup_radius:            f32,
    pub outline_radius:           f32,
    pub explosion_damage_factor:  f32,
    /// true なら爆発の候補矩形を radius² の大きさで取る（旧挙動）
    pub legacy_explosion_window:  bool,
    pub player_speed:             f32,
    pub player_boost:             f32,
    pub blades_stiffness:         f32,
    pub grass_force_radius:       f32,
    pub grass_force_dropoff:      f32,
    /// 草タイル数がこれ以上なら rayon で並列に緩和する
    pub grass_parallel_threshold: usize,
    /// 風の強さ（度）。0 なら吹かない
    pub wind_strength:            f32,
    pub bullet_lifetime:          f32,
    pub zombie_separation_dist:   f32,
    pub suicide_fuse:             f32,
    pub corpse_linger:            f32,
    pub zombie_spawn_delay:       f32,
    pub wave_interval:            f32,
    pub zombies_per_wave:         u32,
    /// n 体ごとに 1 体を自爆ゾンビにする（0 なら出さない）
    pub suicide_every:            u32,
    pub waves:                    u32,
    pub frame_budget_ms:          f64,
    pub seed:                     u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tile_size:                TILE_SIZE,
            entity_cell_size:         ENTITY_CELL_SIZE,
            projectile_cell_size:     PROJECTILE_CELL_SIZE,
            pickup_radius:            PICKUP_RADIUS,
            outline_radius:           OUTLINE_RADIUS,
            explosion_damage_factor:  EXPLOSION_DAMAGE_FACTOR,
            legacy_explosion_window:  false,
            player_speed:             PLAYER_SPEED,
            player_boost:             PLAYER_BOOST,
            blades_stiffness:         BLADES_STIFFNESS,
            grass_force_radius:       GRASS_FORCE_RADIUS,
            grass_force_dropoff:      GRASS_FORCE_DROPOFF,
            grass_parallel_threshold: 512,
            wind_strength:            0.0,
            bullet_lifetime:          BULLET_LIFETIME,
            zombie_separation_dist:   ZOMBIE_SEPARATION_DIST,
            suicide_fuse:             SUICIDE_FUSE,
            corpse_linger:            CORPSE_LINGER,
            zombie_spawn_delay:       0.5,
            wave_interval:            20.0,
            zombies_per_wave:         6,
            suicide_every:            4,
            waves:                    5,
            frame_budget_ms:          FRAME_BUDGET_MS,
            seed:                     12345,
        }
    }
}

impl SimConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// `HORDE_CONFIG` が指すファイルを読む。未設定・失敗時は既定値
    pub fn load_or_default() -> Self {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) => match Self::from_path(&path) {
                Ok(cfg) => {
                    log::info!("config loaded from {path}");
                    cfg
                }
                Err(e) => {
                    log::warn!("{e}; falling back to defaults");
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!("{CONFIG_ENV_VAR} not set, using default config");
                Self::default()
            }
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
