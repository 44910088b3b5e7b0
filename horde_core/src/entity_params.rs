//! Path: horde_core/src/entity_params.rs
//! Summary: 銃の種類ごとのパラメータテーブル
//!
//! 木箱の中身の抽選もここで種類を決める。

use crate::constants::{DEFAULT_BULLET_SPEED, DEFAULT_SPREAD};
use crate::physics::rng::SimpleRng;
use serde::{Deserialize, Serialize};

/// 銃の種類（テーブルのインデックス）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum GunKind {
    Rifle          = 0,
    Pistol         = 1,
    PistolSilenced = 2,
    Shotgun        = 3,
    RocketLauncher = 4,
    KrissVector    = 5,
    M60            = 6,
    Ring           = 7,
}

impl GunKind {
    pub const ALL: [GunKind; 8] = [
        Self::Rifle, Self::Pistol, Self::PistolSilenced, Self::Shotgun,
        Self::RocketLauncher, Self::KrissVector, Self::M60, Self::Ring,
    ];

    pub fn params(self) -> &'static GunParams {
        GunParams::get(self)
    }

    /// 木箱のドロップ抽選（roll は 0..=100）
    pub fn roll_crate_drop(rng: &mut SimpleRng) -> GunKind {
        let roll = rng.gen_range_inclusive(0, 100);
        if roll <= 5 {
            Self::Ring
        } else if roll <= 15 {
            *rng.pick(&[Self::M60, Self::KrissVector]).unwrap_or(&Self::M60)
        } else if roll <= 25 {
            Self::RocketLauncher
        } else if roll <= 35 {
            Self::Shotgun
        } else {
            *rng.pick(&[Self::Pistol, Self::PistolSilenced, Self::Rifle]).unwrap_or(&Self::Pistol)
        }
    }
}

/// 銃のパラメータ
#[derive(Clone, Copy, Debug)]
pub struct GunParams {
    pub name:         &'static str,
    /// 発射間隔（秒）
    pub firerate:     f32,
    pub damage:       f32,
    /// マガジン容量
    pub ammo:         u32,
    pub reload_time:  f32,
    /// 1 発あたりの弾数
    pub bullets:      u32,
    pub bullet_speed: f32,
    /// 弾ごとの角度差（ラジアン）
    pub spread:       f32,
    pub gun_length:   f32,
}

static GUN_TABLE: [GunParams; 8] = [
    GunParams { name: "Rifle",           firerate: 0.15,  damage: 15.0,  ammo: 31,  reload_time: 1.7, bullets: 1,  bullet_speed: DEFAULT_BULLET_SPEED, spread: DEFAULT_SPREAD, gun_length: 19.0 },
    GunParams { name: "Pistol",          firerate: 0.4,   damage: 33.0,  ammo: 6,   reload_time: 1.4, bullets: 1,  bullet_speed: DEFAULT_BULLET_SPEED, spread: DEFAULT_SPREAD, gun_length: 10.0 },
    GunParams { name: "Silenced Pistol", firerate: 0.3,   damage: 21.0,  ammo: 8,   reload_time: 1.6, bullets: 1,  bullet_speed: DEFAULT_BULLET_SPEED, spread: DEFAULT_SPREAD, gun_length: 17.0 },
    GunParams { name: "Shotgun",         firerate: 0.25,  damage: 9.0,   ammo: 8,   reload_time: 2.0, bullets: 11, bullet_speed: DEFAULT_BULLET_SPEED, spread: DEFAULT_SPREAD, gun_length: 19.0 },
    GunParams { name: "Rocketlauncher",  firerate: 0.001, damage: 100.0, ammo: 1,   reload_time: 3.0, bullets: 1,  bullet_speed: 250.0,                spread: DEFAULT_SPREAD, gun_length: 23.0 },
    GunParams { name: "Vector",          firerate: 0.1,   damage: 5.0,   ammo: 33,  reload_time: 1.6, bullets: 1,  bullet_speed: DEFAULT_BULLET_SPEED, spread: DEFAULT_SPREAD, gun_length: 17.0 },
    GunParams { name: "M60",             firerate: 0.23,  damage: 20.0,  ammo: 45,  reload_time: 3.5, bullets: 2,  bullet_speed: DEFAULT_BULLET_SPEED, spread: DEFAULT_SPREAD, gun_length: 23.0 },
    GunParams { name: "Ring",            firerate: 0.1,   damage: 13.0,  ammo: 100, reload_time: 6.0, bullets: 36, bullet_speed: DEFAULT_BULLET_SPEED, spread: DEFAULT_SPREAD, gun_length: 10.0 },
];

impl GunParams {
    pub fn get(kind: GunKind) -> &'static GunParams {
        &GUN_TABLE[kind as usize]
    }

    /// 1 回の発射で出る各弾の角度オフセット。
    /// 奇数なら -n..=n、偶数なら -n..n（n = bullets / 2）
    pub fn spread_offsets(&self) -> Vec<f32> {
        let n = self.bullets as i32;
        let range = if n % 2 != 0 {
            let x = (n - 1) / 2;
            -x..x + 1
        } else {
            let x = n / 2;
            -x..x
        };
        range.map(|i| i as f32 * self.spread).collect()
    }
}
