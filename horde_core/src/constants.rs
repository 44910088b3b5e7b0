//! Path: horde_core/src/constants.rs
//! Summary: タイル・空間ハッシュ・戦闘・草などのシミュレーション定数

// Tile grid
pub const TILE_SIZE: f32 = 15.0;

/// 物理的に通れないタイル種別（layer 0）
pub const PHYSICS_TILES: &[&str] = &["sides", "blocker", "stone"];

/// 弾丸を止める障害物レイヤー
pub const OBSTRUCTION_LAYER: i32 = 1;
/// 床・壁の物理レイヤー
pub const PHYSICS_LAYER: i32 = 0;

// Spatial hash cell sizes（エンティティ用と弾丸用で別インスタンス）
pub const ENTITY_CELL_SIZE:     f32 = 32.0;
pub const PROJECTILE_CELL_SIZE: f32 = 16.0;

// Proximity effects
pub const PICKUP_RADIUS:  f32 = 30.0;
pub const OUTLINE_RADIUS: f32 = 30.0;
pub const EXPLOSION_DAMAGE_FACTOR: f32 = 3.5;

// Player
pub const PLAYER_SIZE:        (f32, f32) = (9.0, 7.0);
pub const PLAYER_HITBOX_SIZE: (f32, f32) = (9.0, 25.0);
pub const PLAYER_MAX_HEALTH:  f32 = 200.0;
pub const PLAYER_SPEED:       f32 = 60.0;
pub const PLAYER_BOOST:       f32 = 4.0;

// Zombies
pub const ZOMBIE_SIZE:             (f32, f32) = (9.0, 7.0);
pub const ZOMBIE_SPEED:            f32 = 25.0;
pub const ZOMBIE_SEE_DIST:         f32 = 125.0;
pub const ZOMBIE_SEPARATION_DIST:  f32 = 25.0;
pub const ZOMBIE_SEEK_WEIGHT:      f32 = 0.2;
pub const ZOMBIE_SEPARATION_WEIGHT: f32 = 0.6;
pub const SUICIDE_SPEED:           f32 = 15.0;
pub const SUICIDE_EXPLODE_RANGE:   f32 = 30.0;
/// 死亡後に自爆ベストが起爆するまでの秒数
pub const SUICIDE_FUSE:            f32 = 2.1;
/// 死体が消えて血痕デカールになるまでの秒数
pub const CORPSE_LINGER:           f32 = 5.0;

// Crates
pub const CRATE_SIZE:        (f32, f32) = (16.0, 12.0);
pub const CRATE_HITBOX_SIZE: (f32, f32) = (16.0, 16.0);
pub const CRATE_MAX_HEALTH:  f32 = 150.0;

// Items
pub const GUN_SIZE:    (f32, f32) = (19.0, 7.0);
pub const MEDKIT_SIZE: (f32, f32) = (9.0, 8.0);
pub const MEDKIT_HEAL: f32 = 50.0;
pub const MEDKIT_USES: u32 = 1;

// Projectiles
pub const BULLET_SIZE:     (f32, f32) = (3.0, 3.0);
pub const BULLET_LIFETIME: f32 = 1.5;
pub const DEFAULT_BULLET_SPEED: f32 = 150.0;
pub const DEFAULT_SPREAD:       f32 = 0.06;

// Grass
pub const BLADES_STIFFNESS: f32 = 360.0;
pub const MAX_GRASS_STEPS:  f32 = 25.0;
pub const GRASS_FORCE_RADIUS:  f32 = 6.0;
pub const GRASS_FORCE_DROPOFF: f32 = 12.0;
/// 葉の根元から判定点までの縦オフセット
pub const BLADE_ROOT_OFFSET: f32 = 12.0;

/// 3x3 近傍オフセット
pub const NEIGHBOR_OFFSETS: [(i32, i32); 9] = [
    (-1, 0), (-1, -1), (0, -1), (1, -1), (1, 0), (0, 0), (-1, 1), (0, 1), (1, 1),
];

// Frame budget
pub const FRAME_BUDGET_MS: f64 = 1000.0 / 60.0;

/// パーティクル用 RNG シード
pub const PARTICLE_RNG_SEED: u64 = 67890;
