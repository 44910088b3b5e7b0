//! Path: horde_sim/src/world/game_world.rs
//! Summary: ゲームワールド（全状態の所有者。フレームループが &mut で排他的に触る）

use super::{DecalWorld, EntityStore, FrameEvent, InputSnapshot, LoopState, ParticleWorld};
use crate::constants::{SPAWNER_CRATE, SPAWNER_KIND, SPAWNER_PLAYER, SPAWNER_SUICIDE, SPAWNER_ZOMBIE};
use crate::game_logic::systems::crates::roll_crate_contents;
use glam::Vec2;
use horde_core::config::SimConfig;
use horde_core::constants::PARTICLE_RNG_SEED;
use horde_core::entity::{Entity, EntityId, EntityKind, EntityTag, IdRegistry};
use horde_core::physics::entity_index::EntityIndex;
use horde_core::physics::rng::SimpleRng;
use horde_core::tilemap::grass::GrassField;
use horde_core::tilemap::map_file::{load_map, MapLoadError};
use horde_core::tilemap::TileMap;
use rustc_hash::FxHashMap;
use std::path::Path;

/// 爆発の予約（インデックス再構築の後でまとめて処理する）
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendingExplosion {
    pub center: Vec2,
    pub radius: f32,
    pub source: EntityId,
}

/// マップから取り出したスポーン地点
#[derive(Clone, Debug, Default)]
pub struct Spawners {
    pub player:  Option<Vec2>,
    pub zombie:  Vec<Vec2>,
    pub suicide: Vec<Vec2>,
    pub crates:  Vec<Vec2>,
}

/// ウェーブ進行
#[derive(Clone, Debug, Default)]
pub struct WaveDirector {
    /// 次のウェーブまでの残り秒
    pub until_next:    f32,
    pub waves_spawned: u32,
    /// 通算スポーン数（自爆ゾンビの間隔判定用）
    pub spawn_counter: u32,
}

pub struct GameWorld {
    pub config:             SimConfig,
    pub frame_id:           u32,
    /// ゲーム開始からの経過時間（秒）
    pub elapsed_seconds:    f32,
    pub ids:                IdRegistry,
    pub rng:                SimpleRng,
    pub tilemap:            TileMap,
    pub grass:              GrassField,
    pub player:             Entity,
    /// ゾンビ・木箱
    pub actors:             EntityStore,
    /// 地面に落ちているアイテム
    pub items:              EntityStore,
    pub bullets:            EntityStore,
    pub entity_index:       EntityIndex,
    pub projectile_index:   EntityIndex,
    /// ゾンビごとの「最後にプレイヤーを見た位置」
    pub last_seen:          FxHashMap<EntityId, Vec2>,
    pub particles:          ParticleWorld,
    pub decals:             DecalWorld,
    pub pending_explosions: Vec<PendingExplosion>,
    pub spawners:           Spawners,
    pub waves:              WaveDirector,
    pub loop_state:         LoopState,
    pub input:              InputSnapshot,
    pub kill_count:         u32,
    /// このフレームで発生したイベント（毎フレーム drain される）
    pub frame_events:       Vec<FrameEvent>,
    /// 直近フレームの物理ステップ処理時間（ミリ秒）
    pub last_frame_time_ms: f64,
}

impl GameWorld {
    /// 空のマップにプレイヤーだけを置いたワールド
    pub fn new(config: SimConfig) -> Self {
        let tilemap = TileMap::new(config.tile_size);
        let grass = GrassField::new(config.tile_size);
        Self::with_map(config, tilemap, grass)
    }

    /// マップのスポーン地点を取り出し、プレイヤー・初期ゾンビ・木箱を配置する
    pub fn with_map(config: SimConfig, mut tilemap: TileMap, grass: GrassField) -> Self {
        let spawners = extract_spawners(&mut tilemap);
        let mut ids = IdRegistry::new();
        let player = Entity::player(ids.next_id(), spawners.player.unwrap_or(Vec2::ZERO));
        let mut w = Self {
            frame_id:           0,
            elapsed_seconds:    0.0,
            ids,
            rng:                SimpleRng::new(config.seed),
            tilemap,
            grass,
            player,
            actors:             EntityStore::new(),
            items:              EntityStore::new(),
            bullets:            EntityStore::new(),
            entity_index:       EntityIndex::new(config.entity_cell_size),
            projectile_index:   EntityIndex::new(config.projectile_cell_size),
            last_seen:          FxHashMap::default(),
            particles:          ParticleWorld::new(PARTICLE_RNG_SEED),
            decals:             DecalWorld::new(),
            pending_explosions: Vec::new(),
            waves:              WaveDirector { until_next: config.wave_interval, ..WaveDirector::default() },
            spawners:           Spawners::default(),
            loop_state:         LoopState::Running,
            input:              InputSnapshot::default(),
            kill_count:         0,
            frame_events:       Vec::new(),
            last_frame_time_ms: 0.0,
            config,
        };
        for &p in &spawners.zombie {
            w.spawn_zombie(p, false);
        }
        for &p in &spawners.suicide {
            w.spawn_zombie(p, true);
        }
        for &p in &spawners.crates {
            w.spawn_crate(p);
        }
        w.spawners = spawners;
        w.rebuild_indices();
        log::debug!(
            "world ready: {} actors, {} tiles, {} grass tiles",
            w.actors.len(),
            w.tilemap.tile_count(),
            w.grass.len()
        );
        w
    }

    /// マップ JSON から組み立てる
    pub fn from_map_file(config: SimConfig, path: impl AsRef<Path>) -> Result<Self, MapLoadError> {
        let path = path.as_ref();
        let (tilemap, grass) = load_map(path)?;
        log::info!("map loaded from {}", path.display());
        Ok(Self::with_map(config, tilemap, grass))
    }

    /// ゾンビを出す。出現直後は `zombie_spawn_delay` 秒だけ動かない
    pub fn spawn_zombie(&mut self, pos: Vec2, suicide: bool) -> EntityId {
        let id = self.ids.next_id();
        let mut z = if suicide { Entity::suicide_zombie(id, pos) } else { Entity::zombie(id, pos) };
        let delay = self.config.zombie_spawn_delay;
        match &mut z.kind {
            EntityKind::Zombie(_, b)        => b.spawn_delay = delay,
            EntityKind::SuicideZombie(_, b) => b.spawn_delay = delay,
            _ => {}
        }
        let tag = z.tag();
        self.actors.insert(z);
        self.frame_events.push(FrameEvent::ZombieSpawned { id, tag });
        log::debug!("spawned {tag:?} {id:?} at {pos}");
        id
    }

    pub fn spawn_crate(&mut self, pos: Vec2) -> EntityId {
        let id = self.ids.next_id();
        let contents = roll_crate_contents(&mut self.rng, &mut self.ids, pos);
        self.actors.insert(Entity::loot_crate(id, pos, contents));
        id
    }

    /// 地面にアイテムを置く（次の再構築でインデックスに入る）
    pub fn place_item(&mut self, item: Entity) {
        self.items.insert(item);
    }

    /// エンティティ・弾のインデックスを作り直す（1 フレーム 1 回の同期点）
    pub fn rebuild_indices(&mut self) {
        self.entity_index.rebuild(
            std::iter::once(&self.player)
                .chain(self.actors.iter())
                .chain(self.items.iter()),
        );
        self.projectile_index.rebuild(self.bullets.iter());
    }

    /// プレイヤーまたはアクターを ID で引く
    pub fn target(&self, id: EntityId) -> Option<&Entity> {
        if id == self.player.id {
            Some(&self.player)
        } else {
            self.actors.get(id)
        }
    }

    pub fn target_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        if id == self.player.id {
            Some(&mut self.player)
        } else {
            self.actors.get_mut(id)
        }
    }

    pub fn live_zombie_count(&self) -> usize {
        self.actors.iter().filter(|e| e.is_zombie() && !e.dead).count()
    }

    pub fn count_of(&self, tag: EntityTag) -> usize {
        self.actors.iter().filter(|e| e.tag() == tag).count()
    }
}

/// オフグリッドタイルの "spawners" マーカーを取り除いて地点に変換する
fn extract_spawners(tilemap: &mut TileMap) -> Spawners {
    let kinds = [
        (SPAWNER_KIND, SPAWNER_PLAYER),
        (SPAWNER_KIND, SPAWNER_ZOMBIE),
        (SPAWNER_KIND, SPAWNER_SUICIDE),
        (SPAWNER_KIND, SPAWNER_CRATE),
    ];
    let mut out = Spawners::default();
    for t in tilemap.extract(&kinds, false) {
        let p = Vec2::from(t.pos);
        match t.variant {
            SPAWNER_PLAYER => {
                if out.player.is_none() {
                    out.player = Some(p);
                }
            }
            SPAWNER_ZOMBIE  => out.zombie.push(p),
            SPAWNER_SUICIDE => out.suicide.push(p),
            SPAWNER_CRATE   => out.crates.push(p),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use horde_core::tilemap::Tile;

    #[test]
    fn spawner_markers_place_initial_entities() {
        let mut map = TileMap::new(15.0);
        map.offgrid.push(Tile::new("spawners", 0, [40.0, 50.0]));
        map.offgrid.push(Tile::new("spawners", 1, [200.0, 50.0]));
        map.offgrid.push(Tile::new("spawners", 2, [220.0, 50.0]));
        map.place_tile((3, 3), "spawners", 3, 0);
        map.offgrid.push(Tile::new("decor", 0, [1.0, 1.0]));
        let w = GameWorld::with_map(SimConfig::default(), map, GrassField::new(15.0));

        assert_eq!(w.player.pos(), Vec2::new(40.0, 50.0));
        assert_eq!(w.count_of(EntityTag::Zombie), 1);
        assert_eq!(w.count_of(EntityTag::SuicideZombie), 1);
        assert_eq!(w.count_of(EntityTag::Crate), 1);
        assert_eq!(w.spawners.crates, vec![Vec2::new(45.0, 45.0)]);
        // マーカーは取り除かれ、装飾は残る
        assert_eq!(w.tilemap.offgrid.len(), 1);
        assert_eq!(w.live_zombie_count(), 2);
    }

    #[test]
    fn rebuild_indexes_player_actors_and_items() {
        let mut w = GameWorld::new(SimConfig::default());
        let z = w.spawn_zombie(Vec2::new(100.0, 100.0), false);
        let id = w.ids.next_id();
        w.place_item(Entity::medkit(id, Vec2::new(300.0, 300.0)));
        w.rebuild_indices();
        let all: Vec<EntityId> = w.entity_index.get_all().into_iter().map(|e| e.payload).collect();
        assert_eq!(all.len(), 3);
        assert!(all.contains(&z) && all.contains(&id) && all.contains(&w.player.id));
        assert!(w.target(z).is_some());
        assert!(w.target(id).is_none());
    }
}
