//! Path: horde_core/src/entity.rs
//! Summary: エンティティ（プレイヤー・ゾンビ・アイテム・木箱・弾）のタグ付き共用体モデル
//!
//! 1 種類のレコード `Entity` と種類別状態 `EntityKind` で表し、振る舞いは match で分岐する。
//! ID は `IdRegistry` が払い出す（グローバルカウンタは持たない）。

use crate::constants::{
    BULLET_LIFETIME, BULLET_SIZE, CRATE_HITBOX_SIZE, CRATE_MAX_HEALTH, CRATE_SIZE, GUN_SIZE,
    MEDKIT_SIZE, PLAYER_HITBOX_SIZE, PLAYER_MAX_HEALTH, PLAYER_SIZE, SUICIDE_EXPLODE_RANGE,
    SUICIDE_SPEED, ZOMBIE_SEE_DIST, ZOMBIE_SIZE, ZOMBIE_SPEED,
};
use crate::entity_params::GunKind;
use crate::geometry::{vec_from_angle, Rect};
use crate::item::ItemState;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// 安定したエンティティ ID（再利用しない）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// ID 払い出し。ワールドが 1 つ所有し、参照で渡す
#[derive(Debug, Default)]
pub struct IdRegistry {
    next: u32,
}

impl IdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }

    pub fn issued(&self) -> u32 {
        self.next
    }
}

/// ログ・イベント用の種類タグ
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityTag {
    Player,
    Zombie,
    SuicideZombie,
    Item,
    Crate,
    Bullet,
}

/// 人型（プレイヤー・ゾンビ共通）の体力と所持品
#[derive(Clone, Debug)]
pub struct Humanoid {
    pub health:        f32,
    pub max_health:    f32,
    pub hitbox_size:   (f32, f32),
    pub inventory:     Vec<Entity>,
    pub inventory_idx: usize,
}

impl Humanoid {
    pub fn new(max_health: f32) -> Self {
        Self {
            health:        max_health,
            max_health,
            hitbox_size:   PLAYER_HITBOX_SIZE,
            inventory:     Vec::new(),
            inventory_idx: 0,
        }
    }

    pub fn held_item(&self) -> Option<&Entity> {
        self.inventory.get(self.inventory_idx)
    }

    pub fn held_item_mut(&mut self) -> Option<&mut Entity> {
        self.inventory.get_mut(self.inventory_idx)
    }

    /// 所持品を回す（dir = ±1）
    pub fn cycle_inventory(&mut self, dir: i32) {
        let len = self.inventory.len() as i32;
        if len > 0 {
            self.inventory_idx = (self.inventory_idx as i32 + dir).rem_euclid(len) as usize;
        }
    }

    pub fn pickup(&mut self, owner: EntityId, mut item: Entity) {
        if let EntityKind::Item(state) = &mut item.kind {
            state.owner = Some(owner);
        }
        item.outlined = false;
        self.inventory.push(item);
    }

    /// 装備中のアイテムを外す。インデックスは 1 つ手前に寄せる
    pub fn drop_held(&mut self) -> Option<Entity> {
        if self.inventory_idx >= self.inventory.len() {
            return None;
        }
        let mut item = self.inventory.remove(self.inventory_idx);
        if let EntityKind::Item(state) = &mut item.kind {
            state.owner = None;
        }
        self.inventory_idx = self.inventory_idx.saturating_sub(1).min(self.inventory.len());
        Some(item)
    }

    /// 使い切った消耗品を捨てる
    pub fn discard_spent(&mut self) {
        self.inventory
            .retain(|e| !matches!(&e.kind, EntityKind::Item(s) if s.is_spent()));
        if self.inventory_idx >= self.inventory.len() {
            self.inventory_idx = self.inventory.len().saturating_sub(1);
        }
    }
}

/// ゾンビの思考状態
#[derive(Clone, Debug)]
pub struct ZombieBrain {
    pub speed:                f32,
    pub see_dist:             f32,
    pub time_between_reload:  f32,
    pub no_target_sight_time: f32,
    pub target_point:         Vec2,
    pub shoot_input:          bool,
    pub reload_input:         bool,
    /// 死亡後の経過時間（死体の消滅判定）
    pub time_dead:            f32,
    /// 出現直後の待機時間
    pub spawn_delay:          f32,
}

impl Default for ZombieBrain {
    fn default() -> Self {
        Self {
            speed:                ZOMBIE_SPEED,
            see_dist:             ZOMBIE_SEE_DIST,
            time_between_reload:  0.0,
            no_target_sight_time: 0.0,
            target_point:         Vec2::ZERO,
            shoot_input:          false,
            reload_input:         false,
            time_dead:            0.0,
            spawn_delay:          0.0,
        }
    }
}

/// 自爆ゾンビの状態
#[derive(Clone, Debug)]
pub struct SuicideBrain {
    pub speed:         f32,
    pub explode_range: f32,
    pub time_dead:     f32,
    pub did_explode:   bool,
    pub target_point:  Vec2,
    pub spawn_delay:   f32,
}

impl Default for SuicideBrain {
    fn default() -> Self {
        Self {
            speed:         SUICIDE_SPEED,
            explode_range: SUICIDE_EXPLODE_RANGE,
            time_dead:     0.0,
            did_explode:   false,
            target_point:  Vec2::ZERO,
            spawn_delay:   0.0,
        }
    }
}

/// 木箱（壊すと中身を落とす）
#[derive(Clone, Debug)]
pub struct CrateState {
    pub health:         f32,
    pub max_health:     f32,
    pub hitbox_size:    (f32, f32),
    pub contents:       Vec<Entity>,
    /// 被弾ごとに 1 枚。crate 更新で板片パーティクルになる
    pub pending_planks: u32,
}

impl CrateState {
    pub fn new(contents: Vec<Entity>) -> Self {
        Self {
            health:         CRATE_MAX_HEALTH,
            max_health:     CRATE_MAX_HEALTH,
            hitbox_size:    CRATE_HITBOX_SIZE,
            contents,
            pending_planks: 0,
        }
    }

    /// 見た目の損傷段階 0..=2
    pub fn damage_stage(&self) -> u8 {
        if self.health <= 50.0 {
            2
        } else if self.health <= 100.0 {
            1
        } else {
            0
        }
    }

    pub fn broken(&self) -> bool {
        self.health <= 0.0
    }
}

#[derive(Clone, Debug)]
pub struct BulletState {
    pub damage:   f32,
    pub owner:    EntityId,
    pub age:      f32,
    pub lifetime: f32,
}

#[derive(Clone, Debug)]
pub enum EntityKind {
    Player(Humanoid),
    Zombie(Humanoid, ZombieBrain),
    SuicideZombie(Humanoid, SuicideBrain),
    Item(ItemState),
    Crate(CrateState),
    Bullet(BulletState),
}

#[derive(Clone, Debug)]
pub struct Entity {
    pub id:         EntityId,
    /// 左上がアンカー
    pub rect:       Rect,
    pub velocity:   Vec2,
    /// 向き（ラジアン）
    pub angle:      f32,
    pub dead:       bool,
    pub damageable: bool,
    pub outlined:   bool,
    pub kind:       EntityKind,
}

impl Entity {
    fn with_kind(id: EntityId, pos: Vec2, size: (f32, f32), damageable: bool, kind: EntityKind) -> Self {
        Self {
            id,
            rect: Rect::from_pos_size(pos, size),
            velocity: Vec2::ZERO,
            angle: 0.0,
            dead: false,
            damageable,
            outlined: false,
            kind,
        }
    }

    pub fn player(id: EntityId, pos: Vec2) -> Self {
        Self::with_kind(id, pos, PLAYER_SIZE, true, EntityKind::Player(Humanoid::new(PLAYER_MAX_HEALTH)))
    }

    pub fn zombie(id: EntityId, pos: Vec2) -> Self {
        Self::with_kind(
            id, pos, ZOMBIE_SIZE, true,
            EntityKind::Zombie(Humanoid::new(PLAYER_MAX_HEALTH), ZombieBrain::default()),
        )
    }

    pub fn suicide_zombie(id: EntityId, pos: Vec2) -> Self {
        Self::with_kind(
            id, pos, ZOMBIE_SIZE, true,
            EntityKind::SuicideZombie(Humanoid::new(PLAYER_MAX_HEALTH), SuicideBrain::default()),
        )
    }

    pub fn gun(id: EntityId, pos: Vec2, kind: GunKind) -> Self {
        Self::with_kind(id, pos, GUN_SIZE, false, EntityKind::Item(ItemState::gun(kind)))
    }

    pub fn medkit(id: EntityId, pos: Vec2) -> Self {
        Self::with_kind(id, pos, MEDKIT_SIZE, false, EntityKind::Item(ItemState::medkit()))
    }

    pub fn loot_crate(id: EntityId, pos: Vec2, contents: Vec<Entity>) -> Self {
        Self::with_kind(id, pos, CRATE_SIZE, true, EntityKind::Crate(CrateState::new(contents)))
    }

    /// `center` から `angle` 方向へ飛ぶ弾
    pub fn bullet(id: EntityId, center: Vec2, angle: f32, speed: f32, damage: f32, owner: EntityId) -> Self {
        let mut e = Self::with_kind(
            id, Vec2::ZERO, BULLET_SIZE, false,
            EntityKind::Bullet(BulletState { damage, owner, age: 0.0, lifetime: BULLET_LIFETIME }),
        );
        e.rect.set_center(center);
        e.velocity = vec_from_angle(angle) * speed;
        e.angle = angle;
        e
    }

    pub fn pos(&self) -> Vec2 { self.rect.pos() }
    pub fn center(&self) -> Vec2 { self.rect.center() }

    pub fn set_pos(&mut self, p: Vec2) {
        self.rect.x = p.x;
        self.rect.y = p.y;
    }

    pub fn tile_pos(&self, tile_size: f32) -> (i32, i32) {
        (
            (self.rect.x / tile_size).floor() as i32,
            (self.rect.y / tile_size).floor() as i32,
        )
    }

    pub fn tag(&self) -> EntityTag {
        match &self.kind {
            EntityKind::Player(_)           => EntityTag::Player,
            EntityKind::Zombie(..)          => EntityTag::Zombie,
            EntityKind::SuicideZombie(..)   => EntityTag::SuicideZombie,
            EntityKind::Item(_)             => EntityTag::Item,
            EntityKind::Crate(_)            => EntityTag::Crate,
            EntityKind::Bullet(_)           => EntityTag::Bullet,
        }
    }

    pub fn is_zombie(&self) -> bool {
        matches!(self.kind, EntityKind::Zombie(..) | EntityKind::SuicideZombie(..))
    }

    pub fn is_item(&self) -> bool {
        matches!(self.kind, EntityKind::Item(_))
    }

    pub fn item(&self) -> Option<&ItemState> {
        match &self.kind {
            EntityKind::Item(s) => Some(s),
            _ => None,
        }
    }

    pub fn item_mut(&mut self) -> Option<&mut ItemState> {
        match &mut self.kind {
            EntityKind::Item(s) => Some(s),
            _ => None,
        }
    }

    pub fn bullet_state(&self) -> Option<&BulletState> {
        match &self.kind {
            EntityKind::Bullet(b) => Some(b),
            _ => None,
        }
    }

    pub fn humanoid(&self) -> Option<&Humanoid> {
        match &self.kind {
            EntityKind::Player(h) | EntityKind::Zombie(h, _) | EntityKind::SuicideZombie(h, _) => Some(h),
            _ => None,
        }
    }

    pub fn humanoid_mut(&mut self) -> Option<&mut Humanoid> {
        match &mut self.kind {
            EntityKind::Player(h) | EntityKind::Zombie(h, _) | EntityKind::SuicideZombie(h, _) => Some(h),
            _ => None,
        }
    }

    /// 被弾判定用の箱。足元に揃えた `hitbox_size` の箱で、弾や爆発はこちらを見る
    pub fn hitbox(&self) -> Rect {
        let hs = match &self.kind {
            EntityKind::Player(h) | EntityKind::Zombie(h, _) | EntityKind::SuicideZombie(h, _) => h.hitbox_size,
            EntityKind::Crate(c) => c.hitbox_size,
            _ => return self.rect,
        };
        let r = &self.rect;
        Rect::new(r.x, r.y - hs.1 + r.h, r.w + r.w - hs.0, hs.1)
    }

    /// 血を流すか（木箱・アイテムは流さない）
    pub fn bleeds(&self) -> bool {
        self.humanoid().is_some()
    }

    pub fn health(&self) -> Option<f32> {
        match &self.kind {
            EntityKind::Crate(c) => Some(c.health),
            _ => self.humanoid().map(|h| h.health),
        }
    }

    /// ダメージを与える。死んでいるゾンビは無視する
    pub fn damage(&mut self, amount: f32, _direction: Vec2) {
        match &mut self.kind {
            EntityKind::Player(h) => {
                h.health -= amount;
                self.dead = h.health <= 0.0;
            }
            EntityKind::Zombie(h, _) | EntityKind::SuicideZombie(h, _) => {
                if self.dead {
                    return;
                }
                h.health -= amount;
                self.dead = h.health <= 0.0;
            }
            EntityKind::Crate(c) => {
                c.health -= amount;
                c.pending_planks += 1;
            }
            EntityKind::Item(_) | EntityKind::Bullet(_) => {}
        }
    }

    pub fn heal(&mut self, amount: f32) {
        if let Some(h) = self.humanoid_mut() {
            h.health += amount;
        }
    }

    /// ゾンビを即死させる（自爆時）
    pub fn kill(&mut self) {
        if let Some(h) = self.humanoid_mut() {
            h.health = 0.0;
        }
        self.dead = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> IdRegistry {
        IdRegistry::new()
    }

    #[test]
    fn registry_never_reuses_ids() {
        let mut r = ids();
        let a = r.next_id();
        let b = r.next_id();
        assert_ne!(a, b);
        assert_eq!(r.issued(), 2);
    }

    #[test]
    fn player_hitbox_is_foot_aligned() {
        let mut r = ids();
        let p = Entity::player(r.next_id(), Vec2::new(100.0, 100.0));
        let hb = p.hitbox();
        assert_eq!(hb.bottom(), p.rect.bottom());
        assert_eq!(hb.h, PLAYER_HITBOX_SIZE.1);
        assert_eq!(hb.w, PLAYER_SIZE.0 * 2.0 - PLAYER_HITBOX_SIZE.0);
    }

    #[test]
    fn player_dies_at_zero_health() {
        let mut r = ids();
        let mut p = Entity::player(r.next_id(), Vec2::ZERO);
        p.damage(150.0, Vec2::X);
        assert!(!p.dead);
        p.damage(50.0, Vec2::X);
        assert!(p.dead);
    }

    #[test]
    fn dead_zombie_ignores_damage() {
        let mut r = ids();
        let mut z = Entity::zombie(r.next_id(), Vec2::ZERO);
        z.kill();
        z.damage(10.0, Vec2::X);
        assert_eq!(z.health(), Some(0.0));
    }

    #[test]
    fn crate_damage_queues_planks_and_stages() {
        let mut r = ids();
        let mut c = Entity::loot_crate(r.next_id(), Vec2::ZERO, Vec::new());
        c.damage(60.0, Vec2::X);
        c.damage(60.0, Vec2::X);
        let EntityKind::Crate(state) = &c.kind else { panic!("not a crate") };
        assert_eq!(state.pending_planks, 2);
        assert_eq!(state.damage_stage(), 2);
        assert!(!state.broken());
        assert!(!c.dead);
    }

    #[test]
    fn drop_moves_index_back() {
        let mut r = ids();
        let owner = r.next_id();
        let mut h = Humanoid::new(100.0);
        for _ in 0..3 {
            h.pickup(owner, Entity::medkit(r.next_id(), Vec2::ZERO));
        }
        h.cycle_inventory(2);
        assert_eq!(h.inventory_idx, 2);
        let dropped = h.drop_held();
        assert!(dropped.is_some());
        assert_eq!(h.inventory_idx, 1);
        assert_eq!(dropped.and_then(|e| e.item().map(|s| s.owner)), Some(None));
        h.cycle_inventory(-3);
        assert_eq!(h.inventory_idx, 0);
    }

    #[test]
    fn bullet_is_centered_and_moving() {
        let mut r = ids();
        let owner = r.next_id();
        let b = Entity::bullet(r.next_id(), Vec2::new(10.0, 10.0), 0.0, 150.0, 15.0, owner);
        assert_eq!(b.center(), Vec2::new(10.0, 10.0));
        assert_eq!(b.velocity, Vec2::new(150.0, 0.0));
        assert_eq!(b.bullet_state().map(|s| s.owner), Some(owner));
    }
}
