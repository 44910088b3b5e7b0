//! Path: horde_core/src/item.rs
//! Summary: 拾えるアイテム（銃・救急キット）の状態と使用処理

use crate::constants::{MEDKIT_HEAL, MEDKIT_USES};
use crate::entity::EntityId;
use crate::entity_params::{GunKind, GunParams};
use crate::timer::Cooldown;

/// 1 発分の弾の発射指示（角度は照準角からのオフセット込み）
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shot {
    pub angle:  f32,
    pub speed:  f32,
    pub damage: f32,
}

/// 使用結果
#[derive(Clone, Debug, PartialEq)]
pub enum ItemUse {
    None,
    Fired(Vec<Shot>),
    Healed(f32),
}

#[derive(Clone, Debug)]
pub struct GunState {
    pub kind:  GunKind,
    pub ammo:  u32,
    shoot_cd:  Cooldown,
    reload_cd: Cooldown,
}

impl GunState {
    pub fn new(kind: GunKind) -> Self {
        let p = GunParams::get(kind);
        Self {
            kind,
            ammo:      p.ammo,
            shoot_cd:  Cooldown::start_on_end(p.firerate),
            reload_cd: Cooldown::start_on_end(p.reload_time),
        }
    }

    pub fn params(&self) -> &'static GunParams {
        GunParams::get(self.kind)
    }

    pub fn is_full(&self) -> bool {
        self.ammo == self.params().ammo
    }

    pub fn is_reloading(&self) -> bool {
        self.reload_cd.running()
    }

    pub fn tick(&mut self, dt: f32) {
        self.shoot_cd.tick(dt);
        self.reload_cd.tick(dt);
    }

    /// 発射間隔・リロード・残弾がすべて揃っていれば撃つ
    fn fire(&mut self, aim: f32) -> Vec<Shot> {
        if !(self.shoot_cd.ended() && self.ammo > 0 && self.reload_cd.ended()) {
            return Vec::new();
        }
        let p = self.params();
        let shots = p
            .spread_offsets()
            .into_iter()
            .map(|off| Shot { angle: aim + off, speed: p.bullet_speed, damage: p.damage })
            .collect();
        self.shoot_cd.start();
        self.ammo -= 1;
        shots
    }

    /// 装備中の銃を 1 フレーム分操作する。
    /// 空撃ちはリロードを開始する（ただしリロードが終わった直後のフレームは除く）
    pub fn operate(&mut self, aim: f32, shoot: bool, reload: bool) -> Vec<Shot> {
        let mut shots = Vec::new();
        if reload || (self.ammo == 0 && shoot && !self.reload_cd.just_ended()) {
            self.reload_cd.start();
        } else if shoot {
            shots = self.fire(aim);
        }
        if self.reload_cd.just_ended() {
            self.ammo = self.params().ammo;
        }
        shots
    }
}

#[derive(Clone, Debug)]
pub enum ItemKind {
    Gun(GunState),
    Medkit { uses: u32 },
}

#[derive(Clone, Debug)]
pub struct ItemState {
    pub kind:  ItemKind,
    /// 所持者（地面に落ちていれば None）
    pub owner: Option<EntityId>,
}

impl ItemState {
    pub fn gun(kind: GunKind) -> Self {
        Self { kind: ItemKind::Gun(GunState::new(kind)), owner: None }
    }

    pub fn medkit() -> Self {
        Self { kind: ItemKind::Medkit { uses: MEDKIT_USES }, owner: None }
    }

    pub fn is_gun(&self) -> bool {
        matches!(self.kind, ItemKind::Gun(_))
    }

    pub fn gun_mut(&mut self) -> Option<&mut GunState> {
        match &mut self.kind {
            ItemKind::Gun(g) => Some(g),
            ItemKind::Medkit { .. } => None,
        }
    }

    pub fn gun_ref(&self) -> Option<&GunState> {
        match &self.kind {
            ItemKind::Gun(g) => Some(g),
            ItemKind::Medkit { .. } => None,
        }
    }

    pub fn tick(&mut self, dt: f32) {
        if let ItemKind::Gun(g) = &mut self.kind {
            g.tick(dt);
        }
    }

    /// 使い切った消耗品
    pub fn is_spent(&self) -> bool {
        matches!(self.kind, ItemKind::Medkit { uses: 0 })
    }

    pub fn operate(&mut self, aim: f32, shoot: bool, reload: bool) -> ItemUse {
        match &mut self.kind {
            ItemKind::Gun(g) => {
                let shots = g.operate(aim, shoot, reload);
                if shots.is_empty() { ItemUse::None } else { ItemUse::Fired(shots) }
            }
            ItemKind::Medkit { uses } => {
                if shoot && *uses > 0 {
                    *uses -= 1;
                    ItemUse::Healed(MEDKIT_HEAL)
                } else {
                    ItemUse::None
                }
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match &self.kind {
            ItemKind::Gun(g) => g.params().name,
            ItemKind::Medkit { .. } => "Medkit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pistol_empties_then_reloads() {
        let mut g = GunState::new(GunKind::Pistol);
        // 生成直後はリロード直後扱いなので満タン
        let mut fired = 0;
        for _ in 0..200 {
            g.tick(0.5);
            if !g.operate(0.0, true, false).is_empty() {
                fired += 1;
            }
            if g.ammo == 0 {
                break;
            }
        }
        assert_eq!(fired, 6);
        assert_eq!(g.ammo, 0);

        // 空撃ちでリロード開始
        g.tick(0.5);
        assert!(g.operate(0.0, true, false).is_empty());
        assert!(g.is_reloading());
        g.tick(1.0);
        g.tick(1.0);
        g.operate(0.0, false, false);
        assert!(g.is_full());
    }

    #[test]
    fn firerate_gates_consecutive_shots() {
        let mut g = GunState::new(GunKind::Rifle);
        g.tick(0.0);
        assert_eq!(g.operate(1.0, true, false).len(), 1);
        g.tick(0.05);
        assert!(g.operate(1.0, true, false).is_empty());
        g.tick(0.2);
        let shots = g.operate(1.0, true, false);
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].angle, 1.0);
        assert_eq!(g.ammo, 29);
    }

    #[test]
    fn shotgun_fans_eleven_pellets() {
        let mut g = GunState::new(GunKind::Shotgun);
        let shots = g.operate(0.5, true, false);
        assert_eq!(shots.len(), 11);
        assert!(shots.iter().all(|s| s.damage == 9.0));
    }

    #[test]
    fn medkit_heals_once() {
        let mut m = ItemState::medkit();
        assert_eq!(m.operate(0.0, false, false), ItemUse::None);
        assert_eq!(m.operate(0.0, true, false), ItemUse::Healed(50.0));
        assert!(m.is_spent());
        assert_eq!(m.operate(0.0, true, false), ItemUse::None);
    }
}
