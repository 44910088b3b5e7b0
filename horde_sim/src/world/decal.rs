//! Path: horde_sim/src/world/decal.rs
//! Summary: 地面に残る跡（血痕・死体跡）。経過時間だけを持つ

use glam::Vec2;

/// 保持する最大数。超えたら古いものから捨てる
pub const MAX_DECALS: usize = 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecalKind {
    Blood,
    Corpse,
}

#[derive(Clone, Debug)]
pub struct Decal {
    pub pos:   Vec2,
    pub kind:  DecalKind,
    pub angle: f32,
    pub age:   f32,
}

#[derive(Default)]
pub struct DecalWorld {
    decals: Vec<Decal>,
}

impl DecalWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, pos: Vec2, kind: DecalKind, angle: f32) {
        if self.decals.len() >= MAX_DECALS {
            self.decals.remove(0);
        }
        self.decals.push(Decal { pos, kind, angle, age: 0.0 });
    }

    pub fn update(&mut self, dt: f32) {
        for d in &mut self.decals {
            d.age += dt;
        }
    }

    pub fn len(&self) -> usize {
        self.decals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Decal> {
        self.decals.iter()
    }
}
