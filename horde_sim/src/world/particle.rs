//! Path: horde_sim/src/world/particle.rs
//! Summary: パーティクル SoA（ParticleWorld）— 火花・血・木片

use horde_core::physics::rng::SimpleRng;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ParticleKind {
    Spark = 0,
    Blood = 1,
    Plank = 2,
}

impl ParticleKind {
    /// 速度の減衰（1 秒あたり）
    fn drag(self) -> f32 {
        match self {
            Self::Spark => 50.0,
            Self::Blood => 120.0,
            Self::Plank => 80.0,
        }
    }
}

/// パーティクル SoA（Structure of Arrays）
pub struct ParticleWorld {
    pub positions_x:  Vec<f32>,
    pub positions_y:  Vec<f32>,
    pub velocities_x: Vec<f32>,
    pub velocities_y: Vec<f32>,
    pub lifetime:     Vec<f32>,
    pub max_lifetime: Vec<f32>,
    pub kind:         Vec<ParticleKind>,
    /// 木片の種類など見た目の variant
    pub variant:      Vec<u8>,
    pub alive:        Vec<bool>,
    pub count:        usize,
    rng:              SimpleRng,
    /// 空きスロットのインデックススタック — O(1) でスロットを取得・返却
    free_list:        Vec<usize>,
}

impl ParticleWorld {
    pub fn new(seed: u64) -> Self {
        Self {
            positions_x:  Vec::new(),
            positions_y:  Vec::new(),
            velocities_x: Vec::new(),
            velocities_y: Vec::new(),
            lifetime:     Vec::new(),
            max_lifetime: Vec::new(),
            kind:         Vec::new(),
            variant:      Vec::new(),
            alive:        Vec::new(),
            count:        0,
            rng:          SimpleRng::new(seed),
            free_list:    Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.positions_x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[allow(clippy::too_many_arguments)]
    pub fn spawn_one(
        &mut self,
        x: f32, y: f32,
        vx: f32, vy: f32,
        lifetime: f32,
        kind: ParticleKind,
        variant: u8,
    ) {
        if let Some(i) = self.free_list.pop() {
            self.positions_x[i]  = x;
            self.positions_y[i]  = y;
            self.velocities_x[i] = vx;
            self.velocities_y[i] = vy;
            self.lifetime[i]     = lifetime;
            self.max_lifetime[i] = lifetime;
            self.kind[i]         = kind;
            self.variant[i]      = variant;
            self.alive[i]        = true;
        } else {
            self.positions_x.push(x);
            self.positions_y.push(y);
            self.velocities_x.push(vx);
            self.velocities_y.push(vy);
            self.lifetime.push(lifetime);
            self.max_lifetime.push(lifetime);
            self.kind.push(kind);
            self.variant.push(variant);
            self.alive.push(true);
        }
        self.count += 1;
    }

    /// `angle` を中心に ±`cone` ラジアンの扇状に飛ばす
    pub fn emit_cone(&mut self, x: f32, y: f32, count: usize, kind: ParticleKind, angle: f32, cone: f32) {
        for _ in 0..count {
            let a = angle + self.rng.gen_f32(-cone, cone);
            let speed = 30.0 + self.rng.next_f32() * 90.0;
            let lifetime = 0.2 + self.rng.next_f32() * 0.4;
            self.spawn_one(x, y, a.cos() * speed, a.sin() * speed, lifetime, kind, 0);
        }
    }

    /// 全方向に飛ばす
    pub fn emit(&mut self, x: f32, y: f32, count: usize, kind: ParticleKind) {
        self.emit_cone(x, y, count, kind, 0.0, std::f32::consts::PI);
    }

    /// 木箱の木片。variant 0..=2 をランダムに選ぶ
    pub fn emit_planks(&mut self, x: f32, y: f32, count: usize) {
        for _ in 0..count {
            let vx = self.rng.gen_f32(-8.0, 8.0) * std::f32::consts::PI * self.rng.gen_f32(0.0, 2.0);
            let vy = self.rng.gen_f32(-8.0, 8.0) * std::f32::consts::PI * self.rng.gen_f32(0.0, 2.0);
            let variant = self.rng.gen_range_inclusive(0, 2) as u8;
            self.spawn_one(x, y, vx, vy, 1.0, ParticleKind::Plank, variant);
        }
    }

    pub fn kill(&mut self, i: usize) {
        if self.alive[i] {
            self.alive[i] = false;
            self.count = self.count.saturating_sub(1);
            self.free_list.push(i);
        }
    }

    /// 移動 → 速度を drag で減衰 → 寿命切れか停止したら消す
    pub fn update(&mut self, dt: f32) {
        for i in 0..self.len() {
            if !self.alive[i] {
                continue;
            }
            self.positions_x[i] += self.velocities_x[i] * dt;
            self.positions_y[i] += self.velocities_y[i] * dt;
            let (vx, vy) = (self.velocities_x[i], self.velocities_y[i]);
            let speed = (vx * vx + vy * vy).sqrt();
            let slowed = (speed - self.kind[i].drag() * dt).max(0.0);
            if speed > 0.0 {
                self.velocities_x[i] = vx / speed * slowed;
                self.velocities_y[i] = vy / speed * slowed;
            }
            self.lifetime[i] -= dt;
            if self.lifetime[i] <= 0.0 || (self.kind[i] == ParticleKind::Spark && slowed <= 0.0) {
                self.kill(i);
            }
        }
    }

    pub fn count_of(&self, kind: ParticleKind) -> usize {
        (0..self.len()).filter(|&i| self.alive[i] && self.kind[i] == kind).count()
    }
}
