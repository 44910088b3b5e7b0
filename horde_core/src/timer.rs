//! Path: horde_core/src/timer.rs
//! Summary: dt 駆動のクールダウンタイマー（発射間隔・リロード用）

/// 経過時間を dt で積算するタイマー。
/// `ended` は停止中、`just_ended` は直前の `tick` で終了したことを表す。
#[derive(Clone, Debug)]
pub struct Cooldown {
    pub duration: f32,
    elapsed:      f32,
    running:      bool,
    ended:        bool,
    just_ended:   bool,
}

impl Cooldown {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            elapsed:    0.0,
            running:    false,
            ended:      false,
            just_ended: false,
        }
    }

    /// 生成直後から「終了済み・直前に終了」扱い
    pub fn start_on_end(duration: f32) -> Self {
        Self {
            ended:      true,
            just_ended: true,
            ..Self::new(duration)
        }
    }

    /// フレーム先頭で 1 回呼ぶ。dt = 0 なら進まない
    pub fn tick(&mut self, dt: f32) {
        self.just_ended = false;
        if !self.running {
            return;
        }
        self.elapsed += dt;
        if self.elapsed >= self.duration {
            self.running    = false;
            self.ended      = true;
            self.just_ended = true;
        }
    }

    /// 動作中なら何もしない
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.elapsed = 0.0;
        self.ended   = false;
    }

    pub fn ended(&self) -> bool { self.ended }
    pub fn just_ended(&self) -> bool { self.just_ended }
    pub fn running(&self) -> bool { self.running }

    pub fn remaining(&self) -> f32 {
        if self.running { (self.duration - self.elapsed).max(0.0) } else { 0.0 }
    }
}
