//! Path: horde_sim/src/world/game_loop_control.rs
//! Summary: ループ状態（進行中・敗北・勝利）。終了後は dt を 0 に固定する

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Running,
    Lost,
    Won,
}

impl LoopState {
    pub fn is_over(self) -> bool {
        !matches!(self, Self::Running)
    }

    /// 敗北・勝利中はタイマーもパーティクルも止める
    pub fn effective_dt(self, dt: f32) -> f32 {
        if self.is_over() { 0.0 } else { dt }
    }
}
