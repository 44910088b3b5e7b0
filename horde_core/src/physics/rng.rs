//! Path: horde_core/src/physics/rng.rs
//! Summary: 決定論的 LCG 乱数ジェネレータ（草の生成・木箱の中身・パーティクル用）

#[derive(Clone, Debug)]
pub struct SimpleRng(u64);

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// タイル座標から決まるシード。同じタイルは常に同じ草を生やす
    pub fn for_tile(tx: i32, ty: i32) -> Self {
        let seed = ((tx as u32 as u64) << 32) | (ty as u32 as u64);
        let mut rng = Self(seed ^ 0x9E37_79B9_7F4A_7C15);
        // 近いシード同士の相関を崩す
        rng.next_u32();
        rng
    }

    pub fn next_u32(&mut self) -> u32 {
        self.0 = self.0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 32) as u32
    }

    /// [0, 1) の一様浮動小数（上位 24 bit を使う）
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// [lo, hi] の一様乱数（両端含む）
    pub fn gen_range_inclusive(&mut self, lo: i32, hi: i32) -> i32 {
        let span = (hi - lo + 1).max(1) as u32;
        lo + (self.next_u32() % span) as i32
    }

    /// [lo, hi) の一様浮動小数
    pub fn gen_f32(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.next_f32() * (hi - lo)
    }

    pub fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        items.get(self.next_u32() as usize % items.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_reproducibility() {
        let mut rng = SimpleRng::new(12345);
        let a: Vec<u32> = (0..10).map(|_| rng.next_u32()).collect();
        let mut rng2 = SimpleRng::new(12345);
        let b: Vec<u32> = (0..10).map(|_| rng2.next_u32()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn next_f32_in_range() {
        let mut rng = SimpleRng::new(999);
        for _ in 0..100 {
            let f = rng.next_f32();
            assert!((0.0..1.0).contains(&f));
        }
    }

    #[test]
    fn next_f32_covers_the_whole_unit_interval() {
        let mut rng = SimpleRng::new(31337);
        let draws: Vec<f32> = (0..10_000).map(|_| rng.next_f32()).collect();
        assert!(draws.iter().any(|&f| f > 0.9));
        assert!(draws.iter().any(|&f| f < 0.1));
        let mean = draws.iter().sum::<f32>() / draws.len() as f32;
        assert!((mean - 0.5).abs() < 0.02, "mean {mean}");
    }

    #[test]
    fn chance_tracks_probability() {
        let mut rng = SimpleRng::new(77);
        for p in [0.1_f32, 3.0 / 9.0, 0.75] {
            let n = 20_000;
            let hits = (0..n).filter(|_| rng.chance(p)).count();
            let rate = hits as f32 / n as f32;
            assert!((rate - p).abs() < 0.02, "p={p} rate={rate}");
        }
    }

    #[test]
    fn gen_f32_spans_both_signs() {
        let mut rng = SimpleRng::new(5);
        let draws: Vec<f32> = (0..1_000).map(|_| rng.gen_f32(-150.0, 150.0)).collect();
        assert!(draws.iter().all(|&v| (-150.0..150.0).contains(&v)));
        assert!(draws.iter().any(|&v| v > 100.0));
        assert!(draws.iter().any(|&v| v < -100.0));
    }

    #[test]
    fn gen_range_inclusive_hits_both_ends() {
        let mut rng = SimpleRng::new(7);
        let rolls: Vec<i32> = (0..500).map(|_| rng.gen_range_inclusive(1, 4)).collect();
        assert!(rolls.iter().all(|&r| (1..=4).contains(&r)));
        assert!(rolls.contains(&1));
        assert!(rolls.contains(&4));
    }

    #[test]
    fn tile_seed_is_stable() {
        let a = SimpleRng::for_tile(-3, 8).next_u32();
        let b = SimpleRng::for_tile(-3, 8).next_u32();
        let c = SimpleRng::for_tile(8, -3).next_u32();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
