//! Timing for the blob animation: the blob morphs between two random seeds
//! over a fixed-length stage, then starts a new stage from where it ended.

pub const STAGE_DURATION_MS: f64 = 10_000.0;
pub const SEED_LEN: usize = 8;

pub type Seed = [f32; SEED_LEN];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stage {
    start_ms: f64,
    duration_ms: f64,
}

impl Stage {
    pub fn new(start_ms: f64, duration_ms: f64) -> Self {
        Stage {
            start_ms,
            duration_ms: duration_ms.max(1.0),
        }
    }

    /// Fraction of the stage elapsed at `now_ms`, clamped to [0, 1].
    pub fn progress(&self, now_ms: f64) -> f32 {
        ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0) as f32
    }

    pub fn is_finished(&self, now_ms: f64) -> bool {
        now_ms - self.start_ms > self.duration_ms
    }
}

/// Cubic ease-in-out.
pub fn ease(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

pub fn mix(a: &Seed, b: &Seed, t: f32) -> Seed {
    let mut out = [0.0; SEED_LEN];
    for (o, (x, y)) in out.iter_mut().zip(a.iter().zip(b)) {
        *o = x * (1.0 - t) + y * t;
    }
    out
}

/// Fills a seed with values in [-1, 1) from `rng`, which yields [0, 1).
pub fn random_seed(mut rng: impl FnMut() -> f64) -> Seed {
    let mut seed = [0.0; SEED_LEN];
    for s in seed.iter_mut() {
        *s = (rng() * 2.0 - 1.0) as f32;
    }
    seed
}

#[derive(Debug)]
pub struct SeedMorph {
    stage: Stage,
    from: Seed,
    to: Seed,
}

impl SeedMorph {
    pub fn new(now_ms: f64, mut rng: impl FnMut() -> f64) -> Self {
        let from = random_seed(&mut rng);
        let to = random_seed(&mut rng);
        SeedMorph {
            stage: Stage::new(now_ms, STAGE_DURATION_MS),
            from,
            to,
        }
    }

    /// Starts a new stage once the current one has run out. Returns whether
    /// a new stage began.
    pub fn advance(&mut self, now_ms: f64, rng: impl FnMut() -> f64) -> bool {
        if !self.stage.is_finished(now_ms) {
            return false;
        }
        self.from = self.to;
        self.to = random_seed(rng);
        self.stage = Stage::new(now_ms, STAGE_DURATION_MS);
        true
    }

    pub fn current(&self, now_ms: f64) -> Seed {
        mix(&self.from, &self.to, ease(self.stage.progress(now_ms)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter() -> impl FnMut() -> f64 {
        let mut i = 0.0;
        move || {
            i += 0.1;
            i % 1.0
        }
    }

    #[test]
    fn test_stage_progress() {
        let stage = Stage::new(1000.0, 10_000.0);
        assert_eq!(stage.progress(0.0), 0.0);
        assert_eq!(stage.progress(6000.0), 0.5);
        assert_eq!(stage.progress(50_000.0), 1.0);
        assert!(!stage.is_finished(11_000.0));
        assert!(stage.is_finished(11_001.0));
    }

    #[test]
    fn test_ease() {
        assert_eq!(ease(0.0), 0.0);
        assert_eq!(ease(1.0), 1.0);
        assert_eq!(ease(0.5), 0.5);
        let mut last = 0.0;
        for i in 1..=100 {
            let v = ease(i as f32 / 100.0);
            assert!(v >= last);
            last = v;
        }
    }

    #[test]
    fn test_random_seed_range() {
        let seed = random_seed(counter());
        assert!(seed.iter().all(|s| (-1.0..1.0).contains(s)));
        assert_eq!(random_seed(|| 0.0), [-1.0; SEED_LEN]);
    }

    #[test]
    fn test_morph_is_continuous_across_stages() {
        let mut morph = SeedMorph::new(0.0, counter());
        let end = morph.current(STAGE_DURATION_MS);

        assert!(!morph.advance(STAGE_DURATION_MS, counter()));
        assert!(morph.advance(STAGE_DURATION_MS + 1.0, || 0.5));

        // The new stage starts where the previous one ended.
        assert_eq!(morph.current(STAGE_DURATION_MS + 1.0), end);
        assert_eq!(morph.current(3.0 * STAGE_DURATION_MS), [0.0; SEED_LEN]);
    }
}
