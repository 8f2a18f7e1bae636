use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

/// Random source owned by a single player.
#[derive(Debug, Clone)]
pub struct PlayerRng {
    rng: XorShiftRng,
}

impl PlayerRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let rng = SeedableRng::seed_from_u64(seed);
        Self { rng }
    }

    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: XorShiftRng::from_entropy(),
        }
    }

    pub fn select_random<T: Copy>(&mut self, elts: &[T]) -> Option<T> {
        elts.choose(&mut self.rng).copied()
    }

    pub fn shuffle<T>(&mut self, elts: &mut [T]) {
        elts.shuffle(&mut self.rng);
    }

    /// True with probability `epsilon`.
    pub fn explore(&mut self, epsilon: f64) -> bool {
        self.rng.gen::<f64>() < epsilon
    }
}

impl Default for PlayerRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
