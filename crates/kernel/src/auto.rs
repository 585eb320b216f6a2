use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Constant per-axis Euler increments applied every frame, radians per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoRotationSpeeds(Vec3);

impl AutoRotationSpeeds {
    pub fn new(speeds: Vec3) -> Self {
        Self(speeds)
    }

    pub fn zero() -> Self {
        Self(Vec3::ZERO)
    }

    /// Draw each axis uniformly from `[-base, base)`.
    pub fn random<R: Rng + ?Sized>(base: f32, rng: &mut R) -> Self {
        let mut axis = || (rng.random::<f32>() * 2.0 - 1.0) * base;
        Self(Vec3::new(axis(), axis(), axis()))
    }

    /// Reproducible draw for scripted runs and tests.
    pub fn from_seed(base: f32, seed: u64) -> Self {
        Self::random(base, &mut StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(base: f32) -> Self {
        Self::random(base, &mut rand::rng())
    }

    pub fn get(&self) -> Vec3 {
        self.0
    }
}

impl Default for AutoRotationSpeeds {
    fn default() -> Self {
        Self::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speeds_stay_within_base() {
        for seed in 0..64 {
            let s = AutoRotationSpeeds::from_seed(0.003, seed).get();
            assert!(s.abs().max_element() <= 0.003, "seed {seed}: {s:?}");
        }
    }

    #[test]
    fn same_seed_same_speeds() {
        assert_eq!(
            AutoRotationSpeeds::from_seed(0.003, 42),
            AutoRotationSpeeds::from_seed(0.003, 42)
        );
    }

    #[test]
    fn zero_base_means_no_motion() {
        assert_eq!(AutoRotationSpeeds::from_entropy(0.0).get(), Vec3::ZERO);
    }
}
