//! Random choices made while printing: the paper color and the tilt a note
//! lands with. Any [`rand::Rng`] works, so tests pass a seeded `StdRng`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::note::{Color, PALETTE};

pub trait RandomSource {
    /// One of the nine palette colors, uniformly.
    fn pick_color(&mut self) -> Color;

    /// Tilt in degrees, uniform in `[-max, max)`.
    fn rotation(&mut self, max: f32) -> f32;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn pick_color(&mut self) -> Color {
        PALETTE[self.random_range(0..PALETTE.len())]
    }

    fn rotation(&mut self, max: f32) -> f32 {
        if max <= 0.0 {
            return 0.0;
        }
        self.random_range(-max..max)
    }
}

/// Deterministic source for tests and reproducible sessions.
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Source seeded from the operating system.
pub fn from_os() -> StdRng {
    StdRng::from_os_rng()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colors_come_from_palette() {
        let mut rng = seeded(1);
        for _ in 0..100 {
            assert!(PALETTE.contains(&rng.pick_color()));
        }
    }

    #[test]
    fn test_rotation_range() {
        let mut rng = seeded(2);
        for _ in 0..100 {
            let r = rng.rotation(1.5);
            assert!((-1.5..1.5).contains(&r), "rotation {} out of range", r);
        }
    }

    #[test]
    fn test_zero_rotation() {
        let mut rng = seeded(3);
        assert_eq!(rng.rotation(0.0), 0.0);
    }

    #[test]
    fn test_seed_is_reproducible() {
        let mut a = seeded(42);
        let mut b = seeded(42);
        for _ in 0..10 {
            assert_eq!(a.pick_color(), b.pick_color());
            assert_eq!(a.rotation(1.5), b.rotation(1.5));
        }
    }
}
