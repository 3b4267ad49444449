//! Celebration petal field
//!
//! Decorative only: a batch of petals with randomized size, color, start
//! column and drift, falling on looping CSS animations. The batch is built
//! here from a seeded RNG so the shell stays a dumb renderer and tests can
//! pin the numbers down.

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::Viewport;

/// Petal fill colors, picked uniformly
pub const PETAL_COLORS: [&str; 4] = ["#fe4646", "#ff6d7e", "#fda4af", "#ffbafa"];

/// Spawn parameters for one petal. Width is `size`; height is squashed to
/// 0.8x for the petal shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Petal {
    /// Width in px (10 - 25)
    pub size: f32,
    /// Index into [`PETAL_COLORS`]
    pub color: usize,
    /// Starting x position (px from viewport left)
    pub start_x: f32,
    /// Horizontal drift over one fall (-200 - 200 px)
    pub drift_x: f32,
    /// Total rotation over one fall (0 - 720 degrees)
    pub rotation_deg: f32,
    /// One fall, top to bottom (4 - 8 s)
    pub fall_secs: f32,
    /// Delay before the first fall (0 - 3 s)
    pub delay_secs: f32,
}

/// Build a petal batch for the given viewport
pub fn spawn_field(seed: u64, count: usize, viewport: Viewport) -> Vec<Petal> {
    let mut rng = Pcg32::seed_from_u64(seed);
    (0..count)
        .map(|_| Petal {
            size: rng.random_range(10.0..25.0),
            color: rng.random_range(0..PETAL_COLORS.len()),
            start_x: rng.random_range(0.0..viewport.width),
            drift_x: rng.random_range(-200.0..200.0),
            rotation_deg: rng.random_range(0.0..720.0),
            fall_secs: rng.random_range(4.0..8.0),
            delay_secs: rng.random_range(0.0..3.0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Viewport = Viewport {
        width: 1280.0,
        height: 800.0,
    };

    #[test]
    fn test_field_size_and_ranges() {
        let petals = spawn_field(7, 60, VIEW);
        assert_eq!(petals.len(), 60);
        for petal in &petals {
            assert!((10.0..25.0).contains(&petal.size));
            assert!(petal.color < PETAL_COLORS.len());
            assert!((0.0..VIEW.width).contains(&petal.start_x));
            assert!((-200.0..200.0).contains(&petal.drift_x));
            assert!((4.0..8.0).contains(&petal.fall_secs));
            assert!((0.0..3.0).contains(&petal.delay_secs));
        }
    }

    #[test]
    fn test_same_seed_same_field() {
        assert_eq!(spawn_field(42, 60, VIEW), spawn_field(42, 60, VIEW));
    }

    #[test]
    fn test_different_seeds_differ() {
        assert_ne!(spawn_field(1, 60, VIEW), spawn_field(2, 60, VIEW));
    }
}
