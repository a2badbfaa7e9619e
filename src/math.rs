//! Small numeric helpers used by sketches and widgets
//!
//! Named after the drawing-engine conventions (`map`, `constrain`, `dist`)
//! so game code reads the same as it would there.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Re-map a value from one range to another (no clamping)
pub fn map_range(value: f32, start1: f32, stop1: f32, start2: f32, stop2: f32) -> f32 {
    if (stop1 - start1).abs() < f32::EPSILON {
        return start2;
    }
    start2 + (stop2 - start2) * ((value - start1) / (stop1 - start1))
}

/// Clamp that tolerates inverted bounds
pub fn constrain(value: f32, low: f32, high: f32) -> f32 {
    let (lo, hi) = if low <= high { (low, high) } else { (high, low) };
    value.clamp(lo, hi)
}

/// Normalize a value into 0..1 relative to [start, stop], clamped
pub fn norm(value: f32, start: f32, stop: f32) -> f32 {
    constrain(map_range(value, start, stop, 0.0, 1.0), 0.0, 1.0)
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

pub fn dist(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    ((x2 - x1).powi(2) + (y2 - y1).powi(2)).sqrt()
}

/// Snap a value to the nearest multiple of `step` measured from `origin`
pub fn snap_to_step(value: f32, origin: f32, step: f32) -> f32 {
    if step <= 0.0 {
        return value;
    }
    origin + ((value - origin) / step).round() * step
}

/// Seedable random source for deterministic simulations
pub struct Random {
    rng: StdRng,
}

impl Random {
    pub fn new() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    /// Uniform value in [low, high); returns `low` for an empty range
    pub fn range(&mut self, low: f32, high: f32) -> f32 {
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..high)
    }

    /// Uniform value in [0, high)
    pub fn below(&mut self, high: f32) -> f32 {
        self.range(0.0, high)
    }

    pub fn int_range(&mut self, low: i32, high: i32) -> i32 {
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..high)
    }

    pub fn chance(&mut self, probability: f32) -> bool {
        self.rng.gen::<f32>() < probability
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_range() {
        assert!((map_range(5.0, 0.0, 10.0, 0.0, 100.0) - 50.0).abs() < 1e-5);
        assert!((map_range(0.0, 0.0, 10.0, 100.0, 200.0) - 100.0).abs() < 1e-5);
        // degenerate input range
        assert_eq!(map_range(3.0, 1.0, 1.0, 7.0, 9.0), 7.0);
    }

    #[test]
    fn test_constrain_inverted_bounds() {
        assert_eq!(constrain(15.0, 10.0, 0.0), 10.0);
        assert_eq!(constrain(-1.0, 0.0, 10.0), 0.0);
    }

    #[test]
    fn test_snap_to_step() {
        assert!((snap_to_step(7.4, 0.0, 5.0) - 5.0).abs() < 1e-5);
        assert!((snap_to_step(7.6, 0.0, 5.0) - 10.0).abs() < 1e-5);
        assert_eq!(snap_to_step(7.6, 0.0, 0.0), 7.6);
    }

    #[test]
    fn test_seeded_random_is_deterministic() {
        let mut a = Random::with_seed(42);
        let mut b = Random::with_seed(42);
        for _ in 0..10 {
            let x = a.range(-5.0, 5.0);
            assert_eq!(x, b.range(-5.0, 5.0));
            assert!((-5.0..5.0).contains(&x));
        }
        assert_eq!(a.range(3.0, 3.0), 3.0);
    }
}
