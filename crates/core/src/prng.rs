//! Seedable Xorshift64 generator used to spawn nodes.
//!
//! The browser host seeds it from the clock so every page load looks
//! different; the CLI and tests seed it explicitly so frames are reproducible.

/// Xorshift64 PRNG with shifts (13, 7, 17).
///
/// A seed of 0 is replaced with a non-zero fallback, since zero is a fixed
/// point of the algorithm.
#[derive(Debug, Clone)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;
    /// 2^-53: maps the top 53 bits of a draw onto [0, 1).
    const UNIT_SCALE: f64 = 1.0 / 9_007_199_254_740_992.0;

    pub fn new(seed: u64) -> Self {
        let state = match seed {
            0 => Self::FALLBACK_SEED,
            s => s,
        };
        Self { state }
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform f64 in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * Self::UNIT_SCALE
    }

    /// Uniform f64 in [-span/2, span/2), i.e. `(u - 0.5) * span`.
    ///
    /// Node velocities are drawn this way so drift is symmetric around zero.
    pub fn next_centered(&mut self, span: f64) -> f64 {
        (self.next_f64() - 0.5) * span
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_42_first_draw() {
        // Scene files with seed 42 reproduce only while this holds.
        assert_eq!(Xorshift64::new(42).next_u64(), 45_454_805_674);
    }

    #[test]
    fn seed_zero_does_not_stall() {
        let mut rng = Xorshift64::new(0);
        assert_ne!(rng.next_u64(), 0);
        assert_ne!(rng.next_u64(), 0);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Xorshift64::new(7);
        let mut b = Xorshift64::new(7);
        for i in 0..500 {
            assert_eq!(a.next_u64(), b.next_u64(), "diverged at {i}");
        }
    }

    #[test]
    fn next_centered_is_symmetric_and_bounded() {
        let mut rng = Xorshift64::new(2024);
        let mut sum = 0.0;
        for _ in 0..20_000 {
            let v = rng.next_centered(0.3);
            assert!((-0.15..0.15).contains(&v), "{v} outside [-0.15, 0.15)");
            sum += v;
        }
        let mean = sum / 20_000.0;
        assert!(mean.abs() < 0.01, "mean drift {mean} too large");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn next_f64_in_unit_interval_for_any_seed(seed: u64) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let v = rng.next_f64();
                    prop_assert!((0.0..1.0).contains(&v));
                }
            }
        }
    }
}
