// Seedable random draw source for grammar generation.
//
// The grammar engine never reaches for an ambient generator: every caller hands
// it a draw capability explicitly. `KulittaRng` is the stock capability used
// by the CLI and by tests that want "random but replayable" draws. It is
// xoshiro256++ (Blackman & Vigna, 2019) with SplitMix64 seeding, hand-rolled so
// that a seed produces the same progression on every platform.
//
// `kulitta_ptgg::draw` implements the engine's `Draw` trait for this type, so
// this crate stays free of any dependency on the engine.
//
// Determinism: the integer core must not depend on platform floating-point
// behavior. Only `next_f64` converts to a float, and it does so exactly (53
// bits into the mantissa).

use serde::{Deserialize, Serialize};

/// Xoshiro256++ PRNG used as the default draw source for generation runs.
///
/// The state is serializable, so a run can be checkpointed mid-way and the
/// remaining draws replayed later.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KulittaRng {
    s: [u64; 4],
}

impl KulittaRng {
    /// Create a generator from a `u64` seed, expanded to 256 bits of state by
    /// SplitMix64. Equal seeds give equal streams.
    pub fn new(seed: u64) -> Self {
        let mut sm = seed;
        Self {
            s: [
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
            ],
        }
    }

    /// Generate the next `u64` in the sequence.
    pub fn next_u64(&mut self) -> u64 {
        let result = (self.s[0].wrapping_add(self.s[3]))
            .rotate_left(23)
            .wrapping_add(self.s[0]);

        let t = self.s[1] << 17;

        self.s[2] ^= self.s[0];
        self.s[3] ^= self.s[1];
        self.s[1] ^= self.s[2];
        self.s[0] ^= self.s[3];

        self.s[2] ^= t;
        self.s[3] = self.s[3].rotate_left(45);

        result
    }

    /// Generate a uniform `f64` in [0, 1).
    ///
    /// The upper 53 bits fill the mantissa, so every value is exactly
    /// representable and 1.0 is never returned. Rule selection relies on the
    /// half-open range.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Generate a uniform `f64` in `[low, high)`.
    ///
    /// Panics if `low >= high`.
    pub fn range_f64(&mut self, low: f64, high: f64) -> f64 {
        assert!(low < high, "range_f64: low must be less than high");
        low + self.next_f64() * (high - low)
    }
}

/// SplitMix64 step, used only to expand a seed into xoshiro state.
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
