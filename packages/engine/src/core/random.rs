//! Random sources
//!
//! Classification (upward chance) and the upward diagonal tie-break draw from a
//! `RandomSource` that is injected into the simulation, so tests can pin the
//! outcome. The default is the same xorshift32 generator the engine has always
//! used for cheap per-cell randomness.

/// Seedable source of randomness used by the classifier and physics
pub trait RandomSource {
    fn next_u32(&mut self) -> u32;

    /// Uniform float in [0, 1)
    #[inline]
    fn next_f32(&mut self) -> f32 {
        // 24 high bits fit the f32 mantissa exactly
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// -1 or +1 with equal probability
    #[inline]
    fn next_sign(&mut self) -> i32 {
        if self.next_u32() & 1 == 0 { -1 } else { 1 }
    }
}

/// Random number generator (xorshift32)
#[inline]
pub fn xorshift32(state: &mut u32) -> u32 {
    let mut x = *state;
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    *state = x;
    x
}

#[derive(Clone, Debug)]
pub struct Xorshift32 {
    state: u32,
}

impl Xorshift32 {
    pub fn new(seed: u32) -> Self {
        // Zero is a fixed point of xorshift
        let state = if seed == 0 { 0x9E37_79B9 } else { seed };
        Self { state }
    }
}

impl Default for Xorshift32 {
    fn default() -> Self {
        Self::new(12345)
    }
}

impl RandomSource for Xorshift32 {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        xorshift32(&mut self.state)
    }
}

/// Replays a fixed sequence of values, cycling when exhausted.
///
/// Useful for forcing a diagonal direction or an upward roll in tests.
#[derive(Clone, Debug)]
pub struct SequenceSource {
    values: Vec<u32>,
    cursor: usize,
}

impl SequenceSource {
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, cursor: 0 }
    }
}

impl RandomSource for SequenceSource {
    fn next_u32(&mut self) -> u32 {
        if self.values.is_empty() {
            return 0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor = self.cursor.wrapping_add(1);
        v
    }
}
