//! Running Adler sums.

use std::fmt;

/// Modulus both running sums are reduced by (largest prime below 2^16).
pub const ADLER_MODULUS: u32 = 65521;

/// Packed value of a freshly reset accumulator.
pub const SEED: u32 = 1;

/// Longest run of bytes that can be summed before `sum_b` must be reduced
/// to stay inside a `u32`.
const NMAX: usize = 5552;

/// The two running sums behind the service digest.
///
/// `sum_a` is seeded with 1 and accumulates bytes, `sum_b` accumulates
/// successive values of `sum_a`. Both stay below [`ADLER_MODULUS`] as long as
/// the state was produced by [`reset`](Self::reset), [`update`](Self::update)
/// or [`unpack`](Self::unpack) of a value that came from [`pack`](Self::pack).
///
/// Updates are incremental: any split of a byte sequence across calls yields
/// the same state as feeding it one byte at a time.
///
/// # Example
///
/// ```
/// use adlersum::Accumulator;
///
/// let mut acc = Accumulator::new();
/// acc.update_slice(b"ab");
/// acc.update(b'c');
/// assert_eq!(acc.pack(), 0x024d_0127);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Accumulator {
    sum_a: u32,
    sum_b: u32,
}

impl Accumulator {
    /// Creates an accumulator holding the seed state.
    pub const fn new() -> Self {
        Self { sum_a: 1, sum_b: 0 }
    }

    /// Creates an accumulator from a packed checkpoint word.
    pub const fn from_packed(value: u32) -> Self {
        Self {
            sum_a: value & 0xffff,
            sum_b: value >> 16,
        }
    }

    /// Resets to the seed state (`sum_a = 1, sum_b = 0`).
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Folds one byte into the sums.
    #[inline]
    pub fn update(&mut self, byte: u8) {
        // sum_b must see the already-updated sum_a
        self.sum_a = (self.sum_a + u32::from(byte)) % ADLER_MODULUS;
        self.sum_b = (self.sum_b + self.sum_a) % ADLER_MODULUS;
    }

    /// Folds a run of bytes into the sums, in order.
    ///
    /// Equivalent to calling [`update`](Self::update) for every byte, but
    /// reduces modulo [`ADLER_MODULUS`] once per block instead of per byte.
    pub fn update_slice(&mut self, data: &[u8]) {
        let mut a = self.sum_a;
        let mut b = self.sum_b;

        for block in data.chunks(NMAX) {
            for &byte in block {
                a += u32::from(byte);
                b += a;
            }
            a %= ADLER_MODULUS;
            b %= ADLER_MODULUS;
        }

        self.sum_a = a;
        self.sum_b = b;
    }

    /// Packs the state into one word: `sum_b << 16 | sum_a`.
    pub const fn pack(&self) -> u32 {
        (self.sum_b << 16) | self.sum_a
    }

    /// Replaces the state with a packed word.
    ///
    /// The `< ADLER_MODULUS` bound is not re-checked; see
    /// [`is_canonical`](Self::is_canonical).
    pub fn unpack(&mut self, value: u32) {
        *self = Self::from_packed(value);
    }

    /// Returns `true` if both sums are below [`ADLER_MODULUS`].
    pub const fn is_canonical(&self) -> bool {
        self.sum_a < ADLER_MODULUS && self.sum_b < ADLER_MODULUS
    }

    /// Returns the byte sum.
    pub const fn sum_a(&self) -> u32 {
        self.sum_a
    }

    /// Returns the sum of sums.
    pub const fn sum_b(&self) -> u32 {
        self.sum_b
    }
}

impl Default for Accumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Accumulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Accumulator(a={}, b={})", self.sum_a, self.sum_b)
    }
}
