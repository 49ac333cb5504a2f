//! Seed generation and the seed-keyed pseudo-random stream behind every draw.
//!
//! The stream is a sine-hash generator: weak as randomness, but a pure function of the
//! seed and the number of values drawn, which is what makes a published seed enough to
//! replay a draw.

use rand::Rng;

const SEED_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
pub const SEED_LENGTH: usize = 20;

/// Fresh 20-character alphanumeric seed. A nonce for auditability, not a secret.
pub fn generate_seed() -> String {
    let mut rng = rand::rng();
    (0..SEED_LENGTH)
        .map(|_| SEED_CHARS[rng.random_range(0..SEED_CHARS.len())] as char)
        .collect()
}

/// Returns the caller's seed unless it is empty or whitespace-only, otherwise a fresh
/// one. A whitespace-only seed is never used as given.
pub fn resolve_seed(seed: Option<&str>) -> String {
    match seed {
        Some(value) if !value.trim().is_empty() => value.to_string(),
        _ => generate_seed(),
    }
}

/// Folds UTF-16 code units into a wrapping 32-bit signed accumulator (`h * 31 + c`).
pub fn hash_seed(seed: &str) -> i32 {
    seed.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    })
}

/// Deterministic stream of values in `[0, 1)` keyed by a seed string.
#[derive(Debug, Clone)]
pub struct SeededStream {
    counter: f64,
}

impl SeededStream {
    pub fn new(seed: &str) -> Self {
        Self {
            counter: f64::from(hash_seed(seed)),
        }
    }

    pub fn next_unit(&mut self) -> f64 {
        let x = self.counter.sin() * 10_000.0;
        self.counter += 1.0;
        let fraction = x - x.floor();
        // Guard the upper bound against rounding in `x - floor(x)`.
        if fraction >= 1.0 {
            0.0
        } else {
            fraction
        }
    }

    /// Uniform-ish index in `0..=upper`.
    pub fn next_index(&mut self, upper: usize) -> usize {
        let scaled = (self.next_unit() * (upper as f64 + 1.0)).floor() as usize;
        scaled.min(upper)
    }
}

impl Iterator for SeededStream {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_unit())
    }
}

/// Fisher-Yates shuffle driven by the seed, walking from the last index down.
pub fn shuffle<T: Clone>(items: &[T], seed: &str) -> Vec<T> {
    let mut shuffled = items.to_vec();
    let mut stream = SeededStream::new(seed);

    for i in (1..shuffled.len()).rev() {
        let j = stream.next_index(i);
        shuffled.swap(i, j);
    }

    shuffled
}
