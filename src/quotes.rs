// Motivational quotes shown before every focus phase.
//
// The random source is created once per process and owned by the bank, so
// consecutive picks never re-seed from the clock.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};

/// The fixed quote list. Never empty.
pub const QUOTES: &[&str] = &[
    "Focus is the key to success, and immersion is the handle that opens the door.",
    "Habits decide everything. Build good habits and focus follows naturally.",
    "The shortest moments of focus add up to the greatest results.",
    "Procrastination is the biggest enemy eating away at your focus.",
    "When you focus on what you truly want, the world moves to help you.",
];

/// Process-wide random source, seeded once.
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    /// Seed from the wall clock. Call this once at startup.
    pub fn from_time() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        Self::from_seed(seed)
    }

    /// Deterministic source, mostly useful in tests.
    pub fn from_seed(seed: u64) -> Self {
        RandomSource {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Static list of quotes plus the random source used to pick them.
pub struct QuoteBank {
    quotes: &'static [&'static str],
    random: RandomSource,
}

impl QuoteBank {
    pub fn new(random: RandomSource) -> Self {
        QuoteBank {
            quotes: QUOTES,
            random,
        }
    }

    /// One quote chosen uniformly at random; repeats allowed.
    pub fn pick_random(&mut self) -> &'static str {
        let idx = self.random.index(self.quotes.len());
        self.quotes[idx]
    }
}
