//! Seed derivation and the single call-ordered RNG stream used per puzzle.
//!
//! A puzzle seed is a string (normally an ISO date). It is suffixed with a
//! difficulty offset so each difficulty gets an independent stream, then
//! folded into 64 bits with HMAC-SHA256 under a domain tag.

use chrono::NaiveDate;
use hmac::{Hmac, Mac};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::Sha256;

use crate::clue::Difficulty;
use crate::config::DifficultyOffsets;
use crate::constants::{SEED_DOMAIN_HINT, SEED_DOMAIN_PUZZLE};
use crate::numbers::{floor_f64_to_usize, usize_to_f64};

/// Seed string used for the daily puzzle on `date`.
#[must_use]
pub fn date_seed(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Concatenate the date seed with the difficulty-specific offset.
///
/// Festive puzzles are generated as hard puzzles and share the hard offset.
#[must_use]
pub fn full_seed(seed: &str, difficulty: Difficulty, offsets: &DifficultyOffsets) -> String {
    let offset = match difficulty.for_generation() {
        Difficulty::Easy => offsets.easy,
        Difficulty::Medium => offsets.medium,
        Difficulty::Hard | Difficulty::Festive => offsets.hard,
    };
    format!("{seed}{offset}")
}

/// Seed string for the standalone hint stream of one stop.
#[must_use]
pub fn hint_seed(full_seed: &str, stop: usize) -> String {
    format!("{full_seed}-hint-{stop}")
}

fn derive_stream_seed(seed: &str, domain_tag: &[u8]) -> u64 {
    let mut mac = <Hmac<Sha256> as Mac>::new_from_slice(domain_tag)
        .unwrap_or_else(|_| unreachable!("HMAC accepts keys of any length"));
    mac.update(seed.as_bytes());
    let digest = mac.finalize().into_bytes();
    let mut seed_bytes = [0u8; 8];
    seed_bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(seed_bytes)
}

/// Deterministic random stream keyed by a string seed.
///
/// Every random decision in a puzzle build (route shuffle, red-herring stops,
/// per-stop type order, clue content) draws from one instance in call order.
#[derive(Debug, Clone)]
pub struct PuzzleRng {
    rng: ChaCha8Rng,
    draws: u64,
}

impl PuzzleRng {
    /// Stream for puzzle generation.
    #[must_use]
    pub fn from_seed_str(seed: &str) -> Self {
        Self::with_domain(seed, SEED_DOMAIN_PUZZLE)
    }

    /// Independent stream for on-demand hints.
    #[must_use]
    pub fn for_hint(full_seed: &str, stop: usize) -> Self {
        Self::with_domain(&hint_seed(full_seed, stop), SEED_DOMAIN_HINT)
    }

    fn with_domain(seed: &str, domain_tag: &[u8]) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(derive_stream_seed(seed, domain_tag)),
            draws: 0,
        }
    }

    /// Number of draws performed against this stream.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }

    /// Uniform float in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.r#gen::<f64>()
    }

    /// Uniform index in `0..len`; `len` must be non-zero.
    pub fn pick_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "pick_index on empty range");
        let idx = floor_f64_to_usize(self.next_f64() * usize_to_f64(len));
        idx.min(len.saturating_sub(1))
    }

    /// Uniformly pick one element, or `None` for an empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.pick_index(items.len());
        items.get(idx)
    }

    /// Fisher–Yates shuffle driven by [`Self::next_f64`].
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.pick_index(i + 1);
            items.swap(i, j);
        }
    }

    /// Choose `count` distinct elements, preserving draw order.
    pub fn sample<T: Clone>(&mut self, items: &[T], count: usize) -> Vec<T> {
        let mut pool = items.to_vec();
        self.shuffle(&mut pool);
        pool.truncate(count);
        pool
    }
}

impl RngCore for PuzzleRng {
    fn next_u32(&mut self) -> u32 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws = self.draws.saturating_add(1);
        self.rng.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.draws = self.draws.saturating_add(1);
        self.rng.try_fill_bytes(dest)
    }
}
