//! Thread-local generator backing every sampler draw.
//!
//! Draws come from OS entropy until [`set_sampler_seed`] is called, after which
//! the sequence on the calling thread is reproducible.

use std::cell::{Cell, RefCell};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

thread_local! {
    static SAMPLER_RNG: RefCell<ChaCha8Rng> = RefCell::new(ChaCha8Rng::from_entropy());
    static CURRENT_SEED: Cell<Option<u64>> = const { Cell::new(None) };
}

/// Reseed the generator of the current thread
pub fn set_sampler_seed(seed: u64) {
    SAMPLER_RNG.with(|rng| *rng.borrow_mut() = ChaCha8Rng::seed_from_u64(seed));
    CURRENT_SEED.with(|s| s.set(Some(seed)));
    debug!(seed, "sampler rng seeded");
}

/// Drop any explicit seed and go back to entropy
pub fn reseed_from_entropy() {
    SAMPLER_RNG.with(|rng| *rng.borrow_mut() = ChaCha8Rng::from_entropy());
    CURRENT_SEED.with(|s| s.set(None));
}

/// The last seed passed to [`set_sampler_seed`], if the generator is still on it
pub fn current_seed()->Option<u64> {
    CURRENT_SEED.with(|s| s.get())
}

pub(crate) fn with_rng<R>(f: impl FnOnce(&mut ChaCha8Rng)->R)->R {
    SAMPLER_RNG.with(|rng| f(&mut rng.borrow_mut()))
}
