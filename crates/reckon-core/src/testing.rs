//! Shared fixtures for unit tests

use crate::store::MemoryStore;

/// Deterministic pseudo-random ratings on a 1–5 scale, about 60% dense
pub(crate) fn generated_store(users: i64, items: i64, seed: u64) -> MemoryStore {
    let mut state = seed;
    let mut next = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 33) as u32
    };

    let mut triples = Vec::new();
    for user in 1..=users {
        for item in 1..=items {
            if next() % 10 < 6 {
                triples.push((user, item, f64::from(next() % 5 + 1)));
            }
        }
    }
    MemoryStore::from_triples(&triples)
}
