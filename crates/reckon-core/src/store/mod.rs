//! Rating stores
//!
//! Scorers and model builders only see the [`RatingStore`] trait. Two backends ship
//! with the crate: [`MemoryStore`] for datasets loaded from CSV and tests, and
//! [`SqliteStore`] for ratings kept on disk.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use std::collections::BTreeSet;

use crate::error::{ReckonError, Result};
use crate::rating::{self, Rating};
use crate::vectors::RatingVector;

/// Read-only access to a collection of rating observations
///
/// ID sets are ordered so that every scan over users or items visits them in
/// ascending ID order, which keeps neighbor tie-breaking deterministic.
pub trait RatingStore {
    /// Stream every rating through `visit`.
    ///
    /// The backing cursor lives only for the duration of the call and is released
    /// on every exit path, including when `visit` returns an error.
    fn scan(&self, visit: &mut dyn FnMut(&Rating) -> Result<()>) -> Result<()>;

    /// All ratings made by `user`, in insertion order
    fn user_ratings(&self, user: i64) -> Result<Vec<Rating>>;

    /// Every user with at least one rating
    fn user_ids(&self) -> Result<BTreeSet<i64>>;

    /// Every item with at least one rating
    fn item_ids(&self) -> Result<BTreeSet<i64>>;

    /// Collect a full scan into memory
    fn all_ratings(&self) -> Result<Vec<Rating>> {
        let mut ratings = Vec::new();
        self.scan(&mut |r| {
            ratings.push(*r);
            Ok(())
        })?;
        Ok(ratings)
    }

    /// The user's rating vector (item → rating); `UnknownUser` when they rated nothing
    fn user_rating_vector(&self, user: i64) -> Result<RatingVector> {
        let ratings = self.user_ratings(user)?;
        if ratings.is_empty() {
            return Err(ReckonError::UnknownUser { id: user });
        }
        Ok(rating::user_rating_vector(&ratings))
    }
}
