use std::collections::{BTreeSet, HashMap};

use crate::error::Result;
use crate::rating::Rating;

use super::RatingStore;

/// In-memory rating store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    ratings: Vec<Rating>,
    by_user: HashMap<i64, Vec<usize>>,
}

impl MemoryStore {
    /// Create a store over the given ratings, keeping their order
    pub fn new(ratings: Vec<Rating>) -> Self {
        let mut by_user: HashMap<i64, Vec<usize>> = HashMap::new();
        for (idx, r) in ratings.iter().enumerate() {
            by_user.entry(r.user).or_default().push(idx);
        }
        Self { ratings, by_user }
    }

    /// Convenience constructor from `(user, item, value)` triples
    pub fn from_triples(triples: &[(i64, i64, f64)]) -> Self {
        Self::new(triples.iter().copied().map(Rating::from).collect())
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }
}

impl FromIterator<Rating> for MemoryStore {
    fn from_iter<T: IntoIterator<Item = Rating>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl RatingStore for MemoryStore {
    fn scan(&self, visit: &mut dyn FnMut(&Rating) -> Result<()>) -> Result<()> {
        for r in &self.ratings {
            visit(r)?;
        }
        Ok(())
    }

    fn user_ratings(&self, user: i64) -> Result<Vec<Rating>> {
        Ok(self
            .by_user
            .get(&user)
            .map(|idxs| idxs.iter().map(|&i| self.ratings[i]).collect())
            .unwrap_or_default())
    }

    fn user_ids(&self) -> Result<BTreeSet<i64>> {
        Ok(self.by_user.keys().copied().collect())
    }

    fn item_ids(&self) -> Result<BTreeSet<i64>> {
        Ok(self.ratings.iter().map(|r| r.item).collect())
    }

    fn all_ratings(&self) -> Result<Vec<Rating>> {
        Ok(self.ratings.clone())
    }
}
