//! Content-based user profiles and the scorer built on them

use crate::error::{ReckonError, Result};
use crate::rating::Rating;
use crate::scorer::{ItemScorer, ScoreMap};
use crate::store::RatingStore;
use crate::tags::TagVectorSource;
use crate::vectors::{self, SparseVector};

/// Tag → accumulated preference weight
pub type UserProfile = SparseVector<String>;

/// Builds a profile where each rated item's tags are weighted by how far the rating
/// sits from the user's own mean: liked items push their tags up, disliked items
/// push them down.
pub struct WeightedProfileBuilder<'a, T: TagVectorSource + ?Sized> {
    tags: &'a T,
}

impl<'a, T: TagVectorSource + ?Sized> WeightedProfileBuilder<'a, T> {
    pub fn new(tags: &'a T) -> Self {
        Self { tags }
    }

    /// Build the profile for one user's ratings. Fails with `EmptyVector` when
    /// `ratings` is empty.
    pub fn make_profile(&self, ratings: &[Rating]) -> Result<UserProfile> {
        if ratings.is_empty() {
            return Err(ReckonError::EmptyVector);
        }
        let mean = ratings.iter().map(|r| r.value).sum::<f64>() / ratings.len() as f64;

        let mut profile = UserProfile::new();
        for r in ratings {
            let deviation = r.value - mean;
            for (tag, weight) in self.tags.item_vector(r.item)? {
                *profile.entry(tag).or_insert(0.0) += deviation * weight;
            }
        }

        Ok(profile)
    }
}

/// Scores items by cosine similarity between the user's weighted profile and
/// each candidate's tag vector
pub struct ContentScorer<'a, S: RatingStore + ?Sized, T: TagVectorSource + ?Sized> {
    store: &'a S,
    tags: &'a T,
}

impl<'a, S: RatingStore + ?Sized, T: TagVectorSource + ?Sized> ContentScorer<'a, S, T> {
    pub fn new(store: &'a S, tags: &'a T) -> Self {
        Self { store, tags }
    }
}

impl<S: RatingStore + ?Sized, T: TagVectorSource + ?Sized> ItemScorer for ContentScorer<'_, S, T> {
    #[tracing::instrument(skip(self, items), fields(candidates = items.len()))]
    fn score(&self, user: i64, items: &[i64]) -> Result<ScoreMap> {
        let ratings = self.store.user_ratings(user)?;
        if ratings.is_empty() {
            return Err(ReckonError::UnknownUser { id: user });
        }

        let profile = WeightedProfileBuilder::new(self.tags).make_profile(&ratings)?;
        tracing::debug!(tags = profile.len(), "built user profile");

        let mut scores = ScoreMap::with_capacity(items.len());
        for &item in items {
            let item_vector = self.tags.item_vector(item)?;
            scores.insert(item, vectors::cosine_or_zero(&profile, &item_vector));
        }
        Ok(scores)
    }
}
