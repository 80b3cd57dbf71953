use std::time::Instant;

use crate::config::ItemItemConfig;
use crate::error::{ReckonError, Result};
use crate::scorer::{ItemScorer, ScoreMap};
use crate::store::RatingStore;
use crate::trace_time;
use crate::vectors::RatingVector;

use super::ItemItemModel;

/// Online half of item-item CF: predicts from a trained [`ItemItemModel`] and the
/// user's current ratings, which are re-read from the store on every call
pub struct ItemItemScorer<'a, S: RatingStore + ?Sized> {
    model: &'a ItemItemModel,
    store: &'a S,
    config: ItemItemConfig,
}

impl<'a, S: RatingStore + ?Sized> ItemItemScorer<'a, S> {
    pub fn new(model: &'a ItemItemModel, store: &'a S, config: ItemItemConfig) -> Self {
        Self {
            model,
            store,
            config,
        }
    }

    /// Subtract each rated item's mean (not the user's) from the user's ratings
    fn normalize(&self, ratings: &RatingVector) -> RatingVector {
        ratings
            .iter()
            .filter_map(|(&item, &rating)| match self.model.mean(item) {
                Some(mean) => Some((item, rating - mean)),
                None => {
                    tracing::debug!(item, "rated item missing from model, ignoring");
                    None
                }
            })
            .collect()
    }

    /// Prediction for one item, or `None` when the neighbor floor is not met.
    ///
    /// With the floor disabled an item whose neighbors the user never rated gets
    /// `mean + 0/0`, i.e. NaN.
    fn predict(&self, item: i64, normalized: &RatingVector) -> Result<Option<f64>> {
        let mean = self
            .model
            .mean(item)
            .ok_or(ReckonError::UnknownItem { id: item })?;
        let neighbors = self
            .model
            .neighbors(item)
            .ok_or(ReckonError::UnknownItem { id: item })?;

        let mut rated: Vec<(i64, f64)> = neighbors
            .iter()
            .filter(|(j, _)| normalized.contains_key(*j))
            .map(|(&j, &sim)| (j, sim))
            .collect();
        rated.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let mut contributions = 0;
        let mut weighted_sum = 0.0;
        let mut similarity_sum = 0.0;
        for (neighbor, sim) in rated.into_iter().take(self.config.neighborhood_size) {
            weighted_sum += sim * normalized[&neighbor];
            similarity_sum += sim;
            contributions += 1;
        }

        if contributions < self.config.min_neighbors {
            return Ok(None);
        }
        Ok(Some(mean + weighted_sum / similarity_sum))
    }
}

impl<S: RatingStore + ?Sized> ItemScorer for ItemItemScorer<'_, S> {
    #[tracing::instrument(skip(self, items), fields(candidates = items.len()))]
    fn score(&self, user: i64, items: &[i64]) -> Result<ScoreMap> {
        let start = Instant::now();

        let ratings = self.store.user_rating_vector(user)?;
        let normalized = self.normalize(&ratings);

        let mut scores = ScoreMap::with_capacity(items.len());
        for &item in items {
            if let Some(score) = self.predict(item, &normalized)? {
                if score.is_nan() {
                    tracing::debug!(item, "no rated neighbors, emitting NaN score");
                }
                scores.insert(item, score);
            }
        }

        trace_time!(start, "item_item_score", scored = scores.len());
        Ok(scores)
    }
}
