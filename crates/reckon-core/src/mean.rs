//! Damped item mean baseline
//!
//! Each item's mean is blended with `damping` imaginary ratings at the global mean,
//! which keeps sparsely rated items from swinging to extremes:
//!
//! ```text
//! damped_mean = (item_sum + damping * global_mean) / (item_count + damping)
//! ```

use std::collections::HashMap;
use std::time::Instant;

use crate::bail_invalid;
use crate::error::{ReckonError, Result};
use crate::scorer::{ItemScorer, ScoreMap};
use crate::store::RatingStore;
use crate::trace_time;

/// Immutable mapping from item ID to damped mean rating
#[derive(Debug, Clone, PartialEq)]
pub struct ItemMeanModel {
    means: HashMap<i64, f64>,
    global_mean: f64,
    damping: f64,
}

#[derive(Default)]
struct Accumulator {
    sum: f64,
    count: usize,
}

impl ItemMeanModel {
    /// Train the model with a single scan over the store
    #[tracing::instrument(skip(store))]
    pub fn build<S: RatingStore + ?Sized>(store: &S, damping: f64) -> Result<Self> {
        if !damping.is_finite() || damping < 0.0 {
            bail_invalid!("damping", damping);
        }

        let start = Instant::now();
        let mut items: HashMap<i64, Accumulator> = HashMap::new();
        let mut global = Accumulator::default();

        store.scan(&mut |r| {
            let acc = items.entry(r.item).or_default();
            acc.sum += r.value;
            acc.count += 1;
            global.sum += r.value;
            global.count += 1;
            Ok(())
        })?;

        if global.count == 0 {
            return Err(ReckonError::NoRatings);
        }
        let global_mean = global.sum / global.count as f64;

        let means: HashMap<i64, f64> = items
            .into_iter()
            .filter(|(_, acc)| acc.count > 0)
            .map(|(item, acc)| {
                let mean = (acc.sum + damping * global_mean) / (acc.count as f64 + damping);
                (item, mean)
            })
            .collect();

        tracing::info!(items = means.len(), global_mean, "computed item mean ratings");
        trace_time!(start, "build_item_means", ratings = global.count);

        Ok(Self {
            means,
            global_mean,
            damping,
        })
    }

    /// Damped mean for `item`, if it has any ratings
    pub fn mean(&self, item: i64) -> Option<f64> {
        self.means.get(&item).copied()
    }

    /// Mean of every rating in the training data
    pub fn global_mean(&self) -> f64 {
        self.global_mean
    }

    /// Damping the model was trained with
    pub fn damping(&self) -> f64 {
        self.damping
    }

    pub fn len(&self) -> usize {
        self.means.len()
    }

    pub fn is_empty(&self) -> bool {
        self.means.is_empty()
    }

    /// All item means
    pub fn means(&self) -> &HashMap<i64, f64> {
        &self.means
    }
}

/// Non-personalized scorer: every user gets each item's damped mean
#[derive(Debug, Clone, Copy)]
pub struct MeanItemScorer<'a> {
    model: &'a ItemMeanModel,
}

impl<'a> MeanItemScorer<'a> {
    pub fn new(model: &'a ItemMeanModel) -> Self {
        Self { model }
    }
}

impl ItemScorer for MeanItemScorer<'_> {
    fn score(&self, _user: i64, items: &[i64]) -> Result<ScoreMap> {
        items
            .iter()
            .map(|&item| {
                self.model
                    .mean(item)
                    .map(|mean| (item, mean))
                    .ok_or(ReckonError::UnknownItem { id: item })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn scenario() -> MemoryStore {
        MemoryStore::from_triples(&[
            (1, 1, 5.0),
            (1, 2, 3.0),
            (2, 1, 4.0),
            (2, 2, 2.0),
            (3, 1, 1.0),
        ])
    }

    #[test]
    fn test_undamped_scenario() {
        let model = ItemMeanModel::build(&scenario(), 0.0).unwrap();
        assert_eq!(model.len(), 2);
        assert!((model.mean(1).unwrap() - 10.0 / 3.0).abs() < 1e-9);
        assert!((model.mean(2).unwrap() - 2.5).abs() < 1e-9);
        assert!((model.global_mean() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_damping_is_raw_mean() {
        let store = MemoryStore::from_triples(&[
            (1, 7, 1.0),
            (2, 7, 2.0),
            (3, 8, 5.0),
            (4, 9, 3.5),
            (5, 9, 4.5),
            (6, 9, 0.5),
        ]);
        let model = ItemMeanModel::build(&store, 0.0).unwrap();
        assert!((model.mean(7).unwrap() - 1.5).abs() < 1e-12);
        assert!((model.mean(8).unwrap() - 5.0).abs() < 1e-12);
        assert!((model.mean(9).unwrap() - 17.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_damping_pulls_toward_global_mean() {
        let store = scenario();
        let global = 3.0;
        let mut previous = ItemMeanModel::build(&store, 0.0).unwrap();

        for damping in [0.5, 1.0, 5.0, 25.0, 1000.0] {
            let model = ItemMeanModel::build(&store, damping).unwrap();
            for item in [1, 2] {
                let before = previous.mean(item).unwrap();
                let after = model.mean(item).unwrap();
                assert!(
                    (after - global).abs() <= (before - global).abs() + 1e-12,
                    "damping {} moved item {} away from the global mean",
                    damping,
                    item
                );
                // Never overshoots past the global mean
                assert_eq!((after - global).signum(), (before - global).signum());
            }
            previous = model;
        }
    }

    #[test]
    fn test_damped_value() {
        // i2: (3 + 2 + 2 * 3) / (2 + 2) = 2.75
        let model = ItemMeanModel::build(&scenario(), 2.0).unwrap();
        assert!((model.mean(2).unwrap() - 2.75).abs() < 1e-12);
        assert_eq!(model.damping(), 2.0);
    }

    #[test]
    fn test_empty_store_fails() {
        let err = ItemMeanModel::build(&MemoryStore::default(), 0.0).unwrap_err();
        assert!(matches!(err, ReckonError::NoRatings));
    }

    #[test]
    fn test_negative_damping_rejected() {
        let err = ItemMeanModel::build(&scenario(), -1.0).unwrap_err();
        assert!(matches!(err, ReckonError::InvalidValue { .. }));
    }

    #[test]
    fn test_unrated_item_has_no_mean() {
        let model = ItemMeanModel::build(&scenario(), 3.0).unwrap();
        assert_eq!(model.mean(99), None);
    }

    #[test]
    fn test_mean_scorer() {
        let model = ItemMeanModel::build(&scenario(), 0.0).unwrap();
        let scorer = MeanItemScorer::new(&model);

        let scores = scorer.score(42, &[2]).unwrap();
        assert_eq!(scores.len(), 1);
        assert!((scores[&2] - 2.5).abs() < 1e-12);

        assert!(matches!(
            scorer.score(42, &[1, 99]),
            Err(ReckonError::UnknownItem { id: 99 })
        ));
    }
}
