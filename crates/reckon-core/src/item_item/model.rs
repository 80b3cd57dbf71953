use std::collections::HashMap;
use std::time::Instant;

use crate::error::{ReckonError, Result};
use crate::store::RatingStore;
use crate::trace_time;
use crate::vectors::{self, RatingVector};

/// Trained item-item neighborhood model
///
/// Holds every item's mean rating and its positively similar neighbors. The
/// neighbor graph is symmetric: `similarity(i, j) == similarity(j, i)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemItemModel {
    means: HashMap<i64, f64>,
    neighbors: HashMap<i64, HashMap<i64, f64>>,
}

impl ItemItemModel {
    /// Train the model from every rating in the store.
    ///
    /// Each item's rating vector is centered on the item's mean, then cosine
    /// similarity is computed once per unordered item pair. Only strictly positive
    /// similarities are kept.
    #[tracing::instrument(skip(store))]
    pub fn build<S: RatingStore + ?Sized>(store: &S) -> Result<Self> {
        let start = Instant::now();

        let mut vectors_by_item: HashMap<i64, RatingVector> = HashMap::new();
        store.scan(&mut |r| {
            vectors_by_item
                .entry(r.item)
                .or_default()
                .insert(r.user, r.value);
            Ok(())
        })?;

        if vectors_by_item.is_empty() {
            return Err(ReckonError::NoRatings);
        }

        let mut means = HashMap::with_capacity(vectors_by_item.len());
        for (&item, vector) in vectors_by_item.iter_mut() {
            means.insert(item, vectors::mean_center(vector)?);
        }

        // Walk unordered pairs directly so each similarity is computed exactly once
        let items: Vec<(i64, &RatingVector)> = store
            .item_ids()?
            .into_iter()
            .filter_map(|item| match vectors_by_item.get(&item) {
                Some(vector) => Some((item, vector)),
                None => {
                    tracing::warn!(item, "item listed by store has no ratings, skipping");
                    None
                }
            })
            .collect();

        let mut neighbors: HashMap<i64, HashMap<i64, f64>> =
            items.iter().map(|&(item, _)| (item, HashMap::new())).collect();
        let mut stored = 0usize;

        for (idx, &(i, i_vector)) in items.iter().enumerate() {
            for &(j, j_vector) in &items[idx + 1..] {
                let sim = vectors::cosine_or_zero(i_vector, j_vector);
                if sim > 0.0 {
                    neighbors.entry(i).or_default().insert(j, sim);
                    neighbors.entry(j).or_default().insert(i, sim);
                    stored += 1;
                }
            }
        }

        tracing::info!(
            items = items.len(),
            similar_pairs = stored,
            "computed item-item similarities"
        );
        trace_time!(start, "build_item_item_model", items = items.len());

        Ok(Self { means, neighbors })
    }

    /// Mean rating of `item`
    pub fn mean(&self, item: i64) -> Option<f64> {
        self.means.get(&item).copied()
    }

    /// Positively similar neighbors of `item`; empty for an item with none,
    /// `None` for an item the model has never seen
    pub fn neighbors(&self, item: i64) -> Option<&HashMap<i64, f64>> {
        self.neighbors.get(&item)
    }

    /// Stored similarity between two items, if positive
    pub fn similarity(&self, i: i64, j: i64) -> Option<f64> {
        self.neighbors.get(&i).and_then(|n| n.get(&j)).copied()
    }

    /// Item IDs in ascending order
    pub fn items(&self) -> Vec<i64> {
        let mut items: Vec<i64> = self.means.keys().copied().collect();
        items.sort_unstable();
        items
    }

    pub fn len(&self) -> usize {
        self.means.len()
    }

    pub fn is_empty(&self) -> bool {
        self.means.is_empty()
    }

    /// The `limit` most similar neighbors of `item`, best first
    pub fn top_neighbors(&self, item: i64, limit: usize) -> Result<Vec<(i64, f64)>> {
        let neighbors = self
            .neighbors(item)
            .ok_or(ReckonError::UnknownItem { id: item })?;
        let mut ranked: Vec<(i64, f64)> = neighbors.iter().map(|(&j, &s)| (j, s)).collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(limit);
        Ok(ranked)
    }
}
