//! The scoring contract shared by every predictor

use std::collections::HashMap;

use crate::error::Result;

/// Predicted scores keyed by item ID. Items a scorer declines to score are absent.
pub type ScoreMap = HashMap<i64, f64>;

/// Predict a user's ratings for a set of candidate items
pub trait ItemScorer {
    /// Score `items` for `user`. An unknown user or candidate fails the whole call;
    /// callers scoring many users should treat each call independently.
    fn score(&self, user: i64, items: &[i64]) -> Result<ScoreMap>;
}

/// One scored item, used for ranked output
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredItem {
    pub item: i64,
    pub score: f64,
}

/// Order scores best-first. NaN scores sort last; ties fall back to item ID.
pub fn ranked(scores: &ScoreMap) -> Vec<ScoredItem> {
    let mut results: Vec<ScoredItem> = scores
        .iter()
        .map(|(&item, &score)| ScoredItem { item, score })
        .collect();

    results.sort_by(|a, b| {
        match (a.score.is_nan(), b.score.is_nan()) {
            (true, false) => std::cmp::Ordering::Greater,
            (false, true) => std::cmp::Ordering::Less,
            _ => b.score.total_cmp(&a.score),
        }
        .then_with(|| a.item.cmp(&b.item))
    });
    results
}
