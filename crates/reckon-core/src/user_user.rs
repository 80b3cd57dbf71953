//! User-user collaborative filtering
//!
//! Nothing is trained ahead of time: each call rebuilds every user's mean-centered
//! rating vector from the store, ranks users by cosine similarity to the target,
//! and predicts from the neighbors who rated each candidate item. Centering on each
//! user's own mean is what makes cosine behave like a Pearson correlation here.

use std::collections::HashMap;
use std::time::Instant;

use crate::config::{UserUserConfig, MIN_USER_NEIGHBORS};
use crate::error::{ReckonError, Result};
use crate::scorer::{ItemScorer, ScoreMap};
use crate::store::RatingStore;
use crate::trace_time;
use crate::vectors::{self, RatingVector};

/// A user's centered rating vector together with the mean that was removed
struct CenteredUser {
    mean: f64,
    ratings: RatingVector,
}

/// A candidate neighbor and its similarity to the target user
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub user: i64,
    pub similarity: f64,
}

pub struct UserUserScorer<'a, S: RatingStore + ?Sized> {
    store: &'a S,
    config: UserUserConfig,
}

impl<'a, S: RatingStore + ?Sized> UserUserScorer<'a, S> {
    pub fn new(store: &'a S, config: UserUserConfig) -> Self {
        Self { store, config }
    }

    /// Every user's rating vector, centered on that user's mean, from one store scan
    fn centered_users(&self) -> Result<HashMap<i64, CenteredUser>> {
        let mut raw: HashMap<i64, RatingVector> = HashMap::new();
        self.store.scan(&mut |r| {
            raw.entry(r.user).or_default().insert(r.item, r.value);
            Ok(())
        })?;

        raw.into_iter()
            .map(|(user, mut ratings)| -> Result<(i64, CenteredUser)> {
                let mean = vectors::mean_center(&mut ratings)?;
                Ok((user, CenteredUser { mean, ratings }))
            })
            .collect()
    }

    /// Other users ranked by similarity to `target`, best first. Ties keep
    /// ascending user-ID order.
    fn rank_neighbors(
        &self,
        target: i64,
        users: &HashMap<i64, CenteredUser>,
    ) -> Result<Vec<Neighbor>> {
        let target_vector = &users
            .get(&target)
            .ok_or(ReckonError::UnknownUser { id: target })?
            .ratings;

        let mut neighbors: Vec<Neighbor> = self
            .store
            .user_ids()?
            .into_iter()
            .filter(|&user| user != target)
            .filter_map(|user| {
                users.get(&user).map(|other| Neighbor {
                    user,
                    similarity: vectors::cosine_or_zero(target_vector, &other.ratings),
                })
            })
            .collect();

        // sort_by is stable, so equal similarities keep ID order
        neighbors.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        Ok(neighbors)
    }

    /// Neighbors of `user` with their similarity, most similar first
    pub fn neighbors(&self, user: i64) -> Result<Vec<Neighbor>> {
        let users = self.centered_users()?;
        self.rank_neighbors(user, &users)
    }

    /// Weighted average of centered neighbor ratings for one item, or `None` when
    /// too few positively similar neighbors rated it
    fn predict(
        &self,
        item: i64,
        neighbors: &[Neighbor],
        users: &HashMap<i64, CenteredUser>,
        target_mean: f64,
    ) -> Option<f64> {
        let mut contributions = 0;
        let mut weighted_sum = 0.0;
        let mut similarity_sum = 0.0;

        for neighbor in neighbors {
            if contributions >= self.config.neighborhood_size || neighbor.similarity <= 0.0 {
                break;
            }
            let Some(rating) = users
                .get(&neighbor.user)
                .and_then(|u| u.ratings.get(&item))
            else {
                continue;
            };
            weighted_sum += neighbor.similarity * rating;
            similarity_sum += neighbor.similarity;
            contributions += 1;
        }

        if contributions < self.config.min_neighbors.max(MIN_USER_NEIGHBORS) {
            tracing::trace!(item, contributions, "too few neighbors, leaving unscored");
            return None;
        }
        Some(target_mean + weighted_sum / similarity_sum)
    }
}

impl<S: RatingStore + ?Sized> ItemScorer for UserUserScorer<'_, S> {
    #[tracing::instrument(skip(self, items), fields(candidates = items.len()))]
    fn score(&self, user: i64, items: &[i64]) -> Result<ScoreMap> {
        let start = Instant::now();

        let known_items = self.store.item_ids()?;
        if let Some(&unknown) = items.iter().find(|&&item| !known_items.contains(&item)) {
            return Err(ReckonError::UnknownItem { id: unknown });
        }

        let users = self.centered_users()?;
        let neighbors = self.rank_neighbors(user, &users)?;
        let target_mean = users[&user].mean;

        let scores: ScoreMap = items
            .iter()
            .filter_map(|&item| {
                self.predict(item, &neighbors, &users, target_mean)
                    .map(|score| (item, score))
            })
            .collect();

        trace_time!(
            start,
            "user_user_score",
            users = users.len(),
            scored = scores.len()
        );
        Ok(scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::Rating;
    use crate::store::MemoryStore;
    use crate::testing::generated_store;

    /// u1 is the target (centered +2/-2). u2 and u4 agree with u1, u3 disagrees.
    fn fixture(with_u4: bool) -> MemoryStore {
        let mut triples = vec![
            (1, 1, 5.0),
            (1, 2, 1.0),
            (2, 1, 4.0),
            (2, 2, 2.0),
            (2, 3, 5.0),
            (3, 1, 1.0),
            (3, 2, 5.0),
            (3, 3, 2.0),
        ];
        if with_u4 {
            triples.extend([(4, 1, 5.0), (4, 2, 2.0), (4, 3, 4.0)]);
        }
        MemoryStore::from_triples(&triples)
    }

    #[test]
    fn test_single_positive_neighbor_is_not_enough() {
        let store = fixture(false);
        let scorer = UserUserScorer::new(&store, UserUserConfig::default());
        let scores = scorer.score(1, &[3]).unwrap();
        assert!(scores.is_empty(), "item backed by one neighbor must be omitted");
    }

    #[test]
    fn test_two_positive_neighbors_score_the_item() {
        let store = fixture(true);
        let scorer = UserUserScorer::new(&store, UserUserConfig::default());
        let scores = scorer.score(1, &[3]).unwrap();

        // u2 and u4 have equal norms, so their similarities weigh 4:6 and their
        // centered ratings for item 3 are 4/3 and 1/3
        let expected = 3.0 + (4.0 * 4.0 / 3.0 + 6.0 * 1.0 / 3.0) / 10.0;
        assert!((scores[&3] - expected).abs() < 1e-9, "got {}", scores[&3]);
    }

    #[test]
    fn test_configured_floor_cannot_drop_below_two() {
        let config = UserUserConfig {
            neighborhood_size: 30,
            min_neighbors: 0,
        };

        // Only u2 agrees with u1 and rated item 3
        let store = fixture(false);
        let scorer = UserUserScorer::new(&store, config);
        assert!(scorer.score(1, &[3]).unwrap().is_empty());

        // A flat rater has no contributors at all; no NaN may leak out
        let flat = MemoryStore::from_triples(&[(1, 1, 3.0), (1, 2, 3.0), (2, 1, 4.0), (2, 3, 5.0)]);
        let scorer = UserUserScorer::new(&flat, config);
        assert!(scorer.score(1, &[3]).unwrap().is_empty());
    }

    #[test]
    fn test_neighborhood_size_caps_contributors() {
        // u5 matches u1 exactly and rated item 3 at their own mean
        let mut ratings = fixture(true).all_ratings().unwrap();
        ratings.extend([
            Rating::new(5, 1, 5.0),
            Rating::new(5, 2, 1.0),
            Rating::new(5, 3, 3.0),
        ]);
        let store = MemoryStore::new(ratings);
        let config = UserUserConfig {
            neighborhood_size: 2,
            min_neighbors: 2,
        };
        let scorer = UserUserScorer::new(&store, config);
        let scores = scorer.score(1, &[3]).unwrap();

        // u5 (similarity 1) and u4 decide the score; u2 falls outside the cap
        let sim_u4 = 18.0 / 336.0_f64.sqrt();
        let expected = 3.0 + (sim_u4 / 3.0) / (1.0 + sim_u4);
        assert!((scores[&3] - expected).abs() < 1e-9, "got {}", scores[&3]);
    }

    #[test]
    fn test_neighbors_sorted_descending() {
        let store = fixture(true);
        let scorer = UserUserScorer::new(&store, UserUserConfig::default());
        let neighbors = scorer.neighbors(1).unwrap();

        let order: Vec<i64> = neighbors.iter().map(|n| n.user).collect();
        assert_eq!(order, vec![4, 2, 3]);
        assert!(neighbors.iter().all(|n| (-1.0..=1.0).contains(&n.similarity)));
        assert!(neighbors[2].similarity < 0.0);
    }

    #[test]
    fn test_flat_rater_has_no_neighbors() {
        // u1's centered vector is all zeros, so every similarity clamps to 0
        let store = MemoryStore::from_triples(&[
            (1, 1, 3.0),
            (1, 2, 3.0),
            (2, 1, 4.0),
            (2, 2, 2.0),
            (2, 3, 5.0),
            (3, 1, 5.0),
            (3, 3, 4.0),
        ]);
        let scorer = UserUserScorer::new(&store, UserUserConfig::default());

        let neighbors = scorer.neighbors(1).unwrap();
        assert!(neighbors.iter().all(|n| n.similarity == 0.0));
        assert!(scorer.score(1, &[3]).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_user_and_item() {
        let store = fixture(true);
        let scorer = UserUserScorer::new(&store, UserUserConfig::default());
        assert!(matches!(
            scorer.score(99, &[3]),
            Err(ReckonError::UnknownUser { id: 99 })
        ));
        assert!(matches!(
            scorer.score(1, &[3, 42]),
            Err(ReckonError::UnknownItem { id: 42 })
        ));
    }

    #[test]
    fn test_scores_never_backed_by_fewer_than_two_neighbors() {
        let store = generated_store(12, 8, 0x2545_f491_4f6c_dd1d);
        let scorer = UserUserScorer::new(&store, UserUserConfig::default());
        let users = scorer.centered_users().unwrap();
        let items: Vec<i64> = store.item_ids().unwrap().into_iter().collect();

        for user in store.user_ids().unwrap() {
            let neighbors = scorer.rank_neighbors(user, &users).unwrap();
            for (item, score) in scorer.score(user, &items).unwrap() {
                let backing = neighbors
                    .iter()
                    .filter(|n| n.similarity > 0.0)
                    .filter(|n| users[&n.user].ratings.contains_key(&item))
                    .count();
                assert!(backing >= 2, "user {} item {} scored from {}", user, item, backing);
                assert!(score.is_finite());
            }
        }
    }
}
