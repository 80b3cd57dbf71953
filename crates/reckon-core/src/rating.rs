//! Rating observations and the rating vectors built from them

use serde::{Deserialize, Serialize};

use crate::vectors::RatingVector;

/// A single (user, item, value) rating observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub user: i64,
    pub item: i64,
    pub value: f64,
}

impl Rating {
    pub fn new(user: i64, item: i64, value: f64) -> Self {
        Self { user, item, value }
    }
}

impl From<(i64, i64, f64)> for Rating {
    fn from((user, item, value): (i64, i64, f64)) -> Self {
        Rating::new(user, item, value)
    }
}

/// Build a user's rating vector (item → rating). Later duplicates overwrite earlier ones.
pub fn user_rating_vector<'a>(ratings: impl IntoIterator<Item = &'a Rating>) -> RatingVector {
    ratings.into_iter().map(|r| (r.item, r.value)).collect()
}
