//! Item-item collaborative filtering
//!
//! Training ([`ItemItemModel::build`]) precomputes a symmetric graph of positively
//! similar items from mean-centered item rating vectors. Scoring
//! ([`ItemItemScorer`]) combines that graph with the user's own ratings, each
//! normalized by the rated item's mean.

mod model;
mod scorer;

pub use model::ItemItemModel;
pub use scorer::ItemItemScorer;
