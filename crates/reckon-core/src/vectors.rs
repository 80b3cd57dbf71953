//! Sparse vector math over hash maps
//!
//! A sparse vector is a `HashMap` from key to value; missing keys are zero.
//! The same helpers serve item-keyed rating vectors and tag-keyed profiles.

use std::collections::HashMap;
use std::hash::Hash;

use crate::error::{ReckonError, Result};

/// Sparse vector keyed by an arbitrary ID
pub type SparseVector<K> = HashMap<K, f64>;

/// Rating vector keyed by item ID (for a user) or user ID (for an item)
pub type RatingVector = SparseVector<i64>;

/// Sum of products over the keys both vectors share
pub fn dot<K: Eq + Hash>(a: &SparseVector<K>, b: &SparseVector<K>) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small
        .iter()
        .filter_map(|(key, x)| large.get(key).map(|y| x * y))
        .sum()
}

/// Euclidean norm; 0 for an empty vector
pub fn norm<K>(a: &SparseVector<K>) -> f64 {
    a.values().map(|x| x * x).sum::<f64>().sqrt()
}

/// Arithmetic mean of the stored values
pub fn mean<K>(a: &SparseVector<K>) -> Result<f64> {
    if a.is_empty() {
        return Err(ReckonError::EmptyVector);
    }
    Ok(a.values().sum::<f64>() / a.len() as f64)
}

/// Raw cosine similarity. NaN when either vector has zero norm.
pub fn cosine<K: Eq + Hash>(a: &SparseVector<K>, b: &SparseVector<K>) -> f64 {
    dot(a, b) / (norm(a) * norm(b))
}

/// Cosine similarity with NaN replaced by 0 and rounding noise clamped into [-1, 1]
pub fn cosine_or_zero<K: Eq + Hash>(a: &SparseVector<K>, b: &SparseVector<K>) -> f64 {
    let sim = cosine(a, b);
    if sim.is_nan() {
        0.0
    } else {
        sim.clamp(-1.0, 1.0)
    }
}

/// Subtract `offset` from every entry
pub fn center<K>(a: &mut SparseVector<K>, offset: f64) {
    for value in a.values_mut() {
        *value -= offset;
    }
}

/// Add `offset` back to every entry
pub fn uncenter<K>(a: &mut SparseVector<K>, offset: f64) {
    for value in a.values_mut() {
        *value += offset;
    }
}

/// Center a vector on its own mean, returning the mean that was removed
pub fn mean_center<K>(a: &mut SparseVector<K>) -> Result<f64> {
    let m = mean(a)?;
    center(a, m);
    Ok(m)
}
