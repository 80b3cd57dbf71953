//! Reckon Core Library
//!
//! Rating prediction for collaborative-filtering recommenders: damped item means,
//! user-user and item-item neighborhood scoring, and weighted content profiles.

pub mod config;
pub mod error;
pub mod format;
pub mod import;
pub mod item_item;
pub mod logging;
pub mod mean;
pub mod profile;
pub mod rating;
pub mod scorer;
pub mod store;
pub mod tags;
pub mod user_user;
pub mod vectors;

#[cfg(test)]
pub(crate) mod testing;
