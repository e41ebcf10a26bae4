//! Record value types for the census index.
//!
//! A [`TreeRecord`] is immutable after construction and orders by
//! (case-folded species common name, record id); that ordering governs the
//! shape of the index and every in-order traversal.

pub mod categories;
pub mod normalize;
pub mod record;

pub use categories::{Borough, HealthRating, LifeStatus, BOROUGH_COUNT};
pub use record::TreeRecord;
