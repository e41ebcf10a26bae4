#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::panic)]
#![warn(clippy::cast_possible_truncation)]
#![warn(clippy::cast_precision_loss)]
#![warn(clippy::cast_sign_loss)]
#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

//! # ArborDB: An Ordered Index for Municipal Tree Census Data
//!
//! `arbordb` stores tree census records in a self-balancing binary search
//! tree ordered by (case-folded species common name, record id) and answers
//! multiple query shapes against that single index:
//! - exact and partial species-name matches (case- and hyphen-insensitive)
//! - per-borough totals and per-borough species counts
//! - zip-code grouping
//! - radius search by geographic coordinates (haversine distance)
//!
//! The crate is split into the core engine (`core::index`, `core::census`,
//! `core::types`, `core::geo`), the CSV ingest collaborator (`core::ingest`),
//! and a thin facade (`api::ArborDb`) that wires configuration, loading, and
//! queries together.
//!
//! All operations are single-threaded, synchronous, in-memory computations;
//! callers that need concurrent access must serialize externally.

pub mod api;
pub mod core;

// Re-export key types for easier use by library consumers
pub use crate::api::ArborDb;
pub use crate::core::common::ArborError;

/// Core result type for the library
pub type Result<T> = std::result::Result<T, ArborError>;
