//! Core engine modules: record types, the balanced ordered index, the
//! query-engine collection, geodistance, CSV ingest, and configuration.

pub mod census;
pub mod common;
pub mod config;
pub mod geo;
pub mod index;
pub mod ingest;
pub mod types;
