//! Public API module for the census database.
//!
//! The main entry point is the [`ArborDb`] struct, which owns one
//! [`crate::core::census::TreeCollection`] plus its configuration, loads CSV
//! data through the ingest collaborator, and delegates every query.

pub mod db;

pub use db::ArborDb;

#[cfg(test)]
mod tests {
    mod db_tests;
}
