use crate::core::census::{BoroughTally, TreeCollection};
use crate::core::common::ArborError;
use crate::core::config::Config;
use crate::core::ingest::{self, LoadStats};
use crate::core::types::{TreeRecord, BOROUGH_COUNT};
use std::io::{self, Write};
use std::path::Path;

/// `ArborDb` is the primary structure providing the public API for the
/// census index.
///
/// It owns a [`TreeCollection`] and its [`Config`], loads census CSV files
/// through the ingest collaborator, and exposes one delegating method per
/// query operation. The collection is single-threaded; callers needing
/// concurrent access must serialize externally.
#[derive(Debug, Default)]
pub struct ArborDb {
    config: Config,
    collection: TreeCollection,
}

impl ArborDb {
    /// Creates an empty database with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty database with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `ArborError::Configuration` when the configuration fails
    /// validation.
    pub fn with_config(config: Config) -> Result<Self, ArborError> {
        config.validate()?;
        Ok(Self { config, collection: TreeCollection::new() })
    }

    /// Creates a database from the given configuration and, when a data
    /// file is configured, loads it immediately.
    ///
    /// # Errors
    ///
    /// Returns configuration validation errors plus everything
    /// [`Self::load_csv`] can produce.
    pub fn open(config: Config) -> Result<Self, ArborError> {
        let mut db = Self::with_config(config)?;
        if let Some(path) = db.config.data_file.clone() {
            db.load_csv(path)?;
        }
        Ok(db)
    }

    /// Loads a census CSV file into the collection, honoring the configured
    /// header and strictness settings.
    ///
    /// # Errors
    ///
    /// Returns `ArborError::Io` when the file cannot be read and
    /// `ArborError::MalformedRecord` for the first bad line in strict mode.
    pub fn load_csv(&mut self, path: impl AsRef<Path>) -> Result<LoadStats, ArborError> {
        let stats = ingest::load_census_file(path.as_ref(), &mut self.collection, &self.config)?;
        log::info!(
            "loaded {} ({} scanned, {} loaded, {} duplicates, {} skipped)",
            path.as_ref().display(),
            stats.scanned,
            stats.loaded,
            stats.duplicates,
            stats.skipped
        );
        Ok(stats)
    }

    /// Inserts one already-constructed record; returns whether it was newly
    /// counted.
    pub fn add_record(&mut self, record: TreeRecord) -> bool {
        self.collection.add_tree(record)
    }

    /// Total number of counted records.
    #[must_use]
    pub fn total_tree_count(&self) -> usize {
        self.collection.total_tree_count()
    }

    /// Number of distinct species names.
    #[must_use]
    pub fn number_of_species(&self) -> usize {
        self.collection.number_of_species()
    }

    /// Records matching a species name, case- and hyphen-insensitively.
    #[must_use]
    pub fn count_of_tree_species(&self, species_name: &str) -> usize {
        log::debug!("query: count_of_tree_species({species_name:?})");
        self.collection.count_of_tree_species(species_name)
    }

    /// Records matching a species name within one borough.
    #[must_use]
    pub fn count_of_tree_species_in_boro(&self, species_name: &str, boro_name: &str) -> usize {
        log::debug!("query: count_of_tree_species_in_boro({species_name:?}, {boro_name:?})");
        self.collection.count_of_tree_species_in_boro(species_name, boro_name)
    }

    /// Per-borough matching counts; see
    /// [`TreeCollection::get_counts_of_trees_by_boro`].
    pub fn get_counts_of_trees_by_boro(
        &self,
        species_name: &str,
        tallies: &mut [BoroughTally; BOROUGH_COUNT],
    ) -> usize {
        log::debug!("query: get_counts_of_trees_by_boro({species_name:?})");
        self.collection.get_counts_of_trees_by_boro(species_name, tallies)
    }

    /// Total records in one borough.
    #[must_use]
    pub fn count_of_trees_in_boro(&self, boro_name: &str) -> usize {
        log::debug!("query: count_of_trees_in_boro({boro_name:?})");
        self.collection.count_of_trees_in_boro(boro_name)
    }

    /// Distinct species names containing a partial name.
    #[must_use]
    pub fn get_matching_species(&self, partial: &str) -> Vec<String> {
        log::debug!("query: get_matching_species({partial:?})");
        self.collection.get_matching_species(partial)
    }

    /// Distinct species names in one zip code.
    #[must_use]
    pub fn get_all_in_zipcode(&self, zipcode: u32) -> Vec<String> {
        log::debug!("query: get_all_in_zipcode({zipcode})");
        self.collection.get_all_in_zipcode(zipcode)
    }

    /// Distinct species names within `distance_km` of a point.
    #[must_use]
    pub fn get_all_near(&self, latitude: f64, longitude: f64, distance_km: f64) -> Vec<String> {
        log::debug!("query: get_all_near({latitude}, {longitude}, {distance_km})");
        self.collection.get_all_near(latitude, longitude, distance_km)
    }

    /// Distinct species names within the configured default radius.
    #[must_use]
    pub fn get_all_near_default(&self, latitude: f64, longitude: f64) -> Vec<String> {
        self.get_all_near(latitude, longitude, self.config.default_radius_km)
    }

    /// Writes every distinct species name, one per line, in index order.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the destination writer.
    pub fn print_all_species<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.collection.print_all_species(out)
    }

    /// Writes the whole collection, one record per line, in index order.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the destination writer.
    pub fn print_all<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.collection.print_all(out)
    }

    /// Read-only handle to the underlying collection.
    #[must_use]
    pub const fn collection(&self) -> &TreeCollection {
        &self.collection
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }
}
