//! The collection / query engine.
//!
//! A [`TreeCollection`] owns exactly one ordered index plus two pieces of
//! auxiliary summary state: a species directory (distinct names, keyed
//! case-folded, remembering the first-seen spelling) and five per-borough
//! running totals. Every accepted insertion updates the index and the
//! auxiliary state together, so the summaries are always consistent with
//! the stored multiset of records.
//!
//! Per-record queries (species counts, zip grouping, radius search) run as
//! one in-order traversal of the index through its structural handles,
//! threading an explicitly zero-initialized accumulator through the left
//! subtree, the node, and the right subtree. Queries with no per-record
//! filter (borough totals, distinct-name matching) are answered from the
//! auxiliary state in O(1)/O(species).

mod internal_tests;

use crate::core::geo::{haversine_km, GeoPoint};
use crate::core::index::{AvlIndex, AvlNode};
use crate::core::types::normalize::{fold_case, fold_matching};
use crate::core::types::{Borough, TreeRecord, BOROUGH_COUNT};
use std::collections::BTreeMap;
use std::io::{self, Write};

/// One borough's labeled count in a fixed five-slot result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoroughTally {
    pub borough: Borough,
    pub count: usize,
}

/// Directory of distinct species names.
///
/// Keys are case-folded; the stored value is the first-seen spelling, which
/// is what every deduplicated name list reports.
#[derive(Debug, Default, Clone)]
pub struct SpeciesDirectory {
    names: BTreeMap<String, String>,
}

impl SpeciesDirectory {
    /// Registers a spelling; returns `true` if the case-folded name was new.
    pub fn register(&mut self, name: &str) -> bool {
        let key = fold_case(name);
        if self.names.contains_key(&key) {
            return false;
        }
        self.names.insert(key, name.to_string());
        true
    }

    /// Membership test, case-insensitive.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(&fold_case(name))
    }

    /// Number of distinct species names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// First-seen spellings of every name containing `partial` under the
    /// matching folding (case-insensitive, hyphen as space). An empty
    /// `partial` matches everything.
    #[must_use]
    pub fn matching(&self, partial: &str) -> Vec<String> {
        let needle = fold_matching(partial);
        self.names
            .values()
            .filter(|name| fold_matching(name).contains(&needle))
            .cloned()
            .collect()
    }

    /// First-seen spellings in case-folded order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.values().map(String::as_str)
    }
}

/// A collection of tree census records plus its query surface.
#[derive(Debug, Default)]
pub struct TreeCollection {
    index: AvlIndex<TreeRecord>,
    species: SpeciesDirectory,
    borough_counts: [usize; BOROUGH_COUNT],
}

impl TreeCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a collection seeded with one record.
    #[must_use]
    pub fn with_record(record: TreeRecord) -> Self {
        let mut collection = Self::new();
        collection.add_tree(record);
        collection
    }

    /// Inserts a record into the index and updates the auxiliary summaries.
    ///
    /// Returns `true` when the record was newly stored. A duplicate (equal
    /// species key and id) or the empty sentinel returns `false` and leaves
    /// every count unchanged; reinsertion never double-counts. A record with
    /// an unrecognized borough is stored and its species registered, but it
    /// contributes to no borough total.
    pub fn add_tree(&mut self, record: TreeRecord) -> bool {
        if record.is_sentinel() {
            // The sentinel may occupy a tree position but is never counted.
            self.index.insert(record);
            return false;
        }
        let name = record.common_name().to_string();
        let slot = record.borough().slot();
        if !self.index.insert(record) {
            return false;
        }
        self.species.register(&name);
        if let Some(slot) = slot {
            self.borough_counts[slot] += 1;
        }
        true
    }

    /// Total number of counted records: the sum of the five borough totals.
    #[must_use]
    pub fn total_tree_count(&self) -> usize {
        self.borough_counts.iter().sum()
    }

    /// Number of distinct species names seen.
    #[must_use]
    pub fn number_of_species(&self) -> usize {
        self.species.len()
    }

    /// Number of records whose species matches `species_name`,
    /// case-insensitively and hyphen/space-insensitively.
    #[must_use]
    pub fn count_of_tree_species(&self, species_name: &str) -> usize {
        let needle = fold_matching(species_name);
        let mut total = 0;
        Self::count_where(
            self.index.root(),
            &|record| fold_matching(record.common_name()) == needle,
            &mut total,
        );
        total
    }

    /// As [`Self::count_of_tree_species`], additionally filtered by borough.
    /// An unrecognized borough name yields 0.
    #[must_use]
    pub fn count_of_tree_species_in_boro(&self, species_name: &str, boro_name: &str) -> usize {
        let borough = Borough::parse(boro_name);
        if borough == Borough::Unknown {
            return 0;
        }
        let needle = fold_matching(species_name);
        let mut total = 0;
        Self::count_where(
            self.index.root(),
            &|record| {
                record.borough() == borough && fold_matching(record.common_name()) == needle
            },
            &mut total,
        );
        total
    }

    /// Fills one tally slot per borough, in canonical order, with the count
    /// of records matching `species_name` in that borough, and returns the
    /// grand total across the five slots.
    ///
    /// Every slot is relabeled and zeroed before the traversal; nothing is
    /// assumed about caller initialization.
    pub fn get_counts_of_trees_by_boro(
        &self,
        species_name: &str,
        tallies: &mut [BoroughTally; BOROUGH_COUNT],
    ) -> usize {
        for (slot, tally) in tallies.iter_mut().enumerate() {
            *tally = BoroughTally { borough: Borough::CANONICAL[slot], count: 0 };
        }
        let needle = fold_matching(species_name);
        Self::tally_by_borough(self.index.root(), &needle, tallies);
        tallies.iter().map(|tally| tally.count).sum()
    }

    /// Total record count in a borough regardless of species, answered from
    /// the running totals. An unrecognized borough name yields 0.
    #[must_use]
    pub fn count_of_trees_in_boro(&self, boro_name: &str) -> usize {
        Borough::parse(boro_name)
            .slot()
            .map_or(0, |slot| self.borough_counts[slot])
    }

    /// Deduplicated distinct species names containing `partial`
    /// (case-insensitive, hyphen as space). An empty `partial` matches every
    /// species.
    #[must_use]
    pub fn get_matching_species(&self, partial: &str) -> Vec<String> {
        self.species.matching(partial)
    }

    /// Deduplicated distinct species names among records in `zipcode`.
    #[must_use]
    pub fn get_all_in_zipcode(&self, zipcode: u32) -> Vec<String> {
        let mut found = BTreeMap::new();
        Self::collect_species_where(
            self.index.root(),
            &|record| record.zip_code() == zipcode,
            &mut found,
        );
        found.into_values().collect()
    }

    /// Deduplicated distinct species names among records within
    /// `distance_km` of the given point, by haversine distance.
    #[must_use]
    pub fn get_all_near(&self, latitude: f64, longitude: f64, distance_km: f64) -> Vec<String> {
        let origin = GeoPoint::new(latitude, longitude);
        let mut found = BTreeMap::new();
        Self::collect_species_where(
            self.index.root(),
            &|record| haversine_km(origin, record.position()) <= distance_km,
            &mut found,
        );
        found.into_values().collect()
    }

    /// Writes every distinct species name, one per line, in index order
    /// (case-folded lexicographic). Driven by the in-order traversal, not
    /// the species directory, so the ordering follows the index key.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the destination writer.
    pub fn print_all_species<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let mut last_key: Option<String> = None;
        for record in self.index.iter() {
            if record.is_sentinel() {
                continue;
            }
            let key = fold_case(record.common_name());
            if last_key.as_deref() != Some(key.as_str()) {
                writeln!(out, "{}", record.common_name())?;
                last_key = Some(key);
            }
        }
        Ok(())
    }

    /// Writes the whole collection, one record per line, in index order.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the destination writer.
    pub fn print_all<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for record in self.index.iter() {
            if record.is_sentinel() {
                continue;
            }
            writeln!(out, "{record}")?;
        }
        Ok(())
    }

    /// Read-only handle to the underlying ordered index.
    #[must_use]
    pub const fn index(&self) -> &AvlIndex<TreeRecord> {
        &self.index
    }

    /// In-order counting traversal. The accumulator starts from the
    /// caller's explicit zero and is threaded through left subtree, node,
    /// and right subtree; the sentinel never matches.
    fn count_where(
        node: Option<&AvlNode<TreeRecord>>,
        predicate: &impl Fn(&TreeRecord) -> bool,
        total: &mut usize,
    ) {
        if let Some(node) = node {
            Self::count_where(node.left(), predicate, total);
            let record = node.value();
            if !record.is_sentinel() && predicate(record) {
                *total += 1;
            }
            Self::count_where(node.right(), predicate, total);
        }
    }

    /// In-order collecting traversal for deduplicated name lists: matching
    /// records contribute their species name keyed case-folded, first-seen
    /// spelling wins.
    fn collect_species_where(
        node: Option<&AvlNode<TreeRecord>>,
        predicate: &impl Fn(&TreeRecord) -> bool,
        found: &mut BTreeMap<String, String>,
    ) {
        if let Some(node) = node {
            Self::collect_species_where(node.left(), predicate, found);
            let record = node.value();
            if !record.is_sentinel() && predicate(record) {
                found
                    .entry(fold_case(record.common_name()))
                    .or_insert_with(|| record.common_name().to_string());
            }
            Self::collect_species_where(node.right(), predicate, found);
        }
    }

    /// In-order tallying traversal for the per-borough count query.
    fn tally_by_borough(
        node: Option<&AvlNode<TreeRecord>>,
        needle: &str,
        tallies: &mut [BoroughTally; BOROUGH_COUNT],
    ) {
        if let Some(node) = node {
            Self::tally_by_borough(node.left(), needle, tallies);
            let record = node.value();
            if !record.is_sentinel() && fold_matching(record.common_name()) == needle {
                if let Some(slot) = record.borough().slot() {
                    tallies[slot].count += 1;
                }
            }
            Self::tally_by_borough(node.right(), needle, tallies);
        }
    }
}
