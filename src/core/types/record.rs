//! The tree census record value type.

use crate::core::geo::GeoPoint;
use crate::core::types::categories::{Borough, HealthRating, LifeStatus};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// One tree census entry with ten semantic fields.
///
/// A record is immutable after construction: it is either fully populated
/// from valid input or it is the canonical empty [sentinel](Self::is_sentinel)
/// (all numeric fields zero, all strings empty, all enums `Unknown`). No
/// partially-populated record exists.
///
/// Records compare by (case-folded species common name, id); this ordering
/// governs the index shape and all in-order traversal output. Equality and
/// ordering deliberately ignore every other field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreeRecord {
    id: u32,
    diameter: u32,
    status: LifeStatus,
    health: HealthRating,
    spc_common: String,
    borough: Borough,
    zipcode: u32,
    address: String,
    latitude: f64,
    longitude: f64,
}

impl TreeRecord {
    /// Constructs a fully-populated record from already-validated fields.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        id: u32,
        diameter: u32,
        status: LifeStatus,
        health: HealthRating,
        spc_common: impl Into<String>,
        borough: Borough,
        zipcode: u32,
        address: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            id,
            diameter,
            status,
            health,
            spc_common: spc_common.into(),
            borough,
            zipcode,
            address: address.into(),
            latitude,
            longitude,
        }
    }

    /// The canonical empty sentinel. It may be inserted into an index (it
    /// occupies a valid tree position) but it never matches any category
    /// predicate and is never counted or listed.
    #[must_use]
    pub fn sentinel() -> Self {
        Self::default()
    }

    /// True for the canonical empty sentinel.
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        self.id == 0 && self.spc_common.is_empty() && self.address.is_empty()
    }

    #[must_use]
    pub const fn id(&self) -> u32 {
        self.id
    }

    #[must_use]
    pub const fn diameter(&self) -> u32 {
        self.diameter
    }

    #[must_use]
    pub const fn life_status(&self) -> LifeStatus {
        self.status
    }

    #[must_use]
    pub const fn health(&self) -> HealthRating {
        self.health
    }

    /// Species common name in its recorded spelling.
    #[must_use]
    pub fn common_name(&self) -> &str {
        &self.spc_common
    }

    #[must_use]
    pub const fn borough(&self) -> Borough {
        self.borough
    }

    #[must_use]
    pub const fn zip_code(&self) -> u32 {
        self.zipcode
    }

    #[must_use]
    pub fn nearest_address(&self) -> &str {
        &self.address
    }

    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Recorded position as a geographic point.
    #[must_use]
    pub const fn position(&self) -> GeoPoint {
        GeoPoint { latitude: self.latitude, longitude: self.longitude }
    }

    /// Case-folded species name, the primary ordering key.
    fn species_key(&self) -> impl Iterator<Item = char> + '_ {
        self.spc_common.chars().flat_map(char::to_lowercase)
    }
}

impl PartialEq for TreeRecord {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TreeRecord {}

impl PartialOrd for TreeRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TreeRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.species_key()
            .cmp(other.species_key())
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl fmt::Display for TreeRecord {
    /// Dump line format:
    /// `species,id,diameter,status,health,address,zip,borough,latitude,longitude`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{},{},{},{},{}",
            self.spc_common,
            self.id,
            self.diameter,
            self.status,
            self.health,
            self.address,
            self.zipcode,
            self.borough,
            self.latitude,
            self.longitude
        )
    }
}
