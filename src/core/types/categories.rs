//! Closed category enumerations carried by every census record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Life status of a recorded tree.
///
/// Census input accepts the documented literals (`Alive`, `Dead`, `Stump`)
/// or a blank field, which maps to `Unknown`; anything else is rejected by
/// the ingest collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LifeStatus {
    Alive,
    Dead,
    Stump,
    #[default]
    Unknown,
}

impl LifeStatus {
    /// Parses a census field; `None` means the value is not a recognized
    /// literal (a blank field is recognized and maps to `Unknown`).
    #[must_use]
    pub fn parse(field: &str) -> Option<Self> {
        match field.trim().to_lowercase().as_str() {
            "alive" => Some(Self::Alive),
            "dead" => Some(Self::Dead),
            "stump" => Some(Self::Stump),
            "" => Some(Self::Unknown),
            _ => None,
        }
    }
}

impl fmt::Display for LifeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Unknown prints as the empty string in record dumps.
        let s = match self {
            Self::Alive => "Alive",
            Self::Dead => "Dead",
            Self::Stump => "Stump",
            Self::Unknown => "",
        };
        write!(f, "{s}")
    }
}

/// Health rating of a recorded tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HealthRating {
    Good,
    Fair,
    Poor,
    #[default]
    Unknown,
}

impl HealthRating {
    /// Parses a census field; `None` means an unrecognized literal.
    #[must_use]
    pub fn parse(field: &str) -> Option<Self> {
        match field.trim().to_lowercase().as_str() {
            "good" => Some(Self::Good),
            "fair" => Some(Self::Fair),
            "poor" => Some(Self::Poor),
            "" => Some(Self::Unknown),
            _ => None,
        }
    }
}

impl fmt::Display for HealthRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
            Self::Unknown => "",
        };
        write!(f, "{s}")
    }
}

/// One of the five named boroughs, plus an explicit `Unknown` for records
/// constructed with an unrecognized borough name.
///
/// The canonical slot order (Manhattan, Bronx, Brooklyn, Queens, Staten
/// Island) is fixed and indexable via [`Borough::slot`]; `Unknown` has no
/// slot and is never tallied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Borough {
    Manhattan,
    Bronx,
    Brooklyn,
    Queens,
    StatenIsland,
    #[default]
    Unknown,
}

/// Number of named boroughs (the `Unknown` variant excluded).
pub const BOROUGH_COUNT: usize = 5;

impl Borough {
    /// The five named boroughs in canonical slot order.
    pub const CANONICAL: [Self; BOROUGH_COUNT] =
        [Self::Manhattan, Self::Bronx, Self::Brooklyn, Self::Queens, Self::StatenIsland];

    /// Parses a borough name, case-insensitively and tolerating hyphen for
    /// space ("staten-island"). Unrecognized names yield `Unknown`.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match crate::core::types::normalize::fold_matching(name.trim()).as_str() {
            "manhattan" => Self::Manhattan,
            "bronx" => Self::Bronx,
            "brooklyn" => Self::Brooklyn,
            "queens" => Self::Queens,
            "staten island" => Self::StatenIsland,
            _ => Self::Unknown,
        }
    }

    /// Canonical tally slot for this borough; `None` for `Unknown`.
    #[must_use]
    pub const fn slot(self) -> Option<usize> {
        match self {
            Self::Manhattan => Some(0),
            Self::Bronx => Some(1),
            Self::Brooklyn => Some(2),
            Self::Queens => Some(3),
            Self::StatenIsland => Some(4),
            Self::Unknown => None,
        }
    }

    /// Display name; empty for `Unknown`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manhattan => "Manhattan",
            Self::Bronx => "Bronx",
            Self::Brooklyn => "Brooklyn",
            Self::Queens => "Queens",
            Self::StatenIsland => "Staten Island",
            Self::Unknown => "",
        }
    }
}

impl fmt::Display for Borough {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
