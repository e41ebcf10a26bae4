use std::fmt;

/// Central error type for the crate.
///
/// The taxonomy is deliberately narrow. Queries never fail: an unknown
/// species, borough, or zip code yields an empty result or a zero count, not
/// an error. A violated structural invariant inside the index is a
/// programming error and is caught by `debug_assert!` rather than surfaced
/// as a variant here.
#[derive(Debug)]
pub enum ArborError {
    /// I/O failure while loading census data or writing a report.
    Io(std::io::Error),
    /// A raw census line failed field validation. Only the ingest
    /// collaborator produces this; the core index never does.
    MalformedRecord { line: String, reason: String },
    /// Configuration file could not be parsed or failed validation.
    Configuration(String),
    /// An impossible state surfaced at a module boundary.
    Internal(String),
}

impl fmt::Display for ArborError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO Error: {e}"),
            Self::MalformedRecord { line, reason } => {
                write!(f, "Malformed record: {reason} in line '{line}'")
            }
            Self::Configuration(s) => write!(f, "Configuration error: {s}"),
            Self::Internal(s) => write!(f, "Internal Error: {s}"),
        }
    }
}

impl std::error::Error for ArborError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

// Manual From implementations
impl From<std::io::Error> for ArborError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
