use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed layout at {location}: {reason}")]
    MalformedLayout { location: Location, reason: String },
}

impl Error {
    pub(crate) fn malformed(location: Location, reason: impl Into<String>) -> Self {
        Self::MalformedLayout {
            location,
            reason: reason.into(),
        }
    }
}

/// Position of an offending element inside the layout document.
///
/// Indices are zero-based and count every top-level entry, header rows
/// included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Root,
    Row(usize),
    Cell { row: usize, cell: usize },
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Root => write!(f, "root"),
            Location::Row(row) => write!(f, "row {row}"),
            Location::Cell { row, cell } => write!(f, "row {row}, cell {cell}"),
        }
    }
}
