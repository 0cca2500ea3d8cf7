//! Footprint placement on a PCB from parsed layout keys.
//!
//! Switch footprints (`SW<n>`) are matched to keys by their value; each
//! switch pulls along the diode (`D<n>`) carrying the same number. The CAD
//! host is abstracted behind [`Board`]; [`MemoryBoard`] is a host-free
//! implementation.

mod board;
mod config;
mod memory;
mod place;
mod refdes;
mod resolve;

use std::path::PathBuf;

pub use board::{Board, ComponentId, ComponentRef, Severity};
pub use config::{PlacementConfig, SecondaryConfig};
pub use kleplace_core::{PlacedKey, Point};
pub use memory::{Footprint, MemoryBoard, Notification};
pub use place::{place_layout, LayoutResolver, PlacedFootprint, PlacementReport, SecondaryOutcome};
pub use refdes::{RefMatcher, RefPattern};
pub use resolve::{resolve_primary_position, resolve_secondary_position};

#[derive(Debug, thiserror::Error)]
pub enum PcbError {
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    ConfigYaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("invalid reference prefix \"{prefix}\": {source}")]
    Pattern {
        prefix: String,
        #[source]
        source: regex::Error,
    },
    #[error("failed to parse board: {0}")]
    BoardJson(#[from] serde_json::Error),
    #[error("component {reference} is not on the board")]
    UnknownComponent { reference: String },
}
