use std::fmt;

use serde::{Deserialize, Serialize};

use crate::PcbError;

/// Opaque handle a [`Board`] hands out for one of its components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentId(pub usize);

/// A component as seen by the placer: its handle plus the two strings used
/// for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentRef {
    pub id: ComponentId,
    /// Reference designator, e.g. `SW12`.
    pub reference: String,
    /// Display value, e.g. the key legend a switch is meant for.
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}

/// The host CAD document the placer reads from and writes to.
///
/// Positions are in millimetres; unit conversion to the host's internal
/// units is the implementation's job.
pub trait Board {
    fn footprints(&self) -> Vec<ComponentRef>;

    fn set_position(&mut self, fp: &ComponentRef, x: f64, y: f64) -> Result<(), PcbError>;

    fn set_orientation_degrees(&mut self, fp: &ComponentRef, degrees: f64)
        -> Result<(), PcbError>;

    /// Move the component to the opposite board side.
    fn flip(&mut self, fp: &ComponentRef) -> Result<(), PcbError>;

    fn is_flipped(&self, fp: &ComponentRef) -> Result<bool, PcbError>;

    fn notify_user(&mut self, message: &str, severity: Severity);

    fn refresh_view(&mut self) {}
}
