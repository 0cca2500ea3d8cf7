use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{Board, ComponentId, ComponentRef, PcbError, Severity};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Footprint {
    pub reference: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub orientation: f64,
    #[serde(default)]
    pub flipped: bool,
}

impl Footprint {
    #[must_use]
    pub fn new(reference: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            value: value.into(),
            x: 0.0,
            y: 0.0,
            orientation: 0.0,
            flipped: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

/// A board held entirely in memory, loadable from and savable to JSON.
///
/// Flipping only toggles the side flag; the placer always sets position and
/// orientation explicitly afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MemoryBoard {
    pub footprints: Vec<Footprint>,
    #[serde(skip)]
    pub notifications: Vec<Notification>,
    #[serde(skip)]
    pub refresh_count: usize,
}

impl MemoryBoard {
    #[must_use]
    pub fn new(footprints: Vec<Footprint>) -> Self {
        Self {
            footprints,
            ..Self::default()
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self, PcbError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, PcbError> {
        let raw = std::fs::read_to_string(path).map_err(|source| PcbError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn to_json_string_pretty(&self) -> Result<String, PcbError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[must_use]
    pub fn footprint(&self, reference: &str) -> Option<&Footprint> {
        self.footprints.iter().find(|fp| fp.reference == reference)
    }

    fn get_mut(&mut self, fp: &ComponentRef) -> Result<&mut Footprint, PcbError> {
        self.footprints
            .get_mut(fp.id.0)
            .filter(|f| f.reference == fp.reference)
            .ok_or_else(|| PcbError::UnknownComponent {
                reference: fp.reference.clone(),
            })
    }

    fn get(&self, fp: &ComponentRef) -> Result<&Footprint, PcbError> {
        self.footprints
            .get(fp.id.0)
            .filter(|f| f.reference == fp.reference)
            .ok_or_else(|| PcbError::UnknownComponent {
                reference: fp.reference.clone(),
            })
    }
}

impl Board for MemoryBoard {
    fn footprints(&self) -> Vec<ComponentRef> {
        self.footprints
            .iter()
            .enumerate()
            .map(|(idx, fp)| ComponentRef {
                id: ComponentId(idx),
                reference: fp.reference.clone(),
                value: fp.value.clone(),
            })
            .collect()
    }

    fn set_position(&mut self, fp: &ComponentRef, x: f64, y: f64) -> Result<(), PcbError> {
        let footprint = self.get_mut(fp)?;
        footprint.x = x;
        footprint.y = y;
        Ok(())
    }

    fn set_orientation_degrees(
        &mut self,
        fp: &ComponentRef,
        degrees: f64,
    ) -> Result<(), PcbError> {
        self.get_mut(fp)?.orientation = degrees;
        Ok(())
    }

    fn flip(&mut self, fp: &ComponentRef) -> Result<(), PcbError> {
        let footprint = self.get_mut(fp)?;
        footprint.flipped = !footprint.flipped;
        Ok(())
    }

    fn is_flipped(&self, fp: &ComponentRef) -> Result<bool, PcbError> {
        Ok(self.get(fp)?.flipped)
    }

    fn notify_user(&mut self, message: &str, severity: Severity) {
        match severity {
            Severity::Info => info!(%severity, "{message}"),
            _ => warn!(%severity, "{message}"),
        }
        self.notifications.push(Notification {
            message: message.to_string(),
            severity,
        });
    }

    fn refresh_view(&mut self) {
        self.refresh_count += 1;
    }
}
