use serde::{Deserialize, Serialize};

/// A key emitted by the layout parser.
///
/// `x` and `y` are the top-left corner in grid units (not millimetres);
/// `w` and `h` are the key size in grid units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlacedKey {
    pub label: String,
    pub x: f64,
    pub y: f64,
    #[serde(default = "default_dimension")]
    pub w: f64,
    #[serde(default = "default_dimension")]
    pub h: f64,
}

fn default_dimension() -> f64 {
    1.0
}

impl PlacedKey {
    #[must_use]
    pub fn new(label: impl Into<String>, x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            label: label.into(),
            x,
            y,
            w,
            h,
        }
    }

    /// A 1x1 key at `(x, y)`.
    #[must_use]
    pub fn unit(label: impl Into<String>, x: f64, y: f64) -> Self {
        Self::new(label, x, y, 1.0, 1.0)
    }

    /// Label with surrounding whitespace removed and lowercased, the form used
    /// when comparing against footprint values.
    #[must_use]
    pub fn normalized_label(&self) -> String {
        self.label.trim().to_lowercase()
    }
}
