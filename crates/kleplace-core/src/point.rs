use serde::{Deserialize, Serialize};

/// A physical board position in millimetres.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    /// Orientation in degrees.
    pub r: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64, r: f64) -> Self {
        Self { x, y, r }
    }

    #[must_use]
    pub fn xy(x: f64, y: f64) -> Self {
        Self::new(x, y, 0.0)
    }

    /// Translate by `delta` along the board axes. Orientation is not applied
    /// to the delta.
    pub fn shift(&mut self, delta: [f64; 2]) -> &mut Self {
        self.x += delta[0];
        self.y += delta[1];
        self
    }

    #[must_use]
    pub fn shifted(mut self, delta: [f64; 2]) -> Self {
        self.shift(delta);
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, r: f64) -> Self {
        self.r = r;
        self
    }
}
