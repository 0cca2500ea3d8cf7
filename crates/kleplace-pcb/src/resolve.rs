use kleplace_core::{PlacedKey, Point};

use crate::SecondaryConfig;

/// Physical centre of a key.
///
/// Width centres the key horizontally. Vertically the offset is always half
/// a unit, whatever the key height.
#[must_use]
pub fn resolve_primary_position(key: &PlacedKey, pitch: f64) -> Point {
    Point::xy((key.x + 0.5 * key.w) * pitch, (key.y + 0.5) * pitch)
}

/// Position of the paired component: the primary centre shifted by the
/// configured offsets, with `r` set to the fixed angle.
#[must_use]
pub fn resolve_secondary_position(primary: Point, secondary: &SecondaryConfig, pitch: f64) -> Point {
    Point::xy(primary.x, primary.y)
        .shifted([secondary.x_offset * pitch, secondary.y_offset * pitch])
        .with_rotation(secondary.angle)
}
