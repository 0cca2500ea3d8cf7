//! Core data types shared by the layout parser and the board placer.

mod key;
mod point;

pub use key::PlacedKey;
pub use point::Point;
