//! Keyboard-layout-editor (KLE) JSON parsing.
//!
//! A layout is a list of rows; each row is a list of cells that are either
//! modifier objects (`{"x": .., "y": .., "w": .., "h": ..}`) or key labels.
//! [`parse`] walks the rows with a cursor and emits one [`PlacedKey`] per
//! label, in grid units.

mod error;
mod kle;
mod layout;

pub use error::{Error, Location};
pub use kle::{parse, parse_json_str};
pub use kleplace_core::PlacedKey;
pub use layout::{Cell, Layout, LayoutRow, Modifier};
