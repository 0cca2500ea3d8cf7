use indexmap::IndexMap;
use serde_json::Value;

use crate::{Error, Location};

const GEOMETRY_KEYS: [&str; 4] = ["x", "y", "w", "h"];
const HEADER_KEYS: [&str; 2] = ["author", "name"];

/// Cursor adjustments carried by an object cell.
///
/// Only `x`, `y`, `w` and `h` affect placement. Every other key (KLE styling
/// such as `c`, `t`, `a`, or header fields such as `name`) is kept in
/// `extra` as-is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Modifier {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub w: Option<f64>,
    pub h: Option<f64>,
    pub extra: IndexMap<String, Value>,
}

impl Modifier {
    /// True when this cell carries layout metadata (`author` or `name`).
    #[must_use]
    pub fn is_header(&self) -> bool {
        HEADER_KEYS.iter().any(|k| self.extra.contains_key(*k))
    }

    fn from_map(
        map: &serde_json::Map<String, Value>,
        location: Location,
    ) -> Result<Self, Error> {
        let mut modifier = Modifier::default();
        for (key, value) in map {
            if !GEOMETRY_KEYS.contains(&key.as_str()) {
                modifier.extra.insert(key.clone(), value.clone());
                continue;
            }
            let n = value
                .as_f64()
                .filter(|n| n.is_finite())
                .ok_or_else(|| {
                    Error::malformed(location, format!("\"{key}\" must be a number, got {value}"))
                })?;
            match key.as_str() {
                "x" => modifier.x = Some(n),
                "y" => modifier.y = Some(n),
                "w" => modifier.w = Some(n),
                _ => modifier.h = Some(n),
            }
        }
        Ok(modifier)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Modifier(Modifier),
    Label(String),
}

impl Cell {
    fn from_value(value: &Value, location: Location) -> Result<Self, Error> {
        match value {
            Value::Object(map) => Ok(Cell::Modifier(Modifier::from_map(map, location)?)),
            Value::String(label) => Ok(Cell::Label(label.clone())),
            other => Err(Error::malformed(
                location,
                format!("cells must be objects or strings, got {}", kind(other)),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutRow {
    Keys(Vec<Cell>),
    /// A bare object at the top level: KLE keyboard metadata.
    Metadata(IndexMap<String, Value>),
}

impl LayoutRow {
    /// Header rows never contribute keys and never move the cursor.
    #[must_use]
    pub fn is_header(&self) -> bool {
        match self {
            LayoutRow::Metadata(_) => true,
            LayoutRow::Keys(cells) => cells.iter().any(|cell| match cell {
                Cell::Modifier(m) => m.is_header(),
                Cell::Label(_) => false,
            }),
        }
    }

    #[must_use]
    pub fn label_count(&self) -> usize {
        match self {
            LayoutRow::Metadata(_) => 0,
            LayoutRow::Keys(cells) => cells
                .iter()
                .filter(|c| matches!(c, Cell::Label(_)))
                .count(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    pub rows: Vec<LayoutRow>,
}

impl Layout {
    pub fn from_json_str(s: &str) -> Result<Self, Error> {
        let value: Value = serde_json::from_str(s)?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self, Error> {
        let Value::Array(top) = value else {
            return Err(Error::malformed(
                Location::Root,
                format!("layout root must be an array, got {}", kind(value)),
            ));
        };

        let mut rows = Vec::with_capacity(top.len());
        for (row_idx, row) in top.iter().enumerate() {
            let row = match row {
                Value::Array(items) => {
                    let cells = items
                        .iter()
                        .enumerate()
                        .map(|(cell_idx, item)| {
                            Cell::from_value(
                                item,
                                Location::Cell {
                                    row: row_idx,
                                    cell: cell_idx,
                                },
                            )
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    LayoutRow::Keys(cells)
                }
                Value::Object(map) => LayoutRow::Metadata(
                    map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
                ),
                other => {
                    return Err(Error::malformed(
                        Location::Row(row_idx),
                        format!("rows must be arrays, got {}", kind(other)),
                    ));
                }
            };
            rows.push(row);
        }
        Ok(Self { rows })
    }

    /// Layout metadata: the first top-level object or header cell that carries
    /// `name`/`author`, if any.
    #[must_use]
    pub fn metadata(&self) -> Option<&IndexMap<String, Value>> {
        self.rows.iter().find_map(|row| match row {
            LayoutRow::Metadata(map) => Some(map),
            LayoutRow::Keys(cells) => cells.iter().find_map(|cell| match cell {
                Cell::Modifier(m) if m.is_header() => Some(&m.extra),
                _ => None,
            }),
        })
    }

    /// Number of label cells outside header rows.
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| !row.is_header())
            .map(LayoutRow::label_count)
            .sum()
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
