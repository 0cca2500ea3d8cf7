use kleplace_core::PlacedKey;
use tracing::debug;

use crate::{Cell, Error, Layout, LayoutRow, Modifier};

#[derive(Debug, Clone, Copy)]
struct Cursor {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

impl Cursor {
    fn new() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            w: 1.0,
            h: 1.0,
        }
    }

    fn start_row(&mut self) {
        self.x = 0.0;
        self.w = 1.0;
        self.h = 1.0;
    }

    fn apply(&mut self, m: &Modifier) {
        if let Some(dx) = m.x {
            self.x += dx;
        }
        if let Some(dy) = m.y {
            self.y += dy;
        }
        if let Some(w) = m.w {
            self.w = w;
        }
        if let Some(h) = m.h {
            self.h = h;
        }
    }

    fn emit(&mut self, label: &str) -> PlacedKey {
        let key = PlacedKey::new(label, self.x, self.y, self.w, self.h);
        self.x += self.w;
        self.w = 1.0;
        self.h = 1.0;
        key
    }

    fn end_row(&mut self) {
        self.y += 1.0;
    }
}

/// Resolve every label cell of `layout` to grid coordinates.
///
/// Keys come out row-major, left to right. Header rows are skipped without
/// touching the cursor.
#[must_use]
pub fn parse(layout: &Layout) -> Vec<PlacedKey> {
    let mut cursor = Cursor::new();
    let mut keys = Vec::with_capacity(layout.key_count());

    for (row_idx, row) in layout.rows.iter().enumerate() {
        if row.is_header() {
            debug!(row = row_idx, "skipping header row");
            continue;
        }
        let LayoutRow::Keys(cells) = row else {
            continue;
        };

        cursor.start_row();
        for cell in cells {
            match cell {
                Cell::Modifier(m) => cursor.apply(m),
                Cell::Label(label) => keys.push(cursor.emit(label)),
            }
        }
        cursor.end_row();
    }

    keys
}

pub fn parse_json_str(s: &str) -> Result<Vec<PlacedKey>, Error> {
    Ok(parse(&Layout::from_json_str(s)?))
}

impl Layout {
    #[must_use]
    pub fn keys(&self) -> Vec<PlacedKey> {
        parse(self)
    }
}
