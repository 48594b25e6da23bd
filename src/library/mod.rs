//! Cell library: the table of known symbols and their pin geometry.
//!
//! A library maps a cell type name to the pins its symbol exposes, each
//! with a vertical offset (`dy`) from the instance origin and a horizontal
//! distance (`dx`) from the origin to the pin tip. Enumeration order is the
//! declaration order of the table, which makes substring resolution
//! deterministic.

pub mod pins;
pub mod resolver;
pub mod sky130;

pub use pins::{PinConvention, PinSide, is_power_pin};
pub use resolver::{CellResolver, PinRemap, Resolution};

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a library table from disk.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("cannot read library '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed library table: {0}")]
    Json(#[from] serde_json::Error),
}

// ─── PinMetric ───────────────────────────────────────────────────────────────

/// Geometric offset of one pin relative to its symbol's origin.
///
/// Serialized as a two-element array `[dy, dx]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(i64, i64)", into = "(i64, i64)")]
pub struct PinMetric {
    pub dy: i64,
    pub dx: i64,
}

impl PinMetric {
    pub const fn new(dy: i64, dx: i64) -> Self {
        Self { dy, dx }
    }
}

impl From<(i64, i64)> for PinMetric {
    fn from((dy, dx): (i64, i64)) -> Self {
        Self { dy, dx }
    }
}

impl From<PinMetric> for (i64, i64) {
    fn from(m: PinMetric) -> Self {
        (m.dy, m.dx)
    }
}

/// Result of a pin metric lookup.
///
/// Keeps a deliberate zero-offset pin apart from one the table simply
/// does not model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricLookup {
    Found(PinMetric),
    Default(PinMetric),
}

impl MetricLookup {
    pub fn metric(&self) -> PinMetric {
        match *self {
            MetricLookup::Found(m) | MetricLookup::Default(m) => m,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, MetricLookup::Default(_))
    }
}

// ─── CellLibrary ─────────────────────────────────────────────────────────────

pub type PinTable = IndexMap<String, PinMetric>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellLibrary {
    cells: IndexMap<String, PinTable>,
}

impl CellLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in sky130_fd_sc_hd subset.
    pub fn sky130() -> Self {
        sky130::builtin()
    }

    /// Parse a JSON table of the form `{"cell": {"PIN": [dy, dx], ...}, ...}`.
    pub fn from_json_str(src: &str) -> Result<Self, LibraryError> {
        Ok(serde_json::from_str(src)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, LibraryError> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(|source| LibraryError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&src)
    }

    /// Add or replace a cell. Replacing keeps the cell's original position.
    pub fn insert(&mut self, name: impl Into<String>, pins: PinTable) {
        self.cells.insert(name.into(), pins);
    }

    /// Overlay another table on this one; cells in `other` win.
    pub fn merge(&mut self, other: CellLibrary) {
        for (name, pins) in other.cells {
            self.cells.insert(name, pins);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cells.contains_key(name)
    }

    pub fn pins(&self, name: &str) -> Option<&PinTable> {
        self.cells.get(name)
    }

    /// Cell names in enumeration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Look up a pin's metric, falling back to `default` when either the
    /// cell or the pin is not modeled.
    pub fn metric(&self, cell_type: &str, pin: &str, default: PinMetric) -> MetricLookup {
        match self.cells.get(cell_type).and_then(|p| p.get(pin)) {
            Some(&m) => MetricLookup::Found(m),
            None => MetricLookup::Default(default),
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
