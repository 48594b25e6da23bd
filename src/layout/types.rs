//! Layout types: Point, PinView, BoundingBox, PlacedCell, LayoutResult.

use serde::Serialize;

use crate::diagnostics::Diagnostics;
use crate::library::pins::{PinConvention, PinSide, is_power_pin};
use crate::library::{PinRemap, Resolution};
use crate::netlist::Cell;
use crate::schematic::SchematicCommand;

// ─── Point ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

// ─── PinView ─────────────────────────────────────────────────────────────────

/// One signal pin of a cell as the layout sees it.
///
/// `pin` is the effective name used for side and metric lookups: the
/// remapped buffer pin for substituted two-pin cells, otherwise the
/// original name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PinView {
    pub pin: String,
    pub original: String,
    pub net: String,
    pub side: PinSide,
}

impl PinView {
    /// Signal pins of `cell` in declaration order; power pins are dropped.
    pub fn classify(cell: &Cell, remap: Option<&PinRemap>, convention: &PinConvention) -> Vec<Self> {
        cell.conns
            .iter()
            .filter(|c| !is_power_pin(&c.pin))
            .map(|c| {
                let pin = remap
                    .and_then(|r| r.get(&c.pin))
                    .cloned()
                    .unwrap_or_else(|| c.pin.clone());
                let side = convention.side(&pin);
                PinView {
                    pin,
                    original: c.pin.clone(),
                    net: c.net.clone(),
                    side,
                }
            })
            .collect()
    }
}

// ─── ResolvedCell ────────────────────────────────────────────────────────────

/// A netlist cell together with its symbol resolution and signal pins.
#[derive(Debug, Clone)]
pub struct ResolvedCell<'a> {
    pub cell: &'a Cell,
    pub resolution: Resolution,
    pub remap: Option<PinRemap>,
    pub pins: Vec<PinView>,
}

impl AsRef<[PinView]> for ResolvedCell<'_> {
    fn as_ref(&self) -> &[PinView] {
        &self.pins
    }
}

// ─── BoundingBox ─────────────────────────────────────────────────────────────

/// Extent of the concrete cell placements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundingBox {
    pub min_x: i64,
    pub max_x: i64,
    pub min_y: i64,
    pub max_y: i64,
}

impl BoundingBox {
    pub fn at(p: Point) -> Self {
        Self {
            min_x: p.x,
            max_x: p.x,
            min_y: p.y,
            max_y: p.y,
        }
    }

    pub fn include(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.max_x = self.max_x.max(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_y = self.max_y.max(p.y);
    }
}

// ─── PlacedCell ──────────────────────────────────────────────────────────────

/// Summary of where one logic cell ended up and why.
#[derive(Debug, Clone, Serialize)]
pub struct PlacedCell {
    pub id: usize,
    pub name: String,
    pub requested_type: String,
    pub resolution: Resolution,
    /// Original pin → fallback buffer pin, for substituted two-pin cells.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remap: Option<PinRemap>,
    pub rank: usize,
    pub layer: usize,
    pub order: usize,
    pub x: i64,
    pub y: i64,
    /// Sits on a combinational feedback loop.
    pub feedback: bool,
}

// ─── LayoutResult ────────────────────────────────────────────────────────────

/// The full output of the layout pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutResult {
    pub module: String,
    /// Emission commands in the order they must reach the sink.
    pub commands: Vec<SchematicCommand>,
    pub cells: Vec<PlacedCell>,
    pub layer_count: usize,
    pub filler_columns: usize,
    pub bounding_box: Option<BoundingBox>,
    pub diagnostics: Diagnostics,
}

impl LayoutResult {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            commands: Vec::new(),
            cells: Vec::new(),
            layer_count: 0,
            filler_columns: 0,
            bounding_box: None,
            diagnostics: Diagnostics::new(),
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
