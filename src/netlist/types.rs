//! Netlist model: cells, pin connections, and declared ports.
//!
//! These types are the parsed form of a flattened gate-level netlist.
//! Everything downstream (graph building, placement, routing) reads them
//! and never mutates them.

use indexmap::IndexSet;
use serde::Serialize;

// ─── Connection ──────────────────────────────────────────────────────────────

/// A single `.PIN(net)` connection on a cell instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Connection {
    pub pin: String,
    pub net: String,
}

impl Connection {
    pub fn new(pin: impl Into<String>, net: impl Into<String>) -> Self {
        Self {
            pin: pin.into(),
            net: net.into(),
        }
    }
}

// ─── Cell ────────────────────────────────────────────────────────────────────

/// A cell instance. `id` is the cell's index inside its owning list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub id: usize,
    /// Logical cell type as written in the netlist (e.g. "sky130_fd_sc_hd__nand2_1").
    pub cell_type: String,
    /// Instance name (e.g. "_042_").
    pub name: String,
    /// Connections in declaration order.
    pub conns: Vec<Connection>,
}

impl Cell {
    pub fn new(id: usize, cell_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            cell_type: cell_type.into(),
            name: name.into(),
            conns: Vec::new(),
        }
    }

    /// Builder-style helper used heavily by tests.
    pub fn with_conn(mut self, pin: impl Into<String>, net: impl Into<String>) -> Self {
        self.conns.push(Connection::new(pin, net));
        self
    }

    /// True for decap / filler / tap cells that carry no logic.
    pub fn is_occupancy(&self) -> bool {
        is_occupancy_type(&self.cell_type)
    }
}

/// Infrastructure cells are recognised by name alone.
pub fn is_occupancy_type(cell_type: &str) -> bool {
    let lower = cell_type.to_lowercase();
    ["decap", "fill", "tap"].iter().any(|k| lower.contains(k))
}

// ─── Netlist ─────────────────────────────────────────────────────────────────

/// A parsed module: functional cells, occupancy cells, and its ports.
///
/// Port sets keep declaration order so that every later pass is
/// deterministic.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Netlist {
    pub module: String,
    pub inputs: IndexSet<String>,
    pub outputs: IndexSet<String>,
    /// Logic cells, ids are `0..cells.len()`.
    pub cells: Vec<Cell>,
    /// Decap / fill / tap cells, ids are `0..occupancy.len()`.
    pub occupancy: Vec<Cell>,
}

impl Netlist {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            ..Self::default()
        }
    }

    pub fn add_input(&mut self, name: impl Into<String>) {
        self.inputs.insert(name.into());
    }

    pub fn add_output(&mut self, name: impl Into<String>) {
        self.outputs.insert(name.into());
    }

    /// Push a cell, routing it to the functional or occupancy list and
    /// re-numbering its id to match its position there.
    pub fn push_cell(&mut self, mut cell: Cell) {
        if cell.is_occupancy() {
            cell.id = self.occupancy.len();
            self.occupancy.push(cell);
        } else {
            cell.id = self.cells.len();
            self.cells.push(cell);
        }
    }

    pub fn is_input(&self, net: &str) -> bool {
        self.inputs.contains(net)
    }

    pub fn is_output(&self, net: &str) -> bool {
        self.outputs.contains(net)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
