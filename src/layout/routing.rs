//! Wire and pin routing.
//!
//! Every signal pin gets a short horizontal wire. Pins on primary ports get
//! a longer boundary wire ending at an `ipin` / `opin` marker; internal
//! pins get a labeled stub and connect to the rest of their net by label.
//! A final sweep gives every declared port that no cell pin terminated a
//! marker of its own, just outside the placed block.

use std::collections::HashSet;

use indexmap::IndexSet;

use super::placement::Placement;
use super::types::{PinView, Point};
use crate::config::LayoutConfig;
use crate::diagnostics::{Diagnostic, Diagnostics, PortDirection};
use crate::library::{CellLibrary, PinSide, Resolution};
use crate::schematic::{SchematicCommand, SchematicSink};

/// Marker name for a primary input terminated at cell `cell`.
pub fn input_marker_name(net: &str, cell: Option<usize>) -> String {
    match cell {
        Some(id) => format!("in_{net}_{id}"),
        None => format!("in_{net}"),
    }
}

/// Marker name for a primary output terminated at cell `cell`.
pub fn output_marker_name(net: &str, cell: Option<usize>) -> String {
    match cell {
        Some(id) => format!("out_{net}_{id}"),
        None => format!("out_{net}"),
    }
}

pub struct Router<'a> {
    config: &'a LayoutConfig,
    library: &'a CellLibrary,
    inputs: &'a IndexSet<String>,
    outputs: &'a IndexSet<String>,
    /// Inputs read by at least one LEFT pin.
    claimed_inputs: HashSet<String>,
    /// Outputs written by at least one RIGHT pin.
    claimed_outputs: HashSet<String>,
    defaulted: HashSet<(String, String)>,
    /// Every `ipin` / `opin` name emitted so far.
    marker_names: HashSet<String>,
    commands: Vec<SchematicCommand>,
    diagnostics: Diagnostics,
}

impl<'a> Router<'a> {
    pub fn new(
        config: &'a LayoutConfig,
        library: &'a CellLibrary,
        inputs: &'a IndexSet<String>,
        outputs: &'a IndexSet<String>,
    ) -> Self {
        Self {
            config,
            library,
            inputs,
            outputs,
            claimed_inputs: HashSet::new(),
            claimed_outputs: HashSet::new(),
            defaulted: HashSet::new(),
            marker_names: HashSet::new(),
            commands: Vec::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Emit the instance for one cell and route each of its signal pins.
    pub fn route_cell(
        &mut self,
        id: usize,
        name: &str,
        resolution: &Resolution,
        pins: &[PinView],
        origin: Point,
    ) {
        let Point { x, y } = origin;
        self.commands
            .add_instance(&resolution.symbol_path, x, y, 0, name, &resolution.cell_type);

        for pin in pins {
            let lookup =
                self.library
                    .metric(&resolution.cell_type, &pin.pin, self.config.default_pin_metric);
            if lookup.is_default()
                && self
                    .defaulted
                    .insert((resolution.cell_type.clone(), pin.pin.clone()))
            {
                self.diagnostics.add(Diagnostic::DefaultPinMetric {
                    cell_type: resolution.cell_type.clone(),
                    pin: pin.pin.clone(),
                });
            }
            let metric = lookup.metric();
            let yp = y + metric.dy;
            let net = pin.net.as_str();

            match pin.side {
                PinSide::Left => {
                    let xp = x - metric.dx;
                    if self.inputs.contains(net) {
                        let bx = x - self.config.io_offset;
                        self.commands.add_wire(bx, yp, xp, yp, Some(net));
                        let first = self.claimed_inputs.insert(net.to_string());
                        if !self.config.share_boundary_pins {
                            let marker = input_marker_name(net, Some(id));
                            self.add_input_marker(bx, yp, &marker, net);
                        } else if first {
                            let marker = input_marker_name(net, None);
                            self.add_input_marker(bx, yp, &marker, net);
                        }
                    } else {
                        self.commands
                            .add_wire(xp - self.config.stub_length, yp, xp, yp, Some(net));
                    }
                }
                PinSide::Right => {
                    let xp = x + metric.dx;
                    if self.outputs.contains(net) {
                        let bx = x + self.config.io_offset;
                        self.commands.add_wire(xp, yp, bx, yp, Some(net));
                        let first = self.claimed_outputs.insert(net.to_string());
                        if !self.config.share_boundary_pins {
                            let marker = output_marker_name(net, Some(id));
                            self.add_output_marker(bx, yp, &marker, net);
                        } else if first {
                            let marker = output_marker_name(net, None);
                            self.add_output_marker(bx, yp, &marker, net);
                        }
                    } else {
                        self.commands
                            .add_wire(xp, yp, xp + self.config.stub_length, yp, Some(net));
                    }
                }
            }
        }
    }

    /// Give each declared port that no pin terminated one synthetic marker
    /// and a short wire. Inputs go left of the block, outputs right of it,
    /// each at its own virtual-layer row.
    pub fn sweep(&mut self, placement: &Placement) {
        let margin = self.config.sweep_margin;
        let stub = self.config.stub_length;

        for slot in &placement.input_slots {
            if !self.inputs.contains(&slot.name) || self.claimed_inputs.contains(&slot.name) {
                continue;
            }
            let x = placement.bbox.map_or(slot.at.x, |bb| bb.min_x - margin);
            let y = slot.at.y;
            let marker = input_marker_name(&slot.name, None);
            self.add_input_marker(x, y, &marker, &slot.name);
            self.commands.add_wire(x, y, x + stub, y, Some(&slot.name));
            self.claimed_inputs.insert(slot.name.clone());
            self.diagnostics.add(Diagnostic::UnclaimedPort {
                port: slot.name.clone(),
                direction: PortDirection::Input,
            });
        }

        for slot in &placement.output_slots {
            if !self.outputs.contains(&slot.name) || self.claimed_outputs.contains(&slot.name) {
                continue;
            }
            let x = placement.bbox.map_or(slot.at.x, |bb| bb.max_x + margin);
            let y = slot.at.y;
            self.commands.add_wire(x - stub, y, x, y, Some(&slot.name));
            let marker = output_marker_name(&slot.name, None);
            self.add_output_marker(x, y, &marker, &slot.name);
            self.claimed_outputs.insert(slot.name.clone());
            self.diagnostics.add(Diagnostic::UnclaimedPort {
                port: slot.name.clone(),
                direction: PortDirection::Output,
            });
        }
    }

    pub fn finish(self) -> (Vec<SchematicCommand>, Diagnostics) {
        (self.commands, self.diagnostics)
    }

    /// `base`, or `base_<k>` with the smallest k > 0 not yet emitted.
    /// Marker names must be unique within a schematic.
    fn unique_marker_name(&mut self, base: &str) -> String {
        let mut name = base.to_string();
        let mut k = 1;
        while self.marker_names.contains(&name) {
            name = format!("{base}_{k}");
            k += 1;
        }
        self.marker_names.insert(name.clone());
        name
    }

    fn add_input_marker(&mut self, x: i64, y: i64, base: &str, net: &str) {
        let name = self.unique_marker_name(base);
        self.commands
            .add_io_pin(&self.config.input_pin_symbol, x, y, 0, &name, net);
    }

    fn add_output_marker(&mut self, x: i64, y: i64, base: &str, net: &str) {
        let name = self.unique_marker_name(base);
        self.commands
            .add_io_pin(&self.config.output_pin_symbol, x, y, 0, &name, net);
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_routing.rs"]
mod tests;
