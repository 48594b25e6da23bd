//! Layered schematic layout.
//!
//! Pipeline:
//!   1. Occupancy: decap / fill / tap cells go to a grid left of the logic
//!   2. Resolution: cell types → library symbols, pin remaps for substitutes
//!   3. Graph: net drivers, dependency graph, ASAP ranks
//!   4. Layers: condense ranks, order cells inside each layer
//!   5. Placement: layer/position → coordinates
//!   6. Routing: instances, pin wires, boundary markers, port sweep
//!
//! Each stage returns values. Only the router and the filler produce
//! emission commands, collected in order into the [`LayoutResult`].

pub mod graph;
pub mod layers;
pub mod occupancy;
pub mod placement;
pub mod routing;
pub mod types;

pub use graph::{CircuitGraph, Driver, Ranking};
pub use layers::OrderedLayers;
pub use placement::{Placement, PortSlot};
pub use routing::Router;
pub use types::{BoundingBox, LayoutResult, PinView, PlacedCell, Point, ResolvedCell};

use tracing::{debug, info};

use crate::config::LayoutConfig;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::library::{CellLibrary, CellResolver};
use crate::netlist::Netlist;

/// Run the full layout pipeline on a parsed netlist.
///
/// Never fails: unresolvable cells, floating nets, feedback and missing pin
/// metrics all degrade to a fallback and a diagnostic in the result. Cells
/// are identified by their position in `netlist.cells`.
pub fn full_layout(netlist: &Netlist, library: &CellLibrary, config: &LayoutConfig) -> LayoutResult {
    let mut result = LayoutResult::new(netlist.module.clone());

    // 1. Occupancy
    if config.include_fillers {
        result.filler_columns =
            occupancy::place_fillers(&netlist.occupancy, config, &mut result.commands);
    }
    let base_x = config.logic_base_x(result.filler_columns);

    // 2. Resolution
    let resolver = CellResolver::new(library, config.symbol_dir.as_str())
        .with_fallback(
            config.fallback_cell.as_str(),
            config.fallback_input_pin.as_str(),
            config.fallback_output_pin.as_str(),
        )
        .with_prefixes(config.vendor_prefixes.clone());
    let resolved = resolve_cells(netlist, &resolver, config, &mut result.diagnostics);

    // 3. Graph
    let graph = CircuitGraph::build(&resolved, &netlist.inputs);
    for (id, pin, net) in graph.floating_inputs() {
        result.diagnostics.add(Diagnostic::FloatingNet {
            instance: netlist.cells[id].name.clone(),
            pin: pin.to_string(),
            net: net.to_string(),
        });
    }
    let ranking = graph.assign_ranks();
    for &id in &ranking.forced {
        result.diagnostics.add(Diagnostic::FeedbackCell {
            instance: netlist.cells[id].name.clone(),
        });
    }
    let feedback = graph.feedback_cells();
    if !feedback.is_empty() {
        debug!(cells = feedback.len(), "combinational feedback present");
    }

    // 4. Layers
    let layers = OrderedLayers::build(&ranking.ranks, &graph, &netlist.inputs, &netlist.outputs);
    result.layer_count = layers.len();

    // 5. Placement
    let placement = placement::place(&layers, base_x, config);
    result.bounding_box = placement.bbox;

    // 6. Routing
    let mut router = Router::new(config, library, &netlist.inputs, &netlist.outputs);
    for (id, rc) in resolved.iter().enumerate() {
        router.route_cell(id, &rc.cell.name, &rc.resolution, &rc.pins, placement.cells[id]);
    }
    router.sweep(&placement);
    let (commands, routing_issues) = router.finish();
    result.commands.extend(commands);
    result.diagnostics.append(routing_issues);

    result.cells = resolved
        .into_iter()
        .enumerate()
        .map(|(id, rc)| PlacedCell {
            id,
            name: rc.cell.name.clone(),
            requested_type: rc.cell.cell_type.clone(),
            resolution: rc.resolution,
            remap: rc.remap,
            rank: ranking.ranks[id],
            layer: layers.layer_of[id],
            order: layers.position_of[id],
            x: placement.cells[id].x,
            y: placement.cells[id].y,
            feedback: feedback.binary_search(&id).is_ok(),
        })
        .collect();

    info!(
        module = %netlist.module,
        cells = netlist.cells.len(),
        layers = result.layer_count,
        commands = result.commands.len(),
        issues = result.diagnostics.len(),
        "layout complete"
    );
    result
}

/// Resolve every logic cell and classify its signal pins under the
/// effective (possibly remapped) names.
fn resolve_cells<'n>(
    netlist: &'n Netlist,
    resolver: &CellResolver<'_>,
    config: &LayoutConfig,
    diagnostics: &mut Diagnostics,
) -> Vec<ResolvedCell<'n>> {
    netlist
        .cells
        .iter()
        .map(|cell| {
            let resolution = resolver.resolve(Some(&cell.cell_type), None);
            let remap = resolver.pin_remap(&resolution, cell);
            if resolution.substituted {
                diagnostics.add(Diagnostic::Substitution {
                    instance: cell.name.clone(),
                    requested: cell.cell_type.clone(),
                    replacement: resolution.cell_type.clone(),
                    reason: resolution.reason.clone(),
                    remapped: remap.is_some(),
                });
            } else if resolution.cell_type != cell.cell_type {
                debug!(
                    instance = %cell.name,
                    requested = %cell.cell_type,
                    resolved = %resolution.cell_type,
                    reason = %resolution.reason,
                    "cell type resolved"
                );
            }
            let pins = PinView::classify(cell, remap.as_ref(), &config.pin_convention);
            ResolvedCell {
                cell,
                resolution,
                remap,
                pins,
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_pipeline.rs"]
mod tests;
