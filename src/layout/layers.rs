//! Layer condensation and in-layer ordering.
//!
//! Ranks can be sparse (0, 3, 7). Condensation maps the distinct values to
//! contiguous columns (0, 1, 2) so the drawing carries no empty columns.
//! Within a column, cells are ordered by the mean column of their drivers,
//! which pulls cells fed from early columns upward.

use std::collections::BTreeMap;

use indexmap::IndexSet;

use super::graph::{CircuitGraph, Driver};

/// Sorted distinct ranks → 0-based contiguous layer.
pub fn condense(ranks: &[usize]) -> BTreeMap<usize, usize> {
    let distinct: std::collections::BTreeSet<usize> = ranks.iter().copied().collect();
    distinct
        .into_iter()
        .enumerate()
        .map(|(layer, rank)| (rank, layer))
        .collect()
}

/// Mean layer of the cells driving `cell`'s LEFT pins. Pins fed by a
/// primary input or by nothing do not count; with no cell driver the score
/// is 0.
pub fn ordering_score(cell: usize, graph: &CircuitGraph, layer_of: &[usize]) -> f64 {
    let mut sum = 0usize;
    let mut count = 0usize;
    for (_, net) in graph.inputs(cell) {
        if let Some(Driver::Cell(d)) = graph.driver(net) {
            sum += layer_of[d];
            count += 1;
        }
    }
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

/// Cells grouped into ordered layers, plus the two virtual port layers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderedLayers {
    /// Layer index → cell ids top to bottom.
    pub cell_layers: Vec<Vec<usize>>,
    /// Cell id → layer index.
    pub layer_of: Vec<usize>,
    /// Cell id → position within its layer.
    pub position_of: Vec<usize>,
    /// Virtual layer −1: declared inputs in declaration order.
    pub input_layer: Vec<String>,
    /// Virtual layer `cell_layers.len()`: declared outputs in declaration order.
    pub output_layer: Vec<String>,
}

impl OrderedLayers {
    /// Condense `ranks` and order every layer by [`ordering_score`].
    /// The sort is stable, so equal scores keep netlist order.
    pub fn build(
        ranks: &[usize],
        graph: &CircuitGraph,
        inputs: &IndexSet<String>,
        outputs: &IndexSet<String>,
    ) -> Self {
        let condensed = condense(ranks);
        let layer_of: Vec<usize> = ranks.iter().map(|r| condensed[r]).collect();

        let mut cell_layers: Vec<Vec<usize>> = vec![Vec::new(); condensed.len()];
        for (cell, &layer) in layer_of.iter().enumerate() {
            cell_layers[layer].push(cell);
        }

        for layer in &mut cell_layers {
            let mut scored: Vec<(f64, usize)> = layer
                .iter()
                .map(|&c| (ordering_score(c, graph, &layer_of), c))
                .collect();
            scored.sort_by(|a, b| a.0.total_cmp(&b.0));
            *layer = scored.into_iter().map(|(_, c)| c).collect();
        }

        let mut position_of = vec![0; ranks.len()];
        for layer in &cell_layers {
            for (pos, &c) in layer.iter().enumerate() {
                position_of[c] = pos;
            }
        }

        Self {
            cell_layers,
            layer_of,
            position_of,
            input_layer: inputs.iter().cloned().collect(),
            output_layer: outputs.iter().cloned().collect(),
        }
    }

    /// Number of real (non-virtual) layers.
    pub fn len(&self) -> usize {
        self.cell_layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cell_layers.is_empty()
    }

    /// Layer index of the virtual output layer.
    pub fn output_layer_index(&self) -> usize {
        self.cell_layers.len()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
