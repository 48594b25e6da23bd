//! CircuitGraph: net drivers, cell dependency graph, and ASAP ranks.
//!
//! Cells are nodes; an edge runs from a driving cell to every cell that
//! reads one of its nets. Node `i` is cell `i`. The graph may contain
//! cycles (latches, ring structures) and every pass here tolerates them.

use std::collections::{BTreeSet, HashMap};

use indexmap::IndexSet;
use petgraph::algo::{is_cyclic_directed, tarjan_scc};
use petgraph::graph::{DiGraph, NodeIndex};

use super::types::PinView;
use crate::library::PinSide;

/// What drives a net.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Driver {
    /// A declared primary input.
    GlobalInput,
    /// The RIGHT pin of this cell.
    Cell(usize),
}

/// Rank assignment produced by [`CircuitGraph::assign_ranks`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranking {
    /// Rank per cell id.
    pub ranks: Vec<usize>,
    /// Cells that never resolved and were forced to rank 0, ascending.
    pub forced: Vec<usize>,
    /// Leveling passes that did work.
    pub passes: usize,
}

pub struct CircuitGraph {
    /// Node weight is the cell id, edge weight the connecting net.
    pub digraph: DiGraph<usize, String>,
    drivers: HashMap<String, Driver>,
    /// (pin, net) of every LEFT pin, per cell.
    cell_inputs: Vec<Vec<(String, String)>>,
}

impl CircuitGraph {
    /// Build the driver map and dependency graph.
    ///
    /// `pins[i]` yields the signal pins of cell `i`. A declared input is
    /// always driven by the global sentinel; otherwise the last RIGHT pin to
    /// touch a net (cell order, then pin order) becomes its driver.
    pub fn build<P: AsRef<[PinView]>>(pins: &[P], global_inputs: &IndexSet<String>) -> Self {
        let mut drivers: HashMap<String, Driver> = global_inputs
            .iter()
            .map(|net| (net.clone(), Driver::GlobalInput))
            .collect();

        for (id, cell_pins) in pins.iter().enumerate() {
            for pin in cell_pins.as_ref().iter().filter(|p| p.side == PinSide::Right) {
                if !global_inputs.contains(&pin.net) {
                    drivers.insert(pin.net.clone(), Driver::Cell(id));
                }
            }
        }

        let mut digraph: DiGraph<usize, String> = DiGraph::with_capacity(pins.len(), 0);
        for id in 0..pins.len() {
            digraph.add_node(id);
        }

        let cell_inputs: Vec<Vec<(String, String)>> = pins
            .iter()
            .map(|cell_pins| {
                cell_pins
                    .as_ref()
                    .iter()
                    .filter(|p| p.side == PinSide::Left)
                    .map(|p| (p.pin.clone(), p.net.clone()))
                    .collect()
            })
            .collect();

        for (id, inputs) in cell_inputs.iter().enumerate() {
            for (_, net) in inputs {
                if let Some(Driver::Cell(src)) = drivers.get(net) {
                    digraph.add_edge(NodeIndex::new(*src), NodeIndex::new(id), net.clone());
                }
            }
        }

        Self {
            digraph,
            drivers,
            cell_inputs,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.cell_inputs.len()
    }

    pub fn edge_count(&self) -> usize {
        self.digraph.edge_count()
    }

    pub fn driver(&self, net: &str) -> Option<Driver> {
        self.drivers.get(net).copied()
    }

    /// (pin, net) of every LEFT pin of `cell`.
    pub fn inputs(&self, cell: usize) -> &[(String, String)] {
        &self.cell_inputs[cell]
    }

    /// Cells reading any net driven by `cell`, ascending, deduplicated.
    pub fn fanout(&self, cell: usize) -> BTreeSet<usize> {
        self.digraph
            .neighbors(NodeIndex::new(cell))
            .map(|n| self.digraph[n])
            .collect()
    }

    /// LEFT pins whose net has no driver at all: (cell, pin, net).
    pub fn floating_inputs(&self) -> Vec<(usize, &str, &str)> {
        let mut out = Vec::new();
        for (id, inputs) in self.cell_inputs.iter().enumerate() {
            for (pin, net) in inputs {
                if !self.drivers.contains_key(net) {
                    out.push((id, pin.as_str(), net.as_str()));
                }
            }
        }
        out
    }

    pub fn has_feedback(&self) -> bool {
        is_cyclic_directed(&self.digraph)
    }

    /// Cells on a combinational feedback loop, ascending. Includes cells
    /// that read their own output.
    pub fn feedback_cells(&self) -> Vec<usize> {
        let mut cells: Vec<usize> = tarjan_scc(&self.digraph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || self.digraph.contains_edge(scc[0], scc[0]))
            .flatten()
            .map(|n| self.digraph[n])
            .collect();
        cells.sort_unstable();
        cells
    }

    /// ASAP leveling.
    ///
    /// Each pass visits dirty cells in id order. A cell whose rank rises
    /// dirties its fanout: receivers with a higher id are revisited in the
    /// same pass, the rest in the next one. This matches repeated full
    /// scans in id order, at most `cells + 2` passes, stopping early once a
    /// pass changes nothing. Cells left without a rank get rank 0.
    pub fn assign_ranks(&self) -> Ranking {
        let n = self.cell_count();
        let budget = n + 2;
        let mut ranks: Vec<Option<usize>> = vec![None; n];
        let mut current: BTreeSet<usize> = (0..n).collect();
        let mut passes = 0;

        while !current.is_empty() && passes < budget {
            passes += 1;
            let mut next = BTreeSet::new();
            while let Some(cell) = current.pop_first() {
                let Some(candidate) = self.candidate_rank(cell, &ranks) else {
                    continue;
                };
                if ranks[cell].is_none_or(|r| candidate > r) {
                    ranks[cell] = Some(candidate);
                    for receiver in self.fanout(cell) {
                        if receiver > cell {
                            current.insert(receiver);
                        } else {
                            next.insert(receiver);
                        }
                    }
                }
            }
            current = next;
        }

        let forced: Vec<usize> = (0..n).filter(|&c| ranks[c].is_none()).collect();
        tracing::debug!(cells = n, passes, forced = forced.len(), "ranks assigned");
        Ranking {
            ranks: ranks.into_iter().map(|r| r.unwrap_or(0)).collect(),
            forced,
            passes,
        }
    }

    /// Max over LEFT pins of the driver's rank + 1. Inputs from the global
    /// sentinel or from nothing count as 0; unresolved drivers are skipped.
    /// `None` when every input was skipped.
    fn candidate_rank(&self, cell: usize, ranks: &[Option<usize>]) -> Option<usize> {
        let inputs = &self.cell_inputs[cell];
        if inputs.is_empty() {
            return Some(0);
        }
        let mut best: Option<usize> = None;
        for (_, net) in inputs {
            let level = match self.drivers.get(net) {
                None | Some(Driver::GlobalInput) => 0,
                Some(Driver::Cell(src)) => match ranks[*src] {
                    Some(r) => r + 1,
                    None => continue,
                },
            };
            best = Some(best.map_or(level, |b| b.max(level)));
        }
        best
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_graph.rs"]
mod tests;
