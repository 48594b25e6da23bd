//! Placement: (layer, position) → schematic coordinates.

use serde::Serialize;

use super::layers::OrderedLayers;
use super::types::{BoundingBox, Point};
use crate::config::LayoutConfig;

/// Where a declared port sits in its virtual layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortSlot {
    pub name: String,
    pub at: Point,
}

#[derive(Debug, Clone, Default)]
pub struct Placement {
    /// Origin of every cell, by cell id.
    pub cells: Vec<Point>,
    pub input_slots: Vec<PortSlot>,
    pub output_slots: Vec<PortSlot>,
    /// Extent of the cell origins; `None` when there are no cells.
    pub bbox: Option<BoundingBox>,
}

impl Placement {
    pub fn input_slot(&self, name: &str) -> Option<&PortSlot> {
        self.input_slots.iter().find(|s| s.name == name)
    }

    pub fn output_slot(&self, name: &str) -> Option<&PortSlot> {
        self.output_slots.iter().find(|s| s.name == name)
    }
}

/// Grid coordinate of `(layer, position)`.
pub fn grid_point(layer: i64, position: usize, base_x: i64, config: &LayoutConfig) -> Point {
    Point::new(
        base_x + layer * config.column_width,
        config.base_y + position as i64 * config.row_height,
    )
}

/// Place every cell of `layers` and both virtual port layers. Layer 0
/// starts at `base_x`; the input layer sits one column to its left.
pub fn place(layers: &OrderedLayers, base_x: i64, config: &LayoutConfig) -> Placement {
    let mut cells = vec![Point::new(0, 0); layers.layer_of.len()];
    let mut bbox: Option<BoundingBox> = None;

    for (layer, members) in layers.cell_layers.iter().enumerate() {
        for (pos, &cell) in members.iter().enumerate() {
            let p = grid_point(layer as i64, pos, base_x, config);
            cells[cell] = p;
            match bbox.as_mut() {
                Some(bb) => bb.include(p),
                None => bbox = Some(BoundingBox::at(p)),
            }
        }
    }

    let slots = |names: &[String], layer: i64| -> Vec<PortSlot> {
        names
            .iter()
            .enumerate()
            .map(|(pos, name)| PortSlot {
                name: name.clone(),
                at: grid_point(layer, pos, base_x, config),
            })
            .collect()
    };
    let input_slots = slots(&layers.input_layer, -1);
    let output_slots = slots(&layers.output_layer, layers.output_layer_index() as i64);

    tracing::debug!(cells = cells.len(), layers = layers.len(), "placement done");
    Placement {
        cells,
        input_slots,
        output_slots,
        bbox,
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
