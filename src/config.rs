//! Configuration for the layout pipeline.
//!
//! All geometry is in schematic units. Spacing values change how dense the
//! drawing looks and nothing else; connectivity is independent of them.

use crate::library::{PinConvention, PinMetric};
use crate::library::sky130::{
    FALLBACK_BUFFER, FALLBACK_INPUT_PIN, FALLBACK_OUTPUT_PIN, VENDOR_PREFIXES,
};

#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Horizontal distance between layers.
    pub column_width: i64,
    /// Vertical distance between cells of one layer.
    pub row_height: i64,
    /// Y of the first cell in every layer.
    pub base_y: i64,
    /// Distance from a cell's origin to its boundary pin markers.
    pub io_offset: i64,
    /// Length of local stub wires.
    pub stub_length: i64,
    /// Distance outside the bounding box for synthesized port pins.
    pub sweep_margin: i64,
    /// Offset used for pins missing from the metrics table.
    pub default_pin_metric: PinMetric,

    /// Place decap / fill / tap cells in a grid left of the logic.
    pub include_fillers: bool,
    pub fill_base_x: i64,
    pub fill_x_step: i64,
    pub fill_y_step: i64,
    /// Gap between the filler grid and the first logic layer.
    pub fill_gap: i64,
    /// Cap the grid height and fill column by column instead of a square.
    pub fill_max_rows: Option<usize>,

    /// Emit one marker per primary port instead of one per consumer.
    pub share_boundary_pins: bool,

    pub symbol_dir: String,
    pub input_pin_symbol: String,
    pub output_pin_symbol: String,
    pub fallback_cell: String,
    pub fallback_input_pin: String,
    pub fallback_output_pin: String,
    pub vendor_prefixes: Vec<String>,
    pub pin_convention: PinConvention,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            column_width: 400,
            row_height: 300,
            base_y: -500,
            io_offset: 150,
            stub_length: 30,
            sweep_margin: 200,
            default_pin_metric: PinMetric::new(0, 60),
            include_fillers: true,
            fill_base_x: -1200,
            fill_x_step: 200,
            fill_y_step: 100,
            fill_gap: 400,
            fill_max_rows: None,
            share_boundary_pins: false,
            symbol_dir: "sky130_stdcells".to_string(),
            input_pin_symbol: "ipin.sym".to_string(),
            output_pin_symbol: "opin.sym".to_string(),
            fallback_cell: FALLBACK_BUFFER.to_string(),
            fallback_input_pin: FALLBACK_INPUT_PIN.to_string(),
            fallback_output_pin: FALLBACK_OUTPUT_PIN.to_string(),
            vendor_prefixes: VENDOR_PREFIXES.iter().map(|s| s.to_string()).collect(),
            pin_convention: PinConvention::default(),
        }
    }
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// X of layer 0 once `filler_columns` grid columns sit to its left.
    pub fn logic_base_x(&self, filler_columns: usize) -> i64 {
        self.fill_base_x + filler_columns.max(1) as i64 * self.fill_x_step + self.fill_gap
    }
}
