//! WASM bindings for netlist2sch.
//!
//! Exposes `convert` and `convertWithOptions` to JavaScript via wasm-bindgen.

use wasm_bindgen::prelude::*;

use crate::{CellLibrary, LayoutConfig, SchematicConfig};

/// Convert a structural Verilog netlist to xschem text with default settings.
#[wasm_bindgen]
pub fn convert(src: &str) -> Result<String, JsError> {
    crate::convert_default(src)
        .map(|c| c.schematic)
        .map_err(|e| JsError::new(&e.to_string()))
}

/// Convert with control over the main layout switches.
///
/// - `library_json`: extra cell table merged over the built-in one, or empty
/// - `fillers`: place decap / fill / tap cells
/// - `share_ports`: one marker per primary port instead of one per consumer
#[wasm_bindgen(js_name = "convertWithOptions")]
pub fn convert_with_options(
    src: &str,
    library_json: &str,
    fillers: bool,
    share_ports: bool,
) -> Result<String, JsError> {
    let mut library = CellLibrary::sky130();
    if !library_json.is_empty() {
        let extra =
            CellLibrary::from_json_str(library_json).map_err(|e| JsError::new(&e.to_string()))?;
        library.merge(extra);
    }
    let config = LayoutConfig {
        include_fillers: fillers,
        share_boundary_pins: share_ports,
        ..LayoutConfig::default()
    };
    crate::convert(src, &library, &config, &SchematicConfig::default())
        .map(|c| c.schematic)
        .map_err(|e| JsError::new(&e.to_string()))
}
