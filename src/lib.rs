//! netlist2sch: flattened gate-level netlist to layered xschem schematic.
//!
//! Public API: [`convert`] and [`render_schematic`].
//!
//! Pipeline: parse → resolve cells → rank → layer → place → route → sink.

pub mod config;
pub mod diagnostics;
pub mod layout;
pub mod library;
pub mod netlist;
pub mod schematic;

#[cfg(feature = "wasm")]
mod wasm;

pub use config::LayoutConfig;
pub use diagnostics::{Diagnostic, Diagnostics};
pub use layout::{LayoutResult, full_layout};
pub use library::CellLibrary;
pub use netlist::{Netlist, NetlistError};
pub use schematic::{SchematicCommand, SchematicConfig, SchematicSink, XschemWriter};

/// A finished conversion: the xschem text plus the layout that produced it.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub schematic: String,
    pub layout: LayoutResult,
}

/// Replay a layout into an xschem document.
pub fn render_schematic(layout: &LayoutResult, options: &SchematicConfig) -> String {
    let mut writer = XschemWriter::new(options.clone());
    schematic::replay(&layout.commands, &mut writer);
    writer.finish()
}

/// Parse structural Verilog and lay it out as an xschem schematic.
///
/// Only parsing can fail; everything after it degrades to diagnostics
/// carried in [`Conversion::layout`].
pub fn convert(
    src: &str,
    library: &CellLibrary,
    config: &LayoutConfig,
    options: &SchematicConfig,
) -> Result<Conversion, NetlistError> {
    let parsed = netlist::parse(src)?;
    let layout = full_layout(&parsed, library, config);
    let schematic = render_schematic(&layout, options);
    Ok(Conversion { schematic, layout })
}

/// [`convert`] with the built-in sky130 library and default settings.
pub fn convert_default(src: &str) -> Result<Conversion, NetlistError> {
    convert(
        src,
        &CellLibrary::sky130(),
        &LayoutConfig::default(),
        &SchematicConfig::default(),
    )
}
