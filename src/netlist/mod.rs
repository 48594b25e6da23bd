//! Netlist front end: model types, the structural Verilog parser, and the
//! netlist normalizer.

pub mod normalize;
pub mod types;
pub mod verilog;

pub use types::{Cell, Connection, Netlist};
pub use verilog::VerilogParser;

use thiserror::Error;

/// Errors raised while reading netlist source.
///
/// These are the only fatal conditions in a conversion; everything past
/// parsing degrades to a diagnostic instead.
#[derive(Debug, Error)]
pub enum NetlistError {
    #[error("no `module` declaration found in netlist source")]
    NoModule,
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Trait for netlist front ends.
pub trait Parser {
    /// Parse netlist source text into a [`Netlist`].
    fn parse(&self, src: &str) -> Result<Netlist, NetlistError>;
}

/// Parse structural Verilog source with the default front end.
pub fn parse(src: &str) -> Result<Netlist, NetlistError> {
    VerilogParser.parse(src)
}

/// Read and parse a netlist file.
pub fn parse_file(path: impl AsRef<std::path::Path>) -> Result<Netlist, NetlistError> {
    let path = path.as_ref();
    let src = std::fs::read_to_string(path).map_err(|source| NetlistError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse(&src)
}
