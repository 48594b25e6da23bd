//! Cell type → symbol resolution with fallback substitution.
//!
//! Resolution never fails: an unknown type is replaced by the generic
//! buffer, and the caller receives a [`Resolution`] saying so. Recording the
//! event is the caller's business.

use indexmap::IndexMap;
use serde::Serialize;

use super::pins::is_power_pin;
use super::sky130::{FALLBACK_BUFFER, FALLBACK_INPUT_PIN, FALLBACK_OUTPUT_PIN, VENDOR_PREFIXES};
use super::CellLibrary;
use crate::netlist::Cell;

/// Outcome of resolving one cell instantiation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub symbol_path: String,
    pub cell_type: String,
    pub substituted: bool,
    pub reason: String,
}

/// Original pin name → fallback buffer pin name.
pub type PinRemap = IndexMap<String, String>;

/// Resolves logical cell types against a [`CellLibrary`].
#[derive(Debug, Clone)]
pub struct CellResolver<'a> {
    library: &'a CellLibrary,
    symbol_dir: String,
    fallback: String,
    fallback_input: String,
    fallback_output: String,
    prefixes: Vec<String>,
}

impl<'a> CellResolver<'a> {
    /// Resolver with the sky130 fallback buffer and vendor prefixes.
    pub fn new(library: &'a CellLibrary, symbol_dir: impl Into<String>) -> Self {
        Self {
            library,
            symbol_dir: symbol_dir.into(),
            fallback: FALLBACK_BUFFER.to_string(),
            fallback_input: FALLBACK_INPUT_PIN.to_string(),
            fallback_output: FALLBACK_OUTPUT_PIN.to_string(),
            prefixes: VENDOR_PREFIXES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Override the fallback buffer and its (input, output) pins.
    pub fn with_fallback(
        mut self,
        cell: impl Into<String>,
        input: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        self.fallback = cell.into();
        self.fallback_input = input.into();
        self.fallback_output = output.into();
        self
    }

    pub fn with_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.prefixes = prefixes;
        self
    }

    pub fn fallback_type(&self) -> &str {
        &self.fallback
    }

    pub fn symbol_path(&self, cell_type: &str) -> String {
        format!("{}/{}.sym", self.symbol_dir, cell_type)
    }

    fn found(&self, cell_type: &str, reason: &str) -> Resolution {
        Resolution {
            symbol_path: self.symbol_path(cell_type),
            cell_type: cell_type.to_string(),
            substituted: false,
            reason: reason.to_string(),
        }
    }

    fn fallback(&self, reason: String) -> Resolution {
        Resolution {
            symbol_path: self.symbol_path(&self.fallback),
            cell_type: self.fallback.clone(),
            substituted: true,
            reason,
        }
    }

    /// Resolve a cell type, or the type named by a symbol path hint such as
    /// `sky130_stdcells/nand2_1.sym`. First match wins: exact name, name
    /// with a vendor prefix stripped, substring match in either direction,
    /// then the fallback buffer.
    pub fn resolve(&self, cell_type: Option<&str>, symbol_hint: Option<&str>) -> Resolution {
        let key = cell_type
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .or_else(|| symbol_hint.and_then(type_from_symbol_path));
        let Some(key) = key else {
            return self.fallback("no cell type or symbol given".to_string());
        };

        if self.library.contains(&key) {
            return self.found(&key, "exact");
        }

        for prefix in &self.prefixes {
            if let Some(stripped) = key.strip_prefix(prefix.as_str()) {
                if self.library.contains(stripped) {
                    return self.found(stripped, "stripped prefix");
                }
            }
        }

        if let Some(name) = self
            .library
            .names()
            .find(|name| name.contains(key.as_str()) || key.contains(*name))
        {
            return self.found(name, "substring match");
        }

        self.fallback(format!("no library cell matches '{key}'"))
    }

    /// Pin remapping for a cell substituted by the fallback buffer.
    ///
    /// Only two-pin cells map cleanly: first non-power pin to the buffer
    /// input, second to its output. Any other pin count yields `None` and
    /// callers keep the original pin names.
    pub fn pin_remap(&self, resolution: &Resolution, cell: &Cell) -> Option<PinRemap> {
        if !resolution.substituted || resolution.cell_type != self.fallback {
            return None;
        }
        let signal: Vec<&str> = cell
            .conns
            .iter()
            .map(|c| c.pin.as_str())
            .filter(|p| !is_power_pin(p))
            .collect();
        let [input, output] = signal.as_slice() else {
            return None;
        };
        let mut remap = PinRemap::new();
        remap.insert(input.to_string(), self.fallback_input.clone());
        remap.insert(output.to_string(), self.fallback_output.clone());
        Some(remap)
    }
}

/// `dir/nand2_1.sym` → `nand2_1`.
fn type_from_symbol_path(path: &str) -> Option<String> {
    let stem = std::path::Path::new(path).file_stem()?.to_str()?;
    (!stem.is_empty()).then(|| stem.to_string())
}

#[cfg(test)]
#[path = "../../tests/rust/test_library_resolver.rs"]
mod tests;
