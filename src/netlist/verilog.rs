//! Regex-driven reader for flattened structural Verilog.
//!
//! Only the subset synthesis tools emit for gate-level netlists is
//! understood: one module, port declarations, `wire` declarations, and
//! named-port cell instances. Behavioral constructs are ignored.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::types::{Cell, Connection, Netlist};
use super::{NetlistError, Parser};

// ─── Patterns ────────────────────────────────────────────────────────────────

static BLOCK_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());
static LINE_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"//[^\n]*").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static MODULE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bmodule\s+(\w+)").unwrap());
static PORT_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(input|output|inout)\b").unwrap());
static NET_KIND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:(?:wire|reg|logic|signed)\s+)*(?:\[[^\]]*\]\s*)?").unwrap());
static IDENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z_][\w$]*$").unwrap());
static INSTANCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\w+)\s*(?:#\s*\((?:[^()]|\([^()]*\))*\)\s*)?(\w+)\s*\((.*?)\)\s*;").unwrap()
});
static PIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.(\w+)\s*\(\s*([^)]*?)\s*\)").unwrap());

/// Words that look like an instance header to [`INSTANCE`] but are not cells.
const RESERVED: &[&str] = &[
    "module",
    "endmodule",
    "input",
    "output",
    "inout",
    "wire",
    "reg",
    "assign",
    "always",
    "initial",
    "function",
    "task",
];

// ─── Cleaning ────────────────────────────────────────────────────────────────

/// Drop comments and collapse every whitespace run to a single space.
pub fn clean_verilog(src: &str) -> String {
    let s = BLOCK_COMMENT.replace_all(src, "");
    let s = LINE_COMMENT.replace_all(&s, "");
    WHITESPACE.replace_all(&s, " ").trim().to_string()
}

// ─── Ports ───────────────────────────────────────────────────────────────────

/// Extract `(direction, name)` pairs in declaration order.
///
/// Handles comma lists (`input a, b;`), bus ranges (`input [3:0] d;`, the
/// bus is one net), and ANSI headers (`module m (input a, output y);`).
pub fn extract_ports(clean: &str) -> Vec<(String, String)> {
    let keywords: Vec<(usize, usize, &str)> = PORT_KEYWORD
        .captures_iter(clean)
        .filter_map(|c| {
            let m = c.get(0)?;
            Some((m.start(), m.end(), c.get(1)?.as_str()))
        })
        .collect();

    let mut ports = Vec::new();
    for (i, &(_, end, direction)) in keywords.iter().enumerate() {
        let next_kw = keywords.get(i + 1).map(|k| k.0).unwrap_or(clean.len());
        let rest = &clean[end..next_kw];
        let stop = rest.find([';', ')']).unwrap_or(rest.len());
        let decl = &rest[..stop];
        let names = NET_KIND.replace(decl, "");
        for name in names.split(',').map(str::trim) {
            if IDENT.is_match(name) && !RESERVED.contains(&name) {
                ports.push((direction.to_string(), name.to_string()));
            }
        }
    }
    ports
}

// ─── Instances ───────────────────────────────────────────────────────────────

/// Extract `(cell_type, instance_name, connections)` triples.
pub fn extract_instances(clean: &str) -> Vec<(String, String, Vec<Connection>)> {
    INSTANCE
        .captures_iter(clean)
        .filter(|c| !RESERVED.contains(&&c[1]))
        .map(|c| {
            let conns = PIN
                .captures_iter(&c[3])
                .filter(|p| !p[2].is_empty())
                .map(|p| Connection::new(&p[1], &p[2]))
                .collect();
            (c[1].to_string(), c[2].to_string(), conns)
        })
        .collect()
}

// ─── Parser ──────────────────────────────────────────────────────────────────

/// Structural Verilog front end.
pub struct VerilogParser;

impl Parser for VerilogParser {
    fn parse(&self, src: &str) -> Result<Netlist, NetlistError> {
        let clean = clean_verilog(src);
        let module = MODULE
            .captures(&clean)
            .map(|c| c[1].to_string())
            .ok_or(NetlistError::NoModule)?;

        let mut netlist = Netlist::new(module);
        for (direction, name) in extract_ports(&clean) {
            match direction.as_str() {
                "input" => netlist.add_input(name),
                "output" => netlist.add_output(name),
                // Bidirectional ports have no side; they are left as internal nets.
                _ => {}
            }
        }

        for (cell_type, name, conns) in extract_instances(&clean) {
            let mut cell = Cell::new(0, cell_type, name);
            cell.conns = conns;
            netlist.push_cell(cell);
        }

        debug!(
            module = %netlist.module,
            inputs = netlist.inputs.len(),
            outputs = netlist.outputs.len(),
            cells = netlist.cells.len(),
            occupancy = netlist.occupancy.len(),
            "parsed netlist"
        );
        Ok(netlist)
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_netlist_verilog.rs"]
mod tests;
