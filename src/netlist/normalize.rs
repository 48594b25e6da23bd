//! Netlist normalizer.
//!
//! Rewrites a synthesized netlist into a tidier form before conversion:
//! vendor prefixes are stripped from cell names, the 12-track decap family
//! collapses to `decap_12`, and the module header is rebuilt in ANSI style
//! with inputs then outputs, each sorted by name.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

static DECAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"sky130_ef_sc_hd__decap_\d+_12").unwrap());
static MODULE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"module\s+(\w+)").unwrap());
static PORT_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(input|output)\s+(\[[^\]]+\]\s+)?(\w+)\s*;").unwrap());

/// Prefix removed from every standard cell name.
pub const STANDARD_PREFIX: &str = "sky130_fd_sc_hd__";

/// Collapse the 12-track decap family (`sky130_ef_sc_hd__decap_<n>_12`)
/// to `decap_12`.
pub fn fold_decap(text: &str) -> Cow<'_, str> {
    DECAP.replace_all(text, "decap_12")
}

/// Apply the cell renaming rules to one line of source.
pub fn rename_cells(line: &str) -> String {
    fold_decap(line).replace(STANDARD_PREFIX, "")
}

/// Normalize a whole netlist. Unknown constructs in the body pass through.
pub fn normalize_netlist(src: &str) -> String {
    let mut module_name: Option<String> = None;
    let mut inputs: BTreeMap<String, String> = BTreeMap::new();
    let mut outputs: BTreeMap<String, String> = BTreeMap::new();
    let mut body: Vec<String> = Vec::new();
    let mut in_body = false;

    for raw in src.lines() {
        let line = rename_cells(raw);
        let stripped = line.trim();
        if stripped.is_empty() {
            continue;
        }

        if module_name.is_none() {
            if let Some(c) = MODULE.captures(stripped) {
                module_name = Some(c[1].to_string());
                continue;
            }
        }

        if let Some(c) = PORT_DECL.captures(stripped) {
            let width = c
                .get(2)
                .map(|w| format!("{} ", w.as_str().trim()))
                .unwrap_or_default();
            let name = c[3].to_string();
            let decl = format!("{} {}{}", &c[1], width, name);
            if &c[1] == "input" {
                inputs.insert(name, decl);
            } else {
                outputs.insert(name, decl);
            }
            continue;
        }

        if stripped.starts_with("wire") || (stripped.contains('(') && !stripped.starts_with("module"))
        {
            in_body = true;
        }
        if in_body && !stripped.starts_with("endmodule") {
            body.push(line);
        }
    }

    let ports: Vec<&String> = inputs.values().chain(outputs.values()).collect();
    let mut out = format!(
        "module {} (\n",
        module_name.as_deref().unwrap_or("unknown")
    );
    for (i, port) in ports.iter().enumerate() {
        let comma = if i + 1 < ports.len() { "," } else { "" };
        out.push_str(&format!("    {port}{comma}\n"));
    }
    out.push_str(");\n\n");
    for line in &body {
        out.push_str(line);
        out.push('\n');
    }
    out.push_str("\nendmodule\n");
    out
}

// ─── Tests ───────────────────────────────────────────────────────────────────
