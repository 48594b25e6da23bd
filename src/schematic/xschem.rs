//! Xschem `.sch` text writer.

use super::SchematicSink;

/// Output options for the xschem document.
#[derive(Debug, Clone)]
pub struct SchematicConfig {
    /// Value written into the `v {xschem version=...}` header.
    pub version: String,
    /// Supply attributes attached to every cell instance.
    pub power_attrs: Vec<(String, String)>,
    /// `prefix=` attribute attached to every cell instance.
    pub cell_prefix: String,
}

impl Default for SchematicConfig {
    fn default() -> Self {
        Self {
            version: "3.4.8RC".to_string(),
            power_attrs: ["VGND", "VNB", "VPB", "VPWR"]
                .iter()
                .map(|p| (p.to_string(), p.to_string()))
                .collect(),
            cell_prefix: "sky130_fd_sc_hd__".to_string(),
        }
    }
}

impl SchematicConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Accumulates xschem lines. The header is written on construction.
pub struct XschemWriter {
    config: SchematicConfig,
    lines: Vec<String>,
}

impl XschemWriter {
    pub fn new(config: SchematicConfig) -> Self {
        let mut lines = vec![format!(
            "v {{xschem version={} file_version=1.3}}",
            config.version
        )];
        lines.extend(["G {}", "K {}", "V {}", "S {}", "F {}", "E {}", ""].map(String::from));
        Self { config, lines }
    }

    /// Body lines written so far, header excluded.
    pub fn body(&self) -> &[String] {
        &self.lines[8..]
    }

    /// The complete document, lines joined with `\n`.
    pub fn finish(self) -> String {
        self.lines.join("\n")
    }

    fn instance_attrs(&self, name: &str) -> String {
        let mut attr = format!("name={name}");
        for (k, v) in &self.config.power_attrs {
            attr.push_str(&format!(" {k}={v}"));
        }
        if !self.config.cell_prefix.is_empty() {
            attr.push_str(&format!(" prefix={}", self.config.cell_prefix));
        }
        attr
    }
}

impl Default for XschemWriter {
    fn default() -> Self {
        Self::new(SchematicConfig::default())
    }
}

impl SchematicSink for XschemWriter {
    fn add_instance(&mut self, symbol: &str, x: i64, y: i64, rotation: i32, name: &str, _cell_type: &str) {
        let attr = self.instance_attrs(name);
        self.lines
            .push(format!("C {{{symbol}}} {x} {y} {rotation} 0 {{{attr}}}"));
    }

    fn add_wire(&mut self, x1: i64, y1: i64, x2: i64, y2: i64, label: Option<&str>) {
        let line = match label {
            Some(lab) if !lab.is_empty() => format!("N {x1} {y1} {x2} {y2} {{lab={lab}}}"),
            _ => format!("N {x1} {y1} {x2} {y2} {{}}"),
        };
        self.lines.push(line);
    }

    fn add_io_pin(&mut self, symbol: &str, x: i64, y: i64, rotation: i32, name: &str, label: &str) {
        self.lines.push(format!(
            "C {{{symbol}}} {x} {y} {rotation} 0 {{name={name} lab={label}}}"
        ));
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
