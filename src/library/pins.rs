//! Pin side conventions.
//!
//! Standard-cell libraries name pins predictably: data and control inputs
//! start with `A`, `B`, `CLK`, ...; outputs start with `X`, `Y`, `Q`, ...
//! The side decides where a pin is drawn and whether it drives its net.

use serde::Serialize;

/// Which edge of a symbol a pin sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PinSide {
    /// Input side.
    Left,
    /// Output side.
    Right,
}

/// Supply pins. They never take part in graph building or routing.
pub const POWER_PINS: &[&str] = &["VGND", "VNB", "VPB", "VPWR"];

pub fn is_power_pin(pin: &str) -> bool {
    POWER_PINS.contains(&pin)
}

/// Prefix tables used to classify pins.
#[derive(Debug, Clone)]
pub struct PinConvention {
    pub input_prefixes: Vec<String>,
    pub output_prefixes: Vec<String>,
}

impl Default for PinConvention {
    /// The sky130_fd_sc_hd naming convention.
    fn default() -> Self {
        let owned = |v: &[&str]| v.iter().map(|s| s.to_string()).collect();
        Self {
            input_prefixes: owned(&[
                "A", "B", "C", "D", "S", "CLK", "RESET", "SET", "SLEEP", "GATE", "DE", "CI",
            ]),
            output_prefixes: owned(&["X", "Y", "Q", "CO", "GCLK"]),
        }
    }
}

impl PinConvention {
    /// Classify a pin. Input prefixes win over output prefixes, and a pin
    /// matching neither is treated as an input so that no driver is invented.
    ///
    /// Because `C` is an input prefix, `CO`/`COUT` land on the left under the
    /// default tables.
    pub fn side(&self, pin: &str) -> PinSide {
        let upper = pin.to_uppercase();
        if self.input_prefixes.iter().any(|p| upper.starts_with(p.as_str())) {
            return PinSide::Left;
        }
        if self.output_prefixes.iter().any(|p| upper.starts_with(p.as_str())) {
            return PinSide::Right;
        }
        PinSide::Left
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
