//! Built-in pin geometry for a subset of sky130_fd_sc_hd.
//!
//! Offsets follow the xschem symbols shipped in `sky130_stdcells/`: input
//! pins stack on the left on a 20-unit pitch centred on the origin, outputs
//! do the same on the right.

use indexmap::IndexMap;

use super::{CellLibrary, PinMetric, PinTable};

/// Generic buffer used when a cell cannot be resolved.
pub const FALLBACK_BUFFER: &str = "buf_1";
pub const FALLBACK_INPUT_PIN: &str = "A";
pub const FALLBACK_OUTPUT_PIN: &str = "X";

/// Vendor prefixes stripped during resolution.
pub const VENDOR_PREFIXES: &[&str] = &[
    "sky130_fd_sc_hd__",
    "sky130_fd_sc_hs__",
    "sky130_fd_sc_ms__",
    "sky130_fd_sc_ls__",
    "sky130_fd_sc_hdll__",
    "sky130_ef_sc_hd__",
];

const PITCH: i64 = 20;

/// (cell, inputs, outputs, half width)
const CELLS: &[(&str, &[&str], &[&str], i64)] = &[
    ("inv_1", &["A"], &["Y"], 60),
    ("inv_2", &["A"], &["Y"], 60),
    ("clkinv_1", &["A"], &["Y"], 60),
    ("buf_1", &["A"], &["X"], 60),
    ("buf_2", &["A"], &["X"], 60),
    ("clkbuf_1", &["A"], &["X"], 60),
    ("dlygate4sd3_1", &["A"], &["X"], 80),
    ("nand2_1", &["A", "B"], &["Y"], 80),
    ("nand3_1", &["A", "B", "C"], &["Y"], 80),
    ("nor2_1", &["A", "B"], &["Y"], 80),
    ("nor3_1", &["A", "B", "C"], &["Y"], 80),
    ("and2_1", &["A", "B"], &["X"], 80),
    ("and3_1", &["A", "B", "C"], &["X"], 80),
    ("or2_1", &["A", "B"], &["X"], 80),
    ("or3_1", &["A", "B", "C"], &["X"], 80),
    ("xor2_1", &["A", "B"], &["X"], 80),
    ("xnor2_1", &["A", "B"], &["Y"], 80),
    ("a21oi_1", &["A1", "A2", "B1"], &["Y"], 80),
    ("a21o_1", &["A1", "A2", "B1"], &["X"], 80),
    ("o21ai_0", &["A1", "A2", "B1"], &["Y"], 80),
    ("a22oi_1", &["A1", "A2", "B1", "B2"], &["Y"], 100),
    ("mux2_1", &["A0", "A1", "S"], &["X"], 100),
    ("mux2i_1", &["A0", "A1", "S"], &["Y"], 100),
    ("ha_1", &["A", "B"], &["COUT", "SUM"], 100),
    ("fa_1", &["A", "B", "CIN"], &["COUT", "SUM"], 100),
    ("dfxtp_1", &["CLK", "D"], &["Q"], 120),
    ("dfrtp_1", &["CLK", "D", "RESET_B"], &["Q"], 120),
    ("dfstp_1", &["CLK", "D", "SET_B"], &["Q"], 120),
    ("dlxtp_1", &["D", "GATE"], &["Q"], 100),
    ("einvp_1", &["A", "TE"], &["Z"], 80),
    ("conb_1", &[], &["HI", "LO"], 60),
];

/// Offsets for `n` pins stacked on one side.
fn stack(pins: &[&str], half_width: i64, table: &mut PinTable) {
    let n = pins.len() as i64;
    for (i, pin) in pins.iter().enumerate() {
        let dy = PITCH * i as i64 - PITCH * (n - 1) / 2;
        table.insert(pin.to_string(), PinMetric::new(dy, half_width));
    }
}

pub fn builtin() -> CellLibrary {
    let mut lib = CellLibrary::new();
    for &(name, inputs, outputs, half_width) in CELLS {
        let mut table: PinTable = IndexMap::new();
        stack(inputs, half_width, &mut table);
        stack(outputs, half_width, &mut table);
        lib.insert(name, table);
    }
    lib
}
