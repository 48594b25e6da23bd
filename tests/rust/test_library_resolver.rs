use super::*;

fn lib() -> CellLibrary {
    CellLibrary::sky130()
}

fn cell(cell_type: &str, pins: &[(&str, &str)]) -> Cell {
    pins.iter()
        .fold(Cell::new(0, cell_type, "u0"), |c, (p, n)| c.with_conn(*p, *n))
}

// ── Resolution order ─────────────────────────────────────────────────────────

#[test]
fn test_nothing_given_falls_back() {
    let lib = lib();
    let r = CellResolver::new(&lib, "sky130_stdcells").resolve(None, None);
    assert!(r.substituted);
    assert_eq!(r.cell_type, FALLBACK_BUFFER);
    assert_eq!(r.symbol_path, "sky130_stdcells/buf_1.sym");
}

#[test]
fn test_empty_type_treated_as_missing() {
    let lib = lib();
    let r = CellResolver::new(&lib, "s").resolve(Some(""), None);
    assert!(r.substituted);
}

#[test]
fn test_exact_match() {
    let lib = lib();
    let r = CellResolver::new(&lib, "sky130_stdcells").resolve(Some("nand2_1"), None);
    assert_eq!(
        r,
        Resolution {
            symbol_path: "sky130_stdcells/nand2_1.sym".to_string(),
            cell_type: "nand2_1".to_string(),
            substituted: false,
            reason: "exact".to_string(),
        }
    );
}

#[test]
fn test_resolution_idempotent() {
    let lib = lib();
    let res = CellResolver::new(&lib, "s");
    for name in lib.names() {
        let once = res.resolve(Some(name), None);
        assert!(!once.substituted);
        assert_eq!(once.cell_type, name);
        let twice = res.resolve(Some(&once.cell_type), None);
        assert_eq!(once, twice);
    }
}

#[test]
fn test_type_from_symbol_hint() {
    let lib = lib();
    let r = CellResolver::new(&lib, "s").resolve(None, Some("sky130_stdcells/xor2_1.sym"));
    assert_eq!(r.cell_type, "xor2_1");
    assert!(!r.substituted);
}

#[test]
fn test_vendor_prefix_stripped() {
    let lib = lib();
    let r = CellResolver::new(&lib, "s").resolve(Some("sky130_fd_sc_hd__a21oi_1"), None);
    assert_eq!(r.cell_type, "a21oi_1");
    assert!(!r.substituted);
    assert_eq!(r.reason, "stripped prefix");
}

#[test]
fn test_substring_library_name_contains_key() {
    let lib = lib();
    let r = CellResolver::new(&lib, "s").resolve(Some("dfrtp"), None);
    assert_eq!(r.cell_type, "dfrtp_1");
    assert_eq!(r.reason, "substring match");
}

#[test]
fn test_substring_key_contains_library_name() {
    let lib = lib();
    let r = CellResolver::new(&lib, "s").resolve(Some("my_mux2_1_wrapped"), None);
    assert_eq!(r.cell_type, "mux2_1");
    assert!(!r.substituted);
}

#[test]
fn test_substring_first_in_enumeration_order() {
    let lib = CellLibrary::from_json_str(r#"{"zz_and": {}, "aa_and": {}}"#).unwrap();
    let r = CellResolver::new(&lib, "s").resolve(Some("and"), None);
    assert_eq!(r.cell_type, "zz_and");
}

#[test]
fn test_substring_is_case_sensitive() {
    let lib = lib();
    let r = CellResolver::new(&lib, "s").resolve(Some("NAND2_1"), None);
    assert!(r.substituted);
}

#[test]
fn test_unknown_falls_back_with_reason() {
    let lib = lib();
    let r = CellResolver::new(&lib, "s").resolve(Some("custom_inv"), None);
    assert!(r.substituted);
    assert_eq!(r.cell_type, "buf_1");
    assert!(r.reason.contains("custom_inv"));
}

#[test]
fn test_custom_fallback() {
    let lib = lib();
    let res = CellResolver::new(&lib, "s").with_fallback("inv_1", "A", "Y");
    let r = res.resolve(Some("mystery"), None);
    assert_eq!(r.cell_type, "inv_1");
    assert_eq!(res.fallback_type(), "inv_1");
}

#[test]
fn test_custom_prefixes() {
    let lib = lib();
    let res = CellResolver::new(&lib, "s").with_prefixes(vec!["acme_".to_string()]);
    assert_eq!(res.resolve(Some("acme_inv_1"), None).reason, "stripped prefix");
}

// ── Pin remapping ────────────────────────────────────────────────────────────

#[test]
fn test_remap_two_pin_cell() {
    let lib = lib();
    let res = CellResolver::new(&lib, "s");
    let c = cell("custom_inv", &[("IN", "netA"), ("OUT", "netB")]);
    let r = res.resolve(Some(&c.cell_type), None);
    assert!(r.substituted);
    assert_eq!(r.cell_type, "buf_1");
    let remap = res.pin_remap(&r, &c).unwrap();
    assert_eq!(remap.len(), 2);
    assert_eq!(remap["IN"], "A");
    assert_eq!(remap["OUT"], "X");
}

#[test]
fn test_remap_ignores_power_pins() {
    let lib = lib();
    let res = CellResolver::new(&lib, "s");
    let c = cell(
        "custom_inv",
        &[("VPWR", "VPWR"), ("IN", "a"), ("VGND", "VGND"), ("OUT", "b")],
    );
    let r = res.resolve(Some(&c.cell_type), None);
    let remap = res.pin_remap(&r, &c).unwrap();
    assert_eq!(remap.keys().collect::<Vec<_>>(), vec!["IN", "OUT"]);
}

#[test]
fn test_no_remap_for_three_pins() {
    let lib = lib();
    let res = CellResolver::new(&lib, "s");
    let c = cell("custom_gate", &[("I0", "a"), ("I1", "b"), ("O", "y")]);
    let r = res.resolve(Some(&c.cell_type), None);
    assert!(r.substituted);
    assert!(res.pin_remap(&r, &c).is_none());
}

#[test]
fn test_no_remap_for_one_pin() {
    let lib = lib();
    let res = CellResolver::new(&lib, "s");
    let c = cell("custom_tie", &[("HI", "one")]);
    let r = res.resolve(Some(&c.cell_type), None);
    assert!(res.pin_remap(&r, &c).is_none());
}

#[test]
fn test_no_remap_when_not_substituted() {
    let lib = lib();
    let res = CellResolver::new(&lib, "s");
    let c = cell("inv_1", &[("A", "a"), ("Y", "y")]);
    let r = res.resolve(Some(&c.cell_type), None);
    assert!(res.pin_remap(&r, &c).is_none());
}
