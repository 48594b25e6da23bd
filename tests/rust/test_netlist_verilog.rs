use super::*;

const HALF_ADDER: &str = r#"
/* Generated by Yosys */
module half_adder(a, b, s, c);
  input a;
  input b;
  output s;
  output c; // carry
  wire _0_;
  sky130_fd_sc_hd__xor2_1 _1_ (
    .A(a),
    .B(b),
    .X(s)
  );
  sky130_fd_sc_hd__and2_1 _2_ (.A(a), .B(b), .X(c));
  sky130_ef_sc_hd__decap_12 FILLER_0_0 ();
endmodule
"#;

// ── Cleaning ─────────────────────────────────────────────────────────────────

#[test]
fn test_clean_strips_comments_and_whitespace() {
    let out = clean_verilog("a /* x\ny */ b // tail\n  c");
    assert_eq!(out, "a b c");
}

// ── Ports ────────────────────────────────────────────────────────────────────

#[test]
fn test_ports_non_ansi() {
    let ports = extract_ports(&clean_verilog(HALF_ADDER));
    let names: Vec<&str> = ports.iter().map(|(_, n)| n.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "s", "c"]);
    assert_eq!(ports[0].0, "input");
    assert_eq!(ports[3].0, "output");
}

#[test]
fn test_ports_ansi_header() {
    let src = "module m (input wire a, input [3:0] d, output y); endmodule";
    let ports = extract_ports(&clean_verilog(src));
    assert_eq!(
        ports,
        vec![
            ("input".to_string(), "a".to_string()),
            ("input".to_string(), "d".to_string()),
            ("output".to_string(), "y".to_string()),
        ]
    );
}

#[test]
fn test_ports_comma_list() {
    let ports = extract_ports("input a, b, c; output [1:0] y, z;");
    let names: Vec<&str> = ports.iter().map(|(_, n)| n.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c", "y", "z"]);
}

// ── Instances ────────────────────────────────────────────────────────────────

#[test]
fn test_instances_extracted_with_pins() {
    let inst = extract_instances(&clean_verilog(HALF_ADDER));
    assert_eq!(inst.len(), 3);
    assert_eq!(inst[0].0, "sky130_fd_sc_hd__xor2_1");
    assert_eq!(inst[0].1, "_1_");
    assert_eq!(
        inst[0].2,
        vec![
            Connection::new("A", "a"),
            Connection::new("B", "b"),
            Connection::new("X", "s"),
        ]
    );
}

#[test]
fn test_instance_with_parameters() {
    let inst = extract_instances("foo #(.W(4)) u_foo (.A(n1), .Y(n2));");
    assert_eq!(inst.len(), 1);
    assert_eq!(inst[0].0, "foo");
    assert_eq!(inst[0].1, "u_foo");
}

#[test]
fn test_bus_bit_nets_kept_verbatim() {
    let inst = extract_instances("inv_1 u0 (.A(data[3]), .Y( out[0] ));");
    assert_eq!(inst[0].2[0].net, "data[3]");
    assert_eq!(inst[0].2[1].net, "out[0]");
}

#[test]
fn test_unconnected_pin_dropped() {
    let inst = extract_instances("inv_1 u0 (.A(a), .Y());");
    assert_eq!(inst[0].2, vec![Connection::new("A", "a")]);
}

// ── Full parse ───────────────────────────────────────────────────────────────

#[test]
fn test_parse_splits_occupancy_cells() {
    let n = VerilogParser.parse(HALF_ADDER).unwrap();
    assert_eq!(n.module, "half_adder");
    assert_eq!(n.cells.len(), 2);
    assert_eq!(n.occupancy.len(), 1);
    assert_eq!(n.occupancy[0].name, "FILLER_0_0");
    assert_eq!(n.cells[1].id, 1);
}

#[test]
fn test_parse_without_module_fails() {
    let err = VerilogParser.parse("inv_1 u0 (.A(a), .Y(y));").unwrap_err();
    assert!(matches!(err, NetlistError::NoModule));
}

#[test]
fn test_parse_empty_module() {
    let n = VerilogParser.parse("module empty(); endmodule").unwrap();
    assert!(n.cells.is_empty());
    assert!(n.inputs.is_empty());
}
