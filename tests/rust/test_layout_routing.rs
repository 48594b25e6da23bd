use super::*;
use crate::layout::placement::PortSlot;
use crate::layout::types::BoundingBox;
use crate::library::{CellResolver, PinConvention};
use crate::netlist::Cell;

fn set(names: &[&str]) -> IndexSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn inv(id: usize, a: &str, y: &str) -> Cell {
    Cell::new(id, "inv_1", format!("u{id}"))
        .with_conn("A", a)
        .with_conn("Y", y)
}

fn route(
    cfg: &LayoutConfig,
    cells: &[(Cell, Point)],
    inputs: &IndexSet<String>,
    outputs: &IndexSet<String>,
    placement: Option<&Placement>,
) -> (Vec<SchematicCommand>, Diagnostics) {
    let lib = CellLibrary::sky130();
    let resolver = CellResolver::new(&lib, "sky130_stdcells");
    let conv = PinConvention::default();
    let mut router = Router::new(cfg, &lib, inputs, outputs);
    for (cell, at) in cells {
        let res = resolver.resolve(Some(&cell.cell_type), None);
        let pins = PinView::classify(cell, None, &conv);
        router.route_cell(cell.id, &cell.name, &res, &pins, *at);
    }
    if let Some(p) = placement {
        router.sweep(p);
    }
    router.finish()
}

fn markers(cmds: &[SchematicCommand]) -> Vec<&str> {
    cmds.iter()
        .filter_map(|c| match c {
            SchematicCommand::IoPin { name, .. } => Some(name.as_str()),
            _ => None,
        })
        .collect()
}

fn wire(x1: i64, y1: i64, x2: i64, y2: i64, label: &str) -> SchematicCommand {
    SchematicCommand::Wire {
        x1,
        y1,
        x2,
        y2,
        label: Some(label.to_string()),
    }
}

fn pin(symbol: &str, x: i64, y: i64, name: &str, label: &str) -> SchematicCommand {
    SchematicCommand::IoPin {
        symbol: symbol.to_string(),
        x,
        y,
        rotation: 0,
        name: name.to_string(),
        label: label.to_string(),
    }
}

fn placement(inputs: &[(&str, Point)], outputs: &[(&str, Point)], bbox: Option<BoundingBox>) -> Placement {
    let slots = |v: &[(&str, Point)]| {
        v.iter()
            .map(|(n, at)| PortSlot {
                name: n.to_string(),
                at: *at,
            })
            .collect()
    };
    Placement {
        cells: Vec::new(),
        input_slots: slots(inputs),
        output_slots: slots(outputs),
        bbox,
    }
}

// ── Per-pin geometry ─────────────────────────────────────────────────────────

#[test]
fn test_primary_input_and_internal_output() {
    let cfg = LayoutConfig::new();
    let (cmds, _) = route(
        &cfg,
        &[(inv(0, "a", "n1"), Point::new(0, 0))],
        &set(&["a"]),
        &set(&[]),
        None,
    );
    assert_eq!(cmds.len(), 4);
    assert!(matches!(&cmds[0], SchematicCommand::Instance { symbol, .. } if symbol == "sky130_stdcells/inv_1.sym"));
    assert_eq!(cmds[1], wire(-150, 0, -60, 0, "a"));
    assert_eq!(cmds[2], pin("ipin.sym", -150, 0, "in_a_0", "a"));
    assert_eq!(cmds[3], wire(60, 0, 90, 0, "n1"));
}

#[test]
fn test_internal_input_and_primary_output() {
    let cfg = LayoutConfig::new();
    let (cmds, _) = route(
        &cfg,
        &[(inv(3, "n0", "y"), Point::new(100, -500))],
        &set(&[]),
        &set(&["y"]),
        None,
    );
    assert_eq!(cmds[1], wire(10, -500, 40, -500, "n0"));
    assert_eq!(cmds[2], wire(160, -500, 250, -500, "y"));
    assert_eq!(cmds[3], pin("opin.sym", 250, -500, "out_y_3", "y"));
}

#[test]
fn test_pin_dy_offsets_applied() {
    let cfg = LayoutConfig::new();
    let cell = Cell::new(0, "nand2_1", "u0")
        .with_conn("A", "n0")
        .with_conn("B", "n1")
        .with_conn("Y", "n2");
    let (cmds, _) = route(&cfg, &[(cell, Point::new(0, 0))], &set(&[]), &set(&[]), None);
    assert_eq!(cmds[1], wire(-110, -10, -80, -10, "n0"));
    assert_eq!(cmds[2], wire(-110, 10, -80, 10, "n1"));
    assert_eq!(cmds[3], wire(80, 0, 110, 0, "n2"));
}

#[test]
fn test_power_pins_not_routed() {
    let cfg = LayoutConfig::new();
    let cell = inv(0, "n0", "n1").with_conn("VPWR", "VPWR").with_conn("VGND", "VGND");
    let (cmds, _) = route(&cfg, &[(cell, Point::new(0, 0))], &set(&[]), &set(&[]), None);
    assert_eq!(cmds.len(), 3);
}

#[test]
fn test_default_metric_reported_once_per_pin() {
    let cfg = LayoutConfig::new();
    let cells = [
        (
            Cell::new(0, "mux2_1", "u0").with_conn("A0", "a").with_conn("DE", "d"),
            Point::new(0, 0),
        ),
        (
            Cell::new(1, "mux2_1", "u1").with_conn("A0", "a").with_conn("DE", "e"),
            Point::new(0, 300),
        ),
    ];
    let (cmds, diags) = route(&cfg, &cells, &set(&[]), &set(&[]), None);
    let defaults: Vec<_> = diags
        .iter()
        .filter(|d| matches!(d, Diagnostic::DefaultPinMetric { .. }))
        .collect();
    assert_eq!(defaults.len(), 1);
    // DE falls back to dx 60.
    assert_eq!(cmds[2], wire(-90, 0, -60, 0, "d"));
}

// ── Boundary markers ─────────────────────────────────────────────────────────

#[test]
fn test_one_marker_per_consumer() {
    let cfg = LayoutConfig::new();
    let cells = [
        (inv(0, "a", "n0"), Point::new(0, 0)),
        (inv(1, "a", "n1"), Point::new(0, 300)),
    ];
    let (cmds, _) = route(&cfg, &cells, &set(&["a"]), &set(&[]), None);
    assert_eq!(markers(&cmds), vec!["in_a_0", "in_a_1"]);
}

#[test]
fn test_shared_markers_once_per_port() {
    let cfg = LayoutConfig {
        share_boundary_pins: true,
        ..LayoutConfig::new()
    };
    let cells = [
        (inv(0, "a", "y"), Point::new(0, 0)),
        (inv(1, "a", "y"), Point::new(0, 300)),
    ];
    let (cmds, _) = route(&cfg, &cells, &set(&["a"]), &set(&["y"]), None);
    assert_eq!(markers(&cmds), vec!["in_a", "out_y"]);
    // The second consumer still draws its labeled boundary wire.
    assert!(cmds.contains(&wire(-150, 300, -60, 300, "a")));
}

#[test]
fn test_internal_net_gets_no_marker() {
    let cfg = LayoutConfig::new();
    let cells = [
        (inv(0, "a", "n1"), Point::new(0, 0)),
        (inv(1, "n1", "y"), Point::new(400, 0)),
    ];
    let (cmds, _) = route(&cfg, &cells, &set(&["a"]), &set(&["y"]), None);
    assert_eq!(markers(&cmds), vec!["in_a_0", "out_y_1"]);
}

#[test]
fn test_tied_inputs_get_distinct_markers() {
    let cfg = LayoutConfig::new();
    let nand = Cell::new(0, "nand2_1", "u0")
        .with_conn("A", "a")
        .with_conn("B", "a")
        .with_conn("Y", "n1");
    let (cmds, _) = route(&cfg, &[(nand, Point::new(0, 0))], &set(&["a"]), &set(&[]), None);
    assert_eq!(markers(&cmds), vec!["in_a_0", "in_a_0_1"]);
    assert_eq!(cmds[2], pin("ipin.sym", -150, -10, "in_a_0", "a"));
    assert_eq!(cmds[4], pin("ipin.sym", -150, 10, "in_a_0_1", "a"));
}

// ── Sweep ────────────────────────────────────────────────────────────────────

#[test]
fn test_sweep_adds_unused_input() {
    let cfg = LayoutConfig::new();
    let cells = [(inv(0, "a", "y"), Point::new(0, -500))];
    let inputs = set(&["a", "clk"]);
    let outputs = set(&["y"]);
    let p = placement(
        &[("a", Point::new(-400, -500)), ("clk", Point::new(-400, -200))],
        &[("y", Point::new(400, -500))],
        Some(BoundingBox::at(Point::new(0, -500))),
    );
    let (cmds, diags) = route(&cfg, &cells, &inputs, &outputs, Some(&p));
    assert_eq!(markers(&cmds), vec!["in_a_0", "out_y_0", "in_clk"]);
    let n = cmds.len();
    assert_eq!(cmds[n - 2], pin("ipin.sym", -200, -200, "in_clk", "clk"));
    assert_eq!(cmds[n - 1], wire(-200, -200, -170, -200, "clk"));
    assert_eq!(
        diags.iter().collect::<Vec<_>>(),
        vec![&Diagnostic::UnclaimedPort {
            port: "clk".into(),
            direction: PortDirection::Input,
        }]
    );
}

#[test]
fn test_sweep_adds_unused_output_right_of_block() {
    let cfg = LayoutConfig::new();
    let cells = [
        (inv(0, "a", "n0"), Point::new(0, -500)),
        (inv(1, "n0", "n1"), Point::new(400, -500)),
    ];
    let p = placement(
        &[("a", Point::new(-400, -500))],
        &[("done", Point::new(800, -500))],
        Some(BoundingBox {
            min_x: 0,
            max_x: 400,
            min_y: -500,
            max_y: -500,
        }),
    );
    let (cmds, _) = route(&cfg, &cells, &set(&["a"]), &set(&["done"]), Some(&p));
    let n = cmds.len();
    assert_eq!(cmds[n - 2], wire(570, -500, 600, -500, "done"));
    assert_eq!(cmds[n - 1], pin("opin.sym", 600, -500, "out_done", "done"));
}

#[test]
fn test_sweep_never_duplicates_claimed_port() {
    let cfg = LayoutConfig {
        share_boundary_pins: true,
        ..LayoutConfig::new()
    };
    let cells = [(inv(0, "a", "y"), Point::new(0, 0))];
    let p = placement(
        &[("a", Point::new(-400, 0))],
        &[("y", Point::new(400, 0))],
        Some(BoundingBox::at(Point::new(0, 0))),
    );
    let (cmds, diags) = route(&cfg, &cells, &set(&["a"]), &set(&["y"]), Some(&p));
    assert_eq!(markers(&cmds), vec!["in_a", "out_y"]);
    assert!(diags.is_empty());
}

#[test]
fn test_sweep_without_cells_uses_slots() {
    let cfg = LayoutConfig::new();
    let p = placement(
        &[("a", Point::new(-400, -500)), ("b", Point::new(-400, -200))],
        &[("y", Point::new(0, -500))],
        None,
    );
    let (cmds, diags) = route(&cfg, &[], &set(&["a", "b"]), &set(&["y"]), Some(&p));
    assert_eq!(markers(&cmds), vec!["in_a", "in_b", "out_y"]);
    assert_eq!(cmds[0], pin("ipin.sym", -400, -500, "in_a", "a"));
    assert_eq!(diags.len(), 3);
}

#[test]
fn test_input_read_only_by_output_pin_is_swept() {
    // A RIGHT pin on a declared input does not claim it.
    let cfg = LayoutConfig::new();
    let cells = [(inv(0, "n0", "a"), Point::new(0, 0))];
    let p = placement(
        &[("a", Point::new(-400, 0))],
        &[],
        Some(BoundingBox::at(Point::new(0, 0))),
    );
    let (cmds, _) = route(&cfg, &cells, &set(&["a"]), &set(&[]), Some(&p));
    assert_eq!(markers(&cmds), vec!["in_a"]);
}

#[test]
fn test_swept_marker_avoids_cell_marker_name() {
    // Port `clk_0` would be `in_clk_0`, already taken by cell 0 reading `clk`.
    let cfg = LayoutConfig::new();
    let cells = [(inv(0, "clk", "n0"), Point::new(0, -500))];
    let p = placement(
        &[("clk", Point::new(-400, -500)), ("clk_0", Point::new(-400, -200))],
        &[],
        Some(BoundingBox::at(Point::new(0, -500))),
    );
    let (cmds, _) = route(&cfg, &cells, &set(&["clk", "clk_0"]), &set(&[]), Some(&p));
    assert_eq!(markers(&cmds), vec!["in_clk_0", "in_clk_0_1"]);
    let n = cmds.len();
    assert_eq!(cmds[n - 2], pin("ipin.sym", -200, -200, "in_clk_0_1", "clk_0"));
}
