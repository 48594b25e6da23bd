//! Occupancy filler: decap / fill / tap cells in a grid left of the logic.
//!
//! These cells carry no connectivity that matters for reading the
//! schematic, so they are packed into a near-square block and kept out of
//! the way of the layered logic.

use crate::config::LayoutConfig;
use crate::netlist::Cell;
use crate::netlist::normalize::fold_decap;
use crate::schematic::{SchematicCommand, SchematicSink};

/// Place `cells` in a grid and return the number of grid columns.
///
/// With `fill_max_rows` unset the grid is n × n where n = ceil(sqrt(count)),
/// filled row by row. With a row limit the grid is filled column by column
/// and grows as many columns as needed.
pub fn place_fillers(
    cells: &[Cell],
    config: &LayoutConfig,
    out: &mut Vec<SchematicCommand>,
) -> usize {
    if cells.is_empty() {
        return 0;
    }

    let rows = config.fill_max_rows.filter(|&r| r > 0);
    let side = grid_side(cells.len());
    let columns = rows.map_or(side, |r| cells.len().div_ceil(r));

    for (i, cell) in cells.iter().enumerate() {
        let (col, row) = match rows {
            Some(r) => (i / r, i % r),
            None => (i % side, i / side),
        };
        let x = config.fill_base_x + col as i64 * config.fill_x_step;
        let y = row as i64 * config.fill_y_step;
        let symbol = format!("{}/{}.sym", config.symbol_dir, symbol_name(cell, config));
        out.add_instance(&symbol, x, y, 0, &cell.name, &cell.cell_type);
    }

    tracing::info!(cells = cells.len(), columns, "occupancy grid placed");
    columns
}

/// Cell type as the normalizer names it: decap family folded, then the
/// first matching vendor prefix removed.
fn symbol_name(cell: &Cell, config: &LayoutConfig) -> String {
    let folded = fold_decap(&cell.cell_type);
    config
        .vendor_prefixes
        .iter()
        .find_map(|p| folded.strip_prefix(p.as_str()))
        .unwrap_or(&*folded)
        .to_string()
}

/// Smallest n with n * n >= count.
fn grid_side(count: usize) -> usize {
    let mut n = (count as f64).sqrt() as usize;
    while n * n < count {
        n += 1;
    }
    n
}

// ─── Tests ───────────────────────────────────────────────────────────────────
