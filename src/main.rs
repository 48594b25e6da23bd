//! netlist2sch CLI entry point.

use std::fs;
use std::io::{self, Read, Write};
use std::process;

use clap::Parser;

use netlist2sch::library::LibraryError;
use netlist2sch::netlist::normalize::normalize_netlist;
use netlist2sch::{CellLibrary, LayoutConfig, SchematicConfig, convert};

/// Flattened gate-level Verilog to a layered xschem schematic.
#[derive(Parser, Debug)]
#[command(
    name = "netlist2sch",
    version = env!("NETLIST2SCH_VERSION"),
    about = "Flattened gate-level Verilog to a layered xschem schematic"
)]
struct Cli {
    /// Input netlist (reads from stdin if not provided)
    input: Option<String>,

    /// Write output to this file instead of stdout
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    /// JSON pin table merged over the built-in sky130 library
    #[arg(short = 'l', long = "library")]
    library: Option<String>,

    /// Directory prefix for cell symbols
    #[arg(long = "symbol-dir", default_value = "sky130_stdcells")]
    symbol_dir: String,

    /// Do not place decap / fill / tap cells
    #[arg(long = "no-fillers")]
    no_fillers: bool,

    /// Cap the filler grid at this many rows
    #[arg(long = "fill-rows")]
    fill_rows: Option<usize>,

    /// One marker per primary port instead of one per consumer pin
    #[arg(long = "share-ports")]
    share_ports: bool,

    /// Horizontal distance between layers
    #[arg(long = "column-width", default_value = "400")]
    column_width: i64,

    /// Vertical distance between cells in a layer
    #[arg(long = "row-height", default_value = "300")]
    row_height: i64,

    /// Version written into the xschem header
    #[arg(long = "xschem-version", default_value = "3.4.8RC")]
    xschem_version: String,

    /// Emit the layout result as JSON instead of a schematic
    #[arg(long = "json")]
    json: bool,

    /// Only normalize the netlist (rename cells, sort ports) and print it
    #[arg(long = "normalize")]
    normalize: bool,

    /// Print the diagnostics report to stderr
    #[arg(long = "report")]
    report: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            column_width: self.column_width,
            row_height: self.row_height,
            include_fillers: !self.no_fillers,
            fill_max_rows: self.fill_rows,
            share_boundary_pins: self.share_ports,
            symbol_dir: self.symbol_dir.clone(),
            ..LayoutConfig::default()
        }
    }

    fn schematic_config(&self) -> SchematicConfig {
        SchematicConfig {
            version: self.xschem_version.clone(),
            ..SchematicConfig::default()
        }
    }

    fn library(&self) -> Result<CellLibrary, LibraryError> {
        let mut library = CellLibrary::sky130();
        if let Some(ref path) = self.library {
            library.merge(CellLibrary::from_json_file(path)?);
        }
        Ok(library)
    }
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(io::stderr)
        .init();

    // Read input from file or stdin
    let text = if let Some(ref path) = cli.input {
        match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("error: cannot read '{}': {}", path, e);
                process::exit(1);
            }
        }
    } else {
        let mut buf = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut buf) {
            eprintln!("error: cannot read stdin: {}", e);
            process::exit(1);
        }
        buf
    };

    let rendered = if cli.normalize {
        normalize_netlist(&text)
    } else {
        let library = match cli.library() {
            Ok(lib) => lib,
            Err(e) => {
                eprintln!("error: {}", e);
                process::exit(1);
            }
        };
        let conversion = match convert(
            &text,
            &library,
            &cli.layout_config(),
            &cli.schematic_config(),
        ) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("error: {}", e);
                process::exit(1);
            }
        };

        if cli.report {
            eprint!("{}", conversion.layout.diagnostics);
            eprintln!(
                "{}: {} cells, {} layers, {} issues ({} warnings)",
                conversion.layout.module,
                conversion.layout.cells.len(),
                conversion.layout.layer_count,
                conversion.layout.diagnostics.len(),
                conversion.layout.diagnostics.num_warnings()
            );
        }

        if cli.json {
            match serde_json::to_string_pretty(&conversion.layout) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("error: cannot serialize layout: {}", e);
                    process::exit(1);
                }
            }
        } else {
            conversion.schematic
        }
    };

    // Write output to file or stdout
    if let Some(ref path) = cli.output {
        if let Err(e) = fs::write(path, rendered) {
            eprintln!("error: cannot write '{}': {}", path, e);
            process::exit(1);
        }
    } else {
        print!("{}", rendered);
        if let Err(e) = io::stdout().flush() {
            eprintln!("error: cannot flush stdout: {}", e);
            process::exit(1);
        }
    }
}
