//! Schematic sinks: where placed instances, wires and port pins end up.
//!
//! The layout stages never write to a sink directly. They produce a list of
//! [`SchematicCommand`]s, and [`replay`] feeds that list into any sink in
//! order. A `Vec<SchematicCommand>` is itself a sink, which is how the
//! stages collect their output.

pub mod xschem;

pub use xschem::{SchematicConfig, XschemWriter};

use serde::Serialize;

/// One emission request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchematicCommand {
    Instance {
        symbol: String,
        x: i64,
        y: i64,
        rotation: i32,
        name: String,
        cell_type: String,
    },
    Wire {
        x1: i64,
        y1: i64,
        x2: i64,
        y2: i64,
        label: Option<String>,
    },
    IoPin {
        symbol: String,
        x: i64,
        y: i64,
        rotation: i32,
        name: String,
        label: String,
    },
}

/// Trait for schematic back ends.
pub trait SchematicSink {
    fn add_instance(&mut self, symbol: &str, x: i64, y: i64, rotation: i32, name: &str, cell_type: &str);

    fn add_wire(&mut self, x1: i64, y1: i64, x2: i64, y2: i64, label: Option<&str>);

    fn add_io_pin(&mut self, symbol: &str, x: i64, y: i64, rotation: i32, name: &str, label: &str);
}

impl SchematicSink for Vec<SchematicCommand> {
    fn add_instance(&mut self, symbol: &str, x: i64, y: i64, rotation: i32, name: &str, cell_type: &str) {
        self.push(SchematicCommand::Instance {
            symbol: symbol.to_string(),
            x,
            y,
            rotation,
            name: name.to_string(),
            cell_type: cell_type.to_string(),
        });
    }

    fn add_wire(&mut self, x1: i64, y1: i64, x2: i64, y2: i64, label: Option<&str>) {
        self.push(SchematicCommand::Wire {
            x1,
            y1,
            x2,
            y2,
            label: label.map(str::to_string),
        });
    }

    fn add_io_pin(&mut self, symbol: &str, x: i64, y: i64, rotation: i32, name: &str, label: &str) {
        self.push(SchematicCommand::IoPin {
            symbol: symbol.to_string(),
            x,
            y,
            rotation,
            name: name.to_string(),
            label: label.to_string(),
        });
    }
}

/// Feed `commands` into `sink` in order.
pub fn replay<'a, S, I>(commands: I, sink: &mut S)
where
    S: SchematicSink + ?Sized,
    I: IntoIterator<Item = &'a SchematicCommand>,
{
    for cmd in commands {
        match cmd {
            SchematicCommand::Instance {
                symbol,
                x,
                y,
                rotation,
                name,
                cell_type,
            } => sink.add_instance(symbol, *x, *y, *rotation, name, cell_type),
            SchematicCommand::Wire {
                x1,
                y1,
                x2,
                y2,
                label,
            } => sink.add_wire(*x1, *y1, *x2, *y2, label.as_deref()),
            SchematicCommand::IoPin {
                symbol,
                x,
                y,
                rotation,
                name,
                label,
            } => sink.add_io_pin(symbol, *x, *y, *rotation, name, label),
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
