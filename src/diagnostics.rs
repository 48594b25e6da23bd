//! Non-fatal issues collected during a conversion.
//!
//! The layout core never aborts. Each fallback it takes is recorded here
//! and logged; the caller decides whether to display the report.

use std::fmt::{self, Display};

use serde::Serialize;

/// Severity of a diagnostic.
#[derive(Copy, Clone, Debug, Default, Hash, Eq, PartialEq, Serialize)]
pub enum Severity {
    Info,
    #[default]
    Warning,
}

impl Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// Port direction, used to tag port-related diagnostics.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Serialize)]
pub enum PortDirection {
    Input,
    Output,
}

impl Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Input => write!(f, "input"),
            Self::Output => write!(f, "output"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Diagnostic {
    /// A cell type was replaced by the fallback buffer.
    Substitution {
        instance: String,
        requested: String,
        replacement: String,
        reason: String,
        remapped: bool,
    },
    /// An input pin reads a net nothing drives.
    FloatingNet {
        instance: String,
        pin: String,
        net: String,
    },
    /// A cell never got a rank from its drivers and was forced to rank 0.
    FeedbackCell { instance: String },
    /// A declared port no cell pin terminates; a synthetic pin was placed.
    UnclaimedPort {
        port: String,
        direction: PortDirection,
    },
    /// A pin had no entry in the metrics table and got the default offset.
    DefaultPinMetric { cell_type: String, pin: String },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::Substitution { .. } | Diagnostic::FeedbackCell { .. } => Severity::Warning,
            _ => Severity::Info,
        }
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Substitution {
                instance,
                requested,
                replacement,
                reason,
                remapped,
            } => {
                write!(
                    f,
                    "{instance}: cell '{requested}' substituted by '{replacement}' ({reason})"
                )?;
                if !remapped {
                    write!(f, ", pins not remapped")?;
                }
                Ok(())
            }
            Diagnostic::FloatingNet { instance, pin, net } => {
                write!(f, "{instance}.{pin}: net '{net}' has no driver")
            }
            Diagnostic::FeedbackCell { instance } => {
                write!(f, "{instance}: rank unresolved (feedback), placed at rank 0")
            }
            Diagnostic::UnclaimedPort { port, direction } => {
                write!(f, "{direction} '{port}' not used by any cell, boundary pin synthesized")
            }
            Diagnostic::DefaultPinMetric { cell_type, pin } => {
                write!(f, "{cell_type}.{pin}: no pin metrics, default offset used")
            }
        }
    }
}

/// An ordered collection of diagnostics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Diagnostics {
    issues: Vec<Diagnostic>,
    num_warnings: usize,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an issue and log it at the matching level.
    pub fn add(&mut self, issue: Diagnostic) {
        match issue.severity() {
            Severity::Warning => {
                self.num_warnings += 1;
                tracing::warn!("{issue}");
            }
            Severity::Info => tracing::debug!("{issue}"),
        }
        self.issues.push(issue);
    }

    /// Move every issue of `other` in, without logging them again.
    pub fn append(&mut self, other: Diagnostics) {
        self.num_warnings += other.num_warnings;
        self.issues.extend(other.issues);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.issues.iter()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn num_warnings(&self) -> usize {
        self.num_warnings
    }

    pub fn has_warning(&self) -> bool {
        self.num_warnings > 0
    }

    /// Substitution records only.
    pub fn substitutions(&self) -> impl Iterator<Item = &Diagnostic> {
        self.issues
            .iter()
            .filter(|d| matches!(d, Diagnostic::Substitution { .. }))
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;
    fn into_iter(self) -> Self::IntoIter {
        self.issues.into_iter()
    }
}

impl Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for issue in &self.issues {
            writeln!(f, "{}: {}", issue.severity(), issue)?;
        }
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
