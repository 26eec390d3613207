//! Diagnostic collection and reporting
//!
//! The analysis core classifies problems; this module owns how they are
//! collected and rendered for a consumer.

use crate::source_loc::SourceLocation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// A diagnostic message with location and severity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub location: SourceLocation,
}

impl Diagnostic {
    pub fn error(message: String, location: SourceLocation) -> Self {
        Self {
            severity: Severity::Error,
            message,
            location,
        }
    }

    pub fn warning(message: String, location: SourceLocation) -> Self {
        Self {
            severity: Severity::Warning,
            message,
            location,
        }
    }

    pub fn note(message: String, location: SourceLocation) -> Self {
        Self {
            severity: Severity::Note,
            message,
            location,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.location, self.severity, self.message)
    }
}

/// Reporter for collecting and displaying diagnostics
pub struct DiagnosticReporter {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
    warning_count: usize,
}

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
            error_count: 0,
            warning_count: 0,
        }
    }

    /// Report an error diagnostic
    pub fn error(&mut self, message: String, location: SourceLocation) {
        self.diagnostics.push(Diagnostic::error(message, location));
        self.error_count += 1;
    }

    /// Report a warning diagnostic
    pub fn warning(&mut self, message: String, location: SourceLocation) {
        self.diagnostics.push(Diagnostic::warning(message, location));
        self.warning_count += 1;
    }

    /// Report a note diagnostic
    pub fn note(&mut self, message: String, location: SourceLocation) {
        self.diagnostics.push(Diagnostic::note(message, location));
    }

    /// Check if any errors have been reported
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Get the number of errors
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Get the number of warnings
    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    /// Get all diagnostics in the order they were reported
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Clear all diagnostics
    pub fn clear(&mut self) {
        self.diagnostics.clear();
        self.error_count = 0;
        self.warning_count = 0;
    }

    /// Print all diagnostics to stderr
    pub fn print_diagnostics(&self) {
        for diagnostic in &self.diagnostics {
            eprintln!("{}", diagnostic);
        }
    }

    /// Create a summary string
    pub fn summary(&self) -> String {
        match (self.error_count, self.warning_count) {
            (0, 0) => "No errors or warnings".to_string(),
            (0, w) => format!("{} warning{}", w, if w == 1 { "" } else { "s" }),
            (e, 0) => format!("{} error{}", e, if e == 1 { "" } else { "s" }),
            (e, w) => format!(
                "{} error{} and {} warning{}",
                e,
                if e == 1 { "" } else { "s" },
                w,
                if w == 1 { "" } else { "s" }
            ),
        }
    }
}

impl Default for DiagnosticReporter {
    fn default() -> Self {
        Self::new()
    }
}
