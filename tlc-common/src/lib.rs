//! Toy Language Checker - Common Types and Utilities
//!
//! This crate contains shared types used across the analysis components:
//! source location tracking and diagnostic collection/reporting.

pub mod diagnostics;
pub mod source_loc;

pub use diagnostics::{Diagnostic, DiagnosticReporter, Severity};
pub use source_loc::{HasLocation, SourceLocation};
