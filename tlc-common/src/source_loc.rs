//! Source location tracking for error reporting
//!
//! The toy language front end records only the line on which each tree
//! node starts, so a location is a single 1-based line number.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A location in a source file (line is 1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub line: u32,
}

impl SourceLocation {
    pub fn new(line: u32) -> Self {
        Self { line }
    }

    /// Create a dummy location for testing
    pub fn dummy() -> Self {
        Self::new(0)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}", self.line)
    }
}

/// Trait for types that carry a source location
pub trait HasLocation {
    fn location(&self) -> SourceLocation;
}
