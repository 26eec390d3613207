//! Semantic problem definitions
//!
//! Every irregular condition the checkers find becomes a [`Problem`]
//! value; nothing in the analysis core panics or aborts. The `Display`
//! text of a problem is the message handed to the diagnostic reporter.

use thiserror::Error;
use tlc_common::{Diagnostic, HasLocation, SourceLocation};

/// Problems reported by the semantic checkers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    /// A variable is read on a path where it has no value yet
    #[error("Variable '{name}' is accessed before initialization")]
    UseBeforeInit {
        name: String,
        location: SourceLocation,
    },

    /// A name with no visible declaration is read or assigned
    #[error("Variable declaration not found: '{name}'")]
    UndeclaredVariable {
        name: String,
        location: SourceLocation,
    },

    /// A name is declared twice directly in the same block
    #[error("Variable '{name}' cannot be redeclared")]
    DuplicateDeclaration {
        name: String,
        location: SourceLocation,
    },

    /// An initializer or assignment rhs is not guaranteed to yield a value
    #[error("Empty expression cannot be used for initialization")]
    EmptyInitializer { location: SourceLocation },
}

impl HasLocation for Problem {
    fn location(&self) -> SourceLocation {
        match self {
            Problem::UseBeforeInit { location, .. }
            | Problem::UndeclaredVariable { location, .. }
            | Problem::DuplicateDeclaration { location, .. }
            | Problem::EmptyInitializer { location } => *location,
        }
    }
}

impl From<&Problem> for Diagnostic {
    fn from(problem: &Problem) -> Self {
        Diagnostic::error(problem.to_string(), problem.location())
    }
}
