//! Function signature resolution
//!
//! Functions are overloaded by arity: a signature is the pair of function
//! name and parameter count. The table is built once per file and is
//! read-only afterwards, threaded by reference into every analysis that
//! resolves calls.

use crate::ast::{File, FunctionDeclaration};
use std::collections::HashMap;

/// Immutable (name, arity) -> declaration lookup for one file
#[derive(Debug)]
pub struct SignatureTable<'a> {
    functions: HashMap<&'a str, HashMap<usize, &'a FunctionDeclaration>>,
}

impl<'a> SignatureTable<'a> {
    /// Build the table in a single pass over the file's functions.
    ///
    /// If two declarations share a signature the later one wins; no
    /// diagnostic is produced here.
    pub fn build(file: &'a File) -> Self {
        let mut functions: HashMap<&str, HashMap<usize, &FunctionDeclaration>> = HashMap::new();
        for function in &file.functions {
            functions
                .entry(function.name.as_str())
                .or_default()
                .insert(function.arity(), function);
        }
        Self { functions }
    }

    /// Resolve a call by name and argument count
    pub fn lookup(&self, name: &str, arity: usize) -> Option<&'a FunctionDeclaration> {
        self.functions
            .get(name)
            .and_then(|overloads| overloads.get(&arity))
            .copied()
    }
}
