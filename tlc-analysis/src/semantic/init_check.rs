//! Scope-aware variable initialization checking
//!
//! The flow-sensitive core of the analyzer. Walks each function body
//! carrying a stack of scope layers that map variable names to an
//! is-initialized flag, and reports use-before-initialization, missing
//! and duplicate declarations, and empty initializer expressions.

use crate::ast::{
    Assignment, Block, File, FunctionDeclaration, IfStatement, VariableAccess,
    VariableDeclaration,
};
use crate::semantic::errors::Problem;
use crate::semantic::evaluable::EvaluabilityAnalyzer;
use crate::semantic::signatures::SignatureTable;
use crate::semantic::visit::{self, Visitor};
use crate::semantic::Checker;
use log::debug;
use std::collections::HashMap;
use tlc_common::HasLocation;

/// Stack of lexical scope layers, innermost last
///
/// Each layer maps the names declared directly in one block to whether
/// they currently hold a value. A name in an inner layer shadows any
/// same-named binding further out; popping the layer uncovers the outer
/// binding with its state untouched.
#[derive(Debug, Clone, Default)]
pub struct ScopeStack {
    layers: Vec<HashMap<String, bool>>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Enter a new scope
    pub fn push_layer(&mut self) {
        self.layers.push(HashMap::new());
    }

    /// Exit the current scope, discarding its bindings
    pub fn pop_layer(&mut self) {
        self.layers.pop();
    }

    /// Bind a name in the current layer, replacing any direct binding
    pub fn declare(&mut self, name: &str, initialized: bool) {
        if let Some(layer) = self.layers.last_mut() {
            layer.insert(name.to_string(), initialized);
        }
    }

    /// Check whether a name is declared directly in the current layer
    pub fn declared_in_current_layer(&self, name: &str) -> bool {
        self.layers
            .last()
            .map(|layer| layer.contains_key(name))
            .unwrap_or(false)
    }

    /// Look up a name innermost-to-outermost, returning its flag
    pub fn lookup(&self, name: &str) -> Option<bool> {
        for layer in self.layers.iter().rev() {
            if let Some(&initialized) = layer.get(name) {
                return Some(initialized);
            }
        }
        None
    }

    /// Mark the nearest visible binding of a name initialized
    ///
    /// Returns false if no enclosing layer declares the name.
    pub fn mark_initialized(&mut self, name: &str) -> bool {
        for layer in self.layers.iter_mut().rev() {
            if let Some(initialized) = layer.get_mut(name) {
                *initialized = true;
                return true;
            }
        }
        false
    }

    /// Merge two branch states into the post-statement state
    ///
    /// Both snapshots must come from the same pre-branch state, so they
    /// have identical layer structure and keys. A variable counts as
    /// initialized afterwards only if both branches left it initialized.
    pub fn merged(then_state: &ScopeStack, else_state: &ScopeStack) -> ScopeStack {
        debug_assert_eq!(then_state.layers.len(), else_state.layers.len());
        let layers = then_state
            .layers
            .iter()
            .zip(&else_state.layers)
            .map(|(then_layer, else_layer)| {
                then_layer
                    .iter()
                    .map(|(name, &then_init)| {
                        let else_init = else_layer.get(name).copied().unwrap_or(then_init);
                        (name.clone(), then_init && else_init)
                    })
                    .collect()
            })
            .collect();
        ScopeStack { layers }
    }
}

/// Checker for variable declaration, initialization, and access problems
pub struct InitializationChecker;

impl Checker for InitializationChecker {
    fn inspect(&self, file: &File, signatures: &SignatureTable<'_>) -> Vec<Problem> {
        let mut visitor = InitializationVisitor {
            signatures,
            scopes: ScopeStack::new(),
        };
        visitor.visit_file(file)
    }
}

struct InitializationVisitor<'a> {
    signatures: &'a SignatureTable<'a>,
    scopes: ScopeStack,
}

impl InitializationVisitor<'_> {
    fn is_evaluable(&self, expression: &crate::ast::Expression) -> bool {
        EvaluabilityAnalyzer::new(self.signatures).is_evaluable(expression)
    }
}

impl Visitor for InitializationVisitor<'_> {
    type Output = Vec<Problem>;

    fn empty(&mut self) -> Vec<Problem> {
        Vec::new()
    }

    fn combine(&mut self, mut acc: Vec<Problem>, mut next: Vec<Problem>) -> Vec<Problem> {
        acc.append(&mut next);
        acc
    }

    /// Each function starts from a fresh state; parameters are bound
    /// initialized in a layer enclosing the body block.
    fn visit_function(&mut self, function: &FunctionDeclaration) -> Vec<Problem> {
        debug!(
            "checking function '{}' with {} parameter(s)",
            function.name,
            function.arity()
        );
        self.scopes = ScopeStack::new();
        self.scopes.push_layer();
        for parameter in &function.parameters {
            self.scopes.declare(parameter, true);
        }
        let problems = visit::walk_function(self, function);
        self.scopes.pop_layer();
        problems
    }

    fn visit_block(&mut self, block: &Block) -> Vec<Problem> {
        self.scopes.push_layer();
        let problems = visit::walk_block(self, block);
        self.scopes.pop_layer();
        problems
    }

    fn visit_variable_declaration(&mut self, declaration: &VariableDeclaration) -> Vec<Problem> {
        let mut problems = Vec::new();
        if self.scopes.declared_in_current_layer(&declaration.name) {
            problems.push(Problem::DuplicateDeclaration {
                name: declaration.name.clone(),
                location: declaration.location,
            });
        }
        if let Some(initializer) = &declaration.initializer {
            if !self.is_evaluable(initializer) {
                problems.push(Problem::EmptyInitializer {
                    location: initializer.location(),
                });
            }
        }
        // The name is bound before its initializer is walked, so a
        // self-referencing initializer resolves to the new binding.
        self.scopes
            .declare(&declaration.name, declaration.initializer.is_some());
        let nested = visit::walk_variable_declaration(self, declaration);
        self.combine(problems, nested)
    }

    fn visit_assignment(&mut self, assignment: &Assignment) -> Vec<Problem> {
        let mut problems = Vec::new();
        if !self.is_evaluable(&assignment.rhs) {
            problems.push(Problem::EmptyInitializer {
                location: assignment.rhs.location(),
            });
        }
        if !self.scopes.mark_initialized(&assignment.variable) {
            problems.push(Problem::UndeclaredVariable {
                name: assignment.variable.clone(),
                location: assignment.location,
            });
        }
        let nested = visit::walk_assignment(self, assignment);
        self.combine(problems, nested)
    }

    /// Branches run on independent copies of the pre-statement state and
    /// their results are AND-merged, so only variables initialized on
    /// every path stay initialized past the statement.
    fn visit_if(&mut self, if_statement: &IfStatement) -> Vec<Problem> {
        let mut problems = self.visit_expression(&if_statement.condition);
        match &if_statement.else_block {
            None => {
                // The implicit else leaves every binding as it was.
                let before = self.scopes.clone();
                let then_problems = self.visit_block(&if_statement.then_block);
                self.scopes = ScopeStack::merged(&before, &self.scopes);
                problems = self.combine(problems, then_problems);
            }
            Some(else_block) => {
                let before = self.scopes.clone();
                let then_problems = self.visit_block(&if_statement.then_block);
                let then_state = std::mem::replace(&mut self.scopes, before);
                let else_problems = self.visit_block(else_block);
                self.scopes = ScopeStack::merged(&then_state, &self.scopes);
                problems = self.combine(problems, then_problems);
                problems = self.combine(problems, else_problems);
            }
        }
        problems
    }

    fn visit_variable_access(&mut self, access: &VariableAccess) -> Vec<Problem> {
        match self.scopes.lookup(&access.name) {
            Some(true) => Vec::new(),
            Some(false) => vec![Problem::UseBeforeInit {
                name: access.name.clone(),
                location: access.location,
            }],
            None => vec![Problem::UndeclaredVariable {
                name: access.name.clone(),
                location: access.location,
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_stack_shadowing() {
        let mut scopes = ScopeStack::new();
        scopes.push_layer();
        scopes.declare("x", false);
        scopes.push_layer();
        scopes.declare("x", true);
        assert_eq!(scopes.lookup("x"), Some(true));
        scopes.pop_layer();
        assert_eq!(scopes.lookup("x"), Some(false));
    }

    #[test]
    fn test_mark_initialized_hits_nearest_layer() {
        let mut scopes = ScopeStack::new();
        scopes.push_layer();
        scopes.declare("x", false);
        scopes.push_layer();
        assert!(scopes.mark_initialized("x"));
        scopes.pop_layer();
        assert_eq!(scopes.lookup("x"), Some(true));
        assert!(!scopes.mark_initialized("missing"));
    }

    #[test]
    fn test_merged_is_pointwise_and() {
        let mut base = ScopeStack::new();
        base.push_layer();
        base.declare("a", false);
        base.declare("b", false);
        base.declare("c", false);

        let mut then_state = base.clone();
        then_state.mark_initialized("a");
        then_state.mark_initialized("b");
        let mut else_state = base.clone();
        else_state.mark_initialized("b");
        else_state.mark_initialized("c");

        let merged = ScopeStack::merged(&then_state, &else_state);
        assert_eq!(merged.lookup("a"), Some(false));
        assert_eq!(merged.lookup("b"), Some(true));
        assert_eq!(merged.lookup("c"), Some(false));
    }
}
