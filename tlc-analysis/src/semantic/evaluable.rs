//! Value-evaluability analysis
//!
//! Decides whether evaluating an expression is guaranteed to produce a
//! value on every execution path. The toy language allows statement-like
//! constructs where a value is expected, and a function call only has a
//! value if the callee's body is guaranteed to return one, so this
//! analysis recurses through call targets using the signature table.
//!
//! The analysis is deliberately conservative: anything it cannot prove
//! evaluable (unresolved calls included) is treated as not evaluable.

use crate::ast::{
    Assignment, Expression, FunctionCall, IfStatement, VariableAccess, VariableDeclaration,
};
use crate::semantic::signatures::SignatureTable;
use crate::semantic::visit::Visitor;
use std::collections::HashSet;

/// Evaluability judge for a single query
///
/// Carries no state beyond the signature table reference and the set of
/// calls currently being expanded, so each judgement starts fresh.
pub struct EvaluabilityAnalyzer<'a> {
    signatures: &'a SignatureTable<'a>,
    active_calls: HashSet<(String, usize)>,
}

impl<'a> EvaluabilityAnalyzer<'a> {
    pub fn new(signatures: &'a SignatureTable<'a>) -> Self {
        Self {
            signatures,
            active_calls: HashSet::new(),
        }
    }

    /// True if the expression is guaranteed to yield a value
    pub fn is_evaluable(&mut self, expression: &Expression) -> bool {
        self.visit_expression(expression)
    }
}

impl Visitor for EvaluabilityAnalyzer<'_> {
    type Output = bool;

    fn empty(&mut self) -> bool {
        false
    }

    /// A sequence of alternatives yields a value if any member does
    fn combine(&mut self, acc: bool, next: bool) -> bool {
        acc || next
    }

    fn visit_variable_access(&mut self, _access: &VariableAccess) -> bool {
        true
    }

    fn visit_int_const(&mut self) -> bool {
        true
    }

    fn visit_boolean_const(&mut self) -> bool {
        true
    }

    /// Assignments are effect statements, not value producers
    fn visit_assignment(&mut self, _assignment: &Assignment) -> bool {
        false
    }

    fn visit_variable_declaration(&mut self, _declaration: &VariableDeclaration) -> bool {
        false
    }

    /// An if yields a value only when both branches exist and do;
    /// without an else it can fall through without producing anything.
    fn visit_if(&mut self, if_statement: &IfStatement) -> bool {
        match &if_statement.else_block {
            Some(else_block) => {
                self.visit_block(&if_statement.then_block) && self.visit_block(else_block)
            }
            None => false,
        }
    }

    /// A call yields a value only when it resolves and the callee's body
    /// is guaranteed to return one. A call already being expanded is
    /// judged not evaluable, which keeps recursive chains finite.
    fn visit_function_call(&mut self, call: &FunctionCall) -> bool {
        let key = (call.function.clone(), call.arguments.len());
        if !self.active_calls.insert(key.clone()) {
            return false;
        }
        let result = match self.signatures.lookup(&call.function, call.arguments.len()) {
            Some(declaration) => self.visit_function(declaration),
            None => false,
        };
        self.active_calls.remove(&key);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::*;

    fn judge(file: &File, expression: &Expression) -> bool {
        let table = SignatureTable::build(file);
        EvaluabilityAnalyzer::new(&table).is_evaluable(expression)
    }

    fn empty_file() -> File {
        File::new(vec![])
    }

    #[test]
    fn test_constants_and_accesses_are_evaluable() {
        let file = empty_file();
        assert!(judge(&file, &Expression::int(1, 42)));
        assert!(judge(&file, &Expression::boolean(1, false)));
        assert!(judge(&file, &Expression::variable(1, "x")));
    }

    #[test]
    fn test_unresolved_call_is_not_evaluable() {
        let file = empty_file();
        assert!(!judge(&file, &Expression::call(1, "missing", vec![])));
    }

    #[test]
    fn test_call_with_wrong_arity_is_not_evaluable() {
        // fn f(a) { return a; }
        let file = File::new(vec![FunctionDeclaration::new(
            1,
            "f",
            &["a"],
            Block::new(
                1,
                vec![Statement::Return(ReturnStatement::new(
                    2,
                    Some(Expression::variable(2, "a")),
                ))],
            ),
        )]);
        assert!(judge(&file, &Expression::call(5, "f", vec![Expression::int(5, 1)])));
        assert!(!judge(&file, &Expression::call(5, "f", vec![])));
    }

    #[test]
    fn test_call_to_function_with_bare_return_is_not_evaluable() {
        // fn f() { return; }
        let file = File::new(vec![FunctionDeclaration::new(
            1,
            "f",
            &[],
            Block::new(1, vec![Statement::Return(ReturnStatement::new(2, None))]),
        )]);
        assert!(!judge(&file, &Expression::call(5, "f", vec![])));
    }

    #[test]
    fn test_if_without_else_in_body_is_not_evaluable() {
        // fn f(c) { if (c) { return 1; } }
        let file = File::new(vec![FunctionDeclaration::new(
            1,
            "f",
            &["c"],
            Block::new(
                1,
                vec![Statement::If(IfStatement::new(
                    2,
                    Expression::variable(2, "c"),
                    Block::new(
                        2,
                        vec![Statement::Return(ReturnStatement::new(
                            3,
                            Some(Expression::int(3, 1)),
                        ))],
                    ),
                    None,
                ))],
            ),
        )]);
        assert!(!judge(&file, &Expression::call(5, "f", vec![Expression::int(5, 0)])));
    }

    #[test]
    fn test_if_with_returning_branches_is_evaluable() {
        // fn f(c) { if (c) { return 1; } else { return 2; } }
        let file = File::new(vec![FunctionDeclaration::new(
            1,
            "f",
            &["c"],
            Block::new(
                1,
                vec![Statement::If(IfStatement::new(
                    2,
                    Expression::variable(2, "c"),
                    Block::new(
                        2,
                        vec![Statement::Return(ReturnStatement::new(
                            3,
                            Some(Expression::int(3, 1)),
                        ))],
                    ),
                    Some(Block::new(
                        4,
                        vec![Statement::Return(ReturnStatement::new(
                            5,
                            Some(Expression::int(5, 2)),
                        ))],
                    )),
                ))],
            ),
        )]);
        assert!(judge(&file, &Expression::call(8, "f", vec![Expression::boolean(8, true)])));
    }

    #[test]
    fn test_evaluability_is_transitive_through_calls() {
        // fn f() { if (true) { return 1; } }   -- some path returns nothing
        // fn g() { return f(); }
        let f = FunctionDeclaration::new(
            1,
            "f",
            &[],
            Block::new(
                1,
                vec![Statement::If(IfStatement::new(
                    2,
                    Expression::boolean(2, true),
                    Block::new(
                        2,
                        vec![Statement::Return(ReturnStatement::new(
                            3,
                            Some(Expression::int(3, 1)),
                        ))],
                    ),
                    None,
                ))],
            ),
        );
        let g = FunctionDeclaration::new(
            6,
            "g",
            &[],
            Block::new(
                6,
                vec![Statement::Return(ReturnStatement::new(
                    7,
                    Some(Expression::call(7, "f", vec![])),
                ))],
            ),
        );
        let file = File::new(vec![f, g]);
        assert!(!judge(&file, &Expression::call(9, "g", vec![])));
    }

    #[test]
    fn test_recursive_call_terminates_conservatively() {
        // fn f() { return f(); }
        let file = File::new(vec![FunctionDeclaration::new(
            1,
            "f",
            &[],
            Block::new(
                1,
                vec![Statement::Return(ReturnStatement::new(
                    2,
                    Some(Expression::call(2, "f", vec![])),
                ))],
            ),
        )]);
        assert!(!judge(&file, &Expression::call(5, "f", vec![])));
    }

    #[test]
    fn test_self_recursive_branch_is_judged_conservatively() {
        // fn f(n) { if (n) { return f(n); } else { return 0; } }
        let file = File::new(vec![FunctionDeclaration::new(
            1,
            "f",
            &["n"],
            Block::new(
                1,
                vec![Statement::If(IfStatement::new(
                    2,
                    Expression::variable(2, "n"),
                    Block::new(
                        2,
                        vec![Statement::Return(ReturnStatement::new(
                            3,
                            Some(Expression::call(3, "f", vec![Expression::variable(3, "n")])),
                        ))],
                    ),
                    Some(Block::new(
                        4,
                        vec![Statement::Return(ReturnStatement::new(
                            5,
                            Some(Expression::int(5, 0)),
                        ))],
                    )),
                ))],
            ),
        )]);
        // The recursive arm is blocked by the active-call guard, so the
        // if fails its both-branches rule.
        assert!(!judge(&file, &Expression::call(8, "f", vec![Expression::int(8, 1)])));
    }
}
