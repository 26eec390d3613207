//! Semantic analysis for the toy language
//!
//! Runs an ordered list of checkers over a parsed file and turns the
//! problems they find into diagnostics. The core:
//! - visit: generic result-aggregating traversal
//! - signatures: (name, arity) function resolution
//! - evaluable: guaranteed-value analysis for expressions
//! - init_check: scope and initialization checking

pub mod errors;
pub mod evaluable;
pub mod init_check;
pub mod signatures;
pub mod visit;

use crate::ast::File;
use log::debug;
use tlc_common::{Diagnostic, DiagnosticReporter, HasLocation};

pub use errors::Problem;
pub use evaluable::EvaluabilityAnalyzer;
pub use init_check::{InitializationChecker, ScopeStack};
pub use signatures::SignatureTable;
pub use visit::Visitor;

/// A single analysis pass over one file
///
/// Checkers diagnose, they never abort: a run walks the whole file and
/// returns every problem it finds, in traversal order.
pub trait Checker {
    fn inspect(&self, file: &File, signatures: &SignatureTable<'_>) -> Vec<Problem>;
}

/// Analyzer driver: builds the signature table once per file, then runs
/// each registered checker in order
pub struct Analyzer {
    checkers: Vec<Box<dyn Checker>>,
}

impl Analyzer {
    pub fn new() -> Self {
        Self {
            checkers: vec![Box::new(InitializationChecker)],
        }
    }

    /// Collect the problems from every checker, in checker order
    pub fn analyze(&self, file: &File) -> Vec<Problem> {
        let signatures = SignatureTable::build(file);
        let mut problems = Vec::new();
        for checker in &self.checkers {
            problems.extend(checker.inspect(file, &signatures));
        }
        debug!("analysis found {} problem(s)", problems.len());
        problems
    }

    /// Analyze and feed the resulting diagnostics to a reporter
    pub fn report(&self, file: &File, reporter: &mut DiagnosticReporter) {
        for problem in self.analyze(file) {
            reporter.error(problem.to_string(), problem.location());
        }
    }

    /// Analyze and render each problem as a diagnostic
    pub fn diagnostics(&self, file: &File) -> Vec<Diagnostic> {
        self.analyze(file).iter().map(Diagnostic::from).collect()
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::*;

    #[test]
    fn test_analyze_clean_function() {
        // fn f() { var y; y = 1; return y; }
        let file = File::new(vec![FunctionDeclaration::new(
            1,
            "f",
            &[],
            Block::new(
                1,
                vec![
                    Statement::VariableDeclaration(VariableDeclaration::new(2, "y", None)),
                    Statement::Assignment(Assignment::new(3, "y", Expression::int(3, 1))),
                    Statement::Return(ReturnStatement::new(4, Some(Expression::variable(4, "y")))),
                ],
            ),
        )]);

        let analyzer = Analyzer::new();
        assert!(analyzer.analyze(&file).is_empty());
    }

    #[test]
    fn test_report_feeds_reporter() {
        // fn f() { var y; return y; }
        let file = File::new(vec![FunctionDeclaration::new(
            1,
            "f",
            &[],
            Block::new(
                1,
                vec![
                    Statement::VariableDeclaration(VariableDeclaration::new(2, "y", None)),
                    Statement::Return(ReturnStatement::new(3, Some(Expression::variable(3, "y")))),
                ],
            ),
        )]);

        let analyzer = Analyzer::new();
        let mut reporter = DiagnosticReporter::new();
        analyzer.report(&file, &mut reporter);

        assert!(reporter.has_errors());
        assert_eq!(reporter.error_count(), 1);
        assert_eq!(
            format!("{}", reporter.diagnostics()[0]),
            "line 3: error: Variable 'y' is accessed before initialization"
        );
    }

    #[test]
    fn test_diagnostics_preserve_order() {
        // fn f() { x = 1; var y = y0; }  -- undeclared x, undeclared y0
        let file = File::new(vec![FunctionDeclaration::new(
            1,
            "f",
            &[],
            Block::new(
                1,
                vec![
                    Statement::Assignment(Assignment::new(2, "x", Expression::int(2, 1))),
                    Statement::VariableDeclaration(VariableDeclaration::new(
                        3,
                        "y",
                        Some(Expression::variable(3, "y0")),
                    )),
                ],
            ),
        )]);

        let analyzer = Analyzer::new();
        let diagnostics = analyzer.diagnostics(&file);
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].location.line, 2);
        assert_eq!(diagnostics[1].location.line, 3);
    }
}
