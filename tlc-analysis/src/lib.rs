//! Toy Language Checker - Semantic Analysis
//!
//! This crate provides the static-analysis phase of a minimal compiler
//! front end for a small imperative toy language:
//! - AST: tree definitions, built by an external parser
//! - Traversal: generic result-aggregating visitor framework
//! - Signatures: function resolution by name and arity
//! - Evaluability: does an expression always produce a value?
//! - Initialization checking: flow-sensitive variable-usage diagnostics

pub mod ast;
pub mod semantic;

pub use ast::{
    Assignment, Block, BooleanConst, Expression, File, FunctionCall, FunctionDeclaration,
    IfStatement, IntConst, ReturnStatement, Statement, VariableAccess, VariableDeclaration,
};
pub use semantic::{
    Analyzer, Checker, EvaluabilityAnalyzer, InitializationChecker, Problem, SignatureTable,
    Visitor,
};
