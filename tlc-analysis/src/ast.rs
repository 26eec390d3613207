//! AST definitions for the toy language
//!
//! The tree is built by an external parser and is read-only during
//! analysis. Statements and expressions are closed tagged unions so
//! every analysis has to handle every node kind.

use serde::{Deserialize, Serialize};
use tlc_common::{HasLocation, SourceLocation};

/// A parsed source file: an ordered sequence of function declarations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    pub functions: Vec<FunctionDeclaration>,
}

impl File {
    pub fn new(functions: Vec<FunctionDeclaration>) -> Self {
        Self { functions }
    }
}

/// A function declaration
///
/// Parameters are untyped names. A function's signature is its name
/// together with its parameter count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    pub location: SourceLocation,
    pub name: String,
    pub parameters: Vec<String>,
    pub body: Block,
}

impl FunctionDeclaration {
    pub fn new(line: u32, name: &str, parameters: &[&str], body: Block) -> Self {
        Self {
            location: SourceLocation::new(line),
            name: name.to_string(),
            parameters: parameters.iter().map(|p| p.to_string()).collect(),
            body,
        }
    }

    /// Number of parameters, the arity half of the signature
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
}

/// A block of statements, introducing a new lexical scope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub location: SourceLocation,
    pub statements: Vec<Statement>,
}

impl Block {
    pub fn new(line: u32, statements: Vec<Statement>) -> Self {
        Self {
            location: SourceLocation::new(line),
            statements,
        }
    }
}

/// AST statement nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    /// Variable declaration with optional initializer
    VariableDeclaration(VariableDeclaration),

    /// Assignment to an already-declared variable
    Assignment(Assignment),

    /// If statement with optional else block
    If(IfStatement),

    /// Return statement with optional result
    Return(ReturnStatement),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclaration {
    pub location: SourceLocation,
    pub name: String,
    pub initializer: Option<Expression>,
}

impl VariableDeclaration {
    pub fn new(line: u32, name: &str, initializer: Option<Expression>) -> Self {
        Self {
            location: SourceLocation::new(line),
            name: name.to_string(),
            initializer,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub location: SourceLocation,
    pub variable: String,
    pub rhs: Expression,
}

impl Assignment {
    pub fn new(line: u32, variable: &str, rhs: Expression) -> Self {
        Self {
            location: SourceLocation::new(line),
            variable: variable.to_string(),
            rhs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfStatement {
    pub location: SourceLocation,
    pub condition: Expression,
    pub then_block: Block,
    pub else_block: Option<Block>,
}

impl IfStatement {
    pub fn new(line: u32, condition: Expression, then_block: Block, else_block: Option<Block>) -> Self {
        Self {
            location: SourceLocation::new(line),
            condition,
            then_block,
            else_block,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnStatement {
    pub location: SourceLocation,
    pub result: Option<Expression>,
}

impl ReturnStatement {
    pub fn new(line: u32, result: Option<Expression>) -> Self {
        Self {
            location: SourceLocation::new(line),
            result,
        }
    }
}

/// AST expression nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Read of a named variable
    VariableAccess(VariableAccess),

    /// Integer literal
    IntConst(IntConst),

    /// Boolean literal
    BooleanConst(BooleanConst),

    /// Call resolved by (name, argument count)
    FunctionCall(FunctionCall),
}

impl Expression {
    /// Convenience constructor for a variable access
    pub fn variable(line: u32, name: &str) -> Self {
        Expression::VariableAccess(VariableAccess::new(line, name))
    }

    /// Convenience constructor for an integer literal
    pub fn int(line: u32, value: i64) -> Self {
        Expression::IntConst(IntConst::new(line, value))
    }

    /// Convenience constructor for a boolean literal
    pub fn boolean(line: u32, value: bool) -> Self {
        Expression::BooleanConst(BooleanConst::new(line, value))
    }

    /// Convenience constructor for a function call
    pub fn call(line: u32, function: &str, arguments: Vec<Expression>) -> Self {
        Expression::FunctionCall(FunctionCall::new(line, function, arguments))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableAccess {
    pub location: SourceLocation,
    pub name: String,
}

impl VariableAccess {
    pub fn new(line: u32, name: &str) -> Self {
        Self {
            location: SourceLocation::new(line),
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntConst {
    pub location: SourceLocation,
    pub value: i64,
}

impl IntConst {
    pub fn new(line: u32, value: i64) -> Self {
        Self {
            location: SourceLocation::new(line),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BooleanConst {
    pub location: SourceLocation,
    pub value: bool,
}

impl BooleanConst {
    pub fn new(line: u32, value: bool) -> Self {
        Self {
            location: SourceLocation::new(line),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub location: SourceLocation,
    pub function: String,
    pub arguments: Vec<Expression>,
}

impl FunctionCall {
    pub fn new(line: u32, function: &str, arguments: Vec<Expression>) -> Self {
        Self {
            location: SourceLocation::new(line),
            function: function.to_string(),
            arguments,
        }
    }
}

impl HasLocation for Statement {
    fn location(&self) -> SourceLocation {
        match self {
            Statement::VariableDeclaration(decl) => decl.location,
            Statement::Assignment(assign) => assign.location,
            Statement::If(if_stmt) => if_stmt.location,
            Statement::Return(ret) => ret.location,
        }
    }
}

impl HasLocation for Expression {
    fn location(&self) -> SourceLocation {
        match self {
            Expression::VariableAccess(access) => access.location,
            Expression::IntConst(constant) => constant.location,
            Expression::BooleanConst(constant) => constant.location,
            Expression::FunctionCall(call) => call.location,
        }
    }
}
