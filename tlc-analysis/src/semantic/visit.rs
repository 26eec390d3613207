//! Generic result-aggregating tree traversal
//!
//! Analyses implement [`Visitor`] and override only the node kinds they
//! care about; the `walk_*` functions supply structural recursion for
//! everything else. Per-child results are folded with [`Visitor::combine`]
//! starting from [`Visitor::empty`], so a visitor output type is a
//! monoid: an identity element plus an associative combine.
//!
//! Traversal never fails; problems are carried in the result value.
//! Children are visited in declaration order.

use crate::ast::{
    Assignment, Block, Expression, File, FunctionCall, FunctionDeclaration, IfStatement,
    ReturnStatement, Statement, VariableAccess, VariableDeclaration,
};

pub trait Visitor: Sized {
    type Output;

    /// Identity element of the result type
    fn empty(&mut self) -> Self::Output;

    /// Fold two sibling results into one
    fn combine(&mut self, acc: Self::Output, next: Self::Output) -> Self::Output;

    fn visit_file(&mut self, file: &File) -> Self::Output {
        walk_file(self, file)
    }

    fn visit_function(&mut self, function: &FunctionDeclaration) -> Self::Output {
        walk_function(self, function)
    }

    fn visit_block(&mut self, block: &Block) -> Self::Output {
        walk_block(self, block)
    }

    fn visit_statement(&mut self, statement: &Statement) -> Self::Output {
        walk_statement(self, statement)
    }

    fn visit_variable_declaration(&mut self, declaration: &VariableDeclaration) -> Self::Output {
        walk_variable_declaration(self, declaration)
    }

    fn visit_assignment(&mut self, assignment: &Assignment) -> Self::Output {
        walk_assignment(self, assignment)
    }

    fn visit_if(&mut self, if_statement: &IfStatement) -> Self::Output {
        walk_if(self, if_statement)
    }

    fn visit_return(&mut self, return_statement: &ReturnStatement) -> Self::Output {
        walk_return(self, return_statement)
    }

    fn visit_expression(&mut self, expression: &Expression) -> Self::Output {
        walk_expression(self, expression)
    }

    fn visit_variable_access(&mut self, _access: &VariableAccess) -> Self::Output {
        self.empty()
    }

    fn visit_int_const(&mut self) -> Self::Output {
        self.empty()
    }

    fn visit_boolean_const(&mut self) -> Self::Output {
        self.empty()
    }

    fn visit_function_call(&mut self, call: &FunctionCall) -> Self::Output {
        walk_function_call(self, call)
    }
}

pub fn walk_file<V: Visitor>(visitor: &mut V, file: &File) -> V::Output {
    let mut result = visitor.empty();
    for function in &file.functions {
        let next = visitor.visit_function(function);
        result = visitor.combine(result, next);
    }
    result
}

pub fn walk_function<V: Visitor>(visitor: &mut V, function: &FunctionDeclaration) -> V::Output {
    visitor.visit_block(&function.body)
}

pub fn walk_block<V: Visitor>(visitor: &mut V, block: &Block) -> V::Output {
    let mut result = visitor.empty();
    for statement in &block.statements {
        let next = visitor.visit_statement(statement);
        result = visitor.combine(result, next);
    }
    result
}

pub fn walk_statement<V: Visitor>(visitor: &mut V, statement: &Statement) -> V::Output {
    match statement {
        Statement::VariableDeclaration(declaration) => {
            visitor.visit_variable_declaration(declaration)
        }
        Statement::Assignment(assignment) => visitor.visit_assignment(assignment),
        Statement::If(if_statement) => visitor.visit_if(if_statement),
        Statement::Return(return_statement) => visitor.visit_return(return_statement),
    }
}

pub fn walk_variable_declaration<V: Visitor>(
    visitor: &mut V,
    declaration: &VariableDeclaration,
) -> V::Output {
    match &declaration.initializer {
        Some(initializer) => visitor.visit_expression(initializer),
        None => visitor.empty(),
    }
}

pub fn walk_assignment<V: Visitor>(visitor: &mut V, assignment: &Assignment) -> V::Output {
    visitor.visit_expression(&assignment.rhs)
}

pub fn walk_if<V: Visitor>(visitor: &mut V, if_statement: &IfStatement) -> V::Output {
    let mut result = visitor.visit_expression(&if_statement.condition);
    let then_result = visitor.visit_block(&if_statement.then_block);
    result = visitor.combine(result, then_result);
    if let Some(else_block) = &if_statement.else_block {
        let else_result = visitor.visit_block(else_block);
        result = visitor.combine(result, else_result);
    }
    result
}

pub fn walk_return<V: Visitor>(visitor: &mut V, return_statement: &ReturnStatement) -> V::Output {
    match &return_statement.result {
        Some(result) => visitor.visit_expression(result),
        None => visitor.empty(),
    }
}

pub fn walk_expression<V: Visitor>(visitor: &mut V, expression: &Expression) -> V::Output {
    match expression {
        Expression::VariableAccess(access) => visitor.visit_variable_access(access),
        Expression::IntConst(_) => visitor.visit_int_const(),
        Expression::BooleanConst(_) => visitor.visit_boolean_const(),
        Expression::FunctionCall(call) => visitor.visit_function_call(call),
    }
}

pub fn walk_function_call<V: Visitor>(visitor: &mut V, call: &FunctionCall) -> V::Output {
    let mut result = visitor.empty();
    for argument in &call.arguments {
        let next = visitor.visit_expression(argument);
        result = visitor.combine(result, next);
    }
    result
}
