use std::rc::Rc;

use crate::expr::{
    AssignData, BinaryData, CallData, Expr, ExprVisitor, FunctionData, GetData, GroupingData,
    LogicalData, SetData, ThisData, UnaryData, VariableData,
};
use crate::literal::Literal;
use crate::stmt::{
    BlockData, ClassData, ExpressionData, IfData, PrintData, ReturnData, Stmt, StmtVisitor,
    VarData, WhileData,
};

/// Prints a syntax tree back as source text.
///
/// The output is valid Lox: operator expressions come out fully
/// parenthesized and groupings collapse into them, so printing a program,
/// re-parsing it and printing again yields the same text. That fixpoint is
/// what makes the printer usable to compare trees in tests.
pub struct AstPrinter;

impl AstPrinter {
    /// Prints a list of statements on a single line.
    pub fn print(&mut self, statements: &[Stmt]) -> String {
        statements
            .iter()
            .map(|stmt| stmt.accept(self))
            .collect::<Vec<String>>()
            .join(" ")
    }

    /// Prints a single expression.
    pub fn print_expr(&mut self, expr: &Expr) -> String {
        expr.accept(self)
    }

    /// Prints the parameter list and body shared by functions and methods.
    fn function(&mut self, function: &FunctionData) -> String {
        let params = function.params
            .iter()
            .map(|param| param.lexeme.clone())
            .collect::<Vec<String>>()
            .join(", ");

        format!("({params}) {}", self.block(&function.body))
    }

    fn block(&mut self, statements: &[Stmt]) -> String {
        if statements.is_empty() {
            return String::from("{ }");
        }

        format!("{{ {} }}", self.print(statements))
    }
}

impl ExprVisitor<String> for AstPrinter {
    fn visit_literal_expr(&mut self, literal: &Literal) -> String {
        match literal {
            // String literals get their quotes back so they re-scan.
            Literal::String(s) => format!("\"{s}\""),
            literal => literal.to_string(),
        }
    }

    fn visit_binary_expr(&mut self, binary: &BinaryData) -> String {
        format!(
            "({} {} {})",
            binary.left.accept(self),
            binary.operator.lexeme,
            binary.right.accept(self),
        )
    }

    fn visit_logical_expr(&mut self, logical: &LogicalData) -> String {
        format!(
            "({} {} {})",
            logical.left.accept(self),
            logical.operator.lexeme,
            logical.right.accept(self),
        )
    }

    fn visit_unary_expr(&mut self, unary: &UnaryData) -> String {
        format!("({}{})", unary.operator.lexeme, unary.expr.accept(self))
    }

    fn visit_grouping_expr(&mut self, grouping: &GroupingData) -> String {
        // The inner expression parenthesizes itself where it matters.
        grouping.expr.accept(self)
    }

    fn visit_variable_expr(&mut self, variable: &VariableData) -> String {
        variable.name.lexeme.clone()
    }

    fn visit_assign_expr(&mut self, assign: &AssignData) -> String {
        format!("{} = {}", assign.name.lexeme, assign.value.accept(self))
    }

    fn visit_call_expr(&mut self, call: &CallData) -> String {
        let arguments = call.arguments
            .iter()
            .map(|argument| argument.accept(self))
            .collect::<Vec<String>>()
            .join(", ");

        format!("{}({arguments})", call.callee.accept(self))
    }

    fn visit_get_expr(&mut self, get: &GetData) -> String {
        format!("{}.{}", get.object.accept(self), get.name.lexeme)
    }

    fn visit_set_expr(&mut self, set: &SetData) -> String {
        format!(
            "{}.{} = {}",
            set.object.accept(self),
            set.name.lexeme,
            set.value.accept(self),
        )
    }

    fn visit_this_expr(&mut self, _this: &ThisData) -> String {
        String::from("this")
    }

    fn visit_function_expr(&mut self, function: &Rc<FunctionData>) -> String {
        match &function.name {
            Some(name) => format!("fun {}{}", name.lexeme, self.function(function)),
            None => format!("fun {}", self.function(function)),
        }
    }
}

impl StmtVisitor<String> for AstPrinter {
    fn visit_expression_stmt(&mut self, stmt: &ExpressionData) -> String {
        format!("{};", stmt.expr.accept(self))
    }

    fn visit_print_stmt(&mut self, stmt: &PrintData) -> String {
        format!("print {};", stmt.expr.accept(self))
    }

    fn visit_var_stmt(&mut self, stmt: &VarData) -> String {
        match &stmt.initializer {
            Some(initializer) => format!("var {} = {};", stmt.name.lexeme, initializer.accept(self)),
            None => format!("var {};", stmt.name.lexeme),
        }
    }

    fn visit_block_stmt(&mut self, stmt: &BlockData) -> String {
        self.block(&stmt.statements)
    }

    fn visit_if_stmt(&mut self, stmt: &IfData) -> String {
        let mut string = format!(
            "if ({}) {}",
            stmt.condition.accept(self),
            stmt.then_branch.accept(self),
        );

        if let Some(else_branch) = &stmt.else_branch {
            string += &format!(" else {}", else_branch.accept(self));
        }

        string
    }

    fn visit_while_stmt(&mut self, stmt: &WhileData) -> String {
        format!("while ({}) {}", stmt.condition.accept(self), stmt.body.accept(self))
    }

    fn visit_return_stmt(&mut self, stmt: &ReturnData) -> String {
        match &stmt.value {
            Some(value) => format!("return {};", value.accept(self)),
            None => String::from("return;"),
        }
    }

    fn visit_function_stmt(&mut self, declaration: &Rc<FunctionData>) -> String {
        self.visit_function_expr(declaration)
    }

    fn visit_class_stmt(&mut self, stmt: &ClassData) -> String {
        let methods = stmt.methods
            .iter()
            .map(|method| {
                let name = method.name.as_ref().expect("method to have a name");
                format!("{}{}", name.lexeme, self.function(method))
            })
            .collect::<Vec<String>>()
            .join(" ");

        if methods.is_empty() {
            return format!("class {} {{ }}", stmt.name.lexeme);
        }

        format!("class {} {{ {methods} }}", stmt.name.lexeme)
    }
}
