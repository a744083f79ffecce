use std::collections::HashMap;
use std::mem;
use std::rc::Rc;

use crate::error::{Diagnostics, ResolveError, ResolveWarning};
use crate::expr::{
    AssignData, BinaryData, CallData, Expr, ExprVisitor, FunctionData, GetData, GroupingData,
    LogicalData, SetData, ThisData, UnaryData, VariableData,
};
use crate::interpreter::Interpreter;
use crate::literal::Literal;
use crate::stmt::{
    BlockData, ClassData, ExpressionData, IfData, PrintData, ReturnData, Stmt, StmtVisitor,
    VarData, WhileData,
};
use crate::token::Token;

enum FunctionType {
    None,
    Function,
    Initializer,
    Method,
}

enum ClassType {
    None,
    Class,
}

/// Tracks how a binding has been used within its scope.
struct VariableState {
    token: Token,
    defined: bool,
    referenced: bool,
}

/// Walks the syntax tree once before evaluation and binds every variable use
/// to the scope that declares it. The distances are written into the
/// interpreter's side table; the evaluator never searches scopes for a local
/// again. The same pass reports the static errors that scoping makes
/// visible: duplicate declarations, reads of a variable in its own
/// initializer, stray `return` and `this`, and unused locals (as warnings).
pub struct Resolver<'a, 'w> {
    interpreter: &'a mut Interpreter<'w>,
    diagnostics: &'a mut Diagnostics,
    scopes: Vec<HashMap<String, VariableState>>,
    current_function: FunctionType,
    current_class: ClassType,
}

impl<'a, 'w> Resolver<'a, 'w> {
    pub fn new(interpreter: &'a mut Interpreter<'w>, diagnostics: &'a mut Diagnostics) -> Self {
        Resolver {
            interpreter,
            diagnostics,
            scopes: vec![],
            current_function: FunctionType::None,
            current_class: ClassType::None,
        }
    }

    /// Resolves a list of statements.
    pub fn resolve(&mut self, statements: &[Stmt]) {
        for statement in statements {
            self.resolve_stmt(statement);
        }
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        stmt.accept(self);
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        expr.accept(self);
    }

    /// Resolves a function body in a fresh scope holding its parameters.
    fn resolve_function(&mut self, function: &FunctionData, r#type: FunctionType) {
        let enclosing_function = mem::replace(&mut self.current_function, r#type);

        self.begin_scope();
        for param in &function.params {
            self.declare(param);
            self.define(param);
        }
        self.resolve(&function.body);
        self.end_scope();

        self.current_function = enclosing_function;
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Ends the current scope, warning about bindings nothing referenced.
    fn end_scope(&mut self) {
        let scope = self.scopes.pop().expect("scope stack to be not empty");

        for (_, state) in scope {
            if !state.referenced {
                self.diagnostics.warning(&ResolveWarning {
                    token: state.token,
                    message: "A variable is never used".to_string(),
                });
            }
        }
    }

    /// Adds a binding to the current scope, not yet ready to be read.
    /// Declarations at the global scope are unrestricted.
    fn declare(&mut self, name: &Token) {
        let Some(scope) = self.scopes.last_mut() else { return };

        if scope.contains_key(&name.lexeme) {
            self.diagnostics.error(&ResolveError {
                token: name.clone(),
                message: "A variable with this name is already defined in this scope.".to_string(),
            });
        }

        scope.insert(name.lexeme.clone(), VariableState {
            token: name.clone(),
            defined: false,
            referenced: false,
        });
    }

    /// Marks a binding as fully initialized and readable.
    fn define(&mut self, name: &Token) {
        let Some(scope) = self.scopes.last_mut() else { return };

        if let Some(state) = scope.get_mut(&name.lexeme) {
            state.defined = true;
        }
    }

    /// Records the scope distance for a use site. Names found in no
    /// surrounding scope are left for the global environment at runtime.
    fn resolve_local(&mut self, id: usize, name: &Token) {
        for (distance, scope) in self.scopes.iter_mut().rev().enumerate() {
            if let Some(state) = scope.get_mut(&name.lexeme) {
                state.referenced = true;
                self.interpreter.resolve(id, distance);
                return;
            }
        }
    }
}

impl<'a, 'w> ExprVisitor<()> for Resolver<'a, 'w> {
    fn visit_variable_expr(&mut self, variable: &VariableData) {
        if let Some(scope) = self.scopes.last() {
            if let Some(state) = scope.get(&variable.name.lexeme) {
                if !state.defined {
                    self.diagnostics.error(&ResolveError {
                        token: variable.name.clone(),
                        message: "Can't read local variable in its own initializer.".to_string(),
                    });
                }
            }
        }

        self.resolve_local(variable.id, &variable.name);
    }

    fn visit_assign_expr(&mut self, assign: &AssignData) {
        self.resolve_expr(&assign.value);
        self.resolve_local(assign.id, &assign.name);
    }

    fn visit_literal_expr(&mut self, _literal: &Literal) {}

    fn visit_logical_expr(&mut self, logical: &LogicalData) {
        self.resolve_expr(&logical.left);
        self.resolve_expr(&logical.right);
    }

    fn visit_unary_expr(&mut self, unary: &UnaryData) {
        self.resolve_expr(&unary.expr);
    }

    fn visit_binary_expr(&mut self, binary: &BinaryData) {
        self.resolve_expr(&binary.left);
        self.resolve_expr(&binary.right);
    }

    fn visit_grouping_expr(&mut self, grouping: &GroupingData) {
        self.resolve_expr(&grouping.expr);
    }

    fn visit_call_expr(&mut self, call: &CallData) {
        self.resolve_expr(&call.callee);

        for argument in &call.arguments {
            self.resolve_expr(argument);
        }
    }

    fn visit_get_expr(&mut self, get: &GetData) {
        self.resolve_expr(&get.object);
    }

    fn visit_set_expr(&mut self, set: &SetData) {
        self.resolve_expr(&set.value);
        self.resolve_expr(&set.object);
    }

    fn visit_this_expr(&mut self, this: &ThisData) {
        if let ClassType::None = self.current_class {
            self.diagnostics.error(&ResolveError {
                token: this.keyword.clone(),
                message: "Can't use 'this' outside of a class.".to_string(),
            });

            return;
        }

        self.resolve_local(this.id, &this.keyword);
    }

    fn visit_function_expr(&mut self, function: &Rc<FunctionData>) {
        if let Some(name) = &function.name {
            self.declare(name);
            self.define(name);
        }

        self.resolve_function(function, FunctionType::Function);
    }
}

impl<'a, 'w> StmtVisitor<()> for Resolver<'a, 'w> {
    fn visit_block_stmt(&mut self, block: &BlockData) {
        self.begin_scope();
        self.resolve(&block.statements);
        self.end_scope();
    }

    fn visit_var_stmt(&mut self, var: &VarData) {
        self.declare(&var.name);
        if let Some(initializer) = &var.initializer {
            self.resolve_expr(initializer);
        }
        self.define(&var.name);
    }

    fn visit_function_stmt(&mut self, declaration: &Rc<FunctionData>) {
        // Declaration statements always carry a name; it is defined before
        // the body resolves so the function can recurse.
        if let Some(name) = &declaration.name {
            self.declare(name);
            self.define(name);
        }

        self.resolve_function(declaration, FunctionType::Function);
    }

    fn visit_expression_stmt(&mut self, stmt: &ExpressionData) {
        self.resolve_expr(&stmt.expr);
    }

    fn visit_if_stmt(&mut self, if_stmt: &IfData) {
        self.resolve_expr(&if_stmt.condition);
        self.resolve_stmt(&if_stmt.then_branch);
        if let Some(else_branch) = &if_stmt.else_branch {
            self.resolve_stmt(else_branch);
        }
    }

    fn visit_print_stmt(&mut self, print: &PrintData) {
        self.resolve_expr(&print.expr);
    }

    fn visit_return_stmt(&mut self, return_stmt: &ReturnData) {
        if let FunctionType::None = self.current_function {
            self.diagnostics.error(&ResolveError {
                token: return_stmt.keyword.clone(),
                message: "Can't return from top-level code.".to_string(),
            });
        }

        if let Some(value) = &return_stmt.value {
            if let FunctionType::Initializer = self.current_function {
                self.diagnostics.error(&ResolveError {
                    token: return_stmt.keyword.clone(),
                    message: "Can't return a value from an initializer.".to_string(),
                });
                return;
            }

            self.resolve_expr(value);
        }
    }

    fn visit_while_stmt(&mut self, while_stmt: &WhileData) {
        self.resolve_expr(&while_stmt.condition);
        self.resolve_stmt(&while_stmt.body);
    }

    fn visit_class_stmt(&mut self, class: &ClassData) {
        let enclosing_class = mem::replace(&mut self.current_class, ClassType::Class);

        self.declare(&class.name);
        self.define(&class.name);

        // Method bodies see `this` one scope above their own; the evaluator
        // creates the matching environment when it binds a method.
        self.begin_scope();
        self.scopes
            .last_mut()
            .expect("scope stack to be not empty")
            .insert("this".to_string(), VariableState {
                token: class.name.clone(),
                defined: true,
                referenced: true,
            });

        for method in &class.methods {
            let declaration = match method.name.as_ref() {
                Some(name) if name.lexeme == "init" => FunctionType::Initializer,
                _ => FunctionType::Method,
            };

            self.resolve_function(method, declaration);
        }

        self.end_scope();

        self.current_class = enclosing_class;
    }
}
