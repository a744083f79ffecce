use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::mem;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::class::Class;
use crate::environment::Environment;
use crate::error::{RuntimeError, Unwind};
use crate::expr::{
    AssignData, BinaryData, CallData, Expr, ExprVisitor, FunctionData, GetData, GroupingData,
    LogicalData, SetData, ThisData, UnaryData, VariableData,
};
use crate::function::{Function, NativeFunction};
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::{
    BlockData, ClassData, ExpressionData, IfData, PrintData, ReturnData, Stmt, StmtVisitor,
    VarData, WhileData,
};
use crate::token::{Token, Type};

/// Requires an operand to be a number.
fn number_operand(operator: &Token, operand: &Object) -> Result<f64, RuntimeError> {
    match operand {
        Object::Literal(Literal::Number(number)) => Ok(*number),
        _ => Err(RuntimeError {
            token: operator.clone(),
            message: "Operand must be a number.".to_string(),
        }),
    }
}

/// Requires both operands to be numbers.
fn number_operands(operator: &Token, left: &Object, right: &Object) -> Result<(f64, f64), RuntimeError> {
    match (left, right) {
        (Object::Literal(Literal::Number(left)), Object::Literal(Literal::Number(right))) => {
            Ok((*left, *right))
        },
        _ => Err(RuntimeError {
            token: operator.clone(),
            message: "Operands must be numbers.".to_string(),
        }),
    }
}

/// Evaluates the syntax tree by walking it. Statements execute for their
/// effects; expressions evaluate to an [`Object`]. The interpreter owns the
/// global environment and the locals side table the resolver filled in, and
/// writes program output to the sink the host supplied.
pub struct Interpreter<'a> {
    pub globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<usize, usize>,
    started: Instant,
    output: &'a mut dyn Write,
}

impl<'a> Interpreter<'a> {
    pub fn new(output: &'a mut dyn Write) -> Self {
        let globals = Rc::new(RefCell::new(Environment::default()));

        for native in NativeFunction::get_globals() {
            let name = native.name;
            globals.borrow_mut().define(name, Object::from(native));
        }

        Interpreter {
            globals: Rc::clone(&globals),
            environment: globals,
            locals: HashMap::new(),
            started: Instant::now(),
            output,
        }
    }

    /// Time since the interpreter was created. Backs the `clock` native;
    /// monotonically non-decreasing within a run.
    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }

    /// Records the scope distance for a use site. Called by the resolver.
    pub fn resolve(&mut self, id: usize, distance: usize) {
        self.locals.insert(id, distance);
    }

    /// Executes a list of statements.
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        for statement in statements {
            match self.execute(statement) {
                Ok(()) => (),
                Err(Unwind::Error(error)) => return Err(error),
                Err(Unwind::Return(_)) => unreachable!("return unwound past every function call"),
            }
        }

        Ok(())
    }

    /// Executes a prompt line. A line holding a single expression statement
    /// evaluates it and echoes the value.
    pub fn interpret_repl(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        if let [Stmt::Expression(data)] = statements {
            return match self.evaluate(&data.expr) {
                Ok(value) => {
                    writeln!(self.output, "{value}").expect("program output to be writable");
                    Ok(())
                },
                Err(Unwind::Error(error)) => Err(error),
                Err(Unwind::Return(_)) => unreachable!("return unwound past every function call"),
            };
        }

        self.interpret(statements)
    }

    fn execute(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        stmt.accept(self)
    }

    fn evaluate(&mut self, expr: &Expr) -> Result<Object, Unwind> {
        expr.accept(self)
    }

    /// Executes statements under the given environment and restores the
    /// previous one on every exit path, including unwinds.
    pub fn execute_block(&mut self, statements: &[Stmt], environment: Rc<RefCell<Environment>>) -> Result<(), Unwind> {
        let previous = mem::replace(&mut self.environment, environment);

        let mut result = Ok(());
        for statement in statements {
            result = self.execute(statement);
            if result.is_err() {
                break;
            }
        }

        self.environment = previous;

        result
    }

    /// Reads a variable through the resolved distance, or from the globals
    /// when the resolver found it in no surrounding scope.
    fn look_up_variable(&self, id: usize, name: &Token) -> Result<Object, RuntimeError> {
        match self.locals.get(&id) {
            Some(&distance) => {
                self.environment.borrow().get_at(distance, &name.lexeme).ok_or_else(|| RuntimeError {
                    token: name.clone(),
                    message: format!("Undefined variable '{}'.", name.lexeme),
                })
            },
            None => self.globals.borrow().get(name),
        }
    }
}

impl<'a> ExprVisitor<Result<Object, Unwind>> for Interpreter<'a> {
    fn visit_literal_expr(&mut self, literal: &Literal) -> Result<Object, Unwind> {
        Ok(Object::from(literal.clone()))
    }

    fn visit_grouping_expr(&mut self, grouping: &GroupingData) -> Result<Object, Unwind> {
        self.evaluate(&grouping.expr)
    }

    fn visit_unary_expr(&mut self, unary: &UnaryData) -> Result<Object, Unwind> {
        let right = self.evaluate(&unary.expr)?;

        match unary.operator.r#type {
            Type::Bang => Ok(Object::from(!right.is_truthy())),
            Type::Minus => {
                let number = number_operand(&unary.operator, &right)?;
                Ok(Object::from(-number))
            },
            _ => unreachable!("unary operator {:?}", unary.operator.r#type),
        }
    }

    fn visit_binary_expr(&mut self, binary: &BinaryData) -> Result<Object, Unwind> {
        let left = self.evaluate(&binary.left)?;
        let right = self.evaluate(&binary.right)?;
        let operator = &binary.operator;

        let value = match operator.r#type {
            Type::EqualEqual => Object::from(left == right),
            Type::BangEqual => Object::from(left != right),
            Type::Plus => match (&left, &right) {
                (Object::Literal(Literal::Number(left)), Object::Literal(Literal::Number(right))) => {
                    Object::from(left + right)
                },
                (Object::Literal(Literal::String(left)), Object::Literal(Literal::String(right))) => {
                    Object::from(format!("{left}{right}"))
                },
                _ => return Err(RuntimeError {
                    token: operator.clone(),
                    message: "Both operands must be either Numbers or Strings".to_string(),
                }.into()),
            },
            Type::Minus => {
                let (left, right) = number_operands(operator, &left, &right)?;
                Object::from(left - right)
            },
            Type::Star => {
                let (left, right) = number_operands(operator, &left, &right)?;
                Object::from(left * right)
            },
            Type::Slash => {
                let (left, right) = number_operands(operator, &left, &right)?;

                if right == 0.0 {
                    return Err(RuntimeError {
                        token: operator.clone(),
                        message: "Division by zero".to_string(),
                    }.into());
                }

                Object::from(left / right)
            },
            Type::Greater => {
                let (left, right) = number_operands(operator, &left, &right)?;
                Object::from(left > right)
            },
            Type::GreaterEqual => {
                let (left, right) = number_operands(operator, &left, &right)?;
                Object::from(left >= right)
            },
            Type::Less => {
                let (left, right) = number_operands(operator, &left, &right)?;
                Object::from(left < right)
            },
            Type::LessEqual => {
                let (left, right) = number_operands(operator, &left, &right)?;
                Object::from(left <= right)
            },
            _ => unreachable!("binary operator {:?}", operator.r#type),
        };

        Ok(value)
    }

    fn visit_logical_expr(&mut self, logical: &LogicalData) -> Result<Object, Unwind> {
        let left = self.evaluate(&logical.left)?;

        match logical.operator.r#type {
            Type::Or if left.is_truthy() => Ok(left),
            Type::And if !left.is_truthy() => Ok(left),
            _ => self.evaluate(&logical.right),
        }
    }

    fn visit_variable_expr(&mut self, variable: &VariableData) -> Result<Object, Unwind> {
        Ok(self.look_up_variable(variable.id, &variable.name)?)
    }

    fn visit_assign_expr(&mut self, assign: &AssignData) -> Result<Object, Unwind> {
        let value = self.evaluate(&assign.value)?;

        match self.locals.get(&assign.id) {
            Some(&distance) => {
                self.environment.borrow_mut().assign_at(distance, &assign.name.lexeme, value.clone());
            },
            None => self.globals.borrow_mut().assign(&assign.name, value.clone())?,
        }

        Ok(value)
    }

    fn visit_call_expr(&mut self, call: &CallData) -> Result<Object, Unwind> {
        let callee = self.evaluate(&call.callee)?;

        let callable: &dyn Callable = match &callee {
            Object::Function(function) => function,
            Object::NativeFunction(function) => function,
            Object::Class(class) => class,
            _ => return Err(RuntimeError {
                token: call.paren.clone(),
                message: "Can only call functions and classes.".to_string(),
            }.into()),
        };

        let mut arguments = Vec::with_capacity(call.arguments.len());
        for argument in &call.arguments {
            arguments.push(self.evaluate(argument)?);
        }

        if arguments.len() != callable.arity() {
            return Err(RuntimeError {
                token: call.paren.clone(),
                message: format!(
                    "Expected {} arguments but got {}.",
                    callable.arity(),
                    arguments.len(),
                ),
            }.into());
        }

        Ok(callable.call(self, arguments)?)
    }

    fn visit_get_expr(&mut self, get: &GetData) -> Result<Object, Unwind> {
        let object = self.evaluate(&get.object)?;

        match &object {
            Object::Instance(instance) => Ok(instance.borrow().get(&get.name, &object)?),
            _ => Err(RuntimeError {
                token: get.name.clone(),
                message: "Only instances have properties.".to_string(),
            }.into()),
        }
    }

    fn visit_set_expr(&mut self, set: &SetData) -> Result<Object, Unwind> {
        let object = self.evaluate(&set.object)?;

        let Object::Instance(instance) = object else {
            return Err(RuntimeError {
                token: set.name.clone(),
                message: "Only instances have fields.".to_string(),
            }.into());
        };

        let value = self.evaluate(&set.value)?;
        instance.borrow_mut().set(&set.name, value.clone());

        Ok(value)
    }

    fn visit_this_expr(&mut self, this: &ThisData) -> Result<Object, Unwind> {
        Ok(self.look_up_variable(this.id, &this.keyword)?)
    }

    fn visit_function_expr(&mut self, declaration: &Rc<FunctionData>) -> Result<Object, Unwind> {
        let function = Function::new(Rc::clone(declaration), Rc::clone(&self.environment), false);

        if let Some(name) = &declaration.name {
            self.environment.borrow_mut().define(&name.lexeme, Object::from(function.clone()));
        }

        Ok(Object::from(function))
    }
}

impl<'a> StmtVisitor<Result<(), Unwind>> for Interpreter<'a> {
    fn visit_expression_stmt(&mut self, stmt: &ExpressionData) -> Result<(), Unwind> {
        self.evaluate(&stmt.expr)?;
        Ok(())
    }

    fn visit_print_stmt(&mut self, stmt: &PrintData) -> Result<(), Unwind> {
        let value = self.evaluate(&stmt.expr)?;

        writeln!(self.output, "{value}").expect("program output to be writable");

        Ok(())
    }

    fn visit_var_stmt(&mut self, stmt: &VarData) -> Result<(), Unwind> {
        let value = match &stmt.initializer {
            Some(initializer) => self.evaluate(initializer)?,
            None => Object::from(Literal::Nil),
        };

        self.environment.borrow_mut().define(&stmt.name.lexeme, value);

        Ok(())
    }

    fn visit_block_stmt(&mut self, block: &BlockData) -> Result<(), Unwind> {
        let environment = Environment::new(Some(Rc::clone(&self.environment)));

        self.execute_block(&block.statements, Rc::new(RefCell::new(environment)))
    }

    fn visit_if_stmt(&mut self, if_stmt: &IfData) -> Result<(), Unwind> {
        if self.evaluate(&if_stmt.condition)?.is_truthy() {
            self.execute(&if_stmt.then_branch)?;
        } else if let Some(else_branch) = &if_stmt.else_branch {
            self.execute(else_branch)?;
        }

        Ok(())
    }

    fn visit_while_stmt(&mut self, while_stmt: &WhileData) -> Result<(), Unwind> {
        while self.evaluate(&while_stmt.condition)?.is_truthy() {
            self.execute(&while_stmt.body)?;
        }

        Ok(())
    }

    fn visit_return_stmt(&mut self, return_stmt: &ReturnData) -> Result<(), Unwind> {
        let value = match &return_stmt.value {
            Some(value) => self.evaluate(value)?,
            None => Object::from(Literal::Nil),
        };

        Err(Unwind::Return(value))
    }

    fn visit_function_stmt(&mut self, declaration: &Rc<FunctionData>) -> Result<(), Unwind> {
        let function = Function::new(Rc::clone(declaration), Rc::clone(&self.environment), false);

        let name = declaration.name.as_ref().expect("function statement to have a name");
        self.environment.borrow_mut().define(&name.lexeme, Object::from(function));

        Ok(())
    }

    fn visit_class_stmt(&mut self, class: &ClassData) -> Result<(), Unwind> {
        // The name is bound before the methods are built so method bodies
        // can refer to the class itself.
        self.environment.borrow_mut().define(&class.name.lexeme, Object::from(Literal::Nil));

        let mut methods = HashMap::new();
        for declaration in &class.methods {
            let name = declaration.name.as_ref().expect("method to have a name").lexeme.clone();
            let is_initializer = name == "init";

            let method = Function::new(Rc::clone(declaration), Rc::clone(&self.environment), is_initializer);
            methods.insert(name, method);
        }

        let class_object = Object::from(Rc::new(Class::new(class.name.lexeme.clone(), methods)));
        self.environment.borrow_mut().assign(&class.name, class_object)?;

        Ok(())
    }
}
