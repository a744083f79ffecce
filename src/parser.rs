use std::rc::Rc;

use crate::error::{Diagnostics, ParseError};
use crate::expr::*;
use crate::literal::Literal;
use crate::stmt::*;
use crate::token::{Token, Type};

type ParseResult<T> = Result<T, ParseError>;

/// Returns if the next token is any of the given types and consumes it.
macro_rules! matches {
    ( $self:ident, $( $type:expr ),+ ) => {
        {
            if $( $self.check($type) ) ||* {
                $self.advance();
                true
            } else {
                false
            }
        }
    }
}

/// Parses the tokens into a list of statements.
///
/// - Program     -> Declaration* EOF ;
/// - Declaration -> ClassDecl | FunDecl | VarDecl | Statement ;
/// - ClassDecl   -> "class" IDENTIFIER "{" Function* "}" ;
/// - FunDecl     -> "fun" Function ;
/// - VarDecl     -> "var" IDENTIFIER ( "=" Expression )? ";" ;
/// - Function    -> IDENTIFIER "(" Parameters? ")" Block ;
/// - Parameters  -> IDENTIFIER ( "," IDENTIFIER )* ;
/// - Statement   -> ExprStmt | ForStmt | IfStmt | PrintStmt | ReturnStmt | WhileStmt | Block ;
/// - Block       -> "{" Declaration* "}" ;
/// - ExprStmt    -> Expression ";" ;
/// - ForStmt     -> "for" "(" ( VarDecl | ExprStmt | ";" ) Expression? ";" Expression? ")" Statement ;
/// - IfStmt      -> "if" "(" Expression ")" Statement ( "else" Statement )? ;
/// - PrintStmt   -> "print" Expression ";" ;
/// - ReturnStmt  -> "return" Expression? ";" ;
/// - WhileStmt   -> "while" "(" Expression ")" Statement ;
/// - Expression  -> Assignment ;
/// - Assignment  -> ( Call "." )? IDENTIFIER "=" Assignment | LogicOr ;
/// - LogicOr     -> LogicAnd ( "or" LogicAnd )* ;
/// - LogicAnd    -> Equality ( "and" Equality )* ;
/// - Equality    -> Comparison ( ( "!=" | "==" ) Comparison )* ;
/// - Comparison  -> Term ( ( ">" | ">=" | "<" | "<=" ) Term )* ;
/// - Term        -> Factor ( ( "+" | "-" ) Factor )* ;
/// - Factor      -> Unary ( ( "*" | "/" ) Unary )* ;
/// - Unary       -> ( "!" | "-" ) Unary | Call ;
/// - Arguments   -> Expression ( "," Expression )* ;
/// - Call        -> Primary ( "(" Arguments? ")" | "." IDENTIFIER )* ;
/// - Primary     -> NUMBER | STRING | "false" | "true" | "nil" | "this"
///                | "(" Expression ")" | IDENTIFIER | "fun" "(" Parameters? ")" Block ;
///
/// On a syntax error the parser reports it, skips to the next statement
/// boundary and keeps going, so a single pass surfaces every error and still
/// returns the statements it could make sense of.
pub struct Parser<'a> {
    tokens: Vec<Token>,
    diagnostics: &'a mut Diagnostics,
    current: usize,
    next_id: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token>, diagnostics: &'a mut Diagnostics) -> Self {
        Parser {
            tokens,
            diagnostics,
            current: 0,
            next_id: 0,
        }
    }

    /// Parses the tokens and returns the resulting statements.
    pub fn parse(&mut self) -> Vec<Stmt> {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }

        statements
    }

    /// Hands out a fresh node id. Variable use sites get one each so the
    /// resolver can key its scope-distance table on them.
    fn node_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Returns the next token without consuming it.
    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    /// Returns the previous token without consuming it.
    fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    /// Returns if the parser has reached the end of the file.
    fn is_at_end(&self) -> bool {
        self.peek().r#type == Type::EOF
    }

    /// Returns if the next token is of the given type.
    fn check(&self, r#type: Type) -> bool {
        if self.is_at_end() {
            return false;
        }

        self.peek().r#type == r#type
    }

    /// Returns if the token after the next one is of the given type.
    fn check_next(&self, r#type: Type) -> bool {
        match self.tokens.get(self.current + 1) {
            Some(token) => token.r#type == r#type,
            None => false,
        }
    }

    /// Consumes the next token and returns it.
    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }

        self.previous()
    }

    /// Consumes the next token if it is of the given type.
    fn consume(&mut self, r#type: Type, message: &str) -> ParseResult<&Token> {
        if self.check(r#type) {
            return Ok(self.advance());
        }

        Err(ParseError {
            token: self.peek().clone(),
            message: message.to_string(),
        })
    }

    /// Parses a declaration. On error, reports it and synchronizes to the
    /// next statement boundary.
    fn declaration(&mut self) -> Option<Stmt> {
        let statement = if matches!(self, Type::Class) {
            self.class_declaration()
        } else if self.check(Type::Fun) && self.check_next(Type::Identifier) {
            self.advance();
            self.function("function").map(Stmt::Function)
        } else if matches!(self, Type::Var) {
            self.var_declaration()
        } else {
            self.statement()
        };

        match statement {
            Ok(stmt) => Some(stmt),
            Err(error) => {
                self.diagnostics.error(&error);
                self.synchronize();
                None
            }
        }
    }

    /// Parses a class declaration.
    fn class_declaration(&mut self) -> ParseResult<Stmt> {
        let name = self.consume(Type::Identifier, "Expect class name.")?.clone();

        self.consume(Type::LeftBrace, "Expect '{' before class body.")?;

        let mut methods = vec![];
        while !self.check(Type::RightBrace) && !self.is_at_end() {
            methods.push(self.function("method")?);
        }

        self.consume(Type::RightBrace, "Expect '}' after class body.")?;

        Ok(Stmt::Class(ClassData { name, methods }))
    }

    /// Parses a variable declaration.
    fn var_declaration(&mut self) -> ParseResult<Stmt> {
        let name = self.consume(Type::Identifier, "Expect a variable name.")?.clone();

        let initializer = match matches!(self, Type::Equal) {
            true => Some(self.expression()?),
            false => None,
        };

        self.consume(Type::Semicolon, "Expect ';' after a variable declaration.")?;

        Ok(Stmt::Var(VarData { name, initializer }))
    }

    /// Parses a statement.
    fn statement(&mut self) -> ParseResult<Stmt> {
        if matches!(self, Type::For) {
            return self.for_statement();
        }

        if matches!(self, Type::If) {
            return self.if_statement();
        }

        if matches!(self, Type::Print) {
            return self.print_statement();
        }

        if matches!(self, Type::Return) {
            return self.return_statement();
        }

        if matches!(self, Type::While) {
            return self.while_statement();
        }

        if matches!(self, Type::LeftBrace) {
            return Ok(Stmt::Block(BlockData { statements: self.block()? }));
        }

        self.expression_statement()
    }

    /// Parses a for statement. There is no for node in the syntax tree; the
    /// loop desugars into a while statement wrapped in blocks.
    fn for_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(Type::LeftParen, "Expect '(' after 'for'.")?;

        let initializer = if matches!(self, Type::Semicolon) {
            None
        } else if matches!(self, Type::Var) {
            Some(self.var_declaration()?)
        } else {
            Some(self.expression_statement()?)
        };

        let condition = match !self.check(Type::Semicolon) {
            true => Some(self.expression()?),
            false => None,
        };
        self.consume(Type::Semicolon, "Expect ';' after loop condition.")?;

        let increment = match !self.check(Type::RightParen) {
            true => Some(self.expression()?),
            false => None,
        };
        self.consume(Type::RightParen, "Expect ')' after for clauses.")?;

        let mut body = self.statement()?;

        // Execute the increment after the body.
        if let Some(increment) = increment {
            body = Stmt::Block(BlockData {
                statements: vec![
                    body,
                    Stmt::Expression(ExpressionData { expr: increment }),
                ],
            });
        }

        // Wrap the body into a while loop.
        // If there is no condition, use true.
        body = Stmt::While(WhileData {
            condition: condition.unwrap_or(Expr::Literal(Literal::Bool(true))),
            body: Box::new(body),
        });

        // Add the initializer before the loop if there is one.
        if let Some(initializer) = initializer {
            body = Stmt::Block(BlockData {
                statements: vec![initializer, body],
            });
        }

        Ok(body)
    }

    /// Parses an if statement.
    fn if_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(Type::LeftParen, "Expect '(' after 'if'.")?;
        let condition = self.expression()?;
        self.consume(Type::RightParen, "Expect ')' after if condition.")?;

        let then_branch = Box::new(self.statement()?);
        let else_branch = match matches!(self, Type::Else) {
            true => Some(Box::new(self.statement()?)),
            false => None,
        };

        Ok(Stmt::If(IfData { condition, then_branch, else_branch }))
    }

    /// Parses a print statement.
    fn print_statement(&mut self) -> ParseResult<Stmt> {
        let expr = self.expression()?;

        self.consume(Type::Semicolon, "Expect ';' after a value.")?;

        Ok(Stmt::Print(PrintData { expr }))
    }

    /// Parses a return statement.
    fn return_statement(&mut self) -> ParseResult<Stmt> {
        let keyword = self.previous().clone();

        let value = match self.check(Type::Semicolon) {
            true => None,
            false => Some(self.expression()?),
        };

        self.consume(Type::Semicolon, "Expect ';' after return value.")?;

        Ok(Stmt::Return(ReturnData { keyword, value }))
    }

    /// Parses a while statement.
    fn while_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(Type::LeftParen, "Expect '(' after 'while'.")?;
        let condition = self.expression()?;
        self.consume(Type::RightParen, "Expect ')' after while condition.")?;
        let body = self.statement()?;

        Ok(Stmt::While(WhileData {
            condition,
            body: Box::new(body),
        }))
    }

    /// Parses an expression statement.
    fn expression_statement(&mut self) -> ParseResult<Stmt> {
        let expr = self.expression()?;

        self.consume(Type::Semicolon, "Expect ';' after an expression.")?;

        Ok(Stmt::Expression(ExpressionData { expr }))
    }

    /// Parses a named function declaration. The leading keyword is already
    /// consumed; `kind` distinguishes functions from methods in messages.
    fn function(&mut self, kind: &str) -> ParseResult<Rc<FunctionData>> {
        let name = self.consume(Type::Identifier, &format!("Expect {kind} name."))?.clone();

        self.consume(Type::LeftParen, &format!("Expect '(' after {kind} name."))?;

        let (params, body) = self.finish_function(kind)?;

        Ok(Rc::new(FunctionData { name: Some(name), params, body }))
    }

    /// Parses the parameter list and body shared by named functions, methods
    /// and anonymous function expressions. The opening parenthesis is
    /// already consumed.
    fn finish_function(&mut self, kind: &str) -> ParseResult<(Vec<Token>, Vec<Stmt>)> {
        let mut params = vec![];

        if !self.check(Type::RightParen) {
            loop {
                if params.len() >= 255 {
                    return Err(ParseError {
                        token: self.peek().clone(),
                        message: "Can't have more than 255 parameters.".to_string(),
                    });
                }

                params.push(self.consume(Type::Identifier, "Expect parameter name.")?.clone());

                if !matches!(self, Type::Comma) {
                    break;
                }
            }
        }

        self.consume(Type::RightParen, "Expect ')' after parameters.")?;
        self.consume(Type::LeftBrace, &format!("Expect '{{' before {kind} body."))?;

        let body = self.block()?;

        Ok((params, body))
    }

    /// Parses a block statement.
    fn block(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut statements = Vec::new();

        while !self.check(Type::RightBrace) && !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }

        self.consume(Type::RightBrace, "Expect '}' after block.")?;

        Ok(statements)
    }

    /// Parses an expression.
    fn expression(&mut self) -> ParseResult<Expr> {
        self.assignment()
    }

    /// Parses an assignment expression. The left-hand side parses as a
    /// regular expression first and is reinterpreted as an assignment target
    /// when an equal sign follows it.
    fn assignment(&mut self) -> ParseResult<Expr> {
        let expr = self.or()?;

        if matches!(self, Type::Equal) {
            let equals = self.previous().clone();
            let value = self.assignment()?;

            return match expr {
                Expr::Variable(data) => Ok(Expr::Assign(AssignData {
                    id: self.node_id(),
                    name: data.name,
                    value: Box::new(value),
                })),
                Expr::Get(data) => Ok(Expr::Set(SetData {
                    object: data.object,
                    name: data.name,
                    value: Box::new(value),
                })),
                expr => {
                    self.diagnostics.error(&ParseError {
                        token: equals,
                        message: "Invalid assignment target.".to_string(),
                    });

                    Ok(expr)
                }
            };
        }

        Ok(expr)
    }

    /// Parses an or expression.
    fn or(&mut self) -> ParseResult<Expr> {
        let mut expr = self.and()?;

        while matches!(self, Type::Or) {
            let operator = self.previous().clone();
            let right = self.and()?;

            expr = Expr::Logical(LogicalData {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            });
        }

        Ok(expr)
    }

    /// Parses an and expression.
    fn and(&mut self) -> ParseResult<Expr> {
        let mut expr = self.equality()?;

        while matches!(self, Type::And) {
            let operator = self.previous().clone();
            let right = self.equality()?;

            expr = Expr::Logical(LogicalData {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            });
        }

        Ok(expr)
    }

    /// Parses an equality expression.
    fn equality(&mut self) -> ParseResult<Expr> {
        let mut expr = self.comparison()?;

        while matches!(self, Type::BangEqual, Type::EqualEqual) {
            let operator = self.previous().clone();
            let right = self.comparison()?;

            expr = Expr::Binary(BinaryData {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            });
        }

        Ok(expr)
    }

    /// Parses a comparison expression.
    fn comparison(&mut self) -> ParseResult<Expr> {
        let mut expr = self.term()?;

        while matches!(self, Type::Greater, Type::GreaterEqual, Type::Less, Type::LessEqual) {
            let operator = self.previous().clone();
            let right = self.term()?;

            expr = Expr::Binary(BinaryData {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            });
        }

        Ok(expr)
    }

    /// Parses a term expression.
    fn term(&mut self) -> ParseResult<Expr> {
        let mut expr = self.factor()?;

        while matches!(self, Type::Minus, Type::Plus) {
            let operator = self.previous().clone();
            let right = self.factor()?;

            expr = Expr::Binary(BinaryData {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            });
        }

        Ok(expr)
    }

    /// Parses a factor expression.
    fn factor(&mut self) -> ParseResult<Expr> {
        let mut expr = self.unary()?;

        while matches!(self, Type::Slash, Type::Star) {
            let operator = self.previous().clone();
            let right = self.unary()?;

            expr = Expr::Binary(BinaryData {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            });
        }

        Ok(expr)
    }

    /// Parses a unary expression.
    fn unary(&mut self) -> ParseResult<Expr> {
        if matches!(self, Type::Bang, Type::Minus) {
            let operator = self.previous().clone();
            let right = self.unary()?;

            return Ok(Expr::Unary(UnaryData {
                operator,
                expr: Box::new(right),
            }));
        }

        self.call()
    }

    /// Parses the arguments of a call expression.
    fn finish_call(&mut self, callee: Expr) -> ParseResult<Expr> {
        let mut arguments = vec![];

        if !self.check(Type::RightParen) {
            while {
                if arguments.len() >= 255 {
                    let error = ParseError {
                        token: self.peek().clone(),
                        message: "Can't have more than 255 arguments.".to_string(),
                    };
                    self.diagnostics.error(&error);
                }

                arguments.push(self.expression()?);
                matches!(self, Type::Comma)
            } {}
        }

        let paren = self.consume(Type::RightParen, "Expect ')' after arguments.")?.clone();

        Ok(Expr::Call(CallData {
            callee: Box::new(callee),
            paren,
            arguments,
        }))
    }

    /// Parses a call expression.
    fn call(&mut self) -> ParseResult<Expr> {
        let mut expr = self.primary()?;

        loop {
            if matches!(self, Type::LeftParen) {
                expr = self.finish_call(expr)?;
            } else if matches!(self, Type::Dot) {
                let name = self.consume(Type::Identifier, "Expect property name after '.'.")?.clone();
                expr = Expr::Get(GetData { object: Box::new(expr), name });
            } else {
                break;
            }
        }

        Ok(expr)
    }

    /// Parses a primary expression.
    fn primary(&mut self) -> ParseResult<Expr> {
        if matches!(self, Type::False) {
            return Ok(Expr::Literal(Literal::Bool(false)));
        }

        if matches!(self, Type::True) {
            return Ok(Expr::Literal(Literal::Bool(true)));
        }

        if matches!(self, Type::Nil) {
            return Ok(Expr::Literal(Literal::Nil));
        }

        if matches!(self, Type::Number, Type::String) {
            return Ok(Expr::Literal(self.previous().clone().literal
                .expect("number or string to have a literal value")));
        }

        if matches!(self, Type::This) {
            return Ok(Expr::This(ThisData {
                id: self.node_id(),
                keyword: self.previous().clone(),
            }));
        }

        if matches!(self, Type::Identifier) {
            let name = self.previous().clone();

            return Ok(Expr::Variable(VariableData {
                id: self.node_id(),
                name,
            }));
        }

        // An anonymous function expression.
        if matches!(self, Type::Fun) {
            self.consume(Type::LeftParen, "Expect '(' after 'fun'.")?;
            let (params, body) = self.finish_function("function")?;

            return Ok(Expr::Function(Rc::new(FunctionData { name: None, params, body })));
        }

        if matches!(self, Type::LeftParen) {
            let expr = self.expression()?;

            self.consume(Type::RightParen, "Expect ')' after expression.")?;

            return Ok(Expr::Grouping(GroupingData { expr: Box::new(expr) }));
        }

        Err(ParseError {
            token: self.peek().clone(),
            message: "Expect expression.".to_string(),
        })
    }

    /// Tries to recover from a parse error by skipping to the start of the
    /// next statement.
    fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().r#type == Type::Semicolon {
                return;
            }

            match self.peek().r#type {
                Type::Class => return,
                Type::Fun => return,
                Type::Var => return,
                Type::For => return,
                Type::If => return,
                Type::While => return,
                Type::Print => return,
                Type::Return => return,
                _ => self.advance(),
            };
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::scanner::Scanner;

    fn parse(source: &str) -> (Vec<Stmt>, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let tokens = Scanner::new(source, &mut diagnostics).scan_tokens();
        assert!(!diagnostics.had_error(), "scan errors in {source:?}");

        let statements = Parser::new(tokens, &mut diagnostics).parse();
        (statements, diagnostics)
    }

    #[test]
    fn parse_precedence() {
        let (statements, diagnostics) = parse("1 + 2 * 3;");

        assert!(!diagnostics.had_error());
        let [Stmt::Expression(data)] = &statements[..] else { panic!("expected one expression statement") };
        let Expr::Binary(add) = &data.expr else { panic!("expected an addition at the root") };

        assert_eq!(add.operator.r#type, Type::Plus);
        assert_eq!(*add.left, Expr::Literal(Literal::Number(1.0)));

        let Expr::Binary(multiply) = add.right.as_ref() else { panic!("expected a multiplication on the right") };
        assert_eq!(multiply.operator.r#type, Type::Star);
    }

    #[test]
    fn parse_comparison_below_equality() {
        let (statements, _) = parse("1 < 2 == true;");

        let [Stmt::Expression(data)] = &statements[..] else { panic!() };
        let Expr::Binary(equality) = &data.expr else { panic!() };

        assert_eq!(equality.operator.r#type, Type::EqualEqual);
    }

    #[test]
    fn parse_for_desugars_to_while() {
        let (statements, diagnostics) = parse("for (var i = 0; i < 3; i = i + 1) print i;");

        assert!(!diagnostics.had_error());

        // for (init; cond; inc) body => { init while (cond) { body inc; } }
        let [Stmt::Block(outer)] = &statements[..] else { panic!("expected an outer block") };
        let [Stmt::Var(_), Stmt::While(while_data)] = &outer.statements[..] else {
            panic!("expected an initializer and a while loop")
        };

        let Stmt::Block(inner) = while_data.body.as_ref() else { panic!("expected an inner block") };
        let [Stmt::Print(_), Stmt::Expression(increment)] = &inner.statements[..] else {
            panic!("expected the body and the increment")
        };
        assert!(std::matches!(increment.expr, Expr::Assign(_)));
    }

    #[test]
    fn parse_for_without_condition_loops_on_true() {
        let (statements, _) = parse("for (;;) print 1;");

        let [Stmt::While(while_data)] = &statements[..] else { panic!("expected a bare while loop") };
        assert_eq!(while_data.condition, Expr::Literal(Literal::Bool(true)));
    }

    #[test]
    fn parse_assignment_target() {
        let (statements, diagnostics) = parse("a = 1;");

        assert!(!diagnostics.had_error());
        let [Stmt::Expression(data)] = &statements[..] else { panic!() };
        assert!(std::matches!(data.expr, Expr::Assign(_)));
    }

    #[test]
    fn parse_property_assignment_target() {
        let (statements, _) = parse("a.b = 1;");

        let [Stmt::Expression(data)] = &statements[..] else { panic!() };
        assert!(std::matches!(data.expr, Expr::Set(_)));
    }

    #[test]
    fn parse_invalid_assignment_target() {
        let (statements, diagnostics) = parse("1 = 2;");

        // The error is reported but the left-hand side survives.
        assert!(diagnostics.had_error());
        assert_eq!(statements.len(), 1);
    }

    #[test]
    fn parse_function_declaration() {
        let (statements, diagnostics) = parse("fun add(a, b) { return a + b; }");

        assert!(!diagnostics.had_error());
        let [Stmt::Function(declaration)] = &statements[..] else { panic!("expected a function statement") };
        assert_eq!(declaration.name.as_ref().unwrap().lexeme, "add");
        assert_eq!(declaration.params.len(), 2);
    }

    #[test]
    fn parse_anonymous_function_expression() {
        let (statements, diagnostics) = parse("var f = fun (x) { print x; };");

        assert!(!diagnostics.had_error());
        let [Stmt::Var(var)] = &statements[..] else { panic!() };
        let Some(Expr::Function(declaration)) = &var.initializer else {
            panic!("expected a function expression initializer")
        };
        assert!(declaration.name.is_none());
    }

    #[test]
    fn parse_class_declaration() {
        let (statements, diagnostics) = parse("class Foo { bar() {} baz() {} }");

        assert!(!diagnostics.had_error());
        let [Stmt::Class(class)] = &statements[..] else { panic!() };
        assert_eq!(class.name.lexeme, "Foo");
        assert_eq!(class.methods.len(), 2);
        assert_eq!(class.methods[0].name.as_ref().unwrap().lexeme, "bar");
    }

    #[test]
    fn parse_synchronizes_after_error() {
        let (statements, diagnostics) = parse("var 1 = 2; print 3;");

        assert!(diagnostics.had_error());
        assert_eq!(statements.len(), 1);
        assert!(std::matches!(statements[0], Stmt::Print(_)));
    }

    #[test]
    fn parse_assigns_distinct_node_ids() {
        let (statements, _) = parse("a; a;");

        let ids: Vec<usize> = statements.iter().map(|stmt| {
            let Stmt::Expression(data) = stmt else { panic!() };
            let Expr::Variable(variable) = &data.expr else { panic!() };
            variable.id
        }).collect();

        assert_ne!(ids[0], ids[1]);
    }
}
