#![allow(clippy::needless_return)]

//! A tree-walk interpreter for Lox, the dynamically typed, class-based
//! scripting language from the [Crafting Interpreters](https://craftinginterpreters.com/)
//! book by Bob Nystrom. Source text goes through four stages, each of which
//! surfaces its own class of errors before the next one runs.
//!
//! ## Scanning
//! The [`scanner`](scanner) turns a string of characters into a list of
//! [`Token`](token::Token)s with line numbers and literal values. Trivial
//! problems such as an unterminated string or a stray character are reported
//! here, and scanning keeps going so one run reports every one of them.
//!
//! ## Parsing
//! The [`parser`](parser) is a hand-written recursive descent parser that
//! turns tokens into [`expressions`](expr::Expr) and
//! [`statements`](stmt::Stmt). It encodes the precedence table directly in
//! its call structure, desugars `for` loops into `while` loops, and on a
//! syntax error it synchronizes at the next statement boundary so a single
//! pass can report several mistakes.
//!
//! ## Resolving
//! The [`resolver`](resolver) walks the finished tree once and binds every
//! variable use to the scope that declares it, recording how many
//! environments away the binding lives. It also rejects programs that are
//! grammatically fine but semantically wrong, such as `return` at the top
//! level or reading a variable in its own initializer.
//!
//! ## Interpreting
//! The [`interpreter`](interpreter) walks the tree and evaluates it. Scopes
//! are a chain of [`Environment`](environment::Environment)s; functions
//! capture the environment where they were created, which gives closures
//! their sharing behavior; classes bundle methods that bind `this` when
//! looked up on an instance. Runtime errors unwind to the driver, which
//! reports them and, in file mode, exits with a failing status.

use std::io::Write;
use std::{fs, process};

pub mod ast;
pub mod class;
pub mod environment;
pub mod error;
pub mod expr;
pub mod function;
pub mod interpreter;
pub mod literal;
pub mod object;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod stmt;
pub mod token;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use error::Diagnostics;
use interpreter::Interpreter;
use parser::Parser;
use resolver::Resolver;
use scanner::Scanner;

#[allow(non_camel_case_types)]
pub struct lox<'a> {
    interpreter: Interpreter<'a>,
    diagnostics: Diagnostics,
}

impl<'a> lox<'a> {
    /// Creates a new driver. Program `print` output goes to the given sink;
    /// diagnostics go to stderr.
    pub fn new(output: &'a mut dyn Write) -> Self {
        lox {
            interpreter: Interpreter::new(output),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Runs a script from a file. Exits the process with 65 if the script
    /// had static errors and 70 if it failed at runtime.
    pub fn run_file(&mut self, path: String) {
        let contents = fs::read_to_string(path)
            .expect("Should have been able to read the file");

        self.run(&contents, false);

        if self.diagnostics.had_error() {
            process::exit(65);
        }
        if self.diagnostics.had_runtime_error() {
            process::exit(70);
        }
    }

    /// Runs an interactive prompt until an empty line or end of input.
    /// Errors do not end the session; the error flags reset between lines.
    pub fn run_prompt(&mut self) {
        let mut editor = DefaultEditor::new().expect("to initialize the line editor");

        let history = home::home_dir().map(|dir| dir.join(".lox_history"));
        if let Some(history) = &history {
            let _ = editor.load_history(history);
        }

        loop {
            match editor.readline("> ") {
                Ok(line) => {
                    if line.is_empty() {
                        break;
                    }

                    let _ = editor.add_history_entry(line.as_str());

                    self.run(&line, true);
                    self.diagnostics.reset();
                },
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
                Err(error) => {
                    eprintln!("{error}");
                    break;
                },
            }
        }

        if let Some(history) = &history {
            let _ = editor.save_history(history);
        }
    }

    /// Runs a chunk of source through the pipeline. Each stage only runs if
    /// the previous ones reported no errors.
    fn run(&mut self, source: &str, repl_mode: bool) {
        let mut scanner = Scanner::new(source, &mut self.diagnostics);
        let tokens = scanner.scan_tokens();

        if self.diagnostics.had_error() {
            return;
        }

        let mut parser = Parser::new(tokens, &mut self.diagnostics);
        let statements = parser.parse();

        if self.diagnostics.had_error() {
            return;
        }

        let mut resolver = Resolver::new(&mut self.interpreter, &mut self.diagnostics);
        resolver.resolve(&statements);

        if self.diagnostics.had_error() {
            return;
        }

        let result = if repl_mode {
            self.interpreter.interpret_repl(&statements)
        } else {
            self.interpreter.interpret(&statements)
        };

        if let Err(error) = result {
            self.diagnostics.runtime_error(&error);
        }
    }
}
