//! # sprig
//!
//! Sprig is a small, dynamically typed scripting language written in Rust.
//! It parses source text into an abstract syntax tree with a Pratt parser and
//! interprets the tree against lexically nested environments, with
//! first-class functions, closures, arrays, hashes, and a handful of
//! built-in functions.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::Write;

use crate::{
    error::Diagnostics,
    interpreter::{environment::Environment, evaluator::Evaluator, lexer::Lexer, parser::Parser},
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` enums and related types
/// that represent the syntactic structure of source code as a tree. The AST
/// is built by the parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Keeps nodes immutable once produced by the parser.
/// - Enables exhaustive dispatch in the evaluator.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while parsing or
/// evaluating code. It standardizes error reporting: parser diagnostics are
/// accumulated as recoverable messages, runtime errors carry the exact
/// user-visible message text.
///
/// # Responsibilities
/// - Defines error enums for parser diagnostics and runtime failures.
/// - Renders accumulated diagnostics in the interactive block format.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations, environments, and built-in functions to provide a
/// complete runtime for source code evaluation. It exposes the public API
/// for interpreting and executing programs.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides entry points for parsing and evaluating user code.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// The interactive read-evaluate-print loop.
///
/// Reads one line per iteration, parses and evaluates it against one
/// persistent environment, and prints results, parser diagnostics, or
/// runtime errors.
pub mod repl;
/// General utilities for numeric conversion.
///
/// This module provides reusable helpers used throughout the evaluator and
/// the built-in functions, such as truncating float-to-index conversion.
pub mod util;

/// Parses and evaluates `source` against a fresh root environment.
///
/// Output written by the `print` built-in goes to `out`. The result is the
/// yield of the last statement: `Some` for expression and `return`
/// statements, `None` when the program is empty or ends in a declaration.
///
/// # Errors
/// Returns the accumulated [`Diagnostics`] when parsing records any, without
/// evaluating the program; returns the
/// [`RuntimeError`](crate::error::RuntimeError) when evaluation fails.
///
/// # Examples
/// ```
/// use sprig::run_source;
///
/// let mut out = Vec::new();
///
/// // The final expression's value is returned.
/// let result = run_source("let x = 2; x * 21", &mut out).unwrap();
/// assert_eq!(result.unwrap().to_string(), "42");
///
/// // Runtime failures carry the language's error message.
/// let error = run_source("1 + \"a\"", &mut out).unwrap_err();
/// assert_eq!(error.to_string(), "type mismatch: NUMBER + STRING");
/// ```
pub fn run_source(source: &str,
                  out: &mut dyn Write)
                  -> Result<Option<interpreter::value::Value>, Box<dyn std::error::Error>> {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();

    if !parser.errors().is_empty() {
        return Err(Box::new(Diagnostics::new(parser.into_errors())));
    }

    let env = Environment::new().into_ref();
    let result = Evaluator::new(out).eval_program(&program, &env)?;

    Ok(result)
}
