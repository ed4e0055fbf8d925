//! # stutsk
//!
//! stutsk is an interpreter for Stutsk, a stack-based concatenative scripting
//! language, written in Rust.
//! Programs are whitespace-separated tokens evaluated left to right against a
//! single operand stack, with variables, user functions, code blocks as
//! values, arrays, dictionaries and structured error handling.

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

use std::{fs, path::Path};

use crate::{
    error::Exception,
    interpreter::{
        config::Config,
        evaluator::core::{Interpreter, Outcome},
        value::core::Value,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the operators of the language and the `Token` type
/// that carries a value or a nested array literal together with its source
/// position. Parsed programs, function bodies and code blocks are all
/// sequences of tokens.
///
/// # Responsibilities
/// - Defines the operator set and its source spellings.
/// - Attaches metadata (such as source locations) to tokens for error
///   reporting.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing, parsing, or
/// evaluating code. It standardizes error reporting and carries detailed
/// information about failures, including error kinds, descriptions, and source
/// locations for debugging and user feedback.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (parser, evaluator).
/// - Distinguishes errors a script may catch from those it may not.
/// - Attaches file names and line numbers for context.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations, and all supporting infrastructure to provide a complete
/// runtime for Stutsk programs.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides the `Interpreter` used to run programs.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for safe numeric conversion and helpers.
///
/// This module provides reusable helpers that are used throughout the
/// interpreter, parser, and evaluator.
///
/// # Responsibilities
/// - Parse and format numbers the way the language spells them.
/// - Safely convert between `i64`, `usize`, and `f64`.
/// - Grow the native stack for deeply nested programs.
pub mod util;

/// Runs `source` as a complete program.
///
/// # Parameters
/// - `name`: The source name used in error messages.
/// - `source`: The program text.
/// - `config`: Interpreter settings.
///
/// # Returns
/// How the program ended. Uncaught errors are returned as `Err`.
pub fn run_source(name: &str, source: &str, config: Config) -> Result<Outcome, Exception> {
    Interpreter::with_config(config).execute(name, source)
}

/// Reads the file at `path` and runs it as a complete program.
///
/// The file name is used as the source name. A file that cannot be read is
/// reported as a system error.
pub fn run_file(path: &Path, config: Config) -> Result<Outcome, Exception> {
    let source = fs::read_to_string(path).map_err(|e| {
                                             Exception::system(format!("Cannot open file \"{}\": {e}",
                                                                       path.display()))
                                         })?;
    let name = path.file_name()
                   .map_or_else(|| path.display().to_string(),
                                |name| name.to_string_lossy().into_owned());
    run_source(&name, &source, config)
}

/// Returns the operand stack left behind by a program.
///
/// This function parses and executes `source` with the default configuration.
/// If execution succeeds, it returns the final stack, bottom first; otherwise
/// it returns the error that stopped the program.
///
/// # Errors
/// Returns an error if parsing or evaluation fails.
///
/// # Examples
/// ```
/// use stutsk::{get_result, interpreter::value::core::Value};
///
/// // Integer arithmetic stays integral.
/// let stack = get_result("2 3 +").unwrap();
/// assert_eq!(stack, vec![Value::Integer(5)]);
///
/// // Example with an intentional error (unknown variable).
/// assert!(get_result("$x 1 +").is_err());
/// ```
pub fn get_result(source: &str) -> Result<Vec<Value>, Exception> {
    let mut interpreter = Interpreter::new();
    interpreter.execute("<input>", source)?;
    Ok(interpreter.stack().to_vec())
}
