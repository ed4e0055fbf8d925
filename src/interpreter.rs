/// Interpreter configuration.
///
/// Holds the settings a program run depends on: the arguments passed to the
/// script, the directories searched by `include` and the nesting limit.
pub mod config;
/// The evaluator module executes parsed tokens.
///
/// The evaluator walks token sequences, maintains the operand stack and the
/// chain of contexts, applies operators and calls functions. It is the core
/// execution engine of the interpreter.
///
/// # Responsibilities
/// - Executes tokens, performing all supported operations.
/// - Handles variables, functions, scoping and control signals.
/// - Reports runtime errors such as stack underflow or division by zero.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces lexemes: string
/// literals, variables, nested array and code block literals, and bare words.
/// This is the first stage of interpretation.
///
/// # Responsibilities
/// - Splits the input into whitespace-delimited lexemes and skips comments.
/// - Decodes string escapes and validates variable names.
/// - Reports lexical errors for unterminated or malformed literals.
pub mod lexer;
/// The parser module builds token trees from lexemes.
///
/// The parser classifies the lexemes produced by the lexer and recursively
/// parses nested literals, recording the source position of every token.
///
/// # Responsibilities
/// - Converts lexemes into tokens carrying values, operators and calls.
/// - Reports syntax errors with line information.
/// - Serializes values back into source text.
pub mod parser;
/// Registry of parsed source texts.
///
/// Tokens refer to their source by id; the registry maps ids back to names
/// and offsets back to lines and columns for error reporting.
pub mod source;
/// The standard streams used by the I/O builtins.
pub mod streams;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares all the value types used during interpretation, such
/// as integers, floats, booleans, strings, arrays, dictionaries, code blocks
/// and variable references. It also provides conversion and comparison.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported value variants.
/// - Implements the GCD coercions used by arithmetic and comparison.
/// - Implements loose and strict equality.
pub mod value;
