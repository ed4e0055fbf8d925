/// Numeric parsing and formatting helpers.
///
/// This module provides the whole-string literal parsers used by both the
/// lexer and the string coercions, the float formatting used whenever a
/// number is shown as text, and checked conversions between `i64`, `usize`
/// and `f64`.
pub mod num;
/// Native stack management for deep recursion.
///
/// Every nested `run` of a code block goes through this module so that deeply
/// recursive scripts grow the native stack instead of overflowing it.
pub mod stack;
