/// Array builtins.
///
/// # Responsibilities
/// - Appending, inserting and deleting elements.
/// - Stack and queue style access at both ends.
/// - Searching, sorting, shuffling and in-place transformation.
///
/// Mutating builtins change the array in place. When the array operand was a
/// variable they push nothing, otherwise they push the modified array.
pub mod array;
/// Program control builtins: running blocks in other contexts, `include`,
/// `eval`, introspection of functions and the process environment.
pub mod control;
/// The builtin table.
///
/// Declares every builtin with its arity and implementation, and the prefix
/// that selects a builtin even when a user function shadows it.
pub mod core;
/// Debug dumps of the stack and of variables.
pub mod debug;
/// Dictionary builtins.
pub mod dictionary;
/// Math builtins.
///
/// Rounding, transcendental functions, extremes of arrays, base conversion
/// and random numbers.
pub mod math;
/// `length`, `setlength` and `slice`, which work on both strings and arrays.
pub mod memory;
/// Direct manipulation of the operand stack.
pub mod stack;
/// Reading from and writing to the standard streams.
pub mod stdio;
/// String builtins.
pub mod string;
/// Type predicates and `__type`.
pub mod typing;
