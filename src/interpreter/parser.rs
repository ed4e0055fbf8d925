/// Core parsing logic.
///
/// Turns source text into token sequences. Words are classified into
/// literals, operators and function calls; array and code block literals are
/// parsed recursively.
pub mod core;

/// Serialization of values back into source text.
///
/// Backs the `uneval` builtin. Parsing the output and evaluating it yields a
/// value equal to the input, for every value that has a literal form.
pub mod serialize;
