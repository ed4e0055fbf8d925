/// Execution contexts.
///
/// A context is one activation of a function, a lambda or the main program.
/// Contexts form a stack; variables refer to their owning context by id.
pub mod context;

/// Core evaluation logic.
///
/// Contains the `Interpreter` state, the token loop, function calls and the
/// stack helpers every operator and builtin is built on.
///
/// # Responsibilities
/// - Parses and runs programs against a persistent interpreter state.
/// - Dispatches tokens to operators, functions and the operand stack.
/// - Attaches source locations to errors as they propagate.
pub mod core;

/// Builtin functions.
///
/// Declares the builtin table and implements every builtin, grouped by
/// topic.
pub mod function;

/// Observation of execution.
///
/// Embedders can install a hook that sees every token before it runs and
/// every context as it is created and destroyed.
pub mod hook;

/// Operator evaluation.
///
/// Implements every operator of the language: arithmetic, comparison,
/// variable binding and control flow.
pub mod operator;

/// Control signals raised by `break`, `continue`, `exit` and `halt`.
pub mod signal;

/// Variable binding, resolution and assignment.
pub mod variable;
