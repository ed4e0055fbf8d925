use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Represents all errors that can occur during evaluation and runtime.
///
/// Runtime errors carry no position: the evaluator attaches the location of
/// the token that was executing when the error surfaced.
pub enum RuntimeError {
    /// An operator or function needed more operands than the stack holds.
    #[error("Stack underflow")]
    StackUnderflow,
    /// Tried to resolve a variable that has no binding.
    #[error("Variable \"{name}\" is not defined")]
    UndefinedVariable {
        /// The name of the variable.
        name: String,
    },
    /// Called a function that is neither user-defined nor builtin.
    #[error("Function \"{name}\" is not defined")]
    UndefinedFunction {
        /// The name of the function.
        name: String,
    },
    /// A value had an unexpected or incompatible type.
    #[error("Type mismatch: {details}")]
    TypeMismatch {
        /// Details about the type mismatch.
        details: String,
    },
    /// A numeric operand was expected.
    #[error("Token is not a numeric type")]
    NotNumeric,
    /// Two values cannot be compared for equality.
    #[error("Token cannot be compared")]
    NotComparable,
    /// Tried to index a value that is neither a string nor an array.
    #[error("Token cannot be indexed")]
    NotIndexable,
    /// A negative index was used.
    #[error("{container} index underflow")]
    IndexUnderflow {
        /// `"Array"` or `"String"`.
        container: &'static str,
    },
    /// An index past the end was used.
    #[error("{container} index overflow")]
    IndexOverflow {
        /// `"Array"` or `"String"`.
        container: &'static str,
    },
    /// Integer or floating point division by zero.
    #[error("Division by zero")]
    DivisionByZero,
    /// A value cannot be converted to the requested type.
    #[error("Cannot convert {from} to {to}")]
    TypeConversion {
        /// Type name of the source value.
        from: &'static str,
        /// Name of the requested type.
        to:   &'static str,
    },
    /// A code block operand was expected.
    #[error("Token is not a codeblock")]
    ExpectedCodeBlock,
    /// An array operand was expected.
    #[error("Token is not an array")]
    ExpectedArray,
    /// A dictionary operand was expected.
    #[error("Token is not a dictionary")]
    ExpectedDictionary,
    /// A variable operand was expected.
    #[error("Token is not a variable")]
    ExpectedVariable,
    /// An argument was invalid or out of range.
    #[error("{details}")]
    InvalidArgument {
        /// Details about why the argument is invalid.
        details: String,
    },
    /// A function definition used an operator name or the builtin prefix.
    #[error("\"{name}\" cannot be used as a function name")]
    ReservedFunctionName {
        /// The rejected name.
        name: String,
    },
    /// `inherit` was used in the root context.
    #[error("Parent context is null")]
    NoParentContext,
    /// A variable outlived the activation that bound it.
    #[error("Variable \"{name}\" belongs to a context that no longer exists")]
    DeadContext {
        /// The name of the variable.
        name: String,
    },
    /// Tried to serialize a dictionary or a handle.
    #[error("Cannot serialize a value of type {kind}")]
    Unserializable {
        /// Type name of the value.
        kind: &'static str,
    },
}

impl RuntimeError {
    /// Shorthand for [`RuntimeError::TypeMismatch`].
    pub fn mismatch(details: impl Into<String>) -> Self {
        Self::TypeMismatch { details: details.into() }
    }

    /// Shorthand for [`RuntimeError::InvalidArgument`].
    pub fn invalid(details: impl Into<String>) -> Self {
        Self::InvalidArgument { details: details.into() }
    }
}
