use std::fmt;

use thiserror::Error;

/// Parsing errors.
///
/// Defines all error types that can occur while scanning source text:
/// unterminated literals, bad escapes and malformed variable names.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation and execution.
/// Runtime errors include things like stack underflow, type mismatches,
/// index violations, or failed numeric conversions.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Source position attached to a reported error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Name of the source the failing token came from.
    pub file: String,
    /// Line of the failing token.
    pub line: usize,
}

/// The category of an [`Exception`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// Malformed source text.
    #[error("parser error: {0}")]
    Parse(#[from] ParseError),
    /// A failed operation inside the evaluator.
    #[error("error: {0}")]
    Runtime(#[from] RuntimeError),
    /// Raised by the `throw` operator.
    #[error("exception: {0}")]
    Custom(String),
    /// Failures of the environment the interpreter runs in.
    #[error("system error: {0}")]
    System(String),
    /// Unrecoverable interpreter state, such as exhausted call depth.
    #[error("fatal error: {0}")]
    Fatal(String),
}

/// An error travelling up the evaluator, optionally tagged with the position
/// of the token that raised it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exception {
    /// What went wrong.
    pub kind:     ErrorKind,
    /// Where it went wrong, once known.
    pub location: Option<Location>,
}

impl Exception {
    /// Creates an exception without a location.
    #[must_use]
    pub const fn new(kind: ErrorKind) -> Self {
        Self { kind,
               location: None }
    }

    /// Creates an exception raised by `throw`.
    pub fn custom(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Custom(message.into()))
    }

    /// Creates a system error.
    pub fn system(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::System(message.into()))
    }

    /// Creates a fatal error.
    pub fn fatal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Fatal(message.into()))
    }

    /// Attaches `location` unless the exception already carries one.
    #[must_use]
    pub fn located(mut self, location: impl FnOnce() -> Location) -> Self {
        if self.location.is_none() && !matches!(self.kind, ErrorKind::System(_)) {
            self.location = Some(location());
        }
        self
    }

    /// Returns `true` if a `try` block may handle this exception.
    ///
    /// System and fatal errors always reach the program driver.
    #[must_use]
    pub const fn is_catchable(&self) -> bool {
        matches!(self.kind,
                 ErrorKind::Parse(_) | ErrorKind::Runtime(_) | ErrorKind::Custom(_))
    }

    /// Returns the message without category or location.
    #[must_use]
    pub fn message(&self) -> String {
        match &self.kind {
            ErrorKind::Parse(e) => e.to_string(),
            ErrorKind::Runtime(e) => e.to_string(),
            ErrorKind::Custom(m) | ErrorKind::System(m) | ErrorKind::Fatal(m) => m.clone(),
        }
    }

    /// Returns the line of the failing token, or 0 if unknown.
    #[must_use]
    pub fn line(&self) -> usize {
        self.location.as_ref().map_or(0, |l| l.line)
    }

    /// Returns the source name of the failing token, or an empty string.
    #[must_use]
    pub fn file(&self) -> &str {
        self.location.as_ref().map_or("", |l| l.file.as_str())
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(Location { file, line }) => write!(f, "{file}:{line}: {}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for Exception {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl From<RuntimeError> for Exception {
    fn from(error: RuntimeError) -> Self {
        Self::new(ErrorKind::Runtime(error))
    }
}

impl From<ParseError> for Exception {
    fn from(error: ParseError) -> Self {
        Self::new(ErrorKind::Parse(error))
    }
}
