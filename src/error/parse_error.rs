use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Represents all errors that can occur during lexing or parsing.
pub enum ParseError {
    /// The scanner found input it has no rule for.
    #[error("Unexpected input")]
    UnexpectedInput {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A string literal has no closing quote.
    #[error("Unterminated string")]
    UnterminatedString {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An array literal has no matching `)`.
    #[error("Unterminated array")]
    UnterminatedArray {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A code block literal has no matching `}`.
    #[error("Unterminated codeblock")]
    UnterminatedCodeBlock {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A backslash inside a string was followed by an unsupported character.
    #[error("Bad escape sequence \"\\{escape}\"")]
    BadEscape {
        /// The character following the backslash.
        escape: char,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// A variable name contained something other than letters, digits and
    /// underscores.
    #[error("Invalid character '{character}' in variable name")]
    InvalidVariableCharacter {
        /// The offending character.
        character: char,
        /// The source line where the error occurred.
        line:      usize,
    },
}

impl ParseError {
    /// Returns the line the error was detected on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnexpectedInput { line }
            | Self::UnterminatedString { line }
            | Self::UnterminatedArray { line }
            | Self::UnterminatedCodeBlock { line }
            | Self::BadEscape { line, .. }
            | Self::InvalidVariableCharacter { line, .. } => *line,
        }
    }
}
