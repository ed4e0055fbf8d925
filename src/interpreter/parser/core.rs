use logos::Logos;

use crate::{
    ast::{DebugInfo, Node, Operator, Token},
    error::ParseError,
    interpreter::{
        lexer::{LexError, Lexeme, LexerExtras},
        source::{SourceFile, SourceId},
        value::core::Value,
    },
    util::{
        num::{parse_float, parse_integer},
        stack::ensure_sufficient_stack,
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a complete source buffer into tokens.
///
/// This is the entry point for parsing. Array and code block literals are
/// parsed recursively into nested token sequences; every token records its
/// position in `file`.
///
/// # Parameters
/// - `file`: The registered source text.
/// - `source`: The id `file` was registered under, stored in every token.
///
/// # Returns
/// The top-level tokens of the program.
///
/// # Example
/// ```
/// use stutsk::{
///     ast::{Node, Operator},
///     interpreter::{parser::core::parse_source, source::SourceMap, value::core::Value},
/// };
///
/// let mut sources = SourceMap::default();
/// let id = sources.add("demo", "2 3 +\n( 1 )");
/// let tokens = parse_source(sources.get(id).unwrap(), id).unwrap();
///
/// assert_eq!(tokens.len(), 4);
/// assert_eq!(tokens[2].node, Node::Value(Value::Operator(Operator::Plus)));
/// assert!(matches!(tokens[3].node, Node::Array(_)));
/// assert_eq!((tokens[3].debug.line, tokens[3].debug.column), (2, 1));
/// ```
pub fn parse_source(file: &SourceFile, source: SourceId) -> ParseResult<Vec<Token>> {
    Parser { file, source }.parse_range(0, file.text().len())
}

/// Classifies a bare word.
///
/// Words are checked in order: boolean and `NULL` literals, operator
/// symbols, integer literals, float literals. Anything else is a function
/// call.
///
/// # Example
/// ```
/// use stutsk::{
///     ast::Operator,
///     interpreter::{parser::core::classify, value::core::Value},
/// };
///
/// assert_eq!(classify("TRUE"), Value::Bool(true));
/// assert_eq!(classify("-"), Value::Operator(Operator::Minus));
/// assert_eq!(classify("-3"), Value::Integer(-3));
/// assert_eq!(classify("2.5"), Value::Float(2.5));
/// assert_eq!(classify("print"), Value::call("print"));
/// ```
#[must_use]
pub fn classify(word: &str) -> Value {
    match word {
        "TRUE" => Value::Bool(true),
        "FALSE" => Value::Bool(false),
        "NULL" => Value::Empty,
        _ => Operator::from_symbol(word).map(Value::Operator)
                                        .or_else(|| parse_integer(word).map(Value::Integer))
                                        .or_else(|| parse_float(word).map(Value::Float))
                                        .unwrap_or_else(|| Value::call(word)),
    }
}

struct Parser<'a> {
    file:   &'a SourceFile,
    source: SourceId,
}

impl Parser<'_> {
    /// Parses the bytes `start..end` of the source text.
    fn parse_range(&self, start: usize, end: usize) -> ParseResult<Vec<Token>> {
        ensure_sufficient_stack(|| self.parse_slice(start, end))
    }

    fn parse_slice(&self, base: usize, end: usize) -> ParseResult<Vec<Token>> {
        let text = self.file.text().get(base..end).unwrap_or_default();
        let mut tokens = Vec::new();

        for (lexeme, span) in Lexeme::lexer_with_extras(text, LexerExtras { base }).spanned() {
            let start = base + span.start;
            let lexeme = lexeme.map_err(|e| self.error(e, start))?;

            let node = match lexeme {
                Lexeme::String(text) => Node::Value(Value::string(text)),
                Lexeme::Variable(name) => Node::Value(Value::variable(name)),
                Lexeme::Word(word) => Node::Value(classify(&word)),
                Lexeme::Array(inner) => {
                    Node::Array(self.parse_range(base + inner.start, base + inner.end)?.into())
                },
                Lexeme::CodeBlock(inner) => {
                    let tokens = self.parse_range(base + inner.start, base + inner.end)?;
                    Node::Value(Value::code_block(tokens))
                },
                Lexeme::Comment | Lexeme::Ignored => continue,
            };
            tokens.push(Token { node,
                                debug: self.debug_info(start, span.len()) });
        }

        Ok(tokens)
    }

    fn debug_info(&self, offset: usize, length: usize) -> DebugInfo {
        let (line, column) = self.file.position(offset);
        DebugInfo { source: self.source,
                    line,
                    column,
                    offset,
                    length }
    }

    fn line(&self, offset: usize) -> usize {
        self.file.position(offset).0
    }

    /// Converts a lexer error into a parse error. Unterminated literals are
    /// reported on the line where they start.
    fn error(&self, error: LexError, start: usize) -> ParseError {
        match error {
            LexError::Unexpected => ParseError::UnexpectedInput { line: self.line(start) },
            LexError::UnterminatedString { .. } => {
                ParseError::UnterminatedString { line: self.line(start) }
            },
            LexError::UnterminatedNested { close: b')', .. } => {
                ParseError::UnterminatedArray { line: self.line(start) }
            },
            LexError::UnterminatedNested { .. } => {
                ParseError::UnterminatedCodeBlock { line: self.line(start) }
            },
            LexError::BadEscape { escape, offset } => {
                ParseError::BadEscape { escape,
                                        line: self.line(offset) }
            },
            LexError::InvalidVariableCharacter { character, offset } => {
                ParseError::InvalidVariableCharacter { character,
                                                       line: self.line(offset) }
            },
        }
    }
}
