use std::ops::Range;

use logos::{Lexer, Logos, Skip};

/// Represents a lexical unit of Stutsk source.
///
/// The language decides what a token is from its first character only: a
/// quote starts a string, a bracket starts a nested literal, a dollar sign
/// starts a variable, `#` and `;` start comments, and everything else is a
/// whitespace-delimited word that the parser classifies afterwards.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
#[logos(error = LexError)]
pub enum Lexeme {
    /// A string literal with escapes already decoded.
    #[token("\"", lex_string)]
    String(String),
    /// The byte range (inside the lexed text) between `(` and its matching `)`.
    #[token("(", |lex| lex_nested(lex, b'(', b')'))]
    Array(Range<usize>),
    /// The byte range (inside the lexed text) between `{` and its matching `}`.
    #[token("{", |lex| lex_nested(lex, b'{', b'}'))]
    CodeBlock(Range<usize>),
    /// A `$name` variable reference.
    #[token("$", lex_variable)]
    Variable(String),
    /// Any other whitespace-delimited word.
    #[regex(r#"[^ \t\r\n\x0B\x0C"({$#;]"#, lex_word)]
    Word(String),
    /// `# comment` or `; comment`, up to the end of the line.
    #[token("#", skip_line)]
    #[token(";", skip_line)]
    Comment,
    /// Whitespace between tokens.
    #[regex(r"[ \t\r\n\x0B\x0C]+", logos::skip)]
    Ignored,
}

/// Additional information carried by the lexer during tokenization.
///
/// Nested literals are lexed as slices of their parent text; `base` is the
/// offset of the slice in the full source so that errors point at the right
/// position.
#[derive(Default)]
pub struct LexerExtras {
    /// Offset of the lexed text inside the full source buffer.
    pub base: usize,
}

/// Errors raised by the lexer callbacks.
///
/// Every variant records the absolute byte offset at which the problem was
/// detected; the parser turns it into a line number.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum LexError {
    /// No rule matched. Cannot happen for valid UTF-8 input.
    #[default]
    Unexpected,
    /// End of input inside a string literal.
    UnterminatedString {
        /// Where the input ended.
        offset: usize,
    },
    /// End of input before the closing bracket of a nested literal.
    UnterminatedNested {
        /// The closing bracket that was expected.
        close:  u8,
        /// Where the input ended.
        offset: usize,
    },
    /// Unsupported escape sequence.
    BadEscape {
        /// The character after the backslash.
        escape: char,
        /// Position of the backslash.
        offset: usize,
    },
    /// A variable name contained an illegal character.
    InvalidVariableCharacter {
        /// The illegal character.
        character: char,
        /// Position of the character.
        offset:    usize,
    },
}

const fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n' | 0x0B | 0x0C)
}

fn absolute(lex: &Lexer<Lexeme>, relative: usize) -> usize {
    lex.extras.base + lex.span().end + relative
}

/// Decodes a string literal whose opening quote was just matched.
fn lex_string(lex: &mut Lexer<Lexeme>) -> Result<String, LexError> {
    let remainder = lex.remainder();
    let mut decoded = String::new();
    let mut chars = remainder.char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '"' => {
                lex.bump(i + 1);
                return Ok(decoded);
            },
            '\\' => {
                let escape = match chars.next() {
                    Some((_, '\\')) => '\\',
                    Some((_, 'n')) => '\n',
                    Some((_, 'r')) => '\r',
                    Some((_, 't')) => '\t',
                    Some((_, '"')) => '"',
                    Some((_, other)) => {
                        return Err(LexError::BadEscape { escape: other,
                                                         offset: absolute(lex, i) });
                    },
                    None => break,
                };
                decoded.push(escape);
            },
            other => decoded.push(other),
        }
    }

    Err(LexError::UnterminatedString { offset: absolute(lex, remainder.len()) })
}

/// Finds the bracket matching the one just consumed.
///
/// Only brackets of the same kind are counted, and brackets inside quoted
/// strings are ignored.
fn lex_nested(lex: &mut Lexer<Lexeme>, open: u8, close: u8) -> Result<Range<usize>, LexError> {
    let start = lex.span().end;
    let bytes = lex.remainder().as_bytes();
    let mut depth = 1usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &byte) in bytes.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
        } else if byte == b'"' {
            in_string = true;
        } else if byte == open {
            depth += 1;
        } else if byte == close {
            depth -= 1;
            if depth == 0 {
                lex.bump(i + 1);
                return Ok(start..start + i);
            }
        }
    }

    let offset = absolute(lex, bytes.len());
    if in_string {
        Err(LexError::UnterminatedString { offset })
    } else {
        Err(LexError::UnterminatedNested { close, offset })
    }
}

/// Reads a variable name up to the next whitespace.
fn lex_variable(lex: &mut Lexer<Lexeme>) -> Result<String, LexError> {
    let remainder = lex.remainder();
    let end = remainder.bytes().position(is_space).unwrap_or(remainder.len());
    let name = &remainder[..end];

    if let Some((i, character)) =
        name.char_indices().find(|&(_, c)| !(c.is_ascii_alphanumeric() || c == '_'))
    {
        return Err(LexError::InvalidVariableCharacter { character,
                                                        offset: absolute(lex, i) });
    }

    let name = name.to_owned();
    lex.bump(end);
    Ok(name)
}

/// Extends a word from its first character to the next whitespace.
fn lex_word(lex: &mut Lexer<Lexeme>) -> String {
    let end = lex.remainder().bytes().position(is_space).unwrap_or(lex.remainder().len());
    lex.bump(end);
    lex.slice().to_owned()
}

/// Discards everything up to (not including) the next newline.
fn skip_line(lex: &mut Lexer<Lexeme>) -> Skip {
    let end = lex.remainder().find('\n').unwrap_or(lex.remainder().len());
    lex.bump(end);
    Skip
}
