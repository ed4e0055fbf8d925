use std::{fmt, rc::Rc};

use crate::interpreter::{source::SourceId, value::core::Value};

/// Every operator keyword or symbol the language recognizes.
///
/// Operators are resolved at parse time: a word that matches one of the
/// symbols below becomes a `Value::Operator` instead of a function call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `=`
    Assign,
    /// `&=`
    AssignRef,
    /// `@`
    Deref,
    /// `++`
    Increment,
    /// `--`
    Decrement,
    /// `==`
    Equal,
    /// `===`
    Same,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
    /// `||`
    Or,
    /// `&&`
    And,
    /// `!`
    Not,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `^`
    Power,
    /// `div`
    IntDivide,
    /// `%`
    Modulo,
    /// `?`
    Ternary,
    /// `.`
    Concat,
    /// `[]`
    Index,
    /// `if`
    If,
    /// `ifelse`
    IfElse,
    /// `repeat`
    Repeat,
    /// `forever`
    Forever,
    /// `foreach`
    Foreach,
    /// `switch`
    Switch,
    /// `break`
    Break,
    /// `continue`
    Continue,
    /// `exit`
    Exit,
    /// `halt`
    Halt,
    /// `global`
    Global,
    /// `auto`
    Auto,
    /// `static`
    Static,
    /// `function`
    Function,
    /// `unset`
    Unset,
    /// `try`
    Try,
    /// `throw`
    Throw,
}

const OPERATORS: &[(&str, Operator)] = &[("=", Operator::Assign),
                                         ("&=", Operator::AssignRef),
                                         ("@", Operator::Deref),
                                         ("++", Operator::Increment),
                                         ("--", Operator::Decrement),
                                         ("==", Operator::Equal),
                                         ("===", Operator::Same),
                                         ("!=", Operator::NotEqual),
                                         ("<", Operator::Less),
                                         (">", Operator::Greater),
                                         ("<=", Operator::LessEqual),
                                         (">=", Operator::GreaterEqual),
                                         ("||", Operator::Or),
                                         ("&&", Operator::And),
                                         ("!", Operator::Not),
                                         ("+", Operator::Plus),
                                         ("-", Operator::Minus),
                                         ("*", Operator::Multiply),
                                         ("/", Operator::Divide),
                                         ("^", Operator::Power),
                                         ("div", Operator::IntDivide),
                                         ("%", Operator::Modulo),
                                         ("?", Operator::Ternary),
                                         (".", Operator::Concat),
                                         ("[]", Operator::Index),
                                         ("if", Operator::If),
                                         ("ifelse", Operator::IfElse),
                                         ("repeat", Operator::Repeat),
                                         ("forever", Operator::Forever),
                                         ("foreach", Operator::Foreach),
                                         ("switch", Operator::Switch),
                                         ("break", Operator::Break),
                                         ("continue", Operator::Continue),
                                         ("exit", Operator::Exit),
                                         ("halt", Operator::Halt),
                                         ("global", Operator::Global),
                                         ("auto", Operator::Auto),
                                         ("static", Operator::Static),
                                         ("function", Operator::Function),
                                         ("unset", Operator::Unset),
                                         ("try", Operator::Try),
                                         ("throw", Operator::Throw)];

impl Operator {
    /// Looks up the operator spelled by `symbol`.
    ///
    /// # Example
    /// ```
    /// use stutsk::ast::Operator;
    ///
    /// assert_eq!(Operator::from_symbol("ifelse"), Some(Operator::IfElse));
    /// assert_eq!(Operator::from_symbol("print"), None);
    /// ```
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        OPERATORS.iter()
                 .find(|(spelling, _)| *spelling == symbol)
                 .map(|&(_, op)| op)
    }

    /// Returns the source spelling of the operator.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        OPERATORS.iter()
                 .find(|(_, op)| *op == self)
                 .map_or("", |&(spelling, _)| spelling)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Where a token came from.
///
/// `line` and `column` are 1-based, `offset` and `length` are byte positions
/// in the text of the source identified by `source`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebugInfo {
    /// Registry id of the source text.
    pub source: SourceId,
    /// Line of the first character.
    pub line:   usize,
    /// Column of the first character.
    pub column: usize,
    /// Byte offset of the first character.
    pub offset: usize,
    /// Length of the token in bytes.
    pub length: usize,
}

/// What a parsed token does when the evaluator reaches it.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Push (or, for operators and function calls, execute) a value.
    Value(Value),
    /// Run the inner tokens and collect everything they push into an array.
    Array(Block),
}

/// A parsed token together with its source position.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The token payload.
    pub node:  Node,
    /// Position of the token in its source.
    pub debug: DebugInfo,
}

/// An immutable, shareable sequence of parsed tokens.
///
/// Program text, function bodies and code block literals are all blocks.
pub type Block = Rc<[Token]>;

impl Token {
    /// Creates a value token without position information.
    #[must_use]
    pub fn value(value: Value) -> Self {
        Self { node:  Node::Value(value),
               debug: DebugInfo::default(), }
    }

    /// Returns the value carried by the token, if it is not an array literal.
    #[must_use]
    pub const fn as_value(&self) -> Option<&Value> {
        match &self.node {
            Node::Value(value) => Some(value),
            Node::Array(_) => None,
        }
    }
}
