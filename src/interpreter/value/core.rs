use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

use crate::{
    ast::{Block, Operator, Token},
    interpreter::evaluator::context::ContextId,
};

/// Shared, mutable string storage.
pub type StringRef = Rc<RefCell<String>>;
/// Shared, mutable array storage.
pub type ArrayRef = Rc<RefCell<Vec<Value>>>;
/// Shared, mutable dictionary storage, ordered by key.
pub type DictionaryRef = Rc<RefCell<BTreeMap<String, Value>>>;

/// Opaque reference to an external resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    /// Identity of the resource.
    pub id:   u64,
    /// Size tag reported by the resource owner.
    pub size: i64,
}

/// A reference to a named variable.
///
/// Parsed variables are unbound; the evaluator binds them to a context when
/// they are pushed. Indexing a variable with `[]` extends `index` instead of
/// reading the value, so that the reference can later be assigned through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    /// The variable name, after static-scope mangling.
    pub name:    Rc<str>,
    /// The context owning the binding.
    pub context: Option<ContextId>,
    /// Element offsets applied after the variable is resolved.
    pub index:   Vec<i64>,
}

/// Represents a runtime value in the interpreter.
///
/// Values are both the data on the operand stack and the payload of parsed
/// tokens: operators and function calls are values too, which is what lets
/// code blocks be treated as data.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `NULL`.
    Empty,
    /// An operator, either executed or carried inside a code block.
    Operator(Operator),
    /// A call to a user-defined or builtin function.
    FunctionCall(Rc<str>),
    /// An unresolved variable reference.
    Variable(Box<Variable>),
    /// A 64-bit signed integer.
    Integer(i64),
    /// `TRUE` or `FALSE`.
    Bool(bool),
    /// A double precision float.
    Float(f64),
    /// A mutable string. Copied on assignment.
    String(StringRef),
    /// Immutable code. Shared, never copied.
    CodeBlock(Block),
    /// A mutable array. Copied on assignment.
    Array(ArrayRef),
    /// A string-keyed map. Shared between every value that refers to it.
    Dictionary(DictionaryRef),
    /// An external resource.
    Handle(Handle),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::string(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::string(v)
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::array(v)
    }
}

impl Value {
    /// Creates a fresh string value.
    pub fn string(text: impl Into<String>) -> Self {
        Self::String(Rc::new(RefCell::new(text.into())))
    }

    /// Creates a fresh array value.
    #[must_use]
    pub fn array(elements: Vec<Self>) -> Self {
        Self::Array(Rc::new(RefCell::new(elements)))
    }

    /// Creates a new, empty dictionary.
    #[must_use]
    pub fn dictionary() -> Self {
        Self::Dictionary(Rc::new(RefCell::new(BTreeMap::new())))
    }

    /// Creates a code block from already parsed tokens.
    #[must_use]
    pub fn code_block(tokens: Vec<Token>) -> Self {
        Self::CodeBlock(tokens.into())
    }

    /// Creates an unbound variable reference.
    pub fn variable(name: impl Into<Rc<str>>) -> Self {
        Self::Variable(Box::new(Variable { name:    name.into(),
                                           context: None,
                                           index:   Vec::new(), }))
    }

    /// Creates a function call value.
    pub fn call(name: impl Into<Rc<str>>) -> Self {
        Self::FunctionCall(name.into())
    }

    /// Returns the type tag used by `__type` and the debug dumps.
    ///
    /// # Example
    /// ```
    /// use stutsk::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Integer(3).type_name(), "T_INTEGER");
    /// assert_eq!(Value::string("x").type_name(), "T_STRING");
    /// ```
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Empty => "T_EMPTY",
            Self::Operator(_) => "T_OPERATOR",
            Self::FunctionCall(_) => "T_FUNCCALL",
            Self::Variable(_) => "T_VARIABLE",
            Self::Integer(_) => "T_INTEGER",
            Self::Bool(_) => "T_BOOL",
            Self::Float(_) => "T_FLOAT",
            Self::String(_) => "T_STRING",
            Self::CodeBlock(_) => "T_CODEBLOCK",
            Self::Array(_) => "T_ARRAY",
            Self::Dictionary(_) => "T_DICTIONARY",
            Self::Handle(_) => "T_HANDLE",
        }
    }

    /// Returns an independent copy of the value.
    ///
    /// Strings and arrays (recursively) get new storage so that mutating the
    /// copy never affects the original. Code blocks, dictionaries and
    /// scalars are returned as they are.
    ///
    /// # Example
    /// ```
    /// use stutsk::interpreter::value::core::Value;
    ///
    /// let original = Value::array(vec![Value::Integer(1), Value::string("a")]);
    /// let copy = original.deep_copy();
    ///
    /// if let Value::Array(items) = &copy {
    ///     items.borrow_mut().push(Value::Integer(2));
    /// }
    ///
    /// assert_eq!(original, Value::array(vec![Value::Integer(1), Value::string("a")]));
    /// ```
    #[must_use]
    pub fn deep_copy(&self) -> Self {
        match self {
            Self::String(s) => Self::string(s.borrow().as_str()),
            Self::Array(items) => Self::array(items.borrow().iter().map(Self::deep_copy).collect()),
            other => other.clone(),
        }
    }

    /// Returns `true` if the value is an unresolved variable reference.
    #[must_use]
    pub const fn is_variable(&self) -> bool {
        matches!(self, Self::Variable(_))
    }
}
