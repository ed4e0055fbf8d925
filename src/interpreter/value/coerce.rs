use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
    util::num::{float_to_integer, format_float, integer_to_float, parse_float, parse_integer},
};

/// The "greatest common denominator" type of a value.
///
/// Arithmetic, comparisons and loose equality all reduce their operands to
/// one of these before doing anything else.
#[derive(Debug, Clone, PartialEq)]
pub enum Gcd {
    /// Integers, booleans and strings spelling an integer.
    Integer(i64),
    /// Floats and strings spelling a float.
    Float(f64),
    /// Strings that are not numbers.
    String(String),
    /// Everything else, including `NULL`.
    Invalid,
}

/// A numeric operand after GCD reduction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    /// An integer operand.
    Integer(i64),
    /// A float operand.
    Float(f64),
}

impl Numeric {
    /// Returns the operand as a float.
    #[must_use]
    pub const fn to_float(self) -> f64 {
        match self {
            Self::Integer(i) => integer_to_float(i),
            Self::Float(f) => f,
        }
    }

    /// Returns the operand as an integer, truncating floats.
    #[must_use]
    pub const fn to_integer(self) -> i64 {
        match self {
            Self::Integer(i) => i,
            Self::Float(f) => float_to_integer(f),
        }
    }
}

impl From<Numeric> for Value {
    fn from(n: Numeric) -> Self {
        match n {
            Numeric::Integer(i) => Self::Integer(i),
            Numeric::Float(f) => Self::Float(f),
        }
    }
}

impl Value {
    /// Classifies an already resolved value.
    ///
    /// # Example
    /// ```
    /// use stutsk::interpreter::value::{coerce::Gcd, core::Value};
    ///
    /// assert_eq!(Value::string("42").gcd(), Gcd::Integer(42));
    /// assert_eq!(Value::string("4.5").gcd(), Gcd::Float(4.5));
    /// assert_eq!(Value::string("abc").gcd(), Gcd::String("abc".into()));
    /// assert_eq!(Value::Bool(true).gcd(), Gcd::Integer(1));
    /// assert_eq!(Value::Empty.gcd(), Gcd::Invalid);
    /// ```
    #[must_use]
    pub fn gcd(&self) -> Gcd {
        match self {
            Self::Integer(i) => Gcd::Integer(*i),
            Self::Bool(b) => Gcd::Integer(i64::from(*b)),
            Self::Float(f) => Gcd::Float(*f),
            Self::String(s) => {
                let s = s.borrow();
                parse_integer(&s).map(Gcd::Integer)
                                 .or_else(|| parse_float(&s).map(Gcd::Float))
                                 .unwrap_or_else(|| Gcd::String(s.clone()))
            },
            _ => Gcd::Invalid,
        }
    }

    /// Reduces an already resolved value to a number.
    pub fn numeric(&self) -> EvalResult<Numeric> {
        match self.gcd() {
            Gcd::Integer(i) => Ok(Numeric::Integer(i)),
            Gcd::Float(f) => Ok(Numeric::Float(f)),
            Gcd::String(_) | Gcd::Invalid => Err(RuntimeError::NotNumeric),
        }
    }

    /// Converts the value to an integer.
    ///
    /// `NULL` is 0, floats truncate, and strings must spell a number in full.
    ///
    /// # Example
    /// ```
    /// use stutsk::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::string("12").as_integer().unwrap(), 12);
    /// assert_eq!(Value::string("2.7").as_integer().unwrap(), 2);
    /// assert_eq!(Value::Empty.as_integer().unwrap(), 0);
    /// assert!(Value::string("12 apples").as_integer().is_err());
    /// ```
    pub fn as_integer(&self) -> EvalResult<i64> {
        match self {
            Self::Empty => Ok(0),
            Self::Integer(i) => Ok(*i),
            Self::Bool(b) => Ok(i64::from(*b)),
            Self::Float(f) => Ok(float_to_integer(*f)),
            Self::String(s) => {
                let s = s.borrow();
                parse_integer(&s).or_else(|| parse_float(&s).map(float_to_integer))
                                 .ok_or_else(|| self.conversion("T_INTEGER"))
            },
            _ => Err(self.conversion("T_INTEGER")),
        }
    }

    /// Converts the value to a float.
    pub fn as_float(&self) -> EvalResult<f64> {
        match self {
            Self::Empty => Ok(0.0),
            Self::Integer(i) => Ok(integer_to_float(*i)),
            Self::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Self::Float(f) => Ok(*f),
            Self::String(s) => {
                let s = s.borrow();
                parse_integer(&s).map(integer_to_float)
                                 .or_else(|| parse_float(&s))
                                 .ok_or_else(|| self.conversion("T_FLOAT"))
            },
            _ => Err(self.conversion("T_FLOAT")),
        }
    }

    /// Converts the value to its textual form.
    ///
    /// # Example
    /// ```
    /// use stutsk::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Bool(true).as_string().unwrap(), "TRUE");
    /// assert_eq!(Value::Float(2.0).as_string().unwrap(), "2");
    /// assert_eq!(Value::Empty.as_string().unwrap(), "");
    /// ```
    pub fn as_string(&self) -> EvalResult<String> {
        match self {
            Self::Empty => Ok(String::new()),
            Self::Integer(i) => Ok(i.to_string()),
            Self::Bool(b) => Ok(if *b { "TRUE" } else { "FALSE" }.to_owned()),
            Self::Float(f) => Ok(format_float(*f)),
            Self::String(s) => Ok(s.borrow().clone()),
            _ => Err(self.conversion("T_STRING")),
        }
    }

    /// Converts the value to a boolean.
    ///
    /// Numbers are true when non-zero, strings when non-empty.
    pub fn as_bool(&self) -> EvalResult<bool> {
        match self {
            Self::Empty => Ok(false),
            Self::Integer(i) => Ok(*i != 0),
            Self::Bool(b) => Ok(*b),
            Self::Float(f) => Ok(*f != 0.0),
            Self::String(s) => Ok(!s.borrow().is_empty()),
            _ => Err(self.conversion("T_BOOL")),
        }
    }

    const fn conversion(&self, to: &'static str) -> RuntimeError {
        RuntimeError::TypeConversion { from: self.type_name(),
                                       to }
    }

    /// Returns element `index` of an array or character `index` of a string.
    ///
    /// # Example
    /// ```
    /// use stutsk::interpreter::value::core::Value;
    ///
    /// let word = Value::string("abc");
    /// assert_eq!(word.nth(1).unwrap(), Value::string("b"));
    /// assert!(word.nth(3).is_err());
    /// assert!(Value::Integer(5).nth(0).is_err());
    /// ```
    pub fn nth(&self, index: i64) -> EvalResult<Self> {
        match self {
            Self::String(s) => {
                let s = s.borrow();
                let position = checked_index(index, s.chars().count(), "String")?;
                Ok(s.chars()
                    .nth(position)
                    .map_or_else(|| Self::string(""), |c| Self::string(c)))
            },
            Self::Array(items) => {
                let items = items.borrow();
                let position = checked_index(index, items.len(), "Array")?;
                Ok(items[position].clone())
            },
            _ => Err(RuntimeError::NotIndexable),
        }
    }
}

/// Validates `index` against a container of `len` elements.
pub fn checked_index(index: i64, len: usize, container: &'static str) -> EvalResult<usize> {
    let position = usize::try_from(index).map_err(|_| RuntimeError::IndexUnderflow { container })?;
    if position >= len {
        return Err(RuntimeError::IndexOverflow { container });
    }
    Ok(position)
}
