use std::{cmp::Ordering, rc::Rc};

use ordered_float::OrderedFloat;

use crate::{
    ast::{Node, Token},
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{
            coerce::{Gcd, Numeric},
            core::Value,
        },
    },
    util::num::integer_to_float,
};

/// Turns variable references into the values they point at.
///
/// Equality and ordering need concrete values, but only the interpreter knows
/// where variables live; this trait is the seam between the two.
pub trait Resolve {
    /// Fully resolves `value`, following variable chains and index paths.
    /// Non-variable values are returned unchanged.
    fn resolve(&self, value: &Value) -> EvalResult<Value>;
}

/// A resolver for values that never contain variables.
///
/// Resolving a variable through it fails with `UndefinedVariable`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Detached;

impl Resolve for Detached {
    fn resolve(&self, value: &Value) -> EvalResult<Value> {
        match value {
            Value::Variable(var) => {
                Err(RuntimeError::UndefinedVariable { name: var.name.to_string() })
            },
            other => Ok(other.clone()),
        }
    }
}

fn order(lower: Numeric, upper: Numeric) -> Ordering {
    match (lower, upper) {
        (Numeric::Integer(a), Numeric::Integer(b)) => a.cmp(&b),
        (a, b) => OrderedFloat(a.to_float()).cmp(&OrderedFloat(b.to_float())),
    }
}

/// Compares two values numerically.
///
/// The result describes `lower` relative to `upper`, so `a b <` holds when
/// this returns `Ordering::Less` for `(a, b)`.
///
/// # Example
/// ```
/// use std::cmp::Ordering;
///
/// use stutsk::interpreter::value::{
///     compare::{Detached, numeric_compare},
///     core::Value,
/// };
///
/// let ord = numeric_compare(&Detached, &Value::Integer(2), &Value::Float(2.5)).unwrap();
/// assert_eq!(ord, Ordering::Less);
///
/// let ord = numeric_compare(&Detached, &Value::string("10"), &Value::Integer(9)).unwrap();
/// assert_eq!(ord, Ordering::Greater);
///
/// assert!(numeric_compare(&Detached, &Value::string("abc"), &Value::Integer(1)).is_err());
/// ```
pub fn numeric_compare(resolver: &impl Resolve,
                       lower: &Value,
                       upper: &Value)
                       -> EvalResult<Ordering> {
    let lower = resolver.resolve(lower)?.numeric()?;
    let upper = resolver.resolve(upper)?.numeric()?;
    Ok(order(lower, upper))
}

/// Coercing equality, as used by `==`, `!=`, `switch` and `array_find`.
///
/// Scalars are reduced to their GCD type; if either side is a non-numeric
/// string, both are compared as strings. Non-scalar values compare
/// structurally and must have the same type.
///
/// # Example
/// ```
/// use stutsk::interpreter::value::{
///     compare::{Detached, loose_equal},
///     core::Value,
/// };
///
/// assert!(loose_equal(&Detached, &Value::Integer(1), &Value::string("1")).unwrap());
/// assert!(loose_equal(&Detached, &Value::Integer(2), &Value::Float(2.0)).unwrap());
/// assert!(loose_equal(&Detached, &Value::Bool(true), &Value::string("TRUE")).unwrap());
/// assert!(loose_equal(&Detached, &Value::Integer(1), &Value::array(vec![])).is_err());
/// ```
pub fn loose_equal(resolver: &impl Resolve, left: &Value, right: &Value) -> EvalResult<bool> {
    let left = resolver.resolve(left)?;
    let right = resolver.resolve(right)?;

    match (left.gcd(), right.gcd()) {
        (Gcd::String(l), _) => Ok(l == right.as_string()?),
        (_, Gcd::String(r)) => Ok(left.as_string()? == r),
        (Gcd::Integer(l), Gcd::Integer(r)) => Ok(l == r),
        (Gcd::Integer(i), Gcd::Float(f)) | (Gcd::Float(f), Gcd::Integer(i)) => {
            Ok(integer_to_float(i) == f)
        },
        (Gcd::Float(l), Gcd::Float(r)) => Ok(l == r),
        (Gcd::Invalid, Gcd::Invalid) => structural_equal(resolver, &left, &right),
        _ => Err(RuntimeError::NotComparable),
    }
}

fn structural_equal(resolver: &impl Resolve, left: &Value, right: &Value) -> EvalResult<bool> {
    match (left, right) {
        (Value::Empty, Value::Empty) => Ok(true),
        (Value::Operator(a), Value::Operator(b)) => Ok(a == b),
        (Value::FunctionCall(a), Value::FunctionCall(b)) => Ok(a == b),
        (Value::Array(a), Value::Array(b)) => {
            if Rc::ptr_eq(a, b) {
                return Ok(true);
            }
            let (a, b) = (a.borrow().clone(), b.borrow().clone());
            if a.len() != b.len() {
                return Ok(false);
            }
            for (x, y) in a.iter().zip(&b) {
                if !loose_equal(resolver, x, y)? {
                    return Ok(false);
                }
            }
            Ok(true)
        },
        (Value::CodeBlock(a), Value::CodeBlock(b)) => Ok(same_tokens(a, b)),
        (Value::Dictionary(a), Value::Dictionary(b)) => Ok(Rc::ptr_eq(a, b)),
        (Value::Handle(a), Value::Handle(b)) => Ok(a == b),
        _ => Err(RuntimeError::NotComparable),
    }
}

/// Tag-exact equality, as used by `===`.
///
/// No coercion takes place, except that integers and booleans compare by
/// their integer value. Variables are equal when they name the same binding,
/// not when their values match.
///
/// # Example
/// ```
/// use stutsk::interpreter::value::{compare::strict_equal, core::Value};
///
/// assert!(!strict_equal(&Value::Integer(1), &Value::string("1")));
/// assert!(strict_equal(&Value::Integer(1), &Value::Bool(true)));
/// assert!(!strict_equal(&Value::Integer(1), &Value::Float(1.0)));
/// ```
#[must_use]
pub fn strict_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Empty, Value::Empty) => true,
        (Value::Operator(a), Value::Operator(b)) => a == b,
        (Value::FunctionCall(a), Value::FunctionCall(b)) => a == b,
        (Value::Variable(a), Value::Variable(b)) => a == b,
        (Value::Integer(a), Value::Integer(b)) => a == b,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Integer(i), Value::Bool(b)) | (Value::Bool(b), Value::Integer(i)) => {
            *i == i64::from(*b)
        },
        (Value::Float(a), Value::Float(b)) => a == b,
        (Value::String(a), Value::String(b)) => *a.borrow() == *b.borrow(),
        (Value::Array(a), Value::Array(b)) => {
            Rc::ptr_eq(a, b) || {
                let (a, b) = (a.borrow(), b.borrow());
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| strict_equal(x, y))
            }
        },
        (Value::CodeBlock(a), Value::CodeBlock(b)) => same_tokens(a, b),
        (Value::Dictionary(a), Value::Dictionary(b)) => Rc::ptr_eq(a, b),
        (Value::Handle(a), Value::Handle(b)) => a == b,
        _ => false,
    }
}

fn same_tokens(a: &[Token], b: &[Token]) -> bool {
    a.len() == b.len()
    && a.iter().zip(b).all(|(x, y)| match (&x.node, &y.node) {
                          (Node::Value(x), Node::Value(y)) => strict_equal(x, y),
                          (Node::Array(x), Node::Array(y)) => same_tokens(x, y),
                          _ => false,
                      })
}
