use std::cmp::Ordering;

use rand::Rng;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            context::ContextId,
            core::{EvalResult, Exec, Interpreter},
        },
        value::{coerce::Numeric, compare::numeric_compare, core::Value},
    },
    util::num::float_to_integer,
};

/// Digits used by `from_base` and `to_base`.
const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Applies a rounding function and pushes the result as an integer.
///
/// # Parameters
/// - `round`: Maps the operand to an integral float.
pub fn rounding(interpreter: &mut Interpreter, round: fn(f64) -> f64) -> Exec<()> {
    let value = interpreter.pop_float()?;
    interpreter.push(float_to_integer(round(value)));
    Ok(())
}

/// Applies `f` to the operand as a float and pushes the float result.
pub fn float_fn(interpreter: &mut Interpreter, f: fn(f64) -> f64) -> Exec<()> {
    let value = interpreter.pop_float()?;
    interpreter.push(f(value));
    Ok(())
}

/// Pushes a float constant.
pub fn constant(interpreter: &mut Interpreter, value: f64) -> Exec<()> {
    interpreter.push(value);
    Ok(())
}

/// Pushes the absolute value, keeping integers as integers.
pub fn abs(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let result = match interpreter.pop_resolved()?.numeric()? {
        Numeric::Integer(i) => Value::Integer(i.wrapping_abs()),
        Numeric::Float(f) => Value::Float(f.abs()),
    };
    interpreter.push(result);
    Ok(())
}

/// Pushes the element of a numeric array that compares as `wanted` against
/// every other element: `Greater` finds the maximum, `Less` the minimum.
/// The first of several equal extremes wins.
///
/// # Example
/// ```
/// use stutsk::interpreter::{evaluator::core::Interpreter, value::core::Value};
///
/// let mut interpreter = Interpreter::new();
/// interpreter.execute("<doc>", "( 3 7.5 \"2\" ) max ( 3 7.5 \"2\" ) min").unwrap();
///
/// assert_eq!(interpreter.stack(), &[Value::Float(7.5), Value::string("2")]);
/// ```
pub fn extreme(interpreter: &mut Interpreter, wanted: Ordering) -> Exec<()> {
    let Value::Array(items) = interpreter.pop_resolved()? else {
        return Err(RuntimeError::ExpectedArray.into());
    };
    let items = items.borrow().clone();
    let Some((first, rest)) = items.split_first() else {
        return Err(RuntimeError::invalid("Array is empty.").into());
    };

    let mut best = first;
    for item in rest {
        if numeric_compare(&*interpreter, item, best)? == wanted {
            best = item;
        }
    }
    let best = interpreter.resolve(best)?.deep_copy();
    interpreter.push(best);
    Ok(())
}

fn check_base(base: i64) -> EvalResult<u32> {
    if base < 2 {
        return Err(RuntimeError::invalid("Base must be higher than or equal to 2."));
    }
    u32::try_from(base).ok()
                       .filter(|&b| b <= 36)
                       .ok_or_else(|| RuntimeError::invalid("Base cannot be higher than 36."))
}

/// `"text" base from_base` parses `text` as a number in `base`.
///
/// # Example
/// ```
/// use stutsk::interpreter::{evaluator::core::Interpreter, value::core::Value};
///
/// let mut interpreter = Interpreter::new();
/// interpreter.execute("<doc>", "\"ff\" 16 from_base \"-101\" 2 from_base").unwrap();
///
/// assert_eq!(interpreter.stack(), &[Value::Integer(255), Value::Integer(-5)]);
/// ```
pub fn from_base(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let base = check_base(interpreter.pop_integer()?)?;
    let text = interpreter.pop_string()?;
    if text.is_empty() {
        return Err(RuntimeError::invalid("String is empty.").into());
    }

    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.as_str()),
    };
    let mut result: i64 = 0;
    for c in digits.chars() {
        let digit = c.to_digit(base)
                     .ok_or_else(|| RuntimeError::invalid("Invalid char in numeric string."))?;
        result = result.wrapping_mul(i64::from(base)).wrapping_add(i64::from(digit));
    }
    interpreter.push(if negative { result.wrapping_neg() } else { result });
    Ok(())
}

/// `number base to_base` formats `number` in `base` with lowercase digits.
pub fn to_base(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let base = u64::from(check_base(interpreter.pop_integer()?)?);
    let number = interpreter.pop_integer()?;

    let mut magnitude = number.unsigned_abs();
    let mut digits = Vec::new();
    loop {
        let digit = usize::try_from(magnitude % base).unwrap_or(0);
        digits.push(DIGITS[digit]);
        magnitude /= base;
        if magnitude == 0 {
            break;
        }
    }
    if number < 0 {
        digits.push(b'-');
    }
    digits.reverse();
    interpreter.push(String::from_utf8_lossy(&digits).into_owned());
    Ok(())
}

/// `n random` pushes an integer in `[0, n)`; `( min max ) random` one in
/// `[min, max]`.
pub fn random(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let mut rng = rand::thread_rng();
    let number = match interpreter.pop_resolved()? {
        Value::Array(bounds) => {
            let bounds = bounds.borrow();
            let [min, max] = bounds.as_slice() else {
                return Err(RuntimeError::invalid("Invalid array length").into());
            };
            let (min, max) = (interpreter.resolve(min)?.as_integer()?,
                              interpreter.resolve(max)?.as_integer()?);
            if min > max {
                return Err(RuntimeError::invalid("Upper bound must be higher than lower bound").into());
            }
            rng.gen_range(min..=max)
        },
        other => {
            let max = other.as_integer()?;
            if max < 1 {
                return Err(RuntimeError::invalid("Number must be positive").into());
            }
            rng.gen_range(0..max)
        },
    };
    interpreter.push(number);
    Ok(())
}

/// Pushes a float in `[0, 1)`.
pub fn random_float(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let value: f64 = rand::thread_rng().r#gen();
    interpreter.push(value);
    Ok(())
}
