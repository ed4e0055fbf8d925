use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            context::ContextId,
            core::{EvalResult, Exec, Interpreter},
        },
        value::{coerce::checked_index, core::Value},
    },
    util::num::usize_to_integer,
};

/// Pushes the number of elements of an array or dictionary, or the number
/// of characters in the string form of anything else.
pub fn length(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let length = match interpreter.pop_resolved()? {
        Value::Array(items) => items.borrow().len(),
        Value::Dictionary(entries) => entries.borrow().len(),
        other => other.as_string()?.chars().count(),
    };
    interpreter.push(usize_to_integer(length));
    Ok(())
}

/// `n value setlength` resizes an array or a string in place.
///
/// Arrays are padded with `NULL` and strings with `\0`. Other values are
/// converted to a string first. When `value` is a variable nothing is
/// pushed; otherwise the resized value is.
///
/// # Example
/// ```
/// use stutsk::interpreter::{evaluator::core::Interpreter, value::core::Value};
///
/// let mut interpreter = Interpreter::new();
/// interpreter.execute("<doc>", "2 ( 1 2 3 ) setlength 4 \"ab\" setlength").unwrap();
///
/// assert_eq!(interpreter.stack(),
///            &[Value::array(vec![Value::Integer(1), Value::Integer(2)]),
///              Value::string("ab\0\0")]);
/// ```
pub fn set_length(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let operand = interpreter.pop()?;
    let length = interpreter.pop_integer()?;
    let length = usize::try_from(length).map_err(|_| RuntimeError::invalid("Length cannot be negative"))?;

    let resized = match interpreter.resolve(&operand)? {
        Value::Array(items) => {
            {
                let mut items = items.borrow_mut();
                let grow = length.saturating_sub(items.len());
                items.try_reserve_exact(grow).map_err(|_| too_large())?;
                items.resize(length, Value::Empty);
            }
            Value::Array(items)
        },
        Value::String(text) => {
            resize_string(&mut text.borrow_mut(), length)?;
            Value::String(text)
        },
        other => {
            let mut text = other.as_string()?;
            resize_string(&mut text, length)?;
            Value::string(text)
        },
    };

    match operand {
        Value::Variable(var) if !matches!(resized, Value::Array(_) | Value::String(_)) => {
            Ok(interpreter.assign(&var, resized, true)?)
        },
        Value::Variable(_) => Ok(()),
        _ => {
            interpreter.push(resized);
            Ok(())
        },
    }
}

fn too_large() -> RuntimeError {
    RuntimeError::invalid("Length is too large")
}

fn resize_string(text: &mut String, length: usize) -> EvalResult<()> {
    let count = text.chars().count();
    if length < count {
        let end = text.char_indices().nth(length).map_or(text.len(), |(i, _)| i);
        text.truncate(end);
    } else {
        text.try_reserve_exact(length - count).map_err(|_| too_large())?;
        text.extend(std::iter::repeat_n('\0', length - count));
    }
    Ok(())
}

/// `value start end slice` pushes the elements (or characters) from `start`
/// to `end`, both inclusive.
pub fn slice(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let end = interpreter.pop_integer()?;
    let start = interpreter.pop_integer()?;

    let sliced = match interpreter.pop_resolved()? {
        Value::Array(items) => {
            let items = items.borrow();
            let range = inclusive_range(start, end, items.len(), "Array")?;
            Value::array(items[range].iter().map(Value::deep_copy).collect())
        },
        other => {
            let text = other.as_string()?;
            let range = inclusive_range(start, end, text.chars().count(), "String")?;
            Value::string(text.chars().skip(range.start).take(range.len()).collect::<String>())
        },
    };
    interpreter.push(sliced);
    Ok(())
}

fn inclusive_range(start: i64,
                   end: i64,
                   len: usize,
                   container: &'static str)
                   -> EvalResult<std::ops::Range<usize>> {
    if start < 0 || end < 0 {
        return Err(RuntimeError::IndexUnderflow { container });
    }
    let first = checked_index(start, len, container)?;
    let last = checked_index(end, len, container)?;
    if first > last {
        return Err(RuntimeError::invalid("Index mismatch"));
    }
    Ok(first..last + 1)
}
