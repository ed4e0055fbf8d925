use crate::{
    error::RuntimeError,
    interpreter::evaluator::{
        context::ContextId,
        core::{Exec, Interpreter},
    },
    util::num::usize_to_integer,
};

/// `a b swp` leaves `b a`.
pub fn swp(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let top = interpreter.pop()?;
    let below = interpreter.pop()?;
    interpreter.push(top);
    interpreter.push(below);
    Ok(())
}

/// Discards the topmost value.
pub fn dmp(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    interpreter.pop()?;
    Ok(())
}

/// Pushes an independent copy of the topmost value.
///
/// # Example
/// ```
/// use stutsk::interpreter::{evaluator::core::Interpreter, value::core::Value};
///
/// let mut interpreter = Interpreter::new();
/// interpreter.execute("<doc>", "\"ab\" dup").unwrap();
///
/// assert_eq!(interpreter.stack(), &[Value::string("ab"), Value::string("ab")]);
/// ```
pub fn dup(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let copy = interpreter.peek()?.deep_copy();
    interpreter.push(copy);
    Ok(())
}

/// `n roll` moves the `n`-th topmost value to the top; `1 roll` does
/// nothing.
pub fn roll(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let n = usize::try_from(interpreter.pop_integer()?).ok()
                                                       .filter(|&n| n >= 1)
                                                       .ok_or_else(|| RuntimeError::invalid("Roll count must be positive"))?;
    if n > interpreter.stack.len() {
        return Err(RuntimeError::StackUnderflow.into());
    }

    let position = interpreter.stack.len() - n;
    let value = interpreter.stack.remove(position);
    interpreter.push(value);
    Ok(())
}

/// `n swap` reverses the order of the `n` topmost values.
pub fn swap(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let n = interpreter.pop_integer()?;
    let count = usize::try_from(n).map_err(|_| RuntimeError::invalid("Swap count cannot be negative"))?;
    if count > interpreter.stack.len() {
        return Err(RuntimeError::StackUnderflow.into());
    }

    let start = interpreter.stack.len() - count;
    interpreter.stack[start..].reverse();
    Ok(())
}

/// Pushes the number of values on the stack.
pub fn stack_count(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let count = usize_to_integer(interpreter.stack.len());
    interpreter.push(count);
    Ok(())
}

/// Removes every value from the stack.
pub fn stack_purge(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    interpreter.stack.clear();
    Ok(())
}

/// Pushes `TRUE` if the stack is empty.
pub fn stack_empty(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let empty = interpreter.stack.is_empty();
    interpreter.push(empty);
    Ok(())
}
