use std::cmp::Ordering;

use rand::seq::SliceRandom;

use crate::{
    error::{Exception, RuntimeError},
    interpreter::{
        evaluator::{
            context::ContextId,
            core::{EvalResult, Exec, Interpreter},
        },
        value::{
            coerce::checked_index,
            compare::{loose_equal, numeric_compare},
            core::{ArrayRef, Value},
        },
    },
    util::num::usize_to_integer,
};

/// An array operand together with whether it was given as a variable.
struct Operand {
    items:       ArrayRef,
    is_variable: bool,
}

impl Operand {
    fn pop(interpreter: &mut Interpreter) -> EvalResult<Self> {
        let value = interpreter.pop()?;
        let is_variable = value.is_variable();
        match interpreter.resolve(&value)? {
            Value::Array(items) => Ok(Self { items, is_variable }),
            _ => Err(RuntimeError::ExpectedArray),
        }
    }

    /// Pushes the array back unless it was reached through a variable, in
    /// which case the variable already sees the change.
    fn finish(self, interpreter: &mut Interpreter) -> Exec<()> {
        if !self.is_variable {
            interpreter.push(Value::Array(self.items));
        }
        Ok(())
    }
}

fn pop_element(interpreter: &mut Interpreter) -> EvalResult<Value> {
    Ok(interpreter.pop_resolved()?.deep_copy())
}

/// `target appended array_append` appends the elements of `appended` to
/// `target`.
pub fn append(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let appended = match interpreter.pop_resolved()? {
        Value::Array(items) => items.borrow().iter().map(Value::deep_copy).collect::<Vec<_>>(),
        _ => return Err(RuntimeError::ExpectedArray.into()),
    };
    let target = Operand::pop(interpreter)?;
    target.items.borrow_mut().extend(appended);
    target.finish(interpreter)
}

/// `value pos array array_insert` inserts `value` so that it ends up at
/// position `pos`.
pub fn insert(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let target = Operand::pop(interpreter)?;
    let position = interpreter.pop_integer()?;
    let value = pop_element(interpreter)?;
    {
        let mut items = target.items.borrow_mut();
        let position = checked_index(position, items.len() + 1, "Array")?;
        items.insert(position, value);
    }
    target.finish(interpreter)
}

/// `pos array array_delete` removes the element at `pos`.
pub fn delete(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let target = Operand::pop(interpreter)?;
    let position = interpreter.pop_integer()?;
    {
        let mut items = target.items.borrow_mut();
        let position = checked_index(position, items.len(), "Array")?;
        items.remove(position);
    }
    target.finish(interpreter)
}

/// Reverses the order of the elements.
pub fn reverse(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let target = Operand::pop(interpreter)?;
    target.items.borrow_mut().reverse();
    target.finish(interpreter)
}

/// Puts the elements in random order.
pub fn shuffle(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let target = Operand::pop(interpreter)?;
    target.items.borrow_mut().shuffle(&mut rand::thread_rng());
    target.finish(interpreter)
}

/// `value array array_find` pushes the position of the first element
/// loosely equal to `value`, or -1.
pub fn find(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let target = Operand::pop(interpreter)?;
    let needle = interpreter.pop()?;

    let items = target.items.borrow().clone();
    let mut found = -1;
    for (i, item) in items.iter().enumerate() {
        if loose_equal(&*interpreter, &needle, item)? {
            found = usize_to_integer(i);
            break;
        }
    }
    interpreter.push(found);
    Ok(())
}

/// `array { block } array_perform` replaces every element by what the block
/// leaves on the stack when run with the element pushed.
///
/// A control signal raised by the block stops the iteration and stays
/// pending.
///
/// # Example
/// ```
/// use stutsk::interpreter::{evaluator::core::Interpreter, value::core::Value};
///
/// let mut interpreter = Interpreter::new();
/// interpreter.execute("<doc>", "( 1 2 3 ) { 10 * } array_perform").unwrap();
///
/// let expected = [10, 20, 30].map(Value::Integer).to_vec();
/// assert_eq!(interpreter.stack(), &[Value::array(expected)]);
/// ```
pub fn perform(interpreter: &mut Interpreter, ctx: ContextId) -> Exec<()> {
    let block = interpreter.pop_block()?;
    let target = Operand::pop(interpreter)?;

    let len = target.items.borrow().len();
    for i in 0..len {
        let Some(element) = target.items.borrow().get(i).cloned() else {
            break;
        };
        interpreter.push(element);
        interpreter.run(ctx, &block)?;
        let replacement = pop_element(interpreter)?;
        if let Some(slot) = target.items.borrow_mut().get_mut(i) {
            *slot = replacement;
        }
        if interpreter.signal().is_some() {
            break;
        }
    }
    target.finish(interpreter)
}

/// Sorts the elements numerically in ascending order.
pub fn sort(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let target = Operand::pop(interpreter)?;
    let items = target.items.borrow().clone();
    let sorted = merge_sort::<RuntimeError>(items, &mut |a: &Value, b: &Value| {
        Ok(numeric_compare(&*interpreter, a, b)? == Ordering::Less)
    })?;
    *target.items.borrow_mut() = sorted;
    target.finish(interpreter)
}

/// `array { block } array_custom_sort` sorts with a user comparison.
///
/// The block runs with two elements pushed, `a` below `b`, and must leave
/// `TRUE` when `a` belongs before `b`. The sort is stable.
///
/// # Example
/// ```
/// use stutsk::interpreter::{evaluator::core::Interpreter, value::core::Value};
///
/// let mut interpreter = Interpreter::new();
/// interpreter.execute("<doc>", "( 3 1 2 ) { > } array_custom_sort").unwrap();
///
/// let expected = [3, 2, 1].map(Value::Integer).to_vec();
/// assert_eq!(interpreter.stack(), &[Value::array(expected)]);
/// ```
pub fn custom_sort(interpreter: &mut Interpreter, ctx: ContextId) -> Exec<()> {
    let block = interpreter.pop_block()?;
    let target = Operand::pop(interpreter)?;

    let items = target.items.borrow().clone();
    let sorted = merge_sort::<Exception>(items, &mut |a: &Value, b: &Value| {
        interpreter.push(a.clone());
        interpreter.push(b.clone());
        interpreter.run(ctx, &block)?;
        Ok(interpreter.pop_bool()?)
    })?;
    *target.items.borrow_mut() = sorted;
    target.finish(interpreter)
}

/// Stable merge sort with a fallible "goes before" predicate.
fn merge_sort<E>(mut items: Vec<Value>,
                 before: &mut impl FnMut(&Value, &Value) -> Result<bool, E>)
                 -> Result<Vec<Value>, E> {
    if items.len() <= 1 {
        return Ok(items);
    }
    let right = items.split_off(items.len() / 2);
    let left = merge_sort(items, before)?;
    let right = merge_sort(right, before)?;

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    while let (Some(a), Some(b)) = (left.peek(), right.peek()) {
        let next = if before(b, a)? { right.next() } else { left.next() };
        merged.extend(next);
    }
    merged.extend(left);
    merged.extend(right);
    Ok(merged)
}

fn take_element(interpreter: &mut Interpreter, front: bool, remove: bool) -> Exec<()> {
    let target = Operand::pop(interpreter)?;
    let element = {
        let mut items = target.items.borrow_mut();
        if items.is_empty() {
            return Err(RuntimeError::invalid("Array is empty").into());
        }
        let position = if front { 0 } else { items.len() - 1 };
        if remove { items.remove(position) } else { items[position].clone() }
    };
    interpreter.push(element);
    Ok(())
}

fn put_element(interpreter: &mut Interpreter, front: bool) -> Exec<()> {
    let target = Operand::pop(interpreter)?;
    let value = pop_element(interpreter)?;
    {
        let mut items = target.items.borrow_mut();
        if front {
            items.insert(0, value);
        } else {
            items.push(value);
        }
    }
    target.finish(interpreter)
}

/// Removes the last element and pushes it.
pub fn pop(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    take_element(interpreter, false, true)
}

/// `value array array_push` appends `value`.
pub fn push(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    put_element(interpreter, false)
}

/// Pushes the last element without removing it.
pub fn peek(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    take_element(interpreter, false, false)
}

/// Removes the first element and pushes it.
pub fn pop_front(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    take_element(interpreter, true, true)
}

/// `value array array_push_front` prepends `value`.
pub fn push_front(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    put_element(interpreter, true)
}

/// Pushes the first element without removing it.
pub fn peek_front(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    take_element(interpreter, true, false)
}
