use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            context::ContextId,
            core::{EvalResult, Exec, Interpreter},
        },
        value::core::{DictionaryRef, Value},
    },
};

fn pop_dictionary(interpreter: &mut Interpreter) -> EvalResult<DictionaryRef> {
    match interpreter.pop_resolved()? {
        Value::Dictionary(entries) => Ok(entries),
        _ => Err(RuntimeError::ExpectedDictionary),
    }
}

/// Pushes a new, empty dictionary.
pub fn new(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    interpreter.push(Value::dictionary());
    Ok(())
}

/// `dict key value dictionary_set` stores a copy of `value` under `key` and
/// pushes the dictionary back.
///
/// Dictionaries are shared, so every variable holding the same dictionary
/// sees the new entry.
///
/// # Example
/// ```
/// use stutsk::interpreter::{evaluator::core::Interpreter, value::core::Value};
///
/// let mut interpreter = Interpreter::new();
/// interpreter.execute("<doc>", "dictionary_new \"k\" \"v\" dictionary_set \"k\" dictionary_get")
///            .unwrap();
///
/// assert_eq!(interpreter.stack(), &[Value::string("v")]);
/// ```
pub fn set(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let value = interpreter.pop_resolved()?.deep_copy();
    let key = interpreter.pop_string()?;
    let entries = pop_dictionary(interpreter)?;

    entries.borrow_mut().insert(key, value);
    interpreter.push(Value::Dictionary(entries));
    Ok(())
}

/// `dict key dictionary_get` pushes a copy of the value stored under `key`,
/// or `NULL` if there is none.
pub fn get(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let key = interpreter.pop_string()?;
    let entries = pop_dictionary(interpreter)?;

    let value = entries.borrow().get(&key).map_or(Value::Empty, Value::deep_copy);
    interpreter.push(value);
    Ok(())
}
