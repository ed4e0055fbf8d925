use crate::interpreter::{
    evaluator::{
        context::ContextId,
        core::{Exec, Interpreter},
    },
    value::coerce::Gcd,
};

/// Pushes `TRUE` if the resolved operand has the type tag `tag`.
///
/// Backs `is_null`, `is_array`, `is_string` and the other type predicates.
///
/// # Parameters
/// - `tag`: A type tag as reported by `__type`, e.g. `"T_ARRAY"`.
pub fn is_type(interpreter: &mut Interpreter, tag: &str) -> Exec<()> {
    let value = interpreter.pop_resolved()?;
    interpreter.push(value.type_name() == tag);
    Ok(())
}

/// Pushes `TRUE` if the operand is a variable reference. The operand is not
/// resolved.
pub fn is_variable(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let value = interpreter.pop()?;
    interpreter.push(value.is_variable());
    Ok(())
}

/// Pushes `TRUE` if the operand can take part in arithmetic.
///
/// # Example
/// ```
/// use stutsk::interpreter::{evaluator::core::Interpreter, value::core::Value};
///
/// let mut interpreter = Interpreter::new();
/// interpreter.execute("<doc>", "\"4.5\" is_numeric \"four\" is_numeric").unwrap();
///
/// assert_eq!(interpreter.stack(), &[Value::Bool(true), Value::Bool(false)]);
/// ```
pub fn is_numeric(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let value = interpreter.pop_resolved()?;
    interpreter.push(matches!(value.gcd(), Gcd::Integer(_) | Gcd::Float(_)));
    Ok(())
}

/// Pushes the type tag of the operand, without resolving variables.
pub fn type_of(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let value = interpreter.pop()?;
    interpreter.push(value.type_name());
    Ok(())
}
