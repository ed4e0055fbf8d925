use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            context::ContextId,
            core::{Exec, Interpreter},
        },
        value::core::Value,
    },
    util::num::usize_to_integer,
};

/// Pushes the code point of the first character, or 0 for an empty string.
pub fn ord(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let text = interpreter.pop_string()?;
    let code = text.chars().next().map_or(0, u32::from);
    interpreter.push(i64::from(code));
    Ok(())
}

/// Pushes the character with the given code point.
pub fn chr(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let code = interpreter.pop_integer()?;
    let c = u32::try_from(code).ok()
                               .and_then(char::from_u32)
                               .ok_or_else(|| RuntimeError::invalid(format!("Invalid character code {code}")))?;
    interpreter.push(c.to_string());
    Ok(())
}

/// `text delimiters explode` splits `text` at every character contained in
/// `delimiters`. Empty pieces are kept.
///
/// # Example
/// ```
/// use stutsk::interpreter::{evaluator::core::Interpreter, value::core::Value};
///
/// let mut interpreter = Interpreter::new();
/// interpreter.execute("<doc>", "\"a,b;;c\" \",;\" explode").unwrap();
///
/// let pieces = ["a", "b", "", "c"].map(Value::string).to_vec();
/// assert_eq!(interpreter.stack(), &[Value::array(pieces)]);
/// ```
pub fn explode(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let delimiters = interpreter.pop_string()?;
    let text = interpreter.pop_string()?;
    let pieces = text.split(|c: char| delimiters.contains(c))
                     .map(Value::string)
                     .collect::<Vec<_>>();
    interpreter.push(pieces);
    Ok(())
}

/// `haystack needle pos` pushes the character position of the first
/// occurrence of `needle`, or -1.
pub fn pos(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let needle = interpreter.pop_string()?;
    let haystack = interpreter.pop_string()?;
    let position = haystack.find(&needle)
                           .map_or(-1, |byte| usize_to_integer(haystack[..byte].chars().count()));
    interpreter.push(position);
    Ok(())
}

/// Removes leading and trailing whitespace and control characters.
pub fn trim(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let text = interpreter.pop_string()?;
    interpreter.push(text.trim_matches(|c: char| c <= ' '));
    Ok(())
}

/// Converts ASCII letters to upper case.
pub fn uppercase(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let text = interpreter.pop_string()?;
    interpreter.push(text.to_ascii_uppercase());
    Ok(())
}

/// Converts ASCII letters to lower case.
pub fn lowercase(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let text = interpreter.pop_string()?;
    interpreter.push(text.to_ascii_lowercase());
    Ok(())
}
