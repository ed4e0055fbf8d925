use crate::{
    ast::{Node, Token},
    error::RuntimeError,
    interpreter::{
        evaluator::{core::EvalResult, variable::STATIC_SEPARATOR},
        value::core::Value,
    },
};

/// Renders `value` as source text that evaluates back to an equal value.
///
/// Arrays become `( ... )` literals, code blocks `{ ... }`, variables `$name`
/// and strings are quoted with their special characters escaped. Floats are
/// written so that they parse as floats again, even when they hold an
/// integral value.
///
/// # Errors
/// `Unserializable` for dictionaries, handles and non-finite floats.
///
/// # Example
/// ```
/// use stutsk::interpreter::{parser::serialize::serialize, value::core::Value};
///
/// let value = Value::array(vec![Value::Integer(1), Value::string("a\"b"), Value::Float(2.0)]);
/// assert_eq!(serialize(&value).unwrap(), r#"( 1 "a\"b" 2.0 )"#);
///
/// assert!(serialize(&Value::dictionary()).is_err());
/// ```
pub fn serialize(value: &Value) -> EvalResult<String> {
    let mut out = String::new();
    write_value(&mut out, value)?;
    Ok(out)
}

/// Quotes `text` as a string literal.
///
/// # Example
/// ```
/// use stutsk::interpreter::parser::serialize::escape;
///
/// assert_eq!(escape("tab\there"), r#""tab\there""#);
/// ```
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

fn write_value(out: &mut String, value: &Value) -> EvalResult<()> {
    match value {
        Value::Empty => out.push_str("NULL"),
        Value::Operator(op) => out.push_str(op.symbol()),
        Value::FunctionCall(name) => out.push_str(name),
        Value::Variable(var) => {
            let name = var.name.split(STATIC_SEPARATOR).next().unwrap_or(&var.name);
            out.push('$');
            out.push_str(name);
        },
        Value::Integer(i) => out.push_str(&i.to_string()),
        Value::Bool(b) => out.push_str(if *b { "TRUE" } else { "FALSE" }),
        Value::Float(f) if f.is_finite() => {
            // Debug keeps a fractional part or an exponent on every value.
            out.push_str(&format!("{f:?}"));
        },
        Value::Float(_) => return Err(RuntimeError::Unserializable { kind: "T_FLOAT" }),
        Value::String(s) => out.push_str(&escape(&s.borrow())),
        Value::CodeBlock(tokens) => {
            out.push('{');
            write_tokens(out, tokens)?;
            out.push('}');
        },
        Value::Array(items) => {
            out.push('(');
            for item in items.borrow().iter() {
                out.push(' ');
                write_value(out, item)?;
            }
            out.push_str(" )");
        },
        Value::Dictionary(_) | Value::Handle(_) => {
            return Err(RuntimeError::Unserializable { kind: value.type_name() });
        },
    }
    Ok(())
}

fn write_tokens(out: &mut String, tokens: &[Token]) -> EvalResult<()> {
    for token in tokens {
        out.push(' ');
        match &token.node {
            Node::Value(value) => write_value(out, value)?,
            Node::Array(inner) => {
                out.push('(');
                write_tokens(out, inner)?;
                out.push(')');
            },
        }
    }
    out.push(' ');
    Ok(())
}
