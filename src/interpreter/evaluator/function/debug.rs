use std::{fmt::Write as _, io::Write as _};

use crate::{
    ast::{Node, Token},
    error::Exception,
    interpreter::{
        evaluator::{
            context::ContextId,
            core::{Exec, Interpreter},
        },
        value::core::Value,
    },
    util::num::format_float,
};

/// Writes every stack entry, bottom first, labelled by position.
pub fn dump_stack(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let mut out = String::new();
    for (i, value) in interpreter.stack.iter().enumerate() {
        dump_value(interpreter, &mut out, value, 0, &i.to_string());
    }
    emit(interpreter, &out)
}

/// Writes the variables of the current context.
pub fn dump_variables(interpreter: &mut Interpreter, ctx: ContextId) -> Exec<()> {
    let out = dump_context(interpreter, ctx);
    emit(interpreter, &out)
}

/// Writes the variables of the root context.
pub fn dump_global_variables(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let out = dump_context(interpreter, interpreter.root());
    emit(interpreter, &out)
}

fn dump_context(interpreter: &Interpreter, ctx: ContextId) -> String {
    let mut variables = interpreter.frame(ctx).variables.iter().collect::<Vec<_>>();
    variables.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut out = String::new();
    for (name, value) in variables {
        dump_value(interpreter, &mut out, value, 0, name);
    }
    out
}

fn emit(interpreter: &mut Interpreter, text: &str) -> Exec<()> {
    interpreter.streams
               .output
               .write_all(text.as_bytes())
               .map_err(|e| Exception::system(e.to_string()))
}

/// Appends a human-readable description of `value` to `out`.
///
/// Each line is indented by two spaces per `level` and starts with `label`.
/// Containers list their elements four levels deeper; variables show the
/// value they are bound to two levels deeper.
///
/// # Example
/// ```
/// use stutsk::interpreter::{
///     evaluator::{core::Interpreter, function::debug::dump_value},
///     value::core::Value,
/// };
///
/// let interpreter = Interpreter::new();
/// let mut out = String::new();
/// let value = Value::array(vec![Value::Integer(5), Value::string("hi")]);
/// dump_value(&interpreter, &mut out, &value, 0, "0");
///
/// assert_eq!(out,
///            "0: T_ARRAY[2]: \n        0: T_INTEGER (5)\n        1: T_STRING[2] (\"hi\")\n");
/// ```
pub fn dump_value(interpreter: &Interpreter, out: &mut String, value: &Value, level: usize, label: &str) {
    let indent = "  ".repeat(level);
    let _ = write!(out, "{indent}{label}: ");
    match value {
        Value::Empty => out.push_str("T_EMPTY\n"),
        Value::Operator(op) => {
            let _ = writeln!(out, "T_OPERATOR ({op})");
        },
        Value::FunctionCall(name) => {
            let _ = writeln!(out, "T_FUNCCALL ({name})");
        },
        Value::Variable(var) => {
            let owner = var.context.and_then(|id| interpreter.contexts().get(id));
            let ctx_name = owner.map_or("null", |context| &*context.name);
            if var.index.is_empty() {
                let _ = writeln!(out, "T_VARIABLE ({}, ctx: {ctx_name})", var.name);
            } else {
                let index = var.index.iter().map(|i| format!("{i} ")).collect::<String>();
                let _ = writeln!(out, "T_VARIABLE ({}, index: ( {index}), ctx: {ctx_name})", var.name);
            }
            let Some(context) = owner else {
                return;
            };
            match context.variables.get(&var.name) {
                Some(bound) => dump_value(interpreter, out, bound, level + 2, "value"),
                None => {
                    let _ = writeln!(out, "{indent}    (value undefined)");
                },
            }
        },
        Value::Integer(i) => {
            let _ = writeln!(out, "T_INTEGER ({i})");
        },
        Value::Bool(b) => {
            let _ = writeln!(out, "T_BOOL ({})", if *b { "TRUE" } else { "FALSE" });
        },
        Value::Float(f) => {
            let _ = writeln!(out, "T_FLOAT ({})", format_float(*f));
        },
        Value::String(s) => {
            let s = s.borrow();
            let _ = writeln!(out, "T_STRING[{}] (\"{s}\")", s.chars().count());
        },
        Value::CodeBlock(tokens) => {
            let _ = writeln!(out, "T_CODEBLOCK[{}]: ", tokens.len());
            dump_tokens(interpreter, out, tokens, level + 4);
        },
        Value::Array(items) => {
            let items = items.borrow();
            let _ = writeln!(out, "T_ARRAY[{}]: ", items.len());
            for (i, item) in items.iter().enumerate() {
                dump_value(interpreter, out, item, level + 4, &i.to_string());
            }
        },
        Value::Dictionary(entries) => {
            let entries = entries.borrow();
            let _ = writeln!(out, "T_DICTIONARY[{}]: ", entries.len());
            for (key, item) in &*entries {
                dump_value(interpreter, out, item, level + 4, key);
            }
        },
        Value::Handle(handle) => {
            let _ = writeln!(out, "T_HANDLE ({}, size: {})", handle.id, handle.size);
        },
    }
}

fn dump_tokens(interpreter: &Interpreter, out: &mut String, tokens: &[Token], level: usize) {
    for (i, token) in tokens.iter().enumerate() {
        match &token.node {
            Node::Value(value) => dump_value(interpreter, out, value, level, &i.to_string()),
            Node::Array(inner) => {
                let _ = writeln!(out, "{}{i}: T_ARRAY[{}]: ", "  ".repeat(level), inner.len());
                dump_tokens(interpreter, out, inner, level + 4);
            },
        }
    }
}
