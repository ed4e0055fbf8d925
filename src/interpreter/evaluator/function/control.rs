use std::{
    fs,
    path::{Path, PathBuf},
    rc::Rc,
    thread,
    time::{Duration, Instant},
};

use tracing::debug;

use crate::{
    ast::Token,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            context::{ANONYMOUS_CONTEXT, ContextId},
            core::{Exec, Interpreter},
            function::core::BUILTIN_PREFIX,
        },
        parser::serialize::serialize,
        value::core::Value,
    },
};

/// Source name used for code run by `eval`.
pub const EVAL_SOURCE: &str = "<eval>";

/// `{ block } do` runs the block in the current context.
pub fn run_block(interpreter: &mut Interpreter, ctx: ContextId) -> Exec<()> {
    let block = interpreter.pop_block()?;
    interpreter.run(ctx, &block)
}

/// `{ block } inherit` runs the block in the context of the caller.
///
/// Variables created by the block end up in the calling function, which is
/// how helper functions can work on their caller's variables.
pub fn inherit(interpreter: &mut Interpreter, ctx: ContextId) -> Exec<()> {
    let block = interpreter.pop_block()?;
    let parent = interpreter.frame(ctx).parent.ok_or(RuntimeError::NoParentContext)?;
    interpreter.run(parent, &block)
}

/// `{ block } lambda` runs the block in a fresh context.
pub fn lambda(interpreter: &mut Interpreter, ctx: ContextId) -> Exec<()> {
    let block = interpreter.pop_block()?;
    interpreter.invoke(ctx, Rc::from(ANONYMOUS_CONTEXT), block)
}

/// Runs the code of the current context again in a fresh context of the
/// same name.
pub fn recurse(interpreter: &mut Interpreter, ctx: ContextId) -> Exec<()> {
    let frame = interpreter.frame(ctx);
    let (name, source) = (Rc::clone(&frame.name), Rc::clone(&frame.source));
    interpreter.invoke(ctx, name, source)
}

/// `"path" include` parses a file and runs it in the current context.
///
/// The path is tried as given first, then relative to every configured
/// include path.
pub fn include(interpreter: &mut Interpreter, ctx: ContextId) -> Exec<()> {
    let path = interpreter.pop_string()?;
    let (resolved, text) = read_include(interpreter.config().include_paths.as_slice(), &path)?;
    debug!(path = %resolved.display(), "include");

    let block = interpreter.parse(&resolved.display().to_string(), &text)?;
    interpreter.run(ctx, &block)
}

fn read_include(search: &[PathBuf], path: &str) -> Result<(PathBuf, String), RuntimeError> {
    let literal = Path::new(path).to_path_buf();
    std::iter::once(literal).chain(search.iter().map(|dir| dir.join(path)))
                            .find_map(|candidate| {
                                fs::read_to_string(&candidate).ok().map(|text| (candidate, text))
                            })
                            .ok_or_else(|| RuntimeError::invalid(format!("Cannot open file \"{path}\"")))
}

/// `"source" eval` parses a string and runs it in the current context.
///
/// # Example
/// ```
/// use stutsk::interpreter::{evaluator::core::Interpreter, value::core::Value};
///
/// let mut interpreter = Interpreter::new();
/// interpreter.execute("<doc>", "\"20 22 +\" eval").unwrap();
///
/// assert_eq!(interpreter.stack(), &[Value::Integer(42)]);
/// ```
pub fn eval(interpreter: &mut Interpreter, ctx: ContextId) -> Exec<()> {
    let text = interpreter.pop_string()?;
    debug!(length = text.len(), "eval");
    let block = interpreter.parse(EVAL_SOURCE, &text)?;
    interpreter.run(ctx, &block)
}

/// Pushes the source form of the topmost value. Variables are not resolved.
pub fn uneval(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let value = interpreter.pop()?;
    let text = serialize(&value)?;
    interpreter.push(text);
    Ok(())
}

/// `seconds sleep` pauses execution.
pub fn sleep(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let seconds = interpreter.pop_float()?;
    if seconds > 0.0 {
        let duration = Duration::try_from_secs_f64(seconds)
            .map_err(|e| RuntimeError::invalid(e.to_string()))?;
        thread::sleep(duration);
    }
    Ok(())
}

/// `"name" is_def` tells whether a function exists; `$var is_def` whether a
/// variable is bound.
pub fn is_def(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let defined = match interpreter.pop()? {
        Value::String(name) => {
            let name = name.borrow();
            interpreter.has_builtin(&name) || interpreter.has_function(&name)
        },
        Value::Variable(var) => interpreter.is_bound(&var),
        _ => return Err(RuntimeError::invalid("Invalid argument").into()),
    };
    interpreter.push(defined);
    Ok(())
}

/// `"name" definition` pushes the body of a function.
///
/// Builtins have no body; for them a block calling the builtin is pushed.
pub fn definition(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let name = interpreter.pop_string()?;
    let block = if let Some(body) = interpreter.functions.get(name.as_str()) {
        Value::CodeBlock(Rc::clone(body))
    } else if interpreter.has_builtin(&name) {
        let bare = name.strip_prefix(BUILTIN_PREFIX).unwrap_or(&name);
        Value::code_block(vec![Token::value(Value::call(format!("{BUILTIN_PREFIX}{bare}")))])
    } else {
        return Err(RuntimeError::invalid(format!("Unknown function '{name}'.")).into());
    };
    interpreter.push(block);
    Ok(())
}

/// `{ block } time` runs the block and pushes how long it took in seconds.
pub fn time(interpreter: &mut Interpreter, ctx: ContextId) -> Exec<()> {
    let block = interpreter.pop_block()?;
    let start = Instant::now();
    interpreter.run(ctx, &block)?;
    interpreter.push(start.elapsed().as_secs_f64());
    Ok(())
}

/// Pushes the arguments passed to the program as an array of strings.
pub fn commandline(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let arguments = interpreter.config()
                               .arguments
                               .iter()
                               .map(|arg| Value::string(arg.as_str()))
                               .collect::<Vec<_>>();
    interpreter.push(arguments);
    Ok(())
}

/// `"NAME" env_get` pushes an environment variable, or `NULL` if it is not
/// set. Names are matched without regard to case.
pub fn env_get(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let name = interpreter.pop_string()?;
    let value = std::env::vars().find(|(key, _)| key.eq_ignore_ascii_case(&name))
                                .map_or(Value::Empty, |(_, value)| Value::string(value));
    interpreter.push(value);
    Ok(())
}

/// Pushes every environment variable as an array of `( name value )`
/// pairs, sorted by name.
pub fn env_list(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let mut vars = std::env::vars().collect::<Vec<_>>();
    vars.sort();
    let pairs = vars.into_iter()
                    .map(|(key, value)| Value::array(vec![Value::string(key), Value::string(value)]))
                    .collect::<Vec<_>>();
    interpreter.push(pairs);
    Ok(())
}
