use std::io::{self, BufRead, Read, Write};

use crate::{
    error::{Exception, RuntimeError},
    interpreter::evaluator::{
        context::ContextId,
        core::{Exec, Interpreter},
    },
};

fn system(error: io::Error) -> Exception {
    Exception::system(error.to_string())
}

/// Writes the string form of the topmost value to standard output. No
/// newline is added.
pub fn print(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let text = interpreter.pop_string()?;
    interpreter.streams.output.write_all(text.as_bytes()).map_err(system)
}

/// Writes the string form of the topmost value to standard error.
pub fn error(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let text = interpreter.pop_string()?;
    interpreter.streams.error.write_all(text.as_bytes()).map_err(system)
}

/// Pushes the next line of standard input without its line terminator.
/// Bytes that are not valid UTF-8 are replaced.
pub fn readline(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    interpreter.flush()?;
    let mut line = Vec::new();
    interpreter.streams.input.read_until(b'\n', &mut line).map_err(system)?;
    if line.ends_with(b"\n") {
        line.pop();
        if line.ends_with(b"\r") {
            line.pop();
        }
    }
    interpreter.push(String::from_utf8_lossy(&line).into_owned());
    Ok(())
}

/// `n read` pushes up to `n` characters from standard input; fewer are
/// returned at the end of input.
pub fn read(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let count = interpreter.pop_integer()?;
    let count = usize::try_from(count).map_err(|_| RuntimeError::invalid("Length cannot be negative"))?;
    interpreter.flush()?;

    let mut text = String::new();
    for _ in 0..count {
        match read_char(interpreter.streams.input.as_mut()).map_err(system)? {
            Some(c) => text.push(c),
            None => break,
        }
    }
    interpreter.push(text);
    Ok(())
}

/// Pushes the next character of standard input, or an empty string at the
/// end of input.
pub fn readchar(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    interpreter.flush()?;
    let c = read_char(interpreter.streams.input.as_mut()).map_err(system)?;
    interpreter.push(c.map(String::from).unwrap_or_default());
    Ok(())
}

/// Pushes `TRUE` if standard input has no more data.
pub fn eof(interpreter: &mut Interpreter, _: ContextId) -> Exec<()> {
    let exhausted = interpreter.streams.input.fill_buf().map_err(system)?.is_empty();
    interpreter.push(exhausted);
    Ok(())
}

/// Reads one UTF-8 encoded character. Invalid sequences decode to U+FFFD.
fn read_char(input: &mut dyn BufRead) -> io::Result<Option<char>> {
    let Some(&lead) = input.fill_buf()?.first() else {
        return Ok(None);
    };
    let width: u64 = match lead {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    };

    let mut bytes = Vec::with_capacity(4);
    Read::take(input, width).read_to_end(&mut bytes)?;
    Ok(String::from_utf8_lossy(&bytes).chars().next())
}
