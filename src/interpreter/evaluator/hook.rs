use tracing::{debug, trace};

use crate::{ast::Token, interpreter::evaluator::core::Interpreter};

/// What the interpreter should do after a hook observed a step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HookAction {
    /// Execute the token.
    #[default]
    Continue,
    /// Raise `halt` instead of executing the token.
    Terminate,
}

/// Observer of execution, used by debuggers and tracers.
///
/// All methods have empty default implementations, so an implementor only
/// overrides the events it cares about.
pub trait ExecutionHook {
    /// Called before every token is executed.
    fn step(&mut self, _interpreter: &Interpreter, _token: &Token) -> HookAction {
        HookAction::Continue
    }

    /// Called after a function, lambda or `recurse` context was created.
    fn enter(&mut self, _interpreter: &Interpreter, _name: &str) {}

    /// Called after a function, lambda or `recurse` context was destroyed.
    fn exit(&mut self, _interpreter: &Interpreter, _name: &str) {}
}

/// Reports every step and context transition through `tracing`.
///
/// Steps are emitted at trace level, context transitions at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingHook;

impl ExecutionHook for TracingHook {
    fn step(&mut self, interpreter: &Interpreter, token: &Token) -> HookAction {
        trace!(source = interpreter.sources().name(token.debug.source),
               line = token.debug.line,
               column = token.debug.column,
               stack = interpreter.stack().len(),
               "step");
        HookAction::Continue
    }

    fn enter(&mut self, interpreter: &Interpreter, name: &str) {
        debug!(function = name, depth = interpreter.depth(), "enter context");
    }

    fn exit(&mut self, interpreter: &Interpreter, name: &str) {
        debug!(function = name, depth = interpreter.depth(), "exit context");
    }
}
