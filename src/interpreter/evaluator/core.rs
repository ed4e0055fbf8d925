use std::{
    io::{BufRead, Write},
    rc::Rc,
};

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::{
    ast::{Block, DebugInfo, Node, Token},
    error::{Exception, Location, RuntimeError},
    interpreter::{
        config::Config,
        evaluator::{
            context::{Context, ContextId, ContextStack},
            function::core::{BUILTIN_PREFIX, BUILTIN_TABLE, Builtin, BuiltinFn},
            hook::{ExecutionHook, HookAction},
            signal::Signal,
        },
        parser::core::parse_source,
        source::SourceMap,
        streams::Streams,
        value::core::Value,
    },
    util::stack::ensure_sufficient_stack,
};

/// Result type used by value-level helpers.
///
/// Coercions, comparisons and indexing return either a value of type `T` or
/// a `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Result type used by the evaluator.
///
/// Anything that runs code can fail with any kind of error, including
/// `throw` and nested parse failures, so it reports an [`Exception`].
pub type Exec<T> = Result<T, Exception>;

/// How a program run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The program ran to its end, or stopped on `break`, `continue` or `exit`
    /// outside of anything that absorbs them.
    Completed,
    /// The program executed `halt`, or a hook requested termination.
    Halted,
}

/// Stores the complete interpreter state.
///
/// There is exactly one operand stack and one chain of contexts; everything
/// that executes code receives `&mut Interpreter` together with the id of the
/// context it runs in.
///
/// ## Usage
///
/// ```
/// use stutsk::interpreter::{evaluator::core::Interpreter, value::core::Value};
///
/// let mut interpreter = Interpreter::new();
/// interpreter.execute("<doc>", "2 3 +").unwrap();
///
/// assert_eq!(interpreter.stack(), &[Value::Integer(5)]);
/// ```
pub struct Interpreter {
    pub(crate) stack:     Vec<Value>,
    pub(crate) contexts:  ContextStack,
    pub(crate) functions: FxHashMap<Rc<str>, Block>,
    pub(crate) builtins:  FxHashMap<&'static str, Builtin>,
    pub(crate) signal:    Option<Signal>,
    pub(crate) sources:   SourceMap,
    pub(crate) config:    Config,
    pub(crate) streams:   Streams,
    hook:                 Option<Box<dyn ExecutionHook>>,
    nesting:              usize,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interpreter")
         .field("stack", &self.stack)
         .field("contexts", &self.contexts.len())
         .field("functions", &self.functions.len())
         .field("signal", &self.signal)
         .finish_non_exhaustive()
    }
}

impl Interpreter {
    /// Creates an interpreter with the default configuration and the process
    /// standard streams.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an interpreter with the given configuration.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        let builtins = BUILTIN_TABLE.iter()
                                    .map(|def| (def.name, def.builtin))
                                    .collect();
        Self { stack: Vec::new(),
               contexts: ContextStack::new(),
               functions: FxHashMap::default(),
               builtins,
               signal: None,
               sources: SourceMap::default(),
               config,
               streams: Streams::default(),
               hook: None,
               nesting: 0 }
    }

    /// Replaces the standard streams.
    #[must_use]
    pub fn with_io(mut self,
                   output: impl Write + 'static,
                   error: impl Write + 'static,
                   input: impl BufRead + 'static)
                   -> Self {
        self.streams = Streams { output: Box::new(output),
                                 error:  Box::new(error),
                                 input:  Box::new(input), };
        self
    }

    /// Installs an execution hook.
    #[must_use]
    pub fn with_hook(mut self, hook: impl ExecutionHook + 'static) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    /// Adds or replaces a builtin function.
    ///
    /// `arity` is the number of operands the function needs on the stack; the
    /// call fails with a stack underflow before `func` runs if fewer are
    /// present.
    pub fn register_builtin(&mut self, name: &'static str, arity: usize, func: BuiltinFn) {
        self.builtins.insert(name, Builtin { arity, func });
    }

    /// The operand stack, bottom first.
    #[must_use]
    pub fn stack(&self) -> &[Value] {
        &self.stack
    }

    /// Every source registered so far.
    #[must_use]
    pub const fn sources(&self) -> &SourceMap {
        &self.sources
    }

    /// The configuration the interpreter was created with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The live contexts.
    #[must_use]
    pub const fn contexts(&self) -> &ContextStack {
        &self.contexts
    }

    /// Number of live contexts, including the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.contexts.len()
    }

    /// The pending control signal, if any.
    #[must_use]
    pub const fn signal(&self) -> Option<Signal> {
        self.signal
    }

    /// The id of the root context.
    #[must_use]
    pub const fn root(&self) -> ContextId {
        self.contexts.root()
    }

    /// Returns `true` if a user function called `name` exists.
    #[must_use]
    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Returns `true` if a builtin called `name` exists, with or without the
    /// builtin prefix.
    #[must_use]
    pub fn has_builtin(&self, name: &str) -> bool {
        self.builtins.contains_key(name.strip_prefix(BUILTIN_PREFIX).unwrap_or(name))
    }

    /// Clears the stack, every variable, every user function and any pending
    /// signal. Registered sources and builtins survive.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.contexts = ContextStack::new();
        self.functions.clear();
        self.signal = None;
        self.nesting = 0;
    }

    /// Registers `text` under `name` and parses it.
    pub fn parse(&mut self, name: &str, text: &str) -> Exec<Block> {
        let id = self.sources.add(name, text);
        let Some(file) = self.sources.get(id) else {
            return Err(Exception::system(format!("Source \"{name}\" was not registered")));
        };
        let tokens = parse_source(file, id).map_err(|e| {
                                               let line = e.line();
                                               Exception::from(e).located(|| Location { file: name.to_owned(),
                                                                                        line })
                                           })?;
        debug!(source = name, tokens = tokens.len(), "parsed");
        Ok(tokens.into())
    }

    /// Parses `text` and runs it as a program in the root context.
    ///
    /// The stack, variables and functions left by earlier runs are kept, so
    /// several sources can be executed one after another.
    ///
    /// # Returns
    /// [`Outcome::Halted`] if the program executed `halt`, otherwise
    /// [`Outcome::Completed`]. Uncaught errors are returned as `Err`.
    pub fn execute(&mut self, name: &str, text: &str) -> Exec<Outcome> {
        let block = self.parse(name, text)?;
        self.contexts.main_mut().source = Rc::clone(&block);

        let root = self.root();
        let result = self.run(root, &block);
        self.flush()?;
        result?;

        match self.signal.take() {
            Some(Signal::Halt) => Ok(Outcome::Halted),
            Some(signal) => {
                debug!(signal = signal.keyword(), "signal reached the top level");
                Ok(Outcome::Completed)
            },
            None => Ok(Outcome::Completed),
        }
    }

    /// Flushes both output streams.
    pub fn flush(&mut self) -> Exec<()> {
        self.streams
            .output
            .flush()
            .and_then(|()| self.streams.error.flush())
            .map_err(|e| Exception::system(e.to_string()))
    }

    /// Runs `block` in the context `ctx`.
    ///
    /// Execution stops early when a control signal is raised; the signal is
    /// left for the caller to interpret. Errors are annotated with the
    /// position of the token that raised them.
    pub fn run(&mut self, ctx: ContextId, block: &[Token]) -> Exec<()> {
        if self.nesting >= self.config.max_depth {
            return Err(Exception::fatal(format!("Maximum nesting depth of {} exceeded",
                                                self.config.max_depth)));
        }
        self.nesting += 1;
        let result = ensure_sufficient_stack(|| self.run_tokens(ctx, block));
        self.nesting -= 1;
        result
    }

    fn run_tokens(&mut self, ctx: ContextId, block: &[Token]) -> Exec<()> {
        for token in block {
            if self.signal.is_some() {
                break;
            }
            if self.step_hook(token) == HookAction::Terminate {
                self.signal = Some(Signal::Halt);
                break;
            }
            trace!(line = token.debug.line, column = token.debug.column, "token");
            self.execute_token(ctx, token)
                .map_err(|e| e.located(|| self.location(&token.debug)))?;
        }
        Ok(())
    }

    fn execute_token(&mut self, ctx: ContextId, token: &Token) -> Exec<()> {
        let value = match &token.node {
            Node::Array(inner) => {
                let height = self.stack.len();
                self.run(ctx, inner)?;
                let elements = self.stack.split_off(height.min(self.stack.len()));
                self.stack.push(Value::array(elements));
                return Ok(());
            },
            Node::Value(value) => value,
        };

        match value {
            Value::Operator(op) => self.apply_operator(ctx, *op),
            Value::FunctionCall(name) => self.call(ctx, name),
            Value::Variable(var) => {
                let bound = self.bind(ctx, var);
                self.stack.push(bound);
                Ok(())
            },
            Value::String(_) => {
                self.stack.push(value.deep_copy());
                Ok(())
            },
            other => {
                self.stack.push(other.clone());
                Ok(())
            },
        }
    }

    /// Calls the function `name` from the context `ctx`.
    ///
    /// User functions take precedence over builtins, and the builtin prefix
    /// always selects the builtin.
    pub fn call(&mut self, ctx: ContextId, name: &str) -> Exec<()> {
        if let Some(body) = self.functions.get(name).cloned() {
            return self.invoke(ctx, Rc::from(name), body);
        }

        let key = name.strip_prefix(BUILTIN_PREFIX).unwrap_or(name);
        let Some(builtin) = self.builtins.get(key).copied() else {
            return Err(RuntimeError::UndefinedFunction { name: name.to_owned() }.into());
        };
        if self.stack.len() < builtin.arity {
            return Err(RuntimeError::StackUnderflow.into());
        }
        (builtin.func)(self, ctx)
    }

    /// Runs `body` in a new context named `name` whose parent is `parent`.
    ///
    /// The context is destroyed afterwards, even on error, and a pending
    /// `exit` is absorbed.
    pub fn invoke(&mut self, parent: ContextId, name: Rc<str>, body: Block) -> Exec<()> {
        let child = self.contexts.push(Rc::clone(&name), Some(parent), Rc::clone(&body));
        debug!(function = &*name, depth = self.contexts.len(), "call");
        self.notify(|hook, interpreter| hook.enter(interpreter, &name));

        let result = self.run(child, &body);

        self.contexts.pop();
        self.notify(|hook, interpreter| hook.exit(interpreter, &name));
        if self.signal == Some(Signal::Exit) {
            self.signal = None;
        }
        result
    }

    fn step_hook(&mut self, token: &Token) -> HookAction {
        let Some(mut hook) = self.hook.take() else {
            return HookAction::Continue;
        };
        let action = hook.step(self, token);
        self.hook = Some(hook);
        action
    }

    fn notify(&mut self, event: impl FnOnce(&mut dyn ExecutionHook, &Self)) {
        if let Some(mut hook) = self.hook.take() {
            event(hook.as_mut(), self);
            self.hook = Some(hook);
        }
    }

    /// Converts token debug information into a reportable location.
    #[must_use]
    pub fn location(&self, debug: &DebugInfo) -> Location {
        Location { file: self.sources.name(debug.source).to_owned(),
                   line: debug.line, }
    }

    /// The context `ctx`, which must be the running context or one of its
    /// ancestors. Those are always live; the root is returned otherwise.
    pub(crate) fn frame(&self, ctx: ContextId) -> &Context {
        self.contexts.get(ctx).unwrap_or_else(|| self.contexts.main())
    }

    /// Pushes a value.
    pub fn push(&mut self, value: impl Into<Value>) {
        self.stack.push(value.into());
    }

    /// Pops the topmost value without resolving it.
    pub fn pop(&mut self) -> EvalResult<Value> {
        self.stack.pop().ok_or(RuntimeError::StackUnderflow)
    }

    /// Pops the topmost value and resolves it if it is a variable.
    pub fn pop_resolved(&mut self) -> EvalResult<Value> {
        let value = self.pop()?;
        self.resolve(&value)
    }

    /// Returns the topmost value without removing it.
    pub fn peek(&self) -> EvalResult<&Value> {
        self.stack.last().ok_or(RuntimeError::StackUnderflow)
    }

    /// Pops a value that must resolve to a code block.
    pub fn pop_block(&mut self) -> EvalResult<Block> {
        match self.pop_resolved()? {
            Value::CodeBlock(block) => Ok(block),
            _ => Err(RuntimeError::ExpectedCodeBlock),
        }
    }

    /// Pops a value and converts it to an integer.
    pub fn pop_integer(&mut self) -> EvalResult<i64> {
        self.pop_resolved()?.as_integer()
    }

    /// Pops a value and converts it to a float.
    pub fn pop_float(&mut self) -> EvalResult<f64> {
        self.pop_resolved()?.as_float()
    }

    /// Pops a value and converts it to a string.
    pub fn pop_string(&mut self) -> EvalResult<String> {
        self.pop_resolved()?.as_string()
    }

    /// Pops a value and converts it to a boolean.
    pub fn pop_bool(&mut self) -> EvalResult<bool> {
        self.pop_resolved()?.as_bool()
    }
}
