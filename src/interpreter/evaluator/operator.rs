use crate::{
    ast::Operator,
    interpreter::evaluator::{
        context::{ContextId, Scope},
        core::{Exec, Interpreter},
        signal::Signal,
    },
};

/// Arithmetic operators.
///
/// Implements `+ - * / div % ^` and the `++`/`--` operators. Operands are
/// reduced to their GCD type first; integer arithmetic wraps on overflow.
pub mod arithmetic;
/// Variable binding operators.
///
/// Implements assignment (`=`, `&=`), dereferencing (`@`), scope declarations,
/// function definition, `unset` and deferred indexing with `[]`.
pub mod binding;
/// Comparison and boolean operators.
///
/// # Responsibilities
/// - Numeric ordering for `<`, `>`, `<=` and `>=`.
/// - Loose (`==`, `!=`) and strict (`===`) equality.
/// - `&&`, `||` and `!`, which evaluate both operands.
/// - String concatenation with `.`.
pub mod comparison;
/// Control flow operators.
///
/// Implements conditionals, loops, `switch`, `try` and `throw`. Loop
/// operators absorb `break` and `continue`; every other signal passes
/// through them.
pub mod control;

impl Interpreter {
    /// Executes `op` in the context `ctx`.
    pub(crate) fn apply_operator(&mut self, ctx: ContextId, op: Operator) -> Exec<()> {
        match op {
            Operator::Assign => Ok(self.assign_operator(false)?),
            Operator::AssignRef => Ok(self.assign_operator(true)?),
            Operator::Deref => Ok(self.deref_operator()?),
            Operator::Increment => Ok(self.step_operator(1)?),
            Operator::Decrement => Ok(self.step_operator(-1)?),
            Operator::Equal => Ok(self.equality_operator(false)?),
            Operator::NotEqual => Ok(self.equality_operator(true)?),
            Operator::Same => Ok(self.same_operator()?),
            Operator::Less
            | Operator::Greater
            | Operator::LessEqual
            | Operator::GreaterEqual => Ok(self.ordering_operator(op)?),
            Operator::And | Operator::Or => Ok(self.logic_operator(op)?),
            Operator::Not => Ok(self.not_operator()?),
            Operator::Plus
            | Operator::Minus
            | Operator::Multiply
            | Operator::Divide
            | Operator::IntDivide
            | Operator::Modulo => Ok(self.arithmetic_operator(op)?),
            Operator::Power => Ok(self.power_operator()?),
            Operator::Concat => Ok(self.concat_operator()?),
            Operator::Index => Ok(self.index_operator()?),
            Operator::Ternary => Ok(self.ternary_operator()?),
            Operator::If => self.if_operator(ctx),
            Operator::IfElse => self.if_else_operator(ctx),
            Operator::Repeat => self.repeat_operator(ctx),
            Operator::Forever => self.forever_operator(ctx),
            Operator::Foreach => self.foreach_operator(ctx),
            Operator::Switch => self.switch_operator(ctx),
            Operator::Try => self.try_operator(ctx),
            Operator::Throw => self.throw_operator(),
            Operator::Break => self.raise(Signal::Break),
            Operator::Continue => self.raise(Signal::Continue),
            Operator::Exit => self.raise(Signal::Exit),
            Operator::Halt => self.raise(Signal::Halt),
            Operator::Global => Ok(self.scope_operator(ctx, Scope::Global)?),
            Operator::Auto => Ok(self.scope_operator(ctx, Scope::Auto)?),
            Operator::Static => Ok(self.scope_operator(ctx, Scope::Static)?),
            Operator::Function => Ok(self.function_operator()?),
            Operator::Unset => Ok(self.unset_operator()?),
        }
    }

    #[allow(clippy::unnecessary_wraps)]
    fn raise(&mut self, signal: Signal) -> Exec<()> {
        self.signal = Some(signal);
        Ok(())
    }
}
