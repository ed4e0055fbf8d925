use std::{cmp::Ordering, rc::Rc};

use crate::{
    ast::Operator,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::{
            compare::{loose_equal, numeric_compare, strict_equal},
            core::Value,
        },
    },
};

impl Interpreter {
    pub(super) fn ordering_operator(&mut self, op: Operator) -> EvalResult<()> {
        let right = self.pop()?;
        let left = self.pop()?;
        let ordering = numeric_compare(&*self, &left, &right)?;
        let holds = match op {
            Operator::Less => ordering == Ordering::Less,
            Operator::Greater => ordering == Ordering::Greater,
            Operator::LessEqual => ordering != Ordering::Greater,
            _ => ordering != Ordering::Less,
        };
        self.push(holds);
        Ok(())
    }

    pub(super) fn equality_operator(&mut self, negate: bool) -> EvalResult<()> {
        let right = self.pop()?;
        let left = self.pop()?;
        let equal = loose_equal(&*self, &left, &right)?;
        self.push(equal != negate);
        Ok(())
    }

    /// `===` compares the operands as they are on the stack.
    pub(super) fn same_operator(&mut self) -> EvalResult<()> {
        let right = self.pop()?;
        let left = self.pop()?;
        self.push(strict_equal(&left, &right));
        Ok(())
    }

    pub(super) fn logic_operator(&mut self, op: Operator) -> EvalResult<()> {
        let right = self.pop_bool()?;
        let left = self.pop_bool()?;
        self.push(if op == Operator::And { left && right } else { left || right });
        Ok(())
    }

    pub(super) fn not_operator(&mut self) -> EvalResult<()> {
        let operand = self.pop_bool()?;
        self.push(!operand);
        Ok(())
    }

    /// Appends the string form of the top operand to the one below it.
    ///
    /// A string nobody else refers to is extended in place.
    pub(super) fn concat_operator(&mut self) -> EvalResult<()> {
        let suffix = self.pop_resolved()?.as_string()?;
        match self.pop()? {
            Value::String(text) if Rc::strong_count(&text) == 1 => {
                text.borrow_mut().push_str(&suffix);
                self.push(Value::String(text));
            },
            other => {
                let mut text = self.resolve(&other)?.as_string()?;
                text.push_str(&suffix);
                self.push(text);
            },
        }
        Ok(())
    }
}
