/// A pending control transfer.
///
/// Signals are not errors: the token loop polls for one before every token
/// and stops when it is set, and each kind is cleared by the construct that
/// owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Leave the innermost loop. Cleared by `repeat`, `forever` and `foreach`.
    Break,
    /// Skip to the next iteration of the innermost loop.
    Continue,
    /// Return from the innermost function, lambda or `recurse` activation.
    Exit,
    /// Stop the whole program with a failure status.
    Halt,
}

impl Signal {
    /// The keyword that raises the signal.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Break => "break",
            Self::Continue => "continue",
            Self::Exit => "exit",
            Self::Halt => "halt",
        }
    }
}
