use std::{
    fmt,
    io::{self, BufRead, BufReader, Write},
};

/// The standard streams a script talks to.
///
/// The defaults are the process streams; embedders and tests substitute
/// their own buffers.
pub struct Streams {
    /// Target of `print` and the debug dumps.
    pub output: Box<dyn Write>,
    /// Target of `error`.
    pub error:  Box<dyn Write>,
    /// Source of `readline`, `read` and `readchar`.
    pub input:  Box<dyn BufRead>,
}

impl Default for Streams {
    fn default() -> Self {
        Self { output: Box::new(io::stdout()),
               error:  Box::new(io::stderr()),
               input:  Box::new(BufReader::new(io::stdin())), }
    }
}

impl fmt::Debug for Streams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Streams").finish_non_exhaustive()
    }
}
