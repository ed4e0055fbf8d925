use std::path::PathBuf;

/// Default limit on nested `run` activations.
pub const DEFAULT_MAX_DEPTH: usize = 10_000;

/// Settings an [`Interpreter`](crate::interpreter::evaluator::core::Interpreter)
/// is created with.
///
/// # Example
/// ```
/// use stutsk::interpreter::config::Config;
///
/// let config = Config::default().with_arguments(["one", "two"])
///                               .with_include_path("lib")
///                               .with_max_depth(64);
///
/// assert_eq!(config.arguments, vec!["one", "two"]);
/// assert_eq!(config.max_depth, 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Arguments passed through to the script, returned by `commandline`.
    pub arguments:     Vec<String>,
    /// Directories searched by `include` when the literal path does not exist.
    pub include_paths: Vec<PathBuf>,
    /// Maximum number of nested code block activations.
    pub max_depth:     usize,
}

impl Default for Config {
    fn default() -> Self {
        Self { arguments:     Vec::new(),
               include_paths: Vec::new(),
               max_depth:     DEFAULT_MAX_DEPTH, }
    }
}

impl Config {
    /// Replaces the pass-through arguments.
    #[must_use]
    pub fn with_arguments<I, S>(mut self, arguments: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        self.arguments = arguments.into_iter().map(Into::into).collect();
        self
    }

    /// Appends an include search directory.
    #[must_use]
    pub fn with_include_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.include_paths.push(path.into());
        self
    }

    /// Sets the maximum nesting depth.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
