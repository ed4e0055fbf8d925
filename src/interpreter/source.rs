use std::rc::Rc;

/// Index of a source buffer in a [`SourceMap`].
pub type SourceId = usize;

/// A named buffer of program text.
#[derive(Debug, Clone)]
pub struct SourceFile {
    name:        String,
    text:        Rc<str>,
    line_starts: Vec<usize>,
}

impl SourceFile {
    fn new(name: String, text: &str) -> Self {
        let line_starts = std::iter::once(0).chain(text.match_indices('\n').map(|(i, _)| i + 1))
                                            .collect();
        Self { name,
               text: Rc::from(text),
               line_starts }
    }

    /// The file name, or a pseudo name such as `<eval>`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full program text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Converts a byte offset into a 1-based `(line, column)` pair.
    ///
    /// # Example
    /// ```
    /// use stutsk::interpreter::source::SourceMap;
    ///
    /// let mut sources = SourceMap::default();
    /// let id = sources.add("demo", "1 2 +\n\"x\" print");
    /// let file = sources.get(id).unwrap();
    ///
    /// assert_eq!(file.position(0), (1, 1));
    /// assert_eq!(file.position(6), (2, 1));
    /// assert_eq!(file.position(10), (2, 5));
    /// ```
    #[must_use]
    pub fn position(&self, offset: usize) -> (usize, usize) {
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let start = self.line_starts[line.saturating_sub(1)];
        let column = self.text
                         .get(start..offset.min(self.text.len()))
                         .map_or(offset - start, |prefix| prefix.chars().count());
        (line.max(1), column + 1)
    }
}

/// Append-only registry of every source text the interpreter has parsed.
///
/// Tokens refer back to their source through a [`SourceId`], which stays
/// valid for the lifetime of the registry.
#[derive(Debug, Clone, Default)]
pub struct SourceMap {
    files: Vec<SourceFile>,
}

impl SourceMap {
    /// Registers a new source buffer and returns its id.
    pub fn add(&mut self, name: impl Into<String>, text: &str) -> SourceId {
        self.files.push(SourceFile::new(name.into(), text));
        self.files.len() - 1
    }

    /// Looks up a registered source.
    #[must_use]
    pub fn get(&self, id: SourceId) -> Option<&SourceFile> {
        self.files.get(id)
    }

    /// Returns the name of a registered source, or `<unknown>`.
    #[must_use]
    pub fn name(&self, id: SourceId) -> &str {
        self.get(id).map_or("<unknown>", SourceFile::name)
    }

    /// Number of registered sources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if nothing has been registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
