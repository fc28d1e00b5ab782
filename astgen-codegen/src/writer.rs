//! Indentation-aware line buffer for generated source.

/// Accumulates generated lines at the current indentation level.
///
/// Blank lines carry no indentation. Every line, including the last, ends
/// with `\n`.
#[derive(Debug)]
pub struct CodeWriter<'a> {
    indent: &'a str,
    level: usize,
    output: String,
}

impl<'a> CodeWriter<'a> {
    /// Creates an empty writer using `indent` for one level.
    #[must_use]
    pub fn new(indent: &'a str) -> Self {
        Self {
            indent,
            level: 0,
            output: String::new(),
        }
    }

    /// Writes one line at the current level.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if text.is_empty() {
            self.blank();
            return;
        }
        for _ in 0..self.level {
            self.output.push_str(self.indent);
        }
        self.output.push_str(text);
        self.output.push('\n');
    }

    /// Writes an empty line.
    pub fn blank(&mut self) {
        self.output.push('\n');
    }

    /// Writes a `//` comment line.
    pub fn comment(&mut self, text: &str) {
        if text.is_empty() {
            self.line("//");
        } else {
            self.line(format!("// {text}"));
        }
    }

    /// Writes `{` and indents following lines.
    pub fn open(&mut self) {
        self.line("{");
        self.level += 1;
    }

    /// Dedents and writes `}`.
    pub fn close(&mut self) {
        self.level = self.level.saturating_sub(1);
        self.line("}");
    }

    /// Writes `header`, then a braced block filled by `body`.
    pub fn block(&mut self, header: impl AsRef<str>, body: impl FnOnce(&mut Self)) {
        self.line(header);
        self.open();
        body(self);
        self.close();
    }

    /// Returns the current indentation level.
    #[must_use]
    pub fn level(&self) -> usize {
        self.level
    }

    /// Consumes the writer and returns the text.
    #[must_use]
    pub fn finish(self) -> String {
        self.output
    }
}
