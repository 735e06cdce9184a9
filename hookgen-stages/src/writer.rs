//! Indented text builder for generated TypeScript and config files.

/// Fluent API for building code with two-space indentation.
///
/// # Example
///
/// ```
/// use hookgen_stages::CodeWriter;
///
/// let code = CodeWriter::new()
///     .block_with_close("export class OrderModule {", "}", |w| w.line("// body"))
///     .build();
///
/// assert_eq!(code, "export class OrderModule {\n  // body\n}\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CodeWriter {
    indent_level: usize,
    buffer: String,
}

const INDENT: &str = "  ";

impl CodeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line with current indentation.
    pub fn line(mut self, s: &str) -> Self {
        for _ in 0..self.indent_level {
            self.buffer.push_str(INDENT);
        }
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a blank line (no indentation).
    pub fn blank(mut self) -> Self {
        self.buffer.push('\n');
        self
    }

    pub fn indent(mut self) -> Self {
        self.indent_level += 1;
        self
    }

    pub fn dedent(mut self) -> Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add a block with a closing line.
    pub fn block_with_close<F>(self, header: &str, close: &str, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        let writer = self.line(header).indent();
        f(writer).dedent().line(close)
    }

    /// Add a TSDoc comment (`/** text */`).
    pub fn jsdoc(self, text: &str) -> Self {
        self.line(&format!("/** {} */", text))
    }

    /// Conditionally add content.
    pub fn when<F>(self, condition: bool, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        if condition { f(self) } else { self }
    }

    /// Iterate and add content for each item.
    pub fn each<T, I, F>(mut self, items: I, f: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(Self, T) -> Self,
    {
        for item in items {
            self = f(self, item);
        }
        self
    }

    /// Consume the writer and return the text.
    pub fn build(self) -> String {
        self.buffer
    }
}
