//! Validation context and utilities for manifest parsing.

use std::sync::Arc;

use miette::SourceSpan;

use crate::{Result, error::SourceContext};

/// Parsing and validation context that carries source information.
///
/// Holds the source content, filename, and current path through the manifest
/// hierarchy so nested validation can produce errors that point into the
/// original file.
///
/// # Example
///
/// ```ignore
/// let ctx = ParseContext::new(src, "hookgen.toml");
/// ctx.validate_name("Order", "entity")?;
///
/// let nested = ctx.push("Order");
/// nested.validate_name("customer", "field")?;
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    /// Source context for error reporting (shared across nested contexts)
    source: Arc<SourceContext>,
    /// Path segments for nested validation (e.g., ["Order", "customer"])
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
            path: Vec::new(),
        }
    }

    pub fn src(&self) -> &str {
        self.source.src()
    }

    pub fn filename(&self) -> &str {
        self.source.filename()
    }

    /// Get the source context for error creation.
    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut path = self.path.clone();
        path.push(segment);
        Self {
            source: Arc::clone(&self.source),
            path,
        }
    }

    /// Get the current path as a dot-separated string.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Get a context description for error messages, e.g. "field in 'Order'".
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    /// Find the span of a table or key name in the source.
    pub fn find_span(&self, name: &str) -> Option<SourceSpan> {
        find_name_span(self.source.src(), name)
    }

    /// Find the span of a `key =` assignment's key.
    pub fn find_key_span(&self, key: &str) -> Option<SourceSpan> {
        find_key_span(self.source.src(), key)
    }

    /// Find the span of a quoted string value, excluding the quotes.
    pub fn find_quoted_span(&self, value: &str) -> Option<SourceSpan> {
        find_quoted_span(self.source.src(), value)
    }

    /// Validate that a name can be used as an identifier in generated code.
    pub fn validate_name(&self, name: &str, kind: &str) -> Result<()> {
        if is_reserved_word(name) {
            return Err(self.source.reserved_word_error(
                name,
                self.context_for(kind),
                self.find_span(name),
            ));
        }

        if let Some(reason) = validate_identifier(name) {
            return Err(self.source.invalid_identifier_error(
                name,
                self.context_for(kind),
                reason,
                self.find_span(name),
            ));
        }

        Ok(())
    }
}

/// TypeScript reserved words that cannot name entities or fields
pub(crate) const RESERVED_WORDS: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do",
    "else", "enum", "export", "extends", "false", "finally", "for", "function", "if", "import",
    "in", "instanceof", "new", "null", "return", "super", "switch", "this", "throw", "true", "try",
    "typeof", "var", "void", "while", "with",
    // Strict mode
    "implements", "interface", "let", "package", "private", "protected", "public", "static",
    "yield",
    // Contextual, but break generated declarations
    "any", "boolean", "number", "string", "symbol", "type", "await", "async",
];

pub(crate) fn is_reserved_word(name: &str) -> bool {
    RESERVED_WORDS.contains(&name)
}

/// Find the span of a name in the TOML source.
/// Searches for table headers (`.name]`, `.name.`) and inline or bare keys.
pub(crate) fn find_name_span(src: &str, name: &str) -> Option<SourceSpan> {
    let header_patterns = [format!(".{}]", name), format!(".{}.", name)];
    for pattern in &header_patterns {
        if let Some(pos) = src.find(pattern) {
            return Some(SourceSpan::from((pos + 1, name.len())));
        }
    }

    let inline_patterns = [
        (format!("{{ {} ", name), 2usize),
        (format!("{{ {}=", name), 2usize),
        (format!("{{{}=", name), 1usize),
        (format!(", {} ", name), 2usize),
        (format!(", {}=", name), 2usize),
        (format!(",{}=", name), 1usize),
    ];
    for (pattern, skip) in &inline_patterns {
        if let Some(pos) = src.find(pattern) {
            return Some(SourceSpan::from((pos + skip, name.len())));
        }
    }

    find_key_span(src, name)
}

/// Find a key at the start of a line, followed by `=`.
pub(crate) fn find_key_span(src: &str, key: &str) -> Option<SourceSpan> {
    let mut offset = 0;
    for line in src.split_inclusive('\n') {
        let trimmed = line.trim_start();
        let indent = line.len() - trimmed.len();
        let is_assignment = trimmed
            .strip_prefix(key)
            .is_some_and(|rest| rest.trim_start().starts_with('='));
        if is_assignment {
            return Some(SourceSpan::from((offset + indent, key.len())));
        }
        offset += line.len();
    }
    None
}

/// Find a quoted string value (`"value"` or `'value'`).
pub(crate) fn find_quoted_span(src: &str, value: &str) -> Option<SourceSpan> {
    [format!("\"{}\"", value), format!("'{}'", value)]
        .iter()
        .find_map(|pattern| src.find(pattern.as_str()))
        .map(|pos| SourceSpan::from((pos + 1, value.len())))
}

/// Validate that a name is a usable identifier.
/// Returns None if valid, Some(reason) if invalid.
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        Some(_) => return Some("name must start with a letter"),
        None => return Some("name cannot be empty"),
    }

    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Some("name must contain only letters, numbers, and underscores");
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_identifiers() {
        assert!(validate_identifier("Order").is_none());
        assert!(validate_identifier("order_item").is_none());
        assert!(validate_identifier("createdAt").is_none());
        assert!(validate_identifier("field2").is_none());
    }

    #[test]
    fn test_invalid_identifiers() {
        assert!(validate_identifier("").is_some());
        assert!(validate_identifier("2fa").is_some());
        assert!(validate_identifier("_private").is_some());
        assert!(validate_identifier("order-item").is_some());
        assert!(validate_identifier("order item").is_some());
    }

    #[test]
    fn test_reserved_words() {
        assert!(is_reserved_word("class"));
        assert!(is_reserved_word("interface"));
        assert!(is_reserved_word("string"));
        assert!(!is_reserved_word("Order"));
        assert!(!is_reserved_word("String"));
    }

    #[test]
    fn test_find_name_span_header() {
        let src = "[entities.Order.fields]\nid = \"id\"";
        let span = find_name_span(src, "Order").unwrap();
        assert_eq!(span.offset(), 10);
        assert_eq!(span.len(), 5);
    }

    #[test]
    fn test_find_name_span_bare_key() {
        let src = "[entities.Order.fields]\ntotal = \"float\"";
        let span = find_name_span(src, "total").unwrap();
        assert_eq!(span.offset(), 24);
        assert_eq!(span.len(), 5);
    }

    #[test]
    fn test_find_key_span_ignores_values() {
        let src = "description = \"name of the shop\"\n  name = \"shop\"";
        let span = find_key_span(src, "name").unwrap();
        assert_eq!(span.offset(), 35);
    }

    #[test]
    fn test_find_quoted_span() {
        let src = "customer = { type = \"lookup\", target = 'Customer' }";
        let span = find_quoted_span(src, "Customer").unwrap();
        assert_eq!(&src[span.offset()..span.offset() + span.len()], "Customer");
        assert!(find_quoted_span(src, "Order").is_none());
    }

    #[test]
    fn test_parse_context_context_for() {
        let ctx = ParseContext::new("", "hookgen.toml");
        assert_eq!(ctx.context_for("entity"), "entity");
        assert_eq!(ctx.push("Order").context_for("field"), "field in 'Order'");
        assert_eq!(ctx.filename(), "hookgen.toml");
    }

    #[test]
    fn test_parse_context_validate_name() {
        let ctx = ParseContext::new("[entities.class]\n", "hookgen.toml");
        assert!(ctx.validate_name("Order", "entity").is_ok());

        let err = ctx.validate_name("class", "entity").unwrap_err();
        assert!(err.to_string().contains("reserved word"));
        assert!(ctx.validate_name("9lives", "entity").is_err());
    }
}
