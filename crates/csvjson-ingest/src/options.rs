//! Reader, output and translator options.

use std::path::{Path, PathBuf};

use csv::ReaderBuilder;

/// Default field delimiter.
pub const DEFAULT_DELIMITER: u8 = b';';

/// Default quote character.
pub const DEFAULT_QUOTE: u8 = b'"';

/// How the delimited input is tokenized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Field delimiter (default: `;`).
    pub delimiter: u8,
    /// Quote character (default: `"`).
    pub quote: u8,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            quote: DEFAULT_QUOTE,
        }
    }
}

impl ReaderOptions {
    /// Create reader options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the quote character.
    #[must_use]
    pub fn with_quote(mut self, quote: u8) -> Self {
        self.quote = quote;
        self
    }

    /// Rows may have any width; the header is read as an ordinary record.
    pub(crate) fn reader_builder(&self) -> ReaderBuilder {
        let mut builder = ReaderBuilder::new();
        builder
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .quote(self.quote)
            .double_quote(true);
        builder
    }
}

/// JSON layout of the output document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonStyle {
    /// Spaces per nesting level; 0 renders compact output.
    pub indent: usize,
    /// Escape every non-ASCII character as `\uXXXX` (default: on).
    pub ensure_ascii: bool,
}

impl Default for JsonStyle {
    fn default() -> Self {
        Self {
            indent: 0,
            ensure_ascii: true,
        }
    }
}

impl JsonStyle {
    /// Compact, ASCII-only output.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indentation width.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Enable or disable non-ASCII escaping.
    #[must_use]
    pub fn with_ensure_ascii(mut self, enable: bool) -> Self {
        self.ensure_ascii = enable;
        self
    }

    #[must_use]
    pub fn is_compact(&self) -> bool {
        self.indent == 0
    }
}

/// Everything a single conversion run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatorConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub reader: ReaderOptions,
    pub style: JsonStyle,
}

impl TranslatorConfig {
    pub fn new(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Self {
        Self {
            input: input.as_ref().to_path_buf(),
            output: output.as_ref().to_path_buf(),
            reader: ReaderOptions::default(),
            style: JsonStyle::default(),
        }
    }

    #[must_use]
    pub fn with_reader(mut self, reader: ReaderOptions) -> Self {
        self.reader = reader;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: JsonStyle) -> Self {
        self.style = style;
        self
    }
}
