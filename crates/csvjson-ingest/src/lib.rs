//! Loading, conversion and JSON output for annotated delimited tables.

#![deny(unsafe_code)]

pub mod convert;
pub mod error;
pub mod json;
pub mod options;
pub mod table;
pub mod translator;

pub use convert::{convert, convert_row};
pub use error::{IngestError, Result};
pub use json::{escape_non_ascii, render_records};
pub use options::{DEFAULT_DELIMITER, DEFAULT_QUOTE, JsonStyle, ReaderOptions, TranslatorConfig};
pub use table::{DataRow, Table, read_table};
pub use translator::{CheckedTranslator, DumpSummary, LoadedTranslator, Translator, translate};
