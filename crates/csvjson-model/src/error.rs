//! Error types for type-code decoding and cell coercion.

use thiserror::Error;

/// Errors raised while decoding a type code or coercing a cell.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// The header annotation names a type code outside the grammar.
    #[error("the type \"{code}\" is not accepted")]
    UnsupportedType { code: String },

    /// A cell expected to be numeric could not be parsed.
    #[error("invalid {expected} value: \"{value}\"")]
    InvalidNumber {
        value: String,
        expected: &'static str,
    },

    /// A boolean cell is not an integer literal.
    #[error(
        "invalid boolean value \"{value}\": must be an integer where 0 means false and any other value true"
    )]
    InvalidBoolean { value: String },
}

impl TypeError {
    pub(crate) fn unsupported(code: impl Into<String>) -> Self {
        Self::UnsupportedType { code: code.into() }
    }

    pub(crate) fn invalid_number(value: &str, expected: &'static str) -> Self {
        Self::InvalidNumber {
            value: value.to_string(),
            expected,
        }
    }
}

pub type Result<T> = std::result::Result<T, TypeError>;
