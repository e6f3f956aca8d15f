//! Column type descriptors and the type-code grammar.
//!
//! A header annotation such as `tags(a.s)` carries a short type code that
//! selects one of five coercions:
//!
//! | Code     | Descriptor | JSON value |
//! |----------|------------|------------|
//! | `i`      | Integer    | number     |
//! | `f`      | Float      | number     |
//! | `s`      | String     | string     |
//! | `b`      | Boolean    | `true` / `false` |
//! | `a.<T>`  | Array of T | array      |
//!
//! Array codes nest, so `a.a.i` is an array of arrays of integers.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TypeError};
use crate::value::TypedValue;

/// Separator between array pieces inside a single cell.
pub const ARRAY_SEPARATOR: char = ',';

/// Coercion applied to every cell of a column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    Integer,
    Float,
    String,
    Boolean,
    Array(Box<TypeDescriptor>),
}

impl TypeDescriptor {
    /// Build an array descriptor around `element`.
    #[must_use]
    pub fn array_of(element: TypeDescriptor) -> Self {
        Self::Array(Box::new(element))
    }

    /// Decode a type code (`i`, `f`, `s`, `b`, `a.<code>`).
    pub fn from_code(code: &str) -> Result<Self> {
        if let Some((prefix, rest)) = code.split_once('.') {
            if prefix == "a" {
                return Ok(Self::array_of(Self::from_code(rest)?));
            }
            return Err(TypeError::unsupported(code));
        }
        match code {
            "i" => Ok(Self::Integer),
            "f" => Ok(Self::Float),
            "s" => Ok(Self::String),
            "b" => Ok(Self::Boolean),
            _ => Err(TypeError::unsupported(code)),
        }
    }

    /// Coerce one raw cell.
    pub fn parse(&self, cell: &str) -> Result<TypedValue> {
        match self {
            Self::Integer => parse_integer(cell).map(TypedValue::Integer),
            Self::Float => parse_float(cell).map(TypedValue::Float),
            Self::String => Ok(TypedValue::String(cell.trim_matches(' ').to_string())),
            Self::Boolean => parse_boolean(cell).map(TypedValue::Boolean),
            Self::Array(element) => cell
                .split(ARRAY_SEPARATOR)
                .filter(|piece| !piece.is_empty())
                .map(|piece| element.parse(piece))
                .collect::<Result<Vec<_>>>()
                .map(TypedValue::Array),
        }
    }

    /// Human-readable name, e.g. `array of integer`.
    #[must_use]
    pub fn type_name(&self) -> String {
        match self {
            Self::Integer => "integer".to_string(),
            Self::Float => "float".to_string(),
            Self::String => "string".to_string(),
            Self::Boolean => "boolean".to_string(),
            Self::Array(element) => format!("array of {}", element.type_name()),
        }
    }

    /// Number of array levels wrapping the scalar type.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Array(element) => 1 + element.depth(),
            _ => 0,
        }
    }
}

impl FromStr for TypeDescriptor {
    type Err = TypeError;

    fn from_str(code: &str) -> Result<Self> {
        Self::from_code(code)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => f.write_str("i"),
            Self::Float => f.write_str("f"),
            Self::String => f.write_str("s"),
            Self::Boolean => f.write_str("b"),
            Self::Array(element) => write!(f, "a.{element}"),
        }
    }
}

fn parse_integer(cell: &str) -> Result<i64> {
    cell.trim()
        .parse::<i64>()
        .map_err(|_| TypeError::invalid_number(cell, "integer"))
}

fn parse_float(cell: &str) -> Result<f64> {
    match cell.trim().parse::<f64>() {
        // JSON has no representation for NaN or infinities.
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(TypeError::invalid_number(cell, "float")),
    }
}

/// Integer literals of any magnitude are accepted; only zero is false.
fn parse_boolean(cell: &str) -> Result<bool> {
    let trimmed = cell.trim();
    let digits = trimmed.strip_prefix(&['+', '-'][..]).unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(TypeError::InvalidBoolean {
            value: cell.to_string(),
        });
    }
    Ok(digits.bytes().any(|byte| byte != b'0'))
}
