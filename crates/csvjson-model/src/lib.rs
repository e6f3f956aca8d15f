//! Core model for typed CSV to JSON conversion.
//!
//! A header cell such as `age(i)` names an output column and the type code
//! its cells are coerced through. This crate holds the type-code grammar,
//! the header decoder and the record type produced per data row.
//!
//! ```
//! use csvjson_model::{TypeDescriptor, TypedValue, decode_header};
//!
//! let header = decode_header(&["id(i)", "notes", "tags(a.s)"]).unwrap();
//! assert_eq!(header.len(), 2);
//! assert!(header.get(1).is_none());
//!
//! let tags = header.get(2).unwrap();
//! assert_eq!(tags.descriptor(), &TypeDescriptor::array_of(TypeDescriptor::String));
//! assert_eq!(
//!     tags.descriptor().parse("red,,blue").unwrap(),
//!     TypedValue::from(vec!["red", "blue"])
//! );
//! ```

#![deny(unsafe_code)]

pub mod descriptor;
pub mod error;
pub mod header;
pub mod record;
pub mod value;

pub use descriptor::{ARRAY_SEPARATOR, TypeDescriptor};
pub use error::{Result, TypeError};
pub use header::{ColumnSpec, HeaderMap, decode_header, parse_annotation};
pub use record::Record;
pub use value::TypedValue;
