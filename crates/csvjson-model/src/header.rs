//! Header row decoding.
//!
//! Each header cell of the form `name(code)` declares an output column.
//! Cells that do not follow this form are treated as comment columns and
//! left out of every record.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::descriptor::TypeDescriptor;
use crate::error::Result;

static ANNOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([a-z_\-]+)\s*\(([a-z.]+)\)$").expect("header annotation pattern")
});

/// A declared output column: lowercase name plus its coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    name: String,
    descriptor: TypeDescriptor,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, descriptor: TypeDescriptor) -> Self {
        Self {
            name: name.into().to_lowercase(),
            descriptor,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }
}

/// Annotated columns keyed by their zero-based position in the row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    columns: BTreeMap<usize, ColumnSpec>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, index: usize, column: ColumnSpec) {
        self.columns.insert(index, column);
    }

    pub fn get(&self, index: usize) -> Option<&ColumnSpec> {
        self.columns.get(&index)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Columns in ascending index order.
    pub fn iter(&self) -> btree_map::Iter<'_, usize, ColumnSpec> {
        self.columns.iter()
    }

    /// Minimum row width needed to read every annotated column.
    pub fn required_width(&self) -> usize {
        self.columns
            .last_key_value()
            .map_or(0, |(index, _)| index + 1)
    }
}

impl<'a> IntoIterator for &'a HeaderMap {
    type Item = (&'a usize, &'a ColumnSpec);
    type IntoIter = btree_map::Iter<'a, usize, ColumnSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Parse one header cell; `Ok(None)` when the cell carries no annotation.
pub fn parse_annotation(cell: &str) -> Result<Option<ColumnSpec>> {
    let Some(captures) = ANNOTATION.captures(cell.trim()) else {
        return Ok(None);
    };
    let descriptor = TypeDescriptor::from_code(&captures[2])?;
    Ok(Some(ColumnSpec::new(&captures[1], descriptor)))
}

/// Build the header map from the first row of the table.
///
/// # Errors
///
/// Returns [`TypeError::UnsupportedType`](crate::TypeError::UnsupportedType)
/// when an annotated cell uses an unknown type code.
pub fn decode_header<S: AsRef<str>>(row: &[S]) -> Result<HeaderMap> {
    let mut header = HeaderMap::new();
    for (index, cell) in row.iter().enumerate() {
        let cell = cell.as_ref();
        match parse_annotation(cell)? {
            Some(column) => {
                debug!(
                    index,
                    name = column.name(),
                    column_type = %column.descriptor().type_name(),
                    "decoded header column"
                );
                header.insert(index, column);
            }
            None => debug!(index, cell, "skipping unannotated header column"),
        }
    }
    Ok(header)
}
