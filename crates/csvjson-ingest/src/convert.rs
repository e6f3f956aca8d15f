//! Row to record conversion.

use csvjson_model::{HeaderMap, Record};
use tracing::trace;

use crate::error::{IngestError, Result};
use crate::table::DataRow;

/// Coerce every annotated cell of `row`, in ascending column order.
pub fn convert_row(row: &DataRow, header: &HeaderMap) -> Result<Record> {
    let mut record = Record::with_capacity(header.len());
    for (&index, column) in header {
        let cell = row.cells.get(index).ok_or(IngestError::RowTooShort {
            line: row.line,
            index,
            width: row.width(),
        })?;
        let value = column
            .descriptor()
            .parse(cell)
            .map_err(|source| IngestError::Cell {
                line: row.line,
                index,
                column: column.name().to_string(),
                source,
            })?;
        record.insert(column.name(), value);
    }
    trace!(line = row.line, fields = record.len(), "converted row");
    Ok(record)
}

/// Convert all rows, stopping at the first failure.
pub fn convert(rows: &[DataRow], header: &HeaderMap) -> Result<Vec<Record>> {
    rows.iter().map(|row| convert_row(row, header)).collect()
}
