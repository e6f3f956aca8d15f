use std::fs;
use std::path::Path;
use std::time::Instant;

use csv::StringRecord;
use csvjson_model::{HeaderMap, decode_header};
use tracing::{debug, info};

use crate::error::{IngestError, Result};
use crate::options::ReaderOptions;

/// One data row with the source line it started on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataRow {
    pub line: u64,
    pub cells: Vec<String>,
}

impl DataRow {
    pub fn new(line: u64, cells: Vec<String>) -> Self {
        Self { line, cells }
    }

    pub fn width(&self) -> usize {
        self.cells.len()
    }
}

/// A fully buffered input: decoded header plus raw data rows.
#[derive(Debug, Clone)]
pub struct Table {
    pub header: HeaderMap,
    pub rows: Vec<DataRow>,
}

fn normalize_header_cell(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').to_string()
}

fn is_line_terminator(byte: u8) -> bool {
    byte == b'\n' || byte == b'\r'
}

/// Follows the csv reader through the raw input to recover blank lines.
///
/// The reader skips empty lines, but they still count as rows with no
/// cells, so they are replayed as empty `DataRow`s.
struct LineCursor<'a> {
    data: &'a [u8],
    offset: usize,
    line: u64,
}

impl<'a> LineCursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            offset: 0,
            line: 1,
        }
    }

    /// Consume one byte, or one `\r\n` pair.
    fn step(&mut self) {
        let Some(&byte) = self.data.get(self.offset) else {
            return;
        };
        self.offset += 1;
        if byte == b'\r' && self.data.get(self.offset) == Some(&b'\n') {
            self.offset += 1;
        }
        if is_line_terminator(byte) {
            self.line += 1;
        }
    }

    /// Move past a record the reader just returned, including its terminator.
    fn finish_record(&mut self, end: u64) {
        let end = usize::try_from(end).map_or(self.data.len(), |end| end.min(self.data.len()));
        let start = self.offset;
        while self.offset < end {
            self.step();
        }
        let terminated = self.offset > start && is_line_terminator(self.data[self.offset - 1]);
        let at_terminator = self
            .data
            .get(self.offset)
            .is_some_and(|&byte| is_line_terminator(byte));
        if !terminated && at_terminator {
            self.step();
        }
    }

    /// Consume empty lines at the cursor, returning their line numbers.
    fn take_blank_lines(&mut self) -> Vec<u64> {
        let mut blanks = Vec::new();
        while let Some(&byte) = self.data.get(self.offset) {
            if !is_line_terminator(byte) {
                break;
            }
            blanks.push(self.line);
            self.step();
        }
        blanks
    }
}

/// Read the whole file, decoding the first record as the header.
///
/// Blank lines after the header become rows with no cells.
pub fn read_table(path: &Path, options: &ReaderOptions) -> Result<Table> {
    let started = Instant::now();
    let csv_error = |source: csv::Error| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let data = fs::read(path).map_err(|source| csv_error(csv::Error::from(source)))?;
    let mut reader = options.reader_builder().from_reader(data.as_slice());
    let mut cursor = LineCursor::new(&data);
    let mut record = StringRecord::new();

    if !reader.read_record(&mut record).map_err(csv_error)? {
        return Err(IngestError::MissingHeader {
            path: path.to_path_buf(),
        });
    }
    let header_cells: Vec<String> = record.iter().map(normalize_header_cell).collect();
    let header = decode_header(header_cells.as_slice())?;
    debug!(
        width = header_cells.len(),
        annotated = header.len(),
        required_width = header.required_width(),
        "decoded header"
    );

    let mut rows = Vec::new();
    loop {
        cursor.finish_record(reader.position().byte());
        for line in cursor.take_blank_lines() {
            debug!(line, "blank line");
            rows.push(DataRow::new(line, Vec::new()));
        }
        let line = cursor.line;
        if !reader.read_record(&mut record).map_err(csv_error)? {
            break;
        }
        rows.push(DataRow::new(
            line,
            record.iter().map(str::to_string).collect(),
        ));
    }

    info!(
        path = %path.display(),
        columns = header.len(),
        rows = rows.len(),
        duration_ms = started.elapsed().as_millis(),
        "loaded table"
    );
    Ok(Table { header, rows })
}
