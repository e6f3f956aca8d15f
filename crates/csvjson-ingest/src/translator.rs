//! Conversion driver.
//!
//! A run moves through `check` → `load` → `dump`, each step consuming the
//! previous state:
//!
//! ```no_run
//! use csvjson_ingest::{Translator, TranslatorConfig};
//!
//! let config = TranslatorConfig::new("people.csv", "people.json");
//! let summary = Translator::new(config).check()?.load()?.dump()?;
//! println!("{} records", summary.records);
//! # Ok::<(), csvjson_ingest::IngestError>(())
//! ```
//!
//! Records are rendered in memory before the output file is opened, so a
//! failed run never leaves a truncated file behind.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use csvjson_model::{HeaderMap, Record};
use tracing::{info, info_span};

use crate::convert::convert;
use crate::error::{IngestError, Result};
use crate::json::render_records;
use crate::options::TranslatorConfig;
use crate::table::{DataRow, Table, read_table};

/// A conversion whose input has not been checked yet.
#[derive(Debug, Clone)]
pub struct Translator {
    config: TranslatorConfig,
}

/// Input confirmed to be an existing regular file.
#[derive(Debug, Clone)]
pub struct CheckedTranslator {
    config: TranslatorConfig,
}

/// Header decoded and all data rows buffered.
#[derive(Debug, Clone)]
pub struct LoadedTranslator {
    config: TranslatorConfig,
    table: Table,
}

/// Outcome of a successful dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpSummary {
    pub output: PathBuf,
    pub records: usize,
    pub bytes: usize,
}

impl Translator {
    pub fn new(config: TranslatorConfig) -> Self {
        Self { config }
    }

    /// Verify that the input path names an existing regular file.
    pub fn check(self) -> Result<CheckedTranslator> {
        let input = &self.config.input;
        if !input.is_file() {
            let path = std::path::absolute(input).unwrap_or_else(|_| input.clone());
            return Err(IngestError::FileNotFound { path });
        }
        Ok(CheckedTranslator {
            config: self.config,
        })
    }
}

impl CheckedTranslator {
    /// Read the input, decoding the header and buffering every data row.
    pub fn load(self) -> Result<LoadedTranslator> {
        let table = read_table(&self.config.input, &self.config.reader)?;
        Ok(LoadedTranslator {
            config: self.config,
            table,
        })
    }
}

impl LoadedTranslator {
    pub fn header(&self) -> &HeaderMap {
        &self.table.header
    }

    pub fn rows(&self) -> &[DataRow] {
        &self.table.rows
    }

    /// Convert every buffered row; fails on the first bad cell or short row.
    pub fn build(&self) -> Result<Vec<Record>> {
        let started = Instant::now();
        let records = convert(&self.table.rows, &self.table.header)?;
        info!(
            records = records.len(),
            duration_ms = started.elapsed().as_millis(),
            "converted rows"
        );
        Ok(records)
    }

    /// Convert and render the output document without writing it.
    pub fn render(&self) -> Result<String> {
        let records = self.build()?;
        render_records(&records, &self.config.style)
    }

    /// Convert, render and write the output file.
    pub fn dump(self) -> Result<DumpSummary> {
        let records = self.build()?;
        let rendered = render_records(&records, &self.config.style)?;
        write_output(&self.config.output, rendered.as_bytes())?;
        info!(
            path = %self.config.output.display(),
            records = records.len(),
            bytes = rendered.len(),
            "wrote output"
        );
        Ok(DumpSummary {
            output: self.config.output,
            records: records.len(),
            bytes: rendered.len(),
        })
    }
}

fn write_output(path: &Path, contents: &[u8]) -> Result<()> {
    fs::write(path, contents).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Run check, load and dump in order.
pub fn translate(config: TranslatorConfig) -> Result<DumpSummary> {
    let span = info_span!(
        "translate",
        input = %config.input.display(),
        output = %config.output.display()
    );
    let _guard = span.enter();
    Translator::new(config).check()?.load()?.dump()
}
