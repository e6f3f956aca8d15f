//! CLI argument definitions for the csvjson converter.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use colorchoice_clap::Color;

use csvjson_ingest::{JsonStyle, ReaderOptions, TranslatorConfig};

#[derive(Parser)]
#[command(
    name = "csvjson",
    version,
    about = "Convert an annotated CSV table into a JSON array of typed records",
    long_about = "Convert an annotated CSV table into a JSON array of typed records.\n\n\
                  Header cells of the form name(code) declare output columns, where code is\n\
                  i (integer), f (float), s (string), b (boolean) or a.<code> (array).\n\
                  Header cells without an annotation are ignored."
)]
pub struct Cli {
    /// The input file path.
    #[arg(value_name = "INFILE")]
    pub infile: PathBuf,

    /// The output file path.
    #[arg(value_name = "OUTFILE")]
    pub outfile: PathBuf,

    /// Field delimiter of the input file.
    #[arg(
        short = 'd',
        long = "delimiter",
        value_name = "CHAR",
        default_value = ";",
        value_parser = parse_ascii_char
    )]
    pub delimiter: u8,

    /// Quote character used to parse the input file.
    #[arg(
        short = 'q',
        long = "quote",
        value_name = "CHAR",
        default_value = "\"",
        value_parser = parse_ascii_char
    )]
    pub quote: u8,

    /// Indent the JSON output by this many spaces (0 writes compact JSON).
    #[arg(short = 's', long = "smart", value_name = "N", default_value_t = 0)]
    pub smart: usize,

    /// Write non-ASCII characters as raw UTF-8 instead of \uXXXX escapes.
    #[arg(long = "no-ensure-ascii")]
    pub no_ensure_ascii: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Map the parsed arguments onto a conversion run.
    pub fn translator_config(&self) -> TranslatorConfig {
        TranslatorConfig::new(&self.infile, &self.outfile)
            .with_reader(
                ReaderOptions::new()
                    .with_delimiter(self.delimiter)
                    .with_quote(self.quote),
            )
            .with_style(
                JsonStyle::new()
                    .with_indent(self.smart)
                    .with_ensure_ascii(!self.no_ensure_ascii),
            )
    }
}

/// Accept exactly one ASCII character.
fn parse_ascii_char(value: &str) -> Result<u8, String> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) if ch.is_ascii() => Ok(ch as u8),
        (Some(_), None) => Err(format!("'{value}' is not an ASCII character")),
        _ => Err(format!("expected a single character, got '{value}'")),
    }
}

/// CLI log level choices.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
