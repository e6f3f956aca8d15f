//! JSON rendering of converted records.

use std::fmt::Write as _;

use csvjson_model::Record;
use serde::Serialize;
use serde_json::Serializer;
use serde_json::ser::PrettyFormatter;

use crate::error::Result;
use crate::options::JsonStyle;

/// Render records as a JSON array.
///
/// Compact output uses `,` and `:` without padding; indented output puts
/// one member per line with `": "` between key and value. No trailing
/// newline is written.
pub fn render_records(records: &[Record], style: &JsonStyle) -> Result<String> {
    let mut buffer = Vec::new();
    if style.is_compact() {
        serde_json::to_writer(&mut buffer, records)?;
    } else {
        let indent = vec![b' '; style.indent];
        let formatter = PrettyFormatter::with_indent(&indent);
        let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
        records.serialize(&mut serializer)?;
    }
    let rendered = String::from_utf8(buffer)?;
    if style.ensure_ascii {
        Ok(escape_non_ascii(&rendered))
    } else {
        Ok(rendered)
    }
}

/// Replace every non-ASCII character with `\uXXXX` escapes.
///
/// Characters outside the basic multilingual plane become a surrogate
/// pair. Only valid on JSON text, where non-ASCII can only occur inside
/// string literals.
pub fn escape_non_ascii(json: &str) -> String {
    let mut escaped = String::with_capacity(json.len());
    let mut units = [0u16; 2];
    for ch in json.chars() {
        if ch.is_ascii() {
            escaped.push(ch);
            continue;
        }
        for unit in ch.encode_utf16(&mut units).iter() {
            let _ = write!(escaped, "\\u{unit:04x}");
        }
    }
    escaped
}
