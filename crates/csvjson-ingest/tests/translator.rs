//! End-to-end tests for the check → load → dump chain.

use std::fs;
use std::path::{Path, PathBuf};

use csvjson_ingest::{
    IngestError, JsonStyle, ReaderOptions, Translator, TranslatorConfig, translate,
};
use csvjson_model::TypeError;
use tempfile::TempDir;

const PEOPLE: &str = "name(s);age(i);tags(a.s)\nAlice;30;red,blue\nBob;25;\n";

fn write_input(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write input");
    path
}

fn read_output(path: &Path) -> String {
    fs::read_to_string(path).expect("read output")
}

#[test]
fn converts_people_table_to_compact_json() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_input(&dir, "people.csv", PEOPLE);
    let output = dir.path().join("people.json");

    let summary = translate(TranslatorConfig::new(&input, &output)).expect("translate");

    assert_eq!(summary.records, 2);
    assert_eq!(summary.output, output);
    let json = read_output(&output);
    assert_eq!(summary.bytes, json.len());
    assert_eq!(
        json,
        r#"[{"name":"Alice","age":30,"tags":["red","blue"]},{"name":"Bob","age":25,"tags":[]}]"#
    );
}

#[test]
fn pretty_output_uses_the_requested_indent() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_input(&dir, "people.csv", PEOPLE);
    let output = dir.path().join("people.json");
    let config =
        TranslatorConfig::new(&input, &output).with_style(JsonStyle::new().with_indent(2));

    translate(config).expect("translate");

    insta::assert_snapshot!(read_output(&output), @r#"
[
  {
    "name": "Alice",
    "age": 30,
    "tags": [
      "red",
      "blue"
    ]
  },
  {
    "name": "Bob",
    "age": 25,
    "tags": []
  }
]
"#);
}

#[test]
fn rerunning_produces_identical_bytes() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_input(&dir, "people.csv", PEOPLE);
    let first = dir.path().join("first.json");
    let second = dir.path().join("second.json");

    translate(TranslatorConfig::new(&input, &first)).expect("first run");
    translate(TranslatorConfig::new(&input, &second)).expect("second run");

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn double_quotes_are_plain_text_under_custom_quote() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_input(
        &dir,
        "scores.csv",
        "player(s),scores(a.i),ratio(f),active(b)\n'Smith, J',\"1,2\",0.5,1\n",
    );
    let output = dir.path().join("scores.json");
    let config = TranslatorConfig::new(&input, &output)
        .with_reader(ReaderOptions::new().with_delimiter(b',').with_quote(b'\''));

    // With `'` as the quote character the double quotes are ordinary text,
    // so the scores cell is split by the reader.
    let error = translate(config).expect_err("scores cell holds a quote");
    assert!(matches!(
        error.type_error(),
        Some(TypeError::InvalidNumber { .. })
    ));
    assert!(!output.exists());
}

#[test]
fn quoted_cells_may_hold_the_array_separator() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_input(
        &dir,
        "scores.csv",
        "player(s),scores(a.i),ratio(f),active(b)\n'Smith, J','1,2',0.5,1\n",
    );
    let output = dir.path().join("scores.json");
    let config = TranslatorConfig::new(&input, &output)
        .with_reader(ReaderOptions::new().with_delimiter(b',').with_quote(b'\''));

    translate(config).expect("translate");

    assert_eq!(
        read_output(&output),
        r#"[{"player":"Smith, J","scores":[1,2],"ratio":0.5,"active":true}]"#
    );
}

#[test]
fn comment_columns_are_dropped() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_input(
        &dir,
        "flags.csv",
        "id(i);notes;flag(b)\n1;first row;0\n2;;-3\n",
    );
    let output = dir.path().join("flags.json");

    translate(TranslatorConfig::new(&input, &output)).expect("translate");

    assert_eq!(
        read_output(&output),
        r#"[{"id":1,"flag":false},{"id":2,"flag":true}]"#
    );
}

#[test]
fn bad_cell_aborts_without_writing_output() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_input(&dir, "people.csv", "name(s);age(i)\nAlice;30\nBob;thirty\n");
    let output = dir.path().join("people.json");

    let error = translate(TranslatorConfig::new(&input, &output)).expect_err("bad age");

    match error {
        IngestError::Cell {
            line,
            index,
            column,
            source,
        } => {
            assert_eq!(line, 3);
            assert_eq!(index, 1);
            assert_eq!(column, "age");
            assert_eq!(
                source,
                TypeError::InvalidNumber {
                    value: "thirty".to_string(),
                    expected: "integer"
                }
            );
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!output.exists());
}

#[test]
fn failed_run_leaves_existing_output_untouched() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_input(&dir, "bad.csv", "flag(b)\nmaybe\n");
    let output = write_input(&dir, "previous.json", "[]");

    let error = translate(TranslatorConfig::new(&input, &output)).expect_err("bad flag");

    assert!(matches!(
        error.type_error(),
        Some(TypeError::InvalidBoolean { .. })
    ));
    assert_eq!(read_output(&output), "[]");
}

#[test]
fn short_row_is_an_error() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_input(&dir, "short.csv", "a(i);b(i);c(i)\n1;2;3\n4;5\n");
    let output = dir.path().join("short.json");

    let error = translate(TranslatorConfig::new(&input, &output)).expect_err("short row");

    assert!(matches!(
        error,
        IngestError::RowTooShort {
            line: 3,
            index: 2,
            width: 2
        }
    ));
}

#[test]
fn unsupported_type_fails_during_load() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_input(&dir, "types.csv", "id(i);when(d)\n1;2024\n");
    let output = dir.path().join("types.json");

    let checked = Translator::new(TranslatorConfig::new(&input, &output))
        .check()
        .expect("input exists");
    let error = checked.load().expect_err("d is not a type code");

    assert!(matches!(
        error,
        IngestError::Header(TypeError::UnsupportedType { ref code }) if code == "d"
    ));
}

#[test]
fn missing_input_is_reported_by_check() {
    let dir = TempDir::new().expect("temp dir");
    let input = dir.path().join("absent.csv");
    let output = dir.path().join("absent.json");

    let error = Translator::new(TranslatorConfig::new(&input, &output))
        .check()
        .expect_err("missing input");

    match &error {
        IngestError::FileNotFound { path } => assert!(path.ends_with("absent.csv")),
        other => panic!("unexpected error: {other}"),
    }
    assert!(error.to_string().contains("is not found"));
}

#[test]
fn directories_are_not_accepted_as_input() {
    let dir = TempDir::new().expect("temp dir");
    let output = dir.path().join("out.json");

    let error = Translator::new(TranslatorConfig::new(dir.path(), &output))
        .check()
        .expect_err("directory input");

    assert!(matches!(error, IngestError::FileNotFound { .. }));
}

#[test]
fn empty_input_has_no_header() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_input(&dir, "empty.csv", "");
    let output = dir.path().join("empty.json");

    let error = translate(TranslatorConfig::new(&input, &output)).expect_err("empty input");

    assert!(matches!(error, IngestError::MissingHeader { .. }));
}

#[test]
fn header_only_input_renders_empty_array() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_input(&dir, "header.csv", "id(i);name(s)\n");
    let output = dir.path().join("header.json");

    let summary = translate(TranslatorConfig::new(&input, &output)).expect("translate");

    assert_eq!(summary.records, 0);
    assert_eq!(read_output(&output), "[]");
}

#[test]
fn loaded_translator_exposes_header_and_rows() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_input(&dir, "people.csv", PEOPLE);
    let output = dir.path().join("people.json");

    let loaded = Translator::new(TranslatorConfig::new(&input, &output))
        .check()
        .expect("check")
        .load()
        .expect("load");

    assert_eq!(loaded.header().len(), 3);
    assert_eq!(loaded.rows().len(), 2);
    assert_eq!(loaded.rows()[1].cells, vec!["Bob", "25", ""]);
    assert_eq!(loaded.rows()[1].line, 3);
    assert!(loaded.render().expect("render").starts_with("[{\"name\":\"Alice\""));
    assert!(!output.exists());
}

#[test]
fn non_ascii_is_escaped_by_default() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_input(&dir, "cities.csv", "city(s)\nZürich\n");
    let output = dir.path().join("cities.json");

    translate(TranslatorConfig::new(&input, &output)).expect("translate");

    assert_eq!(read_output(&output), r#"[{"city":"Z\u00fcrich"}]"#);
}

#[test]
fn raw_utf8_output_is_opt_in() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_input(&dir, "cities.csv", "city(s)\nZürich\n");
    let output = dir.path().join("cities.json");
    let config = TranslatorConfig::new(&input, &output)
        .with_style(JsonStyle::new().with_ensure_ascii(false));

    translate(config).expect("translate");

    assert_eq!(read_output(&output), r#"[{"city":"Zürich"}]"#);
}

#[test]
fn blank_data_line_is_a_short_row() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_input(&dir, "gap.csv", "id(i);name(s)\n1;a\n\n2;b\n");
    let output = dir.path().join("gap.json");

    let error = translate(TranslatorConfig::new(&input, &output)).expect_err("blank line");

    assert!(matches!(
        error,
        IngestError::RowTooShort {
            line: 3,
            index: 0,
            width: 0
        }
    ));
    assert!(!output.exists());
}

#[test]
fn blank_lines_are_loaded_as_empty_rows() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_input(&dir, "gap.csv", "id(i)\r\n1\r\n\r\n2\r\n\r\n");
    let output = dir.path().join("gap.json");

    let loaded = Translator::new(TranslatorConfig::new(&input, &output))
        .check()
        .expect("check")
        .load()
        .expect("load");

    let lines: Vec<(u64, usize)> = loaded
        .rows()
        .iter()
        .map(|row| (row.line, row.width()))
        .collect();
    assert_eq!(lines, vec![(2, 1), (3, 0), (4, 1), (5, 0)]);
}

#[test]
fn blank_lines_without_annotated_columns_become_empty_records() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_input(&dir, "notes.csv", "notes\nfirst\n\n");
    let output = dir.path().join("notes.json");

    let summary = translate(TranslatorConfig::new(&input, &output)).expect("translate");

    assert_eq!(summary.records, 2);
    assert_eq!(read_output(&output), "[{},{}]");
}

#[test]
fn line_numbers_follow_multiline_cells() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_input(&dir, "memo.csv", "memo(s);n(i)\n\"two\nlines\";1\nx;oops\n");
    let output = dir.path().join("memo.json");

    let error = translate(TranslatorConfig::new(&input, &output)).expect_err("bad number");

    assert!(matches!(error, IngestError::Cell { line: 4, index: 1, .. }));
}

#[test]
fn byte_order_mark_does_not_hide_first_column() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_input(&dir, "bom.csv", "\u{feff}id(i);name(s)\n1;a\n");
    let output = dir.path().join("bom.json");

    translate(TranslatorConfig::new(&input, &output)).expect("translate");

    assert_eq!(read_output(&output), r#"[{"id":1,"name":"a"}]"#);
}
