use crate::error::CliError;
use model::{Record, Schema};
use predicate_engine::Predicate;
use std::io::{BufRead, Write};
use tracing::info;

/// Tally of one filtering run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub read: usize,
    pub matched: usize,
}

/// Tests every JSON-lines record from `input` and writes the matching lines
/// to `out` unchanged. With `count_only`, writes just the number of matches.
/// Blank lines are skipped.
pub fn filter_records<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    predicate: &Predicate,
    schema: &Schema,
    count_only: bool,
) -> Result<RunSummary, CliError> {
    let mut summary = RunSummary::default();

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let record = parse_record(&line, index + 1, schema)?;
        summary.read += 1;

        if predicate.test(&record) {
            summary.matched += 1;
            if !count_only {
                writeln!(out, "{line}")?;
            }
        }
    }

    if count_only {
        writeln!(out, "{}", summary.matched)?;
    }

    info!("Matched {} of {} record(s)", summary.matched, summary.read);
    Ok(summary)
}

fn parse_record(line: &str, line_no: usize, schema: &Schema) -> Result<Record, CliError> {
    let json: serde_json::Value =
        serde_json::from_str(line).map_err(|source| CliError::RecordJson {
            line: line_no,
            source,
        })?;
    Record::from_json(&json, schema).map_err(|source| CliError::RecordShape {
        line: line_no,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use filter_syntax::{FilterNode, FilterOperator};
    use model::DataType;
    use predicate_engine::compile;
    use std::io::Cursor;

    fn setup() -> (Schema, Predicate) {
        let schema = Schema::new("person")
            .with_field("name", DataType::String)
            .with_field("tags", DataType::list_of(DataType::String));
        let node = FilterNode::condition("tags", FilterOperator::In, vec!["x"]);
        let predicate = compile(&node, &schema).unwrap();
        (schema, predicate)
    }

    const INPUT: &str = r#"{"name": "a", "tags": ["x", "y"]}

{"name": "b", "tags": ["q"]}
{"name": "c"}
"#;

    #[test]
    fn test_matching_lines_are_echoed() {
        let (schema, predicate) = setup();
        let mut out = Vec::new();
        let summary = filter_records(Cursor::new(INPUT), &mut out, &predicate, &schema, false).unwrap();

        assert_eq!(summary, RunSummary { read: 3, matched: 1 });
        assert_eq!(String::from_utf8(out).unwrap(), "{\"name\": \"a\", \"tags\": [\"x\", \"y\"]}\n");
    }

    #[test]
    fn test_count_only() {
        let (schema, predicate) = setup();
        let mut out = Vec::new();
        filter_records(Cursor::new(INPUT), &mut out, &predicate, &schema, true).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1\n");
    }

    #[test]
    fn test_bad_record_reports_line() {
        let (schema, predicate) = setup();
        let input = "{\"name\": \"a\"}\n{\"name\": 5}\n";
        let err = filter_records(Cursor::new(input), &mut Vec::new(), &predicate, &schema, false).unwrap_err();
        assert!(matches!(err, CliError::RecordShape { line: 2, .. }));

        let err = filter_records(Cursor::new("nope\n"), &mut Vec::new(), &predicate, &schema, false).unwrap_err();
        assert!(matches!(err, CliError::RecordJson { line: 1, .. }));
    }
}
