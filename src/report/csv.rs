// src/report/csv.rs
//! CSV rendering of comparison results, plus a reader for round-trips.
//!
//! Header: `folder1,folder2,file1,file2,type1,type2,<metric_1>,...`, one row
//! per type comparison. Fields containing commas, quotes, or newlines are
//! quoted with doubled inner quotes, so arbitrary folder paths survive a
//! write/read cycle.

use std::fs;
use std::path::{Path, PathBuf};

use crate::compare::{FolderComparison, TypeComparison};
use crate::error::{Result, SiftError};
use crate::matching::Metric;

/// Number of fixed columns before the metric columns.
const FIXED_COLUMNS: usize = 6;

/// Writes the comparison list to `path`. An empty list produces an empty
/// file.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_csv(comparisons: &[FolderComparison], path: &Path) -> Result<()> {
    fs::write(path, render(comparisons)).map_err(|e| SiftError::io(e, path))
}

/// Renders the comparison list as CSV text.
#[must_use]
pub fn render(comparisons: &[FolderComparison]) -> String {
    let mut out = String::new();

    let Some(first) = comparisons
        .iter()
        .find_map(|fc| fc.type_comparisons.first())
    else {
        return out;
    };

    // The metric header is identical for every row of a run.
    let mut header: Vec<String> = ["folder1", "folder2", "file1", "file2", "type1", "type2"]
        .iter()
        .map(|s| (*s).to_string())
        .collect();
    header.extend(first.metrics.iter().map(|m| escape(&m.name)));
    out.push_str(&header.join(","));
    out.push('\n');

    for fc in comparisons {
        for tc in &fc.type_comparisons {
            let mut row = vec![
                escape(&fc.folder1),
                escape(&fc.folder2),
                escape(&tc.file1.display().to_string()),
                escape(&tc.file2.display().to_string()),
                escape(&tc.type1),
                escape(&tc.type2),
            ];
            row.extend(tc.metrics.iter().map(|m| escape(&m.value.to_string())));
            out.push_str(&row.join(","));
            out.push('\n');
        }
    }

    out
}

/// Reads a CSV file previously produced by [`write_csv`] back into result
/// entities. Consecutive rows with the same folder pair are grouped into one
/// `FolderComparison`.
///
/// # Errors
/// Returns an error on unreadable files or malformed rows.
pub fn read_csv(path: &Path) -> Result<Vec<FolderComparison>> {
    let text = fs::read_to_string(path).map_err(|e| SiftError::io(e, path))?;
    parse(&text)
}

/// Parses CSV text produced by [`render`].
///
/// # Errors
/// Returns a configuration error on malformed rows or unparsable values.
pub fn parse(text: &str) -> Result<Vec<FolderComparison>> {
    let mut records = parse_records(text).into_iter();

    let Some(header) = records.next() else {
        return Ok(Vec::new());
    };
    if header.len() < FIXED_COLUMNS {
        return Err(SiftError::Config(format!(
            "CSV header has {} columns, expected at least {FIXED_COLUMNS}",
            header.len()
        )));
    }
    let metric_names: Vec<String> = header[FIXED_COLUMNS..].to_vec();

    let mut comparisons: Vec<FolderComparison> = Vec::new();
    for record in records {
        if record.len() != FIXED_COLUMNS + metric_names.len() {
            return Err(SiftError::Config(format!(
                "CSV row has {} columns, expected {}",
                record.len(),
                FIXED_COLUMNS + metric_names.len()
            )));
        }

        let metrics: Vec<Metric> = metric_names
            .iter()
            .zip(&record[FIXED_COLUMNS..])
            .map(|(name, raw)| {
                raw.parse::<f64>()
                    .map(|value| Metric {
                        name: name.clone(),
                        value,
                    })
                    .map_err(|_| SiftError::Config(format!("invalid metric value: {raw}")))
            })
            .collect::<Result<_>>()?;

        let tc = TypeComparison {
            file1: PathBuf::from(&record[2]),
            file2: PathBuf::from(&record[3]),
            type1: record[4].clone(),
            type2: record[5].clone(),
            metrics,
        };

        match comparisons.last_mut() {
            Some(last) if last.folder1 == record[0] && last.folder2 == record[1] => {
                last.add(tc);
            }
            _ => {
                let mut fc = FolderComparison::new(record[0].clone(), record[1].clone());
                fc.add(tc);
                comparisons.push(fc);
            }
        }
    }

    Ok(comparisons)
}

/// Quotes a field when it contains a comma, quote, or line break.
#[must_use]
pub fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Splits CSV text into records, honoring quoted fields (embedded commas,
/// doubled quotes, and line breaks inside quotes).
fn parse_records(text: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
            continue;
        }

        match c {
            '"' => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\n' => {
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
            }
            '\r' => {} // part of \r\n; quoted \r was handled above
            _ => field.push(c),
        }
    }

    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_plain_field_unchanged() {
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn escape_comma_and_quote() {
        assert_eq!(escape("a,b"), "\"a,b\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn records_roundtrip_quoted_fields() {
        let text = "a,\"b,c\",\"say \"\"hi\"\"\"\nd,e,f\n";
        let records = parse_records(text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], vec!["a", "b,c", "say \"hi\""]);
        assert_eq!(records[1], vec!["d", "e", "f"]);
    }

    #[test]
    fn records_handle_embedded_newline() {
        let text = "\"line1\nline2\",x\n";
        let records = parse_records(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0], vec!["line1\nline2", "x"]);
    }

    #[test]
    fn empty_list_renders_empty() {
        assert_eq!(render(&[]), "");
        assert!(parse("").unwrap().is_empty());
    }
}
