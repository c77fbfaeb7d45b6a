//! Airport CSV decoding
//!
//! The source file carries 14 comma-separated columns per record, quoted
//! fields allowed, no header row. Column 1 is the airport name; it keys
//! the trie and is excluded from the tuple. The remaining columns decode
//! by a fixed type table: 0 and 8 as integers, 6 and 7 as doubles,
//! everything else as strings. The filter language's column mapping
//! assumes exactly this layout.

use std::path::Path;
use std::time::Instant;

use tracing::info;

use crate::record::{FieldTuple, FieldValue};
use crate::trie::NameTrie;

use super::errors::{DatasetError, DatasetResult};

/// Logical columns per record
pub const COLUMN_COUNT: usize = 14;

/// Zero-based index of the name column
pub const NAME_COLUMN: usize = 1;

/// Per-column decoded type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnType {
    Int,
    Float,
    Str,
}

/// Fixed type table for the airport layout
const COLUMN_TYPES: [ColumnType; COLUMN_COUNT] = [
    ColumnType::Int,   // 0: record id
    ColumnType::Str,   // 1: name (excluded from the tuple)
    ColumnType::Str,   // 2
    ColumnType::Str,   // 3
    ColumnType::Str,   // 4
    ColumnType::Str,   // 5
    ColumnType::Float, // 6: latitude
    ColumnType::Float, // 7: longitude
    ColumnType::Int,   // 8: elevation
    ColumnType::Str,   // 9
    ColumnType::Str,   // 10
    ColumnType::Str,   // 11
    ColumnType::Str,   // 12
    ColumnType::Str,   // 13
];

/// Decode one raw CSV record into its name and field tuple.
///
/// `line` is the 1-based source line, reported in errors.
pub fn decode_record(fields: &csv::StringRecord, line: u64) -> DatasetResult<(String, FieldTuple)> {
    if fields.len() != COLUMN_COUNT {
        return Err(DatasetError::ColumnCount {
            line,
            expected: COLUMN_COUNT,
            found: fields.len(),
        });
    }

    let name = fields[NAME_COLUMN].to_string();
    let mut values = Vec::with_capacity(COLUMN_COUNT - 1);
    for (column, raw) in fields.iter().enumerate() {
        if column == NAME_COLUMN {
            continue;
        }
        let value = match COLUMN_TYPES[column] {
            ColumnType::Int => FieldValue::Int(raw.parse().map_err(|_| DatasetError::Decode {
                line,
                column,
                value: raw.to_string(),
                expected: "integer",
            })?),
            ColumnType::Float => {
                FieldValue::Float(raw.parse().map_err(|_| DatasetError::Decode {
                    line,
                    column,
                    value: raw.to_string(),
                    expected: "double",
                })?)
            }
            ColumnType::Str => FieldValue::str(raw),
        };
        values.push(value);
    }

    Ok((name, FieldTuple::new(values)))
}

/// Load a whole airport CSV into a name trie.
pub fn load_trie(path: &Path) -> DatasetResult<NameTrie> {
    let start = Instant::now();

    let file = std::fs::File::open(path).map_err(|source| DatasetError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new().has_headers(false).from_reader(file);

    let mut trie = NameTrie::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(index as u64 + 1);
        let (name, tuple) = decode_record(&record, line)?;
        trie.insert(&name, tuple);
    }

    info!(
        path = %path.display(),
        records = trie.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "dataset loaded"
    );
    Ok(trie)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tempfile::NamedTempFile;

    const SHEREMETYEVO: &str = "110,\"Sheremetyevo\",\"RU\",\"Moscow\",\"Moscow\",\"SVO\",55.97,37.41,622,\"Europe/Moscow\",\"UTC\",\"medium_airport\",\"SVO\",\"UUEE\"\n";

    fn write_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_decode_record_types() {
        let file = write_file(SHEREMETYEVO);
        let trie = load_trie(file.path()).unwrap();

        let results = trie.collect("Sheremetyevo", None).unwrap();
        assert_eq!(results.len(), 1);
        let tuple = &results[0].1;
        assert_eq!(tuple.arity(), 13);
        assert_eq!(tuple.get(0), Some(&FieldValue::Int(110)));
        assert_eq!(tuple.get(1), Some(&FieldValue::str("RU")));
        assert_eq!(tuple.get(5), Some(&FieldValue::Float(55.97)));
        assert_eq!(tuple.get(6), Some(&FieldValue::Float(37.41)));
        assert_eq!(tuple.get(7), Some(&FieldValue::Int(622)));
        assert_eq!(tuple.get(12), Some(&FieldValue::str("UUEE")));
    }

    #[test]
    fn test_quoted_commas_stay_in_field() {
        let file = write_file(
            "1,\"Name, with comma\",\"RU\",a,b,c,1.0,2.0,3,d,e,f,g,h\n",
        );
        let trie = load_trie(file.path()).unwrap();
        assert_eq!(trie.collect("Name, with", None).unwrap().len(), 1);
    }

    #[test]
    fn test_wrong_column_count() {
        let file = write_file("1,\"Name\",\"RU\"\n");
        let err = load_trie(file.path()).unwrap_err();
        assert!(matches!(err, DatasetError::ColumnCount { line: 1, .. }));
    }

    #[test]
    fn test_bad_integer_reports_line_and_column() {
        let good = SHEREMETYEVO;
        let bad = "xx,\"Vnukovo\",\"RU\",a,b,c,1.0,2.0,3,d,e,f,g,h\n";
        let file = write_file(&format!("{}{}", good, bad));

        let err = load_trie(file.path()).unwrap_err();
        match err {
            DatasetError::Decode {
                line,
                column,
                expected,
                ..
            } => {
                assert_eq!(line, 2);
                assert_eq!(column, 0);
                assert_eq!(expected, "integer");
            }
            other => panic!("expected Decode, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = load_trie(Path::new("/nonexistent/airports.csv")).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }
}
