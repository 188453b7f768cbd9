//! CSV reading operations.

use std::{fs::File, path::Path};

use anyhow::{Context, Result};
use polars::{frame::DataFrame, io::SerReader, prelude::{CsvReadOptions, SchemaRef}};

/// Reads a comma-separated file into a Polars DataFrame.
pub(crate) fn read_csv(path: &Path, schema: Option<SchemaRef>) -> Result<DataFrame> {
    read_csv_with_separator(path, b',', schema)
}

/// Reads a delimited file with an explicit field separator.
///
/// `schema` overrides the inferred dtype of the named columns; callers force
/// code columns to String there so leading zeros survive parsing.
pub(crate) fn read_csv_with_separator(path: &Path, separator: u8, schema: Option<SchemaRef>) -> Result<DataFrame> {
    let file = File::open(path)
        .with_context(|| format!("[io::csv] failed to open {}", path.display()))?;
    CsvReadOptions::default()
        .with_has_header(true)
        .map_parse_options(|po| po.with_separator(separator))
        .with_schema_overwrite(schema)
        .into_reader_with_file_handle(file)
        .finish()
        .with_context(|| format!("[io::csv] failed to read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::{io::Write, sync::Arc};

    use polars::prelude::{DataType, Field, Schema};

    use super::{read_csv, read_csv_with_separator};

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn reads_semicolon_separated_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "votes.csv", "a;b\n1;2\n3;4\n");

        let df = read_csv_with_separator(&path, b';', None).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.get_column_names_str(), ["a", "b"]);
    }

    #[test]
    fn schema_overwrite_preserves_leading_zeros() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "regions.csv", "code,name\n01,Guadeloupe\n11,Ile-de-France\n");

        let schema = Arc::new(Schema::from_iter([
            Field::new("code".into(), DataType::String),
        ]));
        let df = read_csv(&path, Some(schema)).unwrap();

        let codes = df.column("code").unwrap().str().unwrap();
        assert_eq!(codes.get(0), Some("01"));
    }

    #[test]
    fn missing_file_propagates_the_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_csv(&dir.path().join("absent.csv"), None).is_err());
    }
}
