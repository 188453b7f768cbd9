//! Normalization of administrative code columns.

use anyhow::{Context, Result};
use polars::prelude::*;

/// Zero-pad a code column to at least `width` characters.
///
/// Department and region codes are identifiers, not numbers: leading zeros
/// are significant ("01" != "1"), and alphanumeric codes such as "2A" or
/// wider ones such as "971" pass through unchanged. Every join key goes
/// through this before any join.
pub(crate) fn zero_pad(df: &mut DataFrame, name: &str, width: usize) -> Result<()> {
    let column = df.column(name)
        .with_context(|| format!("[codes] missing code column {:?}", name))?;

    // Codes stored numerically in the source lose their padding at parse
    // time; cast back to String before padding.
    let series = if column.dtype() != &DataType::String {
        column.as_materialized_series().cast(&DataType::String)?
    } else {
        column.as_materialized_series().clone()
    };

    let padded: StringChunked = series.str()
        .with_context(|| format!("[codes] column {:?} is not a string column", name))?
        .into_iter()
        .map(|opt| opt.map(|s| {
            if s.len() < width {
                format!("{:0>width$}", s, width = width)
            } else {
                s.to_string()
            }
        }))
        .collect();

    df.replace_or_add(name.into(), padded.into_series())
        .with_context(|| format!("[codes] failed to normalize {:?}", name))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use polars::{df, prelude::*};

    use super::zero_pad;

    fn strings(df: &DataFrame, name: &str) -> Vec<String> {
        df.column(name).unwrap().str().unwrap()
            .into_no_null_iter()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn pads_short_codes_only() {
        let mut df = df!("code" => ["1", "01", "2A", "971", "ZZ"]).unwrap();
        zero_pad(&mut df, "code", 2).unwrap();
        assert_eq!(strings(&df, "code"), ["01", "01", "2A", "971", "ZZ"]);
    }

    #[test]
    fn casts_numeric_codes() {
        let mut df = df!("code" => [1i64, 95, 102]).unwrap();
        zero_pad(&mut df, "code", 2).unwrap();
        assert_eq!(strings(&df, "code"), ["01", "95", "102"]);
    }

    #[test]
    fn keeps_nulls() {
        let column = Column::new("code".into(), [Some("1"), None::<&str>]);
        let mut df = DataFrame::new(vec![column]).unwrap();
        zero_pad(&mut df, "code", 2).unwrap();

        let codes = df.column("code").unwrap().str().unwrap();
        assert_eq!(codes.get(0), Some("01"));
        assert_eq!(codes.get(1), None);
    }

    #[test]
    fn missing_column_is_an_error() {
        let mut df = df!("other" => ["1"]).unwrap();
        assert!(zero_pad(&mut df, "code", 2).is_err());
    }
}
