//! CSV loading and column extraction helpers
//!
//! All inputs are small, fixed-format scientific tables, so they are read
//! eagerly into polars DataFrames. Column names are validated up front so a
//! malformed export fails with the file and column spelled out instead of a
//! bare dataframe error.

use std::path::Path;

use polars::prelude::*;

use super::error::{FigureError, Result};

/// Read a CSV file into a DataFrame
pub fn read_csv(path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|source| FigureError::Read {
            path: path.to_path_buf(),
            source,
        })
}

/// Verify that every expected column exists, reporting the first miss by name
pub fn require_columns(df: &DataFrame, path: &Path, columns: &[&str]) -> Result<()> {
    let names = df.get_column_names();
    for &expected in columns {
        if !names.iter().any(|name| name.as_str() == expected) {
            return Err(FigureError::MissingColumn {
                path: path.to_path_buf(),
                column: expected.to_string(),
            });
        }
    }
    Ok(())
}

/// Extract a column as f64 values, casting integer columns as needed
///
/// Nulls become NaN; the figures drop non-finite values when filtering.
pub fn f64_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let series = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    Ok(series
        .f64()?
        .into_iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect())
}

/// Extract a column as strings (nulls become empty strings)
pub fn str_column(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    let series = df.column(name)?.as_materialized_series().clone();
    Ok(series
        .str()?
        .into_iter()
        .map(|v| v.unwrap_or("").to_string())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_require_columns_reports_missing() {
        let df = df! {
            "Year" => [2030i64, 2031],
            "Scenario0" => [0.1f64, 0.2]
        }
        .unwrap();
        let path = PathBuf::from("global_annual_CDR.csv");

        assert!(require_columns(&df, &path, &["Year", "Scenario0"]).is_ok());

        let err = require_columns(&df, &path, &["Year", "Scenario1"]).unwrap_err();
        match err {
            FigureError::MissingColumn { column, .. } => assert_eq!(column, "Scenario1"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_f64_column_casts_integers() {
        let df = df! {
            "Year" => [2030i64, 2040, 2050]
        }
        .unwrap();
        assert_eq!(
            f64_column(&df, "Year").unwrap(),
            vec![2030.0, 2040.0, 2050.0]
        );
    }

    #[test]
    fn test_str_column() {
        let df = df! {
            "Region" => ["South Asia", "North America"]
        }
        .unwrap();
        assert_eq!(
            str_column(&df, "Region").unwrap(),
            vec!["South Asia".to_string(), "North America".to_string()]
        );
    }
}
