//! Loading the three source tables.

use std::{path::{Path, PathBuf}, sync::Arc};

use anyhow::Result;
use polars::{frame::DataFrame, prelude::{DataType, Field, Schema, SchemaRef}};

use crate::io::csv::{read_csv, read_csv_with_separator};

/// Locations of the three tabular inputs.
#[derive(Clone, Debug)]
pub struct DatasetPaths {
    pub referendum: PathBuf,
    pub regions: PathBuf,
    pub departments: PathBuf,
}

impl DatasetPaths {
    /// Conventional layout: all three files under one directory.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            referendum: dir.join("referendum.csv"),
            regions: dir.join("regions.csv"),
            departments: dir.join("departments.csv"),
        }
    }
}

/// The three source tables, loaded as-is.
pub struct Datasets {
    pub referendum: DataFrame,
    pub regions: DataFrame,
    pub departments: DataFrame,
}

/// Load the referendum, region and department tables.
///
/// The referendum export is semicolon-separated; the reference tables are
/// plain CSV. Code columns are forced to String at parse time so schema
/// inference never turns "01" into 1. IO and parse errors propagate
/// uninterpreted.
pub fn load_datasets(paths: &DatasetPaths) -> Result<Datasets> {
    let referendum = read_csv_with_separator(&paths.referendum, b';', Some(referendum_schema()))?;
    let regions = read_csv(&paths.regions, Some(regions_schema()))?;
    let departments = read_csv(&paths.departments, Some(departments_schema()))?;

    log::debug!(
        "[load] referendum {}x{}, regions {}x{}, departments {}x{}",
        referendum.height(), referendum.width(),
        regions.height(), regions.width(),
        departments.height(), departments.width(),
    );

    Ok(Datasets { referendum, regions, departments })
}

fn referendum_schema() -> SchemaRef {
    Arc::new(Schema::from_iter([
        Field::new("Department code".into(), DataType::String),
    ]))
}

fn regions_schema() -> SchemaRef {
    Arc::new(Schema::from_iter([
        Field::new("code".into(), DataType::String),
    ]))
}

fn departments_schema() -> SchemaRef {
    Arc::new(Schema::from_iter([
        Field::new("code".into(), DataType::String),
        Field::new("region_code".into(), DataType::String),
    ]))
}
