//! Region/department reference merge.

use anyhow::{ensure, Context, Result};
use polars::prelude::*;

use crate::codes;

/// Minimum significant width of department and region codes.
pub(crate) const CODE_WIDTH: usize = 2;

/// Merge the region and department reference tables into one lookup table,
/// one row per department, carrying the parent region code and name.
///
/// Both inputs arrive with colliding `code`/`name` columns; they are renamed
/// at entry (`code_reg`/`name_reg`, `code_dep`/`name_dep`) and never inferred
/// later. Left join: a department whose `region_code` matches no region keeps
/// null region fields.
pub fn resolve_areas(regions: &DataFrame, departments: &DataFrame) -> Result<DataFrame> {
    let mut regions = regions.clone().lazy()
        .select([col("code").alias("code_reg"), col("name").alias("name_reg")])
        .collect()
        .context("[areas] region table must have code/name columns")?;

    let mut departments = departments.clone().lazy()
        .select([
            col("code").alias("code_dep"),
            col("name").alias("name_dep"),
            col("region_code"),
        ])
        .collect()
        .context("[areas] department table must have code/name/region_code columns")?;

    codes::zero_pad(&mut regions, "code_reg", CODE_WIDTH)?;
    codes::zero_pad(&mut departments, "code_dep", CODE_WIDTH)?;
    codes::zero_pad(&mut departments, "region_code", CODE_WIDTH)?;

    let n_departments = departments.height();

    // Keep the right-hand key column so unmatched departments carry a null
    // code_reg rather than their dangling region_code.
    let merged = departments.lazy()
        .join(
            regions.lazy(),
            [col("region_code")],
            [col("code_reg")],
            JoinArgs {
                how: JoinType::Left,
                coalesce: JoinCoalesce::KeepColumns,
                maintain_order: MaintainOrderJoin::Left,
                ..Default::default()
            },
        )
        .select([col("code_reg"), col("name_reg"), col("code_dep"), col("name_dep")])
        .collect()
        .context("[areas] left join of departments onto regions failed")?;

    ensure!(
        merged.height() == n_departments,
        "[areas] join changed the department row count ({} -> {}); duplicate region codes?",
        n_departments, merged.height(),
    );

    log::debug!("[areas] resolved {} departments", merged.height());
    Ok(merged)
}
