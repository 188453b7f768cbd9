//! Attaching ballots to their resolved region.

use anyhow::{Context, Result};
use polars::prelude::*;

use crate::codes;

use super::areas::CODE_WIDTH;

/// Join each referendum row onto its department's area record.
///
/// Inner join on the normalized department code: ballots cast in places
/// absent from the department table (overseas territories and collectivities,
/// residents abroad) drop out here. Rows that survive the join but carry a
/// null in any column are dropped as incomplete.
pub fn attach_areas(referendum: &DataFrame, areas: &DataFrame) -> Result<DataFrame> {
    let mut referendum = referendum.clone();
    let mut areas = areas.clone();
    codes::zero_pad(&mut referendum, "Department code", CODE_WIDTH)?;
    codes::zero_pad(&mut areas, "code_dep", CODE_WIDTH)?;

    let n_ballots = referendum.height();

    let resolved = referendum.lazy()
        .join(
            areas.lazy(),
            [col("Department code")],
            [col("code_dep")],
            JoinArgs {
                how: JoinType::Inner,
                coalesce: JoinCoalesce::KeepColumns,
                maintain_order: MaintainOrderJoin::Left,
                ..Default::default()
            },
        )
        .drop_nulls(None)
        .collect()
        .context("[ballots] inner join of referendum onto areas failed")?;

    log::debug!("[ballots] matched {} of {} ballot rows", resolved.height(), n_ballots);
    Ok(resolved)
}
