//! Regional vote totals.

use anyhow::{Context, Result};
use polars::prelude::*;

/// Ballot count columns summed per region.
pub(crate) const COUNT_COLUMNS: [&str; 5] =
    ["Registered", "Abstentions", "Null", "Choice A", "Choice B"];

/// Sum ballot counts per region.
///
/// Groups on the (code_reg, name_reg) pair, which the reference data
/// guarantees is 1:1, and fixes the column order for the downstream geometry
/// join. Output is sorted by region code; a region with no resolved ballot
/// rows simply does not appear.
pub fn tally_by_region(resolved: &DataFrame) -> Result<DataFrame> {
    let sums = COUNT_COLUMNS.iter()
        .map(|&name| col(name).sum())
        .collect::<Vec<_>>();

    let mut order = vec![col("code_reg"), col("name_reg")];
    order.extend(COUNT_COLUMNS.iter().map(|&name| col(name)));

    resolved.clone().lazy()
        .group_by([col("code_reg"), col("name_reg")])
        .agg(sums)
        .sort(["code_reg"], SortMultipleOptions::default())
        .select(order)
        .collect()
        .context("[results] group-by over regions failed")
}

#[cfg(test)]
mod tests {
    use polars::{df, prelude::*};

    use super::tally_by_region;

    fn resolved() -> DataFrame {
        df!(
            "Department code" => ["01", "02", "2A"],
            "Registered" => [100i64, 200, 300],
            "Abstentions" => [10i64, 20, 30],
            "Null" => [1i64, 2, 3],
            "Choice A" => [40i64, 80, 120],
            "Choice B" => [49i64, 98, 147],
            "code_reg" => ["01", "01", "02"],
            "name_reg" => ["Nord", "Nord", "Sud"],
            "code_dep" => ["01", "02", "2A"],
            "name_dep" => ["Ain", "Aisne", "Corse-du-Sud"],
        ).unwrap()
    }

    #[test]
    fn one_row_per_region() {
        let totals = tally_by_region(&resolved()).unwrap();
        assert_eq!(totals.height(), 2);
    }

    #[test]
    fn sums_are_additive_per_region() {
        let totals = tally_by_region(&resolved()).unwrap();

        let registered = totals.column("Registered").unwrap().i64().unwrap();
        let choice_a = totals.column("Choice A").unwrap().i64().unwrap();

        // Sorted by code_reg: "01" first, "02" second.
        assert_eq!(registered.get(0), Some(300));
        assert_eq!(registered.get(1), Some(300));
        assert_eq!(choice_a.get(0), Some(120));
        assert_eq!(choice_a.get(1), Some(120));
    }

    #[test]
    fn column_order_is_fixed() {
        let totals = tally_by_region(&resolved()).unwrap();
        assert_eq!(
            totals.get_column_names_str(),
            ["code_reg", "name_reg", "Registered", "Abstentions", "Null", "Choice A", "Choice B"],
        );
    }

    #[test]
    fn region_names_travel_with_their_codes() {
        let totals = tally_by_region(&resolved()).unwrap();
        let names = totals.column("name_reg").unwrap().str().unwrap();
        assert_eq!(names.get(0), Some("Nord"));
        assert_eq!(names.get(1), Some("Sud"));
    }
}
