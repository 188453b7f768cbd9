//! Command implementations.

use anyhow::{ensure, Context, Result};

use crate::cli::{Cli, RenderArgs};
use crate::io::geojson::read_region_geometries;
use crate::pipeline::{
    attach_areas, build_choropleth, load_datasets, resolve_areas, tally_by_region, DatasetPaths,
};

pub mod render {
    use super::*;

    /// The full run: load, resolve areas, attach ballots, tally, join onto
    /// boundaries, write the map.
    pub fn run(_cli: &Cli, args: &RenderArgs) -> Result<()> {
        ensure!(
            args.force || !args.output.exists(),
            "[render] output {} already exists (use --force to overwrite)",
            args.output.display(),
        );

        let datasets = load_datasets(&DatasetPaths::in_dir(&args.data))?;

        let areas = resolve_areas(&datasets.regions, &datasets.departments)?;
        let resolved = attach_areas(&datasets.referendum, &areas)?;
        let results = tally_by_region(&resolved)?;

        let geometries = read_region_geometries(&args.data.join("regions.geojson"))?;
        let choropleth = build_choropleth(&results, &geometries)?;
        choropleth.write_svg(&args.output)
            .with_context(|| format!("[render] failed to write {}", args.output.display()))?;

        println!("{}", results);
        println!("Wrote map of {} regions to {}", geometries.len(), args.output.display());
        Ok(())
    }
}
