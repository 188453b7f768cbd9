#![doc = "Referendum tallying by region, with choropleth rendering."]
mod codes;
mod io;
mod pipeline;

pub mod cli;
pub mod commands;

#[doc(inline)]
pub use io::geojson::{read_region_geometries, RegionGeometries};

#[doc(inline)]
pub use pipeline::{
    attach_areas, build_choropleth, load_datasets, resolve_areas, tally_by_region,
    Choropleth, DatasetPaths, Datasets,
};
