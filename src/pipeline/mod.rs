//! The transformation stages, in pipeline order: load the three source
//! tables, resolve departments to their regions, attach ballots, tally per
//! region, then join onto boundaries and render.

mod areas;
mod ballots;
mod choropleth;
mod load;
mod results;

pub use areas::resolve_areas;
pub use ballots::attach_areas;
pub use choropleth::{build_choropleth, Choropleth};
pub use load::{load_datasets, DatasetPaths, Datasets};
pub use results::tally_by_region;
