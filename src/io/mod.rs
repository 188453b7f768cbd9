//! Format-level readers and writers.

pub(crate) mod csv;
pub mod geojson;
pub(crate) mod svg;
