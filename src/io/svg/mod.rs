//! SVG output for the choropleth figure.

mod color;
mod writer;

pub(crate) use color::{ratio_color, NO_DATA};
pub(crate) use writer::SvgWriter;
