//! Geometry join, ratio computation, and map rendering.

use std::{io::Write, path::Path};

use anyhow::{anyhow, ensure, Context, Result};
use geo::{BoundingRect, Coord, CoordsIter, LineString, MultiPolygon, Rect};
use polars::prelude::*;

use crate::io::geojson::RegionGeometries;
use crate::io::svg::{ratio_color, SvgWriter, NO_DATA};

/// Projection function: lon/lat -> SVG coords (x,y)
type Projection = dyn Fn(&Coord<f64>) -> (f64, f64);

/// The final joined table plus the boundary of each of its rows.
///
/// Rows follow geometry order: every boundary appears exactly once, with null
/// vote fields where no regional result matched its name.
pub struct Choropleth {
    pub table: DataFrame,
    pub shapes: Vec<MultiPolygon<f64>>,
}

/// Join regional totals onto region boundaries and compute the Choice A
/// ratio.
///
/// Left join keyed on the geometry's "nom" against name_reg, preserving all
/// geometries. The ratio is Choice A / (Choice A + Choice B) computed in
/// floats: a matched region with zero expressed ballots comes out NaN, an
/// unmatched geometry null. The table is the primary artifact and is returned
/// whether or not it is ever rendered.
pub fn build_choropleth(results: &DataFrame, geometries: &RegionGeometries) -> Result<Choropleth> {
    let names = DataFrame::new(vec![Column::new("nom".into(), geometries.names.clone())])?
        .with_row_index("idx".into(), None)?;

    let table = names.lazy()
        .join(
            results.clone().lazy(),
            [col("nom")],
            [col("name_reg")],
            JoinArgs {
                how: JoinType::Left,
                coalesce: JoinCoalesce::KeepColumns,
                maintain_order: MaintainOrderJoin::Left,
                ..Default::default()
            },
        )
        .sort(["idx"], SortMultipleOptions::default())
        .with_column(
            (col("Choice A").cast(DataType::Float64)
                / (col("Choice A").cast(DataType::Float64) + col("Choice B").cast(DataType::Float64)))
                .alias("ratio"),
        )
        .collect()
        .context("[choropleth] joining results onto geometries failed")?;

    let table = table.drop("idx")?;

    ensure!(
        table.height() == geometries.shapes.len(),
        "[choropleth] joined table has {} rows for {} geometries; duplicate region names?",
        table.height(), geometries.shapes.len(),
    );

    Ok(Choropleth { table, shapes: geometries.shapes.clone() })
}

impl Choropleth {
    /// The ratio column, one value per geometry (null where no result
    /// matched, NaN where no ballots were expressed).
    pub fn ratios(&self) -> Result<Vec<Option<f64>>> {
        Ok(self.table.column("ratio")?.f64()?.into_iter().collect())
    }

    /// Render the choropleth as an SVG file: one filled path per region,
    /// a figure title, and a horizontal legend for the ratio scale.
    pub fn write_svg(&self, path: &Path) -> Result<()> {
        const WIDTH: f64 = 1000.0;
        const MARGIN: f64 = 20.0;
        const HEADER: f64 = 40.0;
        const FOOTER: f64 = 70.0;

        let bounds = self.bounds()
            .ok_or_else(|| anyhow!("[choropleth] no geometry to draw"))?;
        let scale = (WIDTH - 2.0 * MARGIN) / bounds.width();
        let map_height = bounds.height() * scale;
        let height = map_height + HEADER + FOOTER + 2.0 * MARGIN;

        // Map lon/lat -> SVG coords (preserve aspect, Y down).
        let project = move |coord: &Coord<f64>| -> (f64, f64) {
            let x = MARGIN + (coord.x - bounds.min().x) * scale;
            let y = HEADER + MARGIN + (bounds.max().y - coord.y) * scale;
            (x, y)
        };

        let ratios = self.ratios()?;

        let mut writer = SvgWriter::new(path)?;
        writer.write_header(WIDTH, height)?;
        writer.write_styles()?;
        writer.write_title("Referendum results by region", WIDTH)?;

        for (shape, ratio) in self.shapes.iter().zip(ratios) {
            let fill = match ratio {
                Some(value) => ratio_color(value),
                None => NO_DATA,
            };
            writeln!(writer, r#"<path class="region" fill="{}" d="{}"/>"#,
                fill, multipolygon_to_path(shape, &project))?;
        }

        writer.write_legend(
            "Ratio of Choice A votes",
            WIDTH / 4.0,
            HEADER + MARGIN + map_height + 18.0,
            WIDTH / 2.0,
        )?;
        writer.write_footer()?;
        writer.flush().context("[choropleth] failed to flush SVG output")?;

        Ok(())
    }

    /// Bounding box over all region boundaries.
    fn bounds(&self) -> Option<Rect<f64>> {
        let mut rects = self.shapes.iter().filter_map(|shape| shape.bounding_rect());
        let first = rects.next()?;
        Some(rects.fold(first, |acc, rect| Rect::new(
            Coord {
                x: acc.min().x.min(rect.min().x),
                y: acc.min().y.min(rect.min().y),
            },
            Coord {
                x: acc.max().x.max(rect.max().x),
                y: acc.max().y.max(rect.max().y),
            },
        )))
    }
}

/// Build a compact SVG path string for a MultiPolygon (exteriors + holes).
fn multipolygon_to_path(shape: &MultiPolygon<f64>, project: &Projection) -> String {
    let mut out = String::new();

    for polygon in &shape.0 {
        out.push_str(&ring_to_path(polygon.exterior(), project));
        for interior in polygon.interiors() {
            out.push_str(&ring_to_path(interior, project));
        }
    }

    out
}

/// Build a compact SVG path string for a LineString (ring).
fn ring_to_path(ring: &LineString<f64>, project: &Projection) -> String {
    let mut out = String::new();

    let mut coords = ring.coords_iter()
        .map(|coord| project(&coord));
    if let Some((x, y)) = coords.next() {
        out.push_str(&format!(" M{x:.3},{y:.3}"));
        for (x, y) in coords {
            out.push_str(&format!(" L{x:.3},{y:.3}"));
        }
        out.push('Z');
    }

    out
}

#[cfg(test)]
mod tests {
    use geo::{Coord, LineString, MultiPolygon, Polygon};
    use polars::{df, prelude::*};

    use crate::io::geojson::RegionGeometries;

    use super::build_choropleth;

    fn square(x0: f64) -> MultiPolygon<f64> {
        MultiPolygon(vec![Polygon::new(
            LineString(vec![
                Coord { x: x0, y: 0.0 },
                Coord { x: x0 + 1.0, y: 0.0 },
                Coord { x: x0 + 1.0, y: 1.0 },
                Coord { x: x0, y: 1.0 },
                Coord { x: x0, y: 0.0 },
            ]),
            vec![],
        )])
    }

    fn geometries() -> RegionGeometries {
        RegionGeometries {
            names: vec!["Nord".into(), "Sud".into(), "Atlantide".into()],
            shapes: vec![square(0.0), square(2.0), square(4.0)],
        }
    }

    fn results() -> DataFrame {
        df!(
            "code_reg" => ["01", "02"],
            "name_reg" => ["Nord", "Sud"],
            "Registered" => [1000i64, 800],
            "Abstentions" => [100i64, 80],
            "Null" => [10i64, 8],
            "Choice A" => [100i64, 0],
            "Choice B" => [300i64, 0],
        ).unwrap()
    }

    #[test]
    fn one_row_per_geometry() {
        let choropleth = build_choropleth(&results(), &geometries()).unwrap();
        assert_eq!(choropleth.table.height(), 3);
        assert_eq!(choropleth.shapes.len(), 3);
    }

    #[test]
    fn ratio_is_choice_a_over_expressed() {
        let choropleth = build_choropleth(&results(), &geometries()).unwrap();
        let ratios = choropleth.ratios().unwrap();
        let nord = ratios[0].unwrap();
        assert!((nord - 0.25).abs() < 1e-9);
    }

    #[test]
    fn zero_expressed_ballots_yield_nan() {
        let choropleth = build_choropleth(&results(), &geometries()).unwrap();
        let ratios = choropleth.ratios().unwrap();
        assert!(ratios[1].unwrap().is_nan());
    }

    #[test]
    fn unmatched_geometry_keeps_null_fields() {
        let choropleth = build_choropleth(&results(), &geometries()).unwrap();
        let ratios = choropleth.ratios().unwrap();
        assert_eq!(ratios[2], None);

        let registered = choropleth.table.column("Registered").unwrap().i64().unwrap();
        assert_eq!(registered.get(2), None);
    }

    #[test]
    fn geometry_order_is_preserved() {
        let choropleth = build_choropleth(&results(), &geometries()).unwrap();
        let names: Vec<&str> = choropleth.table.column("nom").unwrap()
            .str().unwrap().into_no_null_iter().collect();
        assert_eq!(names, ["Nord", "Sud", "Atlantide"]);
    }

    #[test]
    fn writes_an_svg_document() {
        let choropleth = build_choropleth(&results(), &geometries()).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.svg");
        choropleth.write_svg(&path).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Ratio of Choice A votes"));
        assert!(svg.contains("Referendum results by region"));
        // One filled path per geometry.
        assert_eq!(svg.matches(r#"<path class="region""#).count(), 3);
    }
}
