//! SVG writing operations.

use std::{fs::File, io::{BufWriter, Write}, path::Path};

use anyhow::{Context, Result};

use super::color::ratio_color;

pub(crate) struct SvgWriter {
    writer: BufWriter<File>,
}

/// Implement std::io::Write so `write!` / `writeln!` work.
impl Write for SvgWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> { self.writer.write(buf) }

    fn flush(&mut self) -> std::io::Result<()> { self.writer.flush() }

    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> { self.writer.write_all(buf) }
}

impl SvgWriter {
    /// Create a new SVG writer to a file path.
    pub(crate) fn new(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("[io::svg] failed to create {}", path.display()))?;

        Ok(Self { writer: BufWriter::new(file) })
    }

    /// Write the SVG header, including the XML declaration, opening <svg>
    /// tag and white background.
    pub(crate) fn write_header(&mut self, width: f64, height: f64) -> Result<()> {
        writeln!(self, r##"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"##)?;
        writeln!(self, r##"<svg xmlns="http://www.w3.org/2000/svg"
        width="{width}" height="{height}"
        viewBox="0 0 {width} {height}">"##)?;
        writeln!(self, r##"<rect width="100%" height="100%" fill="#ffffff"/>"##)?;
        Ok(())
    }

    /// Write SVG styles for map features.
    pub(crate) fn write_styles(&mut self) -> Result<()> {
        writeln!(self, r##"<defs>
<style>
    .region {{ stroke: #cccccc; stroke-width: 0.8; }}
    .caption {{ font-family: sans-serif; fill: #111827; }}
</style>
</defs>"##)?;
        Ok(())
    }

    /// Write a centered figure title.
    pub(crate) fn write_title(&mut self, title: &str, width: f64) -> Result<()> {
        writeln!(self, r##"<text class="caption" x="{x}" y="28" font-size="18" text-anchor="middle">{title}</text>"##,
            x = width / 2.0)?;
        Ok(())
    }

    /// Write a horizontal gradient legend for the ratio scale, with endpoint
    /// labels and a caption underneath.
    pub(crate) fn write_legend(&mut self, label: &str, x: f64, y: f64, width: f64) -> Result<()> {
        write!(self, r##"<defs><linearGradient id="ramp">"##)?;
        for step in 0..=10 {
            let t = step as f64 / 10.0;
            write!(self, r##"<stop offset="{:.0}%" stop-color="{}"/>"##, t * 100.0, ratio_color(t))?;
        }
        writeln!(self, "</linearGradient></defs>")?;

        writeln!(self, r##"<rect x="{x}" y="{y}" width="{width}" height="12" fill="url(#ramp)" stroke="#cccccc"/>"##)?;
        writeln!(self, r##"<text class="caption" x="{x}" y="{ly}" font-size="11">0.0</text>"##,
            ly = y + 26.0)?;
        writeln!(self, r##"<text class="caption" x="{rx}" y="{ly}" font-size="11" text-anchor="end">1.0</text>"##,
            rx = x + width, ly = y + 26.0)?;
        writeln!(self, r##"<text class="caption" x="{cx}" y="{ly}" font-size="12" text-anchor="middle">{label}</text>"##,
            cx = x + width / 2.0, ly = y + 44.0)?;
        Ok(())
    }

    /// Write the closing </svg> tag.
    pub(crate) fn write_footer(&mut self) -> Result<()> {
        writeln!(self, "</svg>")?;
        Ok(())
    }
}
