//! Static rendering of the stacked figure to a PNG file.

use std::path::Path;

use image::RgbImage;
use plotters::prelude::*;
use serde::{Deserialize, Serialize};

use crate::color::generate_palette;
use crate::error::{RamanError, Result};
use crate::processing::stack::PlotSeries;

// ---------------------------------------------------------------------------
// Style
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureStyle {
    /// Pixels.
    pub width: u32,
    pub height: u32,
    /// Visible Raman-shift window (cm⁻¹); the data extent when absent.
    pub x_range: Option<(f64, f64)>,
    /// Lower y limit; the data minimum when absent.
    pub y_min: Option<f64>,
    /// Overrides the generated title.
    pub title: Option<String>,
    pub x_label: String,
    pub y_label: String,
    /// Draw caption, axes text and legend. Text needs a system font.
    pub annotate: bool,
}

impl Default for FigureStyle {
    fn default() -> Self {
        Self {
            width: 400,
            height: 1000,
            x_range: Some((400.0, 1800.0)),
            y_min: Some(0.85),
            title: None,
            x_label: "Raman shift (1/cm)".to_string(),
            y_label: "Scope".to_string(),
            annotate: true,
        }
    }
}

impl FigureStyle {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RamanError::InvalidConfig(format!(
                "figure size {}x{} is empty",
                self.width, self.height
            )));
        }
        if let Some((lo, hi)) = self.x_range {
            if !(lo.is_finite() && hi.is_finite() && lo < hi) {
                return Err(RamanError::InvalidConfig(format!(
                    "x range {lo}..{hi} is not ascending"
                )));
            }
        }
        Ok(())
    }

    /// Explicit title, or one naming the first file of the run.
    pub fn title_for(&self, first_filename: &str) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| format!("Scope vs Raman shift for {first_filename}"))
    }

    /// Axis extents for `series`, honouring the configured limits.
    pub fn bounds(&self, series: &[PlotSeries]) -> ((f64, f64), (f64, f64)) {
        let points = || series.iter().flat_map(|s| s.x.iter().zip(&s.y));
        let (x_lo, x_hi) = self.x_range.unwrap_or_else(|| {
            points().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (x, _)| {
                (lo.min(*x), hi.max(*x))
            })
        });
        // y extent only over the visible x window
        let (y_lo, y_hi) = points()
            .filter(|(x, _)| **x >= x_lo && **x <= x_hi)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (_, y)| {
                (lo.min(*y), hi.max(*y))
            });
        let y_lo = self.y_min.unwrap_or(y_lo);
        let (x_lo, x_hi) = widen(x_lo, x_hi);
        let (y_lo, y_hi) = widen(y_lo, y_hi);
        let pad = (y_hi - y_lo) * 0.03;
        ((x_lo, x_hi), (y_lo, y_hi + pad))
    }
}

/// Keep a degenerate or empty range drawable.
fn widen(lo: f64, hi: f64) -> (f64, f64) {
    if !(lo.is_finite() && hi.is_finite()) {
        (0.0, 1.0)
    } else if hi <= lo {
        (lo - 0.5, lo + 0.5)
    } else {
        (lo, hi)
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn render_err(e: impl std::fmt::Display) -> RamanError {
    RamanError::Render(e.to_string())
}

/// Draw `series` into an RGB image.
pub fn render(series: &[PlotSeries], style: &FigureStyle, title: &str) -> Result<RgbImage> {
    style.validate()?;
    let (w, h) = (style.width, style.height);
    let ((x0, x1), (y0, y1)) = style.bounds(series);
    let colors = generate_palette(series.len());

    let mut buffer = vec![0u8; (w * h) as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (w, h)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut builder = ChartBuilder::on(&root);
        builder.margin(10);
        if style.annotate {
            builder
                .caption(title, ("sans-serif", 14))
                .x_label_area_size(40)
                .y_label_area_size(45);
        }
        let mut chart = builder
            .build_cartesian_2d(x0..x1, y0..y1)
            .map_err(render_err)?;

        if style.annotate {
            chart
                .configure_mesh()
                .x_desc(style.x_label.as_str())
                .y_desc(style.y_label.as_str())
                .draw()
                .map_err(render_err)?;
        }

        for (s, rgb) in series.iter().zip(colors) {
            let color = RGBColor(rgb[0], rgb[1], rgb[2]);
            let anno = chart
                .draw_series(LineSeries::new(
                    s.x.iter().copied().zip(s.y.iter().copied()),
                    color.stroke_width(1),
                ))
                .map_err(render_err)?;
            if style.annotate {
                anno.label(s.label.as_str()).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
            }
        }

        if style.annotate {
            chart
                .configure_series_labels()
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()
                .map_err(render_err)?;
        }
        root.present().map_err(render_err)?;
    }

    RgbImage::from_raw(w, h, buffer)
        .ok_or_else(|| RamanError::Render("image buffer size too small".into()))
}

/// Render and save as PNG.
pub fn save_png(series: &[PlotSeries], style: &FigureStyle, title: &str, path: &Path) -> Result<()> {
    let img = render(series, style, title)?;
    img.save(path).map_err(render_err)?;
    log::info!("Saved figure to {}", path.display());
    Ok(())
}
