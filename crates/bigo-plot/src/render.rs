//! Line-and-marker rendering of timing samples.
//!
//! Every call owns its pixel buffer: the bitmap backend borrows it for the
//! duration of the draw and it is dropped once the PNG is encoded, so
//! repeated calls in a long-lived process do not accumulate drawing state.

use std::error::Error;
use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};

use plotters::prelude::*;
use tracing::{debug, warn};

use crate::encode::encode_png;
use crate::error::PlotError;

/// 10in × 6in at 100 dpi.
pub const DEFAULT_WIDTH: u32 = 1000;
pub const DEFAULT_HEIGHT: u32 = 600;

const TITLE: &str = "Algorithm Time Complexity Visualization";
const X_DESC: &str = "Input size";
const Y_DESC: &str = "Running time (seconds)";

const SERIES: RGBColor = RGBColor(31, 119, 180);
const GRID: RGBColor = RGBColor(225, 225, 225);
const GRID_LINES: usize = 10;

type DrawResult = Result<(), Box<dyn Error + Send + Sync>>;

/// Renders `(size, seconds)` samples as a PNG timing curve.
#[derive(Debug, Clone, Copy)]
pub struct CurveRenderer {
    width:  u32,
    height: u32,
}

impl Default for CurveRenderer {
    fn default() -> Self {
        Self { width: DEFAULT_WIDTH, height: DEFAULT_HEIGHT }
    }
}

impl CurveRenderer {
    pub fn new(width: u32, height: u32) -> Result<Self, PlotError> {
        if width == 0 || height == 0 {
            return Err(PlotError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Draws the curve and returns the encoded PNG bytes.
    ///
    /// If the labelled chart cannot be drawn (typically because no font is
    /// registered) the chart is redrawn without any text.
    pub fn render(&self, sizes: &[usize], times: &[f64]) -> Result<Vec<u8>, PlotError> {
        if sizes.len() != times.len() {
            return Err(PlotError::LengthMismatch { sizes: sizes.len(), times: times.len() });
        }

        let points: Vec<(f64, f64)> = sizes
            .iter()
            .map(|&s| s as f64)
            .zip(times.iter().copied())
            .collect();
        let (x_range, y_range) = axis_ranges(&points);

        let mut pixels = vec![0u8; self.width as usize * self.height as usize * 3];

        let labelled = panic::catch_unwind(AssertUnwindSafe(|| {
            self.draw(&mut pixels, &points, x_range.clone(), y_range.clone(), true)
        }));
        let fallback_reason = match labelled {
            Ok(Ok(()))  => None,
            Ok(Err(e))  => Some(e.to_string()),
            Err(_)      => Some("text renderer panicked".to_string()),
        };

        if let Some(reason) = fallback_reason {
            warn!(error = %reason, "plot text unavailable, rendering without labels");
            pixels.fill(0);
            self.draw(&mut pixels, &points, x_range, y_range, false)
                .map_err(|e| PlotError::Drawing(e.to_string()))?;
        }

        let png = encode_png(pixels, self.width, self.height)?;
        debug!(points = points.len(), bytes = png.len(), "curve rendered");
        Ok(png)
    }

    fn draw(
        &self,
        pixels: &mut [u8],
        points: &[(f64, f64)],
        x_range: Range<f64>,
        y_range: Range<f64>,
        labelled: bool,
    ) -> DrawResult {
        let root = BitMapBackend::with_buffer(pixels, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = if labelled {
            let mut chart = ChartBuilder::on(&root)
                .caption(TITLE, ("sans-serif", 24))
                .margin(20)
                .x_label_area_size(50)
                .y_label_area_size(90)
                .build_cartesian_2d(x_range.clone(), y_range.clone())?;

            chart
                .configure_mesh()
                .x_desc(X_DESC)
                .y_desc(Y_DESC)
                .axis_desc_style(("sans-serif", 16))
                .label_style(("sans-serif", 12))
                .light_line_style(&GRID)
                .bold_line_style(&GRID)
                .y_label_formatter(&|v| format!("{v:.2e}"))
                .draw()?;
            chart
        } else {
            let mut chart = ChartBuilder::on(&root)
                .margin(20)
                .build_cartesian_2d(x_range.clone(), y_range.clone())?;

            // Text-free grid: evenly spaced lines in data coordinates.
            for i in 0..=GRID_LINES {
                let t  = i as f64 / GRID_LINES as f64;
                let gx = x_range.start + (x_range.end - x_range.start) * t;
                let gy = y_range.start + (y_range.end - y_range.start) * t;
                chart.draw_series(std::iter::once(PathElement::new(
                    vec![(gx, y_range.start), (gx, y_range.end)],
                    &GRID,
                )))?;
                chart.draw_series(std::iter::once(PathElement::new(
                    vec![(x_range.start, gy), (x_range.end, gy)],
                    &GRID,
                )))?;
            }
            chart
        };

        chart.draw_series(LineSeries::new(points.iter().copied(), SERIES.stroke_width(2)))?;
        chart.draw_series(points.iter().map(|&p| Circle::new(p, 4, SERIES.filled())))?;

        root.present()?;
        Ok(())
    }
}

/// x spans the sizes, y spans `[0, 1.1 * max]`; degenerate spans are widened.
fn axis_ranges(points: &[(f64, f64)]) -> (Range<f64>, Range<f64>) {
    if points.is_empty() {
        return (0.0..1.0, 0.0..1.0);
    }

    let x_min = points.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
    let x_max = points.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
    let (x_min, x_max) = if x_max > x_min {
        (x_min, x_max)
    } else {
        (x_min - 1.0, x_max + 1.0)
    };

    let y_max = points
        .iter()
        .map(|p| p.1)
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);
    let y_max = if y_max > 0.0 { y_max * 1.1 } else { 1e-6 };

    (x_min..x_max, 0.0..y_max)
}
