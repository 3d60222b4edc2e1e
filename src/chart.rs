use crate::config::ImageFormat;
use log::debug;
use plotters::{coord::Shift, prelude::*};
use std::{
    ops::Range,
    path::{Path, PathBuf},
};
use thiserror::Error;

pub mod latency;
pub mod resources;
pub mod stability;

pub use latency::LatencyChart;
pub use resources::ResourceChart;
pub use stability::StabilityChart;

// Output resolution. Figure sizes below are in inches at this density.
pub const DPI: u32 = 300;

pub type DrawResult<T, DB> = Result<T, DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

pub trait Chart {
    // File name of the chart image, without extension.
    fn file_stem(&self) -> &'static str;
    // Width and height in pixels.
    fn size(&self) -> (u32, u32);
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> DrawResult<(), DB>;
}

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("error drawing chart: {0}")]
    Draw(String),
    #[error("{} output requires the `raster` feature", .0.extension())]
    UnsupportedFormat(ImageFormat),
}

impl ChartError {
    fn draw<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> Self {
        ChartError::Draw(e.to_string())
    }
}

// Renders `chart` into `dir`, replacing any previous image of the same name.
pub fn render<C: Chart>(chart: &C, dir: &Path, format: ImageFormat) -> Result<PathBuf, ChartError> {
    let path = dir.join(format!("{}.{}", chart.file_stem(), format.extension()));
    debug!("rendering {}", path.display());
    match format {
        ImageFormat::Svg => present(chart, SVGBackend::new(&path, chart.size()).into_drawing_area())?,
        #[cfg(feature = "raster")]
        ImageFormat::Png => {
            present(chart, BitMapBackend::new(&path, chart.size()).into_drawing_area())?
        }
        #[cfg(not(feature = "raster"))]
        ImageFormat::Png => return Err(ChartError::UnsupportedFormat(format)),
    }
    Ok(path)
}

fn present<C: Chart, DB: DrawingBackend>(
    chart: &C,
    root: DrawingArea<DB, Shift>,
) -> Result<(), ChartError> {
    root.fill(&WHITE).map_err(ChartError::draw)?;
    chart.draw(&root).map_err(ChartError::draw)?;
    root.present().map_err(ChartError::draw)
}

// Pixel size of a length given in typographic points.
pub(crate) fn px(points: f64) -> u32 {
    (points * DPI as f64 / 72.0).round() as u32
}

pub(crate) fn font(points: f64) -> FontDesc<'static> {
    ("sans-serif", points * DPI as f64 / 72.0).into_font()
}

pub(crate) fn figure(width_in: u32, height_in: u32) -> (u32, u32) {
    (width_in * DPI, height_in * DPI)
}

// Categorical x axis: scenario i sits at x = i, with half a slot of padding
// on either side.
pub(crate) fn category_range(n: usize) -> Range<f64> {
    -0.5..(n as f64 - 0.5)
}

// Label of the scenario at tick `x`. Ticks between scenarios are left blank.
pub(crate) fn category_label(labels: &[String], x: f64) -> String {
    if x < 0.0 || (x - x.round()).abs() > 1e-6 {
        return String::new();
    }
    labels.get(x.round() as usize).cloned().unwrap_or_default()
}

// Upper bound for an axis starting at zero, 10% above the largest value.
pub(crate) fn headroom<'a, I: IntoIterator<Item = &'a f64>>(values: I) -> f64 {
    let max = values.into_iter().cloned().fold(0.0, f64::max);
    if max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}

// Axis range covering every value with 5% padding. Flat or empty series
// get a unit-wide range so the axis can still be drawn.
pub(crate) fn padded_range<I: IntoIterator<Item = f64>>(values: I) -> Range<f64> {
    let (min, max) = values
        .into_iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if min > max {
        return 0.0..1.0;
    }
    if min == max {
        return (min - 1.0)..(max + 1.0);
    }
    let pad = (max - min) * 0.05;
    (min - pad)..(max + pad)
}

#[cfg(test)]
pub mod tests {
    use super::{category_label, category_range, headroom, padded_range, px};

    #[test]
    fn test_px() {
        assert_eq!(px(72.0), 300);
        assert_eq!(px(0.0), 0);
    }

    #[test]
    fn test_category_label() {
        let labels = vec!["a".to_string(), "b".to_string()];
        assert_eq!(category_label(&labels, 0.0), "a");
        assert_eq!(category_label(&labels, 1.0), "b");
        assert_eq!(category_label(&labels, 2.0), "");
        assert_eq!(category_label(&labels, -0.5), "");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, 0.2), "");
        assert_eq!(category_range(2), -0.5..1.5);
    }

    #[test]
    fn test_headroom() {
        assert_eq!(headroom(&[0.0, 0.0]), 1.0);
        assert!((headroom(&[10.0, 5.0]) - 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_padded_range() {
        assert_eq!(padded_range(vec![]), 0.0..1.0);
        assert_eq!(padded_range(vec![4.0, 4.0]), 3.0..5.0);
        let range = padded_range(vec![0.0, 100.0]);
        assert_eq!(range, -5.0..105.0);
    }
}
