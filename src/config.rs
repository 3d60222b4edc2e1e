use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_RESOURCE_LOG: &str = "resource_log.csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Svg,
    // Requires the `raster` feature.
    Png,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Svg => "svg",
            ImageFormat::Png => "png",
        }
    }
}

impl Default for ImageFormat {
    #[cfg(feature = "raster")]
    fn default() -> Self {
        ImageFormat::Png
    }

    #[cfg(not(feature = "raster"))]
    fn default() -> Self {
        ImageFormat::Svg
    }
}

// Inputs of a report run. Edit `Config::default()` to chart a new benchmark.
#[derive(Debug, Clone)]
pub struct Config {
    pub scenarios: ScenarioConfig,
    // CSV written by the resource monitor: header, then seconds,cpu,ram rows.
    pub resource_log: PathBuf,
    // Directory the chart images are written to. Existing images are overwritten.
    pub output_dir: PathBuf,
    pub format: ImageFormat,
}

// Parallel arrays, one entry per scenario, ordered by increasing load.
#[derive(Debug, Clone, Default)]
pub struct ScenarioConfig {
    pub labels: Vec<String>,
    pub avg_latency: Vec<f64>,
    pub p95_latency: Vec<f64>,
    pub throughput: Vec<f64>,
    pub error_rate: Vec<f64>,
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("no scenarios configured")]
    EmptyScenarios,
    #[error("{series} has {actual} values but there are {expected} scenario labels")]
    ShapeMismatch {
        series: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scenarios: ScenarioConfig {
                labels: vec![
                    "50 Users (Baseline)".to_string(),
                    "200 Users (Load)".to_string(),
                    "500 Users (Stress)".to_string(),
                ],
                avg_latency: vec![13.15, 33.68, 629.54],
                p95_latency: vec![15.52, 48.58, 5898.50],
                throughput: vec![7.2, 128.5, 178.6],
                error_rate: vec![0.0, 3.0, 13.89],
            },
            resource_log: PathBuf::from(DEFAULT_RESOURCE_LOG),
            output_dir: PathBuf::from("."),
            format: ImageFormat::default(),
        }
    }
}

// Checks that every series has one value per label.
pub fn check_shape(labels: &[String], series: &[(&'static str, &[f64])]) -> Result<(), ConfigError> {
    if labels.is_empty() {
        return Err(ConfigError::EmptyScenarios);
    }
    for (name, values) in series {
        if values.len() != labels.len() {
            return Err(ConfigError::ShapeMismatch {
                series: name,
                expected: labels.len(),
                actual: values.len(),
            });
        }
    }
    Ok(())
}

impl ScenarioConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_shape(
            &self.labels,
            &[
                ("avg_latency", self.avg_latency.as_slice()),
                ("p95_latency", self.p95_latency.as_slice()),
                ("throughput", self.throughput.as_slice()),
                ("error_rate", self.error_rate.as_slice()),
            ],
        )
    }
}
