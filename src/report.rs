use crate::{
    chart::{self, Chart, ChartError, LatencyChart, ResourceChart, StabilityChart},
    config::{Config, ConfigError},
    resource_log,
};
use log::{error, info, warn};
use std::{
    fmt,
    io::{self, Write},
    path::PathBuf,
};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Latency,
    Stability,
    Resources,
}

impl ChartKind {
    // Rendering order of a report run.
    pub const ALL: [ChartKind; 3] = [ChartKind::Latency, ChartKind::Stability, ChartKind::Resources];
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartKind::Latency => write!(f, "chart 1 (response time)"),
            ChartKind::Stability => write!(f, "chart 2 (stability)"),
            ChartKind::Resources => write!(f, "chart 3 (resources)"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("invalid scenarios: {0}")]
    InvalidScenarios(#[from] ConfigError),
    #[error("error reading resource log {}: {source}", .path.display())]
    ResourceLog {
        path: PathBuf,
        source: resource_log::Error,
    },
    #[error(transparent)]
    Chart(#[from] ChartError),
}

#[derive(Debug)]
pub enum ChartOutcome {
    Rendered(PathBuf),
    // The resource log doesn't exist.
    Skipped(PathBuf),
    Failed(ReportError),
}

#[derive(Debug)]
pub struct Summary {
    pub outcomes: Vec<(ChartKind, ChartOutcome)>,
}

impl Summary {
    pub fn rendered(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| matches!(o, ChartOutcome::Rendered(_)))
            .count()
    }

    pub fn outcome(&self, kind: ChartKind) -> Option<&ChartOutcome> {
        self.outcomes
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, o)| o)
    }
}

pub struct Report {
    config: Config,
}

impl Report {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn render_latency(&self) -> Result<PathBuf, ReportError> {
        let s = &self.config.scenarios;
        let chart = LatencyChart::new(&s.labels, &s.avg_latency, &s.p95_latency)?;
        self.render(&chart)
    }

    pub fn render_stability(&self) -> Result<PathBuf, ReportError> {
        let s = &self.config.scenarios;
        let chart = StabilityChart::new(&s.labels, &s.throughput, &s.error_rate)?;
        self.render(&chart)
    }

    // Ok(None) when there is no resource log to chart.
    pub fn render_resources(&self) -> Result<Option<PathBuf>, ReportError> {
        let path = &self.config.resource_log;
        let samples = match resource_log::open(path) {
            Ok(samples) => samples,
            Err(resource_log::Error::NotFound(_)) => return Ok(None),
            Err(source) => {
                return Err(ReportError::ResourceLog {
                    path: path.clone(),
                    source,
                })
            }
        };
        self.render(&ResourceChart::new(&samples)).map(Some)
    }

    fn render<C: Chart>(&self, figure: &C) -> Result<PathBuf, ReportError> {
        Ok(chart::render(
            figure,
            &self.config.output_dir,
            self.config.format,
        )?)
    }

    pub fn render_chart(&self, kind: ChartKind) -> ChartOutcome {
        let result = match kind {
            ChartKind::Latency => self.render_latency().map(Some),
            ChartKind::Stability => self.render_stability().map(Some),
            ChartKind::Resources => self.render_resources(),
        };
        match result {
            Ok(Some(path)) => {
                info!("rendered {} to {}", kind, path.display());
                ChartOutcome::Rendered(path)
            }
            Ok(None) => {
                warn!("skipping {}: {} not found", kind, self.config.resource_log.display());
                ChartOutcome::Skipped(self.config.resource_log.clone())
            }
            Err(e) => {
                error!("failed to render {}: {}", kind, e);
                ChartOutcome::Failed(e)
            }
        }
    }

    // Renders every chart in order and writes one status line per chart,
    // then a completion banner. A failed or skipped chart never stops the
    // others; only a failure to write the status lines is returned.
    pub fn run<W: Write>(&self, out: &mut W) -> io::Result<Summary> {
        if let Err(e) = self.config.scenarios.validate() {
            warn!("invalid scenarios: {}", e);
        }

        let mut outcomes = Vec::with_capacity(ChartKind::ALL.len());
        for kind in ChartKind::ALL {
            let outcome = self.render_chart(kind);
            write_status(out, kind, &outcome)?;
            outcomes.push((kind, outcome));
        }

        let summary = Summary { outcomes };
        writeln!(
            out,
            "\nDone: {} of {} charts rendered into {}",
            summary.rendered(),
            ChartKind::ALL.len(),
            self.config.output_dir.display()
        )?;
        out.flush()?;
        Ok(summary)
    }
}

fn write_status<W: Write>(out: &mut W, kind: ChartKind, outcome: &ChartOutcome) -> io::Result<()> {
    match outcome {
        ChartOutcome::Rendered(path) => writeln!(out, "Rendered {}: {}", kind, path.display()),
        ChartOutcome::Skipped(log) => writeln!(
            out,
            "Warning: {} not found. Run the resource monitor first to render {}.",
            log.display(),
            kind
        ),
        ChartOutcome::Failed(e) => writeln!(out, "Error: {} not rendered: {}", kind, e),
    }
}
