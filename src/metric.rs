use serde::Deserialize;

// One row of the resource monitor log. Fields are positional in the file.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ResourceSample {
    pub elapsed_secs: u64,
    pub cpu_percent: f64,
    pub ram_mb: f64,
}
