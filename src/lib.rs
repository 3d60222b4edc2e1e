pub mod chart;
pub mod config;
pub mod report;
pub mod resource_log;
pub use metric::ResourceSample;

mod metric;
