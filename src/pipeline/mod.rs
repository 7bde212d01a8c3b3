//! Pipeline orchestration: routing, statistics, and the run controller.

pub mod controller;
pub mod router;
pub mod stats;

pub use controller::{Pipeline, PipelineBuilder};
pub use router::OutputRouter;
pub use stats::{ClassificationReport, StatsAggregator};
