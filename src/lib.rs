pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::storage::LocalStorage;
pub use app::pipelines::ReportPipeline;
pub use crate::core::projection::project;
pub use crate::core::runner::{ReportRunner, RunOutcome};
pub use domain::model::{AdjustmentConfig, MonthSample, Projection, ProjectionInput};
pub use utils::error::{ProjectionError, Result};
