pub mod charts;
pub mod explain;
pub mod projection;
pub mod report;
pub mod runner;

pub use crate::domain::model::{Projection, ProjectionInput, ProjectionReport};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
