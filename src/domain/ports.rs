use crate::domain::model::{CompressionConfig, ProjectionInput, ProjectionReport, ReportFormat};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn projection_input(&self) -> Result<ProjectionInput>;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> Result<Vec<ReportFormat>>;
    fn compression(&self) -> CompressionConfig;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<ProjectionInput>;
    async fn transform(&self, input: ProjectionInput) -> Result<ProjectionReport>;
    async fn load(&self, report: &ProjectionReport) -> Result<String>;
}
