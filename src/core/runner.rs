use crate::core::Pipeline;
use crate::domain::model::ProjectionReport;
use crate::utils::error::Result;

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub report: ProjectionReport,
    pub output_path: String,
}

pub struct ReportRunner<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ReportRunner<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunOutcome> {
        tracing::info!("Starting projection run");

        // Extract
        let input = self.pipeline.extract().await?;
        tracing::info!(
            next_month_days = input.next_month_days,
            seasonality_pct = input.adjustments.seasonality_pct,
            apply_trend = input.adjustments.apply_trend,
            ignore_outliers = input.adjustments.ignore_outliers,
            "Input collected"
        );

        // Transform
        let report = self.pipeline.transform(input).await?;
        match &report.result {
            Some(projection) => tracing::info!(
                daily_average = projection.daily_average,
                next_month_total = projection.next_month_total,
                "Projection computed"
            ),
            None => tracing::warn!("Not enough valid data for a projection"),
        }

        // Load
        let output_path = self.pipeline.load(&report).await?;
        tracing::info!("Report saved to: {}", output_path);

        Ok(RunOutcome {
            report,
            output_path,
        })
    }
}
