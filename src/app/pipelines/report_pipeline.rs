use crate::core::report::{build_archive, build_report, effective_formats, render};
use crate::core::{ConfigProvider, Pipeline, ProjectionInput, ProjectionReport, Storage};
use crate::utils::error::Result;
use crate::utils::validation::Validate;

/// Reads the input from a [`ConfigProvider`], projects it and writes the
/// report files through a [`Storage`] rooted at the output directory.
pub struct ReportPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ReportPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ReportPipeline<S, C> {
    async fn extract(&self) -> Result<ProjectionInput> {
        let input = self.config.projection_input()?;
        input.validate()?;

        for (i, sample) in input.samples.iter().enumerate() {
            tracing::debug!(
                "{}: volume={} working_days={}",
                input.month_label(i),
                sample.volume,
                sample.working_days
            );
        }

        Ok(input)
    }

    async fn transform(&self, input: ProjectionInput) -> Result<ProjectionReport> {
        Ok(build_report(input))
    }

    async fn load(&self, report: &ProjectionReport) -> Result<String> {
        let formats = effective_formats(report, &self.config.output_formats()?);
        let mut files = Vec::with_capacity(formats.len());
        for format in formats {
            let data = render(report, format)?;
            tracing::debug!("Rendered {} ({} bytes)", format.file_name(), data.len());
            files.push((format.file_name().to_string(), data));
        }

        let compression = self.config.compression();
        if compression.enabled {
            let zip_data = build_archive(&files)?;
            tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
            self.storage
                .write_file(&compression.filename, &zip_data)
                .await?;
            return Ok(format!(
                "{}/{}",
                self.config.output_path(),
                compression.filename
            ));
        }

        for (name, data) in &files {
            self.storage.write_file(name, data).await?;
        }

        let names: Vec<&str> = files.iter().map(|(name, _)| name.as_str()).collect();
        Ok(format!(
            "{}/{{{}}}",
            self.config.output_path(),
            names.join(",")
        ))
    }
}
