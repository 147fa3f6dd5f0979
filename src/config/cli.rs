use crate::config::samples;
use crate::core::ConfigProvider;
use crate::domain::model::{
    AdjustmentConfig, CompressionConfig, MonthSample, ProjectionInput, ReportFormat,
};
use crate::utils::error::{ProjectionError, Result};
use crate::utils::validation::{
    parse_formats, parse_month, validate_month_count, validate_non_empty_string, validate_path,
    validate_range, validate_required_field, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "volume-projection")]
#[command(about = "Projects next month's volume from up to three previous months")]
pub struct CliConfig {
    /// Monthly totals, oldest first (e.g. 10000,15000,12000)
    #[arg(long, value_delimiter = ',')]
    pub volumes: Vec<f64>,

    /// Working days of each month, in the same order as --volumes
    #[arg(long, value_delimiter = ',')]
    pub working_days: Vec<f64>,

    /// Optional month names used as chart labels (e.g. jan,feb,mar)
    #[arg(long, value_delimiter = ',')]
    pub months: Vec<String>,

    /// CSV file with month,volume,working_days rows instead of --volumes/--working-days
    #[arg(long, conflicts_with_all = ["volumes", "working_days", "months"])]
    pub samples_file: Option<String>,

    /// Working days of the month being projected
    #[arg(long, required_unless_present = "explain")]
    pub next_month_days: Option<f64>,

    /// Month being projected, used as a chart label
    #[arg(long)]
    pub next_month: Option<String>,

    /// Seasonality adjustment in percent, between -50 and 50
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub seasonality: i32,

    /// Skip the trend adjustment
    #[arg(long)]
    pub no_trend: bool,

    /// Drop volumes outside 50%..150% of the mean
    #[arg(long)]
    pub ignore_outliers: bool,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Report formats: csv, tsv, json
    #[arg(long, value_delimiter = ',', default_value = "csv,json")]
    pub formats: Vec<String>,

    /// Bundle the report files into a zip archive
    #[arg(long)]
    pub zip: bool,

    #[arg(long, default_value = "projection_report.zip")]
    pub zip_name: String,

    /// Width of the text charts printed after the projection
    #[arg(long, default_value = "40")]
    pub chart_width: usize,

    /// Print how the projection is calculated and exit
    #[arg(long)]
    pub explain: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl CliConfig {
    pub fn adjustments(&self) -> AdjustmentConfig {
        AdjustmentConfig {
            seasonality_pct: self.seasonality,
            apply_trend: !self.no_trend,
            ignore_outliers: self.ignore_outliers,
        }
    }

    fn samples(&self) -> Result<Vec<MonthSample>> {
        if let Some(path) = &self.samples_file {
            return samples::load_samples(path);
        }

        validate_month_count("volumes", self.volumes.len())?;
        if self.volumes.len() != self.working_days.len() {
            return Err(ProjectionError::InvalidConfigValueError {
                field: "working_days".to_string(),
                value: self.working_days.len().to_string(),
                reason: format!(
                    "Expected {} values to match --volumes",
                    self.volumes.len()
                ),
            });
        }
        if self.months.len() > self.volumes.len() {
            return Err(ProjectionError::InvalidConfigValueError {
                field: "months".to_string(),
                value: self.months.join(","),
                reason: "More month names than volumes".to_string(),
            });
        }

        let mut samples = Vec::with_capacity(self.volumes.len());
        for (i, (volume, days)) in self.volumes.iter().zip(&self.working_days).enumerate() {
            let mut sample = MonthSample::new(*volume, *days);
            if let Some(name) = self.months.get(i) {
                sample = sample.with_month(parse_month(&format!("months[{}]", i), name)?);
            }
            samples.push(sample);
        }
        Ok(samples)
    }
}

impl ConfigProvider for CliConfig {
    fn projection_input(&self) -> Result<ProjectionInput> {
        let next_month_days = *validate_required_field("next_month_days", &self.next_month_days)?;
        let samples = self.samples()?;
        let mut input = ProjectionInput::from_samples(&samples, next_month_days, self.adjustments())
            .ok_or_else(|| ProjectionError::ConfigError {
                message: "At most three months of history are supported".to_string(),
            })?;
        if let Some(name) = &self.next_month {
            input.next_month = Some(parse_month("next_month", name)?);
        }
        Ok(input)
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> Result<Vec<ReportFormat>> {
        parse_formats("formats", &self.formats)
    }

    fn compression(&self) -> CompressionConfig {
        CompressionConfig {
            enabled: self.zip,
            filename: self.zip_name.clone(),
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("output_path", &self.output_path)?;
        self.output_formats()?;
        validate_range("chart_width", self.chart_width, 1, 200)?;
        if self.zip {
            validate_non_empty_string("zip_name", &self.zip_name)?;
        }
        if self.explain {
            return Ok(());
        }
        self.projection_input()?.validate()
    }
}
