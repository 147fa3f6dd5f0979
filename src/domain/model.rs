use chrono::{DateTime, Month, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of historical months a projection is computed from.
pub const HISTORY_MONTHS: usize = 3;

pub const NEXT_MONTH_LABEL: &str = "Next month projection";

pub const INSUFFICIENT_DATA_WARNING: &str =
    "Please enter valid volumes and working days for at least one of the previous months.";

/// One historical month: its total volume and how many working days it had.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MonthSample {
    pub month: Option<Month>,
    pub volume: f64,
    pub working_days: f64,
}

impl MonthSample {
    pub fn new(volume: f64, working_days: f64) -> Self {
        Self {
            month: None,
            volume,
            working_days,
        }
    }

    pub fn with_month(mut self, month: Month) -> Self {
        self.month = Some(month);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentConfig {
    /// Percentage applied to the daily average, in [-50, 50].
    pub seasonality_pct: i32,
    pub apply_trend: bool,
    pub ignore_outliers: bool,
}

impl Default for AdjustmentConfig {
    fn default() -> Self {
        Self {
            seasonality_pct: 0,
            apply_trend: true,
            ignore_outliers: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projection {
    pub daily_average: i64,
    pub next_month_total: i64,
}

/// Everything the engine needs for one run. Samples are ordered oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionInput {
    pub samples: [MonthSample; HISTORY_MONTHS],
    pub next_month_days: f64,
    pub next_month: Option<Month>,
    pub adjustments: AdjustmentConfig,
}

impl ProjectionInput {
    pub fn new(
        samples: [MonthSample; HISTORY_MONTHS],
        next_month_days: f64,
        adjustments: AdjustmentConfig,
    ) -> Self {
        Self {
            samples,
            next_month_days,
            next_month: None,
            adjustments,
        }
    }

    /// Builds an input from up to three samples, padding the tail with empty months.
    pub fn from_samples(
        samples: &[MonthSample],
        next_month_days: f64,
        adjustments: AdjustmentConfig,
    ) -> Option<Self> {
        if samples.len() > HISTORY_MONTHS {
            return None;
        }
        let mut padded = [MonthSample::default(); HISTORY_MONTHS];
        padded[..samples.len()].copy_from_slice(samples);
        Some(Self::new(padded, next_month_days, adjustments))
    }

    pub fn volumes(&self) -> [f64; HISTORY_MONTHS] {
        self.samples.map(|s| s.volume)
    }

    pub fn working_days(&self) -> [f64; HISTORY_MONTHS] {
        self.samples.map(|s| s.working_days)
    }

    /// Chart label for the sample at `index`.
    pub fn month_label(&self, index: usize) -> String {
        match self.samples.get(index).and_then(|s| s.month) {
            Some(month) => month.name().to_string(),
            None => format!("Month {}", index + 1),
        }
    }

    pub fn project(&self) -> Option<Projection> {
        crate::core::projection::project(
            &self.volumes(),
            &self.working_days(),
            self.next_month_days,
            &self.adjustments,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
    /// True for the next-month point appended after the history.
    pub projection: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub kind: ChartKind,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionReport {
    pub input: ProjectionInput,
    pub result: Option<Projection>,
    pub charts: Vec<ChartSeries>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub generated_at: DateTime<Utc>,
}

impl ProjectionReport {
    pub fn is_projected(&self) -> bool {
        self.result.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Csv,
    Tsv,
    Json,
}

impl ReportFormat {
    pub const ALL: [&'static str; 3] = ["csv", "tsv", "json"];

    pub fn file_name(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "projection.csv",
            ReportFormat::Tsv => "projection.tsv",
            ReportFormat::Json => "projection.json",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ReportFormat::Csv),
            "tsv" => Ok(ReportFormat::Tsv),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!(
                "Unsupported format '{}'. Valid formats: {}",
                other,
                Self::ALL.join(", ")
            )),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Tsv => "tsv",
            ReportFormat::Json => "json",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionConfig {
    pub enabled: bool,
    #[serde(default = "default_archive_name")]
    pub filename: String,
}

pub fn default_archive_name() -> String {
    "projection_report.zip".to_string()
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            filename: default_archive_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_samples_pads_missing_months() {
        let samples = [MonthSample::new(10000.0, 20.0)];
        let input = ProjectionInput::from_samples(&samples, 20.0, AdjustmentConfig::default())
            .unwrap();

        assert_eq!(input.volumes(), [10000.0, 0.0, 0.0]);
        assert_eq!(input.working_days(), [20.0, 0.0, 0.0]);
    }

    #[test]
    fn test_from_samples_rejects_more_than_three() {
        let samples = [MonthSample::new(1.0, 1.0); 4];
        assert!(ProjectionInput::from_samples(&samples, 20.0, AdjustmentConfig::default())
            .is_none());
    }

    #[test]
    fn test_month_label_falls_back_to_position() {
        let input = ProjectionInput::new(
            [
                MonthSample::new(1.0, 1.0).with_month(Month::March),
                MonthSample::new(1.0, 1.0),
                MonthSample::new(1.0, 1.0),
            ],
            20.0,
            AdjustmentConfig::default(),
        );

        assert_eq!(input.month_label(0), "March");
        assert_eq!(input.month_label(1), "Month 2");
    }

    #[test]
    fn test_adjustment_defaults() {
        let adjustments = AdjustmentConfig::default();
        assert_eq!(adjustments.seasonality_pct, 0);
        assert!(adjustments.apply_trend);
        assert!(!adjustments.ignore_outliers);
    }

    #[test]
    fn test_report_format_parsing() {
        assert_eq!("CSV".parse::<ReportFormat>(), Ok(ReportFormat::Csv));
        assert_eq!(" json ".parse::<ReportFormat>(), Ok(ReportFormat::Json));
        assert!("xlsx".parse::<ReportFormat>().is_err());
    }
}
