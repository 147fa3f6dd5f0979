use crate::config::samples;
use crate::core::ConfigProvider;
use crate::domain::model::{
    AdjustmentConfig, CompressionConfig, MonthSample, ProjectionInput, ReportFormat,
};
use crate::utils::error::{ProjectionError, Result};
use crate::utils::validation::{
    parse_formats, parse_month, validate_month_count, validate_non_empty_string, validate_path,
    Validate,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub projection: ProjectionSection,
    #[serde(default)]
    pub months: Vec<MonthConfig>,
    pub next_month: NextMonthConfig,
    #[serde(default)]
    pub adjustments: AdjustmentsSection,
    pub output: OutputConfig,
    pub logging: Option<LoggingConfig>,
    /// Directory of the loaded file; relative `samples_file` paths resolve against it.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionSection {
    pub name: String,
    pub description: Option<String>,
    /// CSV with month,volume,working_days rows, used instead of `[[months]]`.
    pub samples_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthConfig {
    pub month: Option<String>,
    pub volume: f64,
    pub working_days: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextMonthConfig {
    pub working_days: f64,
    pub month: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdjustmentsSection {
    pub seasonality_pct: Option<i32>,
    pub apply_trend: Option<bool>,
    pub ignore_outliers: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub output_path: String,
    pub output_formats: Vec<String>,
    pub compression: Option<CompressionConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ProjectionError::IoError)?;
        let mut config = Self::from_toml_str(&content)?;
        config.base_dir = path.as_ref().parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ProjectionError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${OUTPUT_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ProjectionError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn adjustments(&self) -> AdjustmentConfig {
        let defaults = AdjustmentConfig::default();
        AdjustmentConfig {
            seasonality_pct: self
                .adjustments
                .seasonality_pct
                .unwrap_or(defaults.seasonality_pct),
            apply_trend: self.adjustments.apply_trend.unwrap_or(defaults.apply_trend),
            ignore_outliers: self
                .adjustments
                .ignore_outliers
                .unwrap_or(defaults.ignore_outliers),
        }
    }

    pub fn samples(&self) -> Result<Vec<MonthSample>> {
        if let Some(file) = &self.projection.samples_file {
            if !self.months.is_empty() {
                return Err(ProjectionError::ConfigValidationError {
                    field: "projection.samples_file".to_string(),
                    message: "Use either samples_file or [[months]], not both".to_string(),
                });
            }
            let path = match &self.base_dir {
                Some(dir) => dir.join(file),
                None => PathBuf::from(file),
            };
            return samples::load_samples(path);
        }

        validate_month_count("months", self.months.len())?;
        self.months
            .iter()
            .enumerate()
            .map(|(i, month)| {
                let sample = MonthSample::new(month.volume, month.working_days);
                match &month.month {
                    Some(name) => {
                        let field = format!("months[{}].month", i);
                        Ok(sample.with_month(parse_month(&field, name)?))
                    }
                    None => Ok(sample),
                }
            })
            .collect()
    }

    pub fn verbose_logging(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .map(|level| matches!(level.to_ascii_lowercase().as_str(), "debug" | "trace"))
            .unwrap_or(false)
    }

    pub fn json_logging(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("projection.name", &self.projection.name)?;
        validate_path("output.output_path", &self.output.output_path)?;
        parse_formats("output.output_formats", &self.output.output_formats)?;
        if let Some(compression) = &self.output.compression {
            if compression.enabled {
                validate_non_empty_string("output.compression.filename", &compression.filename)?;
            }
        }

        self.projection_input()?.validate()
    }
}

impl ConfigProvider for TomlConfig {
    fn projection_input(&self) -> Result<ProjectionInput> {
        let samples = self.samples()?;
        let mut input =
            ProjectionInput::from_samples(&samples, self.next_month.working_days, self.adjustments())
                .ok_or_else(|| ProjectionError::ConfigError {
                    message: "At most three months of history are supported".to_string(),
                })?;
        if let Some(name) = &self.next_month.month {
            input.next_month = Some(parse_month("next_month.month", name)?);
        }
        Ok(input)
    }

    fn output_path(&self) -> &str {
        &self.output.output_path
    }

    fn output_formats(&self) -> Result<Vec<ReportFormat>> {
        parse_formats("output.output_formats", &self.output.output_formats)
    }

    fn compression(&self) -> CompressionConfig {
        self.output.compression.clone().unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
