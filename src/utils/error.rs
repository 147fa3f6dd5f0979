use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProjectionError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ProjectionError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ProjectionError::ConfigError { .. }
            | ProjectionError::ConfigValidationError { .. }
            | ProjectionError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ProjectionError::InvalidConfigValueError { .. } | ProjectionError::CsvError(_) => {
                ErrorCategory::Input
            }
            ProjectionError::ZipError(_)
            | ProjectionError::IoError(_)
            | ProjectionError::SerializationError(_) => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ProjectionError::InvalidConfigValueError { .. }
            | ProjectionError::MissingConfigError { .. }
            | ProjectionError::ConfigValidationError { .. }
            | ProjectionError::ConfigError { .. }
            | ProjectionError::CsvError(_) => ErrorSeverity::High,
            ProjectionError::ZipError(_) | ProjectionError::SerializationError(_) => {
                ErrorSeverity::Medium
            }
            ProjectionError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ProjectionError::ConfigError { .. } | ProjectionError::ConfigValidationError { .. } => {
                "Check the configuration file syntax and section names".to_string()
            }
            ProjectionError::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}' and run again", field)
            }
            ProjectionError::MissingConfigError { field } => {
                format!("Add '{}' to the configuration or pass it as a flag", field)
            }
            ProjectionError::CsvError(_) => {
                "Make sure the samples file has the header month,volume,working_days".to_string()
            }
            ProjectionError::IoError(_) => {
                "Check that the output directory exists and is writable".to_string()
            }
            ProjectionError::ZipError(_) => {
                "Disable compression or choose another archive filename".to_string()
            }
            ProjectionError::SerializationError(_) => {
                "Try a different output format (csv or tsv)".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Invalid input: {}", self),
            ErrorCategory::Output => format!("Could not write the report: {}", self),
        }
    }

    /// Exit code used by the binaries.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProjectionError>;
