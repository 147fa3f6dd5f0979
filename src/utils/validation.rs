use crate::domain::model::{ProjectionInput, ReportFormat, HISTORY_MONTHS};
use crate::utils::error::{ProjectionError, Result};
use chrono::Month;

pub const MIN_SEASONALITY_PCT: i32 = -50;
pub const MAX_SEASONALITY_PCT: i32 = 50;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ProjectionError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ProjectionError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// Volumes and day counts must be finite and at least zero.
pub fn validate_non_negative(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(ProjectionError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite number".to_string(),
        });
    }
    if value < 0.0 {
        return Err(ProjectionError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be negative".to_string(),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| ProjectionError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ProjectionError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ProjectionError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_month_count(field_name: &str, count: usize) -> Result<()> {
    if count == 0 || count > HISTORY_MONTHS {
        return Err(ProjectionError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: count.to_string(),
            reason: format!("Expected between 1 and {} months", HISTORY_MONTHS),
        });
    }
    Ok(())
}

pub fn parse_formats(field_name: &str, formats: &[String]) -> Result<Vec<ReportFormat>> {
    if formats.is_empty() {
        return Err(ProjectionError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: String::new(),
            reason: format!(
                "At least one format is required. Valid formats: {}",
                ReportFormat::ALL.join(", ")
            ),
        });
    }

    let mut parsed: Vec<ReportFormat> = Vec::with_capacity(formats.len());
    for format in formats {
        let value = format
            .parse::<ReportFormat>()
            .map_err(|reason| ProjectionError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: format.clone(),
                reason,
            })?;
        if !parsed.contains(&value) {
            parsed.push(value);
        }
    }
    Ok(parsed)
}

/// Accepts English month names or three-letter abbreviations, in any case.
pub fn parse_month(field_name: &str, value: &str) -> Result<Month> {
    value
        .trim()
        .parse::<Month>()
        .map_err(|_| ProjectionError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Expected a month name such as 'January' or 'jan'".to_string(),
        })
}

impl Validate for ProjectionInput {
    fn validate(&self) -> Result<()> {
        for (i, sample) in self.samples.iter().enumerate() {
            validate_non_negative(&format!("months[{}].volume", i), sample.volume)?;
            validate_non_negative(&format!("months[{}].working_days", i), sample.working_days)?;
        }
        validate_non_negative("next_month.working_days", self.next_month_days)?;
        validate_range(
            "adjustments.seasonality_pct",
            self.adjustments.seasonality_pct,
            MIN_SEASONALITY_PCT,
            MAX_SEASONALITY_PCT,
        )
    }
}
