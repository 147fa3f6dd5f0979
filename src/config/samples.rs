use crate::domain::model::MonthSample;
use crate::utils::error::Result;
use crate::utils::validation::{parse_month, validate_month_count};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct SampleRow {
    month: Option<String>,
    volume: f64,
    working_days: f64,
}

/// Reads a `month,volume,working_days` CSV file, oldest month first.
pub fn load_samples<P: AsRef<Path>>(path: P) -> Result<Vec<MonthSample>> {
    let data = std::fs::read(path)?;
    parse_samples(&data)
}

pub fn parse_samples(data: &[u8]) -> Result<Vec<MonthSample>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(data);

    let mut samples = Vec::new();
    for (i, row) in reader.deserialize::<SampleRow>().enumerate() {
        let row = row?;
        let mut sample = MonthSample::new(row.volume, row.working_days);
        if let Some(month) = row.month.as_deref().filter(|m| !m.is_empty()) {
            sample = sample.with_month(parse_month(&format!("samples[{}].month", i), month)?);
        }
        samples.push(sample);
    }

    validate_month_count("samples", samples.len())?;
    tracing::debug!("Loaded {} samples", samples.len());
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Month;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_samples_with_months() {
        let data = b"month,volume,working_days\njan,10000,20\nfeb,15000,22\nmar,12000,21\n";
        let samples = parse_samples(data).unwrap();

        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].month, Some(Month::January));
        assert_eq!(samples[1].volume, 15000.0);
        assert_eq!(samples[2].working_days, 21.0);
    }

    #[test]
    fn test_parse_samples_with_blank_month() {
        let data = b"month,volume,working_days\n,10000,20\n";
        let samples = parse_samples(data).unwrap();

        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].month, None);
    }

    #[test]
    fn test_parse_samples_rejects_too_many_rows() {
        let data = b"month,volume,working_days\n,1,1\n,1,1\n,1,1\n,1,1\n";
        assert!(parse_samples(data).is_err());
    }

    #[test]
    fn test_parse_samples_rejects_bad_numbers() {
        let data = b"month,volume,working_days\njan,lots,20\n";
        assert!(matches!(
            parse_samples(data),
            Err(crate::utils::error::ProjectionError::CsvError(_))
        ));
    }

    #[test]
    fn test_load_samples_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"month,volume,working_days\napril,9000,19\n")
            .unwrap();

        let samples = load_samples(temp_file.path()).unwrap();
        assert_eq!(samples[0].month, Some(Month::April));
        assert_eq!(samples[0].volume, 9000.0);
    }
}
