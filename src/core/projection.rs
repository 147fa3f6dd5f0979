//! The projection engine.
//!
//! A pure function over three historical months. Stages run in a fixed order:
//! filter, outlier removal, guard, daily average, trend, seasonality and
//! finally the next-month total. Every stage that produces an integer
//! truncates toward zero (`as i64`), never floors.

use crate::domain::model::{AdjustmentConfig, Projection, HISTORY_MONTHS};

/// Outlier band around the mean of valid volumes, exclusive on both ends.
const OUTLIER_LOWER: f64 = 0.5;
const OUTLIER_UPPER: f64 = 1.5;

/// Intermediate values of one projection, in stage order.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionTrace {
    pub valid_volumes: Vec<f64>,
    pub valid_days: Vec<f64>,
    /// Volumes dropped by the outlier filter.
    pub outliers: Vec<f64>,
    pub base_daily_average: i64,
    /// Growth between the first and last valid volume, when trend was applied.
    pub growth: Option<f64>,
    pub trend_daily_average: i64,
    pub daily_average: i64,
    pub next_month_total: i64,
}

impl ProjectionTrace {
    pub fn projection(&self) -> Projection {
        Projection {
            daily_average: self.daily_average,
            next_month_total: self.next_month_total,
        }
    }
}

/// Projects next month's volume. Returns `None` when no valid volume or no
/// valid working-day count survives filtering.
pub fn project(
    volumes: &[f64; HISTORY_MONTHS],
    working_days: &[f64; HISTORY_MONTHS],
    next_month_days: f64,
    adjustments: &AdjustmentConfig,
) -> Option<Projection> {
    project_with_trace(volumes, working_days, next_month_days, adjustments)
        .map(|trace| trace.projection())
}

/// Same as [`project`] but keeps every intermediate value.
pub fn project_with_trace(
    volumes: &[f64; HISTORY_MONTHS],
    working_days: &[f64; HISTORY_MONTHS],
    next_month_days: f64,
    adjustments: &AdjustmentConfig,
) -> Option<ProjectionTrace> {
    // The two lists are filtered independently and re-paired by position below.
    let mut valid_volumes: Vec<f64> = volumes.iter().copied().filter(|v| *v > 0.0).collect();
    let valid_days: Vec<f64> = working_days.iter().copied().filter(|d| *d > 0.0).collect();

    let mut outliers = Vec::new();
    if adjustments.ignore_outliers && valid_volumes.len() > 1 {
        let mean = valid_volumes.iter().sum::<f64>() / valid_volumes.len() as f64;
        let (kept, dropped): (Vec<f64>, Vec<f64>) = valid_volumes
            .into_iter()
            .partition(|v| *v > OUTLIER_LOWER * mean && *v < OUTLIER_UPPER * mean);
        tracing::debug!(mean, ?kept, ?dropped, "outlier filter applied");
        valid_volumes = kept;
        outliers = dropped;
    }

    if valid_volumes.is_empty() || valid_days.is_empty() {
        tracing::debug!(
            valid_volumes = valid_volumes.len(),
            valid_days = valid_days.len(),
            "insufficient data for a projection"
        );
        return None;
    }

    // Divided by the volume count, not the pair count.
    let ratio_sum: f64 = valid_volumes
        .iter()
        .zip(valid_days.iter())
        .map(|(volume, days)| volume / days)
        .sum();
    let base_daily_average = (ratio_sum / valid_volumes.len() as f64) as i64;

    let mut daily_average = base_daily_average;
    let mut growth = None;
    if adjustments.apply_trend && valid_volumes.len() > 1 {
        let first = valid_volumes[0];
        let last = valid_volumes[valid_volumes.len() - 1];
        let rate = (last - first) / first;
        daily_average = (daily_average as f64 * (1.0 + rate)) as i64;
        growth = Some(rate);
    }
    let trend_daily_average = daily_average;

    let seasonality = 1.0 + adjustments.seasonality_pct as f64 / 100.0;
    daily_average = (daily_average as f64 * seasonality) as i64;

    let next_month_total = (daily_average as f64 * next_month_days) as i64;

    tracing::debug!(
        base_daily_average,
        ?growth,
        trend_daily_average,
        daily_average,
        next_month_total,
        "projection computed"
    );

    Some(ProjectionTrace {
        valid_volumes,
        valid_days,
        outliers,
        base_daily_average,
        growth,
        trend_daily_average,
        daily_average,
        next_month_total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adjustments(seasonality_pct: i32, apply_trend: bool, ignore_outliers: bool) -> AdjustmentConfig {
        AdjustmentConfig {
            seasonality_pct,
            apply_trend,
            ignore_outliers,
        }
    }

    const VOLUMES: [f64; 3] = [10000.0, 15000.0, 12000.0];
    const DAYS: [f64; 3] = [20.0, 22.0, 21.0];

    #[test]
    fn test_all_zero_inputs_yield_no_result() {
        let result = project(&[0.0; 3], &[0.0; 3], 20.0, &adjustments(0, true, true));
        assert_eq!(result, None);
    }

    #[test]
    fn test_no_valid_days_yields_no_result() {
        let result = project(&VOLUMES, &[0.0; 3], 20.0, &adjustments(0, false, false));
        assert_eq!(result, None);
    }

    #[test]
    fn test_no_valid_volumes_yields_no_result() {
        let result = project(&[0.0; 3], &DAYS, 20.0, &adjustments(0, false, false));
        assert_eq!(result, None);
    }

    #[test]
    fn test_daily_average_uses_exact_ratios() {
        let result = project(&VOLUMES, &DAYS, 20.0, &adjustments(0, false, false)).unwrap();
        assert_eq!(result.daily_average, 584);
        assert_eq!(result.next_month_total, 11680);
    }

    #[test]
    fn test_trend_uses_first_and_last_valid_volume() {
        let trace =
            project_with_trace(&VOLUMES, &DAYS, 20.0, &adjustments(0, true, false)).unwrap();
        assert_eq!(trace.base_daily_average, 584);
        assert!((trace.growth.unwrap() - 0.2).abs() < 1e-12);
        assert_eq!(trace.daily_average, 700);
    }

    #[test]
    fn test_worked_example_end_to_end() {
        let trace =
            project_with_trace(&VOLUMES, &DAYS, 20.0, &adjustments(-10, true, false)).unwrap();
        assert_eq!(trace.base_daily_average, 584);
        assert_eq!(trace.trend_daily_average, 700);
        assert_eq!(trace.daily_average, 630);
        assert_eq!(trace.next_month_total, 12600);
    }

    #[test]
    fn test_project_is_repeatable() {
        let config = adjustments(-10, true, true);
        let first = project(&VOLUMES, &DAYS, 20.0, &config);
        let second = project(&VOLUMES, &DAYS, 20.0, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn test_seasonality_extremes() {
        let low = project(&VOLUMES, &DAYS, 20.0, &adjustments(-50, false, false)).unwrap();
        assert_eq!(low.daily_average, 292);
        assert_eq!(low.next_month_total, 5840);

        let high = project(&VOLUMES, &DAYS, 20.0, &adjustments(50, false, false)).unwrap();
        assert_eq!(high.daily_average, 876);
        assert_eq!(high.next_month_total, 17520);
    }

    #[test]
    fn test_seasonality_truncates() {
        // 584 * 0.97 = 566.48
        let result = project(&VOLUMES, &DAYS, 1.0, &adjustments(-3, false, false)).unwrap();
        assert_eq!(result.daily_average, 566);
    }

    #[test]
    fn test_single_valid_volume_skips_outlier_filter_and_trend() {
        let trace = project_with_trace(
            &[0.0, 12000.0, 0.0],
            &DAYS,
            20.0,
            &adjustments(0, true, true),
        )
        .unwrap();
        assert_eq!(trace.valid_volumes, vec![12000.0]);
        assert!(trace.outliers.is_empty());
        assert_eq!(trace.growth, None);
        // paired with the first valid day count, 12000 / 20
        assert_eq!(trace.daily_average, 600);
        assert_eq!(trace.next_month_total, 12000);
    }

    #[test]
    fn test_outlier_filter_drops_values_outside_band() {
        let trace = project_with_trace(
            &[10000.0, 10000.0, 30000.0],
            &[20.0, 20.0, 20.0],
            20.0,
            &adjustments(0, false, true),
        )
        .unwrap();
        assert_eq!(trace.valid_volumes, vec![10000.0, 10000.0]);
        assert_eq!(trace.outliers, vec![30000.0]);
        assert_eq!(trace.daily_average, 500);
        assert_eq!(trace.next_month_total, 10000);
    }

    #[test]
    fn test_outlier_bounds_are_exclusive() {
        // mean is 10000, so 5000 and 15000 sit exactly on the bounds
        let trace = project_with_trace(
            &[5000.0, 15000.0, 10000.0],
            &[20.0, 20.0, 20.0],
            20.0,
            &adjustments(0, false, true),
        )
        .unwrap();
        assert_eq!(trace.valid_volumes, vec![10000.0]);
        assert_eq!(trace.daily_average, 500);
    }

    #[test]
    fn test_outlier_filter_can_empty_the_volume_list() {
        let result = project(
            &[1000.0, 10000.0, 1100.0],
            &DAYS,
            20.0,
            &adjustments(0, false, true),
        );
        assert_eq!(result, None);
    }

    #[test]
    fn test_outlier_filter_disabled_keeps_everything() {
        let trace = project_with_trace(
            &[10000.0, 10000.0, 30000.0],
            &[20.0, 20.0, 20.0],
            20.0,
            &adjustments(0, false, false),
        )
        .unwrap();
        assert_eq!(trace.valid_volumes.len(), 3);
        // (500 + 500 + 1500) / 3
        assert_eq!(trace.daily_average, 833);
    }

    #[test]
    fn test_zero_working_day_shifts_pairing() {
        // days filter to [20, 21]; 15000 is paired with 21 and 12000 is left unpaired
        let trace = project_with_trace(
            &VOLUMES,
            &[20.0, 0.0, 21.0],
            20.0,
            &adjustments(0, false, false),
        )
        .unwrap();
        assert_eq!(trace.valid_days, vec![20.0, 21.0]);
        // (500 + 714.28) / 3
        assert_eq!(trace.daily_average, 404);
    }

    #[test]
    fn test_average_divides_by_volume_count() {
        // only one pair (10000 / 20) but three valid volumes
        let result = project(&VOLUMES, &[0.0, 0.0, 20.0], 20.0, &adjustments(0, false, false))
            .unwrap();
        assert_eq!(result.daily_average, 166);
    }

    #[test]
    fn test_negative_trend() {
        let trace = project_with_trace(
            &[12000.0, 0.0, 6000.0],
            &[20.0, 20.0, 20.0],
            20.0,
            &adjustments(0, true, false),
        )
        .unwrap();
        assert_eq!(trace.base_daily_average, 450);
        assert_eq!(trace.growth, Some(-0.5));
        assert_eq!(trace.daily_average, 225);
    }

    #[test]
    fn test_fractional_next_month_days_truncate() {
        let result = project(&VOLUMES, &DAYS, 20.5, &adjustments(-10, true, false)).unwrap();
        assert_eq!(result.daily_average, 630);
        assert_eq!(result.next_month_total, 12915);
    }

    #[test]
    fn test_zero_next_month_days() {
        let result = project(&VOLUMES, &DAYS, 0.0, &adjustments(0, true, false)).unwrap();
        assert_eq!(result.daily_average, 700);
        assert_eq!(result.next_month_total, 0);
    }
}
