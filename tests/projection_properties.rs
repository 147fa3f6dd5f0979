use volume_projection::core::projection::project_with_trace;
use volume_projection::{project, AdjustmentConfig, MonthSample, Projection, ProjectionInput};

fn adjustments(seasonality_pct: i32, apply_trend: bool, ignore_outliers: bool) -> AdjustmentConfig {
    AdjustmentConfig {
        seasonality_pct,
        apply_trend,
        ignore_outliers,
    }
}

#[test]
fn test_every_zero_combination_has_no_result() {
    for config in [
        adjustments(0, false, false),
        adjustments(0, true, true),
        adjustments(-50, true, false),
        adjustments(50, false, true),
    ] {
        assert_eq!(project(&[0.0; 3], &[0.0; 3], 20.0, &config), None);
        assert_eq!(project(&[0.0; 3], &[0.0; 3], 0.0, &config), None);
    }
}

#[test]
fn test_documented_example_stage_by_stage() {
    let volumes = [10000.0, 15000.0, 12000.0];
    let days = [20.0, 22.0, 21.0];

    let base = project(&volumes, &days, 20.0, &adjustments(0, false, false)).unwrap();
    assert_eq!(base.daily_average, 584);

    let trended = project(&volumes, &days, 20.0, &adjustments(0, true, false)).unwrap();
    assert_eq!(trended.daily_average, 700);

    let full = project(&volumes, &days, 20.0, &adjustments(-10, true, false)).unwrap();
    assert_eq!(
        full,
        Projection {
            daily_average: 630,
            next_month_total: 12600,
        }
    );
}

#[test]
fn test_trend_ignores_middle_month() {
    let days = [20.0, 22.0, 21.0];
    for middle in [1.0, 15000.0, 90000.0] {
        let trace = project_with_trace(
            &[10000.0, middle, 12000.0],
            &days,
            20.0,
            &adjustments(0, true, false),
        )
        .unwrap();
        assert!((trace.growth.unwrap() - 0.2).abs() < 1e-12);
    }
}

#[test]
fn test_input_wrapper_matches_free_function() {
    let input = ProjectionInput::new(
        [
            MonthSample::new(8000.0, 18.0),
            MonthSample::new(0.0, 21.0),
            MonthSample::new(9500.0, 22.0),
        ],
        19.0,
        adjustments(5, true, true),
    );

    assert_eq!(
        input.project(),
        project(
            &input.volumes(),
            &input.working_days(),
            input.next_month_days,
            &input.adjustments
        )
    );
}

#[test]
fn test_concurrent_calls_agree() {
    let handles: Vec<_> = (0..8)
        .map(|_| {
            std::thread::spawn(|| {
                project(
                    &[10000.0, 15000.0, 12000.0],
                    &[20.0, 22.0, 21.0],
                    20.0,
                    &adjustments(-10, true, false),
                )
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().unwrap().next_month_total, 12600);
    }
}
