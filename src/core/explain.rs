use crate::core::projection::{project_with_trace, ProjectionTrace};
use crate::domain::model::{AdjustmentConfig, MonthSample, ProjectionInput};

/// The three months used in the methodology text.
pub fn worked_example() -> ProjectionInput {
    ProjectionInput::new(
        [
            MonthSample::new(10000.0, 20.0),
            MonthSample::new(15000.0, 22.0),
            MonthSample::new(12000.0, 21.0),
        ],
        20.0,
        AdjustmentConfig {
            seasonality_pct: -10,
            apply_trend: true,
            ignore_outliers: false,
        },
    )
}

/// How the projection is calculated, with every number taken from a live run
/// over [`worked_example`].
pub fn methodology() -> String {
    let input = worked_example();
    let trace = project_with_trace(
        &input.volumes(),
        &input.working_days(),
        input.next_month_days,
        &input.adjustments,
    );

    match trace {
        Some(trace) => describe(&input, &trace),
        None => "The worked example produced no projection.".to_string(),
    }
}

fn describe(input: &ProjectionInput, trace: &ProjectionTrace) -> String {
    let mut out = String::new();
    out.push_str("How it works:\n");
    out.push_str("  1. Seasonality adjusts the daily average for expected demand swings.\n");
    out.push_str("  2. Trend applies the growth or decline between the first and last month.\n");
    out.push_str("  3. Outlier filtering drops volumes far from the average.\n\n");

    out.push_str("Step 1. Daily average volume\n");
    let mut ratios = Vec::new();
    for (i, sample) in input.samples.iter().enumerate() {
        let ratio = sample.volume / sample.working_days;
        ratios.push(ratio.trunc());
        out.push_str(&format!(
            "  {}: {} units / {} working days = {}\n",
            input.month_label(i),
            sample.volume,
            sample.working_days,
            ratio.trunc()
        ));
    }
    let shown: Vec<String> = ratios.iter().map(|r| r.to_string()).collect();
    out.push_str(&format!(
        "  ({}) / {} = {}\n\n",
        shown.join(" + "),
        ratios.len(),
        trace.base_daily_average
    ));

    out.push_str("Step 2. Trend\n");
    let first = trace.valid_volumes.first().copied().unwrap_or_default();
    let last = trace.valid_volumes.last().copied().unwrap_or_default();
    let growth = trace.growth.unwrap_or_default();
    out.push_str(&format!(
        "  ({} - {}) / {} = {:.2} ({:.0}%)\n",
        last,
        first,
        first,
        growth,
        growth * 100.0
    ));
    out.push_str(&format!(
        "  {} x {:.2} = {}\n\n",
        trace.base_daily_average,
        1.0 + growth,
        trace.trend_daily_average
    ));

    let seasonality = input.adjustments.seasonality_pct;
    out.push_str("Step 3. Seasonality\n");
    out.push_str(&format!(
        "  {}% -> {} x {:.2} = {}\n\n",
        seasonality,
        trace.trend_daily_average,
        1.0 + seasonality as f64 / 100.0,
        trace.daily_average
    ));

    out.push_str("Step 4. Next month projection\n");
    out.push_str(&format!(
        "  {} x {} working days = {}\n",
        trace.daily_average, input.next_month_days, trace.next_month_total
    ));
    out
}
