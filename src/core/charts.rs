use crate::domain::model::{
    ChartKind, ChartPoint, ChartSeries, Projection, ProjectionInput, HISTORY_MONTHS,
    NEXT_MONTH_LABEL,
};

pub const VOLUME_BAR_TITLE: &str = "Total volume and projection";
pub const VOLUME_LINE_TITLE: &str = "Total volume and projection (line)";
pub const WORKING_DAYS_TITLE: &str = "Working days and projection";

/// Builds the volume bar, volume line and working-days series, in that order.
pub fn build_charts(input: &ProjectionInput, projection: &Projection) -> Vec<ChartSeries> {
    let volume_points = series_points(
        input,
        |i| input.samples[i].volume,
        projection.next_month_total as f64,
    );
    let day_points = series_points(
        input,
        |i| input.samples[i].working_days,
        input.next_month_days,
    );

    vec![
        ChartSeries {
            title: VOLUME_BAR_TITLE.to_string(),
            x_label: "Months".to_string(),
            y_label: "Total volume".to_string(),
            kind: ChartKind::Bar,
            points: volume_points.clone(),
        },
        ChartSeries {
            title: VOLUME_LINE_TITLE.to_string(),
            x_label: "Months".to_string(),
            y_label: "Total volume".to_string(),
            kind: ChartKind::Line,
            points: volume_points,
        },
        ChartSeries {
            title: WORKING_DAYS_TITLE.to_string(),
            x_label: "Months".to_string(),
            y_label: "Working days".to_string(),
            kind: ChartKind::Bar,
            points: day_points,
        },
    ]
}

fn series_points(
    input: &ProjectionInput,
    value_at: impl Fn(usize) -> f64,
    next_value: f64,
) -> Vec<ChartPoint> {
    let next_label = match input.next_month {
        Some(month) => format!("{} ({})", NEXT_MONTH_LABEL, month.name()),
        None => NEXT_MONTH_LABEL.to_string(),
    };

    (0..HISTORY_MONTHS)
        .map(|i| ChartPoint {
            label: input.month_label(i),
            value: value_at(i),
            projection: false,
        })
        .chain(std::iter::once(ChartPoint {
            label: next_label,
            value: next_value,
            projection: true,
        }))
        .collect()
}

/// Renders a series as horizontal text bars scaled to `width` characters.
/// Line series draw a marker at the end of each bar instead of a filled bar.
pub fn render_text(series: &ChartSeries, width: usize) -> String {
    let max = series
        .points
        .iter()
        .map(|p| p.value)
        .fold(0.0_f64, f64::max);
    let label_width = series
        .points
        .iter()
        .map(|p| p.label.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = vec![series.title.clone()];
    for point in &series.points {
        let length = if max > 0.0 && point.value > 0.0 {
            ((point.value / max) * width as f64).round() as usize
        } else {
            0
        };
        let bar: String = match series.kind {
            ChartKind::Bar => {
                let glyph = if point.projection { '▒' } else { '█' };
                std::iter::repeat(glyph).take(length).collect()
            }
            // line charts mark the value with a single point at the end
            ChartKind::Line if length > 0 => {
                let marker = if point.projection { '○' } else { '●' };
                let mut line: String = std::iter::repeat('─').take(length - 1).collect();
                line.push(marker);
                line
            }
            ChartKind::Line => String::new(),
        };
        lines.push(format!(
            "  {:<label_width$} | {} {}",
            point.label,
            bar,
            point.value,
            label_width = label_width
        ));
    }
    lines.join("\n")
}
