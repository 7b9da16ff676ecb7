//! Chart data adapter
//!
//! Converts result records into what a ring chart and a growth chart need.
//! Degenerate rings (equal or all-zero segments) are nudged by a small
//! epsilon for rendering only; `display_value` always carries the exact
//! number.

use serde::Serialize;

use crate::calculator::ProjectionOutput;
use crate::projection::{Schedule, YearPoint};

/// Segment colours in draw order
pub const PALETTE: [&str; 4] = ["#4f46e5", "#22c55e", "#f59e0b", "#ef4444"];

/// One slice of the summary ring chart
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSegment {
    pub label: &'static str,
    /// Value handed to the chart widget, possibly nudged
    pub value: f64,
    /// Exact value for tooltips and legends
    pub display_value: f64,
    pub color: &'static str,
}

/// One point of the year-by-year growth chart
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub label: String,
    pub contributed: f64,
    pub withdrawn: f64,
    pub interest: f64,
    pub balance: f64,
}

/// Build ring-chart segments from a result record
pub fn to_chart_series<R: ProjectionOutput>(result: &R, epsilon: f64) -> Vec<ChartSegment> {
    let segments = result.segments();
    let values: Vec<f64> = segments.iter().map(|(_, value)| *value).collect();
    let rendered = nudge_degenerate(&values, epsilon);

    segments
        .iter()
        .zip(rendered)
        .enumerate()
        .map(|(index, ((label, exact), value))| ChartSegment {
            label: *label,
            value,
            display_value: *exact,
            color: PALETTE[index % PALETTE.len()],
        })
        .collect()
}

/// Render values for a ring chart
///
/// Negative and non-finite values draw as zero. An all-zero ring becomes
/// `epsilon` everywhere; equal neighbours get separated by `epsilon` steps.
pub fn nudge_degenerate(values: &[f64], epsilon: f64) -> Vec<f64> {
    let mut rendered: Vec<f64> = values
        .iter()
        .map(|&value| if value.is_finite() { value.max(0.0) } else { 0.0 })
        .collect();

    if rendered.iter().all(|&value| value == 0.0) {
        return vec![epsilon; rendered.len()];
    }

    for index in 1..rendered.len() {
        let mut candidate = rendered[index];
        while rendered[..index].contains(&candidate) {
            let bumped = candidate + epsilon;
            // Epsilon vanishes at very large magnitudes
            candidate = if bumped > candidate {
                bumped
            } else {
                candidate + (candidate * f64::EPSILON).max(f64::MIN_POSITIVE)
            };
        }
        rendered[index] = candidate;
    }

    rendered
}

/// Whether a result has anything to draw
pub fn is_degenerate<R: ProjectionOutput>(result: &R) -> bool {
    !result.is_finite()
        || result
            .segments()
            .iter()
            .all(|(_, value)| !value.is_finite() || *value <= 0.0)
}

/// Year-by-year series for animated growth charts
pub fn growth_series(schedule: &Schedule) -> Vec<SeriesPoint> {
    schedule.yearly().iter().map(series_point).collect()
}

fn series_point(point: &YearPoint) -> SeriesPoint {
    SeriesPoint {
        label: format!("Year {}", point.year),
        contributed: point.contributed,
        withdrawn: point.withdrawn,
        interest: point.interest,
        balance: point.balance,
    }
}
