//! Terminal charts for readings: horizontal bars over time plus a sparkline.

use std::fmt::Write;

use serde::Serialize;

use sensorboard_core::{Reading, Timestamp};

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Min / max / mean, or `None` for an empty series.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn summarize(values: &[f64]) -> Option<Summary> {
    let (&first, rest) = values.split_first()?;
    let (min, max, sum) = rest
        .iter()
        .fold((first, first, first), |(lo, hi, sum), &v| {
            (lo.min(v), hi.max(v), sum + v)
        });
    Some(Summary {
        count: values.len(),
        min,
        max,
        mean: sum / values.len() as f64,
    })
}

/// Oldest first. Unparsed timestamps keep their relative order at the end.
pub fn chronological(readings: &[Reading]) -> Vec<&Reading> {
    let mut sorted: Vec<&Reading> = readings.iter().collect();
    sorted.sort_by(|a, b| match (&a.timestamp, &b.timestamp) {
        (Timestamp::Local(x), Timestamp::Local(y)) => x.cmp(y),
        (Timestamp::Local(_), Timestamp::Unparsed(_)) => std::cmp::Ordering::Less,
        (Timestamp::Unparsed(_), Timestamp::Local(_)) => std::cmp::Ordering::Greater,
        (Timestamp::Unparsed(_), Timestamp::Unparsed(_)) => std::cmp::Ordering::Equal,
    });
    sorted
}

/// Position of `value` within `[min, max]` scaled to `0..=steps`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::as_conversions
)]
fn scale(value: f64, min: f64, max: f64, steps: usize) -> usize {
    let span = max - min;
    if span <= f64::EPSILON {
        return steps;
    }
    let ratio = ((value - min) / span).clamp(0.0, 1.0);
    (ratio * steps as f64).round() as usize
}

pub fn sparkline(values: &[f64]) -> String {
    let Some(summary) = summarize(values) else {
        return String::new();
    };
    let top = SPARK_LEVELS.len() - 1;
    values
        .iter()
        .map(|&v| SPARK_LEVELS[scale(v, summary.min, summary.max, top).min(top)])
        .collect()
}

fn time_label(ts: &Timestamp) -> String {
    match ts {
        Timestamp::Local(dt) => dt.format("%m-%d %H:%M:%S").to_string(),
        Timestamp::Unparsed(raw) => raw.clone(),
    }
}

/// One bar per reading, oldest at the top. Bars scale between the series
/// min (one cell) and max (`width` cells).
pub fn bar_chart(readings: &[Reading], width: usize) -> String {
    let ordered = chronological(readings);
    let values: Vec<f64> = ordered.iter().map(|r| r.value).collect();
    let Some(summary) = summarize(&values) else {
        return String::new();
    };

    let width = width.max(1);
    let labels: Vec<String> = ordered.iter().map(|r| time_label(&r.timestamp)).collect();
    let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    for (label, reading) in labels.iter().zip(&ordered) {
        let cells = 1 + scale(reading.value, summary.min, summary.max, width - 1);
        let _ = writeln!(
            out,
            "{label:<label_width$} │{bar:<width$} {value:.2}",
            bar = "█".repeat(cells),
            value = reading.value,
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "trend  {}", sparkline(&values));
    let _ = write!(
        out,
        "n={}  min={:.2}  max={:.2}  mean={:.2}",
        summary.count, summary.min, summary.max, summary.mean
    );
    out
}
