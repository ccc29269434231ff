//! Display grouping, aggregates, and CSV rendering.
//!
//! All functions are pure; none of them mutate or reorder their input.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::category::Category;
use crate::measurement::Measurement;

/// One display card: a category with its measurements in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementGroup {
    pub id: &'static str,
    pub title: &'static str,
    pub category: Category,
    pub measurements: Vec<Measurement>,
}

/// Partition measurements into category groups.
///
/// Groups come out in [`Category::ALL`] order; categories with no members are
/// omitted. Every input measurement lands in exactly one group.
pub fn group_by_category(measurements: &[Measurement]) -> Vec<MeasurementGroup> {
    let mut buckets: HashMap<Category, Vec<Measurement>> = HashMap::new();
    for m in measurements {
        buckets
            .entry(Category::for_id(&m.id))
            .or_default()
            .push(m.clone());
    }
    Category::ALL
        .iter()
        .filter_map(|&c| {
            buckets.remove(&c).map(|ms| MeasurementGroup {
                id: c.id(),
                title: c.title(),
                category: c,
                measurements: ms,
            })
        })
        .collect()
}

/// Mean confidence over the finite confidences.
///
/// `None` for an empty slice, when no measurement has a finite confidence,
/// or when the sum overflows.
/// Non-finite confidences are skipped.
pub fn average_confidence(measurements: &[Measurement]) -> Option<f64> {
    let (mut lo, mut hi, mut sum, mut n) = (f64::INFINITY, f64::NEG_INFINITY, 0.0, 0usize);
    for c in measurements.iter().map(|m| m.confidence).filter(|c| c.is_finite()) {
        lo = lo.min(c);
        hi = hi.max(c);
        sum += c;
        n += 1;
    }
    if n == 0 {
        return None;
    }
    let mean = sum / n as f64;
    if !mean.is_finite() {
        return None;
    }
    // rounding in the sum must not push the mean outside the observed range
    Some(mean.clamp(lo, hi))
}

/// Calendar date key (`YYYY-MM-DD`, UTC).
pub fn date_key(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Bucket measurements by calendar date. Order inside a bucket follows input order;
/// the map itself is unordered (see [`sorted_dates`]).
pub fn group_by_date(measurements: &[Measurement]) -> HashMap<String, Vec<Measurement>> {
    let mut grouped: HashMap<String, Vec<Measurement>> = HashMap::new();
    for m in measurements {
        grouped.entry(date_key(&m.date)).or_default().push(m.clone());
    }
    grouped
}

/// Date keys newest first.
pub fn sorted_dates(grouped: &HashMap<String, Vec<Measurement>>) -> Vec<String> {
    let mut dates: Vec<String> = grouped.keys().cloned().collect();
    dates.sort_unstable_by(|a, b| b.cmp(a));
    dates
}

/// Unique measurement names in first-seen order.
pub fn measurement_names(measurements: &[Measurement]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for m in measurements {
        if !names.iter().any(|n| n == &m.name) {
            names.push(m.name.clone());
        }
    }
    names
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: String,
    pub value: f64,
}

/// Per-date value of the measurement called `name`, oldest date first.
/// Dates without that measurement chart as 0.
pub fn trend_series(grouped: &HashMap<String, Vec<Measurement>>, name: &str) -> Vec<TrendPoint> {
    let mut dates = sorted_dates(grouped);
    dates.reverse();
    dates
        .into_iter()
        .map(|date| {
            let value = grouped
                .get(&date)
                .and_then(|ms| ms.iter().find(|m| m.name == name))
                .map_or(0.0, |m| m.value);
            TrendPoint { date, value }
        })
        .collect()
}

/// CSV column layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsvLayout {
    /// `Name,Value,Unit`
    Live,
    /// `Name,Value,Unit,Date,Confidence`
    Historical,
}

impl CsvLayout {
    pub fn header(self) -> &'static str {
        match self {
            CsvLayout::Live => "Name,Value,Unit",
            CsvLayout::Historical => "Name,Value,Unit,Date,Confidence",
        }
    }
}

/// Render measurements as comma-joined rows under a header line.
///
/// Values print with one decimal, confidence with two. Fields are not quoted,
/// so a name containing a comma produces an extra column.
pub fn to_csv(measurements: &[Measurement], layout: CsvLayout) -> String {
    let rows: Vec<String> = measurements
        .iter()
        .map(|m| match layout {
            CsvLayout::Live => format!("{},{:.1},{}", m.name, m.value, m.unit),
            CsvLayout::Historical => format!(
                "{},{:.1},{},{},{:.2}",
                m.name,
                m.value,
                m.unit,
                date_key(&m.date),
                m.confidence
            ),
        })
        .collect();
    format!("{}\n{}", layout.header(), rows.join("\n"))
}
