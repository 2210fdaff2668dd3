//! Fixed registry of named chart handles.
//!
//! Handles are created once with empty data and updated in place for the rest
//! of the session. Each update bumps the handle's revision, which is what the
//! rendering target watches to redraw.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, DurationRound, FixedOffset, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::models::{ConnectionRecord, CountMap, Stats};
use crate::result::Result;

/// Visual chart type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Doughnut,
    Bar,
    Pie,
}

impl ChartKind {
    /// Whether the chart is drawn as slices of a circle.
    #[must_use]
    pub const fn is_circular(self) -> bool {
        matches!(self, Self::Doughnut | Self::Pie)
    }
}

/// Where the legend sits, if shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Legend {
    Hidden,
    Right,
}

/// Fixed styling of one chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartStyle {
    /// Line/bar color, or slice colors for circular charts.
    pub palette: &'static [&'static str],
    /// Area fill under a line, when set.
    pub fill: Option<&'static str>,
    /// Curve smoothing for line charts.
    pub tension: f64,
    pub legend: Legend,
}

const MONO: &[&str] = &["#000000"];
const GREYSCALE: &[&str] = &["#000000", "#333333", "#666666", "#999999", "#cccccc"];
const ALERT: &[&str] = &["#ff3d00"];
const ALERT_RAMP: &[&str] = &["#ff3d00", "#ff6d00", "#ff9100", "#ffb300", "#ffd600"];

/// The seven charts of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartName {
    ConnectionTrends,
    ServiceDistribution,
    ConnectionVolume,
    ServiceTypes,
    ErrorDistribution,
    LatencyTrends,
    ErrorTimeline,
}

impl ChartName {
    /// All charts in display order.
    pub const ALL: [Self; 7] = [
        Self::ConnectionTrends,
        Self::ServiceDistribution,
        Self::ConnectionVolume,
        Self::ServiceTypes,
        Self::ErrorDistribution,
        Self::LatencyTrends,
        Self::ErrorTimeline,
    ];

    /// Element id of the chart container.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::ConnectionTrends => "connection-trends",
            Self::ServiceDistribution => "service-distribution",
            Self::ConnectionVolume => "connection-volume",
            Self::ServiceTypes => "service-types",
            Self::ErrorDistribution => "error-distribution",
            Self::LatencyTrends => "latency-trends",
            Self::ErrorTimeline => "error-timeline-chart",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::ConnectionTrends => "Connection Trends",
            Self::ServiceDistribution => "Service Distribution",
            Self::ConnectionVolume => "Connection Volume",
            Self::ServiceTypes => "Service Types",
            Self::ErrorDistribution => "Error Distribution",
            Self::LatencyTrends => "Latency Trends",
            Self::ErrorTimeline => "Error Timeline",
        }
    }

    #[must_use]
    pub const fn kind(self) -> ChartKind {
        match self {
            Self::ConnectionTrends
            | Self::ConnectionVolume
            | Self::LatencyTrends
            | Self::ErrorTimeline => ChartKind::Line,
            Self::ServiceDistribution => ChartKind::Doughnut,
            Self::ServiceTypes => ChartKind::Bar,
            Self::ErrorDistribution => ChartKind::Pie,
        }
    }

    /// Dataset labels; one numeric series per entry.
    #[must_use]
    pub const fn series_labels(self) -> &'static [&'static str] {
        match self {
            Self::ConnectionTrends => &["Connections"],
            Self::ConnectionVolume => &["Volume"],
            Self::ServiceTypes => &["Count"],
            Self::LatencyTrends => &["Latency"],
            Self::ErrorTimeline => &["Errors"],
            Self::ServiceDistribution | Self::ErrorDistribution => &[""],
        }
    }

    #[must_use]
    pub const fn style(self) -> ChartStyle {
        match self {
            Self::ConnectionTrends | Self::LatencyTrends => ChartStyle {
                palette: MONO,
                fill: None,
                tension: 0.4,
                legend: Legend::Hidden,
            },
            Self::ConnectionVolume => ChartStyle {
                palette: MONO,
                fill: Some("rgba(0, 0, 0, 0.1)"),
                tension: 0.4,
                legend: Legend::Hidden,
            },
            Self::ServiceTypes => ChartStyle {
                palette: MONO,
                fill: None,
                tension: 0.0,
                legend: Legend::Hidden,
            },
            Self::ServiceDistribution => ChartStyle {
                palette: GREYSCALE,
                fill: None,
                tension: 0.0,
                legend: Legend::Right,
            },
            Self::ErrorDistribution => ChartStyle {
                palette: ALERT_RAMP,
                fill: None,
                tension: 0.0,
                legend: Legend::Right,
            },
            Self::ErrorTimeline => ChartStyle {
                palette: ALERT,
                fill: Some("rgba(255, 61, 0, 0.1)"),
                tension: 0.4,
                legend: Legend::Hidden,
            },
        }
    }
}

impl fmt::Display for ChartName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ChartName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|name| name.id() == s)
            .ok_or_else(|| Error::UnknownChart(s.to_string()))
    }
}

/// One labelled numeric series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: &'static str,
    pub data: Vec<f64>,
}

/// A chart instance: fixed identity and styling, mutable data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartHandle {
    name: ChartName,
    labels: Vec<String>,
    series: Vec<Series>,
    revision: u64,
}

impl ChartHandle {
    fn new(name: ChartName) -> Self {
        Self {
            name,
            labels: Vec::new(),
            series: name
                .series_labels()
                .iter()
                .map(|&label| Series {
                    label,
                    data: Vec::new(),
                })
                .collect(),
            revision: 0,
        }
    }

    #[must_use]
    pub const fn name(&self) -> ChartName {
        self.name
    }

    #[must_use]
    pub const fn kind(&self) -> ChartKind {
        self.name.kind()
    }

    #[must_use]
    pub const fn style(&self) -> ChartStyle {
        self.name.style()
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[must_use]
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Number of updates applied since creation.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Largest value across all series, zero for an empty chart.
    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.data.iter().copied())
            .fold(0.0, f64::max)
    }

    /// Replaces labels and series data in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the number of series differs from the chart's
    /// dataset count or a series length differs from the label count. The
    /// handle is left untouched in that case.
    pub fn update(&mut self, labels: Vec<String>, series: Vec<Vec<f64>>) -> Result<()> {
        if series.len() != self.series.len() {
            return Err(Error::SeriesCountMismatch {
                chart: self.name.to_string(),
                expected: self.series.len(),
                actual: series.len(),
            });
        }
        if let Some((existing, data)) = self
            .series
            .iter()
            .zip(&series)
            .find(|(_, data)| data.len() != labels.len())
        {
            return Err(Error::SeriesLengthMismatch {
                chart: self.name.to_string(),
                series: existing.label.to_string(),
                expected: labels.len(),
                actual: data.len(),
            });
        }

        self.labels.clear();
        self.labels.extend(labels);
        for (existing, data) in self.series.iter_mut().zip(series) {
            existing.data.clear();
            existing.data.extend(data);
        }
        self.revision = self.revision.wrapping_add(1);
        Ok(())
    }
}

/// Owns one handle per [`ChartName`] for the whole session.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRegistry {
    handles: BTreeMap<ChartName, ChartHandle>,
}

impl Default for ChartRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartRegistry {
    /// Creates every chart with empty datasets.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handles: ChartName::ALL
                .into_iter()
                .map(|name| (name, ChartHandle::new(name)))
                .collect(),
        }
    }

    #[must_use]
    pub fn get(&self, name: ChartName) -> Option<&ChartHandle> {
        self.handles.get(&name)
    }

    /// Handles in display order.
    pub fn iter(&self) -> impl Iterator<Item = &ChartHandle> {
        self.handles.values()
    }

    /// Replaces one chart's data and returns the updated handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the chart is missing or the data shape does not
    /// match the chart's datasets.
    pub fn update(
        &mut self,
        name: ChartName,
        labels: Vec<String>,
        series: Vec<Vec<f64>>,
    ) -> Result<&ChartHandle> {
        let handle = self
            .handles
            .get_mut(&name)
            .ok_or_else(|| Error::UnknownChart(name.to_string()))?;
        handle.update(labels, series)?;
        Ok(handle)
    }

    /// Updates every chart from one refresh cycle's data.
    ///
    /// # Errors
    ///
    /// Returns the first update error; charts before it keep their new data.
    pub fn update_all(
        &mut self,
        stats: &Stats,
        connections: &[ConnectionRecord],
        window: &HourlyWindow,
    ) -> Result<()> {
        for (name, labels, series) in chart_datasets(stats, connections, window) {
            self.update(name, labels, series)?;
        }
        Ok(())
    }
}

type Dataset = (ChartName, Vec<String>, Vec<Vec<f64>>);

#[allow(clippy::cast_precision_loss)]
fn count_dataset(name: ChartName, counts: &CountMap) -> Dataset {
    (
        name,
        counts.keys().cloned().collect(),
        vec![counts.values().map(|&v| v as f64).collect()],
    )
}

/// Labels and series for every chart, in display order.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn chart_datasets(
    stats: &Stats,
    connections: &[ConnectionRecord],
    window: &HourlyWindow,
) -> Vec<Dataset> {
    let timed = || {
        connections
            .iter()
            .filter_map(|c| c.timestamp.map(|ts| (ts, c)))
    };
    let hourly = |series: Vec<f64>| (window.labels(), vec![series]);

    let trends = hourly(window.sum(timed().map(|(ts, _)| (ts, 1.0))));
    let volume = hourly(window.sum(timed().map(|(ts, c)| (ts, c.total_bytes() as f64))));
    let latency = hourly(window.mean(timed().map(|(ts, c)| (ts, c.latency_ms))));
    let errors = hourly(window.sum(
        stats
            .error_trends
            .iter()
            .map(|t| (t.timestamp, t.count as f64)),
    ));

    vec![
        (ChartName::ConnectionTrends, trends.0, trends.1),
        count_dataset(ChartName::ServiceDistribution, &stats.service_type_stats),
        (ChartName::ConnectionVolume, volume.0, volume.1),
        count_dataset(ChartName::ServiceTypes, &stats.service_type_stats),
        count_dataset(ChartName::ErrorDistribution, &stats.error_counts),
        (ChartName::LatencyTrends, latency.0, latency.1),
        (ChartName::ErrorTimeline, errors.0, errors.1),
    ]
}

/// The trailing hourly buckets ending with the current hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourlyWindow {
    start: DateTime<Utc>,
    hours: usize,
    offset: FixedOffset,
}

impl HourlyWindow {
    /// Window of `hours` buckets whose last bucket contains `now`.
    ///
    /// Labels are rendered in `offset`.
    #[must_use]
    pub fn ending_at(now: DateTime<Utc>, hours: u32, offset: FixedOffset) -> Self {
        let hour = TimeDelta::hours(1);
        let current = now.duration_trunc(hour).unwrap_or(now);
        let back = TimeDelta::hours(i64::from(hours.saturating_sub(1)));
        Self {
            start: current.checked_sub_signed(back).unwrap_or(current),
            hours: hours as usize,
            offset,
        }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.hours
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.hours == 0
    }

    /// Bucket start times as `HH:00` in the window's offset.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        (0..self.hours)
            .filter_map(|i| {
                let i = i64::try_from(i).ok()?;
                self.start.checked_add_signed(TimeDelta::hours(i))
            })
            .map(|ts| ts.with_timezone(&self.offset).format("%H:00").to_string())
            .collect()
    }

    /// Bucket index of `ts`, or `None` outside the window.
    #[must_use]
    pub fn bucket_of(&self, ts: DateTime<Utc>) -> Option<usize> {
        let elapsed = ts.signed_duration_since(self.start);
        if elapsed < TimeDelta::zero() {
            return None;
        }
        usize::try_from(elapsed.num_hours())
            .ok()
            .filter(|&index| index < self.hours)
    }

    /// Per-bucket sum of values.
    pub fn sum(&self, points: impl Iterator<Item = (DateTime<Utc>, f64)>) -> Vec<f64> {
        let mut buckets = vec![0.0; self.hours];
        for (ts, value) in points {
            if let Some(slot) = self.bucket_of(ts).and_then(|i| buckets.get_mut(i)) {
                *slot += value;
            }
        }
        buckets
    }

    /// Per-bucket mean of values; empty buckets read as zero.
    #[allow(clippy::cast_precision_loss)]
    pub fn mean(&self, points: impl Iterator<Item = (DateTime<Utc>, f64)>) -> Vec<f64> {
        let mut totals = vec![(0.0, 0_u32); self.hours];
        for (ts, value) in points {
            if let Some((sum, count)) = self.bucket_of(ts).and_then(|i| totals.get_mut(i)) {
                *sum += value;
                *count = count.saturating_add(1);
            }
        }
        totals
            .into_iter()
            .map(|(sum, count)| if count == 0 { 0.0 } else { sum / f64::from(count) })
            .collect()
    }
}
