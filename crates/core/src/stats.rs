//! Derived metrics over a statistics snapshot.
//!
//! Pure functions only; rendering happens through [`crate::render::RenderTarget`].

use serde::{Deserialize, Serialize};

use crate::models::Stats;

/// Shown in place of the most common error when no errors were recorded.
pub const NO_ERRORS: &str = "None";

/// Error rate as a percentage with one decimal, e.g. `"20.0"`.
///
/// The numerator is the number of *distinct* error kinds, not the number of
/// failed connections. Halves round up, so 0.25 shows as `"0.3"`. Returns
/// `"0.0"` when there were no connections.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn error_rate(stats: &Stats) -> String {
    if stats.total_connections == 0 {
        return "0.0".to_string();
    }
    let distinct_kinds = stats.error_counts.len() as f64;
    let rate = distinct_kinds / stats.total_connections as f64 * 100.0;
    // `{:.1}` alone rounds ties to even
    let rounded = (rate * 10.0).round() / 10.0;
    format!("{rounded:.1}")
}

/// Sum of all error occurrences.
#[must_use]
pub fn total_errors(stats: &Stats) -> u64 {
    stats
        .error_counts
        .values()
        .fold(0_u64, |sum, count| sum.saturating_add(*count))
}

/// Error kind with the highest count, or [`NO_ERRORS`].
///
/// Ties go to the first maximum in key order.
#[must_use]
pub fn most_common_error(stats: &Stats) -> String {
    stats
        .error_counts
        .iter()
        .fold(None, |best: Option<(&String, u64)>, (kind, &count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((kind, count)),
        })
        .map_or_else(|| NO_ERRORS.to_string(), |(kind, _)| kind.clone())
}

/// Number of service types that reported any connections.
#[must_use]
pub fn active_service_count(stats: &Stats) -> usize {
    stats.service_type_stats.len()
}

/// View model for the summary cards and the error panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_connections: String,
    pub active_services: String,
    pub error_rate: String,
    pub avg_latency: String,
    pub total_errors: String,
    pub most_common_error: String,
}

impl DashboardSummary {
    /// Formats every card value from one snapshot.
    #[must_use]
    pub fn from_stats(stats: &Stats) -> Self {
        Self {
            total_connections: stats.total_connections.to_string(),
            active_services: active_service_count(stats).to_string(),
            error_rate: format!("{}%", error_rate(stats)),
            avg_latency: format!("{}ms", round_latency(stats.avg_latency)),
            total_errors: total_errors(stats).to_string(),
            most_common_error: most_common_error(stats),
        }
    }

    /// Placeholder shown before the first successful refresh.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            total_connections: "0".to_string(),
            active_services: "0".to_string(),
            error_rate: "0.0%".to_string(),
            avg_latency: "0ms".to_string(),
            total_errors: "0".to_string(),
            most_common_error: NO_ERRORS.to_string(),
        }
    }
}

/// Whole milliseconds; non-finite or negative latencies read as zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_latency(avg_latency: f64) -> u64 {
    if avg_latency.is_finite() && avg_latency > 0.0 {
        avg_latency.round() as u64
    } else {
        0
    }
}
