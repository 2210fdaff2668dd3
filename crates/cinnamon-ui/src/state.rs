//! Reactive state the refresh loop renders into.

use std::collections::BTreeMap;

use cinnamon_core::{
    ChartHandle, ChartName, ConnectionFilter, DashboardSummary, FilterOptions, RenderTarget,
    TableRow,
};
use leptos::prelude::*;

/// Signals backing every dashboard widget.
///
/// Implements [`RenderTarget`], so the core dashboard drives the UI by
/// setting these; components only read them.
#[derive(Debug, Clone, Copy)]
pub struct DashboardSignals {
    pub summary: RwSignal<DashboardSummary>,
    pub rows: RwSignal<Vec<TableRow>>,
    pub options: RwSignal<FilterOptions>,
    /// Filter selections; written by the controls and by renders that drop
    /// values no longer offered.
    pub filter: RwSignal<ConnectionFilter>,
    pub charts: RwSignal<BTreeMap<ChartName, ChartHandle>>,
}

impl Default for DashboardSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardSignals {
    #[must_use]
    pub fn new() -> Self {
        Self {
            summary: RwSignal::new(DashboardSummary::empty()),
            rows: RwSignal::new(Vec::new()),
            options: RwSignal::new(FilterOptions::default()),
            filter: RwSignal::new(ConnectionFilter::default()),
            charts: RwSignal::new(BTreeMap::new()),
        }
    }
}

impl RenderTarget for DashboardSignals {
    fn render_summary(&self, summary: &DashboardSummary) {
        self.summary.set(summary.clone());
    }

    fn render_table(&self, rows: &[TableRow]) {
        self.rows.set(rows.to_vec());
    }

    fn render_filters(&self, options: &FilterOptions, filter: &ConnectionFilter) {
        self.options.set(options.clone());
        // Unchanged selections must not wake the filter effect
        if self.filter.with_untracked(|current| current != filter) {
            self.filter.set(filter.clone());
        }
    }

    fn render_chart(&self, chart: &ChartHandle) {
        self.charts.update(|charts| {
            charts.insert(chart.name(), chart.clone());
        });
    }
}

#[cfg(test)]
mod tests {
    use cinnamon_core::{ChartRegistry, Stats};

    use super::*;

    #[test]
    fn given_new_signals_then_summary_is_placeholder() {
        let signals = DashboardSignals::new();
        assert_eq!(signals.summary.get_untracked(), DashboardSummary::empty());
        assert!(signals.rows.get_untracked().is_empty());
    }

    #[test]
    fn given_rendered_chart_when_rendered_again_then_latest_revision_kept() -> Result<(), String> {
        // Given
        let signals = DashboardSignals::new();
        let mut registry = ChartRegistry::new();
        let name = ChartName::ServiceTypes;
        let empty = registry.get(name).cloned().ok_or("missing chart")?;
        signals.render_chart(&empty);

        // When
        let updated = registry
            .update(name, vec!["http".to_string()], vec![vec![3.0]])
            .map_err(|e| e.to_string())?
            .clone();
        signals.render_chart(&updated);

        // Then
        let revision = signals
            .charts
            .with_untracked(|charts| charts.get(&name).map(ChartHandle::revision));
        assert_eq!(revision, Some(1));
        assert_eq!(signals.charts.with_untracked(BTreeMap::len), 1);
        Ok(())
    }

    #[test]
    fn given_dropped_selection_when_filters_rendered_then_filter_signal_follows() {
        let signals = DashboardSignals::new();
        signals.filter.set(ConnectionFilter {
            service: Some("db".to_string()),
            ..ConnectionFilter::default()
        });

        signals.render_filters(&FilterOptions::default(), &ConnectionFilter::default());

        assert_eq!(signals.filter.get_untracked(), ConnectionFilter::default());
        assert_eq!(signals.options.get_untracked(), FilterOptions::default());
    }

    #[test]
    fn given_stats_when_summary_rendered_then_signal_holds_formatted_values() {
        let signals = DashboardSignals::new();
        let stats = Stats {
            total_connections: 42,
            ..Stats::default()
        };

        signals.render_summary(&DashboardSummary::from_stats(&stats));

        assert_eq!(signals.summary.get_untracked().total_connections, "42");
    }
}
