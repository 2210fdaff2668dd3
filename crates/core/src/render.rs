//! Seams between the dashboard and the outside world.
//!
//! [`StatsSource`] is the backend, [`RenderTarget`] is whatever displays the
//! results. Both are implemented by the browser crate and by test doubles.

use async_trait::async_trait;

use crate::charts::ChartHandle;
use crate::models::{ConnectionRecord, Stats};
use crate::result::Result;
use crate::stats::DashboardSummary;
use crate::table::{ConnectionFilter, FilterOptions, TableRow};

/// Read access to the connection statistics API.
#[async_trait(?Send)]
pub trait StatsSource {
    /// `GET /api/connections/stats`
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, a non-success status or an
    /// undecodable body.
    async fn fetch_stats(&self) -> Result<Stats>;

    /// `GET /api/connections`
    ///
    /// # Errors
    ///
    /// Same conditions as [`StatsSource::fetch_stats`].
    async fn fetch_connections(&self) -> Result<Vec<ConnectionRecord>>;
}

/// Display surface for everything a refresh cycle produces.
pub trait RenderTarget {
    fn render_summary(&self, summary: &DashboardSummary);

    /// Replaces all table rows.
    fn render_table(&self, rows: &[TableRow]);

    /// Dropdown options plus the selections still in effect; a selection is
    /// cleared once its value stops appearing in the fetched connections.
    fn render_filters(&self, options: &FilterOptions, filter: &ConnectionFilter);

    /// Redraws one chart from its handle.
    fn render_chart(&self, chart: &ChartHandle);
}
