//! The refresh cycle: fetch both endpoints, then render in a fixed order.

use std::cell::{Cell, Ref, RefCell};

use chrono::{DateTime, FixedOffset, Local, Offset, Utc};
use futures::future::join;
use tracing::{debug, error, warn};

use crate::charts::{ChartHandle, ChartName, ChartRegistry, HourlyWindow};
use crate::config::DashboardConfig;
use crate::models::{ConnectionRecord, Stats};
use crate::render::{RenderTarget, StatsSource};
use crate::result::Result;
use crate::stats::{DashboardSummary, total_errors};
use crate::table::{ConnectionFilter, ConnectionsTablePresenter};

/// What one refresh cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Everything was re-rendered.
    Rendered {
        /// Increase of the total error count since the previous rendered
        /// cycle; zero on the first one.
        new_errors: u64,
    },
    /// A read failed; nothing was touched.
    Skipped,
}

/// Owns the presenters and chart handles of one dashboard session.
///
/// All methods take `&self` so an `Rc<Dashboard>` can be shared between the
/// timer callback and UI event handlers. Interior borrows never outlive a
/// single synchronous call.
pub struct Dashboard<S, R> {
    source: S,
    target: R,
    table: RefCell<ConnectionsTablePresenter>,
    charts: RefCell<ChartRegistry>,
    window_hours: u32,
    offset: FixedOffset,
    cycles: Cell<u64>,
    last_total_errors: Cell<Option<u64>>,
}

impl<S: StatsSource, R: RenderTarget> Dashboard<S, R> {
    /// Dashboard rendering times in the local offset.
    pub fn new(source: S, target: R, config: &DashboardConfig) -> Self {
        Self::with_offset(source, target, config, Local::now().offset().fix())
    }

    /// Creates the chart handles and renders them empty.
    pub fn with_offset(source: S, target: R, config: &DashboardConfig, offset: FixedOffset) -> Self {
        let dashboard = Self {
            source,
            target,
            table: RefCell::new(ConnectionsTablePresenter::with_offset(offset)),
            charts: RefCell::new(ChartRegistry::new()),
            window_hours: config.trend_window_hours,
            offset,
            cycles: Cell::new(0),
            last_total_errors: Cell::new(None),
        };
        dashboard.target.render_summary(&DashboardSummary::empty());
        for chart in dashboard.charts.borrow().iter() {
            dashboard.target.render_chart(chart);
        }
        dashboard
    }

    /// Runs one cycle. Failures are logged, never returned.
    pub async fn refresh(&self) -> CycleOutcome {
        let cycle = self.cycles.get().wrapping_add(1);
        self.cycles.set(cycle);
        debug!(cycle, "refresh cycle started");

        match self.fetch().await {
            Ok((stats, connections)) => {
                let new_errors = self.apply(&stats, connections, Utc::now());
                debug!(cycle, new_errors, "refresh cycle rendered");
                CycleOutcome::Rendered { new_errors }
            }
            Err(e) if e.is_backend() => {
                warn!(cycle, error = %e, "refresh cycle skipped");
                CycleOutcome::Skipped
            }
            Err(e) => {
                error!(cycle, error = %e, "refresh cycle failed outside the backend");
                CycleOutcome::Skipped
            }
        }
    }

    /// Issues both reads concurrently and waits for both.
    ///
    /// # Errors
    ///
    /// Returns the stats error if that read failed, otherwise the
    /// connections error.
    pub async fn fetch(&self) -> Result<(Stats, Vec<ConnectionRecord>)> {
        let (stats, connections) =
            join(self.source.fetch_stats(), self.source.fetch_connections()).await;
        Ok((stats?, connections?))
    }

    /// Renders one successful fetch: summary, then table and filters, then
    /// charts. Returns the increase in total errors.
    pub fn apply(&self, stats: &Stats, connections: Vec<ConnectionRecord>, now: DateTime<Utc>) -> u64 {
        self.target.render_summary(&DashboardSummary::from_stats(stats));

        let view = self.table.borrow_mut().render(connections);
        self.target.render_table(&view.rows);
        self.target.render_filters(&view.options, &view.filter);

        let window = HourlyWindow::ending_at(now, self.window_hours, self.offset);
        {
            let table = self.table.borrow();
            let mut charts = self.charts.borrow_mut();
            if let Err(e) = charts.update_all(stats, table.connections(), &window) {
                warn!(error = %e, "chart update failed");
            }
        }
        for chart in self.charts.borrow().iter() {
            self.target.render_chart(chart);
        }

        let total = total_errors(stats);
        self.last_total_errors
            .replace(Some(total))
            .map_or(0, |previous| total.saturating_sub(previous))
    }

    /// Applies new filter selections to the last fetched connections.
    pub fn set_filter(&self, filter: ConnectionFilter) {
        debug!(?filter, "connection filter changed");
        let rows = self.table.borrow_mut().set_filter(filter);
        self.target.render_table(&rows);
    }

    #[must_use]
    pub fn filter(&self) -> ConnectionFilter {
        self.table.borrow().filter().clone()
    }

    /// Number of cycles started so far.
    #[must_use]
    pub fn cycles(&self) -> u64 {
        self.cycles.get()
    }

    pub const fn source(&self) -> &S {
        &self.source
    }

    pub const fn target(&self) -> &R {
        &self.target
    }

    /// Borrow of one chart handle. Do not hold it across an await.
    #[must_use]
    pub fn chart(&self, name: ChartName) -> Option<Ref<'_, ChartHandle>> {
        Ref::filter_map(self.charts.borrow(), |charts| charts.get(name)).ok()
    }
}
