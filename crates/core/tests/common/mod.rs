//! Shared test doubles for the refresh loop.

#![allow(dead_code, clippy::unwrap_used, clippy::panic)]

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::FixedOffset;
use cinnamon_core::charts::ChartName;
use cinnamon_core::{
    ChartHandle, ConnectionFilter, ConnectionRecord, Dashboard, DashboardConfig, DashboardSummary, Error,
    FilterOptions, IntervalTimer, RenderTarget, Result, Stats, StatsSource, TableRow, TimerHandle,
};
use futures::channel::oneshot;
use tokio::task::JoinHandle;

/// Backend double with replaceable responses and an optional gate that holds
/// the next stats read until released.
pub struct FakeSource {
    stats: RefCell<Result<Stats>>,
    connections: RefCell<Result<Vec<ConnectionRecord>>>,
    gate: RefCell<Option<oneshot::Receiver<()>>>,
    pub stats_reads: Cell<usize>,
}

impl FakeSource {
    pub fn new(stats: Stats, connections: Vec<ConnectionRecord>) -> Self {
        Self {
            stats: RefCell::new(Ok(stats)),
            connections: RefCell::new(Ok(connections)),
            gate: RefCell::new(None),
            stats_reads: Cell::new(0),
        }
    }

    /// Holds the next stats read until the returned sender fires.
    pub fn gate_next_read(&self) -> oneshot::Sender<()> {
        let (release, gate) = oneshot::channel();
        *self.gate.borrow_mut() = Some(gate);
        release
    }

    pub fn set_stats(&self, stats: Result<Stats>) {
        *self.stats.borrow_mut() = stats;
    }

    pub fn set_connections(&self, connections: Result<Vec<ConnectionRecord>>) {
        *self.connections.borrow_mut() = connections;
    }
}

#[async_trait(?Send)]
impl StatsSource for FakeSource {
    async fn fetch_stats(&self) -> Result<Stats> {
        self.stats_reads.set(self.stats_reads.get() + 1);
        let gate = self.gate.borrow_mut().take();
        if let Some(gate) = gate {
            gate.await.map_err(|_| Error::request_failed("/api/connections/stats", "gate dropped"))?;
        }
        self.stats.borrow().clone()
    }

    async fn fetch_connections(&self) -> Result<Vec<ConnectionRecord>> {
        self.connections.borrow().clone()
    }
}

/// Remembers everything rendered, in order.
#[derive(Default)]
pub struct RecordingTarget {
    pub summaries: RefCell<Vec<DashboardSummary>>,
    pub tables: RefCell<Vec<Vec<TableRow>>>,
    pub filters: RefCell<Vec<FilterOptions>>,
    pub selections: RefCell<Vec<ConnectionFilter>>,
    pub charts: RefCell<Vec<(ChartName, u64)>>,
    pub order: RefCell<Vec<&'static str>>,
}

impl RecordingTarget {
    pub fn last_summary(&self) -> DashboardSummary {
        self.summaries.borrow().last().cloned().unwrap()
    }

    pub fn last_table(&self) -> Vec<TableRow> {
        self.tables.borrow().last().cloned().unwrap_or_default()
    }
}

impl RenderTarget for RecordingTarget {
    fn render_summary(&self, summary: &DashboardSummary) {
        self.summaries.borrow_mut().push(summary.clone());
        self.order.borrow_mut().push("summary");
    }

    fn render_table(&self, rows: &[TableRow]) {
        self.tables.borrow_mut().push(rows.to_vec());
        self.order.borrow_mut().push("table");
    }

    fn render_filters(&self, options: &FilterOptions, filter: &ConnectionFilter) {
        self.filters.borrow_mut().push(options.clone());
        self.selections.borrow_mut().push(filter.clone());
        self.order.borrow_mut().push("filters");
    }

    fn render_chart(&self, chart: &ChartHandle) {
        self.charts.borrow_mut().push((chart.name(), chart.revision()));
        self.order.borrow_mut().push("chart");
    }
}

pub type TestDashboard = Dashboard<FakeSource, RecordingTarget>;

pub fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
}

pub fn dashboard(source: FakeSource) -> TestDashboard {
    Dashboard::with_offset(
        source,
        RecordingTarget::default(),
        &DashboardConfig::default(),
        utc(),
    )
}

pub fn stats(total_connections: u64, errors: &[(&str, u64)]) -> Stats {
    Stats {
        total_connections,
        avg_latency: 12.4,
        error_counts: errors
            .iter()
            .map(|(kind, count)| ((*kind).to_string(), *count))
            .collect::<BTreeMap<_, _>>(),
        service_type_stats: [("http".to_string(), 7), ("postgres".to_string(), 3)]
            .into_iter()
            .collect(),
        ..Stats::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Started(u32),
    Cancelled(u32),
}

/// Timer that only ticks when the test says so.
#[derive(Clone, Default)]
pub struct ManualTimer {
    pub events: Rc<RefCell<Vec<TimerEvent>>>,
    current: Rc<RefCell<Option<(Rc<Cell<bool>>, Rc<dyn Fn()>)>>>,
}

pub struct ManualHandle {
    interval_ms: u32,
    live: Rc<Cell<bool>>,
    events: Rc<RefCell<Vec<TimerEvent>>>,
}

impl TimerHandle for ManualHandle {
    fn cancel(self) {
        self.live.set(false);
        self.events
            .borrow_mut()
            .push(TimerEvent::Cancelled(self.interval_ms));
    }
}

impl IntervalTimer for ManualTimer {
    type Handle = ManualHandle;

    fn start(&self, interval_ms: u32, tick: Rc<dyn Fn()>) -> ManualHandle {
        let live = Rc::new(Cell::new(true));
        *self.current.borrow_mut() = Some((Rc::clone(&live), tick));
        self.events.borrow_mut().push(TimerEvent::Started(interval_ms));
        ManualHandle {
            interval_ms,
            live,
            events: Rc::clone(&self.events),
        }
    }
}

impl ManualTimer {
    /// Fires the most recently started timer if it is still live.
    pub fn fire(&self) -> bool {
        let current = self.current.borrow().clone();
        match current {
            Some((live, tick)) if live.get() => {
                tick();
                true
            }
            _ => false,
        }
    }
}

/// Interval timer on tokio's clock, for paused-time tests.
///
/// Must be used inside a `LocalSet`.
#[derive(Clone, Copy, Default)]
pub struct TokioTimer;

pub struct TokioHandle(JoinHandle<()>);

impl TimerHandle for TokioHandle {
    fn cancel(self) {
        self.0.abort();
    }
}

impl IntervalTimer for TokioTimer {
    type Handle = TokioHandle;

    fn start(&self, interval_ms: u32, tick: Rc<dyn Fn()>) -> TokioHandle {
        let period = Duration::from_millis(u64::from(interval_ms));
        TokioHandle(tokio::task::spawn_local(async move {
            let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            loop {
                interval.tick().await;
                tick();
            }
        }))
    }
}
