//! Platform-independent core of the Cinnamon connection dashboard
//!
//! Everything the dashboard computes lives here: the backend data model,
//! summary metrics, the filtered error table, chart datasets, theme and view
//! state, and the periodic refresh loop. Browser facilities (HTTP, timers,
//! storage, the document, notifications) are reached through traits so this
//! crate builds and tests natively.
//!
//! ## Module Structure
//! - `models`: backend response types
//! - `stats`: summary metrics derived from a stats snapshot
//! - `table`: error table rows, filter options and client-side filters
//! - `charts`: the seven chart handles and their hourly datasets
//! - `theme`: light/dark selection and persistence
//! - `views`: top-level panel selection
//! - `scheduler`: the single refresh timer
//! - `render`: seams to the backend and the display
//! - `dashboard`: one refresh cycle, end to end
//! - `settings`: interval choices and error notifications
//! - `config`: session configuration
//! - `error`, `result`: error type and logging combinators

#![forbid(unsafe_code)]

pub mod charts;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod render;
pub mod result;
pub mod scheduler;
pub mod settings;
pub mod stats;
pub mod table;
pub mod theme;
pub mod views;

pub use charts::{ChartHandle, ChartKind, ChartName, ChartRegistry, HourlyWindow, Series};
pub use config::DashboardConfig;
pub use dashboard::{CycleOutcome, Dashboard};
pub use error::Error;
pub use models::{ConnectionRecord, ConnectionsResponse, Stats};
pub use render::{RenderTarget, StatsSource};
pub use result::{Result, ResultExt};
pub use scheduler::{IntervalTimer, RefreshConfig, RefreshScheduler, TimerHandle};
pub use settings::{ErrorNotifier, Notifier, Permission};
pub use stats::DashboardSummary;
pub use table::{
    ConnectionFilter, ConnectionsTablePresenter, FilterOptions, TableRow, TableView,
};
pub use theme::{KeyValueStore, Theme, ThemeController, ThemeSurface};
pub use views::{View, ViewRouter};
