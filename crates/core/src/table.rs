//! Recent-error table and filter dropdowns.
//!
//! Only connections that carry an error are shown in the table. The filter
//! option sets are derived from every fetched connection so a service stays
//! selectable while it is healthy.

use chrono::{DateTime, FixedOffset, Local, Offset, Utc};
use itertools::Itertools;
use tracing::info;

use crate::models::ConnectionRecord;

/// Label of the first entry of every filter dropdown; selecting it clears
/// the filter.
pub const ALL_OPTION: &str = "All";

/// Form value of that first entry. Empty, so a real value named `All`
/// stays selectable.
pub const ALL_VALUE: &str = "";

/// Shown for a missing service name or timestamp.
pub const MISSING_PLACEHOLDER: &str = "-";

/// One rendered table row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableRow {
    pub service: String,
    pub source: String,
    pub destination: String,
    /// Rendered with the error badge style.
    pub error: String,
    pub timestamp: String,
}

/// Option lists for the three filter dropdowns, each starting with [`ALL_OPTION`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOptions {
    pub services: Vec<String>,
    pub errors: Vec<String>,
    pub environments: Vec<String>,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            services: vec![ALL_OPTION.to_string()],
            errors: vec![ALL_OPTION.to_string()],
            environments: vec![ALL_OPTION.to_string()],
        }
    }
}

/// Current selections of the filter controls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionFilter {
    pub service: Option<String>,
    pub error: Option<String>,
    pub environment: Option<String>,
    pub search: String,
}

impl ConnectionFilter {
    /// Maps a dropdown value to a constraint; [`ALL_VALUE`] means none.
    pub fn selection(value: &str) -> Option<String> {
        (value != ALL_VALUE).then(|| value.to_string())
    }

    /// Drops selections the dropdowns no longer offer. Returns whether any
    /// were dropped.
    pub fn retain_offered(&mut self, options: &FilterOptions) -> bool {
        let mut dropped = false;
        for (selection, offered) in [
            (&mut self.service, &options.services),
            (&mut self.error, &options.errors),
            (&mut self.environment, &options.environments),
        ] {
            if selection
                .as_ref()
                .is_some_and(|value| !offered.iter().skip(1).any(|o| o == value))
            {
                *selection = None;
                dropped = true;
            }
        }
        dropped
    }

    /// Whether any constraint is set.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.service.is_some()
            || self.error.is_some()
            || self.environment.is_some()
            || !self.search.trim().is_empty()
    }

    /// Whether the record passes every constraint.
    #[must_use]
    pub fn matches(&self, record: &ConnectionRecord) -> bool {
        let selected = |wanted: &Option<String>, actual: Option<&str>| {
            wanted.as_deref().is_none_or(|w| actual == Some(w))
        };

        selected(&self.service, record.service())
            && selected(&self.error, record.error_kind())
            && selected(&self.environment, record.environment())
            && self.matches_search(record)
    }

    /// Case-insensitive substring match on service name, host and deployment.
    fn matches_search(&self, record: &ConnectionRecord) -> bool {
        let needle = self.search.trim().to_lowercase();
        needle.is_empty()
            || [&record.service_name, &record.host, &record.deployment_id]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Records that carry an error, in input order.
pub fn error_connections(
    connections: &[ConnectionRecord],
) -> impl Iterator<Item = &ConnectionRecord> {
    connections.iter().filter(|c| c.error_kind().is_some())
}

/// Distinct non-empty values in first-seen order, behind the `All` sentinel.
fn option_list<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    std::iter::once(ALL_OPTION)
        .chain(values.flatten().unique())
        .map(str::to_string)
        .collect()
}

/// Option sets for the service, error and environment dropdowns.
#[must_use]
pub fn derive_filter_options(connections: &[ConnectionRecord]) -> FilterOptions {
    FilterOptions {
        services: option_list(connections.iter().map(ConnectionRecord::service)),
        errors: option_list(connections.iter().map(ConnectionRecord::error_kind)),
        environments: option_list(connections.iter().map(ConnectionRecord::environment)),
    }
}

/// Table rows plus dropdown options produced by one render.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableView {
    pub rows: Vec<TableRow>,
    pub options: FilterOptions,
    /// Filter the rows were selected with; only offered values survive.
    pub filter: ConnectionFilter,
}

/// Turns fetched connections into table rows.
///
/// Keeps the last fetched list so a filter change can re-render without
/// going back to the backend.
#[derive(Debug, Clone)]
pub struct ConnectionsTablePresenter {
    offset: FixedOffset,
    filter: ConnectionFilter,
    last: Vec<ConnectionRecord>,
}

impl Default for ConnectionsTablePresenter {
    fn default() -> Self {
        Self::with_offset(Local::now().offset().fix())
    }
}

impl ConnectionsTablePresenter {
    /// Presenter that formats timestamps in the given UTC offset.
    #[must_use]
    pub fn with_offset(offset: FixedOffset) -> Self {
        Self {
            offset,
            filter: ConnectionFilter::default(),
            last: Vec::new(),
        }
    }

    #[must_use]
    pub const fn filter(&self) -> &ConnectionFilter {
        &self.filter
    }

    /// Connections of the last render, unfiltered.
    #[must_use]
    pub fn connections(&self) -> &[ConnectionRecord] {
        &self.last
    }

    /// Replaces the prior connection set and renders it.
    ///
    /// A selection whose value no longer appears in the new connections is
    /// cleared before the rows are filtered.
    pub fn render(&mut self, connections: Vec<ConnectionRecord>) -> TableView {
        self.last = connections;
        let options = derive_filter_options(&self.last);
        if self.filter.retain_offered(&options) {
            info!(filter = ?self.filter, "cleared filter values no longer present");
        }
        TableView {
            rows: self.rows(),
            options,
            filter: self.filter.clone(),
        }
    }

    /// Applies a new filter to the last fetched connections.
    pub fn set_filter(&mut self, filter: ConnectionFilter) -> Vec<TableRow> {
        self.filter = filter;
        self.rows()
    }

    fn rows(&self) -> Vec<TableRow> {
        error_connections(&self.last)
            .filter(|record| self.filter.matches(record))
            .map(|record| self.row(record))
            .collect()
    }

    fn row(&self, record: &ConnectionRecord) -> TableRow {
        TableRow {
            service: record
                .service()
                .unwrap_or(MISSING_PLACEHOLDER)
                .to_string(),
            source: record.source_endpoint(),
            destination: record.destination_endpoint(),
            error: record.error_kind().unwrap_or_default().to_string(),
            timestamp: format_timestamp(record.timestamp, self.offset),
        }
    }
}

/// `3/1/2024, 10:15:30 AM` style, in the presenter's offset.
#[must_use]
pub fn format_timestamp(timestamp: Option<DateTime<Utc>>, offset: FixedOffset) -> String {
    timestamp.map_or_else(
        || MISSING_PLACEHOLDER.to_string(),
        |ts| {
            ts.with_timezone(&offset)
                .format("%-m/%-d/%Y, %-I:%M:%S %p")
                .to_string()
        },
    )
}
