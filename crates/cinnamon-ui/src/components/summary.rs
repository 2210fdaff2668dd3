//! Stat cards

use cinnamon_core::DashboardSummary;
use leptos::prelude::*;

/// A single labelled value, updated reactively.
#[component]
pub fn StatCard<F>(
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    value: F,
) -> impl IntoView
where
    F: Fn() -> String + Send + Sync + 'static,
{
    view! {
        <div class="stat-card">
            <i class=format!("fas fa-{icon} stat-icon")></i>
            <div class="stat-body">
                <div class="stat-label">{label}</div>
                <div class="stat-value" id=id>{value}</div>
            </div>
        </div>
    }
}

/// The four overview cards of the dashboard view.
#[component]
pub fn SummaryCards(summary: RwSignal<DashboardSummary>) -> impl IntoView {
    view! {
        <div class="stats-grid">
            <StatCard
                id="total-connections"
                label="Total Connections"
                icon="network-wired"
                value=move || summary.with(|s| s.total_connections.clone())
            />
            <StatCard
                id="active-services"
                label="Active Services"
                icon="server"
                value=move || summary.with(|s| s.active_services.clone())
            />
            <StatCard
                id="error-rate"
                label="Error Rate"
                icon="triangle-exclamation"
                value=move || summary.with(|s| s.error_rate.clone())
            />
            <StatCard
                id="avg-latency"
                label="Avg Latency"
                icon="gauge"
                value=move || summary.with(|s| s.avg_latency.clone())
            />
        </div>
    }
}

/// Error totals shown on the errors view.
#[component]
pub fn ErrorCards(summary: RwSignal<DashboardSummary>) -> impl IntoView {
    view! {
        <div class="stats-grid">
            <StatCard
                id="total-errors"
                label="Total Errors"
                icon="bug"
                value=move || summary.with(|s| s.total_errors.clone())
            />
            <StatCard
                id="error-percentage"
                label="Error Rate"
                icon="percent"
                value=move || summary.with(|s| s.error_rate.clone())
            />
            <StatCard
                id="common-error"
                label="Most Common Error"
                icon="circle-exclamation"
                value=move || summary.with(|s| s.most_common_error.clone())
            />
        </div>
    }
}
