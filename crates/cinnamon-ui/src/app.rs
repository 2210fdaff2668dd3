//! Root component: owns the dashboard and wires every control to it.

use std::rc::Rc;

use cinnamon_core::settings::interval_choices;
use cinnamon_core::{
    ChartName, CycleOutcome, Dashboard, DashboardConfig, ErrorNotifier,
    RefreshConfig, RefreshScheduler, ThemeController, View,
};
use leptos::prelude::*;
use tracing::{info, warn};
use wasm_bindgen_futures::spawn_local;

use crate::components::nav::router_from_hash;
use crate::components::{
    ChartCard, ErrorCards, ErrorTable, FilterBar, SettingsPanel, Sidebar, SummaryCards,
    ThemeToggle, ViewPanel,
};
use crate::platform::{self, BrowserNotifier, DocumentTheme, GlooTimer, HttpStatsSource};
use crate::state::DashboardSignals;

type BrowserDashboard = Dashboard<HttpStatsSource, DashboardSignals>;
type BrowserTheme = ThemeController<platform::LocalStorage, DocumentTheme>;

/// Seconds shown in the interval selector for a running interval.
const fn interval_secs(config: RefreshConfig) -> u32 {
    config.interval_ms() / 1000
}

/// Closure run on every timer tick: one refresh cycle, then a notification
/// if it saw new errors.
fn refresh_tick(
    dashboard: Rc<BrowserDashboard>,
    notifier: Rc<ErrorNotifier<BrowserNotifier>>,
) -> impl Fn() + Clone + 'static {
    move || {
        let dashboard = Rc::clone(&dashboard);
        let notifier = Rc::clone(&notifier);
        spawn_local(async move {
            if let CycleOutcome::Rendered { new_errors } = dashboard.refresh().await {
                notifier.on_new_errors(new_errors);
            }
        });
    }
}

/// The whole dashboard: sidebar, views and the refresh loop behind them.
#[component]
pub fn App(config: DashboardConfig) -> impl IntoView {
    let signals = DashboardSignals::new();
    let dashboard = Rc::new(Dashboard::new(
        HttpStatsSource::new(&config),
        signals,
        &config,
    ));
    let notifier = Rc::new(ErrorNotifier::new(BrowserNotifier));

    // Refresh loop: first cycle now, then on every interval.
    let tick = refresh_tick(Rc::clone(&dashboard), Rc::clone(&notifier));
    let mut scheduler = RefreshScheduler::new(GlooTimer, tick.clone());
    if let Err(e) = scheduler.start(config.refresh.interval_ms()) {
        warn!(error = %e, "refresh timer not started");
    }
    tick();
    let scheduler = StoredValue::new_local(scheduler);
    let interval = RwSignal::new(interval_secs(config.refresh));

    let on_interval = move |value: String| {
        let requested = match RefreshConfig::parse_secs(&value) {
            Ok(requested) => requested,
            Err(e) => {
                warn!(error = %e, %value, "ignoring refresh interval");
                return;
            }
        };
        scheduler.update_value(|scheduler| {
            match scheduler.reconfigure(requested.interval_ms()) {
                Ok(()) => interval.set(interval_secs(requested)),
                Err(e) => warn!(error = %e, "failed to change refresh interval"),
            }
        });
    };

    // Theme
    let (icon, set_icon) = signal("moon");
    let controller: BrowserTheme = ThemeController::load(
        platform::LocalStorage,
        DocumentTheme::new(set_icon),
        config.theme_key.clone(),
    );
    let theme = RwSignal::new(controller.current());
    let controller = StoredValue::new_local(controller);

    let on_toggle = move || {
        controller.update_value(|controller| {
            if let Err(e) = controller.toggle() {
                warn!(error = %e, "theme not saved");
            }
            theme.set(controller.current());
        });
    };
    let on_theme = move |value: String| {
        controller.update_value(|controller| {
            if let Err(e) = controller.select(&value) {
                warn!(error = %e, %value, "theme selection failed");
            }
            theme.set(controller.current());
        });
    };

    // Notifications
    let notifications = RwSignal::new(notifier.is_enabled());
    let notifier = StoredValue::new_local(notifier);
    let on_notifications = move |requested: bool| {
        let notifier = notifier.get_value();
        spawn_local(async move {
            notifications.set(notifier.set_enabled(requested).await);
        });
    };

    // Filters re-render the table from the last fetch.
    let filter = signals.filter;
    let filter_target = Rc::clone(&dashboard);
    Effect::new(move |_| {
        filter_target.set_filter(filter.get());
    });

    let router = RwSignal::new(router_from_hash(&platform::document::location_hash()));
    let choices = interval_choices(&config.interval_choices_secs);
    let charts = signals.charts;

    info!(
        interval_ms = config.refresh.interval_ms(),
        theme = %theme.get_untracked(),
        "dashboard mounted"
    );

    view! {
        <div class="app">
            <Sidebar router=router />
            <main class="content">
                <header class="top-bar">
                    <h1>{move || router.with(|r| r.selected().label())}</h1>
                    <ThemeToggle icon=icon on_toggle=on_toggle />
                </header>

                <ViewPanel view=View::Dashboard router=router>
                    <SummaryCards summary=signals.summary />
                    <div class="charts-grid">
                        <ChartCard name=ChartName::ConnectionTrends charts=charts />
                        <ChartCard name=ChartName::ServiceDistribution charts=charts />
                    </div>
                    <div class="table-card">
                        <h3>"Recent Errors"</h3>
                        <FilterBar options=signals.options filter=filter />
                        <ErrorTable rows=signals.rows />
                    </div>
                </ViewPanel>

                <ViewPanel view=View::Connections router=router>
                    <div class="charts-grid">
                        <ChartCard name=ChartName::ConnectionVolume charts=charts />
                        <ChartCard name=ChartName::LatencyTrends charts=charts />
                    </div>
                </ViewPanel>

                <ViewPanel view=View::Services router=router>
                    <div class="charts-grid">
                        <ChartCard name=ChartName::ServiceTypes charts=charts />
                    </div>
                </ViewPanel>

                <ViewPanel view=View::Errors router=router>
                    <ErrorCards summary=signals.summary />
                    <div class="charts-grid">
                        <ChartCard name=ChartName::ErrorDistribution charts=charts />
                        <ChartCard name=ChartName::ErrorTimeline charts=charts />
                    </div>
                </ViewPanel>

                <ViewPanel view=View::Settings router=router>
                    <SettingsPanel
                        choices=choices
                        interval_secs=interval
                        on_interval=on_interval
                        theme=theme
                        on_theme=on_theme
                        notifications=notifications
                        on_notifications=on_notifications
                    />
                </ViewPanel>
            </main>
        </div>
    }
}
