//! Settings panel

use cinnamon_core::Theme;
use cinnamon_core::settings::IntervalChoice;
use leptos::prelude::*;

/// Text of a theme selector option.
#[must_use]
pub const fn theme_label(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "Light",
        Theme::Dark => "Dark",
    }
}

/// Refresh interval, theme and notification controls.
#[component]
pub fn SettingsPanel(
    choices: Vec<IntervalChoice>,
    #[prop(into)] interval_secs: Signal<u32>,
    on_interval: impl Fn(String) + 'static,
    #[prop(into)] theme: Signal<Theme>,
    on_theme: impl Fn(String) + 'static,
    #[prop(into)] notifications: Signal<bool>,
    on_notifications: impl Fn(bool) + 'static,
) -> impl IntoView {
    let interval_options = choices
        .into_iter()
        .map(|choice| {
            let secs = choice.secs;
            view! {
                <option value=secs.to_string() selected=move || interval_secs.get() == secs>
                    {choice.label}
                </option>
            }
        })
        .collect_view();

    let theme_options = [Theme::Light, Theme::Dark]
        .into_iter()
        .map(|option| {
            view! {
                <option value=option.as_str() selected=move || theme.get() == option>
                    {theme_label(option)}
                </option>
            }
        })
        .collect_view();

    view! {
        <div class="settings-panel">
            <div class="setting">
                <label for="refresh-interval">"Refresh interval"</label>
                <select
                    id="refresh-interval"
                    on:change=move |ev| on_interval(event_target_value(&ev))
                >
                    {interval_options}
                </select>
            </div>
            <div class="setting">
                <label for="theme-select">"Theme"</label>
                <select id="theme-select" on:change=move |ev| on_theme(event_target_value(&ev))>
                    {theme_options}
                </select>
            </div>
            <div class="setting">
                <label for="notifications-toggle">"Error notifications"</label>
                <input
                    type="checkbox"
                    id="notifications-toggle"
                    prop:checked=move || notifications.get()
                    on:change=move |ev| on_notifications(event_target_checked(&ev))
                />
            </div>
        </div>
    }
}
