//! Recent-error table with its filter bar

use cinnamon_core::table::ALL_VALUE;
use cinnamon_core::{ConnectionFilter, FilterOptions, TableRow};
use leptos::prelude::*;

/// Form value of the option at `index`; the first one is the `All` entry.
#[must_use]
pub fn option_value(index: usize, value: &str) -> &str {
    if index == 0 { ALL_VALUE } else { value }
}

/// Whether the option at `index` matches the current selection.
#[must_use]
pub fn is_selected(index: usize, value: &str, selection: Option<&str>) -> bool {
    selection.map_or(index == 0, |selected| index > 0 && selected == value)
}

/// Dropdown over one filter dimension.
#[component]
pub fn FilterSelect(
    id: &'static str,
    label: &'static str,
    #[prop(into)] values: Signal<Vec<String>>,
    #[prop(into)] selected: Signal<Option<String>>,
    on_select: impl Fn(Option<String>) + 'static,
) -> impl IntoView {
    let options = move || {
        let current = selected.get();
        values.with(|values| {
            values
                .iter()
                .enumerate()
                .map(|(index, value)| {
                    let chosen = is_selected(index, value, current.as_deref());
                    view! {
                        <option value=option_value(index, value).to_string() selected=chosen>
                            {value.clone()}
                        </option>
                    }
                })
                .collect_view()
        })
    };

    view! {
        <label class="filter">
            <span class="filter-label">{label}</span>
            <select
                id=id
                on:change=move |ev| on_select(ConnectionFilter::selection(&event_target_value(&ev)))
            >
                {options}
            </select>
        </label>
    }
}

/// Service, error and environment dropdowns plus a free-text search.
#[component]
pub fn FilterBar(
    options: RwSignal<FilterOptions>,
    filter: RwSignal<ConnectionFilter>,
) -> impl IntoView {
    view! {
        <div class="filter-bar">
            <FilterSelect
                id="service-filter"
                label="Service"
                values=Signal::derive(move || options.with(|o| o.services.clone()))
                selected=Signal::derive(move || filter.with(|f| f.service.clone()))
                on_select=move |value| filter.update(|f| f.service = value)
            />
            <FilterSelect
                id="error-filter"
                label="Error"
                values=Signal::derive(move || options.with(|o| o.errors.clone()))
                selected=Signal::derive(move || filter.with(|f| f.error.clone()))
                on_select=move |value| filter.update(|f| f.error = value)
            />
            <FilterSelect
                id="environment-filter"
                label="Environment"
                values=Signal::derive(move || options.with(|o| o.environments.clone()))
                selected=Signal::derive(move || filter.with(|f| f.environment.clone()))
                on_select=move |value| filter.update(|f| f.environment = value)
            />
            <input
                type="search"
                class="filter-search"
                placeholder="Search service, host or deployment"
                prop:value=move || filter.with(|f| f.search.clone())
                on:input=move |ev| filter.update(|f| f.search = event_target_value(&ev))
            />
            <Show when=move || filter.with(ConnectionFilter::is_active)>
                <button
                    class="filter-clear"
                    on:click=move |_| filter.set(ConnectionFilter::default())
                >
                    "Clear filters"
                </button>
            </Show>
        </div>
    }
}

fn row_view(row: &TableRow) -> impl IntoView + use<> {
    view! {
        <tr>
            <td>{row.service.clone()}</td>
            <td>{row.source.clone()}</td>
            <td>{row.destination.clone()}</td>
            <td>
                <span class="status-badge error">{row.error.clone()}</span>
            </td>
            <td>{row.timestamp.clone()}</td>
        </tr>
    }
}

/// Connections that reported an error, newest data from the last refresh.
#[component]
pub fn ErrorTable(rows: RwSignal<Vec<TableRow>>) -> impl IntoView {
    let body = move || {
        rows.with(|rows| {
            if rows.is_empty() {
                view! {
                    <tr class="empty-row">
                        <td colspan="5">"No errors reported"</td>
                    </tr>
                }
                .into_any()
            } else {
                rows.iter().map(row_view).collect_view().into_any()
            }
        })
    };

    view! {
        <table class="connections-table">
            <thead>
                <tr>
                    <th>"Service"</th>
                    <th>"Source"</th>
                    <th>"Destination"</th>
                    <th>"Error"</th>
                    <th>"Time"</th>
                </tr>
            </thead>
            <tbody id="recent-connections-body">{body}</tbody>
        </table>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_selection_then_all_option_is_selected() {
        assert!(is_selected(0, "All", None));
        assert!(!is_selected(1, "api", None));
    }

    #[test]
    fn given_selection_then_only_that_value_is_selected() {
        assert!(is_selected(1, "api", Some("api")));
        assert!(!is_selected(0, "All", Some("api")));
    }

    #[test]
    fn given_real_value_named_all_then_it_is_distinct_from_the_sentinel() {
        let options = ["All", "All", "x"];
        let values: Vec<&str> = options
            .iter()
            .enumerate()
            .map(|(i, v)| option_value(i, v))
            .collect();
        assert_eq!(values, vec!["", "All", "x"]);

        let selection = ConnectionFilter::selection("All");
        let selected: Vec<bool> = options
            .iter()
            .enumerate()
            .map(|(i, v)| is_selected(i, v, selection.as_deref()))
            .collect();
        assert_eq!(selected, vec![false, true, false]);
        assert_eq!(ConnectionFilter::selection(option_value(0, "All")), None);
    }

    #[test]
    fn test_components_exist() {
        let _ = FilterBar;
        let _ = ErrorTable;
    }
}
