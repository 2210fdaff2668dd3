//! Sidebar navigation and theme toggle

use cinnamon_core::{View, ViewRouter};
use leptos::prelude::*;
use tracing::warn;

/// CSS class of a navigation entry.
#[must_use]
pub fn nav_class(active: bool) -> &'static str {
    if active { "nav-link active" } else { "nav-link" }
}

/// Router opened on the view named by a `#view` location fragment.
///
/// An empty fragment opens the dashboard; an unknown one is logged and
/// ignored.
#[must_use]
pub fn router_from_hash(hash: &str) -> ViewRouter {
    let mut router = ViewRouter::default();
    let id = hash.trim_start_matches('#');
    if !id.is_empty() {
        if let Err(e) = router.select_id(id) {
            warn!(error = %e, "ignoring location fragment");
        }
    }
    router
}

/// One link per view; exactly one is marked active.
#[component]
pub fn Sidebar(router: RwSignal<ViewRouter>) -> impl IntoView {
    let links = View::ALL
        .into_iter()
        .map(|view| {
            let class = move || router.with(|r| nav_class(r.is_active(view)));
            view! {
                <li class=class data-view=view.id()>
                    <a
                        href=format!("#{}", view.id())
                        on:click=move |_| router.update(|r| r.select(view))
                    >
                        {view.label()}
                    </a>
                </li>
            }
        })
        .collect_view();

    view! {
        <nav class="sidebar">
            <div class="logo">"Cinnamon"</div>
            <ul class="nav-links">{links}</ul>
        </nav>
    }
}

/// Button flipping between light and dark.
#[component]
pub fn ThemeToggle(
    #[prop(into)] icon: Signal<&'static str>,
    on_toggle: impl Fn() + 'static,
) -> impl IntoView {
    view! {
        <button class="theme-toggle" title="Toggle theme" on:click=move |_| on_toggle()>
            <i class=move || format!("fas fa-{}", icon.get())></i>
        </button>
    }
}

/// Wraps one view's content; hidden unless it is the active view.
#[component]
pub fn ViewPanel(view: View, router: RwSignal<ViewRouter>, children: Children) -> impl IntoView {
    let class = move || {
        if router.with(|r| r.is_active(view)) {
            "view active"
        } else {
            "view"
        }
    };
    view! {
        <section id=view.id() class=class>
            {children()}
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_active_view_then_only_its_link_is_active() {
        let mut router = ViewRouter::default();
        router.select(View::Services);
        let classes: Vec<_> = View::ALL
            .into_iter()
            .map(|v| nav_class(router.is_active(v)))
            .collect();
        assert_eq!(classes.iter().filter(|c| c.contains("active")).count(), 1);
        assert_eq!(classes.get(2), Some(&"nav-link active"));
    }

    #[test]
    fn given_location_fragment_then_router_opens_that_view() {
        assert_eq!(router_from_hash("#errors").selected(), View::Errors);
        assert_eq!(router_from_hash("settings").selected(), View::Settings);
    }

    #[test]
    fn given_empty_or_unknown_fragment_then_router_opens_dashboard() {
        assert_eq!(router_from_hash("").selected(), View::Dashboard);
        assert_eq!(router_from_hash("#billing").selected(), View::Dashboard);
    }

    #[test]
    fn test_components_exist() {
        let _ = Sidebar;
        let _ = ViewPanel;
    }
}
